//! TARGET calendar (the euro area's settlement system).

use crate::calendar::Calendar;
use crate::date::Date;

/// TARGET calendar.
///
/// Weekends plus:
/// * New Year's Day (Jan 1)
/// * Good Friday and Easter Monday (from 2000)
/// * Labour Day (May 1, from 2000)
/// * Christmas Day (Dec 25) and Boxing Day (Dec 26)
/// * December 31 in 1998, 1999, and 2001
#[derive(Debug, Clone, Copy, Default)]
pub struct Target;

impl Calendar for Target {
    fn name(&self) -> &str {
        "TARGET"
    }

    fn is_business_day(&self, date: Date) -> bool {
        if date.weekday().is_weekend() {
            return false;
        }
        let (y, m, d) = date.ymd();
        let easter_monday = easter_monday(y);
        let holiday = (m == 1 && d == 1)
            || (y >= 2000 && (date == easter_monday - 3 || date == easter_monday))
            || (y >= 2000 && m == 5 && d == 1)
            || (m == 12 && d == 25)
            || (m == 12 && d == 26)
            || (m == 12 && d == 31 && matches!(y, 1998 | 1999 | 2001));
        !holiday
    }
}

/// Easter Monday for `year`, via the anonymous Gregorian computus.
pub(crate) fn easter_monday(year: u16) -> Date {
    let y = year as i32;
    let a = y % 19;
    let b = y / 100;
    let c = y % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    let sunday =
        Date::from_ymd(year, month as u8, day as u8).expect("computus yields a valid date");
    sunday + 1
}
