//! ASX futures date utilities.
//!
//! ASX dates are the second Friday of March, June, September, and December.

use crate::date::Date;
use crate::weekday::Weekday;

/// Return `true` if `date` is a main-cycle ASX date.
pub fn is_asx_date(date: Date) -> bool {
    let (_, m, d) = date.ymd();
    matches!(m, 3 | 6 | 9 | 12) && date.weekday() == Weekday::Friday && (8..=14).contains(&d)
}

/// Return the next main-cycle ASX date on or after `date`.
pub fn next_asx_date(date: Date) -> Date {
    let (mut y, m, _) = date.ymd();
    let mut cycle_month = m.div_ceil(3) * 3;
    loop {
        let candidate = Date::nth_weekday(2, Weekday::Friday, y, cycle_month)
            .expect("every month has a second Friday");
        if candidate >= date {
            return candidate;
        }
        cycle_month += 3;
        if cycle_month > 12 {
            cycle_month = 3;
            y += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn recognizes_asx_dates() {
        assert!(is_asx_date(date(2024, 3, 8)));
        assert!(!is_asx_date(date(2024, 3, 15)));
        assert!(!is_asx_date(date(2024, 5, 10)));
    }

    #[test]
    fn next_date_from_year_start() {
        assert_eq!(next_asx_date(date(2024, 1, 1)), date(2024, 3, 8));
    }

    #[test]
    fn next_date_rolls_past_cycle_month() {
        assert_eq!(next_asx_date(date(2024, 3, 9)), date(2024, 6, 14));
    }
}
