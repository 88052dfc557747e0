//! IMM futures date utilities.
//!
//! IMM dates are the third Wednesday of March, June, September, and
//! December.

use crate::date::Date;
use crate::weekday::Weekday;

/// Return `true` if `date` is a main-cycle IMM date.
pub fn is_imm_date(date: Date) -> bool {
    let (_, m, d) = date.ymd();
    matches!(m, 3 | 6 | 9 | 12)
        && date.weekday() == Weekday::Wednesday
        && (15..=21).contains(&d)
}

/// Return the next main-cycle IMM date on or after `date`.
pub fn next_imm_date(date: Date) -> Date {
    let (mut y, m, _) = date.ymd();
    let mut cycle_month = m.div_ceil(3) * 3;
    loop {
        let candidate = Date::nth_weekday(3, Weekday::Wednesday, y, cycle_month)
            .expect("every month has a third Wednesday");
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
