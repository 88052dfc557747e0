//! United States settlement calendar.

use crate::calendar::Calendar;
use crate::date::Date;
use crate::weekday::Weekday;

/// United States federal settlement calendar.
///
/// Holidays (Saturday observances move to the preceding Friday, Sunday
/// observances to the following Monday):
/// * New Year's Day (Jan 1)
/// * Martin Luther King Jr. Day (3rd Monday of January, from 1983)
/// * Presidents' Day (3rd Monday of February)
/// * Memorial Day (last Monday of May)
/// * Juneteenth (Jun 19, from 2022)
/// * Independence Day (Jul 4)
/// * Labor Day (1st Monday of September)
/// * Columbus Day (2nd Monday of October)
/// * Veterans' Day (Nov 11)
/// * Thanksgiving (4th Thursday of November)
/// * Christmas (Dec 25)
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitedStatesSettlement;

impl Calendar for UnitedStatesSettlement {
    fn name(&self) -> &str {
        "US (Settlement)"
    }

    fn is_business_day(&self, date: Date) -> bool {
        let w = date.weekday();
        if w.is_weekend() {
            return false;
        }
        let (y, m, d) = date.ymd();
        !is_settlement_holiday(y, m, d, w)
    }
}

fn observed_fixed(day: u8, month: u8, m: u8, d: u8, w: Weekday) -> bool {
    (m == month && d == day)
        || (m == month && d == day + 1 && w == Weekday::Monday)
        || (m == month && d + 1 == day && w == Weekday::Friday)
}

fn is_settlement_holiday(y: u16, m: u8, d: u8, w: Weekday) -> bool {
    // New Year's Day, including Jan 1 falling on a Saturday (observed Dec 31)
    if observed_fixed(1, 1, m, d, w) || (m == 12 && d == 31 && w == Weekday::Friday) {
        return true;
    }
    // Martin Luther King Jr. Day
    if y >= 1983 && m == 1 && w == Weekday::Monday && (15..=21).contains(&d) {
        return true;
    }
    // Presidents' Day
    if m == 2 && w == Weekday::Monday && (15..=21).contains(&d) {
        return true;
    }
    // Memorial Day
    if m == 5 && w == Weekday::Monday && d >= 25 {
        return true;
    }
    // Juneteenth
    if y >= 2022 && observed_fixed(19, 6, m, d, w) {
        return true;
    }
    // Independence Day
    if observed_fixed(4, 7, m, d, w) {
        return true;
    }
    // Labor Day
    if m == 9 && w == Weekday::Monday && d <= 7 {
        return true;
    }
    // Columbus Day
    if m == 10 && w == Weekday::Monday && (8..=14).contains(&d) {
        return true;
    }
    // Veterans' Day
    if observed_fixed(11, 11, m, d, w) {
        return true;
    }
    // Thanksgiving
    if m == 11 && w == Weekday::Thursday && (22..=28).contains(&d) {
        return true;
    }
    // Christmas
    if observed_fixed(25, 12, m, d, w) {
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn independence_day_2023() {
        let cal = UnitedStatesSettlement;
        // July 4, 2023 is a Tuesday
        assert!(!cal.is_business_day(date(2023, 7, 4)));
    }

    #[test]
    fn independence_day_observed() {
        let cal = UnitedStatesSettlement;
        // July 4, 2026 is a Saturday; observed Friday July 3
        assert!(!cal.is_business_day(date(2026, 7, 3)));
        // July 4, 2021 is a Sunday; observed Monday July 5
        assert!(!cal.is_business_day(date(2021, 7, 5)));
    }

    #[test]
    fn thanksgiving_2023() {
        let cal = UnitedStatesSettlement;
        assert!(!cal.is_business_day(date(2023, 11, 23)));
    }

    #[test]
    fn columbus_day_2023() {
        let cal = UnitedStatesSettlement;
        // 2nd Monday of October 2023 = Oct 9
        assert!(!cal.is_business_day(date(2023, 10, 9)));
    }

    #[test]
    fn normal_day() {
        let cal = UnitedStatesSettlement;
        assert!(cal.is_business_day(date(2023, 6, 15)));
    }
}
