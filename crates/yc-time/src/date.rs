//! `Date` — a calendar date as a serial day count.
//!
//! Serial 1 is January 1, 1900; the supported range is 1901-01-01 to
//! 2199-12-31.  Serial 0 is reserved as the null sentinel.

use crate::time_unit::TimeUnit;
use crate::weekday::Weekday;
use yc_core::errors::{Error, Result};

/// A calendar date represented as a serial number of days since the epoch.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Date(i32);

// Offset between the library epoch (serial 1 = 1900-01-01) and the civil
// day count used internally (day 0 = 1970-01-01).
const EPOCH_OFFSET: i32 = 25_568;

impl Date {
    /// The null date sentinel (serial 0).
    pub const NULL: Date = Date(0);

    /// Minimum valid date: January 1, 1901.
    pub const MIN: Date = Date(367);

    /// Maximum valid date: December 31, 2199.
    pub const MAX: Date = Date(109_573);

    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from a serial number.
    ///
    /// Returns an error if `serial` is non-positive or past [`Date::MAX`].
    pub fn from_serial(serial: i32) -> Result<Self> {
        if serial <= 0 {
            return Err(Error::Date("serial number must be positive".into()));
        }
        if serial > Self::MAX.0 {
            return Err(Error::Date(format!("serial {serial} exceeds maximum date")));
        }
        Ok(Date(serial))
    }

    /// Create a date from year, month (1–12), and day-of-month (1–31).
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self> {
        if !(1900..=2199).contains(&year) {
            return Err(Error::Date(format!(
                "year {year} out of range [1900, 2199]"
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::Date(format!("month {month} out of range [1, 12]")));
        }
        let last = days_in_month(year, month);
        if day == 0 || day > last {
            return Err(Error::Date(format!(
                "day {day} out of range [1, {last}] for {year}-{month:02}"
            )));
        }
        Ok(Date(
            days_from_civil(year as i32, month as i32, day as i32) + EPOCH_OFFSET,
        ))
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    /// Return the serial number.
    pub fn serial(&self) -> i32 {
        self.0
    }

    /// Return `true` if this is the null date sentinel.
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Return the year (1900–2199).
    pub fn year(&self) -> u16 {
        self.ymd().0
    }

    /// Return the month (1–12).
    pub fn month(&self) -> u8 {
        self.ymd().1
    }

    /// Return the day of the month (1–31).
    pub fn day_of_month(&self) -> u8 {
        self.ymd().2
    }

    /// Decompose into (year, month, day).
    pub fn ymd(&self) -> (u16, u8, u8) {
        let (y, m, d) = civil_from_days(self.0 - EPOCH_OFFSET);
        (y as u16, m as u8, d as u8)
    }

    /// Return the weekday.
    pub fn weekday(&self) -> Weekday {
        // Serial 1 (1900-01-01) is a Monday.
        let w = ((self.0 - 1).rem_euclid(7) + 1) as u8;
        Weekday::from_ordinal(w).expect("rem_euclid always in 1..=7")
    }

    // ── Arithmetic ───────────────────────────────────────────────────────────

    /// Advance by `n` calendar days.  Errors if the result leaves the valid
    /// range.
    pub fn add_days(self, n: i32) -> Result<Self> {
        let serial = self.0 + n;
        if serial <= 0 || serial > Self::MAX.0 {
            return Err(Error::Date(format!(
                "date arithmetic: result {serial} out of range"
            )));
        }
        Ok(Date(serial))
    }

    /// Advance by `n` of the given time unit.
    ///
    /// Month and year steps clamp the day of month to the target month's
    /// length (January 31 plus one month is February 28 or 29).
    pub fn advance(self, n: i32, unit: TimeUnit) -> Result<Self> {
        match unit {
            TimeUnit::Days => self.add_days(n),
            TimeUnit::Weeks => self.add_days(n * 7),
            TimeUnit::Months => {
                let (y, m, d) = self.ymd();
                let months0 = (y as i32) * 12 + (m as i32 - 1) + n;
                let new_y = months0.div_euclid(12);
                let new_m = (months0.rem_euclid(12) + 1) as u8;
                if !(1900..=2199).contains(&new_y) {
                    return Err(Error::Date(format!("year {new_y} out of range")));
                }
                let new_y = new_y as u16;
                let new_d = d.min(days_in_month(new_y, new_m));
                Date::from_ymd(new_y, new_m, new_d)
            }
            TimeUnit::Years => self.advance(n * 12, TimeUnit::Months),
        }
    }

    /// Advance by a [`Period`][crate::period::Period].
    pub fn advance_period(self, period: crate::period::Period) -> Result<Self> {
        self.advance(period.length, period.unit)
    }

    /// Return the last day of the month containing this date.
    pub fn end_of_month(self) -> Self {
        let (y, m, _) = self.ymd();
        let last = days_in_month(y, m);
        Date::from_ymd(y, m, last).expect("same month is always valid")
    }

    /// Return `true` if this is the last calendar day of its month.
    pub fn is_end_of_month(self) -> bool {
        self == self.end_of_month()
    }

    /// Return the *n*-th occurrence of `weekday` in the given month.
    ///
    /// `nth_weekday(3, Weekday::Wednesday, 2024, 3)` is the third Wednesday
    /// of March 2024, i.e. 2024-03-20.
    pub fn nth_weekday(n: u8, weekday: Weekday, year: u16, month: u8) -> Result<Self> {
        if n == 0 {
            return Err(Error::Date("nth_weekday: n must be >= 1".into()));
        }
        let first = Date::from_ymd(year, month, 1)?;
        let skip = ((weekday.ordinal() as i32 - first.weekday().ordinal() as i32).rem_euclid(7))
            as u8;
        let day = 1 + skip + 7 * (n - 1);
        if day > days_in_month(year, month) {
            return Err(Error::Date(format!(
                "nth_weekday: {n}-th {weekday} does not exist in {year}-{month:02}"
            )));
        }
        Date::from_ymd(year, month, day)
    }
}

// ── Arithmetic operators ──────────────────────────────────────────────────────

impl std::ops::Add<i32> for Date {
    type Output = Self;
    fn add(self, rhs: i32) -> Self {
        self.add_days(rhs).expect("date addition out of range")
    }
}

impl std::ops::Sub<i32> for Date {
    type Output = Self;
    fn sub(self, rhs: i32) -> Self {
        self.add_days(-rhs).expect("date subtraction out of range")
    }
}

impl std::ops::Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> i32 {
        self.0 - rhs.0
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_null() {
            return write!(f, "null date");
        }
        let (y, m, d) = self.ymd();
        write!(f, "{y:04}-{m:02}-{d:02}")
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_null() {
            return write!(f, "Date(null)");
        }
        let (y, m, d) = self.ymd();
        write!(f, "Date({y:04}-{m:02}-{d:02})")
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Whether a given year is a leap year.
pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a given month/year.
pub fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => unreachable!("month out of range"),
    }
}

// Civil-calendar day count (day 0 = 1970-01-01), computed era by era so the
// conversion is branch-light and O(1) in both directions.

fn days_from_civil(y: i32, m: i32, d: i32) -> i32 {
    let y = if m <= 2 { y - 1 } else { y };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

fn civil_from_days(z: i32) -> (i32, i32, i32) {
    let z = z + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = yoe + era * 400 + i32::from(m <= 2);
    (y, m, d)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn epoch() {
        let d = Date::from_ymd(1900, 1, 1).unwrap();
        assert_eq!(d.serial(), 1);
    }

    #[test]
    fn ymd_roundtrip() {
        let dates = [
            (1900, 1, 1),
            (1900, 12, 31),
            (2000, 2, 29),
            (2100, 2, 28),
            (2024, 6, 15),
            (2199, 12, 31),
        ];
        for (y, m, d) in dates {
            let date = Date::from_ymd(y, m, d).unwrap();
            assert_eq!(date.ymd(), (y, m, d), "mismatch for {y}-{m:02}-{d:02}");
        }
    }

    #[test]
    fn weekday() {
        // 2024-01-01 is a Monday
        assert_eq!(Date::from_ymd(2024, 1, 1).unwrap().weekday(), Weekday::Monday);
        // 2024-01-06 is a Saturday
        assert_eq!(
            Date::from_ymd(2024, 1, 6).unwrap().weekday(),
            Weekday::Saturday
        );
    }

    #[test]
    fn advance_months_clamps() {
        let d = Date::from_ymd(2023, 1, 31).unwrap();
        let next = d.advance(1, TimeUnit::Months).unwrap();
        assert_eq!(next, Date::from_ymd(2023, 2, 28).unwrap());
        let leap = Date::from_ymd(2024, 1, 31).unwrap();
        assert_eq!(
            leap.advance(1, TimeUnit::Months).unwrap(),
            Date::from_ymd(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn advance_years() {
        let d = Date::from_ymd(2024, 2, 29).unwrap();
        assert_eq!(
            d.advance(1, TimeUnit::Years).unwrap(),
            Date::from_ymd(2025, 2, 28).unwrap()
        );
    }

    #[test]
    fn end_of_month() {
        let d = Date::from_ymd(2024, 2, 15).unwrap();
        assert_eq!(d.end_of_month().day_of_month(), 29);
        assert!(!d.is_end_of_month());
    }

    #[test]
    fn operators() {
        let d = Date::from_ymd(2023, 1, 1).unwrap();
        let d2 = d + 31;
        assert_eq!(d2, Date::from_ymd(2023, 2, 1).unwrap());
        assert_eq!(d2 - d, 31);
        assert_eq!(d2 - 1, Date::from_ymd(2023, 1, 31).unwrap());
    }

    #[test]
    fn nth_weekday() {
        let d = Date::nth_weekday(3, Weekday::Wednesday, 2024, 3).unwrap();
        assert_eq!(d, Date::from_ymd(2024, 3, 20).unwrap());
        let d2 = Date::nth_weekday(1, Weekday::Monday, 2024, 1).unwrap();
        assert_eq!(d2, Date::from_ymd(2024, 1, 1).unwrap());
        // no 5th Wednesday in February 2024
        assert!(Date::nth_weekday(5, Weekday::Wednesday, 2024, 2).is_err());
        assert!(Date::nth_weekday(0, Weekday::Monday, 2024, 1).is_err());
    }

    proptest! {
        #[test]
        fn serial_roundtrip(serial in Date::MIN.serial()..=Date::MAX.serial()) {
            let d = Date::from_serial(serial).unwrap();
            let (y, m, day) = d.ymd();
            let back = Date::from_ymd(y, m, day).unwrap();
            prop_assert_eq!(back.serial(), serial);
        }

        #[test]
        fn consecutive_days_are_consecutive_weekdays(
            serial in Date::MIN.serial()..Date::MAX.serial()
        ) {
            let d = Date::from_serial(serial).unwrap();
            let next = d + 1;
            let expected = d.weekday().ordinal() % 7 + 1;
            prop_assert_eq!(next.weekday().ordinal(), expected);
        }
    }
}
