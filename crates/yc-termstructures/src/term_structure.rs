//! `TermStructure` — base trait for all term structures.

use yc_core::Time;
use yc_time::{Calendar, Date, DayCounter};

/// Base trait for all term structures.
///
/// Every term structure has a **reference date** (where discounting starts),
/// a **day counter** for date-to-time conversion, and a **maximum date**
/// beyond which it must not be queried.
pub trait TermStructure: std::fmt::Debug + Send + Sync {
    /// The date at which discount = 1.0 and from which time is measured.
    fn reference_date(&self) -> Date;

    /// The day counter used for date-to-time conversions.
    fn day_counter(&self) -> &dyn DayCounter;

    /// The calendar used for date adjustments.
    fn calendar(&self) -> &dyn Calendar;

    /// The latest date for which the curve can be used.
    fn max_date(&self) -> Date;

    /// Convert a date to a year fraction relative to the reference date.
    fn time_from_reference(&self, date: Date) -> Time {
        self.day_counter()
            .year_fraction(self.reference_date(), date)
    }
}
