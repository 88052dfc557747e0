//! `FlatForward` — a curve with one constant continuously-compounded rate.

use std::sync::{Arc, Weak};

use crate::term_structure::TermStructure;
use crate::yield_term_structure::YieldTermStructure;
use yc_core::observable::{Observable, Observer, ObserverList};
use yc_core::{DiscountFactor, Rate, Time};
use yc_time::{Actual365Fixed, Calendar, Date, DayCounter, NullCalendar};

/// The simplest yield curve: `P(t) = exp(-r t)` for a fixed `r`.
pub struct FlatForward {
    reference_date: Date,
    rate: Rate,
    day_counter: Arc<dyn DayCounter>,
    calendar: Arc<dyn Calendar>,
    observers: ObserverList,
}

impl FlatForward {
    /// Create a flat curve with a continuously-compounded `rate`.
    pub fn new(reference_date: Date, rate: Rate, day_counter: Arc<dyn DayCounter>) -> Self {
        Self {
            reference_date,
            rate,
            day_counter,
            calendar: Arc::new(NullCalendar),
            observers: ObserverList::new(),
        }
    }

    /// Shorthand with the Actual/365 (Fixed) day counter.
    pub fn continuous(reference_date: Date, rate: Rate) -> Self {
        Self::new(reference_date, rate, Arc::new(Actual365Fixed))
    }

    /// The continuously-compounded flat rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }
}

impl std::fmt::Debug for FlatForward {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatForward")
            .field("reference_date", &self.reference_date)
            .field("rate", &self.rate)
            .finish()
    }
}

impl TermStructure for FlatForward {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn day_counter(&self) -> &dyn DayCounter {
        &*self.day_counter
    }

    fn calendar(&self) -> &dyn Calendar {
        &*self.calendar
    }

    fn max_date(&self) -> Date {
        Date::MAX
    }
}

impl YieldTermStructure for FlatForward {
    fn discount(&self, t: Time) -> DiscountFactor {
        (-self.rate * t).exp()
    }
}

impl Observable for FlatForward {
    fn register_observer(&self, observer: Weak<dyn Observer>) {
        self.observers.register(observer);
    }

    fn unregister_observer(&self, observer: &Weak<dyn Observer>) {
        self.observers.unregister(observer);
    }

    fn notify_observers(&self) {
        self.observers.notify();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn discounting() {
        let ref_date = Date::from_ymd(2025, 1, 2).unwrap();
        let curve = FlatForward::continuous(ref_date, 0.05);

        assert_abs_diff_eq!(curve.discount(0.0), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(curve.discount(1.0), (-0.05_f64).exp(), epsilon = 1e-12);
        assert_abs_diff_eq!(curve.discount(10.0), (-0.5_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn discount_by_date() {
        let ref_date = Date::from_ymd(2025, 1, 2).unwrap();
        let curve = FlatForward::continuous(ref_date, 0.05);
        assert_abs_diff_eq!(curve.discount_date(ref_date), 1.0, epsilon = 1e-15);

        let one_year = Date::from_ymd(2026, 1, 2).unwrap();
        let t = Actual365Fixed.year_fraction(ref_date, one_year);
        assert_abs_diff_eq!(
            curve.discount_date(one_year),
            (-0.05 * t).exp(),
            epsilon = 1e-12
        );
    }
}
