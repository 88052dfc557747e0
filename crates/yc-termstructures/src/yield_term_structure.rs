//! `YieldTermStructure` — the discounting interface rate helpers consume.

use crate::term_structure::TermStructure;
use yc_core::observable::Observable;
use yc_core::{DiscountFactor, Time};
use yc_time::Date;

/// A yield (interest-rate) term structure.
///
/// The interface is deliberately narrow: helpers only ever ask a candidate
/// curve for discount factors and derive simple forwards themselves.  A
/// curve is also [`Observable`] so handles and helpers can hear about
/// changes to it.
pub trait YieldTermStructure: TermStructure + Observable {
    /// Discount factor for a year fraction `t` past the reference date.
    fn discount(&self, t: Time) -> DiscountFactor;

    /// Discount factor for a date.
    fn discount_date(&self, date: Date) -> DiscountFactor {
        self.discount(self.time_from_reference(date))
    }
}
