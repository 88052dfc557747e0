//! `IborIndex` — an interbank offered-rate index.

use std::sync::Arc;

use yc_core::errors::{Error, Result};
use yc_core::{ensure, Natural, Rate, RelinkableHandle};
use yc_termstructures::YieldTermStructure;
use yc_time::{BusinessDayConvention, Calendar, Date, DayCounter, Period};

/// An interbank offered-rate index (e.g. a 3M or 6M term rate).
///
/// The index carries the conventions needed to map a fixing date to the
/// accrual period it covers, plus a relinkable handle to the curve its
/// forward fixings are read from.  The handle may be left empty; forecasting
/// then fails with [`Error::NotReady`] until a curve is linked.
pub struct IborIndex {
    name: String,
    tenor: Period,
    fixing_days: Natural,
    calendar: Arc<dyn Calendar>,
    convention: BusinessDayConvention,
    end_of_month: bool,
    day_counter: Arc<dyn DayCounter>,
    forwarding: RelinkableHandle<dyn YieldTermStructure>,
}

impl IborIndex {
    /// Create a new index with an empty forwarding handle.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        tenor: Period,
        fixing_days: Natural,
        calendar: Arc<dyn Calendar>,
        convention: BusinessDayConvention,
        end_of_month: bool,
        day_counter: Arc<dyn DayCounter>,
    ) -> Self {
        Self {
            name: name.into(),
            tenor,
            fixing_days,
            calendar,
            convention,
            end_of_month,
            day_counter,
            forwarding: RelinkableHandle::empty(),
        }
    }

    /// Clone this index with its forwarding handle replaced.
    ///
    /// Used when a pricing routine needs the same conventions read off a
    /// different curve (typically the curve currently being bootstrapped).
    pub fn with_forwarding(&self, forwarding: RelinkableHandle<dyn YieldTermStructure>) -> Self {
        Self {
            name: self.name.clone(),
            tenor: self.tenor,
            fixing_days: self.fixing_days,
            calendar: Arc::clone(&self.calendar),
            convention: self.convention,
            end_of_month: self.end_of_month,
            day_counter: Arc::clone(&self.day_counter),
            forwarding,
        }
    }

    // ── Conventions ──────────────────────────────────────────────────────────

    /// The index name (e.g. `"Euribor6M"`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The index tenor.
    pub fn tenor(&self) -> Period {
        self.tenor
    }

    /// Business days between fixing and value date.
    pub fn fixing_days(&self) -> Natural {
        self.fixing_days
    }

    /// The fixing calendar.
    pub fn fixing_calendar(&self) -> &Arc<dyn Calendar> {
        &self.calendar
    }

    /// The business-day convention for maturity adjustment.
    pub fn business_day_convention(&self) -> BusinessDayConvention {
        self.convention
    }

    /// Whether maturities snap to month ends.
    pub fn end_of_month(&self) -> bool {
        self.end_of_month
    }

    /// The accrual day counter.
    pub fn day_counter(&self) -> &Arc<dyn DayCounter> {
        &self.day_counter
    }

    /// The forwarding-curve handle.
    pub fn forwarding_handle(&self) -> &RelinkableHandle<dyn YieldTermStructure> {
        &self.forwarding
    }

    // ── Date derivation ──────────────────────────────────────────────────────

    /// The value (spot) date for a given fixing date.
    pub fn value_date(&self, fixing_date: Date) -> Date {
        self.calendar
            .advance_days(fixing_date, self.fixing_days as i32)
    }

    /// The fixing date for a given value date.
    pub fn fixing_date(&self, value_date: Date) -> Date {
        self.calendar
            .advance_days(value_date, -(self.fixing_days as i32))
    }

    /// The maturity date for a given value date.
    pub fn maturity_date(&self, value_date: Date) -> Result<Date> {
        self.calendar
            .advance(value_date, self.tenor, self.convention, self.end_of_month)
    }

    // ── Forecasting ──────────────────────────────────────────────────────────

    /// Forecast the fixing for `fixing_date` off the forwarding curve.
    ///
    /// The forecast is the simple forward rate over the index's accrual
    /// period under its own day counter.
    pub fn forecast_fixing(&self, fixing_date: Date) -> Result<Rate> {
        let curve = self.forwarding.current().ok_or_else(|| {
            Error::NotReady(format!("{}: no forwarding curve linked", self.name))
        })?;
        let d1 = self.value_date(fixing_date);
        let d2 = self.maturity_date(d1)?;
        let tau = self.day_counter.year_fraction(d1, d2);
        ensure!(
            tau > 0.0,
            "{}: non-positive accrual ({d1} to {d2})",
            self.name
        );
        let p1 = curve.discount_date(d1);
        let p2 = curve.discount_date(d2);
        Ok((p1 / p2 - 1.0) / tau)
    }
}

impl std::fmt::Debug for IborIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IborIndex")
            .field("name", &self.name)
            .field("tenor", &self.tenor)
            .field("fixing_days", &self.fixing_days)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use yc_termstructures::FlatForward;
    use yc_time::{Actual360, WeekendsOnly};

    fn euribor6m() -> IborIndex {
        IborIndex::new(
            "Euribor6M",
            Period::months(6),
            2,
            Arc::new(WeekendsOnly),
            BusinessDayConvention::ModifiedFollowing,
            true,
            Arc::new(Actual360),
        )
    }

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn value_and_fixing_dates_are_inverse() {
        let index = euribor6m();
        let fixing = date(2024, 3, 14); // Thursday
        let value = index.value_date(fixing);
        assert_eq!(value, date(2024, 3, 18)); // skips the weekend
        assert_eq!(index.fixing_date(value), fixing);
    }

    #[test]
    fn maturity_follows_tenor_and_convention() {
        let index = euribor6m();
        let value = date(2024, 3, 18);
        assert_eq!(index.maturity_date(value).unwrap(), date(2024, 9, 18));
    }

    #[test]
    fn forecast_needs_a_curve() {
        let index = euribor6m();
        assert!(matches!(
            index.forecast_fixing(date(2024, 3, 14)),
            Err(Error::NotReady(_))
        ));
    }

    #[test]
    fn forecast_matches_curve_forward() {
        let index = euribor6m();
        let today = date(2024, 3, 14);
        let curve: Arc<dyn YieldTermStructure> = Arc::new(FlatForward::continuous(today, 0.03));
        index.forwarding_handle().link_to(curve.clone());

        let fixing = index.forecast_fixing(today).unwrap();
        let d1 = index.value_date(today);
        let d2 = index.maturity_date(d1).unwrap();
        let tau = Actual360.year_fraction(d1, d2);
        let expected = (curve.discount_date(d1) / curve.discount_date(d2) - 1.0) / tau;
        assert_abs_diff_eq!(fixing, expected, epsilon = 1e-15);
    }

    #[test]
    fn with_forwarding_shares_conventions_not_curve() {
        let index = euribor6m();
        let trial: RelinkableHandle<dyn YieldTermStructure> = RelinkableHandle::empty();
        let clone = index.with_forwarding(trial.clone());

        trial.link_to(Arc::new(FlatForward::continuous(date(2024, 3, 14), 0.02)));
        assert!(clone.forwarding_handle().current().is_some());
        assert!(index.forwarding_handle().current().is_none());
        assert_eq!(clone.tenor(), index.tenor());
    }
}
