//! `BmaIndex` — a municipal-market averaged rate index.

use std::sync::Arc;

use yc_core::errors::{Error, Result};
use yc_core::{ensure, Rate, RelinkableHandle};
use yc_termstructures::YieldTermStructure;
use yc_time::{BusinessDayConvention, Calendar, Date, DayCounter, Period};

/// A calendar-governed averaging index (BMA-style).
///
/// The index pays the average of weekly resets over each accrual period.
/// For curve building the average is forecast as the simple forward rate
/// over the period, read off the index's forwarding curve.
pub struct BmaIndex {
    name: String,
    tenor: Period,
    calendar: Arc<dyn Calendar>,
    convention: BusinessDayConvention,
    day_counter: Arc<dyn DayCounter>,
    forwarding: RelinkableHandle<dyn YieldTermStructure>,
}

impl BmaIndex {
    /// Create a new index with an empty forwarding handle.
    pub fn new(
        name: impl Into<String>,
        tenor: Period,
        calendar: Arc<dyn Calendar>,
        convention: BusinessDayConvention,
        day_counter: Arc<dyn DayCounter>,
    ) -> Self {
        Self {
            name: name.into(),
            tenor,
            calendar,
            convention,
            day_counter,
            forwarding: RelinkableHandle::empty(),
        }
    }

    /// Clone this index with its forwarding handle replaced.
    pub fn with_forwarding(&self, forwarding: RelinkableHandle<dyn YieldTermStructure>) -> Self {
        Self {
            name: self.name.clone(),
            tenor: self.tenor,
            calendar: Arc::clone(&self.calendar),
            convention: self.convention,
            day_counter: Arc::clone(&self.day_counter),
            forwarding,
        }
    }

    /// The index name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The averaging/payment tenor.
    pub fn tenor(&self) -> Period {
        self.tenor
    }

    /// The index calendar.
    pub fn fixing_calendar(&self) -> &Arc<dyn Calendar> {
        &self.calendar
    }

    /// The business-day convention.
    pub fn business_day_convention(&self) -> BusinessDayConvention {
        self.convention
    }

    /// The accrual day counter.
    pub fn day_counter(&self) -> &Arc<dyn DayCounter> {
        &self.day_counter
    }

    /// The forwarding-curve handle.
    pub fn forwarding_handle(&self) -> &RelinkableHandle<dyn YieldTermStructure> {
        &self.forwarding
    }

    /// Forecast the averaged rate over `[start, end]` off the forwarding
    /// curve.
    pub fn forecast_average(&self, start: Date, end: Date) -> Result<Rate> {
        let curve = self.forwarding.current().ok_or_else(|| {
            Error::NotReady(format!("{}: no forwarding curve linked", self.name))
        })?;
        let tau = self.day_counter.year_fraction(start, end);
        ensure!(
            tau > 0.0,
            "{}: non-positive accrual ({start} to {end})",
            self.name
        );
        let p1 = curve.discount_date(start);
        let p2 = curve.discount_date(end);
        Ok((p1 / p2 - 1.0) / tau)
    }
}

impl std::fmt::Debug for BmaIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BmaIndex")
            .field("name", &self.name)
            .field("tenor", &self.tenor)
            .finish()
    }
}
