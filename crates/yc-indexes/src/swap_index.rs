//! `SwapIndex` — the conventions bundle of a quoted vanilla swap rate.

use std::sync::Arc;

use crate::ibor_index::IborIndex;
use yc_core::Natural;
use yc_time::{BusinessDayConvention, Calendar, DayCounter, Period};

/// A vanilla-swap fixing (e.g. a published par swap rate).
///
/// Bundles the fixed-leg conventions and the floating-leg index of the swap
/// underlying the fixing, so a rate helper can be built from it directly.
pub struct SwapIndex {
    name: String,
    tenor: Period,
    fixing_days: Natural,
    calendar: Arc<dyn Calendar>,
    fixed_leg_tenor: Period,
    fixed_leg_convention: BusinessDayConvention,
    fixed_leg_day_counter: Arc<dyn DayCounter>,
    ibor_index: Arc<IborIndex>,
}

impl SwapIndex {
    /// Create a new swap index.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        tenor: Period,
        fixing_days: Natural,
        calendar: Arc<dyn Calendar>,
        fixed_leg_tenor: Period,
        fixed_leg_convention: BusinessDayConvention,
        fixed_leg_day_counter: Arc<dyn DayCounter>,
        ibor_index: Arc<IborIndex>,
    ) -> Self {
        Self {
            name: name.into(),
            tenor,
            fixing_days,
            calendar,
            fixed_leg_tenor,
            fixed_leg_convention,
            fixed_leg_day_counter,
            ibor_index,
        }
    }

    /// The index name (e.g. `"EuriborSwapIsdaFixA5Y"`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The swap length.
    pub fn tenor(&self) -> Period {
        self.tenor
    }

    /// Business days between fixing and effective date.
    pub fn fixing_days(&self) -> Natural {
        self.fixing_days
    }

    /// The swap's settlement calendar.
    pub fn fixing_calendar(&self) -> &Arc<dyn Calendar> {
        &self.calendar
    }

    /// Fixed-leg coupon period.
    pub fn fixed_leg_tenor(&self) -> Period {
        self.fixed_leg_tenor
    }

    /// Fixed-leg business-day convention.
    pub fn fixed_leg_convention(&self) -> BusinessDayConvention {
        self.fixed_leg_convention
    }

    /// Fixed-leg accrual day counter.
    pub fn fixed_leg_day_counter(&self) -> &Arc<dyn DayCounter> {
        &self.fixed_leg_day_counter
    }

    /// The floating-leg index.
    pub fn ibor_index(&self) -> &Arc<IborIndex> {
        &self.ibor_index
    }
}

impl std::fmt::Debug for SwapIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapIndex")
            .field("name", &self.name)
            .field("tenor", &self.tenor)
            .finish()
    }
}
