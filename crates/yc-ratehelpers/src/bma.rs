//! BMA-versus-Ibor swap helper.

use std::sync::{Arc, Mutex, Weak};

use yc_core::errors::{Error, Result};
use yc_core::{Natural, Observable, Observer, Real};
use yc_indexes::{BmaIndex, IborIndex};
use yc_quotes::{Quote, SimpleQuote};
use yc_time::{
    BusinessDayConvention, Calendar, DayCounter, EvaluationDate, Period, Schedule,
    ScheduleBuilder,
};

use crate::helper::{HelperCore, HelperDates, HelperKind, RateHelper, RelativeDateCore};
use crate::legs;

/// A rate helper for a BMA-versus-Ibor fraction swap.
///
/// The quote is the multiplicative fraction `alpha` such that paying
/// `alpha * Ibor` matches receiving the BMA leg.  The bootstrap solves for
/// the BMA forwarding curve: the BMA leg forwards off the trial curve while
/// the Ibor leg forwards off the index's own (exogenous) curve; both legs
/// are discounted on the trial curve.
pub struct BmaSwapRateHelper {
    core: HelperCore,
    relative: RelativeDateCore,
    tenor: Period,
    settlement_days: Natural,
    calendar: Arc<dyn Calendar>,
    bma_period: Period,
    bma_convention: BusinessDayConvention,
    bma_day_counter: Arc<dyn DayCounter>,
    bma_index: Arc<BmaIndex>,
    ibor_index: Arc<IborIndex>,
    schedules: Mutex<LegSchedules>,
}

struct LegSchedules {
    bma: Schedule,
    ibor: Schedule,
}

impl BmaSwapRateHelper {
    /// Create a helper for a BMA swap of the given tenor.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        fraction: Arc<dyn Quote>,
        tenor: Period,
        settlement_days: Natural,
        calendar: Arc<dyn Calendar>,
        bma_period: Period,
        bma_convention: BusinessDayConvention,
        bma_day_counter: Arc<dyn DayCounter>,
        bma_index: Arc<BmaIndex>,
        ibor_index: Arc<IborIndex>,
        evaluation: Arc<EvaluationDate>,
    ) -> Result<Arc<Self>> {
        let helper = Arc::new(Self {
            core: HelperCore::new(format!("{tenor} BMA swap"), fraction),
            relative: RelativeDateCore::new(evaluation),
            tenor,
            settlement_days,
            calendar,
            bma_period,
            bma_convention,
            bma_day_counter,
            bma_index,
            ibor_index,
            schedules: Mutex::new(LegSchedules {
                bma: Schedule::from_dates(Vec::new()),
                ibor: Schedule::from_dates(Vec::new()),
            }),
        });
        helper.initialize_dates()?;
        helper.register();
        Ok(helper)
    }

    /// Convenience constructor wrapping a plain fraction in a
    /// [`SimpleQuote`].
    #[allow(clippy::too_many_arguments)]
    pub fn from_fraction(
        fraction: Real,
        tenor: Period,
        settlement_days: Natural,
        calendar: Arc<dyn Calendar>,
        bma_period: Period,
        bma_convention: BusinessDayConvention,
        bma_day_counter: Arc<dyn DayCounter>,
        bma_index: Arc<BmaIndex>,
        ibor_index: Arc<IborIndex>,
        evaluation: Arc<EvaluationDate>,
    ) -> Result<Arc<Self>> {
        Self::new(
            Arc::new(SimpleQuote::new(fraction)),
            tenor,
            settlement_days,
            calendar,
            bma_period,
            bma_convention,
            bma_day_counter,
            bma_index,
            ibor_index,
            evaluation,
        )
    }

    fn initialize_dates(&self) -> Result<()> {
        let reference = self
            .calendar
            .adjust(self.relative.today(), BusinessDayConvention::Following);
        let start = self
            .calendar
            .advance_days(reference, self.settlement_days as i32);
        let termination = start.advance_period(self.tenor)?;

        let bma = ScheduleBuilder::new(start, termination, self.bma_period, &*self.calendar)
            .with_convention(self.bma_convention)
            .with_termination_convention(self.bma_convention)
            .build()?;
        let ibor =
            ScheduleBuilder::new(start, termination, self.ibor_index.tenor(), &*self.calendar)
                .with_convention(self.ibor_index.business_day_convention())
                .with_termination_convention(self.ibor_index.business_day_convention())
                .build()?;

        let maturity = bma.end_date().max(ibor.end_date());
        self.core.set_dates(HelperDates {
            earliest: start,
            pillar: maturity,
            maturity,
            latest_relevant: maturity,
        });
        *self.schedules.lock().expect("BMA schedule mutex poisoned") =
            LegSchedules { bma, ibor };
        Ok(())
    }

    fn register(self: &Arc<Self>) {
        let weak = Arc::downgrade(self) as Weak<dyn Observer>;
        self.core.quote().register_observer(weak.clone());
        self.relative
            .evaluation_date()
            .register_observer(weak.clone());
        self.ibor_index
            .forwarding_handle()
            .register_observer(weak.clone());
        self.core.term_structure_handle().register_observer(weak);
    }
}

impl RateHelper for BmaSwapRateHelper {
    fn core(&self) -> &HelperCore {
        &self.core
    }

    fn kind(&self) -> HelperKind {
        HelperKind::BmaSwap
    }

    fn implied_quote(&self) -> Result<Real> {
        self.core.take_pending()?;
        let trial = self.core.curve()?;
        let ibor_forwarding = self.ibor_index.forwarding_handle().current().ok_or_else(|| {
            Error::NotReady(format!(
                "{}: no forwarding curve linked to {}",
                self.core.label(),
                self.ibor_index.name()
            ))
        })?;
        let bma_forwarding = self
            .bma_index
            .forwarding_handle()
            .current()
            .unwrap_or_else(|| Arc::clone(&trial));

        let schedules = self.schedules.lock().expect("BMA schedule mutex poisoned");
        let bma_npv = legs::floating_npv(
            &schedules.bma,
            &*self.bma_day_counter,
            &*bma_forwarding,
            &*trial,
        );
        let ibor_npv = legs::floating_npv(
            &schedules.ibor,
            &**self.ibor_index.day_counter(),
            &*ibor_forwarding,
            &*trial,
        );
        if ibor_npv <= 0.0 {
            return Err(Error::DegenerateSwap(format!(
                "{}: Ibor-leg NPV {ibor_npv} is not positive",
                self.core.label()
            )));
        }
        Ok(bma_npv / ibor_npv)
    }
}

impl Observer for BmaSwapRateHelper {
    fn update(&self) {
        if self.relative.evaluation_date_moved() {
            if let Err(error) = self.initialize_dates() {
                self.core.store_error(error);
            }
        }
        self.core.notify();
    }
}

impl std::fmt::Debug for BmaSwapRateHelper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BmaSwapRateHelper")
            .field("tenor", &self.tenor)
            .field("bma_index", &self.bma_index.name())
            .field("ibor_index", &self.ibor_index.name())
            .finish()
    }
}
