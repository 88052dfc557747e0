//! Money-market deposit helper.

use std::sync::{Arc, Weak};

use yc_core::errors::Result;
use yc_core::{Natural, Observable, Observer, Real};
use yc_indexes::IborIndex;
use yc_quotes::{Quote, SimpleQuote};
use yc_time::{
    BusinessDayConvention, Calendar, Date, DayCounter, EvaluationDate, Period,
};

use crate::helper::{HelperCore, HelperDates, HelperKind, RateHelper, RelativeDateCore};

/// A rate helper for a money-market deposit.
///
/// The quote is the simple deposit rate; the helper's dates follow the
/// index conventions from the current evaluation date and are re-derived
/// whenever that date moves.
pub struct DepositRateHelper {
    core: HelperCore,
    relative: RelativeDateCore,
    index: Arc<IborIndex>,
}

impl DepositRateHelper {
    /// Create a helper for a deposit following `index`'s conventions.
    pub fn new(
        quote: Arc<dyn Quote>,
        index: Arc<IborIndex>,
        evaluation: Arc<EvaluationDate>,
    ) -> Result<Arc<Self>> {
        let helper = Arc::new(Self {
            core: HelperCore::new(format!("{} deposit", index.tenor()), quote),
            relative: RelativeDateCore::new(evaluation),
            index,
        });
        helper.initialize_dates()?;
        helper.register();
        Ok(helper)
    }

    /// Create a helper from raw deposit conventions.
    #[allow(clippy::too_many_arguments)]
    pub fn from_conventions(
        quote: Arc<dyn Quote>,
        tenor: Period,
        fixing_days: Natural,
        calendar: Arc<dyn Calendar>,
        convention: BusinessDayConvention,
        end_of_month: bool,
        day_counter: Arc<dyn DayCounter>,
        evaluation: Arc<EvaluationDate>,
    ) -> Result<Arc<Self>> {
        let index = Arc::new(IborIndex::new(
            format!("deposit {tenor}"),
            tenor,
            fixing_days,
            calendar,
            convention,
            end_of_month,
            day_counter,
        ));
        Self::new(quote, index, evaluation)
    }

    /// Convenience constructor wrapping a plain rate in a [`SimpleQuote`].
    pub fn from_rate(
        rate: Real,
        index: Arc<IborIndex>,
        evaluation: Arc<EvaluationDate>,
    ) -> Result<Arc<Self>> {
        Self::new(Arc::new(SimpleQuote::new(rate)), index, evaluation)
    }

    /// The index the deposit conventions come from.
    pub fn index(&self) -> &Arc<IborIndex> {
        &self.index
    }

    /// The fixing date the current date set is derived from.
    pub fn fixing_date(&self) -> Date {
        self.index.fixing_date(self.core.dates().earliest)
    }

    fn initialize_dates(&self) -> Result<()> {
        let calendar = self.index.fixing_calendar();
        let reference = calendar.adjust(self.relative.today(), BusinessDayConvention::Following);
        let earliest = self.index.value_date(reference);
        let maturity = self.index.maturity_date(earliest)?;
        self.core.set_dates(HelperDates {
            earliest,
            pillar: maturity,
            maturity,
            latest_relevant: maturity,
        });
        Ok(())
    }

    fn register(self: &Arc<Self>) {
        let weak = Arc::downgrade(self) as Weak<dyn Observer>;
        self.core.quote().register_observer(weak.clone());
        self.relative
            .evaluation_date()
            .register_observer(weak.clone());
        self.core.term_structure_handle().register_observer(weak);
    }
}

impl RateHelper for DepositRateHelper {
    fn core(&self) -> &HelperCore {
        &self.core
    }

    fn kind(&self) -> HelperKind {
        HelperKind::Deposit
    }

    fn implied_quote(&self) -> Result<Real> {
        self.core.take_pending()?;
        let curve = self.core.curve()?;
        let dates = self.core.dates();
        let tau = self
            .index
            .day_counter()
            .year_fraction(dates.earliest, dates.maturity);
        Ok((curve.discount_date(dates.earliest) / curve.discount_date(dates.maturity) - 1.0) / tau)
    }
}

impl Observer for DepositRateHelper {
    fn update(&self) {
        if self.relative.evaluation_date_moved() {
            if let Err(error) = self.initialize_dates() {
                self.core.store_error(error);
            }
        }
        self.core.notify();
    }
}

impl std::fmt::Debug for DepositRateHelper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DepositRateHelper")
            .field("index", &self.index.name())
            .field("dates", &self.core.dates())
            .finish()
    }
}
