//! Interest-rate futures helper.

use std::sync::{Arc, Weak};

use yc_core::errors::{Error, Result};
use yc_core::{Natural, Observable, Observer, Real, Time};
use yc_indexes::IborIndex;
use yc_quotes::{Quote, SimpleQuote};
use yc_time::{asx, imm, BusinessDayConvention, Calendar, Date, DayCounter, Period};

use crate::helper::{HelperCore, HelperDates, HelperKind, RateHelper};

/// The quarterly futures cycle a contract trades on.
///
/// The cycle only constrains the start date the caller may construct the
/// helper with; pricing is identical for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuturesKind {
    /// IMM contracts: third Wednesday of March, June, September, December.
    Imm,
    /// ASX contracts: second Friday of March, June, September, December.
    Asx,
}

impl FuturesKind {
    fn validate_start(self, start: Date) -> Result<()> {
        let valid = match self {
            FuturesKind::Imm => imm::is_imm_date(start),
            FuturesKind::Asx => asx::is_asx_date(start),
        };
        if valid {
            Ok(())
        } else {
            Err(Error::InvalidArgument(format!(
                "{start} is not a valid {self:?} futures start date"
            )))
        }
    }
}

/// A rate helper for an interest-rate futures contract.
///
/// The quote is the futures *price* (e.g. `98.50`); the implied quote is the
/// price the trial curve assigns to the contract, obtained by reading the
/// simple forward over the underlying deposit period and de-adjusting by the
/// (possibly zero) convexity correction:
///
/// `implied = 100 * (1 - (forward - convexity))`
///
/// Dates are frozen at construction; the contract's start date does not move
/// with the evaluation date.
pub struct FuturesRateHelper {
    core: HelperCore,
    futures_kind: FuturesKind,
    start: Date,
    end: Date,
    year_fraction: Time,
    convexity: Option<Arc<dyn Quote>>,
}

impl FuturesRateHelper {
    /// Create a helper from explicit start and end dates.
    pub fn new(
        price: Arc<dyn Quote>,
        kind: FuturesKind,
        start: Date,
        end: Date,
        day_counter: &dyn DayCounter,
        convexity: Option<Arc<dyn Quote>>,
    ) -> Result<Arc<Self>> {
        kind.validate_start(start)?;
        if end <= start {
            return Err(Error::InvalidArgument(format!(
                "futures end date {end} not after start date {start}"
            )));
        }
        let helper = Arc::new(Self {
            core: HelperCore::new(format!("{kind:?} futures starting {start}"), price),
            futures_kind: kind,
            start,
            end,
            year_fraction: day_counter.year_fraction(start, end),
            convexity,
        });
        helper.freeze_dates();
        helper.register();
        Ok(helper)
    }

    /// Create a helper whose end date is `months` past the start, adjusted
    /// on `calendar`.
    #[allow(clippy::too_many_arguments)]
    pub fn from_months(
        price: Arc<dyn Quote>,
        kind: FuturesKind,
        start: Date,
        months: Natural,
        calendar: &dyn Calendar,
        convention: BusinessDayConvention,
        end_of_month: bool,
        day_counter: &dyn DayCounter,
        convexity: Option<Arc<dyn Quote>>,
    ) -> Result<Arc<Self>> {
        let end = calendar.advance(start, Period::months(months as i32), convention, end_of_month)?;
        Self::new(price, kind, start, end, day_counter, convexity)
    }

    /// Create a helper whose deposit period follows `index`'s conventions.
    pub fn from_index(
        price: Arc<dyn Quote>,
        kind: FuturesKind,
        start: Date,
        index: &IborIndex,
        convexity: Option<Arc<dyn Quote>>,
    ) -> Result<Arc<Self>> {
        let end = index.maturity_date(start)?;
        Self::new(price, kind, start, end, index.day_counter().as_ref(), convexity)
    }

    /// Convenience constructor wrapping a plain price in a [`SimpleQuote`].
    pub fn from_price(
        price: Real,
        kind: FuturesKind,
        start: Date,
        end: Date,
        day_counter: &dyn DayCounter,
        convexity: Real,
    ) -> Result<Arc<Self>> {
        let convexity_quote: Option<Arc<dyn Quote>> = if convexity == 0.0 {
            None
        } else {
            Some(Arc::new(SimpleQuote::new(convexity)))
        };
        Self::new(
            Arc::new(SimpleQuote::new(price)),
            kind,
            start,
            end,
            day_counter,
            convexity_quote,
        )
    }

    fn freeze_dates(&self) {
        self.core.set_dates(HelperDates {
            earliest: self.start,
            pillar: self.start,
            maturity: self.end,
            latest_relevant: self.end,
        });
    }

    fn register(self: &Arc<Self>) {
        let weak = Arc::downgrade(self) as Weak<dyn Observer>;
        self.core.quote().register_observer(weak.clone());
        if let Some(convexity) = &self.convexity {
            convexity.register_observer(weak.clone());
        }
        self.core.term_structure_handle().register_observer(weak);
    }

    /// The futures cycle this contract trades on.
    pub fn futures_kind(&self) -> FuturesKind {
        self.futures_kind
    }

    /// The current convexity adjustment (zero when no quote was supplied).
    pub fn convexity_adjustment(&self) -> Real {
        self.convexity
            .as_ref()
            .and_then(|q| q.value())
            .unwrap_or(0.0)
    }
}

impl RateHelper for FuturesRateHelper {
    fn core(&self) -> &HelperCore {
        &self.core
    }

    fn kind(&self) -> HelperKind {
        HelperKind::Futures
    }

    fn implied_quote(&self) -> Result<Real> {
        let curve = self.core.curve()?;
        let forward = (curve.discount_date(self.start) / curve.discount_date(self.end) - 1.0)
            / self.year_fraction;
        Ok(100.0 * (1.0 - (forward - self.convexity_adjustment())))
    }
}

impl Observer for FuturesRateHelper {
    fn update(&self) {
        self.core.notify();
    }
}

impl std::fmt::Debug for FuturesRateHelper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuturesRateHelper")
            .field("kind", &self.futures_kind)
            .field("start", &self.start)
            .field("end", &self.end)
            .finish()
    }
}
