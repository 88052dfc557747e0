//! Par-swap rate helper.

use std::sync::{Arc, Mutex, Weak};

use yc_core::errors::{Error, Result};
use yc_core::{Handle, Natural, Observable, Observer, Real, Spread};
use yc_indexes::{IborIndex, SwapIndex};
use yc_quotes::{Quote, SimpleQuote};
use yc_termstructures::YieldTermStructure;
use yc_time::{
    BusinessDayConvention, Calendar, DayCounter, EvaluationDate, Period, Schedule,
    ScheduleBuilder,
};

use crate::helper::{HelperCore, HelperDates, HelperKind, RateHelper, RelativeDateCore};
use crate::legs;
use crate::pillar::{choose_pillar, Pillar};

/// Options shared by the [`SwapRateHelper`] constructors.
///
/// The defaults describe the plain case: no spread, spot start, endogenous
/// discounting, settlement days taken from the index, pillar at the last
/// fixed-coupon date.
pub struct SwapRateHelperOptions {
    /// Spread over the floating leg, if quoted.
    pub spread: Option<Arc<dyn Quote>>,
    /// Offset between the spot date and the swap start.
    pub forward_start: Period,
    /// Exogenous discounting curve; empty means discount on the trial curve.
    pub discounting: Handle<dyn YieldTermStructure>,
    /// Override for the index's fixing days, if given.
    pub settlement_days: Option<Natural>,
    /// Pillar policy.
    pub pillar: Pillar,
}

impl Default for SwapRateHelperOptions {
    fn default() -> Self {
        Self {
            spread: None,
            forward_start: Period::days(0),
            discounting: Handle::empty(),
            settlement_days: None,
            pillar: Pillar::LastRelevantDate,
        }
    }
}

impl std::fmt::Debug for SwapRateHelperOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapRateHelperOptions")
            .field("forward_start", &self.forward_start)
            .field("settlement_days", &self.settlement_days)
            .field("pillar", &self.pillar)
            .finish()
    }
}

/// A rate helper for a vanilla fixed-for-floating swap quoted at par.
///
/// The quote is the fixed rate of the par swap.  The implied quote is the
/// par rate the trial curve assigns to the same swap,
///
/// `implied = (floating NPV - spread NPV) / fixed annuity`
///
/// where the floating leg forwards off the index's own curve when one is
/// linked and off the trial curve otherwise, and discounting uses the
/// exogenous curve when one was supplied and the trial curve otherwise.
pub struct SwapRateHelper {
    core: HelperCore,
    relative: RelativeDateCore,
    index: Arc<IborIndex>,
    tenor: Period,
    calendar: Arc<dyn Calendar>,
    fixed_leg_tenor: Period,
    fixed_leg_convention: BusinessDayConvention,
    fixed_leg_day_counter: Arc<dyn DayCounter>,
    spread: Option<Arc<dyn Quote>>,
    forward_start: Period,
    discounting: Handle<dyn YieldTermStructure>,
    settlement_days: Option<Natural>,
    pillar: Pillar,
    schedules: Mutex<LegSchedules>,
}

struct LegSchedules {
    fixed: Schedule,
    floating: Schedule,
}

impl SwapRateHelper {
    /// Create a helper from raw swap conventions.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        quote: Arc<dyn Quote>,
        tenor: Period,
        calendar: Arc<dyn Calendar>,
        fixed_leg_tenor: Period,
        fixed_leg_convention: BusinessDayConvention,
        fixed_leg_day_counter: Arc<dyn DayCounter>,
        index: Arc<IborIndex>,
        options: SwapRateHelperOptions,
        evaluation: Arc<EvaluationDate>,
    ) -> Result<Arc<Self>> {
        let helper = Arc::new(Self {
            core: HelperCore::new(format!("{tenor} swap on {}", index.name()), quote),
            relative: RelativeDateCore::new(evaluation),
            index,
            tenor,
            calendar,
            fixed_leg_tenor,
            fixed_leg_convention,
            fixed_leg_day_counter,
            spread: options.spread,
            forward_start: options.forward_start,
            discounting: options.discounting,
            settlement_days: options.settlement_days,
            pillar: options.pillar,
            schedules: Mutex::new(LegSchedules {
                fixed: Schedule::from_dates(Vec::new()),
                floating: Schedule::from_dates(Vec::new()),
            }),
        });
        helper.initialize_dates()?;
        helper.register();
        Ok(helper)
    }

    /// Create a helper from a [`SwapIndex`]'s conventions.
    pub fn from_swap_index(
        quote: Arc<dyn Quote>,
        swap_index: &SwapIndex,
        options: SwapRateHelperOptions,
        evaluation: Arc<EvaluationDate>,
    ) -> Result<Arc<Self>> {
        Self::new(
            quote,
            swap_index.tenor(),
            Arc::clone(swap_index.fixing_calendar()),
            swap_index.fixed_leg_tenor(),
            swap_index.fixed_leg_convention(),
            Arc::clone(swap_index.fixed_leg_day_counter()),
            Arc::clone(swap_index.ibor_index()),
            options,
            evaluation,
        )
    }

    /// Convenience constructor wrapping a plain rate in a [`SimpleQuote`].
    #[allow(clippy::too_many_arguments)]
    pub fn from_rate(
        rate: Real,
        tenor: Period,
        calendar: Arc<dyn Calendar>,
        fixed_leg_tenor: Period,
        fixed_leg_convention: BusinessDayConvention,
        fixed_leg_day_counter: Arc<dyn DayCounter>,
        index: Arc<IborIndex>,
        evaluation: Arc<EvaluationDate>,
    ) -> Result<Arc<Self>> {
        Self::new(
            Arc::new(SimpleQuote::new(rate)),
            tenor,
            calendar,
            fixed_leg_tenor,
            fixed_leg_convention,
            fixed_leg_day_counter,
            index,
            SwapRateHelperOptions::default(),
            evaluation,
        )
    }

    /// The current spread over the floating leg (zero when not quoted).
    pub fn spread(&self) -> Spread {
        self.spread.as_ref().and_then(|q| q.value()).unwrap_or(0.0)
    }

    /// The offset between the spot date and the swap start.
    pub fn forward_start(&self) -> Period {
        self.forward_start
    }

    /// The swap tenor.
    pub fn tenor(&self) -> Period {
        self.tenor
    }

    fn initialize_dates(&self) -> Result<()> {
        let reference = self
            .calendar
            .adjust(self.relative.today(), BusinessDayConvention::Following);
        let settlement_days = self.settlement_days.unwrap_or(self.index.fixing_days());
        let spot = self.calendar.advance_days(reference, settlement_days as i32);
        let start = if self.forward_start.length == 0 {
            spot
        } else {
            self.calendar.advance(
                spot,
                self.forward_start,
                self.index.business_day_convention(),
                self.index.end_of_month(),
            )?
        };
        let termination = start.advance_period(self.tenor)?;

        let fixed = ScheduleBuilder::new(start, termination, self.fixed_leg_tenor, &*self.calendar)
            .with_convention(self.fixed_leg_convention)
            .with_termination_convention(self.fixed_leg_convention)
            .build()?;
        let floating = ScheduleBuilder::new(start, termination, self.index.tenor(), &*self.calendar)
            .with_convention(self.index.business_day_convention())
            .with_termination_convention(self.index.business_day_convention())
            .build()?;

        let earliest = start;
        // The legs may end on different days when their conventions adjust
        // the termination in opposite directions; the maturity must cover
        // both ends or the pillar could land past it.
        let latest_relevant = fixed.end_date().max(floating.end_date());
        let maturity = latest_relevant;
        let pillar = choose_pillar(self.pillar, earliest, latest_relevant, maturity)?;
        self.core.set_dates(HelperDates {
            earliest,
            pillar,
            maturity,
            latest_relevant,
        });
        *self.schedules.lock().expect("swap schedule mutex poisoned") =
            LegSchedules { fixed, floating };
        Ok(())
    }

    fn register(self: &Arc<Self>) {
        let weak = Arc::downgrade(self) as Weak<dyn Observer>;
        self.core.quote().register_observer(weak.clone());
        if let Some(spread) = &self.spread {
            spread.register_observer(weak.clone());
        }
        self.relative
            .evaluation_date()
            .register_observer(weak.clone());
        self.core.term_structure_handle().register_observer(weak);
    }
}

impl RateHelper for SwapRateHelper {
    fn core(&self) -> &HelperCore {
        &self.core
    }

    fn kind(&self) -> HelperKind {
        HelperKind::Swap
    }

    fn set_term_structure(&self, curve: Arc<dyn YieldTermStructure>) -> Result<()> {
        if let Some(discounting) = self.discounting.as_arc() {
            if Arc::ptr_eq(&discounting, &curve) {
                return Err(Error::InconsistentCurves(format!(
                    "{}: exogenous discounting curve is the curve being bootstrapped",
                    self.core.label()
                )));
            }
        }
        self.core.set_term_structure(curve);
        Ok(())
    }

    fn implied_quote(&self) -> Result<Real> {
        self.core.take_pending()?;
        let trial = self.core.curve()?;
        let discounting = self.discounting.as_arc().unwrap_or_else(|| Arc::clone(&trial));
        let forwarding = self
            .index
            .forwarding_handle()
            .current()
            .unwrap_or_else(|| Arc::clone(&trial));

        let schedules = self.schedules.lock().expect("swap schedule mutex poisoned");
        let fixed_annuity = legs::annuity(
            &schedules.fixed,
            &*self.fixed_leg_day_counter,
            &*discounting,
        );
        if fixed_annuity <= 0.0 {
            return Err(Error::DegenerateSwap(format!(
                "{}: fixed annuity {fixed_annuity} is not positive",
                self.core.label()
            )));
        }
        let floating_npv = legs::floating_npv(
            &schedules.floating,
            &**self.index.day_counter(),
            &*forwarding,
            &*discounting,
        );
        let spread_npv = self.spread()
            * legs::annuity(
                &schedules.floating,
                &**self.index.day_counter(),
                &*discounting,
            );
        Ok((floating_npv - spread_npv) / fixed_annuity)
    }
}

impl Observer for SwapRateHelper {
    fn update(&self) {
        if self.relative.evaluation_date_moved() {
            if let Err(error) = self.initialize_dates() {
                self.core.store_error(error);
            }
        }
        self.core.notify();
    }
}

impl std::fmt::Debug for SwapRateHelper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapRateHelper")
            .field("tenor", &self.tenor)
            .field("index", &self.index.name())
            .field("forward_start", &self.forward_start)
            .field("dates", &self.core.dates())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use yc_termstructures::FlatForward;
    use yc_time::{Actual360, Date, Thirty360, WeekendsOnly};

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn index_3m() -> Arc<IborIndex> {
        Arc::new(IborIndex::new(
            "Ibor3M",
            Period::months(3),
            2,
            Arc::new(WeekendsOnly),
            BusinessDayConvention::ModifiedFollowing,
            false,
            Arc::new(Actual360),
        ))
    }

    fn five_year_helper(today: Date) -> (Arc<SwapRateHelper>, Arc<EvaluationDate>) {
        let evaluation = Arc::new(EvaluationDate::new(today));
        let helper = SwapRateHelper::from_rate(
            0.02,
            Period::years(5),
            Arc::new(WeekendsOnly),
            Period::months(6),
            BusinessDayConvention::ModifiedFollowing,
            Arc::new(Thirty360),
            index_3m(),
            Arc::clone(&evaluation),
        )
        .unwrap();
        (helper, evaluation)
    }

    #[test]
    fn date_ordering_holds() {
        let (helper, _eval) = five_year_helper(date(2024, 3, 14));
        assert!(helper.earliest_date() <= helper.pillar_date());
        assert!(helper.pillar_date() <= helper.maturity_date());
        assert!(helper.earliest_date() <= helper.latest_relevant_date());
    }

    #[test]
    fn pillar_stays_within_maturity_when_leg_conventions_diverge() {
        // Termination 2029-03-18 falls on a Sunday: the fixed leg rolls back
        // to Friday under Preceding while the floating leg rolls forward to
        // Monday, so the maturity must follow the later end.
        let evaluation = Arc::new(EvaluationDate::new(date(2024, 3, 14)));
        let helper = SwapRateHelper::from_rate(
            0.02,
            Period::years(5),
            Arc::new(WeekendsOnly),
            Period::months(6),
            BusinessDayConvention::Preceding,
            Arc::new(Thirty360),
            index_3m(),
            evaluation,
        )
        .unwrap();

        let schedules = helper.schedules.lock().unwrap();
        assert!(schedules.fixed.end_date() < schedules.floating.end_date());
        drop(schedules);
        assert!(helper.pillar_date() <= helper.maturity_date());
        assert_eq!(helper.maturity_date(), date(2029, 3, 19));
        assert_eq!(helper.latest_relevant_date(), helper.maturity_date());
    }

    #[test]
    fn par_rate_on_single_curve_matches_textbook_identity() {
        let today = date(2024, 3, 14);
        let (helper, _eval) = five_year_helper(today);
        let curve = Arc::new(FlatForward::continuous(today, 0.02));
        helper.set_term_structure(curve.clone()).unwrap();

        // With one curve for forwarding and discounting the floating leg
        // telescopes, so the par rate is (P(start) - P(end)) / annuity.
        let schedules = helper.schedules.lock().unwrap();
        let p_start = curve.discount_date(schedules.fixed.start_date());
        let p_end = curve.discount_date(schedules.floating.end_date());
        let annuity = legs::annuity(&schedules.fixed, &Thirty360, &*curve);
        drop(schedules);

        let expected = (p_start - p_end) / annuity;
        assert_abs_diff_eq!(helper.implied_quote().unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn rejects_discounting_on_the_trial_curve() {
        let today = date(2024, 3, 14);
        let evaluation = Arc::new(EvaluationDate::new(today));
        let exogenous: Arc<dyn YieldTermStructure> =
            Arc::new(FlatForward::continuous(today, 0.015));
        let helper = SwapRateHelper::new(
            Arc::new(SimpleQuote::new(0.02)),
            Period::years(5),
            Arc::new(WeekendsOnly),
            Period::months(6),
            BusinessDayConvention::ModifiedFollowing,
            Arc::new(Thirty360),
            index_3m(),
            SwapRateHelperOptions {
                discounting: Handle::from_arc(Arc::clone(&exogenous)),
                ..Default::default()
            },
            evaluation,
        )
        .unwrap();

        assert!(matches!(
            helper.set_term_structure(Arc::clone(&exogenous)),
            Err(Error::InconsistentCurves(_))
        ));
        helper
            .set_term_structure(Arc::new(FlatForward::continuous(today, 0.02)))
            .unwrap();
        assert!(helper.implied_quote().is_ok());
    }

    #[test]
    fn spread_lowers_the_implied_fixed_rate() {
        let today = date(2024, 3, 14);
        let evaluation = Arc::new(EvaluationDate::new(today));
        let plain = SwapRateHelper::from_rate(
            0.02,
            Period::years(5),
            Arc::new(WeekendsOnly),
            Period::months(6),
            BusinessDayConvention::ModifiedFollowing,
            Arc::new(Thirty360),
            index_3m(),
            Arc::clone(&evaluation),
        )
        .unwrap();
        let spread = SwapRateHelper::new(
            Arc::new(SimpleQuote::new(0.02)),
            Period::years(5),
            Arc::new(WeekendsOnly),
            Period::months(6),
            BusinessDayConvention::ModifiedFollowing,
            Arc::new(Thirty360),
            index_3m(),
            SwapRateHelperOptions {
                spread: Some(Arc::new(SimpleQuote::new(0.001))),
                ..Default::default()
            },
            evaluation,
        )
        .unwrap();

        let curve = Arc::new(FlatForward::continuous(today, 0.02));
        plain.set_term_structure(curve.clone()).unwrap();
        spread.set_term_structure(curve).unwrap();
        assert!(spread.implied_quote().unwrap() < plain.implied_quote().unwrap());
        assert_abs_diff_eq!(spread.spread(), 0.001, epsilon = 0.0);
    }
}
