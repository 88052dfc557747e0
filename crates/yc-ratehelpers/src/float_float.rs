//! Tenor-basis (float-for-float) swap helper.

use std::sync::{Arc, Mutex, Weak};

use yc_core::errors::{Error, Result};
use yc_core::{Handle, Natural, Observable, Observer, Real, Spread};
use yc_indexes::IborIndex;
use yc_quotes::{Quote, SimpleQuote};
use yc_termstructures::YieldTermStructure;
use yc_time::{
    BusinessDayConvention, Calendar, DayCounter, EvaluationDate, Period, Schedule,
    ScheduleBuilder,
};

use crate::helper::{HelperCore, HelperDates, HelperKind, RateHelper, RelativeDateCore};
use crate::legs;

/// Which leg of a basis swap carries the quoted spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasisLeg {
    /// The leg paying `index1` (the exogenous-forwarding leg).
    Leg1,
    /// The leg paying `index2` (the leg forwarding off the trial curve).
    Leg2,
}

/// A rate helper for a tenor-basis swap between two Ibor legs.
///
/// The bootstrap solves for the forwarding curve of `index2`; `index1` must
/// already carry a linked (exogenous) forwarding curve.  The quote is the
/// spread on the basis leg, and the implied quote is the spread on that leg
/// that makes the two legs' NPVs equal under the discounting curve (the
/// exogenous one when supplied, the trial curve otherwise).
pub struct FloatFloatSwapRateHelper {
    core: HelperCore,
    relative: RelativeDateCore,
    index1: Arc<IborIndex>,
    index2: Arc<IborIndex>,
    tenor: Period,
    settlement_days: Natural,
    calendar: Arc<dyn Calendar>,
    convention: BusinessDayConvention,
    end_of_month: bool,
    basis_leg: BasisLeg,
    day_counter1: Arc<dyn DayCounter>,
    day_counter2: Arc<dyn DayCounter>,
    discounting: Handle<dyn YieldTermStructure>,
    schedules: Mutex<LegSchedules>,
}

struct LegSchedules {
    leg1: Schedule,
    leg2: Schedule,
}

impl FloatFloatSwapRateHelper {
    /// Create a helper for a basis swap between `index1` and `index2`.
    ///
    /// `day_counter1`/`day_counter2` override the respective index day
    /// counters when given.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        basis_spread: Arc<dyn Quote>,
        tenor: Period,
        settlement_days: Natural,
        calendar: Arc<dyn Calendar>,
        convention: BusinessDayConvention,
        end_of_month: bool,
        index1: Arc<IborIndex>,
        index2: Arc<IborIndex>,
        basis_leg: BasisLeg,
        day_counter1: Option<Arc<dyn DayCounter>>,
        day_counter2: Option<Arc<dyn DayCounter>>,
        discounting: Handle<dyn YieldTermStructure>,
        evaluation: Arc<EvaluationDate>,
    ) -> Result<Arc<Self>> {
        let day_counter1 = day_counter1.unwrap_or_else(|| Arc::clone(index1.day_counter()));
        let day_counter2 = day_counter2.unwrap_or_else(|| Arc::clone(index2.day_counter()));
        let helper = Arc::new(Self {
            core: HelperCore::new(
                format!("{tenor} {}/{} basis swap", index1.name(), index2.name()),
                basis_spread,
            ),
            relative: RelativeDateCore::new(evaluation),
            index1,
            index2,
            tenor,
            settlement_days,
            calendar,
            convention,
            end_of_month,
            basis_leg,
            day_counter1,
            day_counter2,
            discounting,
            schedules: Mutex::new(LegSchedules {
                leg1: Schedule::from_dates(Vec::new()),
                leg2: Schedule::from_dates(Vec::new()),
            }),
        });
        helper.initialize_dates()?;
        helper.register();
        Ok(helper)
    }

    /// Convenience constructor wrapping a plain spread in a [`SimpleQuote`],
    /// with endogenous discounting and the index day counters.
    #[allow(clippy::too_many_arguments)]
    pub fn from_spread(
        basis_spread: Spread,
        tenor: Period,
        settlement_days: Natural,
        calendar: Arc<dyn Calendar>,
        convention: BusinessDayConvention,
        end_of_month: bool,
        index1: Arc<IborIndex>,
        index2: Arc<IborIndex>,
        basis_leg: BasisLeg,
        evaluation: Arc<EvaluationDate>,
    ) -> Result<Arc<Self>> {
        Self::new(
            Arc::new(SimpleQuote::new(basis_spread)),
            tenor,
            settlement_days,
            calendar,
            convention,
            end_of_month,
            index1,
            index2,
            basis_leg,
            None,
            None,
            Handle::empty(),
            evaluation,
        )
    }

    /// The leg carrying the quoted spread.
    pub fn basis_leg(&self) -> BasisLeg {
        self.basis_leg
    }

    fn initialize_dates(&self) -> Result<()> {
        let reference = self
            .calendar
            .adjust(self.relative.today(), BusinessDayConvention::Following);
        let start = self
            .calendar
            .advance_days(reference, self.settlement_days as i32);
        let termination = start.advance_period(self.tenor)?;

        let leg1 = ScheduleBuilder::new(start, termination, self.index1.tenor(), &*self.calendar)
            .with_convention(self.convention)
            .with_termination_convention(self.convention)
            .end_of_month(self.end_of_month)
            .build()?;
        let leg2 = ScheduleBuilder::new(start, termination, self.index2.tenor(), &*self.calendar)
            .with_convention(self.convention)
            .with_termination_convention(self.convention)
            .end_of_month(self.end_of_month)
            .build()?;

        let earliest = start;
        let maturity = leg1.end_date().max(leg2.end_date());
        self.core.set_dates(HelperDates {
            earliest,
            pillar: maturity,
            maturity,
            latest_relevant: maturity,
        });
        *self
            .schedules
            .lock()
            .expect("basis schedule mutex poisoned") = LegSchedules { leg1, leg2 };
        Ok(())
    }

    fn register(self: &Arc<Self>) {
        let weak = Arc::downgrade(self) as Weak<dyn Observer>;
        self.core.quote().register_observer(weak.clone());
        self.relative
            .evaluation_date()
            .register_observer(weak.clone());
        self.index1
            .forwarding_handle()
            .register_observer(weak.clone());
        self.core.term_structure_handle().register_observer(weak);
    }
}

impl RateHelper for FloatFloatSwapRateHelper {
    fn core(&self) -> &HelperCore {
        &self.core
    }

    fn kind(&self) -> HelperKind {
        HelperKind::FloatFloatSwap
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
        let forwarding1 = self.index1.forwarding_handle().current().ok_or_else(|| {
            Error::NotReady(format!(
                "{}: no forwarding curve linked to {}",
                self.core.label(),
                self.index1.name()
            ))
        })?;
        let forwarding2 = self
            .index2
            .forwarding_handle()
            .current()
            .unwrap_or_else(|| Arc::clone(&trial));

        let schedules = self
            .schedules
            .lock()
            .expect("basis schedule mutex poisoned");
        let npv1 = legs::floating_npv(
            &schedules.leg1,
            &*self.day_counter1,
            &*forwarding1,
            &*discounting,
        );
        let npv2 = legs::floating_npv(
            &schedules.leg2,
            &*self.day_counter2,
            &*forwarding2,
            &*discounting,
        );
        let (numerator, annuity) = match self.basis_leg {
            BasisLeg::Leg1 => (
                npv2 - npv1,
                legs::annuity(&schedules.leg1, &*self.day_counter1, &*discounting),
            ),
            BasisLeg::Leg2 => (
                npv1 - npv2,
                legs::annuity(&schedules.leg2, &*self.day_counter2, &*discounting),
            ),
        };
        if annuity <= 0.0 {
            return Err(Error::DegenerateSwap(format!(
                "{}: basis-leg annuity {annuity} is not positive",
                self.core.label()
            )));
        }
        Ok(numerator / annuity)
    }
}

impl Observer for FloatFloatSwapRateHelper {
    fn update(&self) {
        if self.relative.evaluation_date_moved() {
            if let Err(error) = self.initialize_dates() {
                self.core.store_error(error);
            }
        }
        self.core.notify();
    }
}

impl std::fmt::Debug for FloatFloatSwapRateHelper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FloatFloatSwapRateHelper")
            .field("tenor", &self.tenor)
            .field("index1", &self.index1.name())
            .field("index2", &self.index2.name())
            .field("basis_leg", &self.basis_leg)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use yc_termstructures::FlatForward;
    use yc_time::{Actual360, Date, WeekendsOnly};

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn index(name: &str, months: i32) -> Arc<IborIndex> {
        Arc::new(IborIndex::new(
            name,
            Period::months(months),
            2,
            Arc::new(WeekendsOnly),
            BusinessDayConvention::ModifiedFollowing,
            false,
            Arc::new(Actual360),
        ))
    }

    fn two_year_helper(
        today: Date,
        basis_leg: BasisLeg,
    ) -> (Arc<FloatFloatSwapRateHelper>, Arc<IborIndex>) {
        let evaluation = Arc::new(EvaluationDate::new(today));
        let index1 = index("Ibor6M", 6);
        let index2 = index("Ibor3M", 3);
        let helper = FloatFloatSwapRateHelper::from_spread(
            0.0008,
            Period::years(2),
            2,
            Arc::new(WeekendsOnly),
            BusinessDayConvention::ModifiedFollowing,
            false,
            Arc::clone(&index1),
            index2,
            basis_leg,
            evaluation,
        )
        .unwrap();
        (helper, index1)
    }

    #[test]
    fn needs_an_exogenous_curve_on_index1() {
        let today = date(2024, 3, 14);
        let (helper, _index1) = two_year_helper(today, BasisLeg::Leg1);
        helper
            .set_term_structure(Arc::new(FlatForward::continuous(today, 0.02)))
            .unwrap();
        assert!(matches!(helper.implied_quote(), Err(Error::NotReady(_))));
    }

    #[test]
    fn identical_curves_imply_a_vanishing_spread() {
        let today = date(2024, 3, 14);
        let (helper, index1) = two_year_helper(today, BasisLeg::Leg1);
        let curve: Arc<dyn YieldTermStructure> = Arc::new(FlatForward::continuous(today, 0.02));
        index1.forwarding_handle().link_to(Arc::clone(&curve));
        helper.set_term_structure(curve).unwrap();

        // Both legs telescope to P(start) - P(end) over the same [start, end],
        // so the equalizing spread is zero.
        assert_abs_diff_eq!(helper.implied_quote().unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn basis_leg_choice_flips_the_sign() {
        let today = date(2024, 3, 14);
        let (on_leg1, index1_a) = two_year_helper(today, BasisLeg::Leg1);
        let (on_leg2, index1_b) = two_year_helper(today, BasisLeg::Leg2);

        let exogenous: Arc<dyn YieldTermStructure> =
            Arc::new(FlatForward::continuous(today, 0.025));
        let trial: Arc<dyn YieldTermStructure> = Arc::new(FlatForward::continuous(today, 0.02));
        index1_a.forwarding_handle().link_to(Arc::clone(&exogenous));
        index1_b.forwarding_handle().link_to(exogenous);
        on_leg1.set_term_structure(Arc::clone(&trial)).unwrap();
        on_leg2.set_term_structure(trial).unwrap();

        let s1 = on_leg1.implied_quote().unwrap();
        let s2 = on_leg2.implied_quote().unwrap();
        assert!(s1 != 0.0);
        assert!(s1.signum() != s2.signum());
    }
}
