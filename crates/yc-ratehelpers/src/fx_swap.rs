//! FX swap forward-point helper.

use std::sync::{Arc, Weak};

use yc_core::errors::{Error, Result};
use yc_core::{Handle, Natural, Observable, Observer, Real};
use yc_quotes::{Quote, SimpleQuote};
use yc_termstructures::YieldTermStructure;
use yc_time::{
    BusinessDayConvention, Calendar, EvaluationDate, JointCalendar, JointCalendarRule, Period,
    TimeUnit, UnitedStatesSettlement,
};

use crate::helper::{HelperCore, HelperDates, HelperKind, RateHelper, RelativeDateCore};

/// A rate helper for the forward points of an FX swap.
///
/// The quote is the forward-point spread over the spot rate.  One currency's
/// curve (the collateral curve) is exogenous; the trial curve discounts the
/// other.  The implied point is
///
/// `spot * (P_q(T)/P_q(t0)) / (P_c(T)/P_c(t0)) - spot`
///
/// where the quote/collateral roles follow
/// [`is_fx_base_currency_collateral_currency`](Self::is_fx_base_currency_collateral_currency).
pub struct FxSwapRateHelper {
    core: HelperCore,
    relative: RelativeDateCore,
    spot: Arc<dyn Quote>,
    tenor: Period,
    fixing_days: Natural,
    calendar: Arc<dyn Calendar>,
    convention: BusinessDayConvention,
    end_of_month: bool,
    is_base_collateral: bool,
    collateral: Handle<dyn YieldTermStructure>,
    trading_calendar: Option<Arc<dyn Calendar>>,
    joint_calendar: Arc<dyn Calendar>,
    us_calendar: UnitedStatesSettlement,
}

impl FxSwapRateHelper {
    /// Create a helper for an FX swap.
    ///
    /// `calendar` is the two-currency settlement calendar; when a
    /// `trading_calendar` is given, maturities roll on the join of the two.
    /// Overnight and tomorrow-next tenors (one day, zero or one fixing day)
    /// are checked at construction: an evaluation date the pair trades on
    /// while the US settles nothing leaves the near leg unrepresentable.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        forward_points: Arc<dyn Quote>,
        spot: Arc<dyn Quote>,
        tenor: Period,
        fixing_days: Natural,
        calendar: Arc<dyn Calendar>,
        convention: BusinessDayConvention,
        end_of_month: bool,
        is_base_collateral: bool,
        collateral: Handle<dyn YieldTermStructure>,
        trading_calendar: Option<Arc<dyn Calendar>>,
        evaluation: Arc<EvaluationDate>,
    ) -> Result<Arc<Self>> {
        let joint_calendar: Arc<dyn Calendar> = match &trading_calendar {
            Some(trading) => Arc::new(JointCalendar::new(
                vec![Arc::clone(&calendar), Arc::clone(trading)],
                JointCalendarRule::JoinHolidays,
            )),
            None => Arc::clone(&calendar),
        };
        let helper = Arc::new(Self {
            core: HelperCore::new(format!("{tenor} FX swap"), forward_points),
            relative: RelativeDateCore::new(evaluation),
            spot,
            tenor,
            fixing_days,
            calendar,
            convention,
            end_of_month,
            is_base_collateral,
            collateral,
            trading_calendar,
            joint_calendar,
            us_calendar: UnitedStatesSettlement,
        });
        helper.initialize_dates()?;
        helper.register();
        Ok(helper)
    }

    /// Convenience constructor wrapping plain numbers in [`SimpleQuote`]s.
    #[allow(clippy::too_many_arguments)]
    pub fn from_points(
        forward_points: Real,
        spot: Real,
        tenor: Period,
        fixing_days: Natural,
        calendar: Arc<dyn Calendar>,
        is_base_collateral: bool,
        collateral: Handle<dyn YieldTermStructure>,
        evaluation: Arc<EvaluationDate>,
    ) -> Result<Arc<Self>> {
        Self::new(
            Arc::new(SimpleQuote::new(forward_points)),
            Arc::new(SimpleQuote::new(spot)),
            tenor,
            fixing_days,
            calendar,
            BusinessDayConvention::Following,
            false,
            is_base_collateral,
            collateral,
            None,
            evaluation,
        )
    }

    // ── Inspectors ───────────────────────────────────────────────────────────

    /// The current spot rate, or `None` if the spot quote is empty.
    pub fn spot(&self) -> Option<Real> {
        self.spot.value()
    }

    /// The swap tenor.
    pub fn tenor(&self) -> Period {
        self.tenor
    }

    /// Business days from today to the near leg.
    pub fn fixing_days(&self) -> Natural {
        self.fixing_days
    }

    /// The two-currency settlement calendar.
    pub fn calendar(&self) -> &Arc<dyn Calendar> {
        &self.calendar
    }

    /// The maturity adjustment convention.
    pub fn business_day_convention(&self) -> BusinessDayConvention {
        self.convention
    }

    /// Whether maturities snap to month ends.
    pub fn end_of_month(&self) -> bool {
        self.end_of_month
    }

    /// Whether the FX base currency is the collateral currency.
    pub fn is_fx_base_currency_collateral_currency(&self) -> bool {
        self.is_base_collateral
    }

    /// The trading calendar, if one was given.
    pub fn trading_calendar(&self) -> Option<&Arc<dyn Calendar>> {
        self.trading_calendar.as_ref()
    }

    /// The calendar maturities actually roll on (the join of settlement and
    /// trading calendars when both are present).
    pub fn adjustment_calendar(&self) -> &Arc<dyn Calendar> {
        &self.joint_calendar
    }

    fn is_short_tenor(&self) -> bool {
        self.tenor.unit == TimeUnit::Days && self.tenor.length == 1
    }

    fn initialize_dates(&self) -> Result<()> {
        let today = self.relative.today();
        // Only the overnight case is unrepresentable; tomorrow-next settles
        // its near leg a business day later and is unaffected by a US
        // holiday today.
        if self.fixing_days == 0
            && self.is_short_tenor()
            && self.calendar.is_business_day(today)
            && self.us_calendar.is_holiday(today)
            && !self.us_calendar.is_weekend(today)
        {
            return Err(Error::UnrepresentableFxTenor(format!(
                "{}: {today} is a US holiday, the near leg of an overnight swap cannot settle",
                self.core.label()
            )));
        }

        let reference = self.calendar.adjust(today, BusinessDayConvention::Following);
        let spot_date = self
            .calendar
            .advance_days(reference, self.fixing_days as i32);
        // The trading calendar adjusts the near leg only when the
        // two-currency spot is a US business day.
        let earliest = match &self.trading_calendar {
            Some(trading) if self.us_calendar.is_business_day(spot_date) => {
                trading.adjust(spot_date, BusinessDayConvention::Following)
            }
            _ => spot_date,
        };
        let maturity = self.joint_calendar.advance(
            earliest,
            self.tenor,
            self.convention,
            self.end_of_month,
        )?;
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
        self.spot.register_observer(weak.clone());
        self.relative
            .evaluation_date()
            .register_observer(weak.clone());
        self.core.term_structure_handle().register_observer(weak);
    }
}

impl RateHelper for FxSwapRateHelper {
    fn core(&self) -> &HelperCore {
        &self.core
    }

    fn kind(&self) -> HelperKind {
        HelperKind::FxSwap
    }

    fn set_term_structure(&self, curve: Arc<dyn YieldTermStructure>) -> Result<()> {
        if let Some(collateral) = self.collateral.as_arc() {
            if Arc::ptr_eq(&collateral, &curve) {
                return Err(Error::InconsistentCurves(format!(
                    "{}: collateral curve is the curve being bootstrapped",
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
        let collateral = self
            .collateral
            .as_arc()
            .ok_or_else(|| Error::NotReady(format!("{}: no collateral curve", self.core.label())))?;
        let spot = self
            .spot
            .value()
            .ok_or_else(|| Error::EmptyQuote(format!("{}: spot", self.core.label())))?;

        let dates = self.core.dates();
        let trial_growth =
            trial.discount_date(dates.maturity) / trial.discount_date(dates.earliest);
        let collateral_growth =
            collateral.discount_date(dates.maturity) / collateral.discount_date(dates.earliest);
        let forward = if self.is_base_collateral {
            spot * trial_growth / collateral_growth
        } else {
            spot * collateral_growth / trial_growth
        };
        Ok(forward - spot)
    }
}

impl Observer for FxSwapRateHelper {
    fn update(&self) {
        if self.relative.evaluation_date_moved() {
            if let Err(error) = self.initialize_dates() {
                self.core.store_error(error);
            }
        }
        self.core.notify();
    }
}

impl std::fmt::Debug for FxSwapRateHelper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FxSwapRateHelper")
            .field("tenor", &self.tenor)
            .field("fixing_days", &self.fixing_days)
            .field("is_base_collateral", &self.is_base_collateral)
            .field("dates", &self.core.dates())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use yc_termstructures::FlatForward;
    use yc_time::{Date, WeekendsOnly};

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn three_month_dates() {
        let today = date(2024, 3, 14); // Thursday
        let evaluation = Arc::new(EvaluationDate::new(today));
        let helper = FxSwapRateHelper::from_points(
            0.005,
            1.10,
            Period::months(3),
            2,
            Arc::new(WeekendsOnly),
            true,
            Handle::from_arc(Arc::new(FlatForward::continuous(today, 0.02))),
            evaluation,
        )
        .unwrap();
        assert_eq!(helper.earliest_date(), date(2024, 3, 18)); // T+2
        assert_eq!(helper.maturity_date(), date(2024, 6, 18));
        assert_eq!(helper.pillar_date(), helper.maturity_date());
    }

    #[test]
    fn overnight_fails_on_a_us_holiday() {
        // 2024-07-04: Independence Day, a weekday the weekends-only pair
        // calendar trades on.
        let evaluation = Arc::new(EvaluationDate::new(date(2024, 7, 4)));
        let result = FxSwapRateHelper::from_points(
            0.0001,
            1.10,
            Period::days(1),
            0,
            Arc::new(WeekendsOnly),
            true,
            Handle::empty(),
            evaluation,
        );
        assert!(matches!(result, Err(Error::UnrepresentableFxTenor(_))));
    }

    #[test]
    fn tomorrow_next_constructs_on_a_us_holiday() {
        // Same evaluation date as the overnight case above, but the near leg
        // settles tomorrow, so the US holiday today is irrelevant.
        let evaluation = Arc::new(EvaluationDate::new(date(2024, 7, 4)));
        let helper = FxSwapRateHelper::from_points(
            0.0001,
            1.10,
            Period::days(1),
            1,
            Arc::new(WeekendsOnly),
            true,
            Handle::empty(),
            evaluation,
        )
        .unwrap();
        assert_eq!(helper.earliest_date(), date(2024, 7, 5));
        assert_eq!(helper.maturity_date(), date(2024, 7, 8)); // over the weekend
    }

    #[test]
    fn tomorrow_next_is_one_fixing_day() {
        let evaluation = Arc::new(EvaluationDate::new(date(2024, 3, 14)));
        let helper = FxSwapRateHelper::from_points(
            0.0001,
            1.10,
            Period::days(1),
            1,
            Arc::new(WeekendsOnly),
            true,
            Handle::empty(),
            evaluation,
        )
        .unwrap();
        assert_eq!(helper.earliest_date(), date(2024, 3, 15));
        assert_eq!(helper.maturity_date(), date(2024, 3, 18)); // over the weekend
    }

    #[test]
    fn implied_point_matches_the_discount_ratio() {
        let today = date(2024, 3, 14);
        let evaluation = Arc::new(EvaluationDate::new(today));
        let collateral: Arc<dyn YieldTermStructure> =
            Arc::new(FlatForward::continuous(today, 0.02));
        let helper = FxSwapRateHelper::from_points(
            0.005,
            1.10,
            Period::months(3),
            2,
            Arc::new(WeekendsOnly),
            true,
            Handle::from_arc(Arc::clone(&collateral)),
            evaluation,
        )
        .unwrap();

        let trial: Arc<dyn YieldTermStructure> = Arc::new(FlatForward::continuous(today, 0.03));
        helper.set_term_structure(Arc::clone(&trial)).unwrap();

        let dates = helper.core().dates();
        let dq = trial.discount_date(dates.maturity) / trial.discount_date(dates.earliest);
        let dc = collateral.discount_date(dates.maturity)
            / collateral.discount_date(dates.earliest);
        let expected = 1.10 * dq / dc - 1.10;
        assert_abs_diff_eq!(helper.implied_quote().unwrap(), expected, epsilon = 1e-15);
    }

    #[test]
    fn role_swap_inverts_the_ratio() {
        let today = date(2024, 3, 14);
        let evaluation = Arc::new(EvaluationDate::new(today));
        let collateral: Arc<dyn YieldTermStructure> =
            Arc::new(FlatForward::continuous(today, 0.02));
        let base_collateral = FxSwapRateHelper::from_points(
            0.005,
            1.10,
            Period::months(3),
            2,
            Arc::new(WeekendsOnly),
            true,
            Handle::from_arc(Arc::clone(&collateral)),
            Arc::clone(&evaluation),
        )
        .unwrap();
        let counter_collateral = FxSwapRateHelper::from_points(
            0.005,
            1.10,
            Period::months(3),
            2,
            Arc::new(WeekendsOnly),
            false,
            Handle::from_arc(collateral),
            evaluation,
        )
        .unwrap();

        let trial: Arc<dyn YieldTermStructure> = Arc::new(FlatForward::continuous(today, 0.03));
        base_collateral
            .set_term_structure(Arc::clone(&trial))
            .unwrap();
        counter_collateral.set_term_structure(trial).unwrap();

        let p1 = base_collateral.implied_quote().unwrap();
        let p2 = counter_collateral.implied_quote().unwrap();
        // spot + p1 and spot + p2 are reciprocal forwards scaled by spot^2.
        assert_abs_diff_eq!((1.10 + p1) * (1.10 + p2), 1.10 * 1.10, epsilon = 1e-12);
    }
}
