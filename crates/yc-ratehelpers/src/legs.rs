//! Leg arithmetic shared by the swap-family helpers.
//!
//! The helpers never instantiate a full instrument object; a leg here is
//! just a schedule priced against a (forwarding, discounting) curve pair.
//! Forwards are the simple rates implied by the forwarding curve's discount
//! factors over each accrual period, so when forwarding and discounting
//! coincide the floating-leg NPV telescopes to `P(start) - P(end)`.

use yc_core::Real;
use yc_termstructures::YieldTermStructure;
use yc_time::{DayCounter, Schedule};

/// `sum tau_i * P_disc(t_i)` over the schedule's accrual periods.
///
/// Multiplied by a rate (or spread) this is the leg's NPV per unit notional.
pub(crate) fn annuity(
    schedule: &Schedule,
    day_counter: &dyn DayCounter,
    discounting: &dyn YieldTermStructure,
) -> Real {
    schedule
        .periods()
        .map(|(d1, d2)| day_counter.year_fraction(d1, d2) * discounting.discount_date(d2))
        .sum()
}

/// NPV of a floating leg paying the simple forward over each period.
pub(crate) fn floating_npv(
    schedule: &Schedule,
    day_counter: &dyn DayCounter,
    forwarding: &dyn YieldTermStructure,
    discounting: &dyn YieldTermStructure,
) -> Real {
    schedule
        .periods()
        .map(|(d1, d2)| {
            let tau = day_counter.year_fraction(d1, d2);
            if tau <= 0.0 {
                return 0.0;
            }
            let forward = (forwarding.discount_date(d1) / forwarding.discount_date(d2) - 1.0) / tau;
            forward * tau * discounting.discount_date(d2)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use yc_termstructures::{FlatForward, YieldTermStructure};
    use yc_time::{Actual360, Date};

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn quarterly_schedule() -> Schedule {
        Schedule::from_dates(vec![
            date(2024, 1, 2),
            date(2024, 4, 2),
            date(2024, 7, 2),
            date(2024, 10, 2),
            date(2025, 1, 2),
        ])
    }

    #[test]
    fn floating_leg_telescopes_on_a_single_curve() {
        let curve = FlatForward::continuous(date(2024, 1, 2), 0.03);
        let schedule = quarterly_schedule();
        let npv = floating_npv(&schedule, &Actual360, &curve, &curve);
        let expected = curve.discount_date(schedule.start_date())
            - curve.discount_date(schedule.end_date());
        assert_abs_diff_eq!(npv, expected, epsilon = 1e-14);
    }

    #[test]
    fn annuity_matches_hand_sum() {
        let curve = FlatForward::continuous(date(2024, 1, 2), 0.03);
        let schedule = quarterly_schedule();
        let by_hand: Real = schedule
            .periods()
            .map(|(d1, d2)| Actual360.year_fraction(d1, d2) * curve.discount_date(d2))
            .sum();
        assert_abs_diff_eq!(
            annuity(&schedule, &Actual360, &curve),
            by_hand,
            epsilon = 1e-15
        );
    }
}
