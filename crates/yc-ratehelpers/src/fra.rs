//! Forward-rate-agreement helper.

use std::sync::{Arc, Weak};

use yc_core::errors::Result;
use yc_core::{Natural, Observable, Observer, Real};
use yc_indexes::IborIndex;
use yc_quotes::{Quote, SimpleQuote};
use yc_time::{BusinessDayConvention, EvaluationDate, Period};

use crate::helper::{HelperCore, HelperDates, HelperKind, RateHelper, RelativeDateCore};
use crate::pillar::{choose_pillar, Pillar};

/// A rate helper for a forward-rate agreement.
///
/// The quote is the FRA's simple forward rate.  The accrual period starts
/// `period_to_start` after the spot date and runs for the index tenor;
/// both ends are re-derived whenever the evaluation date moves, and the
/// pillar policy is re-applied on each derivation.
pub struct FraRateHelper {
    core: HelperCore,
    relative: RelativeDateCore,
    index: Arc<IborIndex>,
    period_to_start: Period,
    pillar: Pillar,
}

impl FraRateHelper {
    /// Create a helper for a FRA starting `period_to_start` after spot.
    pub fn new(
        quote: Arc<dyn Quote>,
        period_to_start: Period,
        index: Arc<IborIndex>,
        pillar: Pillar,
        evaluation: Arc<EvaluationDate>,
    ) -> Result<Arc<Self>> {
        let helper = Arc::new(Self {
            core: HelperCore::new(
                format!("{period_to_start}x{} FRA", index.tenor()),
                quote,
            ),
            relative: RelativeDateCore::new(evaluation),
            index,
            period_to_start,
            pillar,
        });
        helper.initialize_dates()?;
        helper.register();
        Ok(helper)
    }

    /// Create a helper from the usual `NxM` month quotation.
    ///
    /// `months_to_start` is `N`; the accrual length is the index tenor.
    pub fn from_months(
        quote: Arc<dyn Quote>,
        months_to_start: Natural,
        index: Arc<IborIndex>,
        pillar: Pillar,
        evaluation: Arc<EvaluationDate>,
    ) -> Result<Arc<Self>> {
        Self::new(
            quote,
            Period::months(months_to_start as i32),
            index,
            pillar,
            evaluation,
        )
    }

    /// Convenience constructor wrapping a plain rate in a [`SimpleQuote`].
    pub fn from_rate(
        rate: Real,
        months_to_start: Natural,
        index: Arc<IborIndex>,
        evaluation: Arc<EvaluationDate>,
    ) -> Result<Arc<Self>> {
        Self::from_months(
            Arc::new(SimpleQuote::new(rate)),
            months_to_start,
            index,
            Pillar::LastRelevantDate,
            evaluation,
        )
    }

    /// The index supplying conventions and accrual length.
    pub fn index(&self) -> &Arc<IborIndex> {
        &self.index
    }

    /// The offset between the spot date and the accrual start.
    pub fn period_to_start(&self) -> Period {
        self.period_to_start
    }

    fn initialize_dates(&self) -> Result<()> {
        let calendar = self.index.fixing_calendar();
        let reference = calendar.adjust(self.relative.today(), BusinessDayConvention::Following);
        let spot = calendar.advance_days(reference, self.index.fixing_days() as i32);
        let earliest = calendar.advance(
            spot,
            self.period_to_start,
            self.index.business_day_convention(),
            self.index.end_of_month(),
        )?;
        let maturity = self.index.maturity_date(earliest)?;
        let pillar = choose_pillar(self.pillar, earliest, maturity, maturity)?;
        self.core.set_dates(HelperDates {
            earliest,
            pillar,
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

impl RateHelper for FraRateHelper {
    fn core(&self) -> &HelperCore {
        &self.core
    }

    fn kind(&self) -> HelperKind {
        HelperKind::Fra
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

impl Observer for FraRateHelper {
    fn update(&self) {
        if self.relative.evaluation_date_moved() {
            if let Err(error) = self.initialize_dates() {
                self.core.store_error(error);
            }
        }
        self.core.notify();
    }
}

impl std::fmt::Debug for FraRateHelper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FraRateHelper")
            .field("period_to_start", &self.period_to_start)
            .field("index", &self.index.name())
            .field("dates", &self.core.dates())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use yc_core::Error;
    use yc_termstructures::{FlatForward, YieldTermStructure};
    use yc_time::{Actual360, Date, DayCounter, WeekendsOnly};

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

    #[test]
    fn three_by_six_dates() {
        let evaluation = Arc::new(EvaluationDate::new(date(2024, 3, 14))); // Thursday
        let helper = FraRateHelper::from_rate(0.03, 3, index_3m(), evaluation).unwrap();
        // spot = T+2 = Mon 2024-03-18; start = +3M; end = start + 3M
        assert_eq!(helper.earliest_date(), date(2024, 6, 18));
        assert_eq!(helper.maturity_date(), date(2024, 9, 18));
        assert_eq!(helper.pillar_date(), date(2024, 9, 18));
    }

    #[test]
    fn custom_pillar_is_validated_each_derivation() {
        let evaluation = Arc::new(EvaluationDate::new(date(2024, 3, 14)));
        let helper = FraRateHelper::from_months(
            Arc::new(SimpleQuote::new(0.03)),
            3,
            index_3m(),
            Pillar::CustomDate(date(2024, 7, 1)),
            Arc::clone(&evaluation),
        )
        .unwrap();
        assert_eq!(helper.pillar_date(), date(2024, 7, 1));

        // Move today past the custom pillar: the re-derivation fails and the
        // error surfaces on the next pricing call.
        evaluation.set(date(2024, 8, 1));
        helper
            .set_term_structure(Arc::new(FlatForward::continuous(date(2024, 8, 1), 0.03)))
            .unwrap();
        assert!(matches!(
            helper.implied_quote(),
            Err(Error::InvalidPillar(_))
        ));
    }

    #[test]
    fn implied_quote_matches_curve_forward() {
        let today = date(2024, 3, 14);
        let evaluation = Arc::new(EvaluationDate::new(today));
        let helper = FraRateHelper::from_rate(0.03, 3, index_3m(), evaluation).unwrap();

        let curve: Arc<dyn YieldTermStructure> = Arc::new(FlatForward::continuous(today, 0.03));
        helper.set_term_structure(Arc::clone(&curve)).unwrap();

        let dates = helper.core().dates();
        let tau = Actual360.year_fraction(dates.earliest, dates.maturity);
        let expected = (curve.discount_date(dates.earliest)
            / curve.discount_date(dates.maturity)
            - 1.0)
            / tau;
        assert_abs_diff_eq!(helper.implied_quote().unwrap(), expected, epsilon = 1e-15);
    }
}
