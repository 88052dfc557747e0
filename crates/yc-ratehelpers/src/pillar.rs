//! Pillar-date selection policy.
//!
//! Every helper contributes exactly one node date to the bootstrap grid.
//! By default that is the last date the instrument's cash flows depend on,
//! but callers may pin the node to the maturity date or to an arbitrary
//! date inside the helper's relevance window.

use yc_core::errors::{Error, Result};
use yc_time::Date;

/// How a helper picks the curve node it contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pillar {
    /// Use the latest date the instrument's pricing depends on (default).
    LastRelevantDate,
    /// Use the instrument's maturity date.
    MaturityDate,
    /// Use an explicit date; it must lie within `[earliest, maturity]`.
    CustomDate(Date),
}

impl Default for Pillar {
    fn default() -> Self {
        Pillar::LastRelevantDate
    }
}

/// Resolve a [`Pillar`] choice into a concrete node date.
///
/// A custom date outside `[earliest, maturity]` is rejected with
/// [`Error::InvalidPillar`].
pub fn choose_pillar(
    choice: Pillar,
    earliest: Date,
    last_relevant: Date,
    maturity: Date,
) -> Result<Date> {
    match choice {
        Pillar::LastRelevantDate => Ok(last_relevant),
        Pillar::MaturityDate => Ok(maturity),
        Pillar::CustomDate(date) => {
            if date < earliest || date > maturity {
                Err(Error::InvalidPillar(format!(
                    "custom pillar {date} outside [{earliest}, {maturity}]"
                )))
            } else {
                Ok(date)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn last_relevant_is_the_default() {
        assert_eq!(Pillar::default(), Pillar::LastRelevantDate);
    }

    #[test]
    fn resolves_named_choices() {
        let earliest = date(2024, 1, 2);
        let last = date(2025, 12, 30);
        let maturity = date(2026, 1, 2);
        assert_eq!(
            choose_pillar(Pillar::LastRelevantDate, earliest, last, maturity).unwrap(),
            last
        );
        assert_eq!(
            choose_pillar(Pillar::MaturityDate, earliest, last, maturity).unwrap(),
            maturity
        );
    }

    #[test]
    fn custom_date_must_lie_in_window() {
        let earliest = date(2024, 1, 2);
        let last = date(2025, 12, 30);
        let maturity = date(2026, 1, 2);
        let inside = date(2025, 6, 16);
        assert_eq!(
            choose_pillar(Pillar::CustomDate(inside), earliest, last, maturity).unwrap(),
            inside
        );
        assert!(matches!(
            choose_pillar(Pillar::CustomDate(date(2023, 12, 29)), earliest, last, maturity),
            Err(Error::InvalidPillar(_))
        ));
        assert!(matches!(
            choose_pillar(Pillar::CustomDate(date(2026, 1, 5)), earliest, last, maturity),
            Err(Error::InvalidPillar(_))
        ));
    }

    proptest! {
        #[test]
        fn chosen_pillar_never_leaves_window(
            earliest_serial in 40_000i32..45_000,
            span in 1i32..4_000,
            custom_offset in -500i32..4_500,
        ) {
            let earliest = Date::from_serial(earliest_serial).unwrap();
            let maturity = Date::from_serial(earliest_serial + span).unwrap();
            let custom = Date::from_serial(earliest_serial + custom_offset).unwrap();
            if let Ok(pillar) =
                choose_pillar(Pillar::CustomDate(custom), earliest, maturity, maturity)
            {
                prop_assert!(pillar >= earliest && pillar <= maturity);
            } else {
                prop_assert!(custom < earliest || custom > maturity);
            }
        }
    }
}
