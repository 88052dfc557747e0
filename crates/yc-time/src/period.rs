//! `Period` — a time span expressed as a length and a [`TimeUnit`].

use crate::frequency::Frequency;
use crate::time_unit::TimeUnit;
use yc_core::errors::{Error, Result};

/// A time span made up of an integer length and a [`TimeUnit`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    /// Number of units.
    pub length: i32,
    /// The unit of time.
    pub unit: TimeUnit,
}

impl Period {
    /// Create a new period.
    pub fn new(length: i32, unit: TimeUnit) -> Self {
        Self { length, unit }
    }

    /// `n` days.
    pub fn days(n: i32) -> Self {
        Self::new(n, TimeUnit::Days)
    }

    /// `n` weeks.
    pub fn weeks(n: i32) -> Self {
        Self::new(n, TimeUnit::Weeks)
    }

    /// `n` months.
    pub fn months(n: i32) -> Self {
        Self::new(n, TimeUnit::Months)
    }

    /// `n` years.
    pub fn years(n: i32) -> Self {
        Self::new(n, TimeUnit::Years)
    }

    /// Construct a `Period` from a payment [`Frequency`].
    ///
    /// # Errors
    /// Fails for `NoFrequency` and `OtherFrequency`.
    pub fn from_frequency(freq: Frequency) -> Result<Self> {
        match freq {
            Frequency::NoFrequency | Frequency::OtherFrequency => Err(Error::InvalidArgument(
                format!("cannot convert {freq} to a Period"),
            )),
            Frequency::Once => Ok(Period::years(0)),
            Frequency::Annual => Ok(Period::years(1)),
            Frequency::Semiannual => Ok(Period::months(6)),
            Frequency::Quarterly => Ok(Period::months(3)),
            Frequency::Bimonthly => Ok(Period::months(2)),
            Frequency::Monthly => Ok(Period::months(1)),
            Frequency::Biweekly => Ok(Period::weeks(2)),
            Frequency::Weekly => Ok(Period::weeks(1)),
            Frequency::Daily => Ok(Period::days(1)),
        }
    }

    /// Negate the period (reverse direction).
    pub fn negated(self) -> Self {
        Self {
            length: -self.length,
            unit: self.unit,
        }
    }
}

impl std::ops::Neg for Period {
    type Output = Self;
    fn neg(self) -> Self {
        self.negated()
    }
}

impl std::ops::Mul<i32> for Period {
    type Output = Self;
    fn mul(self, rhs: i32) -> Self {
        Period {
            length: self.length * rhs,
            unit: self.unit,
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let abbr = match self.unit {
            TimeUnit::Days => "D",
            TimeUnit::Weeks => "W",
            TimeUnit::Months => "M",
            TimeUnit::Years => "Y",
        };
        write!(f, "{}{abbr}", self.length)
    }
}

impl std::fmt::Debug for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Period({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Period::months(3).to_string(), "3M");
        assert_eq!(Period::years(1).to_string(), "1Y");
        assert_eq!(Period::months(-6).to_string(), "-6M");
    }

    #[test]
    fn from_frequency() {
        assert_eq!(
            Period::from_frequency(Frequency::Quarterly).unwrap(),
            Period::months(3)
        );
        assert_eq!(
            Period::from_frequency(Frequency::Semiannual).unwrap(),
            Period::months(6)
        );
        assert!(Period::from_frequency(Frequency::NoFrequency).is_err());
    }
}
