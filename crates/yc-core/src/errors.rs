//! Error types for yieldcurve-rs.
//!
//! All fallible operations in the workspace return [`Result<T>`] with this
//! module's [`Error`] enum.  The `ensure!` and `fail!` macros provide the
//! usual precondition / unconditional-failure shorthands.

use thiserror::Error;

/// The top-level error type used throughout yieldcurve-rs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error.
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// A helper was asked to price before a term structure was linked.
    #[error("term structure not set: {0}")]
    NotReady(String),

    /// A helper's market quote currently holds no value.
    #[error("empty quote: {0}")]
    EmptyQuote(String),

    /// A custom pillar date falls outside the helper's admissible range.
    #[error("invalid pillar: {0}")]
    InvalidPillar(String),

    /// A swap helper's fixed-leg annuity collapsed to a non-positive value.
    #[error("degenerate swap: {0}")]
    DegenerateSwap(String),

    /// An FX swap start date cannot be represented under the requested
    /// calendars and tenor.
    #[error("unrepresentable FX tenor: {0}")]
    UnrepresentableFxTenor(String),

    /// The curve being linked conflicts with a curve the helper already
    /// references for another purpose.
    #[error("inconsistent curves: {0}")]
    InconsistentCurves(String),

    /// Date-related error.
    #[error("date error: {0}")]
    Date(String),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Shorthand `Result` type used throughout yieldcurve-rs.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use yc_core::ensure;
/// fn positive(x: f64) -> yc_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use yc_core::fail;
/// fn always_err() -> yc_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
