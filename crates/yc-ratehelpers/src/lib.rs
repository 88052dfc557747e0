//! # yc-ratehelpers
//!
//! Rate helpers: market instruments expressed as yield-curve constraints.
//!
//! Each helper pairs one observable quote with the conventions needed to
//! re-price the instrument off a candidate curve.  A bootstrap engine links
//! a trial curve into every helper and solves, pillar by pillar, for the
//! discount factors that drive each helper's quote error to zero.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// BMA-versus-Ibor swap helper.
pub mod bma;

/// Money-market deposit helper.
pub mod deposit;

/// Tenor-basis swap helper.
pub mod float_float;

/// Forward-rate-agreement helper.
pub mod fra;

/// Interest-rate futures helper.
pub mod futures;

/// FX swap forward-point helper.
pub mod fx_swap;

/// The `RateHelper` contract and shared helper state.
pub mod helper;

/// Pillar-date selection policy.
pub mod pillar;

/// Par-swap rate helper.
pub mod swap;

mod legs;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use bma::BmaSwapRateHelper;
pub use deposit::DepositRateHelper;
pub use float_float::{BasisLeg, FloatFloatSwapRateHelper};
pub use fra::FraRateHelper;
pub use futures::{FuturesKind, FuturesRateHelper};
pub use fx_swap::FxSwapRateHelper;
pub use helper::{HelperCore, HelperDates, HelperKind, RateHelper, RelativeDateCore};
pub use pillar::{choose_pillar, Pillar};
pub use swap::{SwapRateHelper, SwapRateHelperOptions};
