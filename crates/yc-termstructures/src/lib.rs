//! # yc-termstructures
//!
//! The term-structure interfaces consumed by the rate-helper layer, plus the
//! flat-forward reference curve.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Flat (constant continuous rate) yield curve.
pub mod flat_forward;

/// Base term-structure trait.
pub mod term_structure;

/// Yield term-structure trait.
pub mod yield_term_structure;

pub use flat_forward::FlatForward;
pub use term_structure::TermStructure;
pub use yield_term_structure::YieldTermStructure;
