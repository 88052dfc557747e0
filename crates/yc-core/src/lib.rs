//! # yc-core
//!
//! Foundational building blocks shared across the yieldcurve-rs workspace:
//! scalar type aliases, the error hierarchy, the Observer/Observable
//! substrate, and the `Handle` / `RelinkableHandle` reference wrappers.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

/// Shared reference handles (`Handle<T>`, `RelinkableHandle<T>`).
pub mod handle;

/// Observer/Observable change propagation.
pub mod observable;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Non-negative integer type (settlement days, fixing days, month counts).
pub type Natural = u32;

/// Signed integer type for day and period arithmetic.
pub type Integer = i32;

/// Alias used for array sizes / indices.
pub type Size = usize;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A spread over a reference rate.
pub type Spread = Real;

/// A discount factor in (0, 1].
pub type DiscountFactor = Real;

/// A time measurement in years.
pub type Time = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use handle::{Handle, RelinkableHandle};
pub use observable::{Observable, Observer, ObserverList};
