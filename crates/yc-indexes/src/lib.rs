//! # yc-indexes
//!
//! Interest-rate indexes: conventions plus a forwarding-curve handle.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// BMA-style averaging index.
pub mod bma_index;

/// Interbank offered-rate index.
pub mod ibor_index;

/// Vanilla swap-rate index.
pub mod swap_index;

pub use bma_index::BmaIndex;
pub use ibor_index::IborIndex;
pub use swap_index::SwapIndex;
