//! # yc-quotes
//!
//! Observable market quotes for yieldcurve-rs.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// `Quote` trait and concrete implementations.
pub mod quote;

pub use quote::{Quote, SimpleQuote};
