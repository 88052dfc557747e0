//! # yieldcurve
//!
//! Rate helpers for bootstrapping a zero-coupon yield curve from market
//! quotes: deposits, FRAs, futures, vanilla swaps, tenor-basis swaps, BMA
//! swaps, and FX swaps.
//!
//! This crate is a **façade** that re-exports the public items of the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `yc-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use yieldcurve::prelude::*;
//!
//! let today = Date::from_ymd(2024, 3, 14).unwrap();
//! let evaluation = Arc::new(EvaluationDate::new(today));
//! let index = Arc::new(IborIndex::new(
//!     "Libor3M",
//!     Period::months(3),
//!     2,
//!     Arc::new(WeekendsOnly),
//!     BusinessDayConvention::ModifiedFollowing,
//!     false,
//!     Arc::new(Actual360),
//! ));
//! let helper = DepositRateHelper::from_rate(0.025, index, evaluation).unwrap();
//!
//! helper
//!     .set_term_structure(Arc::new(FlatForward::continuous(today, 0.025)))
//!     .unwrap();
//! assert!(helper.quote_error().unwrap().abs() < 0.001);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, handles, observers, and error definitions.
pub use yc_core as core;

/// Date, calendar, day counter, and schedule types.
pub use yc_time as time;

/// Market quotes.
pub use yc_quotes as quotes;

/// Term structure interfaces and the flat reference curve.
pub use yc_termstructures as termstructures;

/// Market index definitions.
pub use yc_indexes as indexes;

/// Rate helpers for curve bootstrapping.
pub use yc_ratehelpers as ratehelpers;

/// The names most programs need, importable in one line.
pub mod prelude {
    pub use yc_core::{
        Error, Handle, Natural, Observable, Observer, Rate, Real, RelinkableHandle, Result,
        Spread, Time,
    };
    pub use yc_indexes::{BmaIndex, IborIndex, SwapIndex};
    pub use yc_quotes::{Quote, SimpleQuote};
    pub use yc_ratehelpers::{
        BasisLeg, BmaSwapRateHelper, DepositRateHelper, FloatFloatSwapRateHelper, FraRateHelper,
        FuturesKind, FuturesRateHelper, FxSwapRateHelper, HelperKind, Pillar, RateHelper,
        SwapRateHelper, SwapRateHelperOptions,
    };
    pub use yc_termstructures::{FlatForward, TermStructure, YieldTermStructure};
    pub use yc_time::{
        Actual360, Actual365Fixed, BusinessDayConvention, Calendar, Date, DayCounter,
        EvaluationDate, Frequency, JointCalendar, JointCalendarRule, NullCalendar, Period,
        Schedule, ScheduleBuilder, Target, Thirty360, TimeUnit, UnitedStatesSettlement,
        WeekendsOnly,
    };
}
