//! # yc-time
//!
//! Dates, calendars, day counters, schedules, and futures-date utilities.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// ASX futures dates (second Friday of the quarterly cycle).
pub mod asx;

/// Business-day adjustment conventions.
pub mod business_day_convention;

/// Calendar trait and built-in implementations.
pub mod calendar;

/// Concrete market calendars.
pub mod calendars;

/// `Date` type.
pub mod date;

/// `DayCounter` trait and built-in day-count conventions.
pub mod day_counter;

/// The shared, observable evaluation date.
pub mod evaluation_date;

/// Payment / event frequency.
pub mod frequency;

/// IMM futures dates (third Wednesday of the quarterly cycle).
pub mod imm;

/// `Period` — a time span in a `TimeUnit`.
pub mod period;

/// `Schedule` — an ordered sequence of dates.
pub mod schedule;

/// `TimeUnit` — days, weeks, months, years.
pub mod time_unit;

/// `Weekday` — day of the week.
pub mod weekday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use business_day_convention::BusinessDayConvention;
pub use calendar::{Calendar, NullCalendar, WeekendsOnly};
pub use calendars::{JointCalendar, JointCalendarRule, Target, UnitedStatesSettlement};
pub use date::Date;
pub use day_counter::{Actual360, Actual365Fixed, DayCounter, Thirty360};
pub use evaluation_date::EvaluationDate;
pub use frequency::Frequency;
pub use period::Period;
pub use schedule::{DateGeneration, Schedule, ScheduleBuilder};
pub use time_unit::TimeUnit;
pub use weekday::Weekday;
