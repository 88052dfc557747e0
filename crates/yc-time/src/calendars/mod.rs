//! Concrete market calendars.

/// Joint calendar combining several calendars.
pub mod joint_calendar;

/// TARGET (euro settlement) calendar.
pub mod target;

/// United States settlement calendar.
pub mod united_states;

pub use joint_calendar::{JointCalendar, JointCalendarRule};
pub use target::Target;
pub use united_states::UnitedStatesSettlement;
