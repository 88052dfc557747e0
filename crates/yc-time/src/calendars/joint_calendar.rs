//! Joint calendar — combines two or more calendars under a rule.

use std::sync::Arc;

use crate::calendar::Calendar;
use crate::date::Date;

/// Rule for combining multiple calendars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointCalendarRule {
    /// A day is a holiday if any constituent calendar calls it one
    /// (business days are the intersection).
    JoinHolidays,
    /// A day is a business day if any constituent calendar calls it one
    /// (holidays are the intersection).
    JoinBusinessDays,
}

/// A calendar built from several others according to a [`JointCalendarRule`].
pub struct JointCalendar {
    calendars: Vec<Arc<dyn Calendar>>,
    rule: JointCalendarRule,
    name: String,
}

impl std::fmt::Debug for JointCalendar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JointCalendar")
            .field("name", &self.name)
            .field("rule", &self.rule)
            .finish()
    }
}

impl JointCalendar {
    /// Create a joint calendar from constituents and a combination rule.
    ///
    /// # Panics
    /// Panics if `calendars` is empty.
    pub fn new(calendars: Vec<Arc<dyn Calendar>>, rule: JointCalendarRule) -> Self {
        assert!(
            !calendars.is_empty(),
            "JointCalendar requires at least one calendar"
        );
        let joiner = match rule {
            JointCalendarRule::JoinHolidays => ", ",
            JointCalendarRule::JoinBusinessDays => " | ",
        };
        let name = calendars
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(joiner);
        Self {
            calendars,
            rule,
            name,
        }
    }
}

impl Calendar for JointCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        match self.rule {
            JointCalendarRule::JoinHolidays => {
                self.calendars.iter().all(|c| c.is_business_day(date))
            }
            JointCalendarRule::JoinBusinessDays => {
                self.calendars.iter().any(|c| c.is_business_day(date))
            }
        }
    }

    fn is_weekend(&self, date: Date) -> bool {
        match self.rule {
            JointCalendarRule::JoinHolidays => self.calendars.iter().any(|c| c.is_weekend(date)),
            JointCalendarRule::JoinBusinessDays => {
                self.calendars.iter().all(|c| c.is_weekend(date))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{NullCalendar, WeekendsOnly};
    use crate::calendars::target::Target;
    use crate::calendars::united_states::UnitedStatesSettlement;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn join_holidays_is_intersection_of_business_days() {
        let cal = JointCalendar::new(
            vec![Arc::new(Target), Arc::new(UnitedStatesSettlement)],
            JointCalendarRule::JoinHolidays,
        );
        // July 4, 2023: US holiday, TARGET business day
        assert!(!cal.is_business_day(date(2023, 7, 4)));
        // May 1, 2023: TARGET holiday, US business day
        assert!(!cal.is_business_day(date(2023, 5, 1)));
        assert!(cal.is_business_day(date(2023, 6, 15)));
    }

    #[test]
    fn join_business_days_is_union_of_business_days() {
        let cal = JointCalendar::new(
            vec![Arc::new(NullCalendar), Arc::new(Target)],
            JointCalendarRule::JoinBusinessDays,
        );
        // NullCalendar treats every day as a business day
        assert!(cal.is_business_day(date(2024, 1, 1)));
        assert!(cal.is_business_day(date(2024, 1, 6)));
    }

    #[test]
    fn name_formatting() {
        let cal = JointCalendar::new(
            vec![Arc::new(WeekendsOnly), Arc::new(Target)],
            JointCalendarRule::JoinHolidays,
        );
        assert_eq!(cal.name(), "Weekends Only, TARGET");
    }
}
