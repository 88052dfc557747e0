//! `Schedule` — an ordered sequence of coupon dates.

use crate::business_day_convention::BusinessDayConvention;
use crate::calendar::Calendar;
use crate::date::Date;
use crate::period::Period;
use yc_core::errors::{Error, Result};

/// Date generation rule for schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateGeneration {
    /// Dates generated backward from the termination date.
    Backward,
    /// Dates generated forward from the effective date.
    Forward,
    /// Only the effective and termination dates.
    Zero,
}

/// An ordered sequence of coupon/payment dates.
#[derive(Debug, Clone)]
pub struct Schedule {
    dates: Vec<Date>,
}

impl Schedule {
    /// Build a schedule from an explicit list of dates.
    pub fn from_dates(dates: Vec<Date>) -> Self {
        Self { dates }
    }

    /// All dates in the schedule.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Number of dates.
    pub fn size(&self) -> usize {
        self.dates.len()
    }

    /// The `i`-th date.
    pub fn date(&self, i: usize) -> Date {
        self.dates[i]
    }

    /// The start (effective) date.
    pub fn start_date(&self) -> Date {
        self.dates[0]
    }

    /// The end (termination) date.
    pub fn end_date(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }

    /// Iterate over consecutive accrual periods as `(start, end)` pairs.
    pub fn periods(&self) -> impl Iterator<Item = (Date, Date)> + '_ {
        self.dates.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Builder for [`Schedule`].
#[derive(Debug)]
pub struct ScheduleBuilder<'a> {
    effective_date: Date,
    termination_date: Date,
    tenor: Period,
    calendar: &'a dyn Calendar,
    convention: BusinessDayConvention,
    termination_convention: BusinessDayConvention,
    rule: DateGeneration,
    end_of_month: bool,
}

impl<'a> ScheduleBuilder<'a> {
    /// Begin building a schedule.
    pub fn new(
        effective_date: Date,
        termination_date: Date,
        tenor: Period,
        calendar: &'a dyn Calendar,
    ) -> Self {
        Self {
            effective_date,
            termination_date,
            tenor,
            calendar,
            convention: BusinessDayConvention::ModifiedFollowing,
            termination_convention: BusinessDayConvention::ModifiedFollowing,
            rule: DateGeneration::Backward,
            end_of_month: false,
        }
    }

    /// Set the business-day convention for intermediate dates.
    pub fn with_convention(mut self, c: BusinessDayConvention) -> Self {
        self.convention = c;
        self
    }

    /// Set the business-day convention for the termination date.
    pub fn with_termination_convention(mut self, c: BusinessDayConvention) -> Self {
        self.termination_convention = c;
        self
    }

    /// Set the date-generation rule.
    pub fn with_rule(mut self, rule: DateGeneration) -> Self {
        self.rule = rule;
        self
    }

    /// Whether to snap month-based dates to the end of the month.
    pub fn end_of_month(mut self, flag: bool) -> Self {
        self.end_of_month = flag;
        self
    }

    /// Build the `Schedule`.
    pub fn build(self) -> Result<Schedule> {
        let start = self.effective_date;
        let end = self.termination_date;

        if start >= end {
            return Err(Error::InvalidArgument(format!(
                "effective date {start} must be before termination date {end}"
            )));
        }

        if self.tenor.length == 0 || self.rule == DateGeneration::Zero {
            return Ok(Schedule {
                dates: vec![
                    self.calendar.adjust(start, self.convention),
                    self.calendar.adjust(end, self.termination_convention),
                ],
            });
        }

        // Generate unadjusted anchor dates first, then adjust in one pass.
        let mut unadjusted: Vec<Date> = Vec::new();
        match self.rule {
            DateGeneration::Forward => {
                unadjusted.push(start);
                let mut n = 1i32;
                loop {
                    let next = start.advance_period(self.tenor * n)?;
                    if next >= end {
                        break;
                    }
                    unadjusted.push(next);
                    n += 1;
                }
                unadjusted.push(end);
            }
            DateGeneration::Backward => {
                unadjusted.push(end);
                let mut n = 1i32;
                loop {
                    let prev = end.advance_period(-(self.tenor * n))?;
                    if prev <= start {
                        break;
                    }
                    unadjusted.push(prev);
                    n += 1;
                }
                unadjusted.push(start);
                unadjusted.reverse();
            }
            DateGeneration::Zero => unreachable!("handled above"),
        }

        let last = unadjusted.len() - 1;
        let mut dates: Vec<Date> = unadjusted
            .iter()
            .enumerate()
            .map(|(i, &d)| {
                let conv = if i == last {
                    self.termination_convention
                } else {
                    self.convention
                };
                if self.end_of_month && self.calendar.is_end_of_month(start) && i != 0 {
                    self.calendar.end_of_month(d)
                } else {
                    self.calendar.adjust(d, conv)
                }
            })
            .collect();
        dates.dedup();

        Ok(Schedule { dates })
    }
}
