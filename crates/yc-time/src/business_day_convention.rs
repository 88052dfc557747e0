//! Business-day adjustment conventions.

/// How to adjust a date that falls on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessDayConvention {
    /// The first business day after the holiday.
    Following,
    /// The first business day after the holiday, unless that crosses into the
    /// next month; then the first business day before.
    ModifiedFollowing,
    /// The first business day before the holiday.
    Preceding,
    /// The first business day before the holiday, unless that crosses into
    /// the previous month; then the first business day after.
    ModifiedPreceding,
    /// Leave the date as it is.
    Unadjusted,
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
            BusinessDayConvention::Unadjusted => "Unadjusted",
        };
        write!(f, "{s}")
    }
}
