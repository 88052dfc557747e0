//! `Frequency` — how often coupon events recur.

/// Payment / event frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    /// No events; used as a sentinel.
    NoFrequency,
    /// Once (maturity only).
    Once,
    /// Once per year.
    Annual,
    /// Twice per year.
    Semiannual,
    /// Four times per year.
    Quarterly,
    /// Six times per year.
    Bimonthly,
    /// Twelve times per year.
    Monthly,
    /// Twenty-six times per year.
    Biweekly,
    /// Fifty-two times per year.
    Weekly,
    /// Daily.
    Daily,
    /// Other / custom frequency.
    OtherFrequency,
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Frequency::NoFrequency => "No-Frequency",
            Frequency::Once => "Once",
            Frequency::Annual => "Annual",
            Frequency::Semiannual => "Semiannual",
            Frequency::Quarterly => "Quarterly",
            Frequency::Bimonthly => "Bimonthly",
            Frequency::Monthly => "Monthly",
            Frequency::Biweekly => "Biweekly",
            Frequency::Weekly => "Weekly",
            Frequency::Daily => "Daily",
            Frequency::OtherFrequency => "Other-Frequency",
        };
        write!(f, "{s}")
    }
}
