//! Common domain type definitions
//!
//! The two derived dimensions attached to every observation: the region a
//! country belongs to and the historical era its period falls in.

use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Regional bucket of a reference area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    /// World aggregate
    Global,
    /// North America
    NorthAmerica,
    /// Latin America and the Caribbean
    LatinAmericaCaribbean,
    /// Europe and Central Asia
    EuropeCentralAsia,
    /// Middle East and North Africa
    MiddleEastNorthAfrica,
    /// Sub-Saharan Africa
    SubSaharanAfrica,
    /// South Asia
    SouthAsia,
    /// East Asia and the Pacific
    EastAsiaPacific,
    /// Any code without a mapping
    Unmapped,
}

impl Region {
    /// Every region in display order, fallback last
    pub const ALL: [Self; 9] = [
        Self::Global,
        Self::NorthAmerica,
        Self::LatinAmericaCaribbean,
        Self::EuropeCentralAsia,
        Self::MiddleEastNorthAfrica,
        Self::SubSaharanAfrica,
        Self::SouthAsia,
        Self::EastAsiaPacific,
        Self::Unmapped,
    ];

    /// Display label, also the persisted form
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Global => "Global",
            Self::NorthAmerica => "North America",
            Self::LatinAmericaCaribbean => "Latin America & Caribbean",
            Self::EuropeCentralAsia => "Europe & Central Asia",
            Self::MiddleEastNorthAfrica => "Middle East & North Africa",
            Self::SubSaharanAfrica => "Sub-Saharan Africa",
            Self::SouthAsia => "South Asia",
            Self::EastAsiaPacific => "East Asia & Pacific",
            Self::Unmapped => "Other / Unmapped",
        }
    }

    /// Resolve a persisted label; unknown labels degrade to the fallback
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|region| region.label() == label)
            .unwrap_or(Self::Unmapped)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Region {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

const fn first_of_month(year: i32, month: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(date) => date,
        None => panic!("invalid era boundary"),
    }
}

/// First month of the post-crisis recovery
pub const POST_CRISIS_START: NaiveDate = first_of_month(2007, 7);
/// First month of the commodity reset
pub const COMMODITY_RESET_START: NaiveDate = first_of_month(2014, 1);
/// First month of the pandemic shock
pub const PANDEMIC_SHOCK_START: NaiveDate = first_of_month(2020, 1);
/// First month of the geopolitical reordering
pub const GEOPOLITICAL_START: NaiveDate = first_of_month(2022, 2);

/// Historical era of an observation period
///
/// Boundaries are half-open and fixed; every date maps to exactly one era.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Era {
    /// Before July 2007
    PreShockBaseline,
    /// July 2007 up to December 2013
    PostCrisisRecovery,
    /// January 2014 up to December 2019
    CommodityReset,
    /// January 2020 up to January 2022
    PandemicShock,
    /// February 2022 onwards
    GeopoliticalReordering,
}

impl Era {
    /// Every era in chronological order
    pub const ALL: [Self; 5] = [
        Self::PreShockBaseline,
        Self::PostCrisisRecovery,
        Self::CommodityReset,
        Self::PandemicShock,
        Self::GeopoliticalReordering,
    ];

    /// Classify a period
    #[must_use]
    pub fn classify(period: NaiveDate) -> Self {
        if period < POST_CRISIS_START {
            Self::PreShockBaseline
        } else if period < COMMODITY_RESET_START {
            Self::PostCrisisRecovery
        } else if period < PANDEMIC_SHOCK_START {
            Self::CommodityReset
        } else if period < GEOPOLITICAL_START {
            Self::PandemicShock
        } else {
            Self::GeopoliticalReordering
        }
    }

    /// Display label, also the persisted form
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PreShockBaseline => "Pre-shock baseline",
            Self::PostCrisisRecovery => "Post-crisis recovery",
            Self::CommodityReset => "Commodity reset",
            Self::PandemicShock => "Pandemic shock",
            Self::GeopoliticalReordering => "Geopolitical reordering",
        }
    }

    /// Resolve a persisted label
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|era| era.label() == label)
    }

    /// Inclusive start of the era, `None` for the open-ended first era
    #[must_use]
    pub const fn start(self) -> Option<NaiveDate> {
        match self {
            Self::PreShockBaseline => None,
            Self::PostCrisisRecovery => Some(POST_CRISIS_START),
            Self::CommodityReset => Some(COMMODITY_RESET_START),
            Self::PandemicShock => Some(PANDEMIC_SHOCK_START),
            Self::GeopoliticalReordering => Some(GEOPOLITICAL_START),
        }
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Era {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
