//! Threshold-based risk ratings.
//!
//! Each rating classifies one raw metric into a small discrete tier. A
//! missing or NaN value compares false against every threshold, so it
//! falls through to the final branch of its rule: no nuclear generation,
//! a net importer, no demand deficit, and the top per-capita tier.

use serde::{Deserialize, Serialize};

use crate::RawRecord;

/// Per-capita generation below this is [`PerCapitaRating::Low`].
pub const PER_CAPITA_LOW_LIMIT: f64 = 1_000_000.0;

/// Per-capita generation above this is [`PerCapitaRating::High`].
pub const PER_CAPITA_HIGH_LIMIT: f64 = 10_000_000.0;

/// Demand divided by generation.
///
/// Returns `None` when either operand is missing or generation is zero, so
/// the ratio never carries `NaN` or infinity into the processed table.
#[must_use]
pub fn demand_generation_ratio(demand: Option<f64>, generation: Option<f64>) -> Option<f64> {
    let (demand, generation) = (demand?, generation?);
    if generation == 0.0 {
        return None;
    }
    let ratio = demand / generation;
    ratio.is_finite().then_some(ratio)
}

/// Whether a country consumes more electricity than it generates.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DemandGenerationRating {
    /// Ratio at or below 1, or undefined
    Covered = 0,
    /// Ratio strictly above 1
    Deficit = 5,
}

impl DemandGenerationRating {
    #[must_use]
    pub fn classify(ratio: Option<f64>) -> Self {
        match ratio {
            Some(r) if r > 1.0 => Self::Deficit,
            _ => Self::Covered,
        }
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }
}

/// Tier of per-capita electricity generation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PerCapitaRating {
    /// Below 1,000,000
    Low = 1,
    /// 1,000,000 to 10,000,000 inclusive
    Medium = 2,
    /// Above 10,000,000, or missing
    High = 3,
}

impl PerCapitaRating {
    #[must_use]
    pub fn classify(value: Option<f64>) -> Self {
        match value {
            Some(v) if v < PER_CAPITA_LOW_LIMIT => Self::Low,
            Some(v) if v <= PER_CAPITA_HIGH_LIMIT => Self::Medium,
            _ => Self::High,
        }
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }
}

/// Whether the country generates any nuclear electricity.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NuclearRating {
    /// Zero or negative nuclear generation, or missing
    Absent = 1,
    /// Positive nuclear generation
    Present = 3,
}

impl NuclearRating {
    #[must_use]
    pub fn classify(value: Option<f64>) -> Self {
        match value {
            Some(v) if v > 0.0 => Self::Present,
            _ => Self::Absent,
        }
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }
}

/// Direction of net electricity trade as a share of demand.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NetImportRating {
    /// Share of zero or more, or missing
    NetImporter = 0,
    /// Negative share
    NetExporter = 3,
}

impl NetImportRating {
    #[must_use]
    pub fn classify(value: Option<f64>) -> Self {
        match value {
            Some(v) if v < 0.0 => Self::NetExporter,
            _ => Self::NetImporter,
        }
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }
}

/// The four ratings that make up a country's risk sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskRatings {
    pub demand_generation: DemandGenerationRating,
    pub per_capita: PerCapitaRating,
    pub nuclear: NuclearRating,
    pub net_imports: NetImportRating,
}

impl RiskRatings {
    #[must_use]
    pub fn from_raw(raw: &RawRecord) -> Self {
        Self {
            demand_generation: DemandGenerationRating::classify(demand_generation_ratio(
                raw.electricity_demand,
                raw.electricity_generation,
            )),
            per_capita: PerCapitaRating::classify(raw.per_capita_electricity),
            nuclear: NuclearRating::classify(raw.nuclear_electricity),
            net_imports: NetImportRating::classify(raw.net_elec_imports_share_demand),
        }
    }

    /// Aggregate risk score, always in `2..=14`.
    #[must_use]
    pub const fn sum(self) -> u8 {
        self.demand_generation.value()
            + self.per_capita.value()
            + self.nuclear.value()
            + self.net_imports.value()
    }
}
