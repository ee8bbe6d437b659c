#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Energy record types and risk rating definitions.
//!
//! This crate defines the raw per-country-year record read from the OWID
//! energy dataset, the processed per-country record written by the
//! preparation step, and the threshold-based rating tiers that feed the
//! aggregate `risk_sum`. Both the preparation tool and the dashboard depend
//! on these types so the processed CSV has a single canonical shape.

pub mod paths;
pub mod rating;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

pub use rating::{
    DemandGenerationRating, NetImportRating, NuclearRating, PerCapitaRating, RiskRatings,
};

/// The only year retained in the processed table.
pub const TARGET_YEAR: i32 = 2022;

/// Columns projected from the raw dataset, in output order.
pub const RAW_COLUMNS: [&str; 24] = [
    "country",
    "year",
    "iso_code",
    "population",
    "gdp",
    "biofuel_electricity",
    "carbon_intensity_elec",
    "coal_electricity",
    "electricity_demand",
    "electricity_generation",
    "fossil_electricity",
    "gas_electricity",
    "greenhouse_gas_emissions",
    "hydro_electricity",
    "low_carbon_electricity",
    "net_elec_imports_share_demand",
    "nuclear_electricity",
    "oil_electricity",
    "other_renewable_electricity",
    "other_renewable_exc_biofuel_electricity",
    "per_capita_electricity",
    "renewables_electricity",
    "solar_electricity",
    "wind_electricity",
];

/// Columns appended by the preparation step, in output order.
pub const DERIVED_COLUMNS: [&str; 6] = [
    "electricity_demand_generation_ratio",
    "electricity_demand_generation_ratio_rating",
    "per_capita_electricity_rating",
    "nuclear_electricity_rating",
    "net_elec_imports_share_demand_rating",
    "risk_sum",
];

/// One country-year row of the raw OWID energy dataset, restricted to the
/// projected columns. Any other columns in the source file are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub country: String,
    pub year: i32,
    pub iso_code: Option<String>,
    pub population: Option<f64>,
    pub gdp: Option<f64>,
    pub biofuel_electricity: Option<f64>,
    pub carbon_intensity_elec: Option<f64>,
    pub coal_electricity: Option<f64>,
    pub electricity_demand: Option<f64>,
    pub electricity_generation: Option<f64>,
    pub fossil_electricity: Option<f64>,
    pub gas_electricity: Option<f64>,
    pub greenhouse_gas_emissions: Option<f64>,
    pub hydro_electricity: Option<f64>,
    pub low_carbon_electricity: Option<f64>,
    pub net_elec_imports_share_demand: Option<f64>,
    pub nuclear_electricity: Option<f64>,
    pub oil_electricity: Option<f64>,
    pub other_renewable_electricity: Option<f64>,
    pub other_renewable_exc_biofuel_electricity: Option<f64>,
    pub per_capita_electricity: Option<f64>,
    pub renewables_electricity: Option<f64>,
    pub solar_electricity: Option<f64>,
    pub wind_electricity: Option<f64>,
}

impl RawRecord {
    /// Returns the ISO code if present and non-blank.
    #[must_use]
    pub fn iso_code(&self) -> Option<&str> {
        self.iso_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }

    /// Whether this row belongs in the processed table: the target year
    /// with a usable ISO code.
    #[must_use]
    pub fn qualifies(&self) -> bool {
        self.year == TARGET_YEAR && self.iso_code().is_some()
    }
}

/// One row of the processed table: the projected raw columns followed by
/// the derived ratio, the four ratings and their sum.
///
/// Build with [`ProcessedRecord::from_raw`] so that `risk_sum` always
/// equals the sum of the four rating fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedRecord {
    pub country: String,
    pub year: i32,
    pub iso_code: String,
    pub population: Option<f64>,
    pub gdp: Option<f64>,
    pub biofuel_electricity: Option<f64>,
    pub carbon_intensity_elec: Option<f64>,
    pub coal_electricity: Option<f64>,
    pub electricity_demand: Option<f64>,
    pub electricity_generation: Option<f64>,
    pub fossil_electricity: Option<f64>,
    pub gas_electricity: Option<f64>,
    pub greenhouse_gas_emissions: Option<f64>,
    pub hydro_electricity: Option<f64>,
    pub low_carbon_electricity: Option<f64>,
    pub net_elec_imports_share_demand: Option<f64>,
    pub nuclear_electricity: Option<f64>,
    pub oil_electricity: Option<f64>,
    pub other_renewable_electricity: Option<f64>,
    pub other_renewable_exc_biofuel_electricity: Option<f64>,
    pub per_capita_electricity: Option<f64>,
    pub renewables_electricity: Option<f64>,
    pub solar_electricity: Option<f64>,
    pub wind_electricity: Option<f64>,
    /// Demand divided by generation. Empty when generation is zero or
    /// either side is missing.
    pub electricity_demand_generation_ratio: Option<f64>,
    pub electricity_demand_generation_ratio_rating: u8,
    pub per_capita_electricity_rating: u8,
    pub nuclear_electricity_rating: u8,
    pub net_elec_imports_share_demand_rating: u8,
    pub risk_sum: u8,
}

impl ProcessedRecord {
    /// Derives the processed row from a raw row.
    ///
    /// Returns `None` if the raw row does not qualify (wrong year or no ISO
    /// code). Derivation is per-row with no dependency on other rows.
    #[must_use]
    pub fn from_raw(raw: RawRecord) -> Option<Self> {
        if !raw.qualifies() {
            return None;
        }
        let iso_code = raw.iso_code()?.to_owned();

        let ratio = rating::demand_generation_ratio(
            raw.electricity_demand,
            raw.electricity_generation,
        );
        let ratings = RiskRatings::from_raw(&raw);

        Some(Self {
            country: raw.country,
            year: raw.year,
            iso_code,
            population: raw.population,
            gdp: raw.gdp,
            biofuel_electricity: raw.biofuel_electricity,
            carbon_intensity_elec: raw.carbon_intensity_elec,
            coal_electricity: raw.coal_electricity,
            electricity_demand: raw.electricity_demand,
            electricity_generation: raw.electricity_generation,
            fossil_electricity: raw.fossil_electricity,
            gas_electricity: raw.gas_electricity,
            greenhouse_gas_emissions: raw.greenhouse_gas_emissions,
            hydro_electricity: raw.hydro_electricity,
            low_carbon_electricity: raw.low_carbon_electricity,
            net_elec_imports_share_demand: raw.net_elec_imports_share_demand,
            nuclear_electricity: raw.nuclear_electricity,
            oil_electricity: raw.oil_electricity,
            other_renewable_electricity: raw.other_renewable_electricity,
            other_renewable_exc_biofuel_electricity: raw.other_renewable_exc_biofuel_electricity,
            per_capita_electricity: raw.per_capita_electricity,
            renewables_electricity: raw.renewables_electricity,
            solar_electricity: raw.solar_electricity,
            wind_electricity: raw.wind_electricity,
            electricity_demand_generation_ratio: ratio,
            electricity_demand_generation_ratio_rating: ratings.demand_generation.value(),
            per_capita_electricity_rating: ratings.per_capita.value(),
            nuclear_electricity_rating: ratings.nuclear.value(),
            net_elec_imports_share_demand_rating: ratings.net_imports.value(),
            risk_sum: ratings.sum(),
        })
    }

    /// Generation from a single electricity source.
    #[must_use]
    pub const fn source_value(&self, source: ElectricitySource) -> Option<f64> {
        match source {
            ElectricitySource::Gas => self.gas_electricity,
            ElectricitySource::Coal => self.coal_electricity,
            ElectricitySource::Oil => self.oil_electricity,
            ElectricitySource::Nuclear => self.nuclear_electricity,
            ElectricitySource::Solar => self.solar_electricity,
            ElectricitySource::Wind => self.wind_electricity,
            ElectricitySource::Hydro => self.hydro_electricity,
            ElectricitySource::Biofuel => self.biofuel_electricity,
            ElectricitySource::OtherRenewable => self.other_renewable_exc_biofuel_electricity,
        }
    }
}

/// Broad grouping of an electricity source, used for chart colouring.
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
pub enum SourceCategory {
    /// Gas, coal and oil
    Fossil,
    /// Nuclear fission
    Nuclear,
    /// Solar, wind, hydro, biofuel and other renewables
    Renewable,
}

impl SourceCategory {
    /// Chart colour for this category.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Fossil => "orange",
            Self::Nuclear => "red",
            Self::Renewable => "green",
        }
    }
}

/// An electricity source shown in the per-country generation mix.
///
/// `Display` gives the chart axis label and `EnumIter` walks the sources in
/// bar chart order.
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
    Display,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElectricitySource {
    Gas,
    Coal,
    Oil,
    Nuclear,
    Solar,
    Wind,
    Hydro,
    Biofuel,
    #[strum(to_string = "Other Renewable")]
    OtherRenewable,
}

impl ElectricitySource {
    /// Returns the category this source belongs to.
    #[must_use]
    pub const fn category(self) -> SourceCategory {
        match self {
            Self::Gas | Self::Coal | Self::Oil => SourceCategory::Fossil,
            Self::Nuclear => SourceCategory::Nuclear,
            Self::Solar | Self::Wind | Self::Hydro | Self::Biofuel | Self::OtherRenewable => {
                SourceCategory::Renewable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator as _;

    use super::*;

    fn raw_2022(iso: &str) -> RawRecord {
        RawRecord {
            country: "Testland".to_string(),
            year: TARGET_YEAR,
            iso_code: Some(iso.to_string()),
            electricity_demand: Some(120.0),
            electricity_generation: Some(100.0),
            per_capita_electricity: Some(5_000.0),
            nuclear_electricity: Some(0.0),
            net_elec_imports_share_demand: Some(2.5),
            ..RawRecord::default()
        }
    }

    #[test]
    fn from_raw_rejects_other_years() {
        let mut raw = raw_2022("TST");
        raw.year = 2021;
        assert!(ProcessedRecord::from_raw(raw).is_none());
    }

    #[test]
    fn from_raw_rejects_missing_or_blank_iso() {
        let mut raw = raw_2022("TST");
        raw.iso_code = None;
        assert!(ProcessedRecord::from_raw(raw.clone()).is_none());
        raw.iso_code = Some("  ".to_string());
        assert!(ProcessedRecord::from_raw(raw).is_none());
    }

    #[test]
    fn from_raw_derives_ratings() {
        let rec = ProcessedRecord::from_raw(raw_2022("TST")).unwrap();
        assert_eq!(rec.iso_code, "TST");
        assert_eq!(rec.electricity_demand_generation_ratio, Some(1.2));
        assert_eq!(rec.electricity_demand_generation_ratio_rating, 5);
        assert_eq!(rec.per_capita_electricity_rating, 1);
        assert_eq!(rec.nuclear_electricity_rating, 1);
        assert_eq!(rec.net_elec_imports_share_demand_rating, 0);
        assert_eq!(rec.risk_sum, 7);
    }

    #[test]
    fn missing_nuclear_and_imports_add_no_risk() {
        let mut raw = raw_2022("TST");
        raw.electricity_demand = Some(80.0);
        raw.electricity_generation = Some(100.0);
        raw.nuclear_electricity = None;
        raw.net_elec_imports_share_demand = None;

        let rec = ProcessedRecord::from_raw(raw).unwrap();
        assert_eq!(rec.electricity_demand_generation_ratio_rating, 0);
        assert_eq!(rec.per_capita_electricity_rating, 1);
        assert_eq!(rec.nuclear_electricity_rating, 1);
        assert_eq!(rec.net_elec_imports_share_demand_rating, 0);
        assert_eq!(rec.risk_sum, 2);
    }

    #[test]
    fn risk_sum_is_sum_of_components() {
        let per_capita = [None, Some(10.0), Some(1_000_000.0), Some(20_000_000.0)];
        let nuclear = [None, Some(0.0), Some(0.01), Some(50.0)];
        let imports = [None, Some(-3.0), Some(0.0), Some(12.0)];
        let generation = [None, Some(0.0), Some(50.0), Some(100.0), Some(200.0)];

        for pc in per_capita {
            for nu in nuclear {
                for im in imports {
                    for gen_twh in generation {
                        let mut raw = raw_2022("TST");
                        raw.per_capita_electricity = pc;
                        raw.nuclear_electricity = nu;
                        raw.net_elec_imports_share_demand = im;
                        raw.electricity_generation = gen_twh;
                        let rec = ProcessedRecord::from_raw(raw).unwrap();
                        assert_eq!(
                            rec.risk_sum,
                            rec.electricity_demand_generation_ratio_rating
                                + rec.per_capita_electricity_rating
                                + rec.nuclear_electricity_rating
                                + rec.net_elec_imports_share_demand_rating
                        );
                        assert!((2..=14).contains(&rec.risk_sum));
                    }
                }
            }
        }
    }

    #[test]
    fn processed_header_matches_column_lists() {
        let rec = ProcessedRecord::from_raw(raw_2022("TST")).unwrap();
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(&rec).unwrap();
        let bytes = writer.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let header = text.lines().next().unwrap();

        let expected: Vec<&str> = RAW_COLUMNS.iter().chain(DERIVED_COLUMNS.iter()).copied().collect();
        assert_eq!(header, expected.join(","));
    }

    #[test]
    fn sources_iterate_in_chart_order_with_labels() {
        let labels: Vec<String> = ElectricitySource::iter().map(|s| s.to_string()).collect();
        assert_eq!(
            labels,
            [
                "Gas",
                "Coal",
                "Oil",
                "Nuclear",
                "Solar",
                "Wind",
                "Hydro",
                "Biofuel",
                "Other Renewable",
            ]
        );
    }

    #[test]
    fn source_categories_map_to_colors() {
        assert_eq!(ElectricitySource::Coal.category().color(), "orange");
        assert_eq!(ElectricitySource::Nuclear.category().color(), "red");
        assert_eq!(ElectricitySource::OtherRenewable.category().color(), "green");
    }
}
