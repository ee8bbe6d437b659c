#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! View model and event types for the energy risk dashboard.
//!
//! These types are serialized to JSON for the dashboard page. The page
//! holds no state of its own beyond the last [`ViewState`] it received;
//! every interaction is sent back as an [`ApiEventRequest`] and answered
//! with a complete [`ViewModel`].

use energy_risk_models::{ProcessedRecord, SourceCategory};
use serde::{Deserialize, Serialize};

/// Which country, if any, the dashboard is focused on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ViewState {
    /// No country selected.
    #[default]
    Idle,
    /// One country selected.
    #[serde(rename_all = "camelCase")]
    Selected {
        /// ISO code of the selected country.
        iso_code: String,
    },
}

/// A user interaction on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    /// A click on a map location.
    Click {
        /// Location identifier from the map, matched against `iso_code`.
        location: String,
    },
    /// The reset button.
    Reset,
}

impl Event {
    /// Resolves the raw trigger inputs of one request into a single event.
    ///
    /// Reset takes precedence when both a click and a reset arrive together.
    /// Returns `None` if neither fired.
    #[must_use]
    pub fn resolve(location: Option<String>, reset: bool) -> Option<Self> {
        if reset {
            return Some(Self::Reset);
        }
        location.map(|location| Self::Click { location })
    }
}

/// Body of `POST /api/event`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEventRequest {
    /// The state the client is currently showing.
    #[serde(default)]
    pub state: ViewState,
    /// Clicked map location, if the map fired.
    pub location: Option<String>,
    /// Whether the reset button fired.
    #[serde(default)]
    pub reset: bool,
}

impl ApiEventRequest {
    /// See [`Event::resolve`].
    #[must_use]
    pub fn into_event(self) -> Option<Event> {
        Event::resolve(self.location, self.reset)
    }
}

/// One attribute/value line of the country detail table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailRow {
    pub attribute: String,
    pub value: String,
}

/// Demand vs generation pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieChart {
    pub labels: Vec<String>,
    pub values: Vec<Option<f64>>,
    pub colors: Vec<String>,
    /// Plotly `textinfo` setting.
    pub text_info: String,
}

/// A single bar of the electricity mix chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    pub label: String,
    pub value: Option<f64>,
    pub category: SourceCategory,
    pub color: String,
}

/// Electricity generation by source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChart {
    pub bars: Vec<Bar>,
    pub x_axis_title: String,
    pub y_axis_title: String,
}

/// Choropleth of `risk_sum` by country.
///
/// `locations`, `hover_names` and `values` are parallel arrays. When a
/// country is highlighted, every other value is `None` so the client greys
/// it out, while the colour axis keeps the full-table range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub title: String,
    pub locations: Vec<String>,
    pub hover_names: Vec<String>,
    pub values: Vec<Option<u8>>,
    /// Plotly colour scale name.
    pub color_scale: String,
    pub color_min: u8,
    pub color_max: u8,
    pub color_bar_title: String,
    pub highlighted: Option<String>,
}

/// Everything the page needs to draw itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub state: ViewState,
    pub map: MapView,
    /// Empty when idle.
    pub detail: Vec<DetailRow>,
    pub pie: Option<PieChart>,
    pub bar: Option<BarChart>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    pub healthy: bool,
    pub version: String,
    /// Number of countries loaded.
    pub countries: usize,
}

/// A country listed by `GET /api/countries`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCountrySummary {
    pub iso_code: String,
    pub country: String,
    pub risk_sum: u8,
}

impl From<&ProcessedRecord> for ApiCountrySummary {
    fn from(record: &ProcessedRecord) -> Self {
        Self {
            iso_code: record.iso_code.clone(),
            country: record.country.clone(),
            risk_sum: record.risk_sum,
        }
    }
}
