//! Pure view rendering.
//!
//! [`render`] turns the current [`ViewState`], one [`Event`] and the
//! dataset into a complete [`ViewModel`]. It reads nothing else, so the
//! same inputs always give the same view: clicking `A` then `B` renders
//! exactly what clicking `B` alone does.

use energy_risk_dashboard_models::{
    Bar, BarChart, DetailRow, Event, MapView, PieChart, ViewModel, ViewState,
};
use energy_risk_models::{ElectricitySource, ProcessedRecord, TARGET_YEAR};
use strum::IntoEnumIterator as _;

use crate::dataset::Dataset;
use crate::format;

/// Diverging scale: low risk green, high risk red.
pub const COLOR_SCALE: &str = "RdYlGn_r";

/// Label used for `risk_sum` on the map and in the detail table.
pub const RISK_LABEL: &str = "Risk Potential:";

/// Colour axis used when the dataset is empty.
const FALLBACK_RISK_RANGE: (u8, u8) = (2, 14);

/// A line of the detail table and how its value is formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetailField {
    Country,
    IsoCode,
    Population,
    Gdp,
    NetImports,
    PerCapita,
    RiskSum,
}

impl DetailField {
    const ALL: &[Self] = &[
        Self::Country,
        Self::IsoCode,
        Self::Population,
        Self::Gdp,
        Self::NetImports,
        Self::PerCapita,
        Self::RiskSum,
    ];

    const fn label(self) -> &'static str {
        match self {
            Self::Country => "Country",
            Self::IsoCode => "ISO Code:",
            Self::Population => "Population",
            Self::Gdp => "GDP",
            Self::NetImports => "Net Electricity Imports",
            Self::PerCapita => "Electricity Generation Per Person:",
            Self::RiskSum => RISK_LABEL,
        }
    }

    fn value(self, record: &ProcessedRecord) -> String {
        match self {
            Self::Country => record.country.clone(),
            Self::IsoCode => record.iso_code.clone(),
            Self::Population => format::optional(record.population, format::thousands),
            Self::Gdp => format::optional(record.gdp, format::thousands),
            Self::NetImports => {
                format::optional(record.net_elec_imports_share_demand, format::fixed2)
            }
            Self::PerCapita => format::optional(record.per_capita_electricity, format::thousands),
            Self::RiskSum => record.risk_sum.to_string(),
        }
    }
}

/// Applies `event` to `state`.
///
/// Reset always returns to idle. A click selects the clicked country, or
/// returns to idle if the location has no record.
#[must_use]
pub fn transition(state: &ViewState, event: &Event, dataset: &Dataset) -> ViewState {
    let next = match event {
        Event::Reset => ViewState::Idle,
        Event::Click { location } => match dataset.get(location) {
            Some(record) => ViewState::Selected {
                iso_code: record.iso_code.clone(),
            },
            None => {
                log::debug!("Click on {location} has no matching country");
                ViewState::Idle
            }
        },
    };
    log::trace!("{state:?} --{event:?}--> {next:?}");
    next
}

/// Applies `event` to `state` and renders the resulting view.
#[must_use]
pub fn render(state: &ViewState, event: &Event, dataset: &Dataset) -> ViewModel {
    render_state(&transition(state, event, dataset), dataset)
}

/// Renders a state without applying an event.
///
/// A selected ISO code missing from the dataset renders as idle.
#[must_use]
pub fn render_state(state: &ViewState, dataset: &Dataset) -> ViewModel {
    let selected = match state {
        ViewState::Idle => None,
        ViewState::Selected { iso_code } => dataset.get(iso_code),
    };

    let Some(record) = selected else {
        return ViewModel {
            state: ViewState::Idle,
            map: map_view(dataset, None),
            detail: Vec::new(),
            pie: None,
            bar: None,
        };
    };

    ViewModel {
        state: ViewState::Selected {
            iso_code: record.iso_code.clone(),
        },
        map: map_view(dataset, Some(record)),
        detail: detail_rows(record),
        pie: Some(pie_chart(record)),
        bar: Some(bar_chart(record)),
    }
}

/// Builds the choropleth. Every country is always listed; with a
/// highlighted record, all other countries get no value and the client
/// draws them on its grey base layer.
fn map_view(dataset: &Dataset, highlighted: Option<&ProcessedRecord>) -> MapView {
    let (color_min, color_max) = dataset.risk_range().unwrap_or(FALLBACK_RISK_RANGE);
    let records = dataset.records();

    MapView {
        title: format!("World Map of Energy Data {TARGET_YEAR}"),
        locations: records.iter().map(|r| r.iso_code.clone()).collect(),
        hover_names: records.iter().map(|r| r.country.clone()).collect(),
        values: records
            .iter()
            .map(|r| match highlighted {
                Some(h) if h.iso_code != r.iso_code => None,
                _ => Some(r.risk_sum),
            })
            .collect(),
        color_scale: COLOR_SCALE.to_string(),
        color_min,
        color_max,
        color_bar_title: RISK_LABEL.to_string(),
        highlighted: highlighted.map(|r| r.iso_code.clone()),
    }
}

fn detail_rows(record: &ProcessedRecord) -> Vec<DetailRow> {
    DetailField::ALL
        .iter()
        .map(|field| DetailRow {
            attribute: field.label().to_string(),
            value: field.value(record),
        })
        .collect()
}

fn pie_chart(record: &ProcessedRecord) -> PieChart {
    PieChart {
        labels: vec!["Demand".to_string(), "Generation".to_string()],
        values: vec![record.electricity_demand, record.electricity_generation],
        colors: vec!["red".to_string(), "green".to_string()],
        text_info: "label+percent".to_string(),
    }
}

fn bar_chart(record: &ProcessedRecord) -> BarChart {
    BarChart {
        bars: ElectricitySource::iter()
            .map(|source| Bar {
                label: source.to_string(),
                value: record.source_value(source),
                category: source.category(),
                color: source.category().color().to_string(),
            })
            .collect(),
        x_axis_title: "Source".to_string(),
        y_axis_title: "Electricity Generation".to_string(),
    }
}
