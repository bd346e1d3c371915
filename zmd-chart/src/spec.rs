//! Declarative chart descriptions.

use serde::Serialize;

use zmd_data::series::{Selection, SeriesPoint};
use zmd_meteo::record::Attribute;

/// Vega-Lite schema the emitted description declares.
pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// Constant line color of single-station series.
pub const SINGLE_SERIES_COLOR: &str = "steelblue";

/// A line-mark chart description: data plus encodings, no behavior.
///
/// The serialized shape is the contract the rendering collaborator binds
/// against; it consumes and discards this.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "$schema")]
    pub schema: &'static str,
    pub description: &'static str,
    pub data: ChartData,
    pub mark: &'static str,
    pub encoding: Encoding,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub values: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Encoding {
    pub x: FieldEncoding,
    pub y: FieldEncoding,
    pub color: ColorEncoding,
}

/// A positional channel bound to a field of the series points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldEncoding {
    pub field: &'static str,
    #[serde(rename = "type")]
    pub value_type: &'static str,
    pub title: String,
}

/// Color channel: a constant for single-station series, a nominal field
/// over `station` for all-stations series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorEncoding {
    Value {
        value: &'static str,
    },
    Field {
        field: &'static str,
        #[serde(rename = "type")]
        value_type: &'static str,
    },
}

/// Build the chart description for a computed series.
///
/// The y-axis title is derived from the selected attribute's display label
/// and unit, not from the raw field key. An empty series yields a valid
/// description with empty data; whether to render at all is the caller's
/// decision.
pub fn build_chart_spec(series: Vec<SeriesPoint>, selection: &Selection) -> ChartSpec {
    let y_title = selection
        .attribute
        .map(Attribute::axis_title)
        .unwrap_or_default();
    let color = if series.iter().any(|point| point.station.is_some()) {
        ColorEncoding::Field {
            field: "station",
            value_type: "nominal",
        }
    } else {
        ColorEncoding::Value {
            value: SINGLE_SERIES_COLOR,
        }
    };
    ChartSpec {
        schema: VEGA_LITE_SCHEMA,
        description: "Datenvisualisierung",
        data: ChartData { values: series },
        mark: "line",
        encoding: Encoding {
            x: FieldEncoding {
                field: "date",
                value_type: "temporal",
                title: "Datum".to_string(),
            },
            y: FieldEncoding {
                field: "value",
                value_type: "quantitative",
                title: y_title,
            },
            color,
        },
    }
}
