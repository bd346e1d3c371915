//! Series filtering: a selection over the indexed record set becomes an
//! ordered sequence of `{date, value}` points.

use chrono::NaiveDate;
use serde::Serialize;

use zmd_meteo::record::Attribute;
use zmd_meteo::station::{StationId, StationSelector};

use crate::station_index::StationIndex;

/// The user's current choice of station and measured attribute. Both fields
/// start out unset and return to unset on reset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub station: Option<StationSelector>,
    pub attribute: Option<Attribute>,
}

impl Selection {
    /// Both fields chosen.
    pub fn is_complete(&self) -> bool {
        self.station.is_some() && self.attribute.is_some()
    }
}

/// One charted point.
///
/// `value` stays `null` for rows that lacked the attribute; `station` is
/// carried only in all-stations series, where it drives the color encoding.
/// The serialized field names are the renderer's binding contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<StationId>,
}

/// Compute the series for a selection.
///
/// An incomplete selection produces an empty series; nothing is partially
/// computed. The canonical set is never touched, so repeating a selection
/// reproduces its series exactly.
pub fn filter_series(index: &StationIndex, selection: &Selection) -> Vec<SeriesPoint> {
    let (Some(station), Some(attribute)) = (&selection.station, selection.attribute) else {
        return Vec::new();
    };
    let carry_station = matches!(station, StationSelector::All);
    index
        .select(station)
        .into_iter()
        .map(|record| SeriesPoint {
            date: record.date,
            value: record.value(attribute),
            station: carry_station.then(|| record.station.clone()),
        })
        .collect()
}
