use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix the data source attaches to station keys (e.g. "Zch_Rosengartenstrasse").
pub const SOURCE_PREFIX: &str = "Zch_";

/// Display label of the all-stations choice in selectors.
pub const ALL_STATIONS_LABEL: &str = "Alle Strassen";

/// Canonical identifier of a monitoring station.
///
/// The canonical form is the bare display name (e.g. "Rosengartenstrasse");
/// the source data also uses a prefixed form ("Zch_Rosengartenstrasse").
/// Either form is accepted on input, and [`StationId::source_id`] recovers
/// the prefixed form for matching against raw data that still carries it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    /// Canonicalize a raw station key, stripping the source prefix if present.
    pub fn from_raw(raw: &str) -> Self {
        let bare = raw.strip_prefix(SOURCE_PREFIX).unwrap_or(raw);
        StationId(bare.to_string())
    }

    /// The bare display name.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// The prefixed key used by the raw data source.
    pub fn source_id(&self) -> String {
        format!("{SOURCE_PREFIX}{}", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A station choice: one concrete station, or everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationSelector {
    /// No station filter, include every station.
    All,
    Station(StationId),
}

impl StationSelector {
    /// Parse a selector from user input. The all-stations label (or "all")
    /// selects everything; anything else names a station in either form.
    pub fn from_input(input: &str) -> Self {
        if input == ALL_STATIONS_LABEL || input.eq_ignore_ascii_case("all") {
            StationSelector::All
        } else {
            StationSelector::Station(StationId::from_raw(input))
        }
    }
}
