use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::station::StationId;

/// A measured quantity in the daily dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attribute {
    Temperature,
    RainDuration,
}

impl Attribute {
    pub const ALL: [Attribute; 2] = [Attribute::Temperature, Attribute::RainDuration];

    /// Field name used by both source forms.
    pub fn key(self) -> &'static str {
        match self {
            Attribute::Temperature => "T",
            Attribute::RainDuration => "RainDur",
        }
    }

    /// Human-readable label for selectors.
    pub fn label(self) -> &'static str {
        match self {
            Attribute::Temperature => "Temperatur",
            Attribute::RainDuration => "Regendauer",
        }
    }

    /// Measurement unit.
    pub fn unit(self) -> &'static str {
        match self {
            Attribute::Temperature => "°C",
            Attribute::RainDuration => "min",
        }
    }

    /// Axis title: label plus unit, e.g. "Temperatur (°C)".
    pub fn axis_title(self) -> String {
        format!("{} ({})", self.label(), self.unit())
    }

    /// Resolve an attribute from its field key or display label.
    pub fn from_input(input: &str) -> Option<Attribute> {
        Attribute::ALL
            .into_iter()
            .find(|a| a.key() == input || a.label() == input)
    }
}

/// One station's observations for one calendar day, in canonical form.
///
/// Created once per source row at ingestion time and immutable thereafter.
/// The date always renders as ISO `YYYY-MM-DD`; the station is the canonical
/// bare name. A measurement maps to `None` when the source row lacked it.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecord {
    pub station: StationId,
    pub date: NaiveDate,
    pub measurements: BTreeMap<Attribute, Option<f64>>,
}

impl CanonicalRecord {
    /// The measured value for an attribute, `None` when the source row
    /// lacked it.
    pub fn value(&self, attribute: Attribute) -> Option<f64> {
        self.measurements.get(&attribute).copied().flatten()
    }
}
