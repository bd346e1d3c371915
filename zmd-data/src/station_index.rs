//! Grouping of the canonical record set by station.

use itertools::Itertools;
use std::collections::HashMap;

use zmd_meteo::record::CanonicalRecord;
use zmd_meteo::station::{StationId, StationSelector};

/// Canonical records grouped per station.
///
/// Stations keep their order of first appearance in the source; records
/// within a station are sorted ascending by date. Lookups accept either the
/// bare or the prefixed form of a station key, and the all-stations
/// selector returns the union of every group, ordered by date and then by
/// station order.
#[derive(Debug, Clone, Default)]
pub struct StationIndex {
    order: Vec<StationId>,
    groups: HashMap<StationId, Vec<CanonicalRecord>>,
}

impl StationIndex {
    pub fn from_records(records: &[CanonicalRecord]) -> Self {
        let mut index = StationIndex::default();
        for record in records {
            if !index.groups.contains_key(&record.station) {
                index.order.push(record.station.clone());
            }
            index
                .groups
                .entry(record.station.clone())
                .or_default()
                .push(record.clone());
        }
        for group in index.groups.values_mut() {
            // stable: same-day records keep their insertion order
            group.sort_by_key(|record| record.date);
        }
        index
    }

    /// Canonical station ids in first-appearance order.
    pub fn stations(&self) -> &[StationId] {
        &self.order
    }

    /// Records of one station, addressed by a bare or prefixed key.
    ///
    /// A key naming no known station resolves to the empty group; a stale
    /// selection after a dataset refresh is a normal condition, not an
    /// error.
    pub fn station_records(&self, key: &str) -> &[CanonicalRecord] {
        let id = StationId::from_raw(key);
        self.groups.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Union of all stations' records, ordered by date, then by station
    /// first-appearance order.
    pub fn combined_records(&self) -> Vec<&CanonicalRecord> {
        self.order
            .iter()
            .enumerate()
            .flat_map(|(position, id)| self.groups[id].iter().map(move |record| (position, record)))
            .sorted_by_key(|(position, record)| (record.date, *position))
            .map(|(_, record)| record)
            .collect()
    }

    /// Records selected by a station choice.
    pub fn select(&self, selector: &StationSelector) -> Vec<&CanonicalRecord> {
        match selector {
            StationSelector::All => self.combined_records(),
            StationSelector::Station(id) => self
                .groups
                .get(id)
                .map(|group| group.iter().collect())
                .unwrap_or_default(),
        }
    }
}
