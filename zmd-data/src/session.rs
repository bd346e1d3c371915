//! Session-scoped ownership of the canonical record set.

use log::info;

use zmd_meteo::normalize::NormalizedBatch;
use zmd_meteo::record::CanonicalRecord;

use crate::station_index::StationIndex;

/// Ticket identifying one ingestion attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestTicket(u64);

/// Owner of the canonical record set for one session.
///
/// One ingestion is in flight at a time in normal use. If a second one is
/// started before the first resolves, the ticket handed out by
/// [`DatasetSession::begin_ingest`] makes the later one win: installing
/// with a superseded ticket changes nothing. A failed ingestion installs
/// nothing, so the set stays empty and no partial state is ever exposed.
#[derive(Debug, Default)]
pub struct DatasetSession {
    epoch: u64,
    records: Vec<CanonicalRecord>,
    dropped_rows: usize,
}

impl DatasetSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an ingestion attempt, invalidating the tickets of earlier ones.
    pub fn begin_ingest(&mut self) -> IngestTicket {
        self.epoch += 1;
        IngestTicket(self.epoch)
    }

    /// Install a normalized batch. Returns false, and changes nothing, if a
    /// newer ingestion has been started since this ticket was issued.
    pub fn install(&mut self, ticket: IngestTicket, batch: NormalizedBatch) -> bool {
        if ticket.0 != self.epoch {
            info!(
                "discarding result of superseded ingestion attempt {}",
                ticket.0
            );
            return false;
        }
        self.records = batch.records;
        self.dropped_rows = batch.dropped;
        true
    }

    /// The canonical record set, empty until an ingestion succeeds.
    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    /// How many source rows the installed ingestion dropped as malformed.
    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    /// Build the per-station index over the current set.
    pub fn index(&self) -> StationIndex {
        StationIndex::from_records(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::DatasetSession;
    use zmd_meteo::normalize::{normalize_raw_batch, NormalizedBatch};
    use zmd_meteo::raw_record::parse_delimited;

    fn batch(body: &str) -> NormalizedBatch {
        normalize_raw_batch(&parse_delimited(body).unwrap())
    }

    #[test]
    fn test_install_exposes_the_batch() {
        let mut session = DatasetSession::new();
        let ticket = session.begin_ingest();
        let installed = session.install(
            ticket,
            batch("Datum,Standort,T,RainDur\n2023-01-01,Zch_Schimmelstrasse,3.1,0\n"),
        );
        assert!(installed);
        assert_eq!(session.records().len(), 1);
        assert_eq!(session.index().stations().len(), 1);
    }

    #[test]
    fn test_later_ingestion_wins_over_out_of_order_completion() {
        let mut session = DatasetSession::new();
        let first = session.begin_ingest();
        let second = session.begin_ingest();

        // the second attempt resolves first
        assert!(session.install(
            second,
            batch("Datum,Standort,T,RainDur\n2023-01-02,Zch_Rosengartenstrasse,4.0,5\n"),
        ));
        // the stale first attempt must be discarded, not overwrite state
        assert!(!session.install(
            first,
            batch("Datum,Standort,T,RainDur\n2023-01-01,Zch_Schimmelstrasse,3.1,0\n"),
        ));

        assert_eq!(session.records().len(), 1);
        assert_eq!(session.records()[0].station.name(), "Rosengartenstrasse");
    }

    #[test]
    fn test_failed_ingestion_leaves_the_set_empty() {
        let mut session = DatasetSession::new();
        let _ticket = session.begin_ingest();
        // a transport failure surfaces to the caller; nothing is installed
        assert!(session.records().is_empty());
        assert_eq!(session.dropped_rows(), 0);
    }
}
