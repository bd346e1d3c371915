use thiserror::Error;

/// Why a single source row could not be normalized.
///
/// These are row-level failures: the offending row is dropped and counted,
/// and ingestion of the remaining rows continues.
#[derive(Debug, Error, PartialEq)]
pub enum MalformedRecord {
    /// The date field is absent or blank.
    #[error("row is missing the date field '{0}'")]
    MissingDate(&'static str),

    /// The date field carries none of the accepted representations.
    #[error("unparseable date '{0}'")]
    UnparseableDate(String),

    /// The station field is absent or blank; the row cannot be grouped.
    #[error("row is missing the station field '{0}'")]
    MissingStation(&'static str),
}
