use thiserror::Error;

use crate::prelude::SV;

/// Errors that may rise when fitting, backfilling, reindexing or differencing.
/// Missing tables in a batch are not errors: they are reported as
/// [crate::report::Event::Skipped].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Clock model fit requires at least two usable samples
    #[error("clock fit requires at least 2 samples, got {0}")]
    InsufficientData(usize),
    /// All usable host offsets are identical: slope is undefined
    #[error("clock fit is degenerate: host offsets have no spread")]
    DegenerateFit,
    #[error("reference table \"{0}\" not found")]
    MissingReferenceTable(String),
    /// Reference table rows must be labeled by GPS [hifitime::Epoch]s
    #[error("row #{0} is not labeled by a GPS epoch")]
    NotTimeIndexed(usize),
    #[error("table \"{table}\" is a {kind}: unsupported operation")]
    UnsupportedTableType { table: String, kind: &'static str },
    #[error("missing column \"{0}\"")]
    MissingColumn(String),
    #[error("column \"{column}\" should be {expected}")]
    ColumnType {
        column: String,
        expected: &'static str,
    },
    /// Key column has undefined entries, which cannot become row labels
    #[error("column \"{column}\" is undefined at row #{row}")]
    MissingLabel { column: String, row: usize },
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
    #[error("invalid observation type \"{0}\"")]
    InvalidObservationType(String),
    #[error("empty table")]
    EmptyTable,
    #[error("unknown satellite {0}")]
    UnknownSatellite(SV),
    #[error("shape mismatch: expecting {expected:?}, got {found:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    #[error("length mismatch: expecting {expected}, got {found}")]
    LengthMismatch { expected: usize, found: usize },
}
