//! Human-readable record identifiers.

use serde::{Deserialize, Serialize};

/// Minimum number of digits after the prefix.
const ID_WIDTH: usize = 3;

/// Kind of record an identifier belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum IdKind {
    Patient,
    Report,
    Test,
}

impl IdKind {
    pub const ALL: [IdKind; 3] = [IdKind::Patient, IdKind::Report, IdKind::Test];

    /// Single-letter prefix used in identifiers.
    pub fn prefix(self) -> char {
        match self {
            IdKind::Patient => 'P',
            IdKind::Report => 'R',
            IdKind::Test => 'T',
        }
    }

    /// Stable key for persisted sequences.
    pub fn as_str(self) -> &'static str {
        match self {
            IdKind::Patient => "patient",
            IdKind::Report => "report",
            IdKind::Test => "test",
        }
    }

    /// Format a sequence number as an identifier (e.g. `P001`, `R1000`).
    pub fn format(self, sequence: u64) -> String {
        format!("{}{:0width$}", self.prefix(), sequence, width = ID_WIDTH)
    }
}
