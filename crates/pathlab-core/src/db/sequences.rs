//! Identifier sequence operations.

use super::{Database, DbError, DbResult};
use crate::models::IdKind;

impl Database {
    /// Advance and return the sequence for a record kind.
    pub fn next_sequence(&self, kind: IdKind) -> DbResult<u64> {
        let value: i64 = self.conn.query_row(
            r#"
            UPDATE id_sequences SET last_value = last_value + 1
            WHERE kind = ?
            RETURNING last_value
            "#,
            [kind.as_str()],
            |row| row.get(0),
        )?;
        u64::try_from(value).map_err(|_| DbError::InvalidData(format!("sequence {}", value)))
    }

    /// Current value of a sequence without advancing it.
    pub fn current_sequence(&self, kind: IdKind) -> DbResult<u64> {
        let value: i64 = self.conn.query_row(
            "SELECT last_value FROM id_sequences WHERE kind = ?",
            [kind.as_str()],
            |row| row.get(0),
        )?;
        u64::try_from(value).map_err(|_| DbError::InvalidData(format!("sequence {}", value)))
    }
}
