//! SQLite schema definition.

/// Complete database schema for the lab store.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    id TEXT PRIMARY KEY,                         -- P001, P002, ...
    name TEXT NOT NULL,
    age INTEGER NOT NULL CHECK (age >= 0),
    gender TEXT NOT NULL CHECK (gender IN ('Male', 'Female', 'Other')),
    contact TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_patients_name ON patients(name);

-- ============================================================================
-- Test Catalog (price is the only mutable column)
-- ============================================================================

CREATE TABLE IF NOT EXISTS test_catalog (
    id TEXT PRIMARY KEY,                         -- T001, T002, ...
    name TEXT NOT NULL,
    normal_range TEXT NOT NULL DEFAULT '',
    price REAL NOT NULL CHECK (price >= 0),
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- ============================================================================
-- Reports (append-only)
-- ============================================================================

CREATE TABLE IF NOT EXISTS reports (
    id TEXT PRIMARY KEY,                         -- R001, R002, ...
    patient_id TEXT NOT NULL REFERENCES patients(id),
    patient_name TEXT NOT NULL,                  -- snapshot at creation
    patient_age INTEGER NOT NULL,
    patient_gender TEXT NOT NULL,
    report_date TEXT NOT NULL,                   -- YYYY-MM-DD
    referring_doctor TEXT NOT NULL,
    tests TEXT NOT NULL DEFAULT '[]',            -- JSON array of TestResult
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_reports_patient ON reports(patient_id);
CREATE INDEX IF NOT EXISTS idx_reports_date ON reports(report_date);

CREATE TRIGGER IF NOT EXISTS reports_no_update BEFORE UPDATE ON reports
BEGIN
    SELECT RAISE(ABORT, 'Reports are immutable');
END;

-- ============================================================================
-- Identifier Sequences
-- ============================================================================

CREATE TABLE IF NOT EXISTS id_sequences (
    kind TEXT PRIMARY KEY CHECK (kind IN ('patient', 'report', 'test')),
    last_value INTEGER NOT NULL DEFAULT 0
);

INSERT OR IGNORE INTO id_sequences (kind, last_value) VALUES ('patient', 0);
INSERT OR IGNORE INTO id_sequences (kind, last_value) VALUES ('report', 0);
INSERT OR IGNORE INTO id_sequences (kind, last_value) VALUES ('test', 0);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM id_sequences", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn test_reports_immutable() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        conn.execute(
            "INSERT INTO patients (id, name, age, gender) VALUES ('P001', 'Asha', 40, 'Female')",
            [],
        )
        .unwrap();
        conn.execute(
            r#"INSERT INTO reports (id, patient_id, patient_name, patient_age, patient_gender,
                                    report_date, referring_doctor)
               VALUES ('R001', 'P001', 'Asha', 40, 'Female', '2024-01-01', 'Dr. Self')"#,
            [],
        )
        .unwrap();

        let result = conn.execute("UPDATE reports SET patient_name = 'Other' WHERE id = 'R001'", []);
        assert!(result.is_err());
    }

    #[test]
    fn test_gender_check() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let result = conn.execute(
            "INSERT INTO patients (id, name, age, gender) VALUES ('P001', 'Asha', 40, 'Unknown')",
            [],
        );
        assert!(result.is_err());
    }
}
