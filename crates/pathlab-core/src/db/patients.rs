//! Patient database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{Gender, Patient};

const PATIENT_COLUMNS: &str = "id, name, age, gender, contact";

impl Database {
    /// Insert a new patient.
    pub fn insert_patient(&self, patient: &Patient) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO patients (id, name, age, gender, contact)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                patient.id,
                patient.name,
                patient.age,
                patient.gender.as_str(),
                patient.contact,
            ],
        )?;
        Ok(())
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, id: &str) -> DbResult<Option<Patient>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {} FROM patients WHERE id = ?", PATIENT_COLUMNS),
                [id],
                PatientRow::from_row,
            )
            .optional()?;

        row.map(TryInto::try_into).transpose()
    }

    /// Search patients by name (prefix match).
    pub fn search_patients(&self, query: &str, limit: usize) -> DbResult<Vec<Patient>> {
        let pattern = format!("{}%", escape_like(query));
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {}
            FROM patients
            WHERE name LIKE ? ESCAPE '\'
            ORDER BY name
            LIMIT ?
            "#,
            PATIENT_COLUMNS
        ))?;

        let rows = stmt.query_map(params![pattern, limit as i64], PatientRow::from_row)?;

        let mut patients = Vec::new();
        for row in rows {
            patients.push(row?.try_into()?);
        }
        Ok(patients)
    }

    /// List all patients in registration order.
    pub fn list_patients(&self) -> DbResult<Vec<Patient>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM patients ORDER BY rowid",
            PATIENT_COLUMNS
        ))?;

        let rows = stmt.query_map([], PatientRow::from_row)?;

        let mut patients = Vec::new();
        for row in rows {
            patients.push(row?.try_into()?);
        }
        Ok(patients)
    }
}

/// Intermediate row struct for database mapping.
struct PatientRow {
    id: String,
    name: String,
    age: u32,
    gender: String,
    contact: String,
}

impl PatientRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            age: row.get(2)?,
            gender: row.get(3)?,
            contact: row.get(4)?,
        })
    }
}

impl TryFrom<PatientRow> for Patient {
    type Error = DbError;

    fn try_from(row: PatientRow) -> Result<Self, Self::Error> {
        let gender = row
            .gender
            .parse::<Gender>()
            .map_err(|e| DbError::InvalidData(e.to_string()))?;

        Ok(Patient {
            id: row.id,
            name: row.name,
            age: row.age,
            gender,
            contact: row.contact,
        })
    }
}

/// Escape `LIKE` wildcards so the query matches literally.
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
