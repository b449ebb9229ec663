//! Report database operations.

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{Gender, Report};

const REPORT_COLUMNS: &str = "id, patient_id, patient_name, patient_age, patient_gender, \
                              report_date, referring_doctor, tests";

const DATE_FORMAT: &str = "%Y-%m-%d";

impl Database {
    /// Append a report. Reports are never updated afterwards.
    pub fn insert_report(&self, report: &Report) -> DbResult<()> {
        let tests_json = serde_json::to_string(&report.tests)?;

        self.conn.execute(
            r#"
            INSERT INTO reports (
                id, patient_id, patient_name, patient_age, patient_gender,
                report_date, referring_doctor, tests
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                report.id,
                report.patient_id,
                report.patient_name,
                report.patient_age,
                report.patient_gender.as_str(),
                report.date.format(DATE_FORMAT).to_string(),
                report.referring_doctor,
                tests_json,
            ],
        )?;
        Ok(())
    }

    /// Get a report by ID.
    pub fn get_report(&self, id: &str) -> DbResult<Option<Report>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {} FROM reports WHERE id = ?", REPORT_COLUMNS),
                [id],
                ReportRow::from_row,
            )
            .optional()?;

        row.map(TryInto::try_into).transpose()
    }

    /// List all reports in creation order.
    pub fn list_reports(&self) -> DbResult<Vec<Report>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM reports ORDER BY rowid", REPORT_COLUMNS))?;

        let rows = stmt.query_map([], ReportRow::from_row)?;

        let mut reports = Vec::new();
        for row in rows {
            reports.push(row?.try_into()?);
        }
        Ok(reports)
    }

    /// List reports for one patient, newest first.
    pub fn list_reports_for_patient(&self, patient_id: &str) -> DbResult<Vec<Report>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {}
            FROM reports
            WHERE patient_id = ?
            ORDER BY report_date DESC, rowid DESC
            "#,
            REPORT_COLUMNS
        ))?;

        let rows = stmt.query_map([patient_id], ReportRow::from_row)?;

        let mut reports = Vec::new();
        for row in rows {
            reports.push(row?.try_into()?);
        }
        Ok(reports)
    }
}

/// Intermediate row struct for database mapping.
struct ReportRow {
    id: String,
    patient_id: String,
    patient_name: String,
    patient_age: u32,
    patient_gender: String,
    report_date: String,
    referring_doctor: String,
    tests: String,
}

impl ReportRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            patient_id: row.get(1)?,
            patient_name: row.get(2)?,
            patient_age: row.get(3)?,
            patient_gender: row.get(4)?,
            report_date: row.get(5)?,
            referring_doctor: row.get(6)?,
            tests: row.get(7)?,
        })
    }
}

impl TryFrom<ReportRow> for Report {
    type Error = DbError;

    fn try_from(row: ReportRow) -> Result<Self, Self::Error> {
        let patient_gender = row
            .patient_gender
            .parse::<Gender>()
            .map_err(|e| DbError::InvalidData(e.to_string()))?;
        let date = NaiveDate::parse_from_str(&row.report_date, DATE_FORMAT)
            .map_err(|e| DbError::InvalidData(format!("report date {}: {}", row.report_date, e)))?;

        Ok(Report {
            id: row.id,
            patient_id: row.patient_id,
            patient_name: row.patient_name,
            patient_age: row.patient_age,
            patient_gender,
            date,
            referring_doctor: row.referring_doctor,
            tests: serde_json::from_str(&row.tests)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewPatient, Patient, TestResult};

    fn setup_db() -> (Database, Patient) {
        let db = Database::open_in_memory().unwrap();
        let patient = NewPatient::new("Pooja", 26, Gender::Female, "").with_id("P001".into());
        db.insert_patient(&patient).unwrap();
        (db, patient)
    }

    fn make_report(id: &str, patient: &Patient, day: u32) -> Report {
        Report::for_patient(
            id.into(),
            patient,
            NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            "Dr. A. Singh".into(),
            vec![
                TestResult::new("TSH", "2.1", "0.4-4.0 mIU/L", 350.0),
                TestResult::new("T3", "", "80-200 ng/dL", 200.0),
            ],
        )
    }

    #[test]
    fn test_insert_and_get() {
        let (db, patient) = setup_db();

        let report = make_report("R001", &patient, 1);
        db.insert_report(&report).unwrap();

        let retrieved = db.get_report("R001").unwrap().unwrap();
        assert_eq!(retrieved, report);
    }

    #[test]
    fn test_unknown_patient_rejected() {
        let (db, _) = setup_db();

        let ghost = NewPatient::new("Ghost", 1, Gender::Other, "").with_id("P404".into());
        let report = make_report("R001", &ghost, 1);
        assert!(db.insert_report(&report).is_err());
    }

    #[test]
    fn test_reports_for_patient_newest_first() {
        let (db, patient) = setup_db();

        db.insert_report(&make_report("R001", &patient, 1)).unwrap();
        db.insert_report(&make_report("R002", &patient, 9)).unwrap();
        db.insert_report(&make_report("R003", &patient, 4)).unwrap();

        let ids: Vec<String> = db
            .list_reports_for_patient("P001")
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["R002", "R003", "R001"]);

        assert!(db.list_reports_for_patient("P002").unwrap().is_empty());
    }
}
