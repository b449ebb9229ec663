//! [`LabStore`] backed by SQLite.

use super::{Database, DbError};
use crate::models::{IdKind, Patient, Report, TestPrice};
use crate::store::{LabStore, StoreError, StoreResult};

/// Map a primary-key collision to [`StoreError::Duplicate`], like the
/// in-memory store reports it.
fn insert_error(e: DbError, id: &str) -> StoreError {
    let duplicate = matches!(
        &e,
        DbError::Sqlite(rusqlite::Error::SqliteFailure(err, _))
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    );
    if duplicate {
        StoreError::Duplicate(id.to_string())
    } else {
        StoreError::Database(e)
    }
}

impl LabStore for Database {
    fn get_patient(&self, id: &str) -> StoreResult<Option<Patient>> {
        Ok(Database::get_patient(self, id)?)
    }

    fn list_patients(&self) -> StoreResult<Vec<Patient>> {
        Ok(Database::list_patients(self)?)
    }

    fn insert_patient(&mut self, patient: &Patient) -> StoreResult<()> {
        Database::insert_patient(self, patient).map_err(|e| insert_error(e, &patient.id))
    }

    fn get_test(&self, id: &str) -> StoreResult<Option<TestPrice>> {
        Ok(self.get_test_price(id)?)
    }

    fn list_tests(&self) -> StoreResult<Vec<TestPrice>> {
        Ok(self.list_test_prices()?)
    }

    fn insert_test(&mut self, test: &TestPrice) -> StoreResult<()> {
        self.insert_test_price(test).map_err(|e| insert_error(e, &test.id))
    }

    fn update_test_price(&mut self, id: &str, price: f64) -> StoreResult<Option<TestPrice>> {
        Ok(Database::update_test_price(self, id, price)?)
    }

    fn get_report(&self, id: &str) -> StoreResult<Option<Report>> {
        Ok(Database::get_report(self, id)?)
    }

    fn list_reports(&self) -> StoreResult<Vec<Report>> {
        Ok(Database::list_reports(self)?)
    }

    fn insert_report(&mut self, report: &Report) -> StoreResult<()> {
        Database::insert_report(self, report).map_err(|e| insert_error(e, &report.id))
    }

    fn append_report(&mut self, mut report: Report) -> StoreResult<Report> {
        let tx = self.transaction()?;

        report.id = IdKind::Report.format(self.next_sequence(IdKind::Report)?);
        Database::insert_report(&*self, &report).map_err(|e| insert_error(e, &report.id))?;

        tx.commit().map_err(DbError::from)?;
        Ok(report)
    }

    fn next_id(&mut self, kind: IdKind) -> StoreResult<String> {
        Ok(kind.format(self.next_sequence(kind)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, NewPatient, NewTestPrice, TestResult};
    use chrono::NaiveDate;

    fn report_for(patient: &Patient) -> Report {
        Report::for_patient(
            String::new(),
            patient,
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            "Dr. Self".into(),
            vec![TestResult::new("ESR", "10", "0-20 mm/hr", 100.0)],
        )
    }

    #[test]
    fn test_store_ids_from_sequences() {
        let mut db = Database::open_in_memory().unwrap();
        let store: &mut dyn LabStore = &mut db;

        assert_eq!(store.next_id(IdKind::Report).unwrap(), "R001");
        assert_eq!(store.next_id(IdKind::Report).unwrap(), "R002");
        assert_eq!(store.next_id(IdKind::Test).unwrap(), "T001");
    }

    #[test]
    fn test_store_round_trip_patient() {
        let mut db = Database::open_in_memory().unwrap();
        let patient = NewPatient::new("Deepak", 60, Gender::Male, "").with_id("P001".into());

        LabStore::insert_patient(&mut db, &patient).unwrap();
        assert_eq!(LabStore::get_patient(&db, "P001").unwrap(), Some(patient));
    }

    #[test]
    fn test_duplicate_ids_map_to_duplicate() {
        let mut db = Database::open_in_memory().unwrap();
        let patient = NewPatient::new("Deepak", 60, Gender::Male, "").with_id("P001".into());
        LabStore::insert_patient(&mut db, &patient).unwrap();

        let err = LabStore::insert_patient(&mut db, &patient).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(id) if id == "P001"));

        let test = NewTestPrice::new("ESR", "", 100.0).with_id("T001".into());
        LabStore::insert_test(&mut db, &test).unwrap();
        let err = LabStore::insert_test(&mut db, &test).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(id) if id == "T001"));

        let report = db.append_report(report_for(&patient)).unwrap();
        let err = LabStore::insert_report(&mut db, &report).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(id) if id == "R001"));
    }

    #[test]
    fn test_check_violation_is_not_duplicate() {
        let mut db = Database::open_in_memory().unwrap();
        let test = NewTestPrice::new("ESR", "", -1.0).with_id("T001".into());

        let err = LabStore::insert_test(&mut db, &test).unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[test]
    fn test_failed_append_rolls_back_sequence() {
        let mut db = Database::open_in_memory().unwrap();
        let ghost = NewPatient::new("Nobody", 1, Gender::Other, "").with_id("P404".into());

        // Foreign key on patient_id fails the insert after the id is drawn.
        assert!(db.append_report(report_for(&ghost)).is_err());
        assert_eq!(db.current_sequence(IdKind::Report).unwrap(), 0);
        assert!(LabStore::list_reports(&db).unwrap().is_empty());

        let patient = NewPatient::new("Deepak", 60, Gender::Male, "").with_id("P001".into());
        LabStore::insert_patient(&mut db, &patient).unwrap();
        let report = db.append_report(report_for(&patient)).unwrap();
        assert_eq!(report.id, "R001");
        assert_eq!(db.get_report("R001").unwrap(), Some(report));
    }
}
