//! Storage capability used by the lab core.
//!
//! The assembler and the [`Lab`](crate::lab::Lab) facade only talk to a
//! [`LabStore`]; the in-memory [`MemoryStore`] and the SQLite
//! [`Database`](crate::db::Database) both implement it.

mod memory;

pub use memory::*;

use thiserror::Error;

use crate::db::DbError;
use crate::models::{IdKind, Patient, Report, TestPrice};

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Duplicate id: {0}")]
    Duplicate(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence operations for patients, the test catalog and reports.
pub trait LabStore {
    fn get_patient(&self, id: &str) -> StoreResult<Option<Patient>>;

    /// All patients in registration order.
    fn list_patients(&self) -> StoreResult<Vec<Patient>>;

    fn insert_patient(&mut self, patient: &Patient) -> StoreResult<()>;

    fn get_test(&self, id: &str) -> StoreResult<Option<TestPrice>>;

    /// All catalog entries in creation order.
    fn list_tests(&self) -> StoreResult<Vec<TestPrice>>;

    fn insert_test(&mut self, test: &TestPrice) -> StoreResult<()>;

    /// Set a new price. Returns the updated entry, or `None` if the id is unknown.
    fn update_test_price(&mut self, id: &str, price: f64) -> StoreResult<Option<TestPrice>>;

    fn get_report(&self, id: &str) -> StoreResult<Option<Report>>;

    /// All reports in creation order.
    fn list_reports(&self) -> StoreResult<Vec<Report>>;

    fn insert_report(&mut self, report: &Report) -> StoreResult<()>;

    /// Stamp the next report id on `report` and append it. The id is only
    /// consumed when the append succeeds.
    fn append_report(&mut self, report: Report) -> StoreResult<Report>;

    /// Reserve the next identifier for a record kind. Never reissues an id.
    fn next_id(&mut self, kind: IdKind) -> StoreResult<String>;
}
