//! PathLab Core Library
//!
//! Patient registration, test pricing, diagnostic reports and billing for a
//! pathology lab.
//!
//! # Architecture
//!
//! ```text
//!   Register Patient        Price Catalog (T###)
//!        (P###)                    │
//!          │                select tests (copied by value)
//!          │                       │
//!          └──────────┐   ┌────────┘
//!                     ▼   ▼
//!                 [ReportDraft]  results, ranges
//!                       │
//!                ReportAssembler
//!         snapshot name/age/gender, R### id
//!                       │
//!                   LabStore
//!            (MemoryStore | Database)
//!                       │
//!           ┌───────────┴───────────┐
//!           ▼                       ▼
//!      Bill + amount           Patient Portal
//!      in words (lakh)          lookup by id
//! ```
//!
//! # Modules
//!
//! - [`models`]: Domain types (Patient, TestPrice, TestResult, Report)
//! - [`store`]: Storage capability trait and in-memory store
//! - [`db`]: SQLite store
//! - [`assembler`]: Report drafts and assembly
//! - [`lab`]: Facade used by the admin pages and the patient portal
//! - [`export`]: Bills, billing ledger and amount-in-words
//! - [`config`]: Lab settings

pub mod assembler;
pub mod config;
pub mod db;
pub mod export;
pub mod lab;
pub mod models;
pub mod store;

// Re-export commonly used types
pub use assembler::{AssembleError, ReportAssembler, ReportDraft};
pub use config::LabConfig;
pub use db::Database;
pub use export::{amount_to_words, AmountError, Bill, BillingLedger};
pub use lab::{Lab, LabError};
pub use models::{Gender, IdKind, NewPatient, NewTestPrice, Patient, Report, TestPrice, TestResult};
pub use store::{LabStore, MemoryStore};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum PathLabError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Amount too large: {0}")]
    TooLarge(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

impl From<LabError> for PathLabError {
    fn from(e: LabError) -> Self {
        match e {
            LabError::NotFound(msg) => PathLabError::NotFound(msg),
            LabError::InvalidInput(msg) => PathLabError::InvalidInput(msg),
            LabError::Amount(e) => e.into(),
            LabError::Store(e) => PathLabError::DatabaseError(e.to_string()),
        }
    }
}

impl From<AmountError> for PathLabError {
    fn from(e: AmountError) -> Self {
        match e {
            AmountError::TooLarge(_) => PathLabError::TooLarge(e.to_string()),
            AmountError::Invalid(_) => PathLabError::InvalidInput(e.to_string()),
        }
    }
}

impl From<db::DbError> for PathLabError {
    fn from(e: db::DbError) -> Self {
        PathLabError::DatabaseError(e.to_string())
    }
}

impl From<config::ConfigError> for PathLabError {
    fn from(e: config::ConfigError) -> Self {
        PathLabError::ConfigError(e.to_string())
    }
}

impl From<serde_json::Error> for PathLabError {
    fn from(e: serde_json::Error) -> Self {
        PathLabError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for PathLabError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        PathLabError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a lab database at the given path. `config_json` may hold
/// a partial [`LabConfig`]; missing fields use defaults.
#[uniffi::export]
pub fn open_lab(path: String, config_json: Option<String>) -> Result<Arc<PathLabCore>, PathLabError> {
    let config = match config_json {
        Some(json) => LabConfig::from_json_str(&json)?,
        None => LabConfig::default(),
    };
    let db = Database::open(&path)?;
    Ok(Arc::new(PathLabCore {
        lab: Arc::new(Mutex::new(Lab::new(db, config))),
    }))
}

/// Create a lab backed by an in-memory database.
#[uniffi::export]
pub fn open_lab_in_memory() -> Result<Arc<PathLabCore>, PathLabError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(PathLabCore {
        lab: Arc::new(Mutex::new(Lab::new(db, LabConfig::default()))),
    }))
}

/// Spell out an invoice amount (Indian grouping), e.g. "One Lakh Only".
#[uniffi::export]
pub fn amount_in_words(amount: f64) -> Result<String, PathLabError> {
    Ok(amount_to_words(amount)?)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe lab wrapper for FFI.
#[derive(uniffi::Object)]
pub struct PathLabCore {
    lab: Arc<Mutex<Lab<Database>>>,
}

impl std::fmt::Debug for PathLabCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathLabCore").finish_non_exhaustive()
    }
}

#[uniffi::export]
impl PathLabCore {
    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// Register a new patient. `gender` must be Male, Female or Other.
    pub fn register_patient(
        &self,
        name: String,
        age: u32,
        gender: String,
        contact: String,
    ) -> Result<FfiPatient, PathLabError> {
        let gender = gender
            .parse::<Gender>()
            .map_err(|e| PathLabError::InvalidInput(e.to_string()))?;
        let mut lab = self.lab.lock()?;
        let patient = lab.register_patient(NewPatient::new(name, age, gender, contact))?;
        Ok(patient.into())
    }

    pub fn get_patient(&self, patient_id: String) -> Result<FfiPatient, PathLabError> {
        let lab = self.lab.lock()?;
        Ok(lab.patient(&patient_id)?.into())
    }

    pub fn list_patients(&self) -> Result<Vec<FfiPatient>, PathLabError> {
        let lab = self.lab.lock()?;
        Ok(lab.patients()?.into_iter().map(|p| p.into()).collect())
    }

    /// Newest patients first, for the dashboard.
    pub fn recent_patients(&self) -> Result<Vec<FfiPatient>, PathLabError> {
        let lab = self.lab.lock()?;
        Ok(lab.recent_patients()?.into_iter().map(|p| p.into()).collect())
    }

    // =========================================================================
    // Catalog Operations
    // =========================================================================

    pub fn add_test(
        &self,
        name: String,
        normal_range: String,
        price: f64,
    ) -> Result<FfiTestPrice, PathLabError> {
        let mut lab = self.lab.lock()?;
        let test = lab.add_test(NewTestPrice::new(name, normal_range, price))?;
        Ok(test.into())
    }

    pub fn update_test_price(&self, test_id: String, price: f64) -> Result<FfiTestPrice, PathLabError> {
        let mut lab = self.lab.lock()?;
        Ok(lab.update_test_price(&test_id, price)?.into())
    }

    pub fn list_tests(&self) -> Result<Vec<FfiTestPrice>, PathLabError> {
        let lab = self.lab.lock()?;
        Ok(lab.tests()?.into_iter().map(|t| t.into()).collect())
    }

    /// Search the catalog by test name, best match first.
    pub fn search_tests(&self, query: String, limit: u32) -> Result<Vec<FfiTestPrice>, PathLabError> {
        let lab = self.lab.lock()?;
        let matches = lab.search_tests(&query, limit as usize)?;
        Ok(matches.into_iter().map(|m| m.test.into()).collect())
    }

    // =========================================================================
    // Report Operations
    // =========================================================================

    /// Create a report dated today from already-resolved line items.
    pub fn create_report(
        &self,
        patient_id: String,
        referring_doctor: String,
        tests: Vec<FfiTestResult>,
    ) -> Result<FfiReport, PathLabError> {
        let mut lab = self.lab.lock()?;
        let items = tests.into_iter().map(|t| t.into()).collect();
        let report = lab.create_report(&patient_id, &referring_doctor, items)?;
        Ok(report.into())
    }

    pub fn get_report(&self, report_id: String) -> Result<FfiReport, PathLabError> {
        let lab = self.lab.lock()?;
        Ok(lab.report(&report_id)?.into())
    }

    pub fn list_reports(&self) -> Result<Vec<FfiReport>, PathLabError> {
        let lab = self.lab.lock()?;
        Ok(lab.reports()?.into_iter().map(|r| r.into()).collect())
    }

    /// All-reports listing filtered by a search term and an optional
    /// `YYYY-MM-DD` date, newest first.
    pub fn search_reports(
        &self,
        term: String,
        date: Option<String>,
    ) -> Result<Vec<FfiReport>, PathLabError> {
        let date = date
            .map(|d| {
                NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d")
                    .map_err(|e| PathLabError::InvalidInput(format!("date {}: {}", d, e)))
            })
            .transpose()?;
        let lab = self.lab.lock()?;
        Ok(lab
            .search_reports(&term, date)?
            .into_iter()
            .map(|r| r.into())
            .collect())
    }

    /// Patient portal: a report is returned only to its own patient.
    pub fn report_for_patient(
        &self,
        patient_id: String,
        report_id: String,
    ) -> Result<FfiReport, PathLabError> {
        let lab = self.lab.lock()?;
        Ok(lab.report_for_patient(&patient_id, &report_id)?.into())
    }

    pub fn reports_for_patient(&self, patient_id: String) -> Result<Vec<FfiReport>, PathLabError> {
        let lab = self.lab.lock()?;
        Ok(lab
            .reports_for_patient(&patient_id)?
            .into_iter()
            .map(|r| r.into())
            .collect())
    }

    // =========================================================================
    // Billing Operations
    // =========================================================================

    pub fn bill_for_report(&self, report_id: String) -> Result<FfiBill, PathLabError> {
        let lab = self.lab.lock()?;
        Ok(lab.bill_for_report(&report_id)?.into())
    }

    /// Export a report's bill as JSON.
    pub fn export_bill_json(&self, report_id: String) -> Result<String, PathLabError> {
        let lab = self.lab.lock()?;
        Ok(lab.bill_for_report(&report_id)?.to_json()?)
    }

    /// Export the billing ledger as CSV.
    pub fn export_ledger_csv(&self) -> Result<String, PathLabError> {
        let lab = self.lab.lock()?;
        Ok(lab.billing_ledger()?.to_csv())
    }

    /// Sum of all report totals (collection fees excluded).
    pub fn total_revenue(&self) -> Result<f64, PathLabError> {
        let lab = self.lab.lock()?;
        Ok(lab.billing_ledger()?.total_revenue)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub contact: String,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id,
            name: patient.name,
            age: patient.age,
            gender: patient.gender.to_string(),
            contact: patient.contact,
        }
    }
}

/// FFI-safe catalog entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTestPrice {
    pub id: String,
    pub name: String,
    pub normal_range: String,
    pub price: f64,
}

impl From<TestPrice> for FfiTestPrice {
    fn from(test: TestPrice) -> Self {
        Self {
            id: test.id,
            name: test.name,
            normal_range: test.normal_range,
            price: test.price,
        }
    }
}

/// FFI-safe report line.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTestResult {
    pub test_name: String,
    pub result: String,
    pub normal_range: String,
    pub price: f64,
}

impl From<TestResult> for FfiTestResult {
    fn from(test: TestResult) -> Self {
        Self {
            test_name: test.test_name,
            result: test.result,
            normal_range: test.normal_range,
            price: test.price,
        }
    }
}

impl From<FfiTestResult> for TestResult {
    fn from(test: FfiTestResult) -> Self {
        TestResult {
            test_name: test.test_name,
            result: test.result,
            normal_range: test.normal_range,
            price: test.price,
        }
    }
}

/// FFI-safe report.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiReport {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub patient_age: u32,
    pub patient_gender: String,
    /// YYYY-MM-DD
    pub date: String,
    pub referring_doctor: String,
    pub tests: Vec<FfiTestResult>,
    pub file_name: String,
}

impl From<Report> for FfiReport {
    fn from(report: Report) -> Self {
        let file_name = report.file_name();
        Self {
            id: report.id,
            patient_id: report.patient_id,
            patient_name: report.patient_name,
            patient_age: report.patient_age,
            patient_gender: report.patient_gender.to_string(),
            date: report.date.to_string(),
            referring_doctor: report.referring_doctor,
            tests: report.tests.into_iter().map(|t| t.into()).collect(),
            file_name,
        }
    }
}

/// FFI-safe bill line.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiBillLine {
    pub index: u32,
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub amount: f64,
}

/// FFI-safe bill.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiBill {
    pub lab_name: String,
    pub report_id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub patient_age: u32,
    pub patient_gender: String,
    pub referring_doctor: String,
    pub date: String,
    pub lines: Vec<FfiBillLine>,
    pub total: f64,
    pub amount_in_words: String,
    pub file_name: String,
}

impl From<Bill> for FfiBill {
    fn from(bill: Bill) -> Self {
        let file_name = bill.file_name();
        Self {
            lab_name: bill.metadata.lab_name,
            report_id: bill.metadata.report_id,
            patient_id: bill.metadata.patient_id,
            patient_name: bill.metadata.patient_name,
            patient_age: bill.metadata.patient_age,
            patient_gender: bill.metadata.patient_gender.to_string(),
            referring_doctor: bill.metadata.referring_doctor,
            date: bill.metadata.date.to_string(),
            lines: bill
                .lines
                .into_iter()
                .map(|l| FfiBillLine {
                    index: l.index as u32,
                    description: l.description,
                    quantity: l.quantity,
                    unit_price: l.unit_price,
                    amount: l.amount,
                })
                .collect(),
            total: bill.total,
            amount_in_words: bill.amount_in_words,
            file_name,
        }
    }
}
