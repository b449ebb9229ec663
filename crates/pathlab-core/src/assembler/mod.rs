//! Report assembly.
//!
//! Pipeline: Draft (test selection, results) → Assembler → Store append

mod draft;

pub use draft::*;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{is_valid_price, Report, TestResult};
use crate::store::{LabStore, StoreError};

/// Assembly errors.
#[derive(Error, Debug)]
pub enum AssembleError {
    #[error("Patient not found: {0}")]
    PatientNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub type AssembleResult<T> = Result<T, AssembleError>;

/// Builds reports from a patient reference and selected test results.
pub struct ReportAssembler<'a, S: LabStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: LabStore + ?Sized> ReportAssembler<'a, S> {
    /// Create an assembler over a store.
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Assemble a report dated today (local calendar date) and append it.
    pub fn assemble(
        &mut self,
        patient_id: &str,
        referring_doctor: &str,
        line_items: Vec<TestResult>,
    ) -> AssembleResult<Report> {
        let today = chrono::Local::now().date_naive();
        self.assemble_on(today, patient_id, referring_doctor, line_items)
    }

    /// Assemble a report with an explicit date and append it.
    ///
    /// Input is checked and the patient resolved before anything is written,
    /// so a failed call leaves the store untouched.
    pub fn assemble_on(
        &mut self,
        date: NaiveDate,
        patient_id: &str,
        referring_doctor: &str,
        line_items: Vec<TestResult>,
    ) -> AssembleResult<Report> {
        let referring_doctor = referring_doctor.trim();
        if referring_doctor.is_empty() {
            return Err(AssembleError::InvalidInput(
                "referring doctor must not be empty".to_string(),
            ));
        }
        if line_items.is_empty() {
            return Err(AssembleError::InvalidInput(
                "a report needs at least one test".to_string(),
            ));
        }
        if let Some(item) = line_items.iter().find(|t| !is_valid_price(t.price)) {
            return Err(AssembleError::InvalidInput(format!(
                "price for {} must be a non-negative amount, got {}",
                item.test_name, item.price
            )));
        }

        let patient = match self.store.get_patient(patient_id)? {
            Some(patient) => patient,
            None => {
                tracing::warn!(patient_id, "Report requested for unknown patient");
                return Err(AssembleError::PatientNotFound(patient_id.to_string()));
            }
        };

        let report = Report::for_patient(
            String::new(),
            &patient,
            date,
            referring_doctor.to_string(),
            line_items,
        );
        let report = self.store.append_report(report)?;

        tracing::info!(
            report_id = %report.id,
            patient_id = %report.patient_id,
            tests = report.tests.len(),
            "Report assembled"
        );
        Ok(report)
    }
}
