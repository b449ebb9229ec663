//! Report models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::catalog::TestPrice;
use super::patient::{Gender, Patient};

/// One test within a report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestResult {
    pub test_name: String,
    /// Observed value (blank until filled in)
    pub result: String,
    /// Reference range, copied from the catalog and editable afterwards
    pub normal_range: String,
    /// Price at selection time
    pub price: f64,
}

impl TestResult {
    /// Select a catalog test. Name, range and price are copied by value so
    /// later catalog edits do not reach existing reports.
    pub fn from_catalog(test: &TestPrice) -> Self {
        Self {
            test_name: test.name.clone(),
            result: String::new(),
            normal_range: test.normal_range.clone(),
            price: test.price,
        }
    }

    pub fn new(
        test_name: impl Into<String>,
        result: impl Into<String>,
        normal_range: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            test_name: test_name.into(),
            result: result.into(),
            normal_range: normal_range.into(),
            price,
        }
    }

    /// Whether an observed value has been entered.
    pub fn has_result(&self) -> bool {
        !self.result.trim().is_empty()
    }
}

/// A finalized diagnostic report (immutable once created).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    /// Sequential identifier (e.g. "R001")
    pub id: String,
    pub patient_id: String,
    /// Patient name at creation time
    pub patient_name: String,
    /// Patient age at creation time
    pub patient_age: u32,
    /// Patient gender at creation time
    pub patient_gender: Gender,
    /// Creation date
    pub date: NaiveDate,
    /// Referring doctor
    pub referring_doctor: String,
    /// Ordered test results
    pub tests: Vec<TestResult>,
}

impl Report {
    /// Build a report, snapshotting the patient's current demographics.
    pub fn for_patient(
        id: String,
        patient: &Patient,
        date: NaiveDate,
        referring_doctor: String,
        tests: Vec<TestResult>,
    ) -> Self {
        Self {
            id,
            patient_id: patient.id.clone(),
            patient_name: patient.name.clone(),
            patient_age: patient.age,
            patient_gender: patient.gender,
            date,
            referring_doctor,
            tests,
        }
    }

    /// Sum of test prices (excludes any collection fee).
    pub fn tests_total(&self) -> f64 {
        self.tests.iter().map(|t| t.price).sum()
    }

    /// Count of tests still missing an observed value.
    pub fn pending_result_count(&self) -> usize {
        self.tests.iter().filter(|t| !t.has_result()).count()
    }

    /// File name used when the report is printed.
    pub fn file_name(&self) -> String {
        format!("Report-{}-{}.pdf", self.id, self.patient_id)
    }

    /// Whether the patient name, patient id or report id contains `term`
    /// (already lowercased).
    pub fn matches_search(&self, term: &str) -> bool {
        self.patient_name.to_lowercase().contains(term)
            || self.patient_id.to_lowercase().contains(term)
            || self.id.to_lowercase().contains(term)
    }
}
