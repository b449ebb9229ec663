//! Editable report draft, filled in before assembly.

use serde::{Deserialize, Serialize};

use crate::models::{TestPrice, TestResult};

/// Test selection and results for a report that has not been created yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportDraft {
    /// Selected patient
    pub patient_id: Option<String>,
    pub referring_doctor: String,
    /// Selected tests, in the order they were added
    pub tests: Vec<TestResult>,
}

impl ReportDraft {
    /// Start an empty draft with a pre-filled referring doctor.
    pub fn new(referring_doctor: impl Into<String>) -> Self {
        Self {
            patient_id: None,
            referring_doctor: referring_doctor.into(),
            tests: Vec::new(),
        }
    }

    pub fn select_patient(&mut self, patient_id: impl Into<String>) {
        self.patient_id = Some(patient_id.into());
    }

    /// Add a catalog test with a blank result. A test name can only be
    /// selected once; returns `false` for a repeat.
    pub fn add_test(&mut self, test: &TestPrice) -> bool {
        if self.find(&test.name).is_some() {
            return false;
        }
        self.tests.push(TestResult::from_catalog(test));
        true
    }

    /// Remove a selected test by name.
    pub fn remove_test(&mut self, test_name: &str) -> bool {
        let before = self.tests.len();
        self.tests.retain(|t| t.test_name != test_name);
        self.tests.len() != before
    }

    /// Record the observed value for a selected test.
    pub fn set_result(&mut self, test_name: &str, value: impl Into<String>) -> bool {
        match self.find_mut(test_name) {
            Some(test) => {
                test.result = value.into();
                true
            }
            None => false,
        }
    }

    /// Override the copied reference range for a selected test.
    pub fn set_normal_range(&mut self, test_name: &str, value: impl Into<String>) -> bool {
        match self.find_mut(test_name) {
            Some(test) => {
                test.normal_range = value.into();
                true
            }
            None => false,
        }
    }

    /// Patient selected, doctor filled in and at least one test.
    pub fn is_ready(&self) -> bool {
        self.patient_id.is_some()
            && !self.referring_doctor.trim().is_empty()
            && !self.tests.is_empty()
    }

    /// Sum of selected test prices.
    pub fn subtotal(&self) -> f64 {
        self.tests.iter().map(|t| t.price).sum()
    }

    fn find(&self, test_name: &str) -> Option<&TestResult> {
        self.tests.iter().find(|t| t.test_name == test_name)
    }

    fn find_mut(&mut self, test_name: &str) -> Option<&mut TestResult> {
        self.tests.iter_mut().find(|t| t.test_name == test_name)
    }
}
