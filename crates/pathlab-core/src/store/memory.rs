//! In-memory store. Contents are lost when the value is dropped.

use std::collections::HashMap;

use super::{LabStore, StoreError, StoreResult};
use crate::models::{IdKind, Patient, Report, TestPrice};

/// Vector-backed store with per-kind id counters.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    patients: Vec<Patient>,
    tests: Vec<TestPrice>,
    reports: Vec<Report>,
    sequences: HashMap<IdKind, u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reports held.
    pub fn report_count(&self) -> usize {
        self.reports.len()
    }
}

impl LabStore for MemoryStore {
    fn get_patient(&self, id: &str) -> StoreResult<Option<Patient>> {
        Ok(self.patients.iter().find(|p| p.id == id).cloned())
    }

    fn list_patients(&self) -> StoreResult<Vec<Patient>> {
        Ok(self.patients.clone())
    }

    fn insert_patient(&mut self, patient: &Patient) -> StoreResult<()> {
        if self.patients.iter().any(|p| p.id == patient.id) {
            return Err(StoreError::Duplicate(patient.id.clone()));
        }
        self.patients.push(patient.clone());
        Ok(())
    }

    fn get_test(&self, id: &str) -> StoreResult<Option<TestPrice>> {
        Ok(self.tests.iter().find(|t| t.id == id).cloned())
    }

    fn list_tests(&self) -> StoreResult<Vec<TestPrice>> {
        Ok(self.tests.clone())
    }

    fn insert_test(&mut self, test: &TestPrice) -> StoreResult<()> {
        if self.tests.iter().any(|t| t.id == test.id) {
            return Err(StoreError::Duplicate(test.id.clone()));
        }
        self.tests.push(test.clone());
        Ok(())
    }

    fn update_test_price(&mut self, id: &str, price: f64) -> StoreResult<Option<TestPrice>> {
        Ok(self.tests.iter_mut().find(|t| t.id == id).map(|t| {
            t.price = price;
            t.clone()
        }))
    }

    fn get_report(&self, id: &str) -> StoreResult<Option<Report>> {
        Ok(self.reports.iter().find(|r| r.id == id).cloned())
    }

    fn list_reports(&self) -> StoreResult<Vec<Report>> {
        Ok(self.reports.clone())
    }

    fn insert_report(&mut self, report: &Report) -> StoreResult<()> {
        if self.reports.iter().any(|r| r.id == report.id) {
            return Err(StoreError::Duplicate(report.id.clone()));
        }
        self.reports.push(report.clone());
        Ok(())
    }

    fn append_report(&mut self, mut report: Report) -> StoreResult<Report> {
        let sequence = self.sequences.get(&IdKind::Report).copied().unwrap_or(0) + 1;
        report.id = IdKind::Report.format(sequence);
        self.insert_report(&report)?;
        self.sequences.insert(IdKind::Report, sequence);
        Ok(report)
    }

    fn next_id(&mut self, kind: IdKind) -> StoreResult<String> {
        let sequence = self.sequences.entry(kind).or_insert(0);
        *sequence += 1;
        Ok(kind.format(*sequence))
    }
}
