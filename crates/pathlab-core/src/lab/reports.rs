//! Report creation and the patient portal lookup.

use chrono::NaiveDate;

use super::{Lab, LabError, LabResult};
use crate::assembler::{ReportAssembler, ReportDraft};
use crate::models::{Report, TestResult};
use crate::store::LabStore;

impl<S: LabStore> Lab<S> {
    /// Create a report dated today.
    pub fn create_report(
        &mut self,
        patient_id: &str,
        referring_doctor: &str,
        line_items: Vec<TestResult>,
    ) -> LabResult<Report> {
        Ok(ReportAssembler::new(&mut self.store).assemble(patient_id, referring_doctor, line_items)?)
    }

    /// Create a report with an explicit date.
    pub fn create_report_on(
        &mut self,
        date: NaiveDate,
        patient_id: &str,
        referring_doctor: &str,
        line_items: Vec<TestResult>,
    ) -> LabResult<Report> {
        Ok(ReportAssembler::new(&mut self.store).assemble_on(
            date,
            patient_id,
            referring_doctor,
            line_items,
        )?)
    }

    /// Start a draft with the configured default referring doctor.
    pub fn new_draft(&self) -> ReportDraft {
        ReportDraft::new(self.config.default_referring_doctor.clone())
    }

    /// Add a catalog test to a draft by id. Returns `false` if the test name
    /// was already selected.
    pub fn add_test_to_draft(&self, draft: &mut ReportDraft, test_id: &str) -> LabResult<bool> {
        let test = self.test(test_id)?;
        Ok(draft.add_test(&test))
    }

    /// Turn a completed draft into a report.
    pub fn submit_draft(&mut self, draft: ReportDraft) -> LabResult<Report> {
        let patient_id = match (&draft.patient_id, draft.tests.is_empty()) {
            (Some(id), false) => id.clone(),
            _ => {
                return Err(LabError::InvalidInput(
                    "select a patient and add at least one test".to_string(),
                ))
            }
        };
        self.create_report(&patient_id, &draft.referring_doctor, draft.tests)
    }

    pub fn report(&self, report_id: &str) -> LabResult<Report> {
        self.store
            .get_report(report_id)?
            .ok_or_else(|| LabError::NotFound(format!("report {}", report_id)))
    }

    /// All reports in creation order.
    pub fn reports(&self) -> LabResult<Vec<Report>> {
        Ok(self.store.list_reports()?)
    }

    /// Portal lookup: the report is returned only if it belongs to the given
    /// patient. The patient id is matched case-insensitively.
    pub fn report_for_patient(&self, patient_id: &str, report_id: &str) -> LabResult<Report> {
        let report = self
            .store
            .get_report(report_id.trim())?
            .filter(|r| r.patient_id.eq_ignore_ascii_case(patient_id.trim()));

        report.ok_or_else(|| {
            tracing::debug!(patient_id, report_id, "Portal lookup found no matching report");
            LabError::NotFound(format!("report {} for patient {}", report_id, patient_id))
        })
    }

    /// A patient's reports, newest first.
    pub fn reports_for_patient(&self, patient_id: &str) -> LabResult<Vec<Report>> {
        let patient_id = patient_id.trim();
        let reports = self
            .store
            .list_reports()?
            .into_iter()
            .filter(|r| r.patient_id.eq_ignore_ascii_case(patient_id))
            .collect();
        Ok(newest_first(reports))
    }

    /// All-reports listing: reports whose patient name, patient id or report
    /// id contains `term` (case-insensitive), optionally limited to one date.
    /// Newest first; an empty term matches everything.
    pub fn search_reports(&self, term: &str, date: Option<NaiveDate>) -> LabResult<Vec<Report>> {
        let term = term.trim().to_lowercase();
        let reports = self
            .store
            .list_reports()?
            .into_iter()
            .filter(|r| r.matches_search(&term))
            .filter(|r| date.map_or(true, |d| r.date == d))
            .collect();
        Ok(newest_first(reports))
    }
}

/// Order reports in creation order as newest first.
fn newest_first(mut reports: Vec<Report>) -> Vec<Report> {
    reports.reverse();
    // Stable, so same-day reports stay newest first.
    reports.sort_by(|a, b| b.date.cmp(&a.date));
    reports
}
