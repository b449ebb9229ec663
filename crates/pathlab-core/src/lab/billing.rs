//! Bills and the billing ledger.

use super::{Lab, LabResult};
use crate::export::{Bill, BillingLedger};
use crate::store::LabStore;

impl<S: LabStore> Lab<S> {
    /// Invoice for a report, including the configured collection fee.
    pub fn bill_for_report(&self, report_id: &str) -> LabResult<Bill> {
        let report = self.report(report_id)?;
        Ok(Bill::from_report(
            &report,
            &self.config.lab_name,
            self.config.collection_fee,
        )?)
    }

    /// Ledger of all reports for the billing dashboard.
    pub fn billing_ledger(&self) -> LabResult<BillingLedger> {
        let reports = self.store.list_reports()?;
        Ok(BillingLedger::from_reports(&reports))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::LabError;
    use super::*;
    use crate::config::LabConfig;
    use crate::export::AmountError;
    use crate::models::{Gender, NewPatient, TestResult};
    use crate::store::MemoryStore;

    #[test]
    fn test_bill_uses_configured_lab_settings() {
        let config = LabConfig {
            lab_name: "City Diagnostics".to_string(),
            collection_fee: 100.0,
            ..LabConfig::default()
        };
        let mut lab = Lab::new(MemoryStore::new(), config);
        let patient = lab
            .register_patient(NewPatient::new("Farhan", 29, Gender::Male, ""))
            .unwrap();
        let report = lab
            .create_report(&patient.id, "Dr. Self", vec![TestResult::new("CBC", "", "", 1150.0)])
            .unwrap();

        let bill = lab.bill_for_report(&report.id).unwrap();
        assert_eq!(bill.total, 1250.0);
        assert_eq!(bill.amount_in_words, "One Thousand Two Hundred Fifty Only");
        assert_eq!(bill.metadata.lab_name, "City Diagnostics");
    }

    #[test]
    fn test_bill_unknown_report() {
        let lab = memory_lab();
        assert!(matches!(lab.bill_for_report("R001"), Err(LabError::NotFound(_))));
    }

    #[test]
    fn test_bill_too_large() {
        let mut lab = memory_lab();
        let patient = register(&mut lab, "Farhan");
        let report = lab
            .create_report(&patient.id, "Dr. Self", vec![TestResult::new("Panel", "", "", 2_000_000.0)])
            .unwrap();

        let err = lab.bill_for_report(&report.id).unwrap_err();
        assert!(matches!(err, LabError::Amount(AmountError::TooLarge(_))));
    }

    #[test]
    fn test_ledger_revenue() {
        let mut lab = memory_lab();
        let patient = register(&mut lab, "Farhan");
        lab.create_report(&patient.id, "Dr. Self", vec![TestResult::new("CBC", "", "", 300.0)])
            .unwrap();
        lab.create_report(&patient.id, "Dr. Self", vec![TestResult::new("ESR", "", "", 100.0)])
            .unwrap();

        let ledger = lab.billing_ledger().unwrap();
        assert_eq!(ledger.entries.len(), 2);
        assert_eq!(ledger.total_revenue, 400.0);
    }
}
