//! Patient registration and listing.

use super::{Lab, LabError, LabResult};
use crate::models::{IdKind, NewPatient, Patient};
use crate::store::LabStore;

impl<S: LabStore> Lab<S> {
    /// Register a patient and assign the next `P###` id.
    pub fn register_patient(&mut self, patient: NewPatient) -> LabResult<Patient> {
        if patient.name.trim().is_empty() {
            return Err(LabError::InvalidInput("patient name must not be empty".to_string()));
        }

        let id = self.store.next_id(IdKind::Patient)?;
        let patient = patient.with_id(id);
        self.store.insert_patient(&patient)?;

        tracing::info!(patient_id = %patient.id, "Patient registered");
        Ok(patient)
    }

    pub fn patient(&self, id: &str) -> LabResult<Patient> {
        self.store
            .get_patient(id)?
            .ok_or_else(|| LabError::NotFound(format!("patient {}", id)))
    }

    /// All patients in registration order.
    pub fn patients(&self) -> LabResult<Vec<Patient>> {
        Ok(self.store.list_patients()?)
    }

    /// Newest patients first, capped at the configured dashboard limit.
    pub fn recent_patients(&self) -> LabResult<Vec<Patient>> {
        let mut patients = self.store.list_patients()?;
        patients.reverse();
        patients.truncate(self.config.recent_patient_limit);
        Ok(patients)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::models::Gender;

    #[test]
    fn test_register_assigns_sequential_ids() {
        let mut lab = memory_lab();
        let first = register(&mut lab, "Aarav");
        let second = register(&mut lab, "Diya");

        assert_eq!(first.id, "P001");
        assert_eq!(second.id, "P002");
        assert_eq!(lab.patient("P002").unwrap().name, "Diya");
    }

    #[test]
    fn test_register_rejects_blank_name() {
        let mut lab = memory_lab();
        let err = lab
            .register_patient(NewPatient::new("  ", 20, Gender::Other, ""))
            .unwrap_err();

        assert!(matches!(err, LabError::InvalidInput(_)));
        assert!(lab.patients().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_patient() {
        let lab = memory_lab();
        assert!(matches!(lab.patient("P001"), Err(LabError::NotFound(_))));
    }

    #[test]
    fn test_recent_patients_newest_first() {
        let mut lab = memory_lab();
        for i in 1..=7 {
            register(&mut lab, &format!("Patient {}", i));
        }

        let ids: Vec<String> = lab.recent_patients().unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["P007", "P006", "P005", "P004", "P003"]);
    }
}
