//! Lab facade: the operations behind the admin pages and the patient portal.

mod billing;
mod catalog;
mod patients;
mod reports;

pub use catalog::*;

use thiserror::Error;

use crate::assembler::AssembleError;
use crate::config::LabConfig;
use crate::export::AmountError;
use crate::store::{LabStore, StoreError};

/// Lab operation errors.
#[derive(Error, Debug)]
pub enum LabError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Amount error: {0}")]
    Amount(#[from] AmountError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<AssembleError> for LabError {
    fn from(e: AssembleError) -> Self {
        match e {
            AssembleError::PatientNotFound(id) => LabError::NotFound(format!("patient {}", id)),
            AssembleError::InvalidInput(msg) => LabError::InvalidInput(msg),
            AssembleError::Store(e) => LabError::Store(e),
        }
    }
}

pub type LabResult<T> = Result<T, LabError>;

/// A lab backed by some store.
pub struct Lab<S: LabStore> {
    store: S,
    config: LabConfig,
}

impl<S: LabStore> Lab<S> {
    pub fn new(store: S, config: LabConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &LabConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
