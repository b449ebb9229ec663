//! Domain models for the pathology lab.

mod catalog;
mod ids;
mod patient;
mod report;

pub use catalog::*;
pub use ids::*;
pub use patient::*;
pub use report::*;
