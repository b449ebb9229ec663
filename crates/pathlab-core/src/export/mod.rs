//! Billing export and invoice formatting.

mod billing;
mod words;

pub use billing::*;
pub use words::*;
