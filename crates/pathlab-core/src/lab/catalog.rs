//! Test catalog pricing and lookup.
//!
//! Name search ranks entries so the admin can pick a test while typing:
//! - Prefix or substring hit: 1.0
//! - Otherwise: Jaro-Winkler 60% + normalized Levenshtein 40%

use serde::{Deserialize, Serialize};
use strsim::{jaro_winkler, normalized_levenshtein};

use super::{Lab, LabError, LabResult};
use crate::models::{is_valid_price, IdKind, NewTestPrice, TestPrice};
use crate::store::LabStore;

/// Minimum similarity for a fuzzy (non-substring) hit.
const MIN_SIMILARITY: f64 = 0.70;

/// A catalog entry with its search score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestMatch {
    pub test: TestPrice,
    /// 0.0 - 1.0
    pub score: f64,
}

impl<S: LabStore> Lab<S> {
    /// Add a catalog entry and assign the next `T###` id.
    pub fn add_test(&mut self, test: NewTestPrice) -> LabResult<TestPrice> {
        if test.name.trim().is_empty() {
            return Err(LabError::InvalidInput("test name must not be empty".to_string()));
        }
        check_price(test.price)?;

        let id = self.store.next_id(IdKind::Test)?;
        let test = test.with_id(id);
        self.store.insert_test(&test)?;

        tracing::info!(test_id = %test.id, price = test.price, "Test added to catalog");
        Ok(test)
    }

    /// Change the current price of a test. Existing reports keep the price
    /// they were created with.
    pub fn update_test_price(&mut self, test_id: &str, price: f64) -> LabResult<TestPrice> {
        check_price(price)?;

        let updated = self
            .store
            .update_test_price(test_id, price)?
            .ok_or_else(|| LabError::NotFound(format!("test {}", test_id)))?;

        tracing::info!(test_id, price, "Test price updated");
        Ok(updated)
    }

    pub fn test(&self, test_id: &str) -> LabResult<TestPrice> {
        self.store
            .get_test(test_id)?
            .ok_or_else(|| LabError::NotFound(format!("test {}", test_id)))
    }

    /// The whole catalog in creation order.
    pub fn tests(&self) -> LabResult<Vec<TestPrice>> {
        Ok(self.store.list_tests()?)
    }

    /// Catalog entries whose name resembles `query`, best first.
    pub fn search_tests(&self, query: &str, limit: usize) -> LabResult<Vec<TestMatch>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let mut matches: Vec<TestMatch> = self
            .store
            .list_tests()?
            .into_iter()
            .map(|test| {
                let score = score_test_name(&test.name, &query);
                TestMatch { test, score }
            })
            .filter(|m| m.score >= MIN_SIMILARITY)
            .collect();

        // Stable sort keeps catalog order among equal scores.
        matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        matches.truncate(limit);
        Ok(matches)
    }
}

fn check_price(price: f64) -> LabResult<()> {
    if is_valid_price(price) {
        Ok(())
    } else {
        Err(LabError::InvalidInput(format!(
            "price must be a non-negative amount, got {}",
            price
        )))
    }
}

/// Score a catalog name against a lowercased query (0.0 - 1.0).
fn score_test_name(name: &str, query: &str) -> f64 {
    let name_lower = name.to_lowercase();
    if name_lower.contains(query) {
        return 1.0;
    }
    jaro_winkler(query, &name_lower) * 0.6 + normalized_levenshtein(query, &name_lower) * 0.4
}
