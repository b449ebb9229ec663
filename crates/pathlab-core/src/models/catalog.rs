//! Test catalog models.

use serde::{Deserialize, Serialize};

/// A priced diagnostic test in the lab catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestPrice {
    /// Sequential identifier (e.g. "T001")
    pub id: String,
    /// Test name (e.g. "Haemoglobin")
    pub name: String,
    /// Reference range printed next to results (free text)
    pub normal_range: String,
    /// Current price in rupees
    pub price: f64,
}

/// A catalog entry that has no identifier yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTestPrice {
    pub name: String,
    pub normal_range: String,
    pub price: f64,
}

impl NewTestPrice {
    pub fn new(name: impl Into<String>, normal_range: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            normal_range: normal_range.into(),
            price,
        }
    }

    pub fn with_id(self, id: String) -> TestPrice {
        TestPrice {
            id,
            name: self.name.trim().to_string(),
            normal_range: self.normal_range.trim().to_string(),
            price: self.price,
        }
    }
}

/// Check that a price is usable: finite and not negative.
pub fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_id() {
        let test = NewTestPrice::new("Blood Sugar (F)", "70-110 mg/dL", 80.0).with_id("T001".into());
        assert_eq!(test.id, "T001");
        assert_eq!(test.name, "Blood Sugar (F)");
        assert_eq!(test.price, 80.0);
    }

    #[test]
    fn test_price_validity() {
        assert!(is_valid_price(0.0));
        assert!(is_valid_price(250.5));
        assert!(!is_valid_price(-1.0));
        assert!(!is_valid_price(f64::NAN));
        assert!(!is_valid_price(f64::INFINITY));
    }
}
