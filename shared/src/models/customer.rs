//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer details attached to an order or quote
///
/// Immutable once embedded in a submission; only that submission references
/// it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address_line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
}

impl Customer {
    /// Required fields that are empty or blank, in declaration order.
    ///
    /// Mirrors the all-or-nothing required-field check: the caller collects
    /// these into a single validation error instead of failing one at a time.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.first_name.trim().is_empty() {
            missing.push("customer.first_name");
        }
        if self.last_name.trim().is_empty() {
            missing.push("customer.last_name");
        }
        if self.email.trim().is_empty() {
            missing.push("customer.email");
        }
        if self.phone.trim().is_empty() {
            missing.push("customer.phone");
        }
        missing
    }
}
