//! Quote Model
//!
//! A quote is a non-binding price estimate: same snapshot discipline as an
//! order, plus a human-facing reference number and a validity window.

use serde::{Deserialize, Serialize};

use crate::cart::LineItem;
use crate::models::customer::Customer;
use crate::models::order::LineItemSnapshot;

/// Reference number prefix, e.g. `GT-2026-0001`
pub const QUOTE_REF_PREFIX: &str = "GT";

/// Default quote validity window in days
pub const DEFAULT_QUOTE_VALIDITY_DAYS: i64 = 30;

/// Quote lifecycle status
///
/// `PENDING` is the only non-terminal state. An expired quote can never be
/// approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Expired,
}

impl QuoteStatus {
    /// Whether this status has no outgoing transitions
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Quote state machine: pending → {approved, rejected, expired}
    pub fn can_transition_to(&self, next: QuoteStatus) -> bool {
        match self {
            Self::Pending => matches!(next, Self::Approved | Self::Rejected | Self::Expired),
            _ => false,
        }
    }

    /// Status name as serialized on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Expired => "EXPIRED",
        }
    }
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A submitted quote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    pub id: String,
    /// `GT-<year>-<seq:04>`, unique, sequence scoped per calendar year
    pub reference_number: String,
    pub items: Vec<LineItemSnapshot>,
    pub customer: Customer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub subtotal: f64,
    pub total: f64,
    pub currency: String,
    pub status: QuoteStatus,
    /// Epoch milliseconds (UTC), immutable
    pub created_at: i64,
    /// created_at + validity window; approval past this fails
    pub expires_at: i64,
    /// Refreshed on every status change
    pub last_modified_at: i64,
}

impl Quote {
    /// Whether the validity window has passed at the given instant
    pub fn is_expired_at(&self, now_millis: i64) -> bool {
        now_millis > self.expires_at
    }
}

/// Format a reference number from year and per-year sequence
pub fn format_reference(year: i32, sequence: u64) -> String {
    format!("{}-{}-{:04}", QUOTE_REF_PREFIX, year, sequence)
}

// ============================================================================
// API payloads
// ============================================================================

/// Create quote request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuoteRequest {
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub customer: Customer,
    pub comments: Option<String>,
}

/// Create quote response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuoteResponse {
    pub quote_id: String,
    pub reference_number: String,
    pub message: String,
}

/// Status update request (quotes)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateQuoteStatusRequest {
    pub status: QuoteStatus,
}
