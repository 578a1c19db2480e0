//! Checkout errors
//!
//! Typed results crossing the checkout boundary so callers can pattern-match
//! and pick an HTTP status without inspecting message text.

use shared::error::{AppError, ErrorCode};
use shared::pricing::PricingError;
use thiserror::Error;

use crate::store::StoreError;

/// Checkout errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckoutError {
    /// All-or-nothing required-field check failed
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// A line item carries a non-positive or out-of-range quantity
    #[error("invalid quantity {quantity} for item {item_id}")]
    InvalidQuantity { item_id: String, quantity: i32 },

    /// A monetary input is negative, non-finite, or out of range
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Customer email is present but not syntactically valid
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("order not found: {0}")]
    OrderNotFound(String),

    #[error("quote not found: {0}")]
    QuoteNotFound(String),

    /// Illegal status transition; caller must inspect the current status
    #[error("illegal status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// Quote validity window has passed
    #[error("quote has expired: {0}")]
    QuoteExpired(String),
}

/// Result type for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;

impl From<PricingError> for CheckoutError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::InvalidAmount(msg) => Self::InvalidAmount(msg),
        }
    }
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::MissingFields(fields) => AppError::with_message(
                ErrorCode::ValidationFailed,
                format!("missing required fields: {}", fields.join(", ")),
            )
            .with_detail("missing_fields", fields),
            CheckoutError::InvalidQuantity { item_id, quantity } => AppError::with_message(
                ErrorCode::InvalidQuantity,
                format!("invalid quantity {} for item {}", quantity, item_id),
            )
            .with_detail("item_id", item_id),
            CheckoutError::InvalidAmount(msg) => {
                AppError::with_message(ErrorCode::InvalidAmount, msg)
            }
            CheckoutError::InvalidEmail(email) => AppError::with_message(
                ErrorCode::ValidationFailed,
                format!("invalid email address: {}", email),
            )
            .with_detail("field", "customer.email"),
            CheckoutError::OrderNotFound(id) => AppError::with_message(
                ErrorCode::OrderNotFound,
                format!("Order {} not found", id),
            )
            .with_detail("id", id),
            CheckoutError::QuoteNotFound(id) => AppError::with_message(
                ErrorCode::QuoteNotFound,
                format!("Quote {} not found", id),
            )
            .with_detail("id", id),
            CheckoutError::InvalidTransition { from, to } => AppError::with_message(
                ErrorCode::InvalidStatusTransition,
                format!("illegal status transition: {} -> {}", from, to),
            )
            .with_detail("from", from)
            .with_detail("to", to),
            CheckoutError::QuoteExpired(id) => AppError::with_message(
                ErrorCode::QuoteExpired,
                format!("Quote {} has expired", id),
            )
            .with_detail("id", id),
        }
    }
}

impl CheckoutError {
    /// Lift a store error into a checkout error for the order paths
    pub(crate) fn from_order_store(err: StoreError, id: &str) -> Self {
        match err {
            StoreError::NotFound(_) => Self::OrderNotFound(id.to_string()),
            StoreError::InvalidTransition { from, to } => Self::InvalidTransition { from, to },
            StoreError::Expired(_) => Self::QuoteExpired(id.to_string()),
            StoreError::Validation(msg) => Self::InvalidAmount(msg),
        }
    }

    /// Lift a store error into a checkout error for the quote paths
    pub(crate) fn from_quote_store(err: StoreError, id: &str) -> Self {
        match err {
            StoreError::NotFound(_) => Self::QuoteNotFound(id.to_string()),
            StoreError::InvalidTransition { from, to } => Self::InvalidTransition { from, to },
            StoreError::Expired(_) => Self::QuoteExpired(id.to_string()),
            StoreError::Validation(msg) => Self::InvalidAmount(msg),
        }
    }
}
