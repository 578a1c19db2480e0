//! In-memory keyed stores
//!
//! Indexed stores (hash map by id) behind a plain get/list/create/update/
//! delete contract. The checkout core is storage-agnostic and never relies
//! on positional semantics; swapping these for a durable table abstraction
//! must not touch any caller.
//!
//! Status mutation is the one correctness-critical exclusion region: it runs
//! inside the per-key write guard so two concurrent transitions out of
//! `PENDING` cannot both succeed. Catalog reads are coordination-free.

pub mod catalog;
pub mod order;
pub mod quote;

pub use catalog::CatalogStore;
pub use order::OrderStore;
pub use quote::QuoteStore;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Store error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("illegal status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("{0} has expired")]
    Expired(String),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(resource) => {
                AppError::with_message(ErrorCode::NotFound, format!("{} not found", resource))
                    .with_detail("resource", resource)
            }
            StoreError::InvalidTransition { from, to } => AppError::with_message(
                ErrorCode::InvalidStatusTransition,
                format!("illegal status transition: {} -> {}", from, to),
            )
            .with_detail("from", from)
            .with_detail("to", to),
            StoreError::Expired(resource) => {
                AppError::with_message(ErrorCode::QuoteExpired, format!("{} has expired", resource))
                    .with_detail("resource", resource)
            }
            StoreError::Validation(msg) => {
                AppError::with_message(ErrorCode::ValidationFailed, msg)
            }
        }
    }
}
