//! Unified error codes for the GradeTree storefront
//!
//! Error codes are shared between store-server and the web frontend.
//! They are organized by category:
//! - 0xxx: General errors
//! - 2xxx: Cart errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Catalog errors
//! - 7xxx: Quote errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 2xxx: Cart ====================
    /// Quantity must be a positive integer
    InvalidQuantity = 2001,
    /// Monetary amount is negative or not finite
    InvalidAmount = 2002,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Illegal order status transition
    InvalidStatusTransition = 4002,
    /// Order has no items
    OrderEmpty = 4003,

    // ==================== 5xxx: Payment ====================
    /// Payment processing failed
    PaymentFailed = 5001,

    // ==================== 6xxx: Catalog ====================
    /// Catalog item not found
    ItemNotFound = 6001,
    /// Catalog item has an invalid price
    ItemInvalidPrice = 6002,

    // ==================== 7xxx: Quote ====================
    /// Quote not found
    QuoteNotFound = 7001,
    /// Quote validity window has passed
    QuoteExpired = 7002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Storage error
    StorageError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Cart
            ErrorCode::InvalidQuantity => "Quantity must be a positive integer",
            ErrorCode::InvalidAmount => "Amount must be a finite, non-negative number",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::InvalidStatusTransition => "Illegal status transition",
            ErrorCode::OrderEmpty => "Order has no items",

            // Payment
            ErrorCode::PaymentFailed => "Payment processing failed",

            // Catalog
            ErrorCode::ItemNotFound => "Catalog item not found",
            ErrorCode::ItemInvalidPrice => "Catalog item has an invalid price",

            // Quote
            ErrorCode::QuoteNotFound => "Quote not found",
            ErrorCode::QuoteExpired => "Quote has expired",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::StorageError => "Storage error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => ErrorCode::Success,
            1 => ErrorCode::Unknown,
            2 => ErrorCode::ValidationFailed,
            3 => ErrorCode::NotFound,
            4 => ErrorCode::AlreadyExists,
            5 => ErrorCode::InvalidRequest,
            7 => ErrorCode::RequiredField,
            8 => ErrorCode::ValueOutOfRange,
            2001 => ErrorCode::InvalidQuantity,
            2002 => ErrorCode::InvalidAmount,
            4001 => ErrorCode::OrderNotFound,
            4002 => ErrorCode::InvalidStatusTransition,
            4003 => ErrorCode::OrderEmpty,
            5001 => ErrorCode::PaymentFailed,
            6001 => ErrorCode::ItemNotFound,
            6002 => ErrorCode::ItemInvalidPrice,
            7001 => ErrorCode::QuoteNotFound,
            7002 => ErrorCode::QuoteExpired,
            9001 => ErrorCode::InternalError,
            9002 => ErrorCode::StorageError,
            9005 => ErrorCode::ConfigError,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}
