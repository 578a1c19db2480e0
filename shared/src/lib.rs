//! Shared types for the GradeTree storefront
//!
//! Domain types used across the server and client crates: catalog and
//! order/quote models, the cart aggregator, the pricing calculator, and the
//! unified error system.

pub mod cart;
pub mod error;
pub mod models;
pub mod pricing;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

// Cart re-exports (both the browse and quote flows depend on these)
pub use cart::{Cart, CartError, LineItem};
