//! Cart/Quote aggregator
//!
//! The single source of truth for an in-progress cart or quote. Both the
//! browse flow and the quote flow depend on this one component; any external
//! persistence (e.g. browser-local storage) is a cache that must be fully
//! reconstructable by replaying [`Cart::add`] calls.
//!
//! Invariants:
//! - At most one [`LineItem`] per catalog item id; adding an existing id
//!   merges quantities instead of appending.
//! - Line quantity is always >= 1; a quantity driven to <= 0 removes the
//!   line entirely, never leaving a zero-quantity entry.
//! - `subtotal()` and `item_count()` are computed fresh on every call, never
//!   cached.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::catalog_item::CatalogItem;
use crate::pricing;

/// A (catalog item, quantity) pair inside a cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub item: CatalogItem,
    pub quantity: i32,
}

/// Cart errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The add path requires a positive quantity delta
    #[error("quantity delta must be positive, got {0}")]
    InvalidQuantity(i32),
}

/// Ordered collection of line items, keyed by catalog item id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item, merging into an existing line when the id is already
    /// present
    ///
    /// Fails with [`CartError::InvalidQuantity`] when `quantity_delta <= 0`;
    /// removal goes through [`Cart::set_quantity`] or [`Cart::remove`], not
    /// a negative add.
    pub fn add(&mut self, item: CatalogItem, quantity_delta: i32) -> Result<(), CartError> {
        if quantity_delta <= 0 {
            return Err(CartError::InvalidQuantity(quantity_delta));
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.item.id == item.id) {
            line.quantity += quantity_delta;
        } else {
            self.lines.push(LineItem {
                item,
                quantity: quantity_delta,
            });
        }
        Ok(())
    }

    /// Overwrite a line's quantity; `quantity <= 0` removes the line
    ///
    /// Idempotent on the removal path: setting an absent id to zero is a
    /// no-op, not an error.
    pub fn set_quantity(&mut self, item_id: &str, quantity: i32) {
        if quantity <= 0 {
            self.remove(item_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.item.id == item_id) {
            line.quantity = quantity;
        }
    }

    /// Remove a line if present; idempotent
    pub fn remove(&mut self, item_id: &str) {
        self.lines.retain(|l| l.item.id != item_id);
    }

    /// Empty the cart
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Σ(price × quantity) over current lines, computed fresh on every call
    pub fn subtotal(&self) -> f64 {
        let total = self
            .lines
            .iter()
            .map(|l| pricing::to_decimal(pricing::line_total(l.item.price, l.quantity)))
            .sum();
        pricing::to_f64(total)
    }

    /// Σ quantity over current lines (one line with quantity 5 counts as 5)
    pub fn item_count(&self) -> i32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Current quantity for an item id, 0 when absent
    pub fn quantity_of(&self, item_id: &str) -> i32 {
        self.lines
            .iter()
            .find(|l| l.item.id == item_id)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    /// Current lines, in insertion order
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Number of distinct lines (not total quantity)
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
