//! Order Model
//!
//! An order is a snapshot taken at submission time: line items are deep
//! copies of catalog fields, so later catalog edits never retroactively
//! change a placed order. Everything except `status` / `last_modified_at` is
//! immutable after creation.

use serde::{Deserialize, Serialize};

use crate::cart::LineItem;
use crate::models::catalog_item::CatalogItem;
use crate::models::customer::Customer;
use crate::pricing;

/// Default order currency (ISO-4217-like code)
pub const DEFAULT_CURRENCY: &str = "ZAR";

// ============================================================================
// Payment Method
// ============================================================================

/// Payment method selected at checkout
///
/// Deliberately permissive: unknown strings are carried through as
/// [`PaymentMethod::Other`] and routed to the generic payment path, never
/// rejected. Tightening this would change observable behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    PayGate,
    PayFast,
    Stripe,
    PayPal,
    Other(String),
}

impl PaymentMethod {
    /// Lowercase wire identifier for this method
    pub fn slug(&self) -> &str {
        match self {
            Self::PayGate => "paygate",
            Self::PayFast => "payfast",
            Self::Stripe => "stripe",
            Self::PayPal => "paypal",
            Self::Other(s) => s.as_str(),
        }
    }

    /// Whether this is one of the known provider integrations
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Default for PaymentMethod {
    /// An absent method behaves like an empty unknown string: it fails the
    /// required-field check rather than deserialization
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for PaymentMethod {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "paygate" => Self::PayGate,
            "payfast" => Self::PayFast,
            "stripe" => Self::Stripe,
            "paypal" => Self::PayPal,
            _ => Self::Other(value),
        }
    }
}

impl From<PaymentMethod> for String {
    fn from(method: PaymentMethod) -> Self {
        method.slug().to_string()
    }
}

// ============================================================================
// Order Status
// ============================================================================

/// Order lifecycle status
///
/// `PENDING` is the only non-terminal state. Transitions are driven by
/// payment-provider callbacks or administrative action; terminal states never
/// revert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Failed,
    Cancelled,
}

impl OrderStatus {
    /// Whether this status has no outgoing transitions
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// The one true order state machine: pending → {paid, failed, cancelled}
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        match self {
            Self::Pending => matches!(next, Self::Paid | Self::Failed | Self::Cancelled),
            _ => false,
        }
    }

    /// Status name as serialized on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Line Item Snapshot
// ============================================================================

/// Line item snapshot embedded in an order or quote
///
/// A deep copy of the catalog fields taken at submission time, immune to
/// later catalog mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemSnapshot {
    /// Catalog item id at capture time
    pub item_id: String,
    pub name: String,
    /// Unit price at capture time
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub quantity: i32,
    /// price × quantity, rounded once at the line level
    pub line_total: f64,
}

impl LineItemSnapshot {
    /// Capture a snapshot of a catalog item at the given quantity
    pub fn capture(item: &CatalogItem, quantity: i32) -> Self {
        Self {
            item_id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            original_price: item.original_price,
            quantity,
            line_total: pricing::line_total(item.price, quantity),
        }
    }

    /// Capture a snapshot of a cart line
    pub fn capture_line(line: &LineItem) -> Self {
        Self::capture(&line.item, line.quantity)
    }
}

// ============================================================================
// Order
// ============================================================================

/// A placed order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: String,
    pub items: Vec<LineItemSnapshot>,
    pub customer: Customer,
    pub payment_method: PaymentMethod,
    pub subtotal: f64,
    pub shipping: f64,
    /// subtotal + shipping at creation time
    pub total: f64,
    pub currency: String,
    pub status: OrderStatus,
    /// Epoch milliseconds (UTC), immutable
    pub created_at: i64,
    /// Refreshed on every status change
    pub last_modified_at: i64,
}

// ============================================================================
// API payloads
// ============================================================================

/// Create order request
///
/// `subtotal` and `total` are caller-computed display values: they take part
/// in the required-field check (absent `total` fails validation) but the
/// stored totals are always recomputed server-side from the item snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub customer: Customer,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub subtotal: Option<f64>,
    #[serde(default)]
    pub shipping: f64,
    pub total: Option<f64>,
    pub currency: Option<String>,
}

/// Create order response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub order_id: String,
    /// Provider continuation path, e.g. `/payment/paygate/{id}`
    pub payment_url: String,
    pub message: String,
}

/// Status update request (orders)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_known_slugs() {
        assert_eq!(PaymentMethod::from("paygate".to_string()), PaymentMethod::PayGate);
        assert_eq!(PaymentMethod::from("PayFast".to_string()), PaymentMethod::PayFast);
        assert_eq!(PaymentMethod::from("STRIPE".to_string()), PaymentMethod::Stripe);
        assert_eq!(PaymentMethod::from("paypal".to_string()), PaymentMethod::PayPal);
    }

    #[test]
    fn test_payment_method_unknown_is_carried_through() {
        let method = PaymentMethod::from("crypto".to_string());
        assert_eq!(method, PaymentMethod::Other("crypto".to_string()));
        assert!(!method.is_recognized());
        assert_eq!(method.slug(), "crypto");
    }

    #[test]
    fn test_payment_method_serde_round_trip() {
        let json = serde_json::to_string(&PaymentMethod::PayGate).unwrap();
        assert_eq!(json, "\"paygate\"");

        let method: PaymentMethod = serde_json::from_str("\"snapscan\"").unwrap();
        assert_eq!(method, PaymentMethod::Other("snapscan".to_string()));
        assert_eq!(serde_json::to_string(&method).unwrap(), "\"snapscan\"");
    }

    #[test]
    fn test_order_status_transitions_from_pending() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Paid));
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Failed));
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Pending));
    }

    #[test]
    fn test_order_status_terminal_states_reject_everything() {
        for terminal in [OrderStatus::Paid, OrderStatus::Failed, OrderStatus::Cancelled] {
            assert!(terminal.is_terminal());
            for next in [
                OrderStatus::Pending,
                OrderStatus::Paid,
                OrderStatus::Failed,
                OrderStatus::Cancelled,
            ] {
                assert!(
                    !terminal.can_transition_to(next),
                    "{terminal} must not transition to {next}"
                );
            }
        }
    }

    #[test]
    fn test_order_status_serde_screaming_snake_case() {
        assert_eq!(serde_json::to_string(&OrderStatus::Pending).unwrap(), "\"PENDING\"");
        let status: OrderStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(status, OrderStatus::Cancelled);
    }

    #[test]
    fn test_snapshot_is_immune_to_catalog_edits() {
        use crate::models::catalog_item::Category;

        let mut item = CatalogItem {
            id: "item-1".to_string(),
            name: "Graph Paper Pad".to_string(),
            description: String::new(),
            price: 29.99,
            original_price: Some(39.99),
            category: Category::Stationery,
            in_stock: true,
            featured: false,
            tags: vec![],
            created_at: 0,
            updated_at: 0,
        };

        let snapshot = LineItemSnapshot::capture(&item, 2);
        assert_eq!(snapshot.price, 29.99);
        assert_eq!(snapshot.line_total, 59.98);

        // Catalog price changes after capture
        item.price = 99.99;
        assert_eq!(snapshot.price, 29.99, "snapshot must keep the capture-time price");

        // Serialize/deserialize reproduces identical field values
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: LineItemSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, snapshot);
    }
}
