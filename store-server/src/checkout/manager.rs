//! Checkout manager
//!
//! The order/quote lifecycle manager: validates a submission, snapshots the
//! supplied items, computes authoritative totals, assigns identity, and owns
//! every status mutation. All order/quote writes go through this one
//! component.

use shared::models::{
    CreateOrderRequest, CreateQuoteRequest, LineItemSnapshot, Order, OrderStatus, Quote,
    QuoteStatus,
};
use shared::pricing::{self, MAX_QUANTITY};
use shared::util::{current_year, now_millis};
use shared::LineItem;
use uuid::Uuid;

use super::error::{CheckoutError, CheckoutResult};
use super::payment_route;
use crate::store::{OrderStore, QuoteStore};
use crate::utils::validation::is_valid_email;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Order/quote lifecycle manager
#[derive(Debug)]
pub struct CheckoutManager {
    orders: OrderStore,
    quotes: QuoteStore,
    currency: String,
    quote_validity_days: i64,
}

impl CheckoutManager {
    pub fn new(currency: impl Into<String>, quote_validity_days: i64) -> Self {
        Self {
            orders: OrderStore::new(),
            quotes: QuoteStore::new(),
            currency: currency.into(),
            quote_validity_days,
        }
    }

    // ========== Orders ==========

    /// Validate and create an order in `PENDING` state
    ///
    /// Returns the created order plus the payment continuation path. The
    /// stored subtotal/total are recomputed from the item snapshot; the
    /// caller-supplied figures only participate in the required-field check.
    pub fn create_order(&self, req: CreateOrderRequest) -> CheckoutResult<(Order, String)> {
        let mut missing: Vec<&'static str> = Vec::new();
        if req.items.is_empty() {
            missing.push("items");
        }
        missing.extend(req.customer.missing_fields());
        if req.payment_method.slug().trim().is_empty() {
            missing.push("payment_method");
        }
        if req.total.is_none() {
            missing.push("total");
        }
        if !missing.is_empty() {
            return Err(CheckoutError::MissingFields(
                missing.into_iter().map(String::from).collect(),
            ));
        }
        if !is_valid_email(&req.customer.email) {
            return Err(CheckoutError::InvalidEmail(req.customer.email.clone()));
        }

        validate_lines(&req.items)?;
        let (items, subtotal) = snapshot_lines(&req.items);
        let total = pricing::order_total(subtotal, req.shipping)?;

        let now = now_millis();
        let order = Order {
            id: Uuid::new_v4().to_string(),
            items,
            customer: req.customer,
            payment_method: req.payment_method,
            subtotal,
            shipping: pricing::to_f64(pricing::to_decimal(req.shipping)),
            total,
            currency: req.currency.unwrap_or_else(|| self.currency.clone()),
            status: OrderStatus::Pending,
            created_at: now,
            last_modified_at: now,
        };
        let payment_url = payment_route::resolve(&order.payment_method, &order.id);

        self.orders.insert(order.clone());
        tracing::info!(
            order_id = %order.id,
            payment_method = %order.payment_method.slug(),
            total = order.total,
            "Order created"
        );

        Ok((order, payment_url))
    }

    pub fn get_order(&self, id: &str) -> CheckoutResult<Order> {
        self.orders
            .find_by_id(id)
            .ok_or_else(|| CheckoutError::OrderNotFound(id.to_string()))
    }

    /// All orders, newest first (administrative listing)
    pub fn list_orders(&self) -> Vec<Order> {
        self.orders.find_all()
    }

    /// Apply an order status transition
    ///
    /// Driven by payment-provider callbacks or administrative action; the
    /// store serializes concurrent transitions per order id.
    pub fn update_order_status(&self, id: &str, status: OrderStatus) -> CheckoutResult<Order> {
        let order = self
            .orders
            .update_status(id, status)
            .map_err(|e| CheckoutError::from_order_store(e, id))?;
        tracing::info!(order_id = %id, status = %status, "Order status updated");
        Ok(order)
    }

    // ========== Quotes ==========

    /// Validate and create a quote in `PENDING` state
    ///
    /// Assigns the next `GT-<year>-<seq>` reference number and an expiry of
    /// `created_at + quote_validity_days`.
    pub fn create_quote(&self, req: CreateQuoteRequest) -> CheckoutResult<Quote> {
        let mut missing: Vec<&'static str> = Vec::new();
        if req.items.is_empty() {
            missing.push("items");
        }
        missing.extend(req.customer.missing_fields());
        if !missing.is_empty() {
            return Err(CheckoutError::MissingFields(
                missing.into_iter().map(String::from).collect(),
            ));
        }
        if !is_valid_email(&req.customer.email) {
            return Err(CheckoutError::InvalidEmail(req.customer.email.clone()));
        }

        validate_lines(&req.items)?;
        let (items, subtotal) = snapshot_lines(&req.items);

        let now = now_millis();
        let quote = Quote {
            id: Uuid::new_v4().to_string(),
            reference_number: self.quotes.next_reference(current_year()),
            items,
            customer: req.customer,
            comments: req.comments,
            subtotal,
            total: subtotal,
            currency: self.currency.clone(),
            status: QuoteStatus::Pending,
            created_at: now,
            expires_at: now + self.quote_validity_days * MILLIS_PER_DAY,
            last_modified_at: now,
        };

        self.quotes.insert(quote.clone());
        tracing::info!(
            quote_id = %quote.id,
            reference = %quote.reference_number,
            total = quote.total,
            "Quote created"
        );

        Ok(quote)
    }

    pub fn get_quote(&self, id: &str) -> CheckoutResult<Quote> {
        self.quotes
            .find_by_id(id)
            .ok_or_else(|| CheckoutError::QuoteNotFound(id.to_string()))
    }

    /// All quotes, newest first (administrative listing)
    pub fn list_quotes(&self) -> Vec<Quote> {
        self.quotes.find_all()
    }

    /// Apply a quote status transition (expiry enforced by the store)
    pub fn update_quote_status(&self, id: &str, status: QuoteStatus) -> CheckoutResult<Quote> {
        let quote = self
            .quotes
            .update_status(id, status)
            .map_err(|e| CheckoutError::from_quote_store(e, id))?;
        tracing::info!(quote_id = %id, status = %status, "Quote status updated");
        Ok(quote)
    }

    // ========== Counters (health endpoint) ==========

    pub fn order_count(&self) -> usize {
        self.orders.count()
    }

    pub fn quote_count(&self) -> usize {
        self.quotes.count()
    }
}

/// Validate every line's quantity and prices before snapshotting
fn validate_lines(lines: &[LineItem]) -> CheckoutResult<()> {
    for line in lines {
        if line.quantity < 1 || line.quantity > MAX_QUANTITY {
            return Err(CheckoutError::InvalidQuantity {
                item_id: line.item.id.clone(),
                quantity: line.quantity,
            });
        }
        pricing::validate_price(line.item.price, "price")?;
        if let Some(original) = line.item.original_price {
            pricing::validate_price(original, "original_price")?;
        }
    }
    Ok(())
}

/// Deep-copy the lines and compute the subtotal from the rounded line totals
fn snapshot_lines(lines: &[LineItem]) -> (Vec<LineItemSnapshot>, f64) {
    let items: Vec<LineItemSnapshot> = lines.iter().map(LineItemSnapshot::capture_line).collect();
    let subtotal = pricing::to_f64(
        items
            .iter()
            .map(|s| pricing::to_decimal(s.line_total))
            .sum(),
    );
    (items, subtotal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{CatalogItem, Category, Customer, PaymentMethod};

    fn manager() -> CheckoutManager {
        CheckoutManager::new("ZAR", 30)
    }

    fn catalog_item(id: &str, price: f64) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            name: format!("Item {}", id),
            description: String::new(),
            price,
            original_price: None,
            category: Category::Textbooks,
            in_stock: true,
            featured: false,
            tags: vec![],
            created_at: 0,
            updated_at: 0,
        }
    }

    fn line(id: &str, price: f64, quantity: i32) -> LineItem {
        LineItem {
            item: catalog_item(id, price),
            quantity,
        }
    }

    fn customer() -> Customer {
        Customer {
            first_name: "Thandi".to_string(),
            last_name: "Mokoena".to_string(),
            email: "thandi@example.co.za".to_string(),
            phone: "+27 82 555 0101".to_string(),
            address_line1: "12 Protea Road".to_string(),
            address_line2: None,
            city: "Cape Town".to_string(),
            postal_code: "8001".to_string(),
            country: "South Africa".to_string(),
        }
    }

    fn order_request(items: Vec<LineItem>, method: &str) -> CreateOrderRequest {
        let subtotal: f64 = items
            .iter()
            .map(|l| l.item.price * l.quantity as f64)
            .sum();
        CreateOrderRequest {
            items,
            customer: customer(),
            payment_method: PaymentMethod::from(method.to_string()),
            subtotal: Some(subtotal),
            shipping: 0.0,
            total: Some(subtotal),
            currency: None,
        }
    }

    // ========== create_order ==========

    #[test]
    fn test_create_order_success() {
        let mgr = manager();
        let (order, payment_url) = mgr
            .create_order(order_request(vec![line("a", 299.99, 1)], "paygate"))
            .unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.subtotal, 299.99);
        assert_eq!(order.total, 299.99);
        assert_eq!(order.currency, "ZAR");
        assert!(payment_url.ends_with(&format!("/paygate/{}", order.id)));
    }

    #[test]
    fn test_create_order_unrecognized_method_routes_to_generic() {
        let mgr = manager();
        let (order, payment_url) = mgr
            .create_order(order_request(vec![line("a", 10.0, 1)], "crypto"))
            .unwrap();

        assert_eq!(
            order.payment_method,
            PaymentMethod::Other("crypto".to_string()),
            "unknown methods are accepted, not rejected"
        );
        assert!(payment_url.ends_with(&format!("/generic/{}", order.id)));
    }

    #[test]
    fn test_create_order_empty_items_fails_validation() {
        let mgr = manager();
        let err = mgr
            .create_order(order_request(vec![], "paygate"))
            .unwrap_err();
        assert_eq!(err, CheckoutError::MissingFields(vec!["items".to_string()]));
    }

    #[test]
    fn test_create_order_collects_all_missing_fields() {
        let mgr = manager();
        let mut req = order_request(vec![], "paygate");
        req.customer.email = String::new();
        req.customer.phone = "  ".to_string();
        req.total = None;

        let err = mgr.create_order(req).unwrap_err();
        assert_eq!(
            err,
            CheckoutError::MissingFields(vec![
                "items".to_string(),
                "customer.email".to_string(),
                "customer.phone".to_string(),
                "total".to_string(),
            ])
        );
    }

    #[test]
    fn test_create_order_bare_request_reports_missing_fields() {
        let mgr = manager();
        // A bare `{}` deserializes to defaults and fails the all-or-nothing
        // check instead of failing deserialization
        let req: CreateOrderRequest = serde_json::from_str("{}").unwrap();
        let err = mgr.create_order(req).unwrap_err();

        match err {
            CheckoutError::MissingFields(fields) => {
                for expected in ["items", "customer.first_name", "payment_method", "total"] {
                    assert!(
                        fields.contains(&expected.to_string()),
                        "missing_fields should contain {expected}: {fields:?}"
                    );
                }
            }
            other => panic!("expected MissingFields, got {:?}", other),
        }
    }

    #[test]
    fn test_create_order_malformed_email_rejected() {
        let mgr = manager();
        let mut req = order_request(vec![line("a", 10.0, 1)], "paygate");
        req.customer.email = "not-an-email".to_string();

        let err = mgr.create_order(req).unwrap_err();
        assert_eq!(err, CheckoutError::InvalidEmail("not-an-email".to_string()));
    }

    #[test]
    fn test_create_order_invalid_quantity_rejected() {
        let mgr = manager();
        let err = mgr
            .create_order(order_request(vec![line("a", 10.0, 0)], "paygate"))
            .unwrap_err();
        assert_eq!(
            err,
            CheckoutError::InvalidQuantity {
                item_id: "a".to_string(),
                quantity: 0,
            }
        );
    }

    #[test]
    fn test_create_order_negative_shipping_rejected() {
        let mgr = manager();
        let mut req = order_request(vec![line("a", 10.0, 1)], "paygate");
        req.shipping = -5.0;
        assert!(matches!(
            mgr.create_order(req),
            Err(CheckoutError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_create_order_totals_recomputed_server_side() {
        let mgr = manager();
        let mut req = order_request(vec![line("a", 100.0, 2)], "paygate");
        req.shipping = 50.0;
        // The caller lies about its totals; the snapshot wins
        req.subtotal = Some(1.0);
        req.total = Some(1.0);

        let (order, _) = mgr.create_order(req).unwrap();
        assert_eq!(order.subtotal, 200.0);
        assert_eq!(order.shipping, 50.0);
        assert_eq!(order.total, 250.0, "total must equal subtotal + shipping");
    }

    #[test]
    fn test_create_order_snapshot_survives_catalog_mutation() {
        let mgr = manager();
        let mut item = catalog_item("a", 29.99);
        let (order, _) = mgr
            .create_order(order_request(
                vec![LineItem {
                    item: item.clone(),
                    quantity: 2,
                }],
                "payfast",
            ))
            .unwrap();

        // Catalog price changes after the order is placed
        item.price = 999.0;

        let stored = mgr.get_order(&order.id).unwrap();
        assert_eq!(stored.items[0].price, 29.99);
        assert_eq!(stored.subtotal, 59.98);

        // Round-trip: serialization preserves the snapshot values
        let json = serde_json::to_string(&stored).unwrap();
        let restored: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, stored);
    }

    #[test]
    fn test_create_order_custom_currency() {
        let mgr = manager();
        let mut req = order_request(vec![line("a", 10.0, 1)], "stripe");
        req.currency = Some("USD".to_string());
        let (order, _) = mgr.create_order(req).unwrap();
        assert_eq!(order.currency, "USD");
    }

    // ========== order status lifecycle ==========

    #[test]
    fn test_update_order_status_pending_to_paid_then_terminal() {
        let mgr = manager();
        let (order, _) = mgr
            .create_order(order_request(vec![line("a", 10.0, 1)], "paygate"))
            .unwrap();

        let paid = mgr
            .update_order_status(&order.id, OrderStatus::Paid)
            .unwrap();
        assert_eq!(paid.status, OrderStatus::Paid);

        let err = mgr
            .update_order_status(&order.id, OrderStatus::Failed)
            .unwrap_err();
        assert_eq!(
            err,
            CheckoutError::InvalidTransition {
                from: "PAID".to_string(),
                to: "FAILED".to_string(),
            }
        );
    }

    #[test]
    fn test_update_order_status_unknown_id() {
        let mgr = manager();
        assert_eq!(
            mgr.update_order_status("nope", OrderStatus::Paid).unwrap_err(),
            CheckoutError::OrderNotFound("nope".to_string())
        );
    }

    #[test]
    fn test_get_order_not_found() {
        let mgr = manager();
        assert_eq!(
            mgr.get_order("nope").unwrap_err(),
            CheckoutError::OrderNotFound("nope".to_string())
        );
    }

    // ========== create_quote ==========

    fn quote_request(items: Vec<LineItem>) -> CreateQuoteRequest {
        CreateQuoteRequest {
            items,
            customer: customer(),
            comments: Some("Needed before term starts".to_string()),
        }
    }

    #[test]
    fn test_create_quote_assigns_sequential_references() {
        let mgr = manager();
        let year = current_year();

        let q1 = mgr.create_quote(quote_request(vec![line("a", 10.0, 1)])).unwrap();
        let q2 = mgr.create_quote(quote_request(vec![line("b", 20.0, 1)])).unwrap();

        assert_eq!(q1.reference_number, format!("GT-{}-0001", year));
        assert_eq!(q2.reference_number, format!("GT-{}-0002", year));
        assert_eq!(q1.status, QuoteStatus::Pending);
    }

    #[test]
    fn test_create_quote_sets_expiry_window() {
        let mgr = CheckoutManager::new("ZAR", 30);
        let quote = mgr.create_quote(quote_request(vec![line("a", 10.0, 1)])).unwrap();
        assert_eq!(quote.expires_at, quote.created_at + 30 * MILLIS_PER_DAY);
    }

    #[test]
    fn test_create_quote_totals_from_snapshot() {
        let mgr = manager();
        let quote = mgr
            .create_quote(quote_request(vec![line("a", 49.99, 2), line("b", 10.0, 1)]))
            .unwrap();
        assert_eq!(quote.subtotal, 109.98);
        assert_eq!(quote.total, quote.subtotal);
    }

    #[test]
    fn test_create_quote_empty_items_fails_validation() {
        let mgr = manager();
        let err = mgr.create_quote(quote_request(vec![])).unwrap_err();
        assert_eq!(err, CheckoutError::MissingFields(vec!["items".to_string()]));
    }

    // ========== quote status lifecycle ==========

    #[test]
    fn test_update_quote_status_approve_then_terminal() {
        let mgr = manager();
        let quote = mgr.create_quote(quote_request(vec![line("a", 10.0, 1)])).unwrap();

        let approved = mgr
            .update_quote_status(&quote.id, QuoteStatus::Approved)
            .unwrap();
        assert_eq!(approved.status, QuoteStatus::Approved);

        assert!(matches!(
            mgr.update_quote_status(&quote.id, QuoteStatus::Rejected),
            Err(CheckoutError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_update_quote_status_expired_quote_cannot_be_approved() {
        // Zero-day validity: the quote expires the instant it is created
        let mgr = CheckoutManager::new("ZAR", 0);
        let quote = mgr.create_quote(quote_request(vec![line("a", 10.0, 1)])).unwrap();

        // now > expires_at once the clock ticks past creation
        std::thread::sleep(std::time::Duration::from_millis(5));

        let err = mgr
            .update_quote_status(&quote.id, QuoteStatus::Approved)
            .unwrap_err();
        assert_eq!(err, CheckoutError::QuoteExpired(quote.id.clone()));
        assert_eq!(
            mgr.get_quote(&quote.id).unwrap().status,
            QuoteStatus::Expired
        );
    }

    #[test]
    fn test_get_quote_not_found() {
        let mgr = manager();
        assert_eq!(
            mgr.get_quote("nope").unwrap_err(),
            CheckoutError::QuoteNotFound("nope".to_string())
        );
    }

    // ========== listings ==========

    #[test]
    fn test_listings_and_counters() {
        let mgr = manager();
        mgr.create_order(order_request(vec![line("a", 10.0, 1)], "paygate"))
            .unwrap();
        mgr.create_order(order_request(vec![line("b", 20.0, 1)], "paypal"))
            .unwrap();
        mgr.create_quote(quote_request(vec![line("c", 30.0, 1)])).unwrap();

        assert_eq!(mgr.list_orders().len(), 2);
        assert_eq!(mgr.list_quotes().len(), 1);
        assert_eq!(mgr.order_count(), 2);
        assert_eq!(mgr.quote_count(), 1);
    }
}
