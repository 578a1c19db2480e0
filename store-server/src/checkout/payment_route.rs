//! Payment route resolution
//!
//! Maps a payment method to the provider-specific continuation path the
//! frontend redirects to after order creation. A total, deterministic
//! function: unknown methods fall back to the generic path, never an error.

use shared::models::PaymentMethod;

/// Resolve the payment continuation path for an order
pub fn resolve(method: &PaymentMethod, order_id: &str) -> String {
    match method {
        PaymentMethod::PayGate => format!("/payment/paygate/{}", order_id),
        PaymentMethod::PayFast => format!("/payment/payfast/{}", order_id),
        PaymentMethod::Stripe => format!("/payment/stripe/{}", order_id),
        PaymentMethod::PayPal => format!("/payment/paypal/{}", order_id),
        PaymentMethod::Other(_) => format!("/payment/generic/{}", order_id),
    }
}
