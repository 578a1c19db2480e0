//! Domain models shared across crates

pub mod catalog_item;
pub mod customer;
pub mod order;
pub mod quote;

pub use catalog_item::{CatalogItem, CatalogItemCreate, CatalogItemUpdate, Category, ItemFilter};
pub use customer::Customer;
pub use order::{
    CreateOrderRequest, CreateOrderResponse, LineItemSnapshot, Order, OrderStatus, PaymentMethod,
    UpdateOrderStatusRequest, DEFAULT_CURRENCY,
};
pub use quote::{
    CreateQuoteRequest, CreateQuoteResponse, Quote, QuoteStatus, UpdateQuoteStatusRequest,
    DEFAULT_QUOTE_VALIDITY_DAYS,
};
