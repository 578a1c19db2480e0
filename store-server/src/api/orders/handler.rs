//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{
    CreateOrderRequest, CreateOrderResponse, Order, UpdateOrderStatusRequest,
};

/// POST /api/orders - create an order
///
/// Validates the submission, snapshots the items, and returns the new order
/// id plus the payment continuation path for the selected provider.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<CreateOrderResponse>> {
    let (order, payment_url) = state.checkout.create_order(payload)?;

    Ok(Json(CreateOrderResponse {
        order_id: order.id,
        payment_url,
        message: "Order created successfully".to_string(),
    }))
}

/// GET /api/orders - list all orders (administrative)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    Ok(Json(state.checkout.list_orders()))
}

/// GET /api/orders/:id - fetch a single order
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state.checkout.get_order(&id)?;
    Ok(Json(order))
}

/// PUT /api/orders/:id/status - apply a status transition
///
/// Driven by payment-provider callbacks or administrative action. Illegal
/// transitions come back as a conflict the caller can inspect.
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<Order>> {
    let order = state.checkout.update_order_status(&id, payload.status)?;
    Ok(Json(order))
}
