//! Quote API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::utils::validation::{validate_optional_text, MAX_TEXT_LEN};
use crate::utils::AppResult;
use shared::models::{
    CreateQuoteRequest, CreateQuoteResponse, Quote, UpdateQuoteStatusRequest,
};

/// POST /api/quotes - create a quote
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateQuoteRequest>,
) -> AppResult<Json<CreateQuoteResponse>> {
    validate_optional_text(&payload.comments, "comments", MAX_TEXT_LEN)?;

    let quote = state.checkout.create_quote(payload)?;

    Ok(Json(CreateQuoteResponse {
        quote_id: quote.id,
        reference_number: quote.reference_number,
        message: "Quote created successfully".to_string(),
    }))
}

/// GET /api/quotes - list all quotes (administrative)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Quote>>> {
    Ok(Json(state.checkout.list_quotes()))
}

/// GET /api/quotes/:id - fetch a single quote
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Quote>> {
    let quote = state.checkout.get_quote(&id)?;
    Ok(Json(quote))
}

/// PUT /api/quotes/:id/status - apply a status transition
///
/// Approvals past the validity window fail and mark the quote expired.
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateQuoteStatusRequest>,
) -> AppResult<Json<Quote>> {
    let quote = state.checkout.update_quote_status(&id, payload.status)?;
    Ok(Json(quote))
}
