//! Order endpoints.
//!
//! The order entity is a data-model placeholder; every endpoint answers
//! an explicit "not implemented" rather than silently succeeding.

use axum::{
    Router,
    extract::Path,
    routing::{get, post},
};

use orchard_core::OrderUuid;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_order))
        .route(
            "/{order_uuid}",
            get(get_order).put(update_order).delete(delete_order),
        )
}

async fn create_order() -> AppError {
    AppError::Unsupported("order creation")
}

async fn get_order(Path(_order_uuid): Path<OrderUuid>) -> AppError {
    AppError::Unsupported("order lookup")
}

async fn update_order(Path(_order_uuid): Path<OrderUuid>) -> AppError {
    AppError::Unsupported("order update")
}

async fn delete_order(Path(_order_uuid): Path<OrderUuid>) -> AppError {
    AppError::Unsupported("order deletion")
}
