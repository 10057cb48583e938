//! Route definitions for the order service API.

pub mod orders;
pub mod payment_methods;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the full API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/v1/users", users::routes())
        .nest("/api/v1/payment_methods", payment_methods::routes())
        .nest("/api/v1/orders", orders::routes())
}
