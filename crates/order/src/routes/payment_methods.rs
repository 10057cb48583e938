//! Payment-method endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};

use orchard_core::PaymentMethodUuid;

use crate::error::{AppError, AppJson, Result};
use crate::middleware::RequireAuth;
use crate::models::payment_method::{NewPaymentMethod, PaymentMethodResponse};
use crate::services::payments::PaymentService;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    // The create route carries the owner's uuid (trailing slash
    // included); the others carry a payment-method uuid. The router
    // allows one parameter name per path position, hence the shared name.
    Router::new()
        .route("/{uuid}/", post(create_payment_method))
        .route(
            "/{uuid}",
            get(get_payment_method)
                .put(update_payment_method)
                .delete(delete_payment_method),
        )
}

/// Create a payment method for the authenticated user.
///
/// The card number is validated before anything is written; a failure
/// aborts with 400 and no partial write. The owner is taken from the
/// bearer token, not from the path. Appending the new uuid to the
/// owner's reference list is best-effort (see the repository).
async fn create_payment_method(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(_user_uuid): Path<String>,
    AppJson(input): AppJson<NewPaymentMethod>,
) -> Result<(StatusCode, Json<PaymentMethodResponse>)> {
    let payments = PaymentService::new(state.store());
    let payment_method = payments.create(&user, input).await?;

    tracing::info!(
        user = %user.uuid,
        payment_method = %payment_method.uuid,
        "payment method created"
    );
    Ok((
        StatusCode::CREATED,
        Json(PaymentMethodResponse::from(&payment_method)),
    ))
}

/// Fetch a payment method by uuid.
///
/// Any authenticated user may read any payment method by identifier;
/// no ownership check runs (known gap, kept deliberately).
async fn get_payment_method(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(payment_uuid): Path<PaymentMethodUuid>,
) -> Result<Json<PaymentMethodResponse>> {
    let payments = PaymentService::new(state.store());
    let payment_method = payments
        .get(payment_uuid)
        .await?
        .ok_or_else(|| AppError::NotFound("Payment method not found".to_string()))?;

    Ok(Json(PaymentMethodResponse::from(&payment_method)))
}

/// Payment-method update is not yet supported.
async fn update_payment_method(
    RequireAuth(_user): RequireAuth,
    Path(_payment_uuid): Path<PaymentMethodUuid>,
) -> AppError {
    AppError::Unsupported("payment method update")
}

/// Payment-method deletion is not yet supported.
async fn delete_payment_method(
    RequireAuth(_user): RequireAuth,
    Path(_payment_uuid): Path<PaymentMethodUuid>,
) -> AppError {
    AppError::Unsupported("payment method deletion")
}
