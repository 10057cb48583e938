//! User identity endpoints: registration, login, and self-service CRUD.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::post,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppJson, Result};
use crate::middleware::RequireAuth;
use crate::models::user::{NewUser, UserProfile, UserUpdate};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response body.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(register)
                .get(get_user)
                .put(update_user)
                .delete(delete_user),
        )
        .route("/login", post(login))
}

/// Register a new user.
///
/// Responds 201 with the password-free profile. No email uniqueness
/// check runs before insert (known gap, kept deliberately).
async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<NewUser>,
) -> Result<(StatusCode, Json<UserProfile>)> {
    let auth = AuthService::new(state.store(), state.tokens(), state.config());
    let user = auth.register(input).await?;

    tracing::info!(user = %user.uuid, "user registered");
    Ok((StatusCode::CREATED, Json(UserProfile::from(&user))))
}

/// Exchange email and password for a bearer token.
///
/// Unknown email and wrong password answer an identical 401.
async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    let auth = AuthService::new(state.store(), state.tokens(), state.config());
    let token = auth.login(&input.email, &input.password).await?;

    Ok(Json(TokenResponse { token }))
}

/// Return the authenticated user's profile.
async fn get_user(RequireAuth(user): RequireAuth) -> Json<UserProfile> {
    Json(UserProfile::from(&user))
}

/// Replace the authenticated user's profile fields.
///
/// The password digest changes only when the request supplies a new
/// password. A stale revision surfaces as 409 for the caller to retry.
async fn update_user(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    AppJson(input): AppJson<UserUpdate>,
) -> Result<Json<UserProfile>> {
    let auth = AuthService::new(state.store(), state.tokens(), state.config());
    let updated = auth.update_profile(user, input).await?;

    Ok(Json(UserProfile::from(&updated)))
}

/// Delete the authenticated user's account.
///
/// Responds 204. Outstanding tokens for the account stop resolving once
/// the document is gone.
async fn delete_user(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<StatusCode> {
    let auth = AuthService::new(state.store(), state.tokens(), state.config());
    auth.delete_account(&user).await?;

    tracing::info!(user = %user.uuid, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}
