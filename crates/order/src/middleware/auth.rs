//! Authentication middleware and extractors.
//!
//! The auth gateway for the service: extracts the bearer token, resolves
//! it to a live user, and injects that user into the handler. Handlers
//! never re-verify.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{Method, StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};

use crate::error::ErrorBody;
use crate::models::user::User;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// Extractor that requires an authenticated user.
///
/// Rejects the request before the handler runs when the bearer token is
/// absent or does not resolve to a live user.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.first_name)
/// }
/// ```
pub struct RequireAuth(pub User);

/// Error returned when authentication fails.
///
/// The response never reveals whether the token was malformed, expired,
/// badly signed, or referred to a deleted user.
pub enum AuthRejection {
    /// No bearer token on the request.
    MissingToken,
    /// The token did not resolve; the status follows the endpoint
    /// convention carried in the variant.
    InvalidToken(StatusCode),
    /// Resolving the token failed inside the store.
    Unavailable,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingToken => (StatusCode::UNAUTHORIZED, "Invalid Token"),
            Self::InvalidToken(status) => (status, "Invalid Token"),
            Self::Unavailable => (StatusCode::INTERNAL_SERVER_ERROR, "internal server error"),
        };
        (status, Json(ErrorBody::new(message))).into_response()
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AuthRejection::MissingToken)?;

        let auth = AuthService::new(state.store(), state.tokens(), state.config());
        match auth.authenticate(&token).await {
            Ok(user) => Ok(Self(user)),
            Err(AuthError::InvalidToken) => {
                Err(AuthRejection::InvalidToken(invalid_token_status(parts)))
            }
            Err(error) => {
                tracing::error!(error = %error, "token resolution failed");
                Err(AuthRejection::Unavailable)
            }
        }
    }
}

/// Pull the token out of the `Authorization: Bearer <token>` header.
fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_owned)
}

/// Status for an unverifiable token, per the endpoint convention: the
/// user-update endpoint answers 400, every other protected endpoint 404.
fn invalid_token_status(parts: &Parts) -> StatusCode {
    if parts.method == Method::PUT && parts.uri.path().starts_with("/api/v1/users") {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::NOT_FOUND
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;

    fn parts_for(method: Method, uri: &str, authorization: Option<&str>) -> Parts {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_extraction() {
        let parts = parts_for(Method::GET, "/api/v1/users/", Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_missing_header_yields_no_token() {
        let parts = parts_for(Method::GET, "/api/v1/users/", None);
        assert!(bearer_token(&parts).is_none());
    }

    #[test]
    fn test_non_bearer_scheme_yields_no_token() {
        let parts = parts_for(Method::GET, "/api/v1/users/", Some("Basic dXNlcjpwdw=="));
        assert!(bearer_token(&parts).is_none());
    }

    #[test]
    fn test_invalid_token_status_for_user_update() {
        let parts = parts_for(Method::PUT, "/api/v1/users/", None);
        assert_eq!(invalid_token_status(&parts), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_token_status_elsewhere() {
        let get_users = parts_for(Method::GET, "/api/v1/users/", None);
        assert_eq!(invalid_token_status(&get_users), StatusCode::NOT_FOUND);

        let put_payment = parts_for(
            Method::PUT,
            "/api/v1/payment_methods/00000000-0000-0000-0000-000000000000",
            None,
        );
        assert_eq!(invalid_token_status(&put_payment), StatusCode::NOT_FOUND);
    }
}
