//! Authentication service.
//!
//! Composes the credential codec, the token service, and the user
//! repository into registration, login, token resolution, and
//! self-service profile operations.

mod error;

pub use error::AuthError;

use orchard_core::Email;

use crate::config::OrderConfig;
use crate::db::CouchClient;
use crate::db::users::UserRepository;
use crate::models::user::{NewUser, User, UserUpdate};
use crate::services::password;
use crate::services::token::TokenService;

/// Authentication service.
///
/// Handles user registration, login, token resolution, and profile
/// maintenance for the authenticated user.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    tokens: &'a TokenService,
    basket_base_url: &'a str,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub fn new(db: &'a CouchClient, tokens: &'a TokenService, config: &'a OrderConfig) -> Self {
        Self {
            users: UserRepository::new(db),
            tokens,
            basket_base_url: config.basket_service_url.as_str(),
        }
    }

    /// Register a new user.
    ///
    /// The password is hashed exactly once here, on the way into the
    /// store; an already-hashed value is never re-hashed. No email
    /// uniqueness check runs before insert (known gap, kept
    /// deliberately).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` for bad input, `AuthError` for
    /// hashing or store failures.
    pub async fn register(&self, input: NewUser) -> Result<User, AuthError> {
        let draft = input.validate()?;
        let password_hash = password::hash(&draft.password)?;

        let user = self
            .users
            .create(draft, password_hash, self.basket_base_url)
            .await?;

        Ok(user)
    }

    /// Login with email and password, returning a fresh bearer token.
    ///
    /// Unknown email, unparsable email, and wrong password all yield the
    /// same `AuthError::InvalidCredentials`; nothing reveals which check
    /// failed.
    ///
    /// Note that a user registered a moment ago may not be visible
    /// through the email view yet (the index refresh window); until it
    /// is, login answers as if the user did not exist.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` on any credential
    /// mismatch, `AuthError` for store or signing failures.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let Ok(email) = Email::parse(email) else {
            return Err(AuthError::InvalidCredentials);
        };

        let Some(user) = self.users.find_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        if !password::verify(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(self.tokens.issue(user.uuid)?)
    }

    /// Resolve a presented bearer token to a live user.
    ///
    /// An unverifiable token and a token whose subject has been deleted
    /// both yield `AuthError::InvalidToken` - the existence check is what
    /// actually revokes a deleted user's outstanding tokens.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` when the token does not resolve,
    /// `AuthError::Store` if the lookup itself fails.
    pub async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let Some(user_uuid) = self.tokens.decode(token) else {
            return Err(AuthError::InvalidToken);
        };

        self.users
            .find_by_uuid(user_uuid)
            .await?
            .ok_or(AuthError::InvalidToken)
    }

    /// Replace the user's profile fields wholesale.
    ///
    /// The password digest is replaced only when the update supplies a
    /// new password; otherwise the existing hash is kept untouched
    /// (never re-hashed).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` for bad input;
    /// `AuthError::Store(StoreError::Conflict)` if another writer updated
    /// the document since it was read (retryable by the caller).
    pub async fn update_profile(&self, mut user: User, input: UserUpdate) -> Result<User, AuthError> {
        let draft = input.validate()?;

        user.first_name = draft.first_name;
        user.last_name = draft.last_name;
        user.email = draft.email;
        user.shipping_address = draft.shipping_address;
        if let Some(new_password) = draft.new_password {
            user.password_hash = password::hash(&new_password)?;
        }

        Ok(self.users.save(&user).await?)
    }

    /// Delete the user's account.
    ///
    /// Outstanding tokens for the user die with the document: they still
    /// carry a valid signature but no longer resolve.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store(StoreError::Conflict)` on a stale
    /// revision, `AuthError::Store` otherwise.
    pub async fn delete_account(&self, user: &User) -> Result<(), AuthError> {
        Ok(self.users.delete(user).await?)
    }
}
