//! User domain types.
//!
//! These types represent validated domain objects separate from the
//! persisted document shape.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use orchard_core::{Email, EmailError, PaymentMethodUuid, UserUuid};

use super::{DocumentError, DocumentMeta};

/// Entity-kind tag stored in every user document.
pub const DOC_KIND: &str = "user";

/// Wire form of a user as persisted in the document store.
///
/// Field names match the stored layout; this struct exists only at the
/// store boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "_rev", skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub user_uuid: UserUuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Salted password digest - never plaintext after creation.
    pub password: String,
    pub shipping_address: String,
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethodUuid>,
    #[serde(default)]
    pub basket: String,
}

/// A user (trusted domain type).
///
/// Owned exclusively by the order service; the basket and catalog
/// services hold no copy.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user identifier, immutable after creation.
    pub uuid: UserUuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    /// Salted password digest.
    pub password_hash: String,
    pub shipping_address: String,
    /// Ordered references to this user's payment methods.
    pub payment_methods: Vec<PaymentMethodUuid>,
    /// URL of this user's basket in the basket service.
    pub basket: String,
    /// Store identity, carried opaquely for optimistic updates.
    pub doc: DocumentMeta,
}

impl User {
    /// Wire form for a full-replace write, carrying the current revision.
    #[must_use]
    pub fn to_document(&self) -> UserDocument {
        UserDocument {
            id: Some(self.doc.id.clone()),
            rev: Some(self.doc.rev.clone()),
            kind: DOC_KIND.to_string(),
            user_uuid: self.uuid,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.as_str().to_string(),
            password: self.password_hash.clone(),
            shipping_address: self.shipping_address.clone(),
            payment_methods: self.payment_methods.clone(),
            basket: self.basket.clone(),
        }
    }
}

impl TryFrom<UserDocument> for User {
    type Error = DocumentError;

    fn try_from(document: UserDocument) -> Result<Self, Self::Error> {
        let id = document.id.ok_or(DocumentError::MissingMeta)?;
        let rev = document.rev.ok_or(DocumentError::MissingMeta)?;
        let email = Email::parse(&document.email)?;

        Ok(Self {
            uuid: document.user_uuid,
            first_name: document.first_name,
            last_name: document.last_name,
            email,
            password_hash: document.password,
            shipping_address: document.shipping_address,
            payment_methods: document.payment_methods,
            basket: document.basket,
            doc: DocumentMeta { id, rev },
        })
    }
}

/// Errors validating a user draft.
#[derive(Debug, Error)]
pub enum UserValidationError {
    #[error("invalid email: {0}")]
    Email(#[from] EmailError),
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Untrusted registration input.
#[derive(Debug, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub shipping_address: String,
}

impl NewUser {
    /// Validate the draft into its trusted form.
    ///
    /// # Errors
    ///
    /// Returns `UserValidationError` for an unparsable email or any empty
    /// required field.
    pub fn validate(self) -> Result<UserDraft, UserValidationError> {
        let email = Email::parse(&self.email)?;
        require_non_empty("first_name", &self.first_name)?;
        require_non_empty("last_name", &self.last_name)?;
        require_non_empty("password", &self.password)?;
        require_non_empty("shipping_address", &self.shipping_address)?;

        Ok(UserDraft {
            first_name: self.first_name,
            last_name: self.last_name,
            email,
            password: self.password,
            shipping_address: self.shipping_address,
        })
    }
}

/// Validated registration draft; the password is still plaintext here and
/// is hashed exactly once on the way into the store.
#[derive(Debug)]
pub struct UserDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub password: String,
    pub shipping_address: String,
}

/// Untrusted profile-update input.
///
/// Fields are replaced wholesale; the password is re-hashed only when
/// `new_password` is supplied.
#[derive(Debug, Deserialize)]
pub struct UserUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub shipping_address: String,
    #[serde(default)]
    pub new_password: Option<String>,
}

impl UserUpdate {
    /// Validate the update into its trusted form.
    ///
    /// An empty `new_password` counts as "no new password supplied".
    ///
    /// # Errors
    ///
    /// Returns `UserValidationError` for an unparsable email or any empty
    /// required field.
    pub fn validate(self) -> Result<UserUpdateDraft, UserValidationError> {
        let email = Email::parse(&self.email)?;
        require_non_empty("first_name", &self.first_name)?;
        require_non_empty("last_name", &self.last_name)?;
        require_non_empty("shipping_address", &self.shipping_address)?;

        Ok(UserUpdateDraft {
            first_name: self.first_name,
            last_name: self.last_name,
            email,
            shipping_address: self.shipping_address,
            new_password: self.new_password.filter(|p| !p.is_empty()),
        })
    }
}

/// Validated profile-update draft.
#[derive(Debug)]
pub struct UserUpdateDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub shipping_address: String,
    pub new_password: Option<String>,
}

/// Response projection of a user - never carries the password digest.
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub user_uuid: UserUuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub shipping_address: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            user_uuid: user.uuid,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            shipping_address: user.shipping_address.clone(),
        }
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), UserValidationError> {
    if value.is_empty() {
        return Err(UserValidationError::Empty(field));
    }
    Ok(())
}
