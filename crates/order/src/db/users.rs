//! User repository for document-store operations.
//!
//! Lookups go through the registered secondary-index views; writes use
//! the document's revision marker for optimistic concurrency.

use orchard_core::{Email, UserUuid};

use super::views;
use super::{CouchClient, StoreError, ViewRow};
use crate::models::user::{DOC_KIND, User, UserDocument, UserDraft};

/// Repository for user document operations.
pub struct UserRepository<'a> {
    db: &'a CouchClient,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(db: &'a CouchClient) -> Self {
        Self { db }
    }

    /// Look a user up by email through the `user_by_email` view.
    ///
    /// Email uniqueness is an application-level invariant the view does
    /// not enforce; the first matching row wins.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or the stored document
    /// does not decode.
    pub async fn find_by_email(&self, email: &Email) -> Result<Option<User>, StoreError> {
        let rows = self
            .db
            .query_view(views::USER_DESIGN, views::USER_BY_EMAIL, email.as_str())
            .await?;
        first_user(rows)
    }

    /// Look a user up by uuid through the `user_by_uuid` view.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or the stored document
    /// does not decode.
    pub async fn find_by_uuid(&self, uuid: UserUuid) -> Result<Option<User>, StoreError> {
        let rows = self
            .db
            .query_view(views::USER_DESIGN, views::USER_BY_UUID, &uuid.to_string())
            .await?;
        first_user(rows)
    }

    /// Persist a new user from a validated draft and a password digest
    /// produced exactly once by the credential codec.
    ///
    /// Assigns a fresh uuid, tags the document with its entity kind, and
    /// stamps the user's basket URL. No uniqueness check runs on the
    /// email before insert (known gap, kept deliberately).
    ///
    /// Note the consistency window: the created user is not guaranteed to
    /// be visible through the views until the store refreshes its index.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    pub async fn create(
        &self,
        draft: UserDraft,
        password_hash: String,
        basket_base_url: &str,
    ) -> Result<User, StoreError> {
        let uuid = UserUuid::random();
        let basket = format!("{basket_base_url}{uuid}");

        let document = UserDocument {
            id: None,
            rev: None,
            kind: DOC_KIND.to_string(),
            user_uuid: uuid,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email.as_str().to_string(),
            password: password_hash,
            shipping_address: draft.shipping_address,
            payment_methods: vec![],
            basket,
        };

        let meta = self
            .db
            .create_document(&serde_json::to_value(&document)?)
            .await?;

        let stored = UserDocument {
            id: Some(meta.id),
            rev: Some(meta.rev),
            ..document
        };
        User::try_from(stored).map_err(|e| StoreError::Corrupt(e.to_string()))
    }

    /// Full-replace write using the revision the caller last read.
    ///
    /// A stale revision surfaces as `StoreError::Conflict` - retryable by
    /// the caller, never retried or overwritten here.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` on staleness, `StoreError` otherwise.
    pub async fn save(&self, user: &User) -> Result<User, StoreError> {
        let document = user.to_document();
        let meta = self
            .db
            .update_document(&user.doc.id, &serde_json::to_value(&document)?)
            .await?;

        let mut saved = user.clone();
        saved.doc = meta;
        Ok(saved)
    }

    /// Delete the user's document by id and revision.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` on staleness, `StoreError` otherwise.
    pub async fn delete(&self, user: &User) -> Result<(), StoreError> {
        self.db.delete_document(&user.doc.id, &user.doc.rev).await
    }
}

/// Decode the first view row, if any, into a user.
fn first_user(rows: Vec<ViewRow>) -> Result<Option<User>, StoreError> {
    let Some(row) = rows.into_iter().next() else {
        return Ok(None);
    };

    let document: UserDocument = serde_json::from_value(row.value)?;
    let user = User::try_from(document).map_err(|e| StoreError::Corrupt(e.to_string()))?;
    Ok(Some(user))
}
