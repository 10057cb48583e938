//! Domain models for the order service.
//!
//! Each persisted entity has three shapes (never one duck-typed blob):
//!
//! - a wire "document" struct matching the persisted field layout
//!   (`_id`, `_rev`, `type`, …), used only at the store boundary;
//! - a trusted domain struct with parsed types (`Email`, `CardNumber`,
//!   uuid newtypes), used everywhere else;
//! - narrow untrusted drafts deserialized from request bodies, turned
//!   into validated drafts by an explicit conversion.

pub mod order;
pub mod payment_method;
pub mod user;

use thiserror::Error;

/// Store-assigned identity of a persisted document.
///
/// The revision marker is carried opaquely and handed back unchanged on
/// writes; the store uses it for optimistic concurrency (a stale marker
/// makes the write fail with a conflict).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMeta {
    /// Store-internal document id.
    pub id: String,
    /// Revision marker read with the document.
    pub rev: String,
}

/// Errors converting a stored document into its trusted domain form.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document lacks its id or revision marker.
    #[error("document missing its id or revision")]
    MissingMeta,

    /// The stored email does not parse.
    #[error("invalid email in document: {0}")]
    Email(#[from] orchard_core::EmailError),

    /// The stored card number does not parse.
    #[error("invalid card number in document: {0}")]
    Card(#[from] orchard_core::CardNumberError),
}
