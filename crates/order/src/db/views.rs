//! Secondary-index view definitions and startup registration.
//!
//! The store exposes no ad-hoc query language; every lookup that is not
//! by primary key goes through one of the views declared here. Each view
//! is a deterministic map-only projection emitting one row per matching
//! document, keyed by email or by uuid.
//!
//! Registration happens once per process start via [`register_all`] and
//! is idempotent: an already-present design document answers 409 and is
//! skipped. Multiple service instances can race the registration without
//! coordination.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{CouchClient, StoreError};

/// Design document grouping the user views.
pub const USER_DESIGN: &str = "user";
/// View keyed by user email.
pub const USER_BY_EMAIL: &str = "user_by_email";
/// View keyed by user uuid.
pub const USER_BY_UUID: &str = "user_by_uuid";

/// Design document grouping the payment-method views.
pub const PAYMENT_METHOD_DESIGN: &str = "payment_method";
/// View keyed by payment-method uuid.
pub const PAYMENT_METHOD_BY_UUID: &str = "payment_method_by_uuid";
/// View keyed by the owning user's uuid.
pub const PAYMENT_METHODS_BY_USER_UUID: &str = "payment_methods_by_user_uuid";

/// A single map-only view definition.
#[derive(Debug, Serialize)]
pub struct ViewDefinition {
    map: &'static str,
}

/// A design document holding a named group of views.
#[derive(Debug, Serialize)]
pub struct DesignDocument {
    #[serde(rename = "_id")]
    id: String,
    views: BTreeMap<&'static str, ViewDefinition>,
    language: &'static str,
}

impl DesignDocument {
    fn new(name: &str, views: BTreeMap<&'static str, ViewDefinition>) -> Self {
        Self {
            id: format!("_design/{name}"),
            views,
            language: "javascript",
        }
    }

    /// Full document id, e.g. `_design/user`.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// The user views: lookup by email and by uuid.
#[must_use]
pub fn user_design() -> DesignDocument {
    let mut views = BTreeMap::new();
    views.insert(
        USER_BY_EMAIL,
        ViewDefinition {
            map: "function(doc) { if (doc.type === 'user') { emit(doc.email, doc); } }",
        },
    );
    views.insert(
        USER_BY_UUID,
        ViewDefinition {
            map: "function(doc) { if (doc.type === 'user') { emit(doc.user_uuid, doc); } }",
        },
    );
    DesignDocument::new(USER_DESIGN, views)
}

/// The payment-method views: lookup by uuid and by owning user.
#[must_use]
pub fn payment_method_design() -> DesignDocument {
    let mut views = BTreeMap::new();
    views.insert(
        PAYMENT_METHOD_BY_UUID,
        ViewDefinition {
            map: "function(doc) { if (doc.type === 'payment_method') { emit(doc.payment_uuid, doc); } }",
        },
    );
    views.insert(
        PAYMENT_METHODS_BY_USER_UUID,
        ViewDefinition {
            map: "function(doc) { if (doc.type === 'payment_method') { emit(doc.user_uuid, doc); } }",
        },
    );
    DesignDocument::new(PAYMENT_METHOD_DESIGN, views)
}

/// Register every view this service depends on.
///
/// Called once at startup, after the database itself has been ensured.
///
/// # Errors
///
/// Returns `StoreError` if the store is unreachable or rejects a design
/// document for any reason other than "already present".
pub async fn register_all(client: &CouchClient) -> Result<(), StoreError> {
    for design in [user_design(), payment_method_design()] {
        let installed = client.put_design_if_absent(&design).await?;
        if installed {
            tracing::info!(design = design.id(), "view design document installed");
        } else {
            tracing::debug!(design = design.id(), "view design document already present");
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_design_shape() {
        let doc = serde_json::to_value(user_design()).unwrap();

        assert_eq!(doc["_id"], "_design/user");
        assert_eq!(doc["language"], "javascript");
        assert!(doc["views"][USER_BY_EMAIL]["map"]
            .as_str()
            .unwrap()
            .contains("doc.email"));
        assert!(doc["views"][USER_BY_UUID]["map"]
            .as_str()
            .unwrap()
            .contains("doc.user_uuid"));
    }

    #[test]
    fn test_payment_method_design_shape() {
        let doc = serde_json::to_value(payment_method_design()).unwrap();

        assert_eq!(doc["_id"], "_design/payment_method");
        let views = doc["views"].as_object().unwrap();
        assert!(views.contains_key(PAYMENT_METHOD_BY_UUID));
        assert!(views.contains_key(PAYMENT_METHODS_BY_USER_UUID));
    }

    #[test]
    fn test_views_filter_on_document_kind() {
        // Every map function must guard on doc.type so documents of the
        // other kind never leak into a view.
        for design in [user_design(), payment_method_design()] {
            let doc = serde_json::to_value(&design).unwrap();
            for (_, view) in doc["views"].as_object().unwrap() {
                assert!(view["map"].as_str().unwrap().contains("doc.type"));
            }
        }
    }
}
