//! Payment-method repository for document-store operations.

use orchard_core::PaymentMethodUuid;

use super::users::UserRepository;
use super::views;
use super::{CouchClient, StoreError, ViewRow};
use crate::models::payment_method::{
    DOC_KIND, PaymentMethod, PaymentMethodDocument, PaymentMethodDraft,
};
use crate::models::user::User;

/// Repository for payment-method document operations.
pub struct PaymentMethodRepository<'a> {
    db: &'a CouchClient,
}

impl<'a> PaymentMethodRepository<'a> {
    /// Create a new payment-method repository.
    #[must_use]
    pub const fn new(db: &'a CouchClient) -> Self {
        Self { db }
    }

    /// Persist a new payment method for `owner`, then append its uuid to
    /// the owner's reference list.
    ///
    /// The two writes have no cross-document atomicity (the store offers
    /// none). The payment-method document is the source of truth: if the
    /// owner update fails - or loses a concurrent last-write-wins race -
    /// the payment method still exists and is independently fetchable.
    /// The failed append is logged at warn level, never rolled back.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting the payment-method document
    /// itself fails. Owner-update failures do not fail the operation.
    pub async fn create(
        &self,
        draft: PaymentMethodDraft,
        owner: &User,
    ) -> Result<PaymentMethod, StoreError> {
        let uuid = PaymentMethodUuid::random();

        let document = PaymentMethodDocument {
            id: None,
            rev: None,
            kind: DOC_KIND.to_string(),
            payment_uuid: uuid,
            name_on_card: draft.name_on_card,
            card_number: draft.card_number.into_inner(),
            expiry_date: draft.expiry_date,
            security_code: draft.security_code,
            billing_address_zip: draft.billing_address_zip,
            user_uuid: owner.uuid,
        };

        let meta = self
            .db
            .create_document(&serde_json::to_value(&document)?)
            .await?;

        let stored = PaymentMethodDocument {
            id: Some(meta.id),
            rev: Some(meta.rev),
            ..document
        };
        let payment_method =
            PaymentMethod::try_from(stored).map_err(|e| StoreError::Corrupt(e.to_string()))?;

        // Best-effort dual write: append the reference to the owner.
        let mut updated_owner = owner.clone();
        updated_owner.payment_methods.push(uuid);
        if let Err(error) = UserRepository::new(self.db).save(&updated_owner).await {
            tracing::warn!(
                error = %error,
                user = %owner.uuid,
                payment_method = %uuid,
                "failed to append payment method to owner's reference list"
            );
        }

        Ok(payment_method)
    }

    /// Look a payment method up by uuid through the
    /// `payment_method_by_uuid` view.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or the stored document
    /// does not decode.
    pub async fn find_by_uuid(
        &self,
        uuid: PaymentMethodUuid,
    ) -> Result<Option<PaymentMethod>, StoreError> {
        let rows = self
            .db
            .query_view(
                views::PAYMENT_METHOD_DESIGN,
                views::PAYMENT_METHOD_BY_UUID,
                &uuid.to_string(),
            )
            .await?;
        first_payment_method(rows)
    }
}

/// Decode the first view row, if any, into a payment method.
fn first_payment_method(rows: Vec<ViewRow>) -> Result<Option<PaymentMethod>, StoreError> {
    let Some(row) = rows.into_iter().next() else {
        return Ok(None);
    };

    let document: PaymentMethodDocument = serde_json::from_value(row.value)?;
    let payment_method =
        PaymentMethod::try_from(document).map_err(|e| StoreError::Corrupt(e.to_string()))?;
    Ok(Some(payment_method))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use orchard_core::UserUuid;
    use serde_json::json;

    #[test]
    fn test_first_payment_method_empty_rows() {
        assert!(first_payment_method(vec![]).unwrap().is_none());
    }

    #[test]
    fn test_first_payment_method_decodes_document() {
        let uuid = PaymentMethodUuid::random();
        let owner = UserUuid::random();
        let row = ViewRow {
            id: "doc1".to_string(),
            key: json!(uuid.to_string()),
            value: json!({
                "_id": "doc1",
                "_rev": "1-abc",
                "type": "payment_method",
                "payment_uuid": uuid,
                "name_on_card": "Ada Lovelace",
                "card_number": "4539148803436467",
                "expiry_date": "2027-05-01T00:00:00Z",
                "security_code": "123",
                "billing_address_zip": "94110",
                "user_uuid": owner
            }),
        };

        let payment_method = first_payment_method(vec![row]).unwrap().unwrap();
        assert_eq!(payment_method.uuid, uuid);
        assert_eq!(payment_method.user_uuid, owner);
        assert_eq!(payment_method.card_number.as_str(), "4539148803436467");
    }
}
