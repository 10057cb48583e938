//! Payment-method domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use orchard_core::{CardNumber, CardNumberError, PaymentMethodUuid, UserUuid};

use super::{DocumentError, DocumentMeta};

/// Entity-kind tag stored in every payment-method document.
pub const DOC_KIND: &str = "payment_method";

/// Wire form of a payment method as persisted in the document store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethodDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "_rev", skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub payment_uuid: PaymentMethodUuid,
    pub name_on_card: String,
    /// Stored as presented - no masking or tokenization in this service.
    pub card_number: String,
    pub expiry_date: DateTime<Utc>,
    pub security_code: String,
    pub billing_address_zip: String,
    /// Owning user, stamped at creation.
    pub user_uuid: UserUuid,
}

/// A payment method (trusted domain type).
///
/// Created only in the context of an authenticated user. Update and
/// delete are not yet supported.
#[derive(Debug, Clone)]
pub struct PaymentMethod {
    pub uuid: PaymentMethodUuid,
    pub name_on_card: String,
    pub card_number: CardNumber,
    pub expiry_date: DateTime<Utc>,
    pub security_code: String,
    pub billing_address_zip: String,
    pub user_uuid: UserUuid,
    /// Store identity, carried opaquely.
    pub doc: DocumentMeta,
}

impl TryFrom<PaymentMethodDocument> for PaymentMethod {
    type Error = DocumentError;

    fn try_from(document: PaymentMethodDocument) -> Result<Self, Self::Error> {
        let id = document.id.ok_or(DocumentError::MissingMeta)?;
        let rev = document.rev.ok_or(DocumentError::MissingMeta)?;
        let card_number = CardNumber::parse(&document.card_number)?;

        Ok(Self {
            uuid: document.payment_uuid,
            name_on_card: document.name_on_card,
            card_number,
            expiry_date: document.expiry_date,
            security_code: document.security_code,
            billing_address_zip: document.billing_address_zip,
            user_uuid: document.user_uuid,
            doc: DocumentMeta { id, rev },
        })
    }
}

/// Errors validating a payment-method draft.
#[derive(Debug, Error)]
pub enum PaymentMethodValidationError {
    #[error("invalid card number: {0}")]
    Card(#[from] CardNumberError),
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Untrusted payment-method creation input.
#[derive(Debug, Deserialize)]
pub struct NewPaymentMethod {
    pub name_on_card: String,
    pub card_number: String,
    pub expiry_date: DateTime<Utc>,
    pub security_code: String,
    pub billing_address_zip: String,
}

impl NewPaymentMethod {
    /// Validate the draft into its trusted form.
    ///
    /// The card number is checked here, at input-parsing time; a failure
    /// aborts creation before anything touches the store.
    ///
    /// # Errors
    ///
    /// Returns `PaymentMethodValidationError` for a card number failing
    /// format or checksum rules, or any empty required field.
    pub fn validate(self) -> Result<PaymentMethodDraft, PaymentMethodValidationError> {
        let card_number = CardNumber::parse(&self.card_number)?;
        require_non_empty("name_on_card", &self.name_on_card)?;
        require_non_empty("security_code", &self.security_code)?;
        require_non_empty("billing_address_zip", &self.billing_address_zip)?;

        Ok(PaymentMethodDraft {
            name_on_card: self.name_on_card,
            card_number,
            expiry_date: self.expiry_date,
            security_code: self.security_code,
            billing_address_zip: self.billing_address_zip,
        })
    }
}

/// Validated payment-method draft.
#[derive(Debug)]
pub struct PaymentMethodDraft {
    pub name_on_card: String,
    pub card_number: CardNumber,
    pub expiry_date: DateTime<Utc>,
    pub security_code: String,
    pub billing_address_zip: String,
}

/// Response projection of a payment method.
#[derive(Debug, Serialize)]
pub struct PaymentMethodResponse {
    pub payment_uuid: PaymentMethodUuid,
    pub name_on_card: String,
    pub card_number: CardNumber,
    pub expiry_date: DateTime<Utc>,
    pub security_code: String,
    pub billing_address_zip: String,
    pub user_uuid: UserUuid,
}

impl From<&PaymentMethod> for PaymentMethodResponse {
    fn from(payment_method: &PaymentMethod) -> Self {
        Self {
            payment_uuid: payment_method.uuid,
            name_on_card: payment_method.name_on_card.clone(),
            card_number: payment_method.card_number.clone(),
            expiry_date: payment_method.expiry_date,
            security_code: payment_method.security_code.clone(),
            billing_address_zip: payment_method.billing_address_zip.clone(),
            user_uuid: payment_method.user_uuid,
        }
    }
}

fn require_non_empty(
    field: &'static str,
    value: &str,
) -> Result<(), PaymentMethodValidationError> {
    if value.is_empty() {
        return Err(PaymentMethodValidationError::Empty(field));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn new_payment_method(card_number: &str) -> NewPaymentMethod {
        NewPaymentMethod {
            name_on_card: "Ada Lovelace".to_string(),
            card_number: card_number.to_string(),
            expiry_date: "2027-05-01T00:00:00Z".parse().unwrap(),
            security_code: "123".to_string(),
            billing_address_zip: "94110".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_luhn_valid_card() {
        let draft = new_payment_method("4539148803436467").validate().unwrap();
        assert_eq!(draft.card_number.as_str(), "4539148803436467");
    }

    #[test]
    fn test_validate_rejects_bad_checksum() {
        let result = new_payment_method("4539148803436468").validate();
        assert!(matches!(
            result,
            Err(PaymentMethodValidationError::Card(
                CardNumberError::ChecksumFailed
            ))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let mut draft = new_payment_method("4539148803436467");
        draft.name_on_card = String::new();
        assert!(matches!(
            draft.validate(),
            Err(PaymentMethodValidationError::Empty("name_on_card"))
        ));
    }

    #[test]
    fn test_document_to_domain() {
        let uuid = PaymentMethodUuid::random();
        let owner = UserUuid::random();
        let document = PaymentMethodDocument {
            id: Some("doc1".to_string()),
            rev: Some("1-abc".to_string()),
            kind: DOC_KIND.to_string(),
            payment_uuid: uuid,
            name_on_card: "Ada Lovelace".to_string(),
            card_number: "4539148803436467".to_string(),
            expiry_date: "2027-05-01T00:00:00Z".parse().unwrap(),
            security_code: "123".to_string(),
            billing_address_zip: "94110".to_string(),
            user_uuid: owner,
        };

        let payment_method = PaymentMethod::try_from(document).unwrap();
        assert_eq!(payment_method.uuid, uuid);
        assert_eq!(payment_method.user_uuid, owner);
        assert_eq!(payment_method.doc.rev, "1-abc");
    }

    #[test]
    fn test_document_with_bad_card_is_rejected() {
        let document = PaymentMethodDocument {
            id: Some("doc1".to_string()),
            rev: Some("1-abc".to_string()),
            kind: DOC_KIND.to_string(),
            payment_uuid: PaymentMethodUuid::random(),
            name_on_card: "Ada Lovelace".to_string(),
            card_number: "not-a-card".to_string(),
            expiry_date: "2027-05-01T00:00:00Z".parse().unwrap(),
            security_code: "123".to_string(),
            billing_address_zip: "94110".to_string(),
            user_uuid: UserUuid::random(),
        };

        assert!(matches!(
            PaymentMethod::try_from(document),
            Err(DocumentError::Card(_))
        ));
    }

    #[test]
    fn test_wire_field_names() {
        let document = PaymentMethodDocument {
            id: None,
            rev: None,
            kind: DOC_KIND.to_string(),
            payment_uuid: PaymentMethodUuid::random(),
            name_on_card: "Ada Lovelace".to_string(),
            card_number: "4539148803436467".to_string(),
            expiry_date: "2027-05-01T00:00:00Z".parse().unwrap(),
            security_code: "123".to_string(),
            billing_address_zip: "94110".to_string(),
            user_uuid: UserUuid::random(),
        };

        let json = serde_json::to_value(document).unwrap();
        assert_eq!(json["type"], "payment_method");
        assert!(json.get("payment_uuid").is_some());
        assert!(json.get("_id").is_none());
    }
}
