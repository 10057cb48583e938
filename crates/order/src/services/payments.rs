//! Payment-method service.

use thiserror::Error;

use orchard_core::PaymentMethodUuid;

use crate::db::payment_methods::PaymentMethodRepository;
use crate::db::{CouchClient, StoreError};
use crate::models::payment_method::{NewPaymentMethod, PaymentMethod, PaymentMethodValidationError};
use crate::models::user::User;

/// Errors that can occur during payment-method operations.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Invalid input, including card format/checksum failures.
    #[error("invalid input: {0}")]
    Validation(#[from] PaymentMethodValidationError),

    /// Store/repository error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Payment-method service.
pub struct PaymentService<'a> {
    payment_methods: PaymentMethodRepository<'a>,
}

impl<'a> PaymentService<'a> {
    /// Create a new payment-method service.
    #[must_use]
    pub const fn new(db: &'a CouchClient) -> Self {
        Self {
            payment_methods: PaymentMethodRepository::new(db),
        }
    }

    /// Create a payment method for the authenticated owner.
    ///
    /// The card number is validated before anything touches the store; a
    /// validation failure aborts with no partial write.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::Validation` for bad input, `PaymentError`
    /// for store failures.
    pub async fn create(
        &self,
        owner: &User,
        input: NewPaymentMethod,
    ) -> Result<PaymentMethod, PaymentError> {
        let draft = input.validate()?;
        Ok(self.payment_methods.create(draft, owner).await?)
    }

    /// Fetch a payment method by uuid.
    ///
    /// No ownership check runs here: any authenticated user may read any
    /// payment method by identifier (known gap, kept deliberately).
    ///
    /// # Errors
    ///
    /// Returns `PaymentError` for store failures.
    pub async fn get(
        &self,
        uuid: PaymentMethodUuid,
    ) -> Result<Option<PaymentMethod>, PaymentError> {
        Ok(self.payment_methods.find_by_uuid(uuid).await?)
    }
}
