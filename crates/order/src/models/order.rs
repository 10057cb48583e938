//! Order domain types.
//!
//! The order entity is a data-model placeholder: no persistence logic
//! exists yet and every order endpoint answers "not implemented".

use serde::{Deserialize, Serialize};

use orchard_core::{OrderUuid, UserUuid};

/// A customer order (placeholder).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_uuid: OrderUuid,
    /// Catalog item URLs.
    pub items: Vec<String>,
    pub total_cost: f64,
    pub is_paid: bool,
    pub user_uuid: UserUuid,
}
