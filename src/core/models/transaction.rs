use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One ledger row: a recharge visit, or a "previous due" adjustment when
/// `vehicle_type_id` is `None`.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub client_id: String,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub timestamp: DateTime<Utc>,
    pub vehicle_type_id: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub payable_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub cash_received: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub due: Decimal,
    #[schema(value_type = String)]
    pub modified_at: DateTime<Utc>,
    pub deleted: bool,
    #[schema(value_type = Option<String>)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn is_adjustment(&self) -> bool {
        self.vehicle_type_id.is_none()
    }

    pub fn is_active(&self) -> bool {
        !self.deleted
    }
}
