use super::transaction::Transaction;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub father_name: String,
    pub phone: String,
    pub nid: String,
    pub address: String,
    /// Default vehicle type used when a recharge does not name one
    pub vehicle_type_id: String,
    pub image_url: Option<String>,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub created_at: DateTime<Utc>,
    pub deleted: bool,
    #[schema(value_type = Option<String>)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Client {
    pub fn is_active(&self) -> bool {
        !self.deleted
    }
}

/// A client together with its active transactions and signed total due.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ClientWithTransactions {
    pub client: Client,
    pub transactions: Vec<Transaction>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_due: Decimal,
}

#[derive(Clone, Debug, Default)]
pub struct NewClient {
    pub id: Option<String>,
    pub name: String,
    pub father_name: String,
    pub phone: String,
    pub nid: String,
    pub address: String,
    pub vehicle_type_id: String,
    pub image_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Profile edit; `None` keeps the current value.
#[derive(Clone, Debug, Default)]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub father_name: Option<String>,
    pub phone: Option<String>,
    pub nid: Option<String>,
    pub address: Option<String>,
    pub vehicle_type_id: Option<String>,
    pub image_url: Option<String>,
}
