use super::{Client, Transaction, VehicleType};
use crate::core::ledger::{DuePoint, LedgerSummary};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A transaction row as listed outside a client profile.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct LabelledTransaction {
    pub transaction: Transaction,
    pub client_name: String,
    /// Vehicle type name, "Previous Due" for adjustments, or "Unknown"
    pub type_label: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionPage {
    pub transactions: Vec<LabelledTransaction>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_transactions: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ClientListing {
    pub clients: Vec<ClientDue>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_clients: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ClientDue {
    pub client_id: String,
    pub name: String,
    pub phone: String,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
    /// Signed total; negative means the client holds credit
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub due: Decimal,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ClientProfile {
    pub client: Client,
    pub vehicle_type: Option<VehicleType>,
    pub transactions: Vec<Transaction>,
    /// Signed total; credit offsets debt here
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_due: Decimal,
    pub summary: LedgerSummary,
    pub due_trend: Vec<DuePoint>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardOverview {
    pub client_count: usize,
    pub transaction_count: usize,
    /// Sum of positive dues across all active clients
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_due: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub net_due: Decimal,
    /// Payments inside the requested period
    pub period_summary: LedgerSummary,
    pub top_dues: Vec<ClientDue>,
    #[schema(value_type = String)]
    pub generated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TrashListing {
    pub clients: Vec<Client>,
    pub transactions: Vec<LabelledTransaction>,
}
