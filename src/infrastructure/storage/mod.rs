use crate::core::errors::LedgerError;
use crate::core::models::{Client, Transaction, VehicleType};
use async_trait::async_trait;

/// Persistence for clients, vehicle types and their ledger rows.
///
/// Reads return trashed rows too; filtering by `deleted` is the caller's
/// business so the trash view and the active views share one store.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn save_vehicle_type(&self, vehicle_type: VehicleType) -> Result<(), LedgerError>;
    async fn get_vehicle_type(&self, vehicle_type_id: &str) -> Result<Option<VehicleType>, LedgerError>;
    async fn list_vehicle_types(&self) -> Result<Vec<VehicleType>, LedgerError>;
    async fn delete_vehicle_type(&self, vehicle_type_id: &str) -> Result<(), LedgerError>;

    async fn save_client(&self, client: Client) -> Result<(), LedgerError>;
    async fn get_client(&self, client_id: &str) -> Result<Option<Client>, LedgerError>;
    async fn list_clients(&self) -> Result<Vec<Client>, LedgerError>;
    /// Removes the client and every transaction it owns.
    async fn purge_client(&self, client_id: &str) -> Result<(), LedgerError>;

    async fn save_transaction(&self, transaction: Transaction) -> Result<(), LedgerError>;
    async fn save_transactions(&self, transactions: Vec<Transaction>) -> Result<(), LedgerError>;
    async fn get_transaction(&self, transaction_id: &str) -> Result<Option<Transaction>, LedgerError>;
    async fn get_client_transactions(&self, client_id: &str) -> Result<Vec<Transaction>, LedgerError>;
    async fn list_transactions(&self) -> Result<Vec<Transaction>, LedgerError>;
    async fn purge_transaction(&self, transaction_id: &str) -> Result<(), LedgerError>;
}

pub mod in_memory;
