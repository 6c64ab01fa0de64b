use crate::core::errors::LedgerError;
use crate::core::models::{Client, Transaction, VehicleType};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    vehicle_types: Arc<RwLock<HashMap<String, VehicleType>>>,
    clients: Arc<RwLock<HashMap<String, Client>>>,
    transactions: Arc<RwLock<HashMap<String, Transaction>>>,
    transactions_by_client: Arc<RwLock<HashMap<String, Vec<String>>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            vehicle_types: Arc::new(RwLock::new(HashMap::new())),
            clients: Arc::new(RwLock::new(HashMap::new())),
            transactions: Arc::new(RwLock::new(HashMap::new())),
            transactions_by_client: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn save_vehicle_type(&self, vehicle_type: VehicleType) -> Result<(), LedgerError> {
        let mut vehicle_types = self.vehicle_types.write().await;
        vehicle_types.insert(vehicle_type.id.clone(), vehicle_type);
        Ok(())
    }

    async fn get_vehicle_type(&self, vehicle_type_id: &str) -> Result<Option<VehicleType>, LedgerError> {
        let vehicle_types = self.vehicle_types.read().await;
        Ok(vehicle_types.get(vehicle_type_id).cloned())
    }

    async fn list_vehicle_types(&self) -> Result<Vec<VehicleType>, LedgerError> {
        let vehicle_types = self.vehicle_types.read().await;
        let mut all: Vec<VehicleType> = vehicle_types.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn delete_vehicle_type(&self, vehicle_type_id: &str) -> Result<(), LedgerError> {
        let mut vehicle_types = self.vehicle_types.write().await;
        vehicle_types.remove(vehicle_type_id);
        Ok(())
    }

    async fn save_client(&self, client: Client) -> Result<(), LedgerError> {
        let mut clients = self.clients.write().await;
        clients.insert(client.id.clone(), client);
        Ok(())
    }

    async fn get_client(&self, client_id: &str) -> Result<Option<Client>, LedgerError> {
        let clients = self.clients.read().await;
        Ok(clients.get(client_id).cloned())
    }

    async fn list_clients(&self) -> Result<Vec<Client>, LedgerError> {
        let clients = self.clients.read().await;
        Ok(clients.values().cloned().collect())
    }

    async fn purge_client(&self, client_id: &str) -> Result<(), LedgerError> {
        let mut clients = self.clients.write().await;
        let mut transactions = self.transactions.write().await;
        let mut transactions_by_client = self.transactions_by_client.write().await;
        clients.remove(client_id);
        let owned = transactions_by_client.remove(client_id).unwrap_or_default();
        debug!("Purging client {} with {} transactions", client_id, owned.len());
        for transaction_id in owned {
            transactions.remove(&transaction_id);
        }
        Ok(())
    }

    async fn save_transaction(&self, transaction: Transaction) -> Result<(), LedgerError> {
        let mut transactions = self.transactions.write().await;
        let mut transactions_by_client = self.transactions_by_client.write().await;
        let owned = transactions_by_client.entry(transaction.client_id.clone()).or_default();
        if !owned.contains(&transaction.id) {
            owned.push(transaction.id.clone());
        }
        transactions.insert(transaction.id.clone(), transaction);
        Ok(())
    }

    async fn save_transactions(&self, batch: Vec<Transaction>) -> Result<(), LedgerError> {
        let mut transactions = self.transactions.write().await;
        let mut transactions_by_client = self.transactions_by_client.write().await;
        for transaction in batch {
            let owned = transactions_by_client.entry(transaction.client_id.clone()).or_default();
            if !owned.contains(&transaction.id) {
                owned.push(transaction.id.clone());
            }
            transactions.insert(transaction.id.clone(), transaction);
        }
        Ok(())
    }

    async fn get_transaction(&self, transaction_id: &str) -> Result<Option<Transaction>, LedgerError> {
        let transactions = self.transactions.read().await;
        Ok(transactions.get(transaction_id).cloned())
    }

    async fn get_client_transactions(&self, client_id: &str) -> Result<Vec<Transaction>, LedgerError> {
        let transactions = self.transactions.read().await;
        let transactions_by_client = self.transactions_by_client.read().await;
        Ok(transactions_by_client
            .get(client_id)
            .map(|ids| ids.iter().filter_map(|id| transactions.get(id).cloned()).collect())
            .unwrap_or_default())
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, LedgerError> {
        let transactions = self.transactions.read().await;
        Ok(transactions.values().cloned().collect())
    }

    async fn purge_transaction(&self, transaction_id: &str) -> Result<(), LedgerError> {
        let mut transactions = self.transactions.write().await;
        let mut transactions_by_client = self.transactions_by_client.write().await;
        if let Some(transaction) = transactions.remove(transaction_id) {
            if let Some(owned) = transactions_by_client.get_mut(&transaction.client_id) {
                owned.retain(|id| id != transaction_id);
            }
        }
        Ok(())
    }
}
