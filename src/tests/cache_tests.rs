use crate::core::errors::LedgerError;
use crate::core::ledger::{NewTransaction, Period, SortOrder, TransactionSortKey, VehicleTypeSelection};
use crate::core::models::{Client, NewClient, Transaction, VehicleType};
use crate::core::services::LedgerService;
use crate::infrastructure::cache::in_memory::InMemoryCache;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::Storage;
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Notify;

/// Holds the first armed transaction read after it has taken its snapshot,
/// so a write can commit while the reader still works on old rows.
#[derive(Default)]
struct ReadGate {
    armed: AtomicBool,
    entered: Notify,
    release: Notify,
}

impl ReadGate {
    async fn hold(&self) {
        if self.armed.swap(false, Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
    }
}

struct GatedStorage {
    inner: InMemoryStorage,
    gate: Arc<ReadGate>,
}

#[async_trait]
impl Storage for GatedStorage {
    async fn save_vehicle_type(&self, vehicle_type: VehicleType) -> Result<(), LedgerError> {
        self.inner.save_vehicle_type(vehicle_type).await
    }
    async fn get_vehicle_type(&self, vehicle_type_id: &str) -> Result<Option<VehicleType>, LedgerError> {
        self.inner.get_vehicle_type(vehicle_type_id).await
    }
    async fn list_vehicle_types(&self) -> Result<Vec<VehicleType>, LedgerError> {
        self.inner.list_vehicle_types().await
    }
    async fn delete_vehicle_type(&self, vehicle_type_id: &str) -> Result<(), LedgerError> {
        self.inner.delete_vehicle_type(vehicle_type_id).await
    }

    async fn save_client(&self, client: Client) -> Result<(), LedgerError> {
        self.inner.save_client(client).await
    }
    async fn get_client(&self, client_id: &str) -> Result<Option<Client>, LedgerError> {
        self.inner.get_client(client_id).await
    }
    async fn list_clients(&self) -> Result<Vec<Client>, LedgerError> {
        self.inner.list_clients().await
    }
    async fn purge_client(&self, client_id: &str) -> Result<(), LedgerError> {
        self.inner.purge_client(client_id).await
    }

    async fn save_transaction(&self, transaction: Transaction) -> Result<(), LedgerError> {
        self.inner.save_transaction(transaction).await
    }
    async fn save_transactions(&self, transactions: Vec<Transaction>) -> Result<(), LedgerError> {
        self.inner.save_transactions(transactions).await
    }
    async fn get_transaction(&self, transaction_id: &str) -> Result<Option<Transaction>, LedgerError> {
        self.inner.get_transaction(transaction_id).await
    }
    async fn get_client_transactions(&self, client_id: &str) -> Result<Vec<Transaction>, LedgerError> {
        let rows = self.inner.get_client_transactions(client_id).await?;
        self.gate.hold().await;
        Ok(rows)
    }
    async fn list_transactions(&self) -> Result<Vec<Transaction>, LedgerError> {
        let rows = self.inner.list_transactions().await?;
        self.gate.hold().await;
        Ok(rows)
    }
    async fn purge_transaction(&self, transaction_id: &str) -> Result<(), LedgerError> {
        self.inner.purge_transaction(transaction_id).await
    }
}

type GatedService = LedgerService<InMemoryLogging, GatedStorage, InMemoryCache>;

async fn gated_service_with_client() -> (GatedService, Arc<ReadGate>, Client) {
    let gate = Arc::new(ReadGate::default());
    let storage = GatedStorage {
        inner: InMemoryStorage::new(),
        gate: gate.clone(),
    };
    let service = LedgerService::new(storage, InMemoryLogging::new(), InMemoryCache::new(), Duration::from_secs(30));
    let easybike = service
        .add_vehicle_type("Easy Bike".to_string(), Decimal::from(150))
        .await
        .unwrap();
    let client = service
        .add_client(NewClient {
            name: "Rahim".to_string(),
            phone: "01711000000".to_string(),
            vehicle_type_id: easybike.id,
            ..Default::default()
        })
        .await
        .unwrap();
    (service, gate, client)
}

fn previous_due(amount: i64) -> NewTransaction {
    NewTransaction {
        vehicle_type: VehicleTypeSelection::PreviousDue,
        payable_amount: Some(Decimal::from(amount)),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_dashboard_computed_during_write_is_not_served_after_it() {
    let (service, gate, client) = gated_service_with_client().await;
    gate.armed.store(true, Ordering::SeqCst);

    let (in_flight, _) = tokio::join!(service.dashboard_overview(Period::All), async {
        gate.entered.notified().await;
        service.add_transaction(&client.id, previous_due(400)).await.unwrap();
        gate.release.notify_one();
    });
    // The overlapping read answered from rows taken before the write.
    assert_eq!(in_flight.unwrap().total_due, Decimal::ZERO);

    let overview = service.dashboard_overview(Period::All).await.unwrap();
    assert_eq!(overview.total_due, Decimal::from(400));
    assert_eq!(overview.transaction_count, 1);
}

#[tokio::test]
async fn test_profile_computed_during_write_is_not_served_after_it() {
    let (service, gate, client) = gated_service_with_client().await;
    gate.armed.store(true, Ordering::SeqCst);

    let (in_flight, _) = tokio::join!(
        service.get_client_profile(&client.id, TransactionSortKey::Timestamp, SortOrder::Desc),
        async {
            gate.entered.notified().await;
            service.add_transaction(&client.id, previous_due(80)).await.unwrap();
            gate.release.notify_one();
        }
    );
    assert!(in_flight.unwrap().transactions.is_empty());

    let profile = service
        .get_client_profile(&client.id, TransactionSortKey::Timestamp, SortOrder::Desc)
        .await
        .unwrap();
    assert_eq!(profile.total_due, Decimal::from(80));
    assert_eq!(profile.transactions.len(), 1);
}
