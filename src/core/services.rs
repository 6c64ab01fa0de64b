use crate::core::constants::{
    CLIENT_ADDED, CLIENT_DELETED, CLIENT_PAGE_SIZE, CLIENT_PURGED, CLIENT_RESTORED, CLIENT_UPDATED,
    DEFAULT_TRANSACTION_PAGE_LIMIT, DUE_TREND_DAYS, MAX_AMOUNT, MAX_NAME_LENGTH, MAX_TEXT_LENGTH,
    MAX_TRANSACTION_PAGE_LIMIT, TOP_DUES_LIMIT, TRANSACTION_ADDED, TRANSACTION_DELETED, TRANSACTION_PURGED,
    TRANSACTION_RESTORED, TRANSACTION_UPDATED, VEHICLE_TYPE_ADDED, VEHICLE_TYPE_DELETED, VEHICLE_TYPE_UPDATED,
};
use crate::core::errors::LedgerError;
use crate::core::ledger::{
    self, ClientSortKey, DueAggregation, NewTransaction, Period, SortOrder, TransactionPatch, TransactionSortKey,
    VehicleTypeSelection,
};
use crate::core::models::{
    AppLog, Client, ClientDue, ClientListing, ClientProfile, ClientUpdate, ClientWithTransactions, DashboardOverview,
    LabelledTransaction, NewClient, Transaction, TransactionPage, TrashListing, VehicleType,
};
use crate::infrastructure::cache::{Cache, cache_keys};
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone, Debug, Default)]
pub struct ClientQuery {
    /// Case-insensitive name or phone substring
    pub search: Option<String>,
    pub sort_by: ClientSortKey,
    pub sort_order: SortOrder,
    pub page: usize,
}

#[derive(Clone, Debug, Default)]
pub struct TransactionQuery {
    pub page: usize,
    pub limit: Option<usize>,
    pub sort_by: TransactionSortKey,
    pub sort_order: SortOrder,
}

pub struct LedgerService<L: LoggingService, S: Storage, C: Cache> {
    storage: S,
    logging: L,
    cache: C,
    cache_ttl: Duration,
    /// Bumped after every committed write; part of every cache key, so a view
    /// computed against older data is never served once the write lands.
    generation: AtomicU64,
}

impl<L: LoggingService, S: Storage, C: Cache> LedgerService<L, S, C> {
    pub fn new(storage: S, logging: L, cache: C, cache_ttl: Duration) -> Self {
        LedgerService {
            storage,
            logging,
            cache,
            cache_ttl,
            generation: AtomicU64::new(0),
        }
    }

    /// Every write goes through here once committed: the generation moves on
    /// and cached views are dropped before the action is recorded.
    async fn after_mutation(&self, action: &str, details: serde_json::Value) -> Result<(), LedgerError> {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.cache.invalidate_all().await?;
        info!(action = action, details = %details, "ledger mutation");
        self.logging.log_action(action, details).await
    }

    fn validate_string_input(&self, field: &str, value: &str, max_length: usize) -> Result<(), LedgerError> {
        if value.trim().is_empty() {
            return Err(LedgerError::invalid_input(
                field,
                format!("Invalid {}", field),
                format!("{} cannot be empty", field),
            ));
        }
        if value.len() > max_length {
            return Err(LedgerError::invalid_input(
                field,
                format!("{} Too Long", field),
                format!("{} cannot exceed {} characters", field, max_length),
            ));
        }
        if value.chars().any(|c| c.is_control() || "<>{}[]".contains(c)) {
            return Err(LedgerError::invalid_input(
                field,
                format!("Invalid {}", field),
                format!("{} contains invalid characters", field),
            ));
        }
        Ok(())
    }

    fn validate_amount_input(&self, field: &str, amount: Decimal, allow_negative: bool) -> Result<(), LedgerError> {
        if !allow_negative && amount.is_sign_negative() && !amount.is_zero() {
            return Err(LedgerError::invalid_input(
                field,
                "Invalid Amount",
                "Amount cannot be negative",
            ));
        }
        if amount.abs() > Decimal::from(MAX_AMOUNT) {
            return Err(LedgerError::invalid_input(
                field,
                "Amount Too Large",
                format!("Amount cannot exceed {}", MAX_AMOUNT),
            ));
        }
        if amount.normalize().scale() > 2 {
            return Err(LedgerError::invalid_input(
                field,
                "Invalid Amount",
                "Amount cannot have more than 2 decimal places",
            ));
        }
        Ok(())
    }

    async fn require_vehicle_type(&self, vehicle_type_id: &str) -> Result<VehicleType, LedgerError> {
        self.storage
            .get_vehicle_type(vehicle_type_id)
            .await?
            .ok_or_else(|| LedgerError::VehicleTypeNotFound(vehicle_type_id.to_string()))
    }

    async fn find_client(&self, client_id: &str) -> Result<Client, LedgerError> {
        self.storage
            .get_client(client_id)
            .await?
            .ok_or_else(|| LedgerError::ClientNotFound(client_id.to_string()))
    }

    async fn find_transaction(&self, transaction_id: &str) -> Result<Transaction, LedgerError> {
        self.storage
            .get_transaction(transaction_id)
            .await?
            .ok_or_else(|| LedgerError::TransactionNotFound(transaction_id.to_string()))
    }

    /// Active client, or not-found when missing or trashed.
    pub async fn get_client(&self, client_id: &str) -> Result<Client, LedgerError> {
        let client = self.find_client(client_id).await?;
        if !client.is_active() {
            return Err(LedgerError::ClientNotFound(client_id.to_string()));
        }
        Ok(client)
    }

    async fn get_client_transaction(&self, client_id: &str, transaction_id: &str) -> Result<Transaction, LedgerError> {
        let transaction = self.find_transaction(transaction_id).await?;
        if transaction.client_id != client_id || !transaction.is_active() {
            return Err(LedgerError::TransactionNotFound(transaction_id.to_string()));
        }
        Ok(transaction)
    }

    /// All active clients, each with its active transactions.
    pub async fn active_ledgers(&self) -> Result<Vec<ClientWithTransactions>, LedgerError> {
        let (clients, transactions) = futures::try_join!(self.storage.list_clients(), self.storage.list_transactions())?;

        let mut by_client: HashMap<String, Vec<Transaction>> = HashMap::new();
        for transaction in transactions.into_iter().filter(Transaction::is_active) {
            by_client
                .entry(transaction.client_id.clone())
                .or_default()
                .push(transaction);
        }

        Ok(clients
            .into_iter()
            .filter(Client::is_active)
            .map(|client| {
                let transactions = by_client.remove(&client.id).unwrap_or_default();
                let total_due = ledger::aggregate_due(&transactions, DueAggregation::Signed);
                ClientWithTransactions {
                    client,
                    transactions,
                    total_due,
                }
            })
            .collect())
    }

    async fn label_transactions(&self, transactions: Vec<Transaction>) -> Result<Vec<LabelledTransaction>, LedgerError> {
        let (clients, vehicle_types) =
            futures::try_join!(self.storage.list_clients(), self.storage.list_vehicle_types())?;
        let client_names: HashMap<String, String> = clients.into_iter().map(|c| (c.id, c.name)).collect();
        let vehicle_types: HashMap<String, VehicleType> =
            vehicle_types.into_iter().map(|vt| (vt.id.clone(), vt)).collect();

        Ok(transactions
            .into_iter()
            .map(|transaction| {
                let vehicle_type = transaction
                    .vehicle_type_id
                    .as_ref()
                    .and_then(|id| vehicle_types.get(id));
                LabelledTransaction {
                    client_name: client_names
                        .get(&transaction.client_id)
                        .cloned()
                        .unwrap_or_else(|| ledger::UNKNOWN_LABEL.to_string()),
                    type_label: ledger::type_label(&transaction, vehicle_type),
                    transaction,
                }
            })
            .collect())
    }

    pub async fn list_vehicle_types(&self) -> Result<Vec<VehicleType>, LedgerError> {
        self.storage.list_vehicle_types().await
    }

    pub async fn add_vehicle_type(&self, name: String, charging_fee: Decimal) -> Result<VehicleType, LedgerError> {
        self.validate_string_input("name", &name, MAX_NAME_LENGTH)?;
        self.validate_amount_input("charging_fee", charging_fee, false)?;

        let vehicle_type = VehicleType {
            id: Uuid::new_v4().to_string(),
            name,
            charging_fee,
        };
        self.storage.save_vehicle_type(vehicle_type.clone()).await?;

        self.after_mutation(
            VEHICLE_TYPE_ADDED,
            json!({ "vehicle_type_id": vehicle_type.id, "name": vehicle_type.name, "charging_fee": vehicle_type.charging_fee }),
        )
        .await?;
        Ok(vehicle_type)
    }

    pub async fn update_vehicle_type(
        &self,
        vehicle_type_id: &str,
        name: Option<String>,
        charging_fee: Option<Decimal>,
    ) -> Result<VehicleType, LedgerError> {
        let mut vehicle_type = self.require_vehicle_type(vehicle_type_id).await?;
        if let Some(name) = name {
            self.validate_string_input("name", &name, MAX_NAME_LENGTH)?;
            vehicle_type.name = name;
        }
        if let Some(fee) = charging_fee {
            self.validate_amount_input("charging_fee", fee, false)?;
            vehicle_type.charging_fee = fee;
        }
        self.storage.save_vehicle_type(vehicle_type.clone()).await?;

        self.after_mutation(
            VEHICLE_TYPE_UPDATED,
            json!({ "vehicle_type_id": vehicle_type.id, "name": vehicle_type.name, "charging_fee": vehicle_type.charging_fee }),
        )
        .await?;
        Ok(vehicle_type)
    }

    pub async fn delete_vehicle_type(&self, vehicle_type_id: &str) -> Result<(), LedgerError> {
        let vehicle_type = self.require_vehicle_type(vehicle_type_id).await?;
        let in_use = self
            .storage
            .list_clients()
            .await?
            .iter()
            .any(|c| c.is_active() && c.vehicle_type_id == vehicle_type_id);
        if in_use {
            return Err(LedgerError::VehicleTypeInUse(vehicle_type_id.to_string()));
        }
        self.storage.delete_vehicle_type(vehicle_type_id).await?;

        self.after_mutation(
            VEHICLE_TYPE_DELETED,
            json!({ "vehicle_type_id": vehicle_type_id, "name": vehicle_type.name }),
        )
        .await
    }

    pub async fn add_client(&self, new_client: NewClient) -> Result<Client, LedgerError> {
        self.validate_string_input("name", &new_client.name, MAX_NAME_LENGTH)?;
        self.validate_string_input("phone", &new_client.phone, MAX_NAME_LENGTH)?;
        if !new_client.address.is_empty() {
            self.validate_string_input("address", &new_client.address, MAX_TEXT_LENGTH)?;
        }
        self.require_vehicle_type(&new_client.vehicle_type_id).await?;

        let id = new_client.id.unwrap_or_else(|| Uuid::new_v4().to_string());
        if self.storage.get_client(&id).await?.is_some() {
            return Err(LedgerError::invalid_input(
                "id",
                "Duplicate Id",
                format!("Client {} already exists", id),
            ));
        }

        let client = Client {
            id,
            name: new_client.name,
            father_name: new_client.father_name,
            phone: new_client.phone,
            nid: new_client.nid,
            address: new_client.address,
            vehicle_type_id: new_client.vehicle_type_id,
            image_url: new_client.image_url,
            created_at: new_client.created_at.unwrap_or_else(Utc::now),
            deleted: false,
            deleted_at: None,
        };
        self.storage.save_client(client.clone()).await?;

        self.after_mutation(
            CLIENT_ADDED,
            json!({ "client_id": client.id, "name": client.name, "vehicle_type_id": client.vehicle_type_id }),
        )
        .await?;
        Ok(client)
    }

    pub async fn update_client(&self, client_id: &str, update: ClientUpdate) -> Result<Client, LedgerError> {
        let mut client = self.get_client(client_id).await?;

        if let Some(name) = update.name {
            self.validate_string_input("name", &name, MAX_NAME_LENGTH)?;
            client.name = name;
        }
        if let Some(phone) = update.phone {
            self.validate_string_input("phone", &phone, MAX_NAME_LENGTH)?;
            client.phone = phone;
        }
        if let Some(father_name) = update.father_name {
            client.father_name = father_name;
        }
        if let Some(nid) = update.nid {
            client.nid = nid;
        }
        if let Some(address) = update.address {
            if !address.is_empty() {
                self.validate_string_input("address", &address, MAX_TEXT_LENGTH)?;
            }
            client.address = address;
        }
        if let Some(vehicle_type_id) = update.vehicle_type_id {
            self.require_vehicle_type(&vehicle_type_id).await?;
            client.vehicle_type_id = vehicle_type_id;
        }
        if let Some(image_url) = update.image_url {
            client.image_url = Some(image_url);
        }
        self.storage.save_client(client.clone()).await?;

        self.after_mutation(CLIENT_UPDATED, json!({ "client_id": client.id, "name": client.name }))
            .await?;
        Ok(client)
    }

    pub async fn get_client_profile(
        &self,
        client_id: &str,
        sort_by: TransactionSortKey,
        sort_order: SortOrder,
    ) -> Result<ClientProfile, LedgerError> {
        let key = cache_keys::client_profile_key(
            self.generation.load(Ordering::SeqCst),
            client_id,
            &format!("{:?}", sort_by),
            &format!("{:?}", sort_order),
        );
        if let Some(profile) = self.cache.get_client_profile(&key).await? {
            debug!("Serving profile of client {} from cache", client_id);
            return Ok(profile);
        }

        let client = self.get_client(client_id).await?;
        let mut transactions: Vec<Transaction> = self
            .storage
            .get_client_transactions(client_id)
            .await?
            .into_iter()
            .filter(Transaction::is_active)
            .collect();

        let now = Utc::now();
        let trend_range = Period::LastDays(DUE_TREND_DAYS).to_range(now)?;
        let total_due = ledger::aggregate_due(&transactions, DueAggregation::Signed);
        let summary = ledger::summarize(&transactions);
        let due_trend = ledger::due_trend(&transactions, &trend_range);
        ledger::sort_transactions(&mut transactions, sort_by, sort_order);
        let vehicle_type = self.storage.get_vehicle_type(&client.vehicle_type_id).await?;

        let profile = ClientProfile {
            client,
            vehicle_type,
            transactions,
            total_due,
            summary,
            due_trend,
        };
        self.cache
            .save_client_profile(&key, &profile, self.cache_ttl)
            .await?;
        Ok(profile)
    }

    pub async fn list_clients(&self, query: ClientQuery) -> Result<ClientListing, LedgerError> {
        let mut ledgers = self.active_ledgers().await?;

        if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            ledgers.retain(|entry| {
                entry.client.name.to_lowercase().contains(&needle) || entry.client.phone.contains(search)
            });
        }
        ledger::sort_clients(&mut ledgers, query.sort_by, query.sort_order);

        let total_clients = ledgers.len();
        let total_pages = total_clients.div_ceil(CLIENT_PAGE_SIZE);
        let current_page = query.page.max(1);
        let clients = ledgers
            .into_iter()
            .skip((current_page - 1) * CLIENT_PAGE_SIZE)
            .take(CLIENT_PAGE_SIZE)
            .map(|entry| client_due(&entry))
            .collect();

        Ok(ClientListing {
            clients,
            current_page,
            total_pages,
            total_clients,
        })
    }

    /// Soft-deletes the client and every active transaction it owns.
    pub async fn delete_client(&self, client_id: &str) -> Result<(), LedgerError> {
        let mut client = self.find_client(client_id).await?;
        if !client.is_active() {
            return Err(LedgerError::AlreadyDeleted(format!("Client {}", client_id)));
        }

        let now = Utc::now();
        client.deleted = true;
        client.deleted_at = Some(now);

        let cascaded: Vec<Transaction> = self
            .storage
            .get_client_transactions(client_id)
            .await?
            .into_iter()
            .filter(Transaction::is_active)
            .map(|mut transaction| {
                transaction.deleted = true;
                transaction.deleted_at = Some(now);
                transaction
            })
            .collect();
        let cascaded_count = cascaded.len();

        self.storage.save_client(client).await?;
        self.storage.save_transactions(cascaded).await?;

        self.after_mutation(
            CLIENT_DELETED,
            json!({ "client_id": client_id, "cascaded_transactions": cascaded_count }),
        )
        .await
    }

    pub async fn add_transaction(&self, client_id: &str, input: NewTransaction) -> Result<Transaction, LedgerError> {
        let client = self.get_client(client_id).await?;

        let is_adjustment = input.vehicle_type == VehicleTypeSelection::PreviousDue;
        if let Some(amount) = input.payable_amount {
            self.validate_amount_input("payable_amount", amount, is_adjustment)?;
        }
        if let Some(cash) = input.cash_received {
            self.validate_amount_input("cash_received", cash, false)?;
        }
        if let Some(id) = &input.id {
            if self.storage.get_transaction(id).await?.is_some() {
                return Err(LedgerError::invalid_input(
                    "id",
                    "Duplicate Id",
                    format!("Transaction {} already exists", id),
                ));
            }
        }

        let vehicle_type = match ledger::resolve_vehicle_type_id(&client, &input.vehicle_type) {
            Some(id) => Some(self.require_vehicle_type(&id).await?),
            None => None,
        };

        let transaction = ledger::create_transaction(&client, input, vehicle_type.as_ref(), Utc::now())?;
        self.storage.save_transaction(transaction.clone()).await?;

        self.after_mutation(
            TRANSACTION_ADDED,
            json!({
                "transaction_id": transaction.id,
                "client_id": client_id,
                "vehicle_type_id": transaction.vehicle_type_id,
                "payable_amount": transaction.payable_amount,
                "cash_received": transaction.cash_received,
                "due": transaction.due
            }),
        )
        .await?;
        Ok(transaction)
    }

    pub async fn update_transaction(
        &self,
        client_id: &str,
        transaction_id: &str,
        patch: TransactionPatch,
    ) -> Result<Transaction, LedgerError> {
        if patch.is_empty() {
            return Err(LedgerError::invalid_input(
                "transaction",
                "Empty Update",
                "At least one field must be provided",
            ));
        }
        if let Some(amount) = patch.payable_amount {
            self.validate_amount_input("payable_amount", amount, false)?;
        }
        if let Some(cash) = patch.cash_received {
            self.validate_amount_input("cash_received", cash, false)?;
        }
        if let Some(due) = patch.due {
            self.validate_amount_input("due", due, true)?;
        }

        self.get_client(client_id).await?;
        let mut transaction = self.get_client_transaction(client_id, transaction_id).await?;
        let previous_due = transaction.due;
        ledger::update_transaction(&mut transaction, patch, Utc::now());
        self.storage.save_transaction(transaction.clone()).await?;

        self.after_mutation(
            TRANSACTION_UPDATED,
            json!({
                "transaction_id": transaction.id,
                "client_id": client_id,
                "previous_due": previous_due,
                "due": transaction.due
            }),
        )
        .await?;
        Ok(transaction)
    }

    pub async fn delete_transaction(&self, client_id: &str, transaction_id: &str) -> Result<(), LedgerError> {
        self.get_client(client_id).await?;
        let mut transaction = self.find_transaction(transaction_id).await?;
        if transaction.client_id != client_id {
            return Err(LedgerError::TransactionNotFound(transaction_id.to_string()));
        }
        if !transaction.is_active() {
            return Err(LedgerError::AlreadyDeleted(format!("Transaction {}", transaction_id)));
        }

        transaction.deleted = true;
        transaction.deleted_at = Some(Utc::now());
        self.storage.save_transaction(transaction).await?;

        self.after_mutation(
            TRANSACTION_DELETED,
            json!({ "transaction_id": transaction_id, "client_id": client_id }),
        )
        .await
    }

    /// Active transactions of active clients, one page at a time.
    pub async fn list_transactions(&self, query: TransactionQuery) -> Result<TransactionPage, LedgerError> {
        let limit = query
            .limit
            .unwrap_or(DEFAULT_TRANSACTION_PAGE_LIMIT)
            .clamp(1, MAX_TRANSACTION_PAGE_LIMIT);
        let current_page = query.page.max(1);

        let mut transactions: Vec<Transaction> = self
            .active_ledgers()
            .await?
            .into_iter()
            .flat_map(|entry| entry.transactions)
            .collect();
        ledger::sort_transactions(&mut transactions, query.sort_by, query.sort_order);

        let total_transactions = transactions.len();
        let page: Vec<Transaction> = transactions
            .into_iter()
            .skip((current_page - 1) * limit)
            .take(limit)
            .collect();

        Ok(TransactionPage {
            transactions: self.label_transactions(page).await?,
            current_page,
            total_pages: total_transactions.div_ceil(limit),
            total_transactions,
        })
    }

    pub async fn latest_transaction(&self) -> Result<Option<LabelledTransaction>, LedgerError> {
        let latest = self
            .active_ledgers()
            .await?
            .into_iter()
            .flat_map(|entry| entry.transactions)
            .max_by_key(|transaction| transaction.timestamp);

        match latest {
            Some(transaction) => Ok(self.label_transactions(vec![transaction]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    /// Fleet-wide figures. `total_due` clamps each row at zero so credit held
    /// by one client never hides debt owed by another; `net_due` does not.
    pub async fn dashboard_overview(&self, period: Period) -> Result<DashboardOverview, LedgerError> {
        let now = Utc::now();
        let range = period.to_range(now)?;
        let key = cache_keys::dashboard_key(
            self.generation.load(Ordering::SeqCst),
            &format!("{:?}", period),
            now.date_naive(),
        );
        if let Some(overview) = self.cache.get_dashboard(&key).await? {
            debug!("Serving dashboard {} from cache", key);
            return Ok(overview);
        }

        let ledgers = self.active_ledgers().await?;
        let all: Vec<&Transaction> = ledgers.iter().flat_map(|entry| entry.transactions.iter()).collect();
        let in_period: Vec<&Transaction> = all
            .iter()
            .copied()
            .filter(|transaction| range.contains(transaction.timestamp))
            .collect();

        let mut top_dues: Vec<ClientDue> = ledgers
            .iter()
            .filter(|entry| !entry.total_due.is_zero())
            .map(client_due)
            .collect();
        top_dues.sort_by(|a, b| b.due.cmp(&a.due));
        top_dues.truncate(TOP_DUES_LIMIT);

        let overview = DashboardOverview {
            client_count: ledgers.len(),
            transaction_count: all.len(),
            total_due: ledger::aggregate_due(all.iter().copied(), DueAggregation::Clamped),
            net_due: ledger::aggregate_due(all.iter().copied(), DueAggregation::Signed),
            period_summary: ledger::summarize(in_period.iter().copied()),
            top_dues,
            generated_at: now,
        };
        self.cache.save_dashboard(&key, &overview, self.cache_ttl).await?;
        Ok(overview)
    }

    pub async fn list_trash(&self) -> Result<TrashListing, LedgerError> {
        let (clients, transactions) = futures::try_join!(self.storage.list_clients(), self.storage.list_transactions())?;

        let mut clients: Vec<Client> = clients.into_iter().filter(|c| !c.is_active()).collect();
        clients.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
        let mut transactions: Vec<Transaction> = transactions.into_iter().filter(|t| !t.is_active()).collect();
        transactions.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));

        Ok(TrashListing {
            clients,
            transactions: self.label_transactions(transactions).await?,
        })
    }

    /// Brings back the client and exactly the transactions its deletion
    /// cascaded to; rows trashed on their own stay in the trash.
    pub async fn restore_client(&self, client_id: &str) -> Result<Client, LedgerError> {
        let mut client = self.find_client(client_id).await?;
        if client.is_active() {
            return Err(LedgerError::NotInTrash(format!("Client {}", client_id)));
        }

        let deleted_at = client.deleted_at;
        client.deleted = false;
        client.deleted_at = None;

        let restored: Vec<Transaction> = self
            .storage
            .get_client_transactions(client_id)
            .await?
            .into_iter()
            .filter(|transaction| !transaction.is_active() && transaction.deleted_at == deleted_at)
            .map(|mut transaction| {
                transaction.deleted = false;
                transaction.deleted_at = None;
                transaction
            })
            .collect();
        let restored_count = restored.len();

        self.storage.save_client(client.clone()).await?;
        self.storage.save_transactions(restored).await?;

        self.after_mutation(
            CLIENT_RESTORED,
            json!({ "client_id": client_id, "restored_transactions": restored_count }),
        )
        .await?;
        Ok(client)
    }

    pub async fn restore_transaction(&self, transaction_id: &str) -> Result<Transaction, LedgerError> {
        let mut transaction = self.find_transaction(transaction_id).await?;
        if transaction.is_active() {
            return Err(LedgerError::NotInTrash(format!("Transaction {}", transaction_id)));
        }
        let client = self.find_client(&transaction.client_id).await?;
        if !client.is_active() {
            return Err(LedgerError::ClientInTrash(client.id));
        }

        transaction.deleted = false;
        transaction.deleted_at = None;
        transaction.modified_at = Utc::now();
        self.storage.save_transaction(transaction.clone()).await?;

        self.after_mutation(
            TRANSACTION_RESTORED,
            json!({ "transaction_id": transaction_id, "client_id": transaction.client_id }),
        )
        .await?;
        Ok(transaction)
    }

    /// Permanently removes a trashed client along with all of its transactions.
    pub async fn purge_client(&self, client_id: &str) -> Result<(), LedgerError> {
        let client = self.find_client(client_id).await?;
        if client.is_active() {
            return Err(LedgerError::NotInTrash(format!("Client {}", client_id)));
        }
        self.storage.purge_client(client_id).await?;

        self.after_mutation(CLIENT_PURGED, json!({ "client_id": client_id, "name": client.name }))
            .await
    }

    pub async fn purge_transaction(&self, transaction_id: &str) -> Result<(), LedgerError> {
        let transaction = self.find_transaction(transaction_id).await?;
        if transaction.is_active() {
            return Err(LedgerError::NotInTrash(format!("Transaction {}", transaction_id)));
        }
        self.storage.purge_transaction(transaction_id).await?;

        self.after_mutation(
            TRANSACTION_PURGED,
            json!({ "transaction_id": transaction_id, "client_id": transaction.client_id }),
        )
        .await
    }

    pub async fn get_app_logs(&self) -> Result<Vec<AppLog>, LedgerError> {
        self.logging.get_logs().await
    }
}

fn client_due(entry: &ClientWithTransactions) -> ClientDue {
    ClientDue {
        client_id: entry.client.id.clone(),
        name: entry.client.name.clone(),
        phone: entry.client.phone.clone(),
        created_at: entry.client.created_at,
        due: entry.total_due,
    }
}
