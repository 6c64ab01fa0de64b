mod cache_tests;
mod dashboard_tests;
mod transaction_tests;

use crate::core::models::{Client, NewClient, VehicleType};
use crate::core::services::LedgerService;
use crate::infrastructure::cache::in_memory::InMemoryCache;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use rust_decimal::Decimal;
use std::time::Duration;

pub type TestService = LedgerService<InMemoryLogging, InMemoryStorage, InMemoryCache>;

pub fn create_test_service() -> TestService {
    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    let cache = InMemoryCache::new();
    LedgerService::new(storage, logging, cache, Duration::from_secs(30))
}

pub async fn seed_vehicle_type(service: &TestService, name: &str, fee: i64) -> VehicleType {
    service
        .add_vehicle_type(name.to_string(), Decimal::from(fee))
        .await
        .unwrap()
}

pub async fn seed_client(service: &TestService, name: &str, phone: &str, vehicle_type_id: &str) -> Client {
    service
        .add_client(NewClient {
            name: name.to_string(),
            father_name: "Abdul".to_string(),
            phone: phone.to_string(),
            nid: "1990123456".to_string(),
            address: "Mirpur, Dhaka".to_string(),
            vehicle_type_id: vehicle_type_id.to_string(),
            ..Default::default()
        })
        .await
        .unwrap()
}
