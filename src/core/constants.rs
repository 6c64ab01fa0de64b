// Action names recorded in the application log
pub const VEHICLE_TYPE_ADDED: &str = "VEHICLE_TYPE_ADDED";
pub const VEHICLE_TYPE_UPDATED: &str = "VEHICLE_TYPE_UPDATED";
pub const VEHICLE_TYPE_DELETED: &str = "VEHICLE_TYPE_DELETED";
pub const CLIENT_ADDED: &str = "CLIENT_ADDED";
pub const CLIENT_UPDATED: &str = "CLIENT_UPDATED";
pub const CLIENT_DELETED: &str = "CLIENT_DELETED";
pub const CLIENT_RESTORED: &str = "CLIENT_RESTORED";
pub const CLIENT_PURGED: &str = "CLIENT_PURGED";
pub const TRANSACTION_ADDED: &str = "TRANSACTION_ADDED";
pub const TRANSACTION_UPDATED: &str = "TRANSACTION_UPDATED";
pub const TRANSACTION_DELETED: &str = "TRANSACTION_DELETED";
pub const TRANSACTION_RESTORED: &str = "TRANSACTION_RESTORED";
pub const TRANSACTION_PURGED: &str = "TRANSACTION_PURGED";

/// Clients per dashboard page
pub const CLIENT_PAGE_SIZE: usize = 5;
pub const DEFAULT_TRANSACTION_PAGE_LIMIT: usize = 10;
pub const MAX_TRANSACTION_PAGE_LIMIT: usize = 100;
pub const TOP_DUES_LIMIT: usize = 10;
pub const DUE_TREND_DAYS: u32 = 30;

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_TEXT_LENGTH: usize = 255;
pub const MAX_AMOUNT: i64 = 1_000_000;

/// Oldest action log entries are dropped past this many
pub const APP_LOG_RETENTION: usize = 1_000;
