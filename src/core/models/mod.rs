pub mod audit;
pub mod client;
pub mod report;
pub mod transaction;
pub mod vehicle_type;

pub use audit::AppLog;
pub use client::{Client, ClientUpdate, ClientWithTransactions, NewClient};
pub use report::{
    ClientDue, ClientListing, ClientProfile, DashboardOverview, LabelledTransaction, TransactionPage, TrashListing,
};
pub use transaction::Transaction;
pub use vehicle_type::VehicleType;
