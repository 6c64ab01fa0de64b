pub mod constants;
pub mod errors;
pub mod ledger;
pub mod models;
pub mod services;
