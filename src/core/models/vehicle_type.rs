use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A kind of vehicle with the fee charged for one recharge.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct VehicleType {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 150.0)]
    pub charging_fee: Decimal,
}
