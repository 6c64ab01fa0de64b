use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::errors::LedgerError;
use crate::core::ledger::{
    ClientSortKey, NewTransaction, Period, SortOrder, TransactionPatch, TransactionSortKey, VehicleTypeSelection,
};
use crate::core::models::{ClientUpdate, NewClient};
use crate::core::services::{ClientQuery, TransactionQuery};

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Deserialize, ToSchema)]
pub struct CreateVehicleTypeRequest {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub charging_fee: Decimal,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateVehicleTypeRequest {
    pub name: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub charging_fee: Option<Decimal>,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateClientRequest {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub father_name: String,
    pub phone: String,
    #[serde(default)]
    pub nid: String,
    #[serde(default)]
    pub address: String,
    pub vehicle_type_id: String,
    pub image_url: Option<String>,
    #[schema(value_type = Option<String>)]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<CreateClientRequest> for NewClient {
    fn from(req: CreateClientRequest) -> Self {
        NewClient {
            id: req.id,
            name: req.name,
            father_name: req.father_name,
            phone: req.phone,
            nid: req.nid,
            address: req.address,
            vehicle_type_id: req.vehicle_type_id,
            image_url: req.image_url,
            created_at: req.created_at,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateClientRequest {
    pub name: Option<String>,
    pub father_name: Option<String>,
    pub phone: Option<String>,
    pub nid: Option<String>,
    pub address: Option<String>,
    pub vehicle_type_id: Option<String>,
    pub image_url: Option<String>,
}

impl From<UpdateClientRequest> for ClientUpdate {
    fn from(req: UpdateClientRequest) -> Self {
        ClientUpdate {
            name: req.name,
            father_name: req.father_name,
            phone: req.phone,
            nid: req.nid,
            address: req.address,
            vehicle_type_id: req.vehicle_type_id,
            image_url: req.image_url,
        }
    }
}

/// New ledger row.
///
/// Omit `vehicle_type_id` to charge the client's default vehicle type; send
/// it as `null` to record a "previous due" adjustment of `payable_amount`.
#[derive(Deserialize, ToSchema)]
pub struct CreateTransactionRequest {
    pub id: Option<String>,
    #[schema(value_type = Option<String>)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub vehicle_type_id: Option<Option<String>>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub payable_amount: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub cash_received: Option<Decimal>,
}

impl From<CreateTransactionRequest> for NewTransaction {
    fn from(req: CreateTransactionRequest) -> Self {
        let vehicle_type = match req.vehicle_type_id {
            None => VehicleTypeSelection::ClientDefault,
            Some(None) => VehicleTypeSelection::PreviousDue,
            Some(Some(id)) => VehicleTypeSelection::Specific(id),
        };
        NewTransaction {
            id: req.id,
            timestamp: req.timestamp,
            vehicle_type,
            payable_amount: req.payable_amount,
            cash_received: req.cash_received,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateTransactionRequest {
    #[schema(value_type = Option<String>)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub payable_amount: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub cash_received: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub due: Option<Decimal>,
}

impl From<UpdateTransactionRequest> for TransactionPatch {
    fn from(req: UpdateTransactionRequest) -> Self {
        TransactionPatch {
            timestamp: req.timestamp,
            payable_amount: req.payable_amount,
            cash_received: req.cash_received,
            due: req.due,
        }
    }
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClientListParams {
    /// Name or phone substring
    pub search: Option<String>,
    pub sort_by: Option<ClientSortKey>,
    pub sort_order: Option<SortOrder>,
    pub page: Option<usize>,
}

impl From<ClientListParams> for ClientQuery {
    fn from(params: ClientListParams) -> Self {
        ClientQuery {
            search: params.search,
            sort_by: params.sort_by.unwrap_or_default(),
            sort_order: params.sort_order.unwrap_or_default(),
            page: params.page.unwrap_or(1),
        }
    }
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TransactionSortParams {
    pub sort_by: Option<TransactionSortKey>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TransactionListParams {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub sort_by: Option<TransactionSortKey>,
    pub sort_order: Option<SortOrder>,
}

impl From<TransactionListParams> for TransactionQuery {
    fn from(params: TransactionListParams) -> Self {
        TransactionQuery {
            page: params.page.unwrap_or(1),
            limit: params.limit,
            sort_by: params.sort_by.unwrap_or_default(),
            sort_order: params.sort_order.unwrap_or_default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PeriodPreset {
    #[default]
    All,
    Today,
    Week,
    Month,
    /// Requires `days`
    LastDays,
    /// Requires `from` and `to`
    Custom,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardParams {
    pub period: Option<PeriodPreset>,
    pub days: Option<u32>,
    #[param(value_type = Option<String>)]
    pub from: Option<NaiveDate>,
    #[param(value_type = Option<String>)]
    pub to: Option<NaiveDate>,
}

impl DashboardParams {
    pub fn into_period(self) -> Result<Period, LedgerError> {
        match self.period.unwrap_or_default() {
            PeriodPreset::All => Ok(Period::All),
            PeriodPreset::Today => Ok(Period::Today),
            PeriodPreset::Week => Ok(Period::LastDays(7)),
            PeriodPreset::Month => Ok(Period::LastDays(30)),
            PeriodPreset::LastDays => self.days.map(Period::LastDays).ok_or_else(|| {
                LedgerError::invalid_input("days", "Missing Days", "period=last_days requires `days`")
            }),
            PeriodPreset::Custom => match (self.from, self.to) {
                (Some(from), Some(to)) => Ok(Period::Custom { from, to }),
                _ => Err(LedgerError::InvalidDateRange(
                    "period=custom requires both `from` and `to`".to_string(),
                )),
            },
        }
    }
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for LedgerError to implement IntoResponse
pub struct ApiError(pub LedgerError);

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            LedgerError::ClientNotFound(_)
            | LedgerError::VehicleTypeNotFound(_)
            | LedgerError::TransactionNotFound(_) => StatusCode::NOT_FOUND,
            LedgerError::InvalidInput(..) | LedgerError::InvalidDateRange(_) => StatusCode::BAD_REQUEST,
            LedgerError::AlreadyDeleted(_)
            | LedgerError::NotInTrash(_)
            | LedgerError::ClientInTrash(_)
            | LedgerError::VehicleTypeInUse(_) => StatusCode::CONFLICT,
            LedgerError::InternalServerError(_)
            | LedgerError::StorageError(_)
            | LedgerError::LoggingError(_)
            | LedgerError::CacheError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let error_message = match self.0 {
            LedgerError::InvalidInput(_, detail) => format!("{}: {}", detail.title, detail.description),
            other => other.to_string(),
        };
        (status, Json(ErrorResponse { error: error_message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_vehicle_type_means_previous_due() {
        let absent: CreateTransactionRequest = serde_json::from_str(r#"{"cash_received": 50}"#).unwrap();
        let null: CreateTransactionRequest =
            serde_json::from_str(r#"{"vehicle_type_id": null, "payable_amount": -120.5}"#).unwrap();
        let named: CreateTransactionRequest = serde_json::from_str(r#"{"vehicle_type_id": "bike"}"#).unwrap();

        assert_eq!(NewTransaction::from(absent).vehicle_type, VehicleTypeSelection::ClientDefault);
        let adjustment = NewTransaction::from(null);
        assert_eq!(adjustment.vehicle_type, VehicleTypeSelection::PreviousDue);
        assert_eq!(adjustment.payable_amount, Some(Decimal::new(-1205, 1)));
        assert_eq!(
            NewTransaction::from(named).vehicle_type,
            VehicleTypeSelection::Specific("bike".to_string())
        );
    }

    #[test]
    fn custom_period_needs_both_bounds() {
        let params = DashboardParams {
            period: Some(PeriodPreset::Custom),
            days: None,
            from: NaiveDate::from_ymd_opt(2025, 1, 1),
            to: None,
        };
        assert!(matches!(params.into_period(), Err(LedgerError::InvalidDateRange(_))));

        let params = DashboardParams {
            period: Some(PeriodPreset::Week),
            days: None,
            from: None,
            to: None,
        };
        assert_eq!(params.into_period(), Ok(Period::LastDays(7)));
    }

    #[test]
    fn trash_conflicts_map_to_409() {
        let response = ApiError(LedgerError::NotInTrash("Client c1".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let response = ApiError(LedgerError::ClientNotFound("c1".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
