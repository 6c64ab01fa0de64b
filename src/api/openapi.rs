use utoipa::OpenApi;

use crate::{
    api::models::{
        CreateClientRequest, CreateTransactionRequest, CreateVehicleTypeRequest, ErrorResponse, PeriodPreset,
        UpdateClientRequest, UpdateTransactionRequest, UpdateVehicleTypeRequest,
    },
    core::{
        ledger::{ClientSortKey, DuePoint, LedgerSummary, SortOrder, TransactionSortKey},
        models::{
            AppLog, Client, ClientDue, ClientListing, ClientProfile, DashboardOverview, LabelledTransaction,
            Transaction, TransactionPage, TrashListing, VehicleType,
        },
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::list_vehicle_types,
        super::handlers::create_vehicle_type,
        super::handlers::update_vehicle_type,
        super::handlers::delete_vehicle_type,
        super::handlers::list_clients,
        super::handlers::create_client,
        super::handlers::get_client_profile,
        super::handlers::update_client,
        super::handlers::delete_client,
        super::handlers::create_transaction,
        super::handlers::update_transaction,
        super::handlers::delete_transaction,
        super::handlers::list_transactions,
        super::handlers::latest_transaction,
        super::handlers::dashboard_overview,
        super::handlers::list_trash,
        super::handlers::restore_client,
        super::handlers::restore_transaction,
        super::handlers::purge_client,
        super::handlers::purge_transaction,
        super::handlers::get_app_logs
    ),
    components(schemas(
        CreateVehicleTypeRequest,
        UpdateVehicleTypeRequest,
        CreateClientRequest,
        UpdateClientRequest,
        CreateTransactionRequest,
        UpdateTransactionRequest,
        PeriodPreset,
        ErrorResponse,
        VehicleType,
        Client,
        Transaction,
        LabelledTransaction,
        ClientDue,
        ClientListing,
        ClientProfile,
        TransactionPage,
        DashboardOverview,
        TrashListing,
        LedgerSummary,
        DuePoint,
        ClientSortKey,
        TransactionSortKey,
        SortOrder,
        AppLog
    )),
    info(
        title = "RechargeHub API",
        description = "Due ledger for vehicle recharge clients",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
