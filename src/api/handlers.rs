use crate::{
    api::models::*,
    core::{
        models::{
            AppLog, Client, ClientListing, ClientProfile, DashboardOverview, LabelledTransaction, Transaction,
            TransactionPage, TrashListing, VehicleType,
        },
        services::LedgerService,
    },
    infrastructure::{
        cache::in_memory::InMemoryCache, logging::in_memory::InMemoryLogging, storage::in_memory::InMemoryStorage,
    },
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
};

use std::sync::Arc;

pub type SharedService = Arc<LedgerService<InMemoryLogging, InMemoryStorage, InMemoryCache>>;

// Define API routes
pub fn api_routes(service: SharedService) -> Router {
    Router::new()
        .route("/vehicle-types", get(list_vehicle_types).post(create_vehicle_type))
        .route(
            "/vehicle-types/{vehicle_type_id}",
            put(update_vehicle_type).delete(delete_vehicle_type),
        )
        .route("/clients", get(list_clients).post(create_client))
        .route(
            "/clients/{client_id}",
            get(get_client_profile).put(update_client).delete(delete_client),
        )
        .route("/clients/{client_id}/transactions", post(create_transaction))
        .route(
            "/clients/{client_id}/transactions/{transaction_id}",
            put(update_transaction).delete(delete_transaction),
        )
        .route("/transactions", get(list_transactions))
        .route("/transactions/latest", get(latest_transaction))
        .route("/dashboard", get(dashboard_overview))
        .route("/trash", get(list_trash))
        .route("/trash/clients/{client_id}", axum::routing::delete(purge_client))
        .route("/trash/clients/{client_id}/restore", put(restore_client))
        .route(
            "/trash/transactions/{transaction_id}",
            axum::routing::delete(purge_transaction),
        )
        .route("/trash/transactions/{transaction_id}/restore", put(restore_transaction))
        .route("/logs", get(get_app_logs))
        .with_state(service)
}

#[utoipa::path(
    get,
    path = "/api/vehicle-types",
    responses(
        (status = 200, description = "Vehicle types retrieved successfully", body = Vec<VehicleType>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_vehicle_types(State(service): State<SharedService>) -> Result<Json<Vec<VehicleType>>, ApiError> {
    let vehicle_types = service.list_vehicle_types().await?;
    Ok(Json(vehicle_types))
}

#[utoipa::path(
    post,
    path = "/api/vehicle-types",
    request_body = CreateVehicleTypeRequest,
    responses(
        (status = 201, description = "Vehicle type created successfully", body = VehicleType),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_vehicle_type(
    State(service): State<SharedService>,
    Json(req): Json<CreateVehicleTypeRequest>,
) -> Result<(StatusCode, Json<VehicleType>), ApiError> {
    let vehicle_type = service.add_vehicle_type(req.name, req.charging_fee).await?;
    Ok((StatusCode::CREATED, Json(vehicle_type)))
}

#[utoipa::path(
    put,
    path = "/api/vehicle-types/{vehicle_type_id}",
    params(
        ("vehicle_type_id" = String, Path, description = "ID of the vehicle type")
    ),
    request_body = UpdateVehicleTypeRequest,
    responses(
        (status = 200, description = "Vehicle type updated successfully", body = VehicleType),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "Vehicle type not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_vehicle_type(
    State(service): State<SharedService>,
    Path(vehicle_type_id): Path<String>,
    Json(req): Json<UpdateVehicleTypeRequest>,
) -> Result<Json<VehicleType>, ApiError> {
    let vehicle_type = service
        .update_vehicle_type(&vehicle_type_id, req.name, req.charging_fee)
        .await?;
    Ok(Json(vehicle_type))
}

#[utoipa::path(
    delete,
    path = "/api/vehicle-types/{vehicle_type_id}",
    params(
        ("vehicle_type_id" = String, Path, description = "ID of the vehicle type")
    ),
    responses(
        (status = 204, description = "Vehicle type deleted"),
        (status = 404, description = "Vehicle type not found", body = ErrorResponse),
        (status = 409, description = "Vehicle type still assigned to a client", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_vehicle_type(
    State(service): State<SharedService>,
    Path(vehicle_type_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.delete_vehicle_type(&vehicle_type_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/clients",
    params(ClientListParams),
    responses(
        (status = 200, description = "Page of clients with their dues", body = ClientListing),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_clients(
    State(service): State<SharedService>,
    Query(params): Query<ClientListParams>,
) -> Result<Json<ClientListing>, ApiError> {
    let listing = service.list_clients(params.into()).await?;
    Ok(Json(listing))
}

#[utoipa::path(
    post,
    path = "/api/clients",
    request_body = CreateClientRequest,
    responses(
        (status = 201, description = "Client created successfully", body = Client),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "Vehicle type not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_client(
    State(service): State<SharedService>,
    Json(req): Json<CreateClientRequest>,
) -> Result<(StatusCode, Json<Client>), ApiError> {
    let client = service.add_client(req.into()).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

#[utoipa::path(
    get,
    path = "/api/clients/{client_id}",
    params(
        ("client_id" = String, Path, description = "ID of the client"),
        TransactionSortParams
    ),
    responses(
        (status = 200, description = "Client profile with ledger", body = ClientProfile),
        (status = 404, description = "Client not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_client_profile(
    State(service): State<SharedService>,
    Path(client_id): Path<String>,
    Query(params): Query<TransactionSortParams>,
) -> Result<Json<ClientProfile>, ApiError> {
    let profile = service
        .get_client_profile(
            &client_id,
            params.sort_by.unwrap_or_default(),
            params.sort_order.unwrap_or_default(),
        )
        .await?;
    Ok(Json(profile))
}

#[utoipa::path(
    put,
    path = "/api/clients/{client_id}",
    params(
        ("client_id" = String, Path, description = "ID of the client")
    ),
    request_body = UpdateClientRequest,
    responses(
        (status = 200, description = "Client updated successfully", body = Client),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "Client or vehicle type not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_client(
    State(service): State<SharedService>,
    Path(client_id): Path<String>,
    Json(req): Json<UpdateClientRequest>,
) -> Result<Json<Client>, ApiError> {
    let client = service.update_client(&client_id, req.into()).await?;
    Ok(Json(client))
}

#[utoipa::path(
    delete,
    path = "/api/clients/{client_id}",
    params(
        ("client_id" = String, Path, description = "ID of the client")
    ),
    responses(
        (status = 204, description = "Client and its transactions moved to the trash"),
        (status = 404, description = "Client not found", body = ErrorResponse),
        (status = 409, description = "Client already in the trash", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_client(
    State(service): State<SharedService>,
    Path(client_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.delete_client(&client_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/clients/{client_id}/transactions",
    params(
        ("client_id" = String, Path, description = "ID of the client")
    ),
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction recorded", body = Transaction),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "Client or vehicle type not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_transaction(
    State(service): State<SharedService>,
    Path(client_id): Path<String>,
    Json(req): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let transaction = service.add_transaction(&client_id, req.into()).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

#[utoipa::path(
    put,
    path = "/api/clients/{client_id}/transactions/{transaction_id}",
    params(
        ("client_id" = String, Path, description = "ID of the client"),
        ("transaction_id" = String, Path, description = "ID of the transaction")
    ),
    request_body = UpdateTransactionRequest,
    responses(
        (status = 200, description = "Transaction updated", body = Transaction),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "Client or transaction not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_transaction(
    State(service): State<SharedService>,
    Path((client_id, transaction_id)): Path<(String, String)>,
    Json(req): Json<UpdateTransactionRequest>,
) -> Result<Json<Transaction>, ApiError> {
    let transaction = service
        .update_transaction(&client_id, &transaction_id, req.into())
        .await?;
    Ok(Json(transaction))
}

#[utoipa::path(
    delete,
    path = "/api/clients/{client_id}/transactions/{transaction_id}",
    params(
        ("client_id" = String, Path, description = "ID of the client"),
        ("transaction_id" = String, Path, description = "ID of the transaction")
    ),
    responses(
        (status = 204, description = "Transaction moved to the trash"),
        (status = 404, description = "Client or transaction not found", body = ErrorResponse),
        (status = 409, description = "Transaction already in the trash", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_transaction(
    State(service): State<SharedService>,
    Path((client_id, transaction_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    service.delete_transaction(&client_id, &transaction_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/transactions",
    params(TransactionListParams),
    responses(
        (status = 200, description = "Page of transactions across all clients", body = TransactionPage),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_transactions(
    State(service): State<SharedService>,
    Query(params): Query<TransactionListParams>,
) -> Result<Json<TransactionPage>, ApiError> {
    let page = service.list_transactions(params.into()).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/transactions/latest",
    responses(
        (status = 200, description = "Most recent transaction, null when the ledger is empty", body = Option<LabelledTransaction>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn latest_transaction(
    State(service): State<SharedService>,
) -> Result<Json<Option<LabelledTransaction>>, ApiError> {
    let latest = service.latest_transaction().await?;
    Ok(Json(latest))
}

#[utoipa::path(
    get,
    path = "/api/dashboard",
    params(DashboardParams),
    responses(
        (status = 200, description = "Dashboard figures for the period", body = DashboardOverview),
        (status = 400, description = "Invalid period", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn dashboard_overview(
    State(service): State<SharedService>,
    Query(params): Query<DashboardParams>,
) -> Result<Json<DashboardOverview>, ApiError> {
    let overview = service.dashboard_overview(params.into_period()?).await?;
    Ok(Json(overview))
}

#[utoipa::path(
    get,
    path = "/api/trash",
    responses(
        (status = 200, description = "Trashed clients and transactions", body = TrashListing),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_trash(State(service): State<SharedService>) -> Result<Json<TrashListing>, ApiError> {
    let trash = service.list_trash().await?;
    Ok(Json(trash))
}

#[utoipa::path(
    put,
    path = "/api/trash/clients/{client_id}/restore",
    params(
        ("client_id" = String, Path, description = "ID of the trashed client")
    ),
    responses(
        (status = 200, description = "Client restored with its cascaded transactions", body = Client),
        (status = 404, description = "Client not found", body = ErrorResponse),
        (status = 409, description = "Client is not in the trash", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn restore_client(
    State(service): State<SharedService>,
    Path(client_id): Path<String>,
) -> Result<Json<Client>, ApiError> {
    let client = service.restore_client(&client_id).await?;
    Ok(Json(client))
}

#[utoipa::path(
    put,
    path = "/api/trash/transactions/{transaction_id}/restore",
    params(
        ("transaction_id" = String, Path, description = "ID of the trashed transaction")
    ),
    responses(
        (status = 200, description = "Transaction restored", body = Transaction),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 409, description = "Not in the trash, or its client is", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn restore_transaction(
    State(service): State<SharedService>,
    Path(transaction_id): Path<String>,
) -> Result<Json<Transaction>, ApiError> {
    let transaction = service.restore_transaction(&transaction_id).await?;
    Ok(Json(transaction))
}

#[utoipa::path(
    delete,
    path = "/api/trash/clients/{client_id}",
    params(
        ("client_id" = String, Path, description = "ID of the trashed client")
    ),
    responses(
        (status = 204, description = "Client and all its transactions permanently deleted"),
        (status = 404, description = "Client not found", body = ErrorResponse),
        (status = 409, description = "Client is not in the trash", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn purge_client(
    State(service): State<SharedService>,
    Path(client_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.purge_client(&client_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/trash/transactions/{transaction_id}",
    params(
        ("transaction_id" = String, Path, description = "ID of the trashed transaction")
    ),
    responses(
        (status = 204, description = "Transaction permanently deleted"),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 409, description = "Transaction is not in the trash", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn purge_transaction(
    State(service): State<SharedService>,
    Path(transaction_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.purge_transaction(&transaction_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/logs",
    responses(
        (status = 200, description = "Application logs retrieved successfully", body = Vec<AppLog>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_app_logs(State(service): State<SharedService>) -> Result<Json<Vec<AppLog>>, ApiError> {
    let logs = service.get_app_logs().await?;
    Ok(Json(logs))
}
