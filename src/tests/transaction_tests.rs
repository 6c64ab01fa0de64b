use super::{create_test_service, seed_client, seed_vehicle_type};
use crate::core::constants::{CLIENT_ADDED, TRANSACTION_ADDED, VEHICLE_TYPE_ADDED};
use crate::core::errors::LedgerError;
use crate::core::ledger::{NewTransaction, SortOrder, TransactionPatch, TransactionSortKey, VehicleTypeSelection};
use crate::core::services::TransactionQuery;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;

#[tokio::test]
async fn test_recharge_uses_client_default_fee() {
    let service = create_test_service();
    let easybike = seed_vehicle_type(&service, "Easy Bike", 150).await;
    let client = seed_client(&service, "Rahim", "01711000000", &easybike.id).await;

    let tx = service
        .add_transaction(
            &client.id,
            NewTransaction {
                cash_received: Some(Decimal::from(100)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(tx.vehicle_type_id.as_deref(), Some(easybike.id.as_str()));
    assert_eq!(tx.payable_amount, Decimal::from(150));
    assert_eq!(tx.due, Decimal::from(50));
}

#[tokio::test]
async fn test_recharge_with_other_vehicle_type() {
    let service = create_test_service();
    let easybike = seed_vehicle_type(&service, "Easy Bike", 150).await;
    let rickshaw = seed_vehicle_type(&service, "Auto Rickshaw", 200).await;
    let client = seed_client(&service, "Rahim", "01711000000", &easybike.id).await;

    let tx = service
        .add_transaction(
            &client.id,
            NewTransaction {
                vehicle_type: VehicleTypeSelection::Specific(rickshaw.id.clone()),
                cash_received: Some(Decimal::from(250)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(tx.payable_amount, Decimal::from(200));
    assert_eq!(tx.due, Decimal::from(-50));

    let missing = service
        .add_transaction(
            &client.id,
            NewTransaction {
                vehicle_type: VehicleTypeSelection::Specific("tempo".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert_eq!(missing, Err(LedgerError::VehicleTypeNotFound("tempo".to_string())));
}

#[tokio::test]
async fn test_previous_due_adjustment() {
    let service = create_test_service();
    let easybike = seed_vehicle_type(&service, "Easy Bike", 150).await;
    let client = seed_client(&service, "Rahim", "01711000000", &easybike.id).await;

    let tx = service
        .add_transaction(
            &client.id,
            NewTransaction {
                vehicle_type: VehicleTypeSelection::PreviousDue,
                payable_amount: Some(Decimal::from(-300)),
                cash_received: Some(Decimal::from(40)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(tx.is_adjustment());
    assert_eq!(tx.payable_amount, Decimal::ZERO);
    assert_eq!(tx.cash_received, Decimal::ZERO);
    assert_eq!(tx.due, Decimal::from(-300));

    // Cash edits never move an adjustment.
    let updated = service
        .update_transaction(
            &client.id,
            &tx.id,
            TransactionPatch {
                cash_received: Some(Decimal::from(100)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.due, Decimal::from(-300));

    let updated = service
        .update_transaction(
            &client.id,
            &tx.id,
            TransactionPatch {
                due: Some(Decimal::from(75)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.due, Decimal::from(75));
}

#[tokio::test]
async fn test_cash_edit_recomputes_due() {
    let service = create_test_service();
    let easybike = seed_vehicle_type(&service, "Easy Bike", 150).await;
    let client = seed_client(&service, "Rahim", "01711000000", &easybike.id).await;
    let tx = service
        .add_transaction(&client.id, NewTransaction::default())
        .await
        .unwrap();
    assert_eq!(tx.due, Decimal::from(150));

    let updated = service
        .update_transaction(
            &client.id,
            &tx.id,
            TransactionPatch {
                cash_received: Some(Decimal::from(120)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.due, Decimal::from(30));
    assert!(updated.modified_at >= tx.modified_at);

    let profile = service
        .get_client_profile(&client.id, TransactionSortKey::Timestamp, SortOrder::Desc)
        .await
        .unwrap();
    assert_eq!(profile.total_due, Decimal::from(30));
}

#[tokio::test]
async fn test_invalid_transaction_input() {
    let service = create_test_service();
    let easybike = seed_vehicle_type(&service, "Easy Bike", 150).await;
    let client = seed_client(&service, "Rahim", "01711000000", &easybike.id).await;

    let negative_cash = service
        .add_transaction(
            &client.id,
            NewTransaction {
                cash_received: Some(Decimal::from(-5)),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(negative_cash, Err(LedgerError::InvalidInput(field, _)) if field == "cash_received"));

    let too_precise = service
        .add_transaction(
            &client.id,
            NewTransaction {
                payable_amount: Some(Decimal::new(10_005, 3)),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(too_precise, Err(LedgerError::InvalidInput(field, _)) if field == "payable_amount"));

    let tx = service
        .add_transaction(&client.id, NewTransaction::default())
        .await
        .unwrap();
    let empty_patch = service
        .update_transaction(&client.id, &tx.id, TransactionPatch::default())
        .await;
    assert!(matches!(empty_patch, Err(LedgerError::InvalidInput(..))));
}

#[tokio::test]
async fn test_transaction_must_belong_to_client() {
    let service = create_test_service();
    let easybike = seed_vehicle_type(&service, "Easy Bike", 150).await;
    let rahim = seed_client(&service, "Rahim", "01711000000", &easybike.id).await;
    let karim = seed_client(&service, "Karim", "01822000000", &easybike.id).await;
    let tx = service
        .add_transaction(&rahim.id, NewTransaction::default())
        .await
        .unwrap();

    let result = service
        .update_transaction(
            &karim.id,
            &tx.id,
            TransactionPatch {
                cash_received: Some(Decimal::from(10)),
                ..Default::default()
            },
        )
        .await;
    assert_eq!(result, Err(LedgerError::TransactionNotFound(tx.id.clone())));
}

#[tokio::test]
async fn test_list_transactions_paginates_and_labels() {
    let service = create_test_service();
    let easybike = seed_vehicle_type(&service, "Easy Bike", 150).await;
    let client = seed_client(&service, "Rahim", "01711000000", &easybike.id).await;
    let start = Utc::now() - Duration::days(20);

    for day in 0..12 {
        service
            .add_transaction(
                &client.id,
                NewTransaction {
                    timestamp: Some(start + Duration::days(day)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }
    let adjustment = service
        .add_transaction(
            &client.id,
            NewTransaction {
                vehicle_type: VehicleTypeSelection::PreviousDue,
                payable_amount: Some(Decimal::from(500)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let first = service.list_transactions(TransactionQuery::default()).await.unwrap();
    assert_eq!(first.total_transactions, 13);
    assert_eq!(first.total_pages, 2);
    assert_eq!(first.current_page, 1);
    assert_eq!(first.transactions.len(), 10);
    assert_eq!(first.transactions[0].transaction.id, adjustment.id);
    assert_eq!(first.transactions[0].type_label, "Previous Due");
    assert_eq!(first.transactions[1].type_label, "Easy Bike");
    assert_eq!(first.transactions[1].client_name, "Rahim");

    let second = service
        .list_transactions(TransactionQuery {
            page: 2,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(second.transactions.len(), 3);

    let latest = service.latest_transaction().await.unwrap().unwrap();
    assert_eq!(latest.transaction.id, adjustment.id);
}

#[tokio::test]
async fn test_latest_transaction_on_empty_ledger() {
    let service = create_test_service();
    assert!(service.latest_transaction().await.unwrap().is_none());
}

#[tokio::test]
async fn test_mutations_are_logged() {
    let service = create_test_service();
    let easybike = seed_vehicle_type(&service, "Easy Bike", 150).await;
    let client = seed_client(&service, "Rahim", "01711000000", &easybike.id).await;
    service
        .add_transaction(&client.id, NewTransaction::default())
        .await
        .unwrap();

    let actions: Vec<String> = service
        .get_app_logs()
        .await
        .unwrap()
        .into_iter()
        .map(|log| log.action)
        .collect();
    assert_eq!(actions, vec![VEHICLE_TYPE_ADDED, CLIENT_ADDED, TRANSACTION_ADDED]);
}
