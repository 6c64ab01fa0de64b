use super::{create_test_service, seed_client, seed_vehicle_type};
use crate::core::errors::LedgerError;
use crate::core::ledger::{NewTransaction, Period, VehicleTypeSelection};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;

#[tokio::test]
async fn test_total_due_ignores_credit_but_net_due_does_not() {
    let service = create_test_service();
    let easybike = seed_vehicle_type(&service, "Easy Bike", 150).await;
    let debtor = seed_client(&service, "Rahim", "01711000000", &easybike.id).await;
    let creditor = seed_client(&service, "Karim", "01822000000", &easybike.id).await;
    let settled = seed_client(&service, "Selim", "01933000000", &easybike.id).await;

    service
        .add_transaction(&debtor.id, NewTransaction::default())
        .await
        .unwrap();
    service
        .add_transaction(
            &creditor.id,
            NewTransaction {
                cash_received: Some(Decimal::from(250)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    service
        .add_transaction(
            &settled.id,
            NewTransaction {
                cash_received: Some(Decimal::from(150)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let overview = service.dashboard_overview(Period::All).await.unwrap();
    assert_eq!(overview.client_count, 3);
    assert_eq!(overview.transaction_count, 3);
    assert_eq!(overview.total_due, Decimal::from(150));
    assert_eq!(overview.net_due, Decimal::from(50));
    assert!(overview.total_due > overview.net_due);

    // Zero balances stay off the chart; credit shows up at the bottom.
    let chart: Vec<(&str, Decimal)> = overview
        .top_dues
        .iter()
        .map(|entry| (entry.name.as_str(), entry.due))
        .collect();
    assert_eq!(chart, vec![("Rahim", Decimal::from(150)), ("Karim", Decimal::from(-100))]);
}

#[tokio::test]
async fn test_period_summary_counts_only_the_window() {
    let service = create_test_service();
    let easybike = seed_vehicle_type(&service, "Easy Bike", 150).await;
    let client = seed_client(&service, "Rahim", "01711000000", &easybike.id).await;
    let now = Utc::now();

    for (days_ago, cash) in [(45, 150), (3, 100), (0, 20)] {
        service
            .add_transaction(
                &client.id,
                NewTransaction {
                    timestamp: Some(now - Duration::days(days_ago)),
                    cash_received: Some(Decimal::from(cash)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    let week = service.dashboard_overview(Period::LastDays(7)).await.unwrap();
    assert_eq!(week.period_summary.transaction_count, 2);
    assert_eq!(week.period_summary.total_cash_received, Decimal::from(120));
    assert_eq!(week.period_summary.total_payable, Decimal::from(300));
    // Totals are not limited by the period.
    assert_eq!(week.transaction_count, 3);
    assert_eq!(week.total_due, Decimal::from(180));

    let all = service.dashboard_overview(Period::All).await.unwrap();
    assert_eq!(all.period_summary.total_cash_received, Decimal::from(270));

    let today = now.date_naive();
    let custom = service
        .dashboard_overview(Period::Custom {
            from: today - Duration::days(50),
            to: today - Duration::days(40),
        })
        .await
        .unwrap();
    assert_eq!(custom.period_summary.transaction_count, 1);
    assert_eq!(custom.period_summary.total_cash_received, Decimal::from(150));
}

#[tokio::test]
async fn test_inverted_custom_range_is_rejected() {
    let service = create_test_service();
    let today = Utc::now().date_naive();
    let result = service
        .dashboard_overview(Period::Custom {
            from: today,
            to: today - Duration::days(1),
        })
        .await;
    assert!(matches!(result, Err(LedgerError::InvalidDateRange(_))));
}

#[tokio::test]
async fn test_cached_dashboard_sees_mutations() {
    let service = create_test_service();
    let easybike = seed_vehicle_type(&service, "Easy Bike", 150).await;
    let client = seed_client(&service, "Rahim", "01711000000", &easybike.id).await;

    let before = service.dashboard_overview(Period::All).await.unwrap();
    assert_eq!(before.total_due, Decimal::ZERO);
    assert!(before.top_dues.is_empty());

    // Served from cache until something changes.
    let cached = service.dashboard_overview(Period::All).await.unwrap();
    assert_eq!(cached.generated_at, before.generated_at);

    let tx = service
        .add_transaction(
            &client.id,
            NewTransaction {
                vehicle_type: VehicleTypeSelection::PreviousDue,
                payable_amount: Some(Decimal::from(400)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let after = service.dashboard_overview(Period::All).await.unwrap();
    assert_eq!(after.total_due, Decimal::from(400));
    assert_eq!(after.top_dues.len(), 1);

    service.delete_transaction(&client.id, &tx.id).await.unwrap();
    let trashed = service.dashboard_overview(Period::All).await.unwrap();
    assert_eq!(trashed.total_due, Decimal::ZERO);
    assert_eq!(trashed.transaction_count, 0);
}

#[tokio::test]
async fn test_top_dues_capped_at_ten() {
    let service = create_test_service();
    let easybike = seed_vehicle_type(&service, "Easy Bike", 150).await;

    for i in 0..12 {
        let client = seed_client(&service, &format!("Client {}", i), &format!("0170000{:04}", i), &easybike.id).await;
        service
            .add_transaction(
                &client.id,
                NewTransaction {
                    vehicle_type: VehicleTypeSelection::PreviousDue,
                    payable_amount: Some(Decimal::from(10 * (i + 1))),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    let overview = service.dashboard_overview(Period::All).await.unwrap();
    assert_eq!(overview.top_dues.len(), 10);
    assert_eq!(overview.top_dues[0].due, Decimal::from(120));
    assert_eq!(overview.top_dues[9].due, Decimal::from(30));
    assert_eq!(overview.total_due, Decimal::from(780));
}
