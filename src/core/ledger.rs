//! Due-ledger rules.
//!
//! Everything here is pure: no storage, no clock reads (callers pass `now`).
//! A transaction either records a recharge (`vehicle_type_id` set, `due` is
//! payable minus cash) or a "previous due" adjustment (no vehicle type,
//! payable and cash pinned at zero, `due` carries the adjustment).

use crate::core::errors::LedgerError;
use crate::core::models::{Client, ClientWithTransactions, Transaction, VehicleType};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use utoipa::ToSchema;
use uuid::Uuid;

pub const PREVIOUS_DUE_LABEL: &str = "Previous Due";
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Which vehicle type a new transaction is charged against.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum VehicleTypeSelection {
    /// Use the client's profile default.
    #[default]
    ClientDefault,
    Specific(String),
    /// No vehicle type: the row is a due adjustment.
    PreviousDue,
}

#[derive(Clone, Debug, Default)]
pub struct NewTransaction {
    pub id: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub vehicle_type: VehicleTypeSelection,
    /// Explicit payable amount; for an adjustment this is the adjustment itself.
    pub payable_amount: Option<Decimal>,
    pub cash_received: Option<Decimal>,
}

#[derive(Clone, Debug, Default)]
pub struct TransactionPatch {
    pub timestamp: Option<DateTime<Utc>>,
    pub payable_amount: Option<Decimal>,
    pub cash_received: Option<Decimal>,
    pub due: Option<Decimal>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.timestamp.is_none() && self.payable_amount.is_none() && self.cash_received.is_none() && self.due.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DueAggregation {
    /// Plain sum; overpayment credit offsets debt.
    Signed,
    /// Sum of `max(0, due)`; credit is ignored.
    Clamped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TransactionSortKey {
    #[default]
    Timestamp,
    #[serde(alias = "payableAmount")]
    PayableAmount,
    #[serde(alias = "cashReceived")]
    CashReceived,
    Due,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClientSortKey {
    Name,
    #[default]
    #[serde(alias = "createdAt")]
    CreatedAt,
    Due,
}

/// Half-open time window `[start, end)`; a missing bound is unbounded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| at >= start) && self.end.is_none_or(|end| at < end)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    All,
    Today,
    LastDays(u32),
    /// Calendar days, both inclusive.
    Custom { from: NaiveDate, to: NaiveDate },
}

impl Period {
    pub fn to_range(&self, now: DateTime<Utc>) -> Result<DateRange, LedgerError> {
        match *self {
            Period::All => Ok(DateRange::default()),
            Period::Today => {
                let start = start_of_day(now.date_naive());
                Ok(DateRange {
                    start: Some(start),
                    end: Some(next_day(start)?),
                })
            }
            Period::LastDays(days) => {
                let start = now
                    .checked_sub_signed(Duration::days(i64::from(days)))
                    .ok_or_else(|| LedgerError::InvalidDateRange(format!("{} days reaches past the calendar", days)))?;
                Ok(DateRange {
                    start: Some(start),
                    end: None,
                })
            }
            Period::Custom { from, to } => {
                if from > to {
                    return Err(LedgerError::InvalidDateRange(format!("{} is after {}", from, to)));
                }
                Ok(DateRange {
                    start: Some(start_of_day(from)),
                    end: Some(next_day(start_of_day(to))?),
                })
            }
        }
    }
}

fn next_day(start: DateTime<Utc>) -> Result<DateTime<Utc>, LedgerError> {
    start
        .checked_add_signed(Duration::days(1))
        .ok_or_else(|| LedgerError::InvalidDateRange(format!("no day follows {}", start.date_naive())))
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DuePoint {
    #[schema(value_type = String)]
    pub timestamp: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub cumulative_due: Decimal,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LedgerSummary {
    pub transaction_count: usize,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_payable: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_cash_received: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub net_due: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub outstanding_due: Decimal,
}

pub fn compute_due(payable_amount: Decimal, cash_received: Decimal) -> Decimal {
    payable_amount - cash_received
}

/// The vehicle type id a new transaction will carry, `None` for an adjustment.
pub fn resolve_vehicle_type_id(client: &Client, selection: &VehicleTypeSelection) -> Option<String> {
    match selection {
        VehicleTypeSelection::ClientDefault => Some(client.vehicle_type_id.clone()),
        VehicleTypeSelection::Specific(id) => Some(id.clone()),
        VehicleTypeSelection::PreviousDue => None,
    }
}

/// Builds a new ledger row for `client`.
///
/// `vehicle_type` must be the record for the id returned by
/// [`resolve_vehicle_type_id`]; it is ignored for adjustments.
pub fn create_transaction(
    client: &Client,
    input: NewTransaction,
    vehicle_type: Option<&VehicleType>,
    now: DateTime<Utc>,
) -> Result<Transaction, LedgerError> {
    let vehicle_type_id = resolve_vehicle_type_id(client, &input.vehicle_type);

    let (payable_amount, cash_received, due) = match &vehicle_type_id {
        None => {
            let amount = input.payable_amount.ok_or_else(|| {
                LedgerError::invalid_input(
                    "payable_amount",
                    "Missing Amount",
                    "A previous due adjustment requires an amount",
                )
            })?;
            (Decimal::ZERO, Decimal::ZERO, amount)
        }
        Some(id) => {
            let vehicle_type = vehicle_type
                .filter(|vt| vt.id == *id)
                .ok_or_else(|| LedgerError::VehicleTypeNotFound(id.clone()))?;
            let payable = input.payable_amount.unwrap_or(vehicle_type.charging_fee);
            let cash = input.cash_received.unwrap_or(Decimal::ZERO);
            (payable, cash, compute_due(payable, cash))
        }
    };

    Ok(Transaction {
        id: input.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        client_id: client.id.clone(),
        timestamp: input.timestamp.unwrap_or(now),
        vehicle_type_id,
        payable_amount,
        cash_received,
        due,
        modified_at: now,
        deleted: false,
        deleted_at: None,
    })
}

/// Applies an edit. Adjustment rows only move when `due` is patched; normal
/// rows recompute `due` whenever `cash_received` is patched.
pub fn update_transaction(tx: &mut Transaction, patch: TransactionPatch, now: DateTime<Utc>) {
    if let Some(timestamp) = patch.timestamp {
        tx.timestamp = timestamp;
    }

    if tx.is_adjustment() {
        if let Some(due) = patch.due {
            tx.due = due;
        }
    } else {
        if let Some(payable) = patch.payable_amount {
            tx.payable_amount = payable;
        }
        if let Some(due) = patch.due {
            tx.due = due;
        }
        if let Some(cash) = patch.cash_received {
            tx.cash_received = cash;
            tx.due = compute_due(tx.payable_amount, cash);
        }
    }

    tx.modified_at = now;
}

pub fn aggregate_due<'a>(transactions: impl IntoIterator<Item = &'a Transaction>, mode: DueAggregation) -> Decimal {
    transactions
        .into_iter()
        .map(|tx| match mode {
            DueAggregation::Signed => tx.due,
            DueAggregation::Clamped => tx.due.max(Decimal::ZERO),
        })
        .sum()
}

pub fn total_cash_received<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Decimal {
    transactions.into_iter().map(|tx| tx.cash_received).sum()
}

pub fn total_payable<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Decimal {
    transactions.into_iter().map(|tx| tx.payable_amount).sum()
}

pub fn filter_by_date_range<'a>(transactions: &'a [Transaction], range: &DateRange) -> Vec<&'a Transaction> {
    transactions.iter().filter(|tx| range.contains(tx.timestamp)).collect()
}

pub fn summarize<'a>(transactions: impl IntoIterator<Item = &'a Transaction> + Clone) -> LedgerSummary {
    LedgerSummary {
        transaction_count: transactions.clone().into_iter().count(),
        total_payable: total_payable(transactions.clone()),
        total_cash_received: total_cash_received(transactions.clone()),
        net_due: aggregate_due(transactions.clone(), DueAggregation::Signed),
        outstanding_due: aggregate_due(transactions, DueAggregation::Clamped),
    }
}

/// Running signed due inside `range`, oldest first, starting from zero.
pub fn due_trend(transactions: &[Transaction], range: &DateRange) -> Vec<DuePoint> {
    let mut in_range = filter_by_date_range(transactions, range);
    in_range.sort_by_key(|tx| tx.timestamp);

    let mut cumulative_due = Decimal::ZERO;
    in_range
        .into_iter()
        .map(|tx| {
            cumulative_due += tx.due;
            DuePoint {
                timestamp: tx.timestamp,
                cumulative_due,
            }
        })
        .collect()
}

pub fn type_label(tx: &Transaction, vehicle_type: Option<&VehicleType>) -> String {
    match (&tx.vehicle_type_id, vehicle_type) {
        (None, _) => PREVIOUS_DUE_LABEL.to_string(),
        (Some(id), Some(vt)) if vt.id == *id => vt.name.clone(),
        _ => UNKNOWN_LABEL.to_string(),
    }
}

fn apply_order(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

pub fn sort_transactions(transactions: &mut [Transaction], key: TransactionSortKey, order: SortOrder) {
    transactions.sort_by(|a, b| {
        let ordering = match key {
            TransactionSortKey::Timestamp => a.timestamp.cmp(&b.timestamp),
            TransactionSortKey::PayableAmount => a.payable_amount.cmp(&b.payable_amount),
            TransactionSortKey::CashReceived => a.cash_received.cmp(&b.cash_received),
            TransactionSortKey::Due => a.due.cmp(&b.due),
        };
        apply_order(ordering, order)
    });
}

/// Sorting by due uses the clamped total, so credit never ranks a client
/// below one with zero balance. Ties fall back to the client id so pages stay
/// stable between reads.
pub fn sort_clients(clients: &mut [ClientWithTransactions], key: ClientSortKey, order: SortOrder) {
    let sort_value = |entry: &ClientWithTransactions| match key {
        ClientSortKey::Name => SortValue::Text(entry.client.name.to_lowercase()),
        ClientSortKey::CreatedAt => SortValue::Time(entry.client.created_at),
        ClientSortKey::Due => SortValue::Amount(aggregate_due(&entry.transactions, DueAggregation::Clamped)),
    };
    clients.sort_by(|a, b| {
        apply_order(sort_value(a).cmp(&sort_value(b)), order).then_with(|| a.client.id.cmp(&b.client.id))
    });
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum SortValue {
    Text(String),
    Time(DateTime<Utc>),
    Amount(Decimal),
}
