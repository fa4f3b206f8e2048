mod common;

use buyback_core::{
    core::services::{BalanceLedger, TransactionService},
    domain::balance::BalanceStatus,
    domain::rate_sheet::{find_sheet, DEFAULT_RATE_SHEETS, WALK_INS},
    domain::user::{Role, User},
    storage::TransactionStore,
};
use chrono::{Duration, Local, NaiveDate};

use common::setup_test_env;

fn rep() -> User {
    User::new("Demo User", "demo.user@example.com", Role::Rep)
}

#[test]
fn opening_round_trips_through_the_store() {
    let (storage, _config) = setup_test_env();
    let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
    BalanceLedger::set_opening(&storage, day, 100.0).expect("save opening");

    let record = storage
        .get_daily_balance(day)
        .expect("load record")
        .expect("record present");
    assert_eq!(record.opening_balance, 100.0);
    assert_eq!(record.status, BalanceStatus::Saved);
}

#[test]
fn walkins_today_reconcile_the_closing_balance() {
    let (storage, _config) = setup_test_env();
    let walkins = find_sheet(&DEFAULT_RATE_SHEETS, WALK_INS).expect("walk-ins sheet");
    let now = Local::now();

    // Two walk-in payouts today totaling 120.50.
    let items = vec![
        TransactionService::line_item(walkins, "Cans", 6.0).unwrap(), // 99.00
        TransactionService::line_item(walkins, "PET Clear", 5.0).unwrap(), // 15.50
        TransactionService::line_item(walkins, "PET Green", 3.0).unwrap(), // 6.00
    ];
    TransactionService::add_batch(&storage, &rep(), "Walk-in client", &items, now)
        .expect("save batch");

    let today = now.date_naive();
    let record = BalanceLedger::set_opening(&storage, today, 500.0).expect("save opening");
    assert_eq!(record.closing_balance, 379.5);
}

#[test]
fn closing_carries_forward_to_the_next_day() {
    let (storage, _config) = setup_test_env();
    let monday = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    let tuesday = monday + Duration::days(1);

    let saved = BalanceLedger::set_opening(&storage, monday, 250.0).expect("save monday");
    assert_eq!(saved.closing_balance, 250.0);

    let carried = BalanceLedger::current(&storage, tuesday).expect("first access tuesday");
    assert_eq!(carried.opening_balance, 250.0);
    assert_eq!(carried.status, BalanceStatus::OpeningSet);

    // Reading again returns the persisted record, not a recomputation.
    let again = BalanceLedger::current(&storage, tuesday).expect("second access tuesday");
    assert_eq!(again, carried);
}

#[test]
fn saved_records_are_not_recomputed_retroactively() {
    let (storage, _config) = setup_test_env();
    let walkins = find_sheet(&DEFAULT_RATE_SHEETS, WALK_INS).expect("walk-ins sheet");
    let now = Local::now();
    let today = now.date_naive();

    let before = BalanceLedger::set_opening(&storage, today, 300.0).expect("save opening");
    assert_eq!(before.closing_balance, 300.0);

    // A payout recorded after the save only lands in the balance when the
    // admin saves again.
    let items = vec![TransactionService::line_item(walkins, "Cans", 2.0).unwrap()];
    TransactionService::add_batch(&storage, &rep(), "Walk-in client", &items, now)
        .expect("save batch");
    let stored = storage
        .get_daily_balance(today)
        .expect("load record")
        .expect("record present");
    assert_eq!(stored.closing_balance, 300.0);

    let resaved = BalanceLedger::set_opening(&storage, today, 300.0).expect("resave opening");
    assert_eq!(resaved.closing_balance, 300.0 - 33.0);
}

#[test]
fn payout_is_computed_from_the_unfiltered_set() {
    let (storage, _config) = setup_test_env();
    let now = Local::now();
    let today = now.date_naive();

    let walkins = find_sheet(&DEFAULT_RATE_SHEETS, WALK_INS).expect("walk-ins sheet");
    let cct = find_sheet(&DEFAULT_RATE_SHEETS, "CCT").expect("cct sheet");
    let items = vec![
        TransactionService::line_item(walkins, "Cans", 2.0).unwrap(), // 33.00 walk-in
        TransactionService::line_item(cct, "Cans", 4.0).unwrap(),     // 62.00 CCT
    ];
    TransactionService::add_batch(&storage, &rep(), "Mixed client", &items, now)
        .expect("save batch");

    // Only the walk-in line reconciles against cash, whatever filter any
    // dashboard is currently showing.
    let payout = BalanceLedger::walkin_payout(&storage, today).expect("payout");
    assert_eq!(payout, 33.0);
}
