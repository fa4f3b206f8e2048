mod common;

use buyback_core::{
    core::clock::SystemClock,
    core::identity::Directory,
    core::services::{AggregationService, TransactionService},
    core::session::Session,
    domain::rate_sheet::{find_sheet, DEFAULT_RATE_SHEETS, WALK_INS},
    domain::user::Role,
    storage::TransactionStore,
};
use chrono::Local;

use common::setup_test_env;

#[test]
fn rep_flow_from_registration_to_dashboard() {
    let (storage, config_manager) = setup_test_env();
    let config = config_manager.load().expect("load config");

    let mut directory = Directory::new(config.admin_email.clone());
    directory
        .register("Thandi Mokoena", "thandi.mokoena@depot.co.za")
        .expect("register rep");
    let rep = directory.login("thandi.mokoena@depot.co.za");
    assert_eq!(rep.role, Role::Rep);

    let mut session = Session::new();
    session.log_in(rep);
    session.set_client_name("Local Cafe").expect("set client");
    let walkins = find_sheet(&DEFAULT_RATE_SHEETS, WALK_INS).expect("walk-ins sheet");
    session.add_item(walkins, "Cans", 2.0).expect("add cans");
    session
        .add_item(walkins, "PET Clear", 10.0)
        .expect("add pet");
    let receipt = session.save_all(&storage, &SystemClock).expect("save all");
    assert_eq!(receipt.items.len(), 2);

    let mine = storage
        .query_by_owner("thandi.mokoena@depot.co.za")
        .expect("query rep transactions");
    let totals = AggregationService::totals(&mine);
    assert_eq!(totals.count, 2);
    assert_eq!(totals.total_weight_kg, 12.0);
    assert_eq!(totals.total_payout, 2.0 * 16.5 + 10.0 * 3.1);
}

#[test]
fn admin_projection_spans_all_reps() {
    let (storage, config_manager) = setup_test_env();
    let config = config_manager.load().expect("load config");
    let mut directory = Directory::new(config.admin_email.clone());

    let walkins = find_sheet(&DEFAULT_RATE_SHEETS, WALK_INS).expect("walk-ins sheet");
    let now = Local::now();
    for (name, email, weight) in [
        ("Thandi Mokoena", "thandi@depot.co.za", 30.0),
        ("Sipho Dlamini", "sipho@depot.co.za", 12.5),
    ] {
        let rep = directory.register(name, email).expect("register rep");
        let items = vec![TransactionService::line_item(walkins, "Cans", weight).unwrap()];
        TransactionService::add_batch(&storage, &rep, "Corner Store", &items, now)
            .expect("save batch");
    }

    let admin = directory.login(&config.admin_email);
    assert!(admin.is_admin());

    let all = storage.query_all().expect("query all");
    let grouped = AggregationService::group_by_owner(&all);
    let overview = AggregationService::admin_overview(&grouped);
    assert_eq!(overview.active_reps, 2);
    assert_eq!(overview.totals.count, 2);
    assert_eq!(overview.performance[0].display_name, "Thandi Mokoena");
    assert_eq!(overview.performance[0].total_weight_kg, 30.0);

    let hits = AggregationService::search(&all, "sipho");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].rep_name, "Sipho Dlamini");
}

#[test]
fn saved_transactions_freeze_their_price() {
    let (storage, _config_manager) = setup_test_env();
    let mut sheets = DEFAULT_RATE_SHEETS.clone();
    let rep = buyback_core::domain::user::User::new("Demo User", "demo@depot.co.za", Role::Rep);

    let walkins = find_sheet(&sheets, WALK_INS).expect("walk-ins sheet");
    let items = vec![TransactionService::line_item(walkins, "Cans", 1.0).unwrap()];
    TransactionService::add_batch(&storage, &rep, "Cafe", &items, Local::now())
        .expect("save batch");

    // A later sheet change must not affect the stored record.
    if let Some(sheet) = sheets.iter_mut().find(|sheet| sheet.name == WALK_INS) {
        for material in &mut sheet.materials {
            material.price_per_kg = 0.0;
        }
    }
    let stored = storage.query_all().expect("query all");
    assert_eq!(stored[0].price_per_kg, 16.5);
    assert_eq!(stored[0].total, 16.5);
}
