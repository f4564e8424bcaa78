// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::DateTime;
use grocerywallet::{
    commands::maintenance,
    db, kv,
    store::{retention_cutoff, Clock, Store, DEPOSITS_KEY, LAST_CLEANUP_KEY, RETENTION_MONTHS},
};
use rusqlite::Connection;
use serde_json::json;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn at(ts: &str) -> Clock {
    Clock::Fixed(DateTime::parse_from_rfc3339(ts).unwrap())
}

fn purchase(id: &str, date: &str) -> serde_json::Value {
    json!({
        "id": id,
        "itemName": "Bread",
        "price": 40,
        "quantity": 1,
        "totalPrice": 40,
        "date": date,
    })
}

fn deposit(id: &str, date: &str) -> serde_json::Value {
    json!({ "id": id, "amount": 500, "date": date, "note": "" })
}

#[test]
fn cutoff_is_first_of_month_four_months_back() {
    let now = DateTime::parse_from_rfc3339("2025-06-15T10:00:00+05:30").unwrap();
    assert_eq!(
        retention_cutoff(now, RETENTION_MONTHS),
        "2025-02-01T00:00:00.000+05:30"
    );
    let jan = DateTime::parse_from_rfc3339("2025-01-20T23:30:00-04:00").unwrap();
    assert_eq!(retention_cutoff(jan, 4), "2024-09-01T00:00:00.000-04:00");
    // Month-end dates do not overflow into the following month.
    let end = DateTime::parse_from_rfc3339("2025-07-31T12:00:00+00:00").unwrap();
    assert_eq!(retention_cutoff(end, 4), "2025-03-01T00:00:00.000+00:00");
}

#[test]
fn sweep_drops_records_before_cutoff() {
    let conn = setup();
    let store = Store::open_with_clock(&conn, at("2025-06-15T10:00:00+05:30")).unwrap();
    let doc = json!({
        "deposits": [
            deposit("old", "2025-01-31T23:59:59.999+05:30"),
            deposit("edge", "2025-02-01T00:00:00.000+05:30"),
        ],
        "purchases": [
            purchase("p-old", "2024-12-05T09:00:00.000+05:30"),
            purchase("p-legacy", "2025-02-01"),
            purchase("p-new", "2025-06-14T18:20:00.000+05:30"),
        ],
    });
    store.import_data(&doc.to_string()).unwrap();

    let report = store.cleanup_old_data().unwrap();
    assert!(report.ran);
    assert_eq!(report.cutoff.as_deref(), Some("2025-02-01T00:00:00.000+05:30"));
    assert_eq!(report.deposits_removed, 1);
    assert_eq!(report.purchases_removed, 2);

    let deposits: Vec<String> = store.deposits().unwrap().into_iter().map(|d| d.id).collect();
    assert_eq!(deposits, ["edge"]);
    let purchases: Vec<String> = store.purchases().unwrap().into_iter().map(|p| p.id).collect();
    assert_eq!(purchases, ["p-new"]);
    assert_eq!(
        kv::get_item(&conn, LAST_CLEANUP_KEY).unwrap().as_deref(),
        Some("2025-06-15")
    );
}

#[test]
fn sweep_runs_once_per_day() {
    let conn = setup();
    let store = Store::open_with_clock(&conn, at("2025-06-15T08:00:00+05:30")).unwrap();
    assert!(store.cleanup_old_data().unwrap().ran);

    let late = json!({ "purchases": [purchase("late", "2024-01-01T00:00:00.000+05:30")] });
    store.import_data(&late.to_string()).unwrap();
    let again = store.cleanup_old_data().unwrap();
    assert!(!again.ran);
    assert_eq!(maintenance::describe(&again), "Retention sweep already ran today");
    assert_eq!(store.purchases().unwrap().len(), 1);

    let tomorrow = Store::open_with_clock(&conn, at("2025-06-16T08:00:00+05:30")).unwrap();
    let report = tomorrow.cleanup_old_data().unwrap();
    assert!(report.ran);
    assert_eq!(report.purchases_removed, 1);
    assert!(tomorrow.purchases().unwrap().is_empty());
}

#[test]
fn unchanged_collections_are_not_written() {
    let conn = setup();
    let store = Store::open_with_clock(&conn, at("2025-06-15T08:00:00+05:30")).unwrap();
    let old = json!({ "purchases": [purchase("old", "2024-01-01T00:00:00.000+05:30")] });
    store.import_data(&old.to_string()).unwrap();

    let report = store.cleanup_old_data().unwrap();
    assert_eq!(report.deposits_removed, 0);
    assert_eq!(report.purchases_removed, 1);
    assert_eq!(kv::get_item(&conn, DEPOSITS_KEY).unwrap(), None);
    assert_eq!(
        maintenance::describe(&report),
        "Removed 0 deposits and 1 purchases dated before 2025-02-01T00:00:00.000+05:30"
    );
}
