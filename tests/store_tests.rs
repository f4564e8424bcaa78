// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::DateTime;
use grocerywallet::{
    db,
    error::LedgerError,
    kv,
    models::{AppSettings, CommonItemUpdate, DepositUpdate, PurchaseUpdate, SettingsUpdate},
    store::{Clock, Store, PURCHASES_KEY},
};
use rust_decimal::Decimal;
use rusqlite::Connection;
use std::str::FromStr;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn at(ts: &str) -> Clock {
    Clock::Fixed(DateTime::parse_from_rfc3339(ts).unwrap())
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[test]
fn open_seeds_default_common_items_once() {
    let conn = setup();
    let store = Store::open(&conn).unwrap();
    let items = store.common_items().unwrap();
    let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(
        names,
        ["1L Milk", "0.5L Milk", "Bread", "Eggs (6)", "Rice (1kg)", "Sugar (1kg)"]
    );
    assert_eq!(items[0].default_price, Decimal::from(60));
    assert_eq!(items[5].default_price, Decimal::from(45));

    // An emptied list is not reseeded on the next open.
    for item in &items {
        assert!(store.delete_common_item(&item.id).unwrap());
    }
    let store = Store::open(&conn).unwrap();
    assert!(store.common_items().unwrap().is_empty());
}

#[test]
fn add_purchase_stamps_time_and_total() {
    let conn = setup();
    let store = Store::open_with_clock(&conn, at("2025-03-10T09:15:00+05:30")).unwrap();
    let p = store.add_purchase("Bread", dec("12.5"), 3).unwrap();
    assert_eq!(p.total_price, dec("37.5"));
    assert_eq!(p.date, "2025-03-10T09:15:00.000+05:30");
    assert_eq!(store.purchases().unwrap(), vec![p]);
}

#[test]
fn update_purchase_recomputes_total() {
    let conn = setup();
    let store = Store::open_with_clock(&conn, at("2025-03-10T09:15:00+05:30")).unwrap();
    let p = store.add_purchase("Milk", Decimal::from(60), 1).unwrap();

    let found = store
        .update_purchase(
            &p.id,
            PurchaseUpdate {
                quantity: Some(4),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(found);
    let stored = &store.purchases().unwrap()[0];
    assert_eq!(stored.item_name, "Milk");
    assert_eq!(stored.quantity, 4);
    assert_eq!(stored.total_price, Decimal::from(240));
    assert_eq!(stored.date, p.date);
}

#[test]
fn unknown_ids_are_silent_noops() {
    let conn = setup();
    let store = Store::open(&conn).unwrap();
    let d = store.add_deposit(Decimal::from(500), "salary").unwrap();
    let before = store.deposits().unwrap();

    assert!(!store
        .update_deposit("missing", DepositUpdate {
            amount: Some(Decimal::ONE),
            note: None,
        })
        .unwrap());
    assert!(!store.delete_deposit("missing").unwrap());
    assert!(!store.delete_purchase("missing").unwrap());
    assert!(!store
        .update_common_item("missing", CommonItemUpdate::default())
        .unwrap());
    assert_eq!(store.deposits().unwrap(), before);

    assert!(store
        .update_deposit(&d.id, DepositUpdate {
            amount: None,
            note: Some("bonus".into()),
        })
        .unwrap());
    let after = store.deposits().unwrap();
    assert_eq!(after[0].note, "bonus");
    assert_eq!(after[0].amount, Decimal::from(500));
}

#[test]
fn deletes_keep_insertion_order() {
    let conn = setup();
    let store = Store::open(&conn).unwrap();
    let a = store.add_deposit(Decimal::from(100), "a").unwrap();
    let b = store.add_deposit(Decimal::from(200), "b").unwrap();
    let c = store.add_deposit(Decimal::from(300), "c").unwrap();
    assert!(store.delete_deposit(&b.id).unwrap());
    let ids: Vec<String> = store.deposits().unwrap().into_iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![a.id, c.id]);
}

#[test]
fn settings_default_and_partial_update() {
    let conn = setup();
    let store = Store::open(&conn).unwrap();
    assert_eq!(store.settings().unwrap(), AppSettings::default());
    assert_eq!(store.settings().unwrap().currency, "₹");

    let saved = store
        .update_settings(SettingsUpdate {
            monthly_budget: Some(Decimal::from(8000)),
            dark_mode: Some(Some(true)),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(saved.currency, "₹");
    assert_eq!(saved.monthly_budget, Decimal::from(8000));
    assert_eq!(store.settings().unwrap().dark_mode, Some(true));

    store
        .update_settings(SettingsUpdate {
            dark_mode: Some(None),
            ..Default::default()
        })
        .unwrap();
    let s = store.settings().unwrap();
    assert_eq!(s.dark_mode, None);
    assert_eq!(s.monthly_budget, Decimal::from(8000));

    let replaced = AppSettings {
        dark_mode: Some(false),
        currency: "$".into(),
        monthly_budget: dec("250.75"),
    };
    store.save_settings(&replaced).unwrap();
    assert_eq!(store.settings().unwrap(), replaced);
}

#[test]
fn windows_follow_the_clock() {
    let conn = setup();
    let store = Store::open_with_clock(&conn, at("2025-03-10T20:00:00+05:30")).unwrap();
    store
        .import_data(
            r#"{"purchases": [
                {"id":"1","itemName":"Bread","price":40,"quantity":1,"totalPrice":40,"date":"2025-03-10T08:00:00.000+05:30"},
                {"id":"2","itemName":"Milk","price":60,"quantity":1,"totalPrice":60,"date":"2025-03-02T08:00:00.000+05:30"},
                {"id":"3","itemName":"Rice","price":55,"quantity":2,"totalPrice":110,"date":"2025-02-27T08:00:00.000+05:30"}
            ]}"#,
        )
        .unwrap();

    let today: Vec<String> = store
        .today_purchases()
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(today, ["1"]);
    assert_eq!(store.month_purchases(None).unwrap().len(), 2);
    let feb = "2025-02".parse().unwrap();
    assert_eq!(store.month_purchases(Some(feb)).unwrap()[0].id, "3");
}

#[test]
fn corrupt_collection_is_an_error() {
    let conn = setup();
    let store = Store::open(&conn).unwrap();
    kv::set_item(&conn, PURCHASES_KEY, "{not json").unwrap();
    match store.purchases() {
        Err(LedgerError::Corrupt { key, .. }) => assert_eq!(key, "purchases"),
        other => panic!("expected corrupt error, got {:?}", other),
    }
    // Other collections still load.
    assert!(store.deposits().unwrap().is_empty());
}

#[test]
fn amounts_keep_full_precision_through_storage() {
    let conn = setup();
    let store = Store::open_with_clock(&conn, at("2025-03-10T09:15:00+05:30")).unwrap();
    let price = dec("1.0000000000000001");
    store.add_purchase("Saffron", price, 3).unwrap();
    store.add_deposit(dec("0.1000000000000000055"), "").unwrap();

    let stored = &store.purchases().unwrap()[0];
    assert_eq!(stored.price, price);
    assert_eq!(stored.total_price, stored.price * Decimal::from(stored.quantity));
    assert_eq!(stored.total_price, dec("3.0000000000000003"));
    assert_eq!(store.deposits().unwrap()[0].amount, dec("0.1000000000000000055"));
}

#[test]
fn out_of_range_amounts_are_rejected() {
    let conn = setup();
    let store = Store::open(&conn).unwrap();
    let huge = dec("79228162514264337593543950335");
    assert!(matches!(
        store.add_purchase("Gold", huge, 2),
        Err(LedgerError::AmountOutOfRange(_))
    ));
    assert!(matches!(
        store.add_deposit(huge, ""),
        Err(LedgerError::AmountOutOfRange(_))
    ));
    assert!(matches!(
        store.add_common_item("Gold", -huge),
        Err(LedgerError::AmountOutOfRange(_))
    ));
    let settings = AppSettings {
        monthly_budget: huge,
        ..AppSettings::default()
    };
    assert!(store.save_settings(&settings).is_err());

    let p = store.add_purchase("Bread", Decimal::from(40), 1).unwrap();
    let update = PurchaseUpdate {
        price: Some(huge),
        ..Default::default()
    };
    assert!(store.update_purchase(&p.id, update).is_err());
    assert_eq!(store.purchases().unwrap(), vec![p]);
    assert!(store.deposits().unwrap().is_empty());
    assert_eq!(store.settings().unwrap(), AppSettings::default());
}

#[test]
fn update_common_item_changes_only_that_item() {
    let conn = setup();
    let store = Store::open(&conn).unwrap();
    let before = store.common_items().unwrap();
    let bread = before.iter().find(|i| i.name == "Bread").unwrap().clone();

    let found = store
        .update_common_item(
            &bread.id,
            CommonItemUpdate {
                name: Some("Brown Bread".into()),
                default_price: Some(dec("42.5")),
            },
        )
        .unwrap();
    assert!(found);

    let after = store.common_items().unwrap();
    assert_eq!(after.len(), before.len());
    for (old, new) in before.iter().zip(&after) {
        if old.id == bread.id {
            assert_eq!(new.name, "Brown Bread");
            assert_eq!(new.default_price, dec("42.5"));
        } else {
            assert_eq!(new, old);
        }
    }

    // A partial update leaves the other field alone.
    store
        .update_common_item(
            &bread.id,
            CommonItemUpdate {
                name: None,
                default_price: Some(Decimal::from(45)),
            },
        )
        .unwrap();
    let bread = store
        .common_items()
        .unwrap()
        .into_iter()
        .find(|i| i.id == bread.id)
        .unwrap();
    assert_eq!(bread.name, "Brown Bread");
    assert_eq!(bread.default_price, Decimal::from(45));
}
