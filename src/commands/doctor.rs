// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::stamp_date;
use crate::store::Store;
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Data problems that imports or hand edits can introduce.
pub fn find_issues(store: &Store) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Purchases whose stored total disagrees with price * quantity
    let purchases = store.purchases()?;
    for p in &purchases {
        if p.price.checked_mul(Decimal::from(p.quantity)) != Some(p.total_price) {
            rows.push(vec![
                "total_mismatch".into(),
                format!("{} {} x {} != {}", p.id, p.price, p.quantity, p.total_price),
            ]);
        }
        if p.quantity == 0 {
            rows.push(vec!["zero_quantity".into(), p.id.clone()]);
        }
    }

    // 2) Timestamps that window filters and the retention sweep cannot read
    let deposits = store.deposits()?;
    let stamps = deposits
        .iter()
        .map(|d| (&d.id, &d.date))
        .chain(purchases.iter().map(|p| (&p.id, &p.date)));
    for (id, date) in stamps {
        if stamp_date(date).is_none() {
            rows.push(vec!["bad_date".into(), format!("{} '{}'", id, date)]);
        }
    }

    // 3) Ids reused within a collection
    let mut seen = HashSet::new();
    for id in deposits.iter().map(|d| &d.id) {
        if !seen.insert(id) {
            rows.push(vec!["duplicate_deposit_id".into(), id.clone()]);
        }
    }
    let mut seen = HashSet::new();
    for id in purchases.iter().map(|p| &p.id) {
        if !seen.insert(id) {
            rows.push(vec!["duplicate_purchase_id".into(), id.clone()]);
        }
    }
    let items = store.common_items()?;
    let mut seen = HashSet::new();
    for id in items.iter().map(|i| &i.id) {
        if !seen.insert(id) {
            rows.push(vec!["duplicate_item_id".into(), id.clone()]);
        }
    }

    Ok(rows)
}

pub fn handle(store: &Store) -> Result<()> {
    let rows = find_issues(store)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
