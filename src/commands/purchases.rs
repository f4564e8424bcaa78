// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::PurchaseUpdate;
use crate::store::Store;
use crate::utils::{format_currency, maybe_print_json, parse_decimal, parse_month, pretty_table};
use anyhow::{anyhow, Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => remove(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let item = sub
        .get_one::<String>("item")
        .context("--item is required")?
        .trim();
    if item.is_empty() {
        return Err(anyhow!("Item name must not be empty"));
    }
    let price = parse_decimal(sub.get_one::<String>("price").context("--price is required")?)?;
    let qty = *sub.get_one::<u32>("qty").unwrap_or(&1);
    let purchase = store.add_purchase(item, price, qty)?;
    let ccy = store.settings()?.currency;
    println!(
        "Recorded {} x {} = {} ({})",
        purchase.quantity,
        purchase.item_name,
        format_currency(purchase.total_price, &ccy),
        purchase.id
    );
    Ok(())
}

fn edit(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").context("--id is required")?;
    let update = PurchaseUpdate {
        item_name: sub.get_one::<String>("item").map(|s| s.trim().to_string()),
        price: sub
            .get_one::<String>("price")
            .map(|s| parse_decimal(s))
            .transpose()?,
        quantity: sub.get_one::<u32>("qty").copied(),
    };
    if update.item_name.as_deref() == Some("") {
        return Err(anyhow!("Item name must not be empty"));
    }
    if store.update_purchase(id, update)? {
        println!("Updated purchase {}", id);
    } else {
        println!("No purchase with id {}", id);
    }
    Ok(())
}

fn remove(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").context("--id is required")?;
    if store.delete_purchase(id)? {
        println!("Removed purchase {}", id);
    } else {
        println!("No purchase with id {}", id);
    }
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(store, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = store.settings()?.currency;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.get(..16).unwrap_or(&r.date).replace('T', " "),
                    r.item.clone(),
                    r.quantity.to_string(),
                    format_currency(r.price, &ccy),
                    format_currency(r.total, &ccy),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["When", "Item", "Qty", "Price", "Total", "Id"], rows)
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct PurchaseRow {
    pub id: String,
    pub date: String,
    pub item: String,
    pub quantity: u32,
    pub price: Decimal,
    pub total: Decimal,
}

/// Purchases for `--today`, `--month`, or all of them, newest first.
pub fn query_rows(store: &Store, sub: &clap::ArgMatches) -> Result<Vec<PurchaseRow>> {
    let purchases = if sub.get_flag("today") {
        store.today_purchases()?
    } else if let Some(month) = sub.get_one::<String>("month") {
        store.month_purchases(Some(parse_month(month)?))?
    } else {
        store.purchases()?
    };

    let mut data: Vec<PurchaseRow> = purchases
        .into_iter()
        .map(|p| PurchaseRow {
            id: p.id,
            date: p.date,
            item: p.item_name,
            quantity: p.quantity,
            price: p.price,
            total: p.total_price,
        })
        .collect();
    data.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    Ok(data)
}
