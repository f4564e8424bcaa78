// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{CommonItem, CommonItemUpdate};
use crate::store::Store;
use crate::utils::{format_currency, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{anyhow, Context, Result};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => remove(store, sub)?,
        Some(("buy", sub)) => buy(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub
        .get_one::<String>("name")
        .context("--name is required")?
        .trim();
    if name.is_empty() {
        return Err(anyhow!("Item name must not be empty"));
    }
    let price = parse_decimal(sub.get_one::<String>("price").context("--price is required")?)?;
    let item = store.add_common_item(name, price)?;
    println!("Added item '{}' ({})", item.name, item.id);
    Ok(())
}

fn edit(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").context("--id is required")?;
    let update = CommonItemUpdate {
        name: sub.get_one::<String>("name").map(|s| s.trim().to_string()),
        default_price: sub
            .get_one::<String>("price")
            .map(|s| parse_decimal(s))
            .transpose()?,
    };
    if store.update_common_item(id, update)? {
        println!("Updated item {}", id);
    } else {
        println!("No item with id {}", id);
    }
    Ok(())
}

fn remove(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").context("--id is required")?;
    if store.delete_common_item(id)? {
        println!("Removed item {}", id);
    } else {
        println!("No item with id {}", id);
    }
    Ok(())
}

/// Quick add: one purchase at the template's default price.
fn buy(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").context("--id is required")?;
    let qty = *sub.get_one::<u32>("qty").unwrap_or(&1);
    let item = store
        .common_items()?
        .into_iter()
        .find(|i| &i.id == id)
        .with_context(|| format!("Item '{}' not found", id))?;
    let purchase = store.add_purchase(&item.name, item.default_price, qty)?;
    let ccy = store.settings()?.currency;
    println!(
        "Recorded {} x {} = {}",
        purchase.quantity,
        purchase.item_name,
        format_currency(purchase.total_price, &ccy)
    );
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let items: Vec<CommonItem> = store.common_items()?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
        let ccy = store.settings()?.currency;
        let rows: Vec<Vec<String>> = items
            .iter()
            .map(|i| {
                vec![
                    i.name.clone(),
                    format_currency(i.default_price, &ccy),
                    i.id.clone(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Item", "Default price", "Id"], rows));
    }
    Ok(())
}
