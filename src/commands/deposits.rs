// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::DepositUpdate;
use crate::store::Store;
use crate::utils::{format_currency, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Context, Result};
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
    let amount = parse_decimal(sub.get_one::<String>("amount").context("--amount is required")?)?;
    let note = sub
        .get_one::<String>("note")
        .map(|s| s.trim())
        .unwrap_or_default();
    let deposit = store.add_deposit(amount, note)?;
    let settings = store.settings()?;
    println!(
        "Deposited {} ({})",
        format_currency(deposit.amount, &settings.currency),
        deposit.id
    );
    Ok(())
}

fn edit(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").context("--id is required")?;
    let update = DepositUpdate {
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_decimal(s))
            .transpose()?,
        note: sub.get_one::<String>("note").map(|s| s.trim().to_string()),
    };
    if store.update_deposit(id, update)? {
        println!("Updated deposit {}", id);
    } else {
        println!("No deposit with id {}", id);
    }
    Ok(())
}

fn remove(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").context("--id is required")?;
    if store.delete_deposit(id)? {
        println!("Removed deposit {}", id);
    } else {
        println!("No deposit with id {}", id);
    }
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(store)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = store.settings()?.currency;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.get(..10).unwrap_or(&r.date).to_string(),
                    format!("+{}", format_currency(r.amount, &ccy)),
                    r.note.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Date", "Amount", "Note", "Id"], rows));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct DepositRow {
    pub id: String,
    pub date: String,
    pub amount: Decimal,
    pub note: String,
}

/// Newest first.
pub fn query_rows(store: &Store) -> Result<Vec<DepositRow>> {
    let mut data: Vec<DepositRow> = store
        .deposits()?
        .into_iter()
        .map(|d| DepositRow {
            id: d.id,
            date: d.date,
            amount: d.amount,
            note: d.note,
        })
        .collect();
    data.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(data)
}
