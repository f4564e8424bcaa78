// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{AppSettings, SettingsUpdate};
use crate::store::Store;
use crate::utils::{format_currency, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(store, sub)?,
        Some(("set", sub)) => set(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn theme_label(settings: &AppSettings) -> &'static str {
    match settings.dark_mode {
        Some(true) => "dark",
        Some(false) => "light",
        None => "system",
    }
}

fn show(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let settings = store.settings()?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &settings)? {
        let rows = vec![
            vec!["Currency".to_string(), settings.currency.clone()],
            vec![
                "Monthly budget".to_string(),
                format_currency(settings.monthly_budget, &settings.currency),
            ],
            vec!["Theme".to_string(), theme_label(&settings).to_string()],
        ];
        println!("{}", pretty_table(&["Setting", "Value"], rows));
    }
    Ok(())
}

pub fn update_from_args(sub: &clap::ArgMatches) -> Result<SettingsUpdate> {
    Ok(SettingsUpdate {
        dark_mode: sub
            .get_one::<String>("theme")
            .map(|t| match t.as_str() {
                "dark" => Some(true),
                "light" => Some(false),
                _ => None,
            }),
        currency: sub.get_one::<String>("currency").map(|s| s.trim().to_string()),
        monthly_budget: sub
            .get_one::<String>("budget")
            .map(|s| parse_decimal(s))
            .transpose()?,
    })
}

fn set(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let settings = store.update_settings(update_from_args(sub)?)?;
    println!(
        "Settings saved: currency {}, budget {}, theme {}",
        settings.currency,
        format_currency(settings.monthly_budget, &settings.currency),
        theme_label(&settings)
    );
    Ok(())
}
