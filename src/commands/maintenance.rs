// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::{CleanupReport, Store};
use anyhow::{anyhow, Result};

pub fn clear(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    if !sub.get_flag("yes") {
        return Err(anyhow!("Refusing to delete all data without --yes"));
    }
    store.clear_all_data()?;
    println!("All deposits, purchases, items, and settings deleted");
    Ok(())
}

pub fn describe(report: &CleanupReport) -> String {
    match &report.cutoff {
        Some(cutoff) if report.ran => format!(
            "Removed {} deposits and {} purchases dated before {}",
            report.deposits_removed, report.purchases_removed, cutoff
        ),
        _ => "Retention sweep already ran today".to_string(),
    }
}

pub fn cleanup(store: &Store) -> Result<()> {
    let report = store.cleanup_old_data()?;
    println!("{}", describe(&report));
    Ok(())
}
