// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::Store;
use anyhow::{Context, Result};

pub fn handle(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub
        .get_one::<String>("path")
        .context("--path is required")?
        .trim();
    let json = std::fs::read_to_string(path).with_context(|| format!("Open backup {}", path))?;
    let applied = store
        .import_data(&json)
        .with_context(|| format!("Import from {}", path))?;
    if applied.is_empty() {
        println!("Nothing to import from {}", path);
    } else {
        println!("Imported {} from {}", applied.join(", "), path);
    }
    Ok(())
}
