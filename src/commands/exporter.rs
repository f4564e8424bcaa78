// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::Store;
use anyhow::{Context, Result};

pub fn handle(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json = store.export_data()?;
    match sub.get_one::<String>("out").map(|s| s.trim()) {
        Some(out) => {
            std::fs::write(out, &json).with_context(|| format!("Write backup to {}", out))?;
            eprintln!("Exported data to {}", out);
        }
        None => println!("{}", json),
    }
    Ok(())
}
