// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

use grocerywallet::{cli, commands, db, store::Store, utils};

fn main() -> Result<()> {
    utils::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let path = match matches.get_one::<PathBuf>("db") {
        Some(p) => p.clone(),
        None => db::db_path()?,
    };
    let conn = db::open_or_init_at(&path)?;
    let store = Store::open(&conn)?;

    if matches.subcommand_name() != Some("cleanup") {
        let report = store.cleanup_old_data()?;
        tracing::debug!(ran = report.ran, "startup retention sweep");
    }

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", path.display());
        }
        Some(("deposit", sub)) => commands::deposits::handle(&store, sub)?,
        Some(("purchase", sub)) => commands::purchases::handle(&store, sub)?,
        Some(("item", sub)) => commands::items::handle(&store, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&store, sub)?,
        Some(("summary", sub)) => commands::reports::summary(&store, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("import", sub)) => commands::importer::handle(&store, sub)?,
        Some(("clear", sub)) => commands::maintenance::clear(&store, sub)?,
        Some(("cleanup", _)) => commands::maintenance::cleanup(&store)?,
        Some(("doctor", _)) => commands::doctor::handle(&store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
