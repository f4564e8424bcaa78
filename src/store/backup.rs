// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde_json::{Map, Value};
use tracing::info;

use super::{
    stamp, Store, COMMON_ITEMS_KEY, DEPOSITS_KEY, LAST_CLEANUP_KEY, PURCHASES_KEY, SETTINGS_KEY,
};
use crate::error::Result;
use crate::kv;
use crate::models::{checked_amount, AppSettings, CommonItem, Deposit, ExportDocument, Purchase};

impl Store<'_> {
    pub fn export_document(&self) -> Result<ExportDocument> {
        Ok(ExportDocument {
            deposits: self.deposits()?,
            purchases: self.purchases()?,
            common_items: self.common_items()?,
            settings: self.settings()?,
            export_date: stamp(self.now()),
        })
    }

    /// Pretty-printed JSON of every collection plus the export time.
    pub fn export_data(&self) -> Result<String> {
        let doc = self.export_document()?;
        info!(
            deposits = doc.deposits.len(),
            purchases = doc.purchases.len(),
            "exporting data"
        );
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Overwrites each collection present in `json`. Keys are applied one by
    /// one; a bad value or an out-of-range amount fails the import after
    /// earlier keys were written.
    pub fn import_data(&self, json: &str) -> Result<Vec<&'static str>> {
        let doc: Map<String, Value> = serde_json::from_str(json)?;
        let mut applied = Vec::new();

        if let Some(value) = present(&doc, "deposits") {
            let deposits: Vec<Deposit> = serde_json::from_value(value.clone())?;
            for d in &deposits {
                checked_amount(d.amount)?;
            }
            self.write(DEPOSITS_KEY, &deposits)?;
            applied.push(DEPOSITS_KEY);
        }
        if let Some(value) = present(&doc, "purchases") {
            let purchases: Vec<Purchase> = serde_json::from_value(value.clone())?;
            for p in &purchases {
                checked_amount(p.price)?;
                checked_amount(p.total_price)?;
            }
            self.write(PURCHASES_KEY, &purchases)?;
            applied.push(PURCHASES_KEY);
        }
        if let Some(value) = present(&doc, "commonItems") {
            let items: Vec<CommonItem> = serde_json::from_value(value.clone())?;
            for i in &items {
                checked_amount(i.default_price)?;
            }
            self.write(COMMON_ITEMS_KEY, &items)?;
            applied.push(COMMON_ITEMS_KEY);
        }
        if let Some(value) = present(&doc, "settings") {
            let settings: AppSettings = serde_json::from_value(value.clone())?;
            checked_amount(settings.monthly_budget)?;
            self.write(SETTINGS_KEY, &settings)?;
            applied.push(SETTINGS_KEY);
        }

        info!(?applied, "import finished");
        Ok(applied)
    }

    pub fn clear_all_data(&self) -> Result<()> {
        kv::multi_remove(
            self.conn,
            &[
                DEPOSITS_KEY,
                PURCHASES_KEY,
                COMMON_ITEMS_KEY,
                SETTINGS_KEY,
                LAST_CLEANUP_KEY,
            ],
        )?;
        info!("all data cleared");
        Ok(())
    }
}

fn present<'a>(doc: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    doc.get(key).filter(|v| !v.is_null())
}
