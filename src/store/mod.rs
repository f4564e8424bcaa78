// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Ledger store: whole-collection read-modify-write over the `kv` table.
//!
//! Each collection is one JSON document. Every mutation reads the full list,
//! changes it in memory and writes the full list back. There is no locking;
//! two interleaved mutations can lose an update.

mod backup;
mod retention;

pub use retention::{retention_cutoff, CleanupReport, RETENTION_MONTHS};

use chrono::{DateTime, FixedOffset, Local, NaiveDate, SecondsFormat};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::analytics::{self, Month};
use crate::error::{LedgerError, Result};
use crate::kv;
use crate::models::{
    checked_amount, AppSettings, CommonItem, CommonItemUpdate, Deposit, DepositUpdate, Purchase,
    PurchaseUpdate, SettingsUpdate,
};

pub const DEPOSITS_KEY: &str = "deposits";
pub const PURCHASES_KEY: &str = "purchases";
pub const COMMON_ITEMS_KEY: &str = "common_items";
pub const SETTINGS_KEY: &str = "settings";
pub const LAST_CLEANUP_KEY: &str = "last_cleanup";

const DEFAULT_COMMON_ITEMS: [(&str, i64); 6] = [
    ("1L Milk", 60),
    ("0.5L Milk", 30),
    ("Bread", 40),
    ("Eggs (6)", 45),
    ("Rice (1kg)", 55),
    ("Sugar (1kg)", 45),
];

/// Source of "now" for timestamps, windows and the retention sweep.
#[derive(Debug, Clone, Copy)]
pub enum Clock {
    System,
    Fixed(DateTime<FixedOffset>),
}

impl Clock {
    pub fn now(&self) -> DateTime<FixedOffset> {
        match self {
            Clock::System => Local::now().fixed_offset(),
            Clock::Fixed(at) => *at,
        }
    }
}

/// Formats a record timestamp. Fixed width, so string order is time order.
pub fn stamp(at: DateTime<FixedOffset>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, false)
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub struct Store<'c> {
    conn: &'c Connection,
    clock: Clock,
}

impl<'c> Store<'c> {
    pub fn open(conn: &'c Connection) -> Result<Self> {
        Self::open_with_clock(conn, Clock::System)
    }

    /// Opens the store and seeds the common items when none were ever saved.
    pub fn open_with_clock(conn: &'c Connection, clock: Clock) -> Result<Self> {
        let store = Self { conn, clock };
        store.seed_common_items()?;
        Ok(store)
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    pub fn current_month(&self) -> Month {
        Month::from_date(self.today())
    }

    fn seed_common_items(&self) -> Result<bool> {
        if kv::get_item(self.conn, COMMON_ITEMS_KEY)?.is_some() {
            return Ok(false);
        }
        let items: Vec<CommonItem> = DEFAULT_COMMON_ITEMS
            .iter()
            .map(|(name, price)| CommonItem {
                id: new_id(),
                name: name.to_string(),
                default_price: Decimal::from(*price),
            })
            .collect();
        self.write(COMMON_ITEMS_KEY, &items)?;
        info!(count = items.len(), "seeded default common items");
        Ok(true)
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = kv::get_item(self.conn, key)? else {
            debug!(key, "no stored value");
            return Ok(None);
        };
        let value = serde_json::from_str(&raw).map_err(|source| LedgerError::Corrupt {
            key: key.to_string(),
            source,
        })?;
        Ok(Some(value))
    }

    fn read_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        Ok(self.read(key)?.unwrap_or_default())
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        debug!(key, bytes = raw.len(), "writing collection");
        kv::set_item(self.conn, key, &raw)?;
        Ok(())
    }

    // Deposits

    pub fn deposits(&self) -> Result<Vec<Deposit>> {
        self.read_list(DEPOSITS_KEY)
    }

    pub fn add_deposit(&self, amount: Decimal, note: &str) -> Result<Deposit> {
        let amount = checked_amount(amount)?;
        let mut deposits = self.deposits()?;
        let deposit = Deposit {
            id: new_id(),
            amount,
            date: stamp(self.now()),
            note: note.to_string(),
        };
        deposits.push(deposit.clone());
        self.write(DEPOSITS_KEY, &deposits)?;
        info!(id = %deposit.id, %amount, "deposit added");
        Ok(deposit)
    }

    /// Returns `false` when no deposit has this id.
    pub fn update_deposit(&self, id: &str, update: DepositUpdate) -> Result<bool> {
        let mut deposits = self.deposits()?;
        let Some(deposit) = deposits.iter_mut().find(|d| d.id == id) else {
            warn!(id, "update for unknown deposit ignored");
            return Ok(false);
        };
        if let Some(amount) = update.amount {
            deposit.amount = checked_amount(amount)?;
        }
        if let Some(note) = update.note {
            deposit.note = note;
        }
        self.write(DEPOSITS_KEY, &deposits)?;
        info!(id, "deposit updated");
        Ok(true)
    }

    pub fn delete_deposit(&self, id: &str) -> Result<bool> {
        let deposits = self.deposits()?;
        let before = deposits.len();
        let kept: Vec<Deposit> = deposits.into_iter().filter(|d| d.id != id).collect();
        self.write(DEPOSITS_KEY, &kept)?;
        let removed = kept.len() != before;
        if removed {
            info!(id, "deposit deleted");
        } else {
            warn!(id, "delete for unknown deposit ignored");
        }
        Ok(removed)
    }

    // Purchases

    pub fn purchases(&self) -> Result<Vec<Purchase>> {
        self.read_list(PURCHASES_KEY)
    }

    pub fn today_purchases(&self) -> Result<Vec<Purchase>> {
        let today = self.today();
        Ok(analytics::in_day(&self.purchases()?, today)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Purchases of `month`, or of the current month when `None`.
    pub fn month_purchases(&self, month: Option<Month>) -> Result<Vec<Purchase>> {
        let month = month.unwrap_or_else(|| self.current_month());
        Ok(analytics::in_month(&self.purchases()?, month)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn add_purchase(
        &self,
        item_name: &str,
        price: Decimal,
        quantity: u32,
    ) -> Result<Purchase> {
        let mut purchases = self.purchases()?;
        let mut purchase = Purchase {
            id: new_id(),
            item_name: item_name.to_string(),
            price,
            quantity,
            total_price: Decimal::ZERO,
            date: stamp(self.now()),
        };
        purchase.recompute_total()?;
        purchases.push(purchase.clone());
        self.write(PURCHASES_KEY, &purchases)?;
        info!(id = %purchase.id, item = item_name, total = %purchase.total_price, "purchase added");
        Ok(purchase)
    }

    pub fn update_purchase(&self, id: &str, update: PurchaseUpdate) -> Result<bool> {
        let mut purchases = self.purchases()?;
        let Some(purchase) = purchases.iter_mut().find(|p| p.id == id) else {
            warn!(id, "update for unknown purchase ignored");
            return Ok(false);
        };
        if let Some(name) = update.item_name {
            purchase.item_name = name;
        }
        if let Some(price) = update.price {
            purchase.price = price;
        }
        if let Some(quantity) = update.quantity {
            purchase.quantity = quantity;
        }
        purchase.recompute_total()?;
        self.write(PURCHASES_KEY, &purchases)?;
        info!(id, "purchase updated");
        Ok(true)
    }

    pub fn delete_purchase(&self, id: &str) -> Result<bool> {
        let purchases = self.purchases()?;
        let before = purchases.len();
        let kept: Vec<Purchase> = purchases.into_iter().filter(|p| p.id != id).collect();
        self.write(PURCHASES_KEY, &kept)?;
        let removed = kept.len() != before;
        if removed {
            info!(id, "purchase deleted");
        } else {
            warn!(id, "delete for unknown purchase ignored");
        }
        Ok(removed)
    }

    // Common items

    /// Empty after `clear_all_data` until the store is opened again.
    pub fn common_items(&self) -> Result<Vec<CommonItem>> {
        self.read_list(COMMON_ITEMS_KEY)
    }

    pub fn add_common_item(&self, name: &str, default_price: Decimal) -> Result<CommonItem> {
        let default_price = checked_amount(default_price)?;
        let mut items = self.common_items()?;
        let item = CommonItem {
            id: new_id(),
            name: name.to_string(),
            default_price,
        };
        items.push(item.clone());
        self.write(COMMON_ITEMS_KEY, &items)?;
        info!(id = %item.id, name, "common item added");
        Ok(item)
    }

    pub fn update_common_item(&self, id: &str, update: CommonItemUpdate) -> Result<bool> {
        let mut items = self.common_items()?;
        let Some(item) = items.iter_mut().find(|i| i.id == id) else {
            warn!(id, "update for unknown common item ignored");
            return Ok(false);
        };
        if let Some(name) = update.name {
            item.name = name;
        }
        if let Some(price) = update.default_price {
            item.default_price = checked_amount(price)?;
        }
        self.write(COMMON_ITEMS_KEY, &items)?;
        info!(id, "common item updated");
        Ok(true)
    }

    pub fn delete_common_item(&self, id: &str) -> Result<bool> {
        let items = self.common_items()?;
        let before = items.len();
        let kept: Vec<CommonItem> = items.into_iter().filter(|i| i.id != id).collect();
        self.write(COMMON_ITEMS_KEY, &kept)?;
        let removed = kept.len() != before;
        if removed {
            info!(id, "common item deleted");
        } else {
            warn!(id, "delete for unknown common item ignored");
        }
        Ok(removed)
    }

    // Settings

    pub fn settings(&self) -> Result<AppSettings> {
        Ok(self.read(SETTINGS_KEY)?.unwrap_or_default())
    }

    pub fn save_settings(&self, settings: &AppSettings) -> Result<()> {
        checked_amount(settings.monthly_budget)?;
        self.write(SETTINGS_KEY, settings)?;
        info!(currency = %settings.currency, budget = %settings.monthly_budget, "settings saved");
        Ok(())
    }

    pub fn update_settings(&self, update: SettingsUpdate) -> Result<AppSettings> {
        let mut settings = self.settings()?;
        update.apply_to(&mut settings);
        self.save_settings(&settings)?;
        Ok(settings)
    }
}
