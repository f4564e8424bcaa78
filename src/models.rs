// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

/// Largest magnitude accepted for a single money value. Keeps products and
/// sums far below the `Decimal` ceiling.
pub const AMOUNT_LIMIT: i64 = 1_000_000_000_000;

pub fn checked_amount(amount: Decimal) -> Result<Decimal> {
    if amount.abs() > Decimal::from(AMOUNT_LIMIT) {
        return Err(LedgerError::AmountOutOfRange(amount));
    }
    Ok(amount)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    pub id: String,
    pub amount: Decimal,
    pub date: String, // RFC 3339, local wall clock
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: String,
    pub item_name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub total_price: Decimal, // always price * quantity
    pub date: String,
}

impl Purchase {
    pub fn recompute_total(&mut self) -> Result<()> {
        let price = checked_amount(self.price)?;
        self.total_price = price
            .checked_mul(Decimal::from(self.quantity))
            .ok_or(LedgerError::AmountOutOfRange(price))?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonItem {
    pub id: String,
    pub name: String,
    pub default_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// `None` follows the system theme.
    pub dark_mode: Option<bool>,
    pub currency: String,
    pub monthly_budget: Decimal,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            dark_mode: None,
            currency: "\u{20B9}".to_string(),
            monthly_budget: Decimal::from(5000),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DepositUpdate {
    pub amount: Option<Decimal>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PurchaseUpdate {
    pub item_name: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct CommonItemUpdate {
    pub name: Option<String>,
    pub default_price: Option<Decimal>,
}

#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub dark_mode: Option<Option<bool>>,
    pub currency: Option<String>,
    pub monthly_budget: Option<Decimal>,
}

impl SettingsUpdate {
    pub fn apply_to(self, settings: &mut AppSettings) {
        if let Some(dark_mode) = self.dark_mode {
            settings.dark_mode = dark_mode;
        }
        if let Some(currency) = self.currency {
            settings.currency = currency;
        }
        if let Some(budget) = self.monthly_budget {
            settings.monthly_budget = budget;
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub deposits: Vec<Deposit>,
    pub purchases: Vec<Purchase>,
    pub common_items: Vec<CommonItem>,
    pub settings: AppSettings,
    pub export_date: String,
}
