// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Datelike, FixedOffset, Months};
use serde::Serialize;
use tracing::{debug, info};

use super::{Store, DEPOSITS_KEY, LAST_CLEANUP_KEY, PURCHASES_KEY};
use crate::error::Result;
use crate::kv;
use crate::models::{Deposit, Purchase};

pub const RETENTION_MONTHS: u32 = 4;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleanupReport {
    /// False when the sweep already ran today.
    pub ran: bool,
    pub cutoff: Option<String>,
    pub deposits_removed: usize,
    pub purchases_removed: usize,
}

/// Midnight on the first day of the month `months` before the month of `now`,
/// in the offset of `now` and in record timestamp format.
pub fn retention_cutoff(now: DateTime<FixedOffset>, months: u32) -> String {
    let first = now.date_naive().with_day(1).unwrap_or(now.date_naive());
    let start = first.checked_sub_months(Months::new(months)).unwrap_or(first);
    format!("{}T00:00:00.000{}", start.format("%Y-%m-%d"), now.format("%:z"))
}

impl Store<'_> {
    /// Drops deposits and purchases older than the retention window, at most
    /// once per calendar day.
    pub fn cleanup_old_data(&self) -> Result<CleanupReport> {
        let now = self.now();
        let today = now.date_naive().format("%Y-%m-%d").to_string();
        if kv::get_item(self.conn, LAST_CLEANUP_KEY)?.as_deref() == Some(today.as_str()) {
            debug!(%today, "retention sweep already ran today");
            return Ok(CleanupReport::default());
        }

        let cutoff = retention_cutoff(now, RETENTION_MONTHS);
        let deposits: Vec<Deposit> = self.deposits()?;
        let purchases: Vec<Purchase> = self.purchases()?;
        let (deposit_count, purchase_count) = (deposits.len(), purchases.len());

        let kept_deposits: Vec<Deposit> = deposits
            .into_iter()
            .filter(|d| d.date.as_str() >= cutoff.as_str())
            .collect();
        let kept_purchases: Vec<Purchase> = purchases
            .into_iter()
            .filter(|p| p.date.as_str() >= cutoff.as_str())
            .collect();

        let report = CleanupReport {
            ran: true,
            cutoff: Some(cutoff.clone()),
            deposits_removed: deposit_count - kept_deposits.len(),
            purchases_removed: purchase_count - kept_purchases.len(),
        };

        let mut updates = vec![(LAST_CLEANUP_KEY, today)];
        if report.deposits_removed > 0 {
            updates.push((DEPOSITS_KEY, serde_json::to_string(&kept_deposits)?));
        }
        if report.purchases_removed > 0 {
            updates.push((PURCHASES_KEY, serde_json::to_string(&kept_purchases)?));
        }
        kv::multi_set(self.conn, &updates)?;

        info!(
            %cutoff,
            deposits_removed = report.deposits_removed,
            purchases_removed = report.purchases_removed,
            "retention sweep finished"
        );
        Ok(report)
    }
}
