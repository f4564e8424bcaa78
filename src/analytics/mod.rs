// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived values over collections already loaded from the store.
//!
//! Nothing here touches storage. Window membership is a prefix match on the
//! record's timestamp string (`YYYY-MM-DD` for a day, `YYYY-MM` for a month),
//! which holds because every stored timestamp starts with its local date.

mod breakdown;
mod insights;

pub use breakdown::{
    busiest_day, calendar, daily_series, monthly_trend, top_items, weekday_breakdown, CalendarDay,
    DayBucket, ItemTotal, MonthCalendar, MonthTotal, MonthlyTrend, TrendChange, WeekdayTotal,
    TREND_MONTHS,
};
pub use insights::{
    budget_ring, insights, month_summary, BudgetRing, Insights, ItemCount, MonthSummary,
};

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;
use crate::models::{Deposit, Purchase};

/// A calendar month, displayed and matched as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(NaiveDate);

impl Month {
    pub fn from_date(date: NaiveDate) -> Self {
        Month(date.with_day(1).unwrap_or(date))
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn days(&self) -> u32 {
        match self.0.checked_add_months(Months::new(1)) {
            Some(next) => (next - self.0).num_days() as u32,
            None => 31,
        }
    }

    pub fn key(&self) -> String {
        self.0.format("%Y-%m").to_string()
    }

    pub fn previous(&self) -> Month {
        Month(self.0.checked_sub_months(Months::new(1)).unwrap_or(self.0))
    }

    pub fn next(&self) -> Month {
        Month(self.0.checked_add_months(Months::new(1)).unwrap_or(self.0))
    }
}

impl FromStr for Month {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 7 || s.as_bytes()[4] != b'-' {
            return Err(LedgerError::InvalidMonth(s.to_string()));
        }
        NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
            .map(Month)
            .map_err(|_| LedgerError::InvalidMonth(s.to_string()))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}

impl Serialize for Month {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Calendar date at the start of a record timestamp.
pub(crate) fn stamp_date(stamp: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(stamp.get(..10)?, "%Y-%m-%d").ok()
}

pub fn in_day(purchases: &[Purchase], day: NaiveDate) -> Vec<&Purchase> {
    let prefix = day_key(day);
    purchases
        .iter()
        .filter(|p| p.date.starts_with(&prefix))
        .collect()
}

pub fn in_month(purchases: &[Purchase], month: Month) -> Vec<&Purchase> {
    let prefix = month.key();
    purchases
        .iter()
        .filter(|p| p.date.starts_with(&prefix))
        .collect()
}

pub fn total_deposited(deposits: &[Deposit]) -> Decimal {
    deposits.iter().map(|d| d.amount).sum()
}

pub fn total_spent<'a>(purchases: impl IntoIterator<Item = &'a Purchase>) -> Decimal {
    purchases.into_iter().map(|p| p.total_price).sum()
}

/// May be negative.
pub fn balance(deposits: &[Deposit], purchases: &[Purchase]) -> Decimal {
    total_deposited(deposits) - total_spent(purchases)
}

pub fn today_total(purchases: &[Purchase], today: NaiveDate) -> Decimal {
    total_spent(in_day(purchases, today))
}

pub fn month_total(purchases: &[Purchase], month: Month) -> Decimal {
    total_spent(in_month(purchases, month))
}
