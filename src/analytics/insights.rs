// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use super::{daily_series, in_month, total_deposited, total_spent, Month};
use crate::models::{Deposit, Purchase};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetRing {
    pub spent: Decimal,
    pub budget: Decimal,
    pub percent_used: Decimal,
    pub is_over: bool,
    /// Distance to the budget; read together with `is_over`.
    pub remaining: Decimal,
}

impl BudgetRing {
    pub fn status_label(&self) -> &'static str {
        if self.is_over { "over" } else { "left" }
    }
}

pub fn budget_ring(spent: Decimal, budget: Decimal) -> BudgetRing {
    let percent_used = if budget > Decimal::ZERO {
        spent
            .checked_div(budget)
            .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ONE_HUNDRED)
            .min(Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    };
    BudgetRing {
        spent,
        budget,
        percent_used,
        is_over: spent > budget,
        remaining: (budget - spent).abs(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemCount {
    pub name: String,
    pub quantity: u64,
}

/// Rough, heuristic figures for the insights card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub month: Month,
    pub active_days: usize,
    pub average_per_active_day: Option<Decimal>,
    pub most_frequent_item: Option<ItemCount>,
    pub distinct_items: usize,
    pub purchases_remaining: Option<u64>,
}

/// `purchases_remaining` divides the all-time balance by this month's spend
/// spread over the all-time purchase count, so it mixes two windows.
pub fn insights(purchases: &[Purchase], deposits: &[Deposit], month: Month) -> Insights {
    let month_purchases = in_month(purchases, month);
    let month_spent = total_spent(month_purchases.iter().copied());

    let active_days = month_purchases
        .iter()
        .filter_map(|p| p.date.get(..10))
        .collect::<HashSet<_>>()
        .len();
    let average_per_active_day = if active_days > 0 {
        month_spent.checked_div(Decimal::from(active_days as u64))
    } else {
        None
    };

    let mut order: Vec<ItemCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for p in &month_purchases {
        let slot = *index.entry(p.item_name.as_str()).or_insert_with(|| {
            order.push(ItemCount {
                name: p.item_name.clone(),
                quantity: 0,
            });
            order.len() - 1
        });
        order[slot].quantity += u64::from(p.quantity);
    }
    let distinct_items = order.len();
    let mut most_frequent_item: Option<ItemCount> = None;
    for item in order {
        if most_frequent_item
            .as_ref()
            .is_none_or(|best| item.quantity > best.quantity)
        {
            most_frequent_item = Some(item);
        }
    }

    let remaining_funds = total_deposited(deposits) - total_spent(purchases);
    let purchases_remaining = if purchases.is_empty() || month_spent <= Decimal::ZERO {
        None
    } else {
        month_spent
            .checked_div(Decimal::from(purchases.len() as u64))
            .filter(|per| !per.is_zero())
            .and_then(|per| remaining_funds.checked_div(per))
            .map(|n| n.floor())
            .filter(|n| *n > Decimal::ZERO)
            .and_then(|n| n.to_u64())
    };

    Insights {
        month,
        active_days,
        average_per_active_day,
        most_frequent_item,
        distinct_items,
        purchases_remaining,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    pub month: Month,
    pub total: Decimal,
    /// Spread over every calendar day of the month.
    pub average_per_day: Decimal,
    pub purchase_count: usize,
    pub highest_bucket: Decimal,
}

pub fn month_summary(purchases: &[Purchase], month: Month) -> MonthSummary {
    let month_purchases = in_month(purchases, month);
    let total = total_spent(month_purchases.iter().copied());
    let average_per_day = if month_purchases.is_empty() {
        Decimal::ZERO
    } else {
        total
            .checked_div(Decimal::from(month.days()))
            .unwrap_or(Decimal::ZERO)
    };
    let highest_bucket = daily_series(month_purchases.iter().copied(), month)
        .into_iter()
        .map(|b| b.total)
        .max()
        .unwrap_or(Decimal::ZERO);
    MonthSummary {
        month,
        total,
        average_per_day,
        purchase_count: month_purchases.len(),
        highest_bucket,
    }
}
