// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use super::{stamp_date, Month};
use crate::models::Purchase;

pub const TREND_MONTHS: usize = 6;

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBucket {
    pub start_day: u32,
    pub end_day: u32,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemTotal {
    pub name: String,
    pub count: u64,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayTotal {
    pub weekday: u32, // 0 = Sunday
    pub label: &'static str,
    pub count: usize,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotal {
    pub month: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendChange {
    pub difference: Decimal,
    /// Absent when the earlier month had no spending.
    pub percent: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrend {
    pub months: Vec<MonthTotal>,
    pub change: Option<TrendChange>,
}

/// Spending per day of `month`. Months longer than 15 days are folded into
/// buckets of three days; the last bucket may be shorter.
pub fn daily_series<'a>(
    purchases: impl IntoIterator<Item = &'a Purchase>,
    month: Month,
) -> Vec<DayBucket> {
    let days = month.days();
    let per_day = day_totals(purchases, month);
    let step = if days > 15 { 3 } else { 1 };
    (1..=days)
        .step_by(step)
        .map(|start| {
            let end = (start + step as u32 - 1).min(days);
            DayBucket {
                start_day: start,
                end_day: end,
                total: per_day[start as usize..=end as usize].iter().sum(),
            }
        })
        .collect()
}

/// Index `d` holds the spending on day `d` of `month`; index 0 is unused.
fn day_totals<'a>(
    purchases: impl IntoIterator<Item = &'a Purchase>,
    month: Month,
) -> Vec<Decimal> {
    let prefix = month.key();
    let mut per_day = vec![Decimal::ZERO; month.days() as usize + 1];
    for p in purchases {
        if !p.date.starts_with(&prefix) {
            continue;
        }
        if let Some(date) = stamp_date(&p.date) {
            per_day[date.day() as usize] += p.total_price;
        }
    }
    per_day
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay {
    pub day: u32,
    /// 0 is Sunday.
    pub weekday: u32,
    pub total: Decimal,
    /// Share of the busiest day, between 0 and 1.
    pub intensity: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthCalendar {
    pub month: Month,
    /// Weekday of the 1st, 0 is Sunday. Also the number of blank cells
    /// leading a Sunday-first grid.
    pub first_weekday: u32,
    pub days: Vec<CalendarDay>,
}

/// Per-day spending for every day of `month`, unbucketed. A day with any
/// spending gets an intensity of at least 0.15; the divisor never drops
/// below 1.
pub fn calendar<'a>(
    purchases: impl IntoIterator<Item = &'a Purchase>,
    month: Month,
) -> MonthCalendar {
    let per_day = day_totals(purchases, month);
    let max_daily = per_day
        .iter()
        .copied()
        .max()
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ONE);
    let floor = Decimal::new(15, 2);
    let first_weekday = month.first_day().weekday().num_days_from_sunday();

    let days = (1..=month.days())
        .map(|day| {
            let total = per_day[day as usize];
            let intensity = if total > Decimal::ZERO {
                (total / max_daily).min(Decimal::ONE).max(floor)
            } else {
                Decimal::ZERO
            };
            CalendarDay {
                day,
                weekday: (first_weekday + day - 1) % 7,
                total,
                intensity,
            }
        })
        .collect();

    MonthCalendar {
        month,
        first_weekday,
        days,
    }
}

/// Items ranked by amount spent. Equal totals keep first-seen order.
pub fn top_items<'a>(
    purchases: impl IntoIterator<Item = &'a Purchase>,
    limit: usize,
) -> Vec<ItemTotal> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut items: Vec<ItemTotal> = Vec::new();
    for p in purchases {
        let slot = *index.entry(p.item_name.as_str()).or_insert_with(|| {
            items.push(ItemTotal {
                name: p.item_name.clone(),
                count: 0,
                total: Decimal::ZERO,
            });
            items.len() - 1
        });
        items[slot].count += u64::from(p.quantity);
        items[slot].total += p.total_price;
    }
    items.sort_by(|a, b| b.total.cmp(&a.total));
    items.truncate(limit);
    items
}

pub fn weekday_breakdown<'a>(
    purchases: impl IntoIterator<Item = &'a Purchase>,
) -> [WeekdayTotal; 7] {
    let mut days: [WeekdayTotal; 7] = std::array::from_fn(|i| WeekdayTotal {
        weekday: i as u32,
        label: WEEKDAY_LABELS[i],
        count: 0,
        total: Decimal::ZERO,
    });
    for p in purchases {
        if let Some(date) = stamp_date(&p.date) {
            let slot = &mut days[date.weekday().num_days_from_sunday() as usize];
            slot.count += 1;
            slot.total += p.total_price;
        }
    }
    days
}

/// Weekday with the highest total; the earlier day wins a tie.
pub fn busiest_day(days: &[WeekdayTotal]) -> Option<&WeekdayTotal> {
    let mut best: Option<&WeekdayTotal> = None;
    for day in days.iter().filter(|d| d.total > Decimal::ZERO) {
        if best.is_none_or(|b| day.total > b.total) {
            best = Some(day);
        }
    }
    best
}

/// Totals of the last six months that have purchases, oldest first.
pub fn monthly_trend<'a>(purchases: impl IntoIterator<Item = &'a Purchase>) -> MonthlyTrend {
    let mut by_month: BTreeMap<&str, Decimal> = BTreeMap::new();
    for p in purchases {
        if let Some(key) = p.date.get(..7) {
            *by_month.entry(key).or_insert(Decimal::ZERO) += p.total_price;
        }
    }
    let skip = by_month.len().saturating_sub(TREND_MONTHS);
    let months: Vec<MonthTotal> = by_month
        .into_iter()
        .skip(skip)
        .map(|(month, total)| MonthTotal {
            month: month.to_string(),
            total,
        })
        .collect();

    let change = match months.as_slice() {
        [.., prev, last] => {
            let difference = last.total - prev.total;
            let percent = if prev.total.is_zero() {
                None
            } else {
                difference
                    .checked_div(prev.total)
                    .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
            };
            Some(TrendChange { difference, percent })
        }
        _ => None,
    };
    MonthlyTrend { months, change }
}
