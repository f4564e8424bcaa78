// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{self, BudgetRing, Month, MonthCalendar};
use crate::store::Store;
use crate::utils::{fmt_percent, format_currency, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("daily", sub)) => daily(store, sub)?,
        Some(("top", sub)) => top(store, sub)?,
        Some(("weekday", sub)) => weekday(store, sub)?,
        Some(("trend", sub)) => trend(store, sub)?,
        Some(("insights", sub)) => insights(store, sub)?,
        Some(("month", sub)) => month(store, sub)?,
        Some(("calendar", sub)) => calendar(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn round_whole(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

fn month_or_current(store: &Store, sub: &clap::ArgMatches) -> Result<Month> {
    match sub.get_one::<String>("month") {
        Some(s) => parse_month(s),
        None => Ok(store.current_month()),
    }
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub currency: String,
    pub balance: Decimal,
    pub total_deposited: Decimal,
    pub total_spent: Decimal,
    pub today_total: Decimal,
    pub month: Month,
    pub month_total: Decimal,
    pub budget: BudgetRing,
}

pub fn compute_summary(store: &Store) -> Result<Summary> {
    let deposits = store.deposits()?;
    let purchases = store.purchases()?;
    let settings = store.settings()?;
    let month = store.current_month();
    let month_total = analytics::month_total(&purchases, month);
    Ok(Summary {
        currency: settings.currency,
        balance: analytics::balance(&deposits, &purchases),
        total_deposited: analytics::total_deposited(&deposits),
        total_spent: analytics::total_spent(&purchases),
        today_total: analytics::today_total(&purchases, store.today()),
        month,
        month_total,
        budget: analytics::budget_ring(month_total, settings.monthly_budget),
    })
}

pub fn summary(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let s = compute_summary(store)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let c = s.currency.as_str();
    let rows = vec![
        vec!["Balance".to_string(), format_currency(s.balance, c)],
        vec!["Total deposited".to_string(), format_currency(s.total_deposited, c)],
        vec!["Total spent".to_string(), format_currency(s.total_spent, c)],
        vec!["Today".to_string(), format_currency(s.today_total, c)],
        vec![format!("This month ({})", s.month), format_currency(s.month_total, c)],
        vec![
            "Budget".to_string(),
            format!(
                "{} used, {} {}",
                fmt_percent(s.budget.percent_used),
                format_currency(s.budget.remaining, c),
                s.budget.status_label()
            ),
        ],
    ];
    println!("{}", pretty_table(&["", "Amount"], rows));
    Ok(())
}

fn daily(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(store, sub)?;
    let purchases = store.purchases()?;
    let data = analytics::daily_series(&purchases, month);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = store.settings()?.currency;
        let rows = data
            .iter()
            .map(|b| {
                let days = if b.start_day == b.end_day {
                    b.start_day.to_string()
                } else {
                    format!("{}-{}", b.start_day, b.end_day)
                };
                vec![days, format_currency(b.total, &ccy)]
            })
            .collect();
        println!("{}", pretty_table(&["Day", "Spent"], rows));
    }
    Ok(())
}

fn top(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(store, sub)?;
    let limit = *sub.get_one::<usize>("limit").unwrap_or(&5);
    let purchases = store.purchases()?;
    let data = analytics::top_items(analytics::in_month(&purchases, month), limit);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = store.settings()?.currency;
        let rows = data
            .iter()
            .enumerate()
            .map(|(i, item)| {
                vec![
                    (i + 1).to_string(),
                    item.name.clone(),
                    format!("{}x", item.count),
                    format_currency(item.total, &ccy),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["#", "Item", "Bought", "Spent"], rows));
    }
    Ok(())
}

fn weekday(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(store, sub)?;
    let purchases = store.purchases()?;
    let days = analytics::weekday_breakdown(analytics::in_month(&purchases, month));
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &days)? {
        return Ok(());
    }
    let ccy = store.settings()?.currency;
    let rows = days
        .iter()
        .map(|d| {
            vec![
                d.label.to_string(),
                d.count.to_string(),
                format_currency(d.total, &ccy),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Day", "Purchases", "Spent"], rows));
    match analytics::busiest_day(&days) {
        Some(d) => println!("Busiest day: {}", d.label),
        None => println!("No spending in {}", month),
    }
    Ok(())
}

fn trend(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let purchases = store.purchases()?;
    let trend = analytics::monthly_trend(&purchases);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &trend)? {
        return Ok(());
    }
    let ccy = store.settings()?.currency;
    let rows = trend
        .months
        .iter()
        .map(|m| vec![m.month.clone(), format_currency(m.total, &ccy)])
        .collect();
    println!("{}", pretty_table(&["Month", "Spent"], rows));
    if let Some(change) = &trend.change {
        let pct = change
            .percent
            .map(|p| format!(" ({})", fmt_percent(p)))
            .unwrap_or_default();
        println!(
            "Change vs previous month: {}{}",
            format_currency(change.difference, &ccy),
            pct
        );
    }
    Ok(())
}

fn insights(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(store, sub)?;
    let data = analytics::insights(&store.purchases()?, &store.deposits()?, month);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let ccy = store.settings()?.currency;
    let mut rows = vec![
        vec!["Active days".to_string(), data.active_days.to_string()],
        vec!["Distinct items".to_string(), data.distinct_items.to_string()],
    ];
    if let Some(avg) = data.average_per_active_day {
        rows.push(vec!["Avg per active day".to_string(), format_currency(round_whole(avg), &ccy)]);
    }
    if let Some(item) = &data.most_frequent_item {
        rows.push(vec![
            "Most bought".to_string(),
            format!("{} ({}x)", item.name, item.quantity),
        ]);
    }
    if let Some(n) = data.purchases_remaining {
        rows.push(vec!["Purchases left at this rate".to_string(), format!("~{}", n)]);
    }
    println!("{}", pretty_table(&["Insight", "Value"], rows));
    Ok(())
}

fn month(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(store, sub)?;
    let data = analytics::month_summary(&store.purchases()?, month);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let ccy = store.settings()?.currency;
    let rows = vec![
        vec!["Total spent".to_string(), format_currency(data.total, &ccy)],
        vec!["Avg/day".to_string(), format_currency(round_whole(data.average_per_day), &ccy)],
        vec!["Purchases".to_string(), data.purchase_count.to_string()],
        vec!["Highest day".to_string(), format_currency(data.highest_bucket, &ccy)],
    ];
    let title = month.to_string();
    println!("{}", pretty_table(&[title.as_str(), ""], rows));
    Ok(())
}

/// Sunday-first grid rows. Each cell is the day number, followed by the
/// amount on a second line when anything was spent; cells before the 1st
/// and after the last day are blank.
pub fn calendar_rows(cal: &MonthCalendar, currency: &str) -> Vec<Vec<String>> {
    let mut cells = vec![String::new(); cal.first_weekday as usize];
    for d in &cal.days {
        if d.total > Decimal::ZERO {
            cells.push(format!("{}\n{}", d.day, format_currency(d.total, currency)));
        } else {
            cells.push(d.day.to_string());
        }
    }
    while cells.len() % 7 != 0 {
        cells.push(String::new());
    }
    cells.chunks(7).map(|week| week.to_vec()).collect()
}

fn calendar(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(store, sub)?;
    let data = analytics::calendar(&store.purchases()?, month);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let ccy = store.settings()?.currency;
    println!("{}", month);
    println!(
        "{}",
        pretty_table(&["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"], calendar_rows(&data, &ccy))
    );
    Ok(())
}
