//! Plain-text rendering of transactions and reports

use crate::app::report::{MonthlyStats, YearlyStats};
use crate::core::parser::DATE_FORMAT;
use crate::types::Transaction;
use rust_decimal::{Decimal, RoundingStrategy};
use std::io::{self, Write};

const PAYEE_WIDTH: usize = 20;
const CATEGORY_WIDTH: usize = 16;
const AMOUNT_WIDTH: usize = 15;
const ELLIPSIS: char = '…';

/// Format an amount as `-1,234.50 USD`
///
/// Rounds to two decimals with midpoints away from zero and groups the
/// integer part in thousands.
pub fn format_money(amount: Decimal, currency: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let digits = format!("{:.2}", rounded.abs());
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!("{}{}.{} {}", sign, grouped, fraction, currency.to_uppercase())
}

/// Cut `value` to `max` characters, marking the cut with an ellipsis
pub fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let mut cut: String = value.chars().take(max.saturating_sub(1)).collect();
    cut.push(ELLIPSIS);
    cut
}

/// Write a table of transactions ordered by date, then id
pub fn print_transactions(out: &mut dyn Write, transactions: &[Transaction]) -> io::Result<()> {
    if transactions.is_empty() {
        return writeln!(out, "No transactions found.");
    }

    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by_key(|t| (t.timestamp(), t.id()));

    writeln!(
        out,
        "{:<4} {:<10} {:<payee$} {:<amount$} {}",
        "Id",
        "Date",
        "Payee",
        "Amount",
        "Category",
        payee = PAYEE_WIDTH,
        amount = AMOUNT_WIDTH
    )?;
    writeln!(
        out,
        "{} {} {} {} {}",
        "-".repeat(4),
        "-".repeat(10),
        "-".repeat(PAYEE_WIDTH),
        "-".repeat(AMOUNT_WIDTH),
        "-".repeat(CATEGORY_WIDTH)
    )?;

    for t in sorted {
        writeln!(
            out,
            "{:>4} {:<10} {:<payee$} {:>amount$} {}",
            t.id(),
            t.timestamp().format(DATE_FORMAT).to_string(),
            truncate(t.payee(), PAYEE_WIDTH),
            format_money(t.amount(), t.currency()),
            truncate(t.category(), CATEGORY_WIDTH),
            payee = PAYEE_WIDTH,
            amount = AMOUNT_WIDTH
        )?;
    }
    Ok(())
}

pub fn print_monthly_stats(out: &mut dyn Write, stats: &MonthlyStats) -> io::Result<()> {
    let money = |amount| format_money(amount, &stats.currency);

    writeln!(out, "Stats for month {}:", stats.month)?;
    writeln!(out, "  Income total : {}", money(stats.totals.income))?;
    writeln!(out, "  Expense total: {}", money(stats.totals.expense))?;
    writeln!(out, "  Net          : {}", money(stats.totals.net()))?;
    writeln!(out, "  Avg size (|amount|): {}", money(stats.average_abs))?;
    writeln!(out)?;

    writeln!(out, "Top 3 expense categories (by absolute total):")?;
    if stats.top_expense_categories.is_empty() {
        writeln!(out, "  (no expenses)")?;
    }
    for (category, total) in &stats.top_expense_categories {
        writeln!(out, "  {:<20} {}", category, money(*total))?;
    }
    writeln!(out)
}

pub fn print_yearly_stats(out: &mut dyn Write, stats: &YearlyStats) -> io::Result<()> {
    let money = |amount| format_money(amount, &stats.currency);

    writeln!(out, "Yearly stats for {}:", stats.year)?;
    writeln!(out, "Month    Income            Expense           Net")?;
    writeln!(out, "-------  ----------------  ----------------  ----------------")?;
    for (month, totals) in &stats.months {
        writeln!(
            out,
            "{:<7}  {:>16}  {:>16}  {:>16}",
            month.to_string(),
            money(totals.income),
            money(totals.expense),
            money(totals.net())
        )?;
    }
    writeln!(out)
}
