//! Queries and statistics over a store snapshot
//!
//! Everything here is a pure function of a `&[Transaction]` taken with
//! `Repository::all`, so reports never hold store locks while they compute.

use crate::types::{LedgerError, Transaction};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Number of categories listed in a monthly report
pub const TOP_CATEGORIES: usize = 3;

/// A calendar month, written `yyyy-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Returns `None` unless `month` is within 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }
}

impl FromStr for MonthKey {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LedgerError::ParseError {
            line: None,
            message: format!("invalid month '{}', expected yyyy-MM", s),
        };

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }

        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        MonthKey::new(year, month).ok_or_else(invalid)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

pub fn in_month(transactions: &[Transaction], month: MonthKey) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| month.contains(t.timestamp()))
        .cloned()
        .collect()
}

/// Transactions whose category contains `name`, ignoring case
pub fn by_category(transactions: &[Transaction], name: &str) -> Vec<Transaction> {
    let needle = name.to_lowercase();
    transactions
        .iter()
        .filter(|t| t.category().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Transactions with `amount >= threshold`
pub fn over_amount(transactions: &[Transaction], threshold: Decimal) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| t.amount() >= threshold)
        .cloned()
        .collect()
}

/// Transactions whose payee or category contains `text`, ignoring case
pub fn search(transactions: &[Transaction], text: &str) -> Vec<Transaction> {
    let needle = text.to_lowercase();
    transactions
        .iter()
        .filter(|t| {
            t.payee().to_lowercase().contains(&needle)
                || t.category().to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Income, expense and net for one group of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    /// Sum of positive amounts
    pub income: Decimal,
    /// Sum of negative amounts (not negated)
    pub expense: Decimal,
}

impl Totals {
    fn add(&mut self, transaction: &Transaction) {
        if transaction.is_income() {
            self.income += transaction.amount();
        } else if transaction.is_expense() {
            self.expense += transaction.amount();
        }
    }

    pub fn net(&self) -> Decimal {
        self.income + self.expense
    }
}

/// Summary of one month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyStats {
    pub month: MonthKey,
    /// Currency of the earliest transaction in the month
    pub currency: String,
    pub totals: Totals,
    /// Mean of `|amount|` over every transaction in the month
    pub average_abs: Decimal,
    /// Largest expense categories by absolute total, ties broken by name
    pub top_expense_categories: Vec<(String, Decimal)>,
}

impl MonthlyStats {
    /// Returns `None` when no transaction falls in `month`
    pub fn compute(transactions: &[Transaction], month: MonthKey) -> Option<Self> {
        let monthly = in_month(transactions, month);
        let currency = earliest(&monthly)?.currency().to_string();

        let mut totals = Totals::default();
        let mut abs_sum = Decimal::ZERO;
        let mut expense_by_category: BTreeMap<&str, Decimal> = BTreeMap::new();

        for transaction in &monthly {
            totals.add(transaction);
            abs_sum += transaction.amount().abs();
            if transaction.is_expense() {
                *expense_by_category
                    .entry(transaction.category())
                    .or_default() += transaction.amount().abs();
            }
        }

        // BTreeMap iteration is by name, and the sort is stable
        let mut ranked: Vec<(String, Decimal)> = expense_by_category
            .into_iter()
            .map(|(name, total)| (name.to_string(), total))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(TOP_CATEGORIES);

        Some(Self {
            month,
            currency,
            totals,
            average_abs: abs_sum / Decimal::from(monthly.len()),
            top_expense_categories: ranked,
        })
    }
}

/// Per-month totals for one year
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyStats {
    pub year: i32,
    /// Currency of the earliest transaction in the year
    pub currency: String,
    /// One row per month that has transactions, in calendar order
    pub months: Vec<(MonthKey, Totals)>,
}

impl YearlyStats {
    /// Returns `None` when no transaction falls in `year`
    pub fn compute(transactions: &[Transaction], year: i32) -> Option<Self> {
        let yearly: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| t.timestamp().year() == year)
            .collect();

        let currency = yearly
            .iter()
            .min_by_key(|t| (t.timestamp(), t.id()))?
            .currency()
            .to_string();

        let mut months: BTreeMap<MonthKey, Totals> = BTreeMap::new();
        for transaction in yearly {
            months
                .entry(MonthKey::of(transaction.timestamp()))
                .or_default()
                .add(transaction);
        }

        Some(Self {
            year,
            currency,
            months: months.into_iter().collect(),
        })
    }
}

fn earliest(transactions: &[Transaction]) -> Option<&Transaction> {
    transactions.iter().min_by_key(|t| (t.timestamp(), t.id()))
}
