//! Transaction-related types for the ledger
//!
//! This module defines the ledger's transaction entity together with the
//! construction-time invariants every stored transaction satisfies.

use super::error::ValidationError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Transaction identifier
///
/// Caller-supplied (parsed from the input file), never generated by the ledger.
pub type TransactionId = i32;

/// Category assigned when a transaction has none
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Largest accepted absolute amount (1,000,000)
pub const MAX_ABS_AMOUNT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Values that can be stored in a keyed repository
pub trait Keyed {
    /// Key type; unique within a repository
    type Key: Eq + std::hash::Hash + Copy + Send + Sync;

    /// The key identifying this value
    fn key(&self) -> Self::Key;
}

/// A single ledger entry
///
/// All fields are fixed at construction except `category`, which later
/// commands may change. Serialized field names match the export header
/// `Id,Timestamp,Payee,Amount,Currency,Category`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transaction {
    id: TransactionId,
    timestamp: NaiveDate,
    payee: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    amount: Decimal,
    currency: String,
    category: String,
}

impl Transaction {
    /// Create a validated transaction
    ///
    /// `payee` and `currency` are trimmed and must not be blank; `currency`
    /// is upper-cased. `amount` must lie within `±MAX_ABS_AMOUNT`. A blank or
    /// missing `category` falls back to [`DEFAULT_CATEGORY`].
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant as a [`ValidationError`].
    pub fn new(
        id: TransactionId,
        timestamp: NaiveDate,
        payee: &str,
        amount: Decimal,
        currency: &str,
        category: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let payee = payee.trim();
        if payee.is_empty() {
            return Err(ValidationError::EmptyPayee);
        }

        let currency = currency.trim();
        if currency.is_empty() {
            return Err(ValidationError::EmptyCurrency);
        }

        if amount.abs() > MAX_ABS_AMOUNT {
            return Err(ValidationError::amount_out_of_range(amount));
        }

        Ok(Transaction {
            id,
            timestamp,
            payee: payee.to_string(),
            amount,
            currency: currency.to_uppercase(),
            category: normalize_category(category),
        })
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn timestamp(&self) -> NaiveDate {
        self.timestamp
    }

    pub fn payee(&self) -> &str {
        &self.payee
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Replace the category; blank names reset it to the default
    pub fn set_category(&mut self, name: &str) {
        self.category = normalize_category(Some(name));
    }

    /// Positive amounts are income
    pub fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Negative amounts are expenses
    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }
}

impl Keyed for Transaction {
    type Key = TransactionId;

    fn key(&self) -> TransactionId {
        self.id
    }
}

fn normalize_category(category: Option<&str>) -> String {
    match category.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => DEFAULT_CATEGORY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn test_new_normalizes_fields() {
        let tx = Transaction::new(1, date(), "  Coffee Shop ", dec("-4.50"), " usd ", None).unwrap();

        assert_eq!(tx.id(), 1);
        assert_eq!(tx.timestamp(), date());
        assert_eq!(tx.payee(), "Coffee Shop");
        assert_eq!(tx.amount(), dec("-4.50"));
        assert_eq!(tx.currency(), "USD");
        assert_eq!(tx.category(), DEFAULT_CATEGORY);
        assert!(tx.is_expense());
        assert!(!tx.is_income());
    }

    #[rstest]
    #[case::missing(None, DEFAULT_CATEGORY)]
    #[case::empty(Some(""), DEFAULT_CATEGORY)]
    #[case::whitespace(Some("   "), DEFAULT_CATEGORY)]
    #[case::trimmed(Some("  Food "), "Food")]
    fn test_category_defaults(#[case] category: Option<&str>, #[case] expected: &str) {
        let tx = Transaction::new(1, date(), "Payee", dec("1"), "EUR", category).unwrap();
        assert_eq!(tx.category(), expected);
    }

    #[rstest]
    #[case::empty_payee("", "USD", "1", ValidationError::EmptyPayee)]
    #[case::blank_payee("   ", "USD", "1", ValidationError::EmptyPayee)]
    #[case::blank_currency("Shop", " ", "1", ValidationError::EmptyCurrency)]
    #[case::too_large("Shop", "USD", "1000000.0001", ValidationError::amount_out_of_range(dec("1000000.0001")))]
    #[case::too_small("Shop", "USD", "-1000001", ValidationError::amount_out_of_range(dec("-1000001")))]
    fn test_new_rejects_invalid(
        #[case] payee: &str,
        #[case] currency: &str,
        #[case] amount: &str,
        #[case] expected: ValidationError,
    ) {
        let result = Transaction::new(1, date(), payee, dec(amount), currency, None);
        assert_eq!(result, Err(expected));
    }

    #[rstest]
    #[case::upper("1000000")]
    #[case::lower("-1000000")]
    #[case::upper_with_scale("1000000.00")]
    #[case::zero("0")]
    fn test_amount_boundary_accepted(#[case] amount: &str) {
        assert!(Transaction::new(1, date(), "Shop", dec(amount), "USD", None).is_ok());
    }

    #[test]
    fn test_set_category() {
        let mut tx = Transaction::new(1, date(), "Shop", dec("10"), "USD", Some("Food")).unwrap();

        tx.set_category(" Groceries ");
        assert_eq!(tx.category(), "Groceries");

        tx.set_category("  ");
        assert_eq!(tx.category(), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_key_is_id() {
        let tx = Transaction::new(42, date(), "Shop", dec("10"), "USD", None).unwrap();
        assert_eq!(tx.key(), 42);
        assert!(tx.is_income());
    }
}
