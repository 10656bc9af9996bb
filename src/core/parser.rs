//! Record parsing
//!
//! Turns the fields of one delimited line into a validated [`Transaction`].
//! Failures are returned as [`LedgerError`] values naming the line, the field,
//! and the raw value; parsing has no side effects.

use crate::types::{LedgerError, Transaction, TransactionId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Minimum number of fields: id, date, payee, amount, currency
pub const MIN_FIELDS: usize = 5;

/// Date layout of the `date` column (`yyyy-MM-dd`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse one record's fields into a transaction
///
/// Fields are trimmed, then parsed in column order; the first failing field
/// short-circuits. The optional sixth field is the category.
///
/// # Arguments
///
/// * `fields` - Raw field values split from one line
/// * `line` - Physical line number, used in error messages
///
/// # Errors
///
/// - [`LedgerError::MissingFields`] when fewer than five fields are present
/// - [`LedgerError::InvalidField`] when the id, date or amount does not parse
/// - [`LedgerError::InvalidRecord`] when the transaction invariants are violated
pub fn parse_record<S: AsRef<str>>(fields: &[S], line: u64) -> Result<Transaction, LedgerError> {
    if fields.len() < MIN_FIELDS {
        return Err(LedgerError::MissingFields {
            line,
            expected: MIN_FIELDS,
            found: fields.len(),
        });
    }

    let parts: Vec<&str> = fields.iter().map(|field| field.as_ref().trim()).collect();

    let id = TransactionId::from_str(parts[0])
        .map_err(|_| LedgerError::invalid_field(line, "Id", parts[0]))?;

    let timestamp = parse_date(parts[1])
        .ok_or_else(|| LedgerError::invalid_field(line, "Date", parts[1]))?;

    let payee = parts[2];

    let amount = parse_amount(parts[3])
        .ok_or_else(|| LedgerError::invalid_field(line, "Amount", parts[3]))?;

    let currency = parts[4];
    let category = parts.get(5).copied();

    Transaction::new(id, timestamp, payee, amount, currency, category)
        .map_err(|source| LedgerError::invalid_record(line, source))
}

// chrono accepts unpadded month and day for `%m`/`%d`; the layout is fixed
// at `dddd-dd-dd`.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

// Plain `[+-]digits[.digits]`; `Decimal::from_str` alone would also take
// exponents and `_` separators.
fn parse_amount(value: &str) -> Option<Decimal> {
    let unsigned = value.strip_prefix(|c| c == '+' || c == '-').unwrap_or(value);
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(integer) || !fraction.map_or(true, all_digits) {
        return None;
    }
    Decimal::from_str(value).ok()
}
