//! Calendar-month matching for `dateOfSale`.
//!
//! Month names are the English long names, taken from the UTC calendar
//! date. Comparison against a requested month is exact and case-sensitive.

use chrono::{DateTime, Datelike, Month, Utc};

use crate::model::Transaction;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn month_of(ts: &DateTime<Utc>) -> &'static str {
    MONTH_NAMES[ts.month0() as usize]
}

pub fn matches_month(record: &Transaction, month: &str) -> bool {
    month_of(&record.date_of_sale) == month
}

/// Resolves an exact English month name. Returns `None` for anything the
/// month filter can never match.
pub fn parse_month_name(name: &str) -> Option<Month> {
    MONTH_NAMES
        .iter()
        .position(|candidate| *candidate == name)
        .and_then(|index| Month::try_from(index as u8 + 1).ok())
}

pub fn filter_by_month(records: Vec<Transaction>, month: &str) -> Vec<Transaction> {
    records
        .into_iter()
        .filter(|record| matches_month(record, month))
        .collect()
}
