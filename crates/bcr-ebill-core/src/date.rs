use std::{cmp::Ordering, fmt::Display, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ValidationError;

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar date in the `YYYY-MM-DD` format the ledger uses for issue, maturity and birth dates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(try_from = "String")]
pub struct Date(String);

impl Date {
    pub fn new(n: impl Into<String>) -> Result<Self, ValidationError> {
        let s = n.into();
        let trimmed = s.trim();
        let date = NaiveDate::parse_from_str(trimmed, DEFAULT_DATE_FORMAT)
            .map_err(|_| ValidationError::InvalidDate)?;

        // the parser accepts unpadded months and days, we always store the padded form
        Ok(Self(date.format(DEFAULT_DATE_FORMAT).to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_naive(&self) -> NaiveDate {
        NaiveDate::parse_from_str(&self.0, DEFAULT_DATE_FORMAT).expect("has the right format")
    }
}

impl PartialOrd for Date {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Date {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_naive().cmp(&other.to_naive())
    }
}

impl TryFrom<String> for Date {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Date::new(value)
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Date {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::new(s)
    }
}
