//! Shared query infrastructure: the [`Query`] trait, [`QueryParams`], and [`DateInput`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use url::Url;

use crate::Error;

/// Flat query-string mapping sent with a fetch. Keys are the API's filter names.
pub type QueryParams = BTreeMap<&'static str, String>;

/// Trait implemented by everything that can be rendered as API filter parameters.
pub trait Query {
    /// Encodes the filters into a flat key/value mapping. Absent filters produce no key.
    fn to_params(&self) -> QueryParams;

    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        for (key, value) in self.to_params() {
            url.query_pairs_mut().append_pair(key, &value);
        }
        url
    }
}

impl Query for QueryParams {
    fn to_params(&self) -> QueryParams {
        self.clone()
    }
}

/// A date filter as supplied by the caller: either already a calendar date or
/// an ISO `YYYY-MM-DD` string still to be parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DateInput {
    Date(NaiveDate),
    Iso(String),
}

impl DateInput {
    /// Resolves the input to a calendar date.
    pub fn resolve(self) -> Result<NaiveDate, Error> {
        match self {
            DateInput::Date(date) => Ok(date),
            DateInput::Iso(text) => {
                let trimmed = text.trim();
                // chrono accepts unpadded fields; ISO dates are always ten characters.
                if trimmed.len() != 10 {
                    return Err(invalid_date(trimmed));
                }
                NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| invalid_date(trimmed))
            }
        }
    }
}

fn invalid_date(text: &str) -> Error {
    Error::InvalidArgument(format!(
        "invalid date '{}'. Expected format: YYYY-MM-DD (e.g., 2023-10-01)",
        text
    ))
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        DateInput::Iso(text.to_string())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        DateInput::Iso(text)
    }
}

impl From<&String> for DateInput {
    fn from(text: &String) -> Self {
        DateInput::Iso(text.clone())
    }
}
