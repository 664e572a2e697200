//! Company header shared by every firm

use super::{LineGrammar, field, time};
use crate::error::{ExtractError, Result};
use crate::types::CompanyContext;
use chrono::NaiveDate;
use regex::Regex;

// From: XXX At: 01/02/23 09:30:00 [zone]
static FROM_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(
        r"^From:\s*(?P<firm>\S.*?)\s+At:\s*(?P<date>\d{1,2}/\d{1,2}/(?:\d{4}|\d{2}))\s+(?P<time>\d{1,2}:\d{2}:\d{2})(?:\s|$)",
    )
    .unwrap()
});

/// Grammar used before any firm is known
#[derive(Debug, Clone, Copy, Default)]
pub struct Generic;

impl LineGrammar for Generic {
    fn firm(&self) -> Option<&'static str> {
        None
    }
}

pub(super) fn company_header(line: &str) -> Result<Option<CompanyContext>> {
    let Some(caps) = FROM_REGEX.captures(line) else {
        return Ok(None);
    };

    let raw_date = field(&caps, "date");
    let format = if raw_date.rsplit('/').next().is_some_and(|year| year.len() == 4) {
        "%m/%d/%Y"
    } else {
        "%m/%d/%y"
    };
    let date = NaiveDate::parse_from_str(raw_date, format).map_err(|_| {
        ExtractError::InvalidDate {
            value: raw_date.to_string(),
            format,
        }
    })?;

    Ok(Some(CompanyContext::new(
        field(&caps, "firm"),
        date,
        time(&caps, "time")?,
    )))
}
