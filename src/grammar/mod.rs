//! Per-firm line grammars
//!
//! Every sending firm lays out its company header, subject line, contract
//! header and quote rows differently. Each firm gets its own module holding
//! its regex table and the mapping from named captures to quote fields.
//! [`Grammar`] selects one of them from the firm identifier of the current
//! company header.
//!
//! A line that does not match a pattern is not an error: the operation just
//! returns `None` (or `false`). Errors are reserved for lines that match but
//! carry a number or date that does not decode.

mod generic;
mod www;
mod xxx;
mod yyy;
mod zzz;

use crate::error::{ExtractError, Result};
use crate::types::{
    CompanyContext, ContractContext, ContractHeader, QuoteLine, QuoteRecord,
};
use chrono::{NaiveDate, NaiveTime};
use regex::Captures;

pub use generic::Generic;
pub use www::Www;
pub use xxx::Xxx;
pub use yyy::Yyy;
pub use zzz::Zzz;

/// Token meaning "no price quoted"
pub const SENTINEL: &str = "--";

/// How a firm quotes bid/ask prices relative to the exported units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceScale {
    /// Prices are already in exported units
    Raw,
    /// Prices are quoted in hundredths and divided by 100
    Hundredths,
}

impl PriceScale {
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Raw => value,
            Self::Hundredths => value / 100.0,
        }
    }
}

/// The four line kinds a firm grammar recognizes
pub trait LineGrammar: Sync {
    /// Firm identifier this grammar handles; `None` for the generic grammar
    fn firm(&self) -> Option<&'static str>;

    /// Recognize a `From: <firm> At: <date> <time>` header
    fn recognize_company_header(&self, line: &str) -> Result<Option<CompanyContext>> {
        generic::company_header(line)
    }

    /// Apply a subject line to the company context.
    ///
    /// Returns `true` when the line is this firm's subject line, whether or
    /// not it carried a reference price.
    fn refine_reference(&self, _line: &str, _company: &mut CompanyContext) -> Result<bool> {
        Ok(false)
    }

    /// Pull expiration (and an embedded reference price) out of a contract header
    fn contract_header(&self, _line: &str) -> Result<Option<ContractHeader>> {
        Ok(None)
    }

    /// Decode a quote row without any context attached
    fn quote_line(&self, _line: &str) -> Result<Option<QuoteLine>> {
        Ok(None)
    }

    fn recognize_contract_header(
        &self,
        line: &str,
        company: &CompanyContext,
    ) -> Result<Option<ContractContext>> {
        Ok(self
            .contract_header(line)?
            .map(|header| ContractContext::new(company, header)))
    }

    /// Recognize a quote row and produce its `(put, call)` records
    fn recognize_quote_line(
        &self,
        line: &str,
        contract: &ContractContext,
    ) -> Result<Option<(QuoteRecord, QuoteRecord)>> {
        Ok(self
            .quote_line(line)?
            .map(|quote| quote.into_records(contract)))
    }
}

/// Grammar selector, picked from the firm of the current company header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Grammar {
    /// No firm identified yet: only company headers are recognized
    #[default]
    Generic,
    Xxx,
    Yyy,
    Zzz,
    Www,
}

impl Grammar {
    /// Grammar for a firm identifier, or `None` if the firm is unknown
    #[must_use]
    pub fn for_firm(firm: &str) -> Option<Self> {
        match firm.trim() {
            "XXX" => Some(Self::Xxx),
            "YYY" => Some(Self::Yyy),
            "ZZZ" => Some(Self::Zzz),
            "WWW" => Some(Self::Www),
            _ => None,
        }
    }

    /// The rule set behind this selector
    #[must_use]
    pub fn rules(self) -> &'static dyn LineGrammar {
        match self {
            Self::Generic => &Generic,
            Self::Xxx => &Xxx,
            Self::Yyy => &Yyy,
            Self::Zzz => &Zzz,
            Self::Www => &Www,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Xxx => "XXX",
            Self::Yyy => "YYY",
            Self::Zzz => "ZZZ",
            Self::Www => "WWW",
        }
    }
}

impl LineGrammar for Grammar {
    fn firm(&self) -> Option<&'static str> {
        self.rules().firm()
    }

    fn recognize_company_header(&self, line: &str) -> Result<Option<CompanyContext>> {
        self.rules().recognize_company_header(line)
    }

    fn refine_reference(&self, line: &str, company: &mut CompanyContext) -> Result<bool> {
        self.rules().refine_reference(line, company)
    }

    fn contract_header(&self, line: &str) -> Result<Option<ContractHeader>> {
        self.rules().contract_header(line)
    }

    fn quote_line(&self, line: &str) -> Result<Option<QuoteLine>> {
        self.rules().quote_line(line)
    }
}

// Field decoding shared by the firm tables

fn field<'h>(caps: &Captures<'h>, name: &'static str) -> &'h str {
    caps.name(name).map_or("", |m| m.as_str())
}

fn number(caps: &Captures<'_>, name: &'static str) -> Result<f64> {
    let raw = field(caps, name);
    raw.parse().map_err(|_| ExtractError::InvalidNumber {
        field: name,
        value: raw.to_string(),
    })
}

/// A bid/ask field: the sentinel decodes to `None`, anything else is scaled
fn price(caps: &Captures<'_>, name: &'static str, scale: PriceScale) -> Result<Option<f64>> {
    if field(caps, name) == SENTINEL {
        return Ok(None);
    }
    number(caps, name).map(|value| Some(scale.apply(value)))
}

fn date(caps: &Captures<'_>, name: &'static str, format: &'static str) -> Result<NaiveDate> {
    let raw = field(caps, name);
    NaiveDate::parse_from_str(raw, format).map_err(|_| ExtractError::InvalidDate {
        value: raw.to_string(),
        format,
    })
}

fn time(caps: &Captures<'_>, name: &'static str) -> Result<NaiveTime> {
    const FORMAT: &str = "%H:%M:%S";
    let raw = field(caps, name);
    NaiveTime::parse_from_str(raw, FORMAT).map_err(|_| ExtractError::InvalidDate {
        value: raw.to_string(),
        format: FORMAT,
    })
}
