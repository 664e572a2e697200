//! Firm `ZZZ`: expiry and reference on one header line, prices in hundredths
//!
//! Lines from this firm carry non-breaking spaces (often double-encoded as
//! `Â` + NBSP) which are cleaned before any pattern is tried.
//!
//! ```text
//! Exp: 15-Mar-23 Swaptions Ref: 101.25
//! 100 | 120 / 140 -25 | 80 / 100 75 | 45.0 +1.5 | 0.85
//! ```

use super::{LineGrammar, PriceScale, date, number, price};
use crate::error::Result;
use crate::types::{CompanyContext, ContractHeader, QuoteLeg, QuoteLine};
use regex::Regex;
use std::borrow::Cow;

const SCALE: PriceScale = PriceScale::Hundredths;

const MOJIBAKE_NBSP: &str = "\u{c2}\u{a0}";
const NBSP: char = '\u{a0}';

static SUBJECT_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"^Subject:").unwrap());

static CONTRACT_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^Exp:\s*(?P<expiry>\d{1,2}-[A-Za-z]{3}-\d{2})\b.*?\bRef:\s*(?P<ref>-?\d*\.?\d+)")
        .unwrap()
});

static QUOTE_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^\s*
        (?P<strike>-?\d*\.?\d+) \s* \| \s*
        (?P<put_bid>--|-?\d*\.?\d+) \s* / \s* (?P<put_ask>--|-?\d*\.?\d+) \s+ (?P<put_delta>-?\d*\.?\d+) \s* \| \s*
        (?P<call_bid>--|-?\d*\.?\d+) \s* / \s* (?P<call_ask>--|-?\d*\.?\d+) \s+ (?P<call_delta>-?\d*\.?\d+) \s* \| \s*
        (?P<iv_spread>-?\d*\.?\d+) \s+ \+? (?P<vol_change>-?\d*\.?\d+) \s* \| \s*
        (?P<iv_price>-?\d*\.?\d+)
        ",
    )
    .unwrap()
});

/// Strip the NBSP artifacts this firm's mail client leaves behind
fn clean(line: &str) -> Cow<'_, str> {
    if line.contains(NBSP) {
        Cow::Owned(line.replace(MOJIBAKE_NBSP, "").replace(NBSP, " "))
    } else {
        Cow::Borrowed(line)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Zzz;

impl LineGrammar for Zzz {
    fn firm(&self) -> Option<&'static str> {
        Some("ZZZ")
    }

    fn recognize_company_header(&self, line: &str) -> Result<Option<CompanyContext>> {
        super::generic::company_header(&clean(line))
    }

    // The subject never carries a reference; the contract header does.
    fn refine_reference(&self, line: &str, _company: &mut CompanyContext) -> Result<bool> {
        Ok(SUBJECT_REGEX.is_match(&clean(line)))
    }

    fn contract_header(&self, line: &str) -> Result<Option<ContractHeader>> {
        let line = clean(line);
        let Some(caps) = CONTRACT_REGEX.captures(&line) else {
            return Ok(None);
        };
        Ok(Some(ContractHeader {
            expiration: date(&caps, "expiry", "%d-%b-%y")?,
            reference_price: Some(number(&caps, "ref")?),
        }))
    }

    fn quote_line(&self, line: &str) -> Result<Option<QuoteLine>> {
        let line = clean(line);
        let Some(caps) = QUOTE_REGEX.captures(&line) else {
            return Ok(None);
        };

        let shared = QuoteLeg {
            strike_price: number(&caps, "strike")?,
            implied_vol_spread: Some(number(&caps, "iv_spread")?),
            implied_vol_price: Some(number(&caps, "iv_price")?),
            ..QuoteLeg::default()
        };

        Ok(Some(QuoteLine {
            put: QuoteLeg {
                bid_price: price(&caps, "put_bid", SCALE)?,
                ask_price: price(&caps, "put_ask", SCALE)?,
                delta: number(&caps, "put_delta")?,
                ..shared
            },
            call: Some(QuoteLeg {
                bid_price: price(&caps, "call_bid", SCALE)?,
                ask_price: price(&caps, "call_ask", SCALE)?,
                delta: number(&caps, "call_delta")?,
                ..shared
            }),
        }))
    }
}
