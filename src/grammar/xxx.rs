//! Firm `XXX`: fixed-width table rows, prices in raw units
//!
//! ```text
//! Subject: Weekly HY - Ref 95.25 (S39)
//! Expiry 15Mar23 (100 5)
//! 100.0  5.0 | 1.0/2.0  25.0  3.0/4.0  10.0  0.5  50.0  1.2
//! ```

use super::{LineGrammar, PriceScale, date, number, price};
use crate::error::Result;
use crate::types::{CompanyContext, ContractHeader, QuoteLeg, QuoteLine};
use regex::Regex;

const SCALE: PriceScale = PriceScale::Raw;

static SUBJECT_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^Subject:\s*(?P<subject>.*)\s+-\s+Ref\s+(?P<ref>-?\d*\.?\d+)\s*\((?P<tag>.*)\)")
        .unwrap()
});

static CONTRACT_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^Expiry\s+(?P<expiry>\d{1,2}[A-Za-z]{3}\d{2})\s+\((?P<fwd>[^\s)]+)\s+(?P<width>[^)]+)\)")
        .unwrap()
});

// Either `iv_spread iv_bps` or `iv_spread vol_chg iv_bps bps_chg`; the change
// columns are ignored.
static QUOTE_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^\s*
        (?P<strike>-?\d*\.?\d+) \s+
        (?P<spread>-?\d*\.?\d+) \s+ \| \s+
        (?P<put_bid>--|-?\d*\.?\d+) / (?P<put_ask>--|-?\d*\.?\d+) \s+
        (?P<delta>-?\d*\.?\d+) \s+
        (?P<call_bid>--|-?\d*\.?\d+) / (?P<call_ask>--|-?\d*\.?\d+) \s+
        (?P<iv_spread>-?\d*\.?\d+)
        (?:
            \s+ -?\d*\.?\d+ \s+ (?P<iv_bps>-?\d*\.?\d+) \s+ -?\d*\.?\d+
          | \s+ (?P<iv_bps_short>-?\d*\.?\d+)
        )
        \s*$
        ",
    )
    .unwrap()
});

#[derive(Debug, Clone, Copy, Default)]
pub struct Xxx;

impl LineGrammar for Xxx {
    fn firm(&self) -> Option<&'static str> {
        Some("XXX")
    }

    fn refine_reference(&self, line: &str, company: &mut CompanyContext) -> Result<bool> {
        let Some(caps) = SUBJECT_REGEX.captures(line) else {
            return Ok(false);
        };
        company.reference_price = Some(number(&caps, "ref")?);
        Ok(true)
    }

    fn contract_header(&self, line: &str) -> Result<Option<ContractHeader>> {
        let Some(caps) = CONTRACT_REGEX.captures(line) else {
            return Ok(None);
        };
        Ok(Some(ContractHeader {
            expiration: date(&caps, "expiry", "%d%b%y")?,
            reference_price: None,
        }))
    }

    fn quote_line(&self, line: &str) -> Result<Option<QuoteLine>> {
        let Some(caps) = QUOTE_REGEX.captures(line) else {
            return Ok(None);
        };

        let bps = if caps.name("iv_bps").is_some() {
            "iv_bps"
        } else {
            "iv_bps_short"
        };

        // Both sides share strike, delta and vol columns
        let shared = QuoteLeg {
            strike_price: number(&caps, "strike")?,
            strike_spread: Some(number(&caps, "spread")?),
            delta: number(&caps, "delta")?,
            implied_vol_spread: Some(number(&caps, "iv_spread")?),
            implied_vol_bps: Some(number(&caps, bps)?),
            ..QuoteLeg::default()
        };

        Ok(Some(QuoteLine {
            put: QuoteLeg {
                bid_price: price(&caps, "put_bid", SCALE)?,
                ask_price: price(&caps, "put_ask", SCALE)?,
                ..shared
            },
            call: Some(QuoteLeg {
                bid_price: price(&caps, "call_bid", SCALE)?,
                ask_price: price(&caps, "call_ask", SCALE)?,
                ..shared
            }),
        }))
    }
}
