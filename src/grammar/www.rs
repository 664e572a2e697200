//! Firm `WWW`: call and put side by side on one row, prices in hundredths
//!
//! When only puts are offered the call half is a run of `-` placeholders, and
//! the emitted call record carries nothing but the contract context.
//!
//! ```text
//! Subject: HY CDX weekly run [ref 101.25]
//! CDX Options: HY (S39) 15-Mar-23 ** Fwd @101.5, Delta @101.25
//! 105 | 120/140  60%  45.5  1.2  350| 100 | 80/100  -40%  44.0  1.1  340
//!   -  |     -       -    -    -   - | 95 | 30/45  -20%  50.0  1.4  380
//! ```

use super::{LineGrammar, PriceScale, date, number, price};
use crate::error::Result;
use crate::types::{CompanyContext, ContractHeader, QuoteLeg, QuoteLine};
use regex::{Captures, Regex};

const SCALE: PriceScale = PriceScale::Hundredths;

static SUBJECT_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^Subject:\s*(?P<subject>.*?)\[ref\s+(?P<ref>-?\d*\.?\d+)\]").unwrap()
});

// Forward and delta reference are part of the header but not exported.
static CONTRACT_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(
        r"^CDX Options:\s*HY\s+\((?P<series>[^)]*)\)\s+(?P<expiry>\d{1,2}-[A-Za-z]{3}-\d{2})\s+\*\*\s+Fwd\s+@(?P<fwd>-?\d*\.?\d+),\s*Delta\s+@(?P<delta_ref>-?\d*\.?\d+)",
    )
    .unwrap()
});

static CALL_PUT_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^\s*
        (?P<call_strike>-?\d*\.?\d+) \s* \| \s*
        (?P<call_bid>--|-?\d*\.?\d+) / (?P<call_ask>--|-?\d*\.?\d+) \s+ (?P<call_delta>-?\d*\.?\d+)% \s+
        (?P<call_iv_spread>-?\d*\.?\d+) \s+ (?P<call_vol>-?\d*\.?\d+) \s+ (?P<call_iv_bps>-?\d*\.?\d+) \s* \| \s*
        (?P<put_strike>-?\d*\.?\d+) \s* \| \s*
        (?P<put_bid>--|-?\d*\.?\d+) / (?P<put_ask>--|-?\d*\.?\d+) \s+ (?P<put_delta>-?\d*\.?\d+)% \s+
        (?P<put_iv_spread>-?\d*\.?\d+) \s+ (?P<put_vol>-?\d*\.?\d+) \s+ (?P<put_iv_bps>-?\d*\.?\d+)
        ",
    )
    .unwrap()
});

static PUT_ONLY_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^\s* - \s* \| (?: \s* - )+ \s* \| \s*
        (?P<put_strike>-?\d*\.?\d+) \s* \| \s*
        (?P<put_bid>--|-?\d*\.?\d+) / (?P<put_ask>--|-?\d*\.?\d+) \s+ (?P<put_delta>-?\d*\.?\d+)% \s+
        (?P<put_iv_spread>-?\d*\.?\d+) \s+ (?P<put_vol>-?\d*\.?\d+) \s+ (?P<put_iv_bps>-?\d*\.?\d+)
        ",
    )
    .unwrap()
});

/// Names of the capture groups making up one side of a row
struct LegFields {
    strike: &'static str,
    bid: &'static str,
    ask: &'static str,
    delta: &'static str,
    iv_spread: &'static str,
    iv_bps: &'static str,
}

const CALL: LegFields = LegFields {
    strike: "call_strike",
    bid: "call_bid",
    ask: "call_ask",
    delta: "call_delta",
    iv_spread: "call_iv_spread",
    iv_bps: "call_iv_bps",
};

const PUT: LegFields = LegFields {
    strike: "put_strike",
    bid: "put_bid",
    ask: "put_ask",
    delta: "put_delta",
    iv_spread: "put_iv_spread",
    iv_bps: "put_iv_bps",
};

fn leg(caps: &Captures<'_>, fields: &LegFields) -> Result<QuoteLeg> {
    Ok(QuoteLeg {
        strike_price: number(caps, fields.strike)?,
        strike_spread: None,
        bid_price: price(caps, fields.bid, SCALE)?,
        ask_price: price(caps, fields.ask, SCALE)?,
        delta: number(caps, fields.delta)?,
        implied_vol_spread: Some(number(caps, fields.iv_spread)?),
        implied_vol_bps: Some(number(caps, fields.iv_bps)?),
        implied_vol_price: None,
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Www;

impl LineGrammar for Www {
    fn firm(&self) -> Option<&'static str> {
        Some("WWW")
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
            expiration: date(&caps, "expiry", "%d-%b-%y")?,
            reference_price: None,
        }))
    }

    fn quote_line(&self, line: &str) -> Result<Option<QuoteLine>> {
        if let Some(caps) = CALL_PUT_REGEX.captures(line) {
            return Ok(Some(QuoteLine {
                put: leg(&caps, &PUT)?,
                call: Some(leg(&caps, &CALL)?),
            }));
        }
        if let Some(caps) = PUT_ONLY_REGEX.captures(line) {
            return Ok(Some(QuoteLine {
                put: leg(&caps, &PUT)?,
                call: None,
            }));
        }
        Ok(None)
    }
}
