//! Firm `YYY`: bracketed strike spread, percent deltas, prices in hundredths
//!
//! ```text
//! Subject: HY CDX Options - REF 101.5
//! EXPIRY: 17-Mar-2023 Fwd 101.25/101.5 Dv01 4.2
//! 100 [350] | 120 140 25% | 80 100 -75% | 45.5% [ 40.1%] +1.2% 250
//! ```

use super::{LineGrammar, PriceScale, date, number, price};
use crate::error::Result;
use crate::types::{CompanyContext, ContractHeader, QuoteLeg, QuoteLine};
use regex::Regex;

const SCALE: PriceScale = PriceScale::Hundredths;

static SUBJECT_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^Subject:\s*(?P<subject>.*?)\s+-\s+REF\s+(?P<ref>-?\d*\.?\d+)").unwrap()
});

static CONTRACT_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(
        r"^EXPIRY:\s*(?P<expiry>\d{1,2}-[A-Za-z]{3}-\d{4})\s+Fwd\s+(?P<fwd_bid>\S+)/(?P<fwd_ask>\S+)\s+Dv01\s+(?P<dv01>\S+)",
    )
    .unwrap()
});

static QUOTE_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^\s*
        (?P<strike>-?\d*\.?\d+) \s+ \[ \s* (?P<spread>-?\d*\.?\d+) \s* \] \s* \| \s*
        (?P<put_bid>--|-?\d*\.?\d+) \s+ (?P<put_ask>--|-?\d*\.?\d+) \s+ (?P<put_delta>-?\d*\.?\d+)% \s* \| \s*
        (?P<call_bid>--|-?\d*\.?\d+) \s+ (?P<call_ask>--|-?\d*\.?\d+) \s+ (?P<call_delta>-?\d*\.?\d+)% \s+ \| \s+
        (?P<vol>-?\d*\.?\d+)% \s+ \[ \s* (?P<iv_spread>-?\d*\.?\d+)% \s* \] \s+
        \+* (?P<vol_change>-?\d*\.?\d+)% \s+
        (?P<iv_bps>-?\d*\.?\d+)
        ",
    )
    .unwrap()
});

#[derive(Debug, Clone, Copy, Default)]
pub struct Yyy;

impl LineGrammar for Yyy {
    fn firm(&self) -> Option<&'static str> {
        Some("YYY")
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
            expiration: date(&caps, "expiry", "%d-%b-%Y")?,
            reference_price: None,
        }))
    }

    fn quote_line(&self, line: &str) -> Result<Option<QuoteLine>> {
        let Some(caps) = QUOTE_REGEX.captures(line) else {
            return Ok(None);
        };

        let shared = QuoteLeg {
            strike_price: number(&caps, "strike")?,
            strike_spread: Some(number(&caps, "spread")?),
            implied_vol_spread: Some(number(&caps, "iv_spread")?),
            implied_vol_bps: Some(number(&caps, "iv_bps")?),
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
