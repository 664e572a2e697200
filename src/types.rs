//! Core types for parsed quotes and the parse contexts that produce them

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Option side of a quote record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Single-letter code used in the exported table
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Call => "C",
            Self::Put => "P",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The sender block currently being scanned.
///
/// Created by a company header line. Subject lines may refine the reference
/// price until the next contract header copies it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanyContext {
    /// Firm identifier as written in the header (e.g. `XXX`)
    pub firm: String,

    /// Send date
    pub date: NaiveDate,

    /// Send time
    pub time: NaiveTime,

    /// Underlying reference price, once a subject line supplied one
    pub reference_price: Option<f64>,
}

impl CompanyContext {
    #[must_use]
    pub fn new(firm: impl Into<String>, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            firm: firm.into(),
            date,
            time,
            reference_price: None,
        }
    }
}

/// Fields a grammar pulls out of a contract header line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContractHeader {
    pub expiration: NaiveDate,

    /// Reference price embedded in the header itself, if the firm puts it there
    pub reference_price: Option<f64>,
}

/// One expiration bucket under a company block.
///
/// Everything is copied out of the owning [`CompanyContext`] at creation and
/// never changes afterwards, so fields are read through accessors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContractContext {
    firm: String,
    date: NaiveDate,
    time: NaiveTime,
    expiration: NaiveDate,
    reference_price: Option<f64>,
}

impl ContractContext {
    /// Derive a contract context from the current company context.
    ///
    /// A reference price carried by the header wins over the company's.
    #[must_use]
    pub fn new(company: &CompanyContext, header: ContractHeader) -> Self {
        Self {
            firm: company.firm.clone(),
            date: company.date,
            time: company.time,
            expiration: header.expiration,
            reference_price: header.reference_price.or(company.reference_price),
        }
    }

    #[must_use]
    pub fn firm(&self) -> &str {
        &self.firm
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub const fn time(&self) -> NaiveTime {
        self.time
    }

    #[must_use]
    pub const fn expiration(&self) -> NaiveDate {
        self.expiration
    }

    #[must_use]
    pub const fn reference_price(&self) -> Option<f64> {
        self.reference_price
    }
}

/// Per-side fields decoded from a quote line, before context is attached
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuoteLeg {
    pub strike_price: f64,
    pub strike_spread: Option<f64>,
    pub bid_price: Option<f64>,
    pub ask_price: Option<f64>,
    pub delta: f64,
    pub implied_vol_spread: Option<f64>,
    pub implied_vol_bps: Option<f64>,
    pub implied_vol_price: Option<f64>,
}

/// A recognized quote line.
///
/// `call` is `None` for put-only markets; the emitted call record is then a
/// bare copy of the contract context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuoteLine {
    pub put: QuoteLeg,
    pub call: Option<QuoteLeg>,
}

impl QuoteLine {
    /// Attach contract context and produce the `(put, call)` record pair
    #[must_use]
    pub fn into_records(self, contract: &ContractContext) -> (QuoteRecord, QuoteRecord) {
        let put = QuoteRecord::from_leg(contract, OptionType::Put, &self.put);
        let call = self.call.map_or_else(
            || QuoteRecord::placeholder(contract, OptionType::Call),
            |leg| QuoteRecord::from_leg(contract, OptionType::Call, &leg),
        );
        (put, call)
    }
}

/// A single emitted option quote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteRecord {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub firm: String,
    pub expiration: NaiveDate,
    pub option_type: OptionType,

    /// `None` only on a placeholder record
    pub strike_price: Option<f64>,
    pub strike_spread: Option<f64>,

    /// `None` means no bid was offered, not a zero bid
    pub bid_price: Option<f64>,

    /// `None` means no offer, not a zero offer
    pub ask_price: Option<f64>,
    pub delta: Option<f64>,
    pub implied_vol_spread: Option<f64>,
    pub implied_vol_bps: Option<f64>,
    pub implied_vol_price: Option<f64>,
    pub reference_price: Option<f64>,
}

impl QuoteRecord {
    fn from_leg(contract: &ContractContext, option_type: OptionType, leg: &QuoteLeg) -> Self {
        Self {
            strike_price: Some(leg.strike_price),
            strike_spread: leg.strike_spread,
            bid_price: leg.bid_price,
            ask_price: leg.ask_price,
            delta: Some(leg.delta),
            implied_vol_spread: leg.implied_vol_spread,
            implied_vol_bps: leg.implied_vol_bps,
            implied_vol_price: leg.implied_vol_price,
            ..Self::placeholder(contract, option_type)
        }
    }

    /// A record carrying only the contract context, with no market fields
    #[must_use]
    pub fn placeholder(contract: &ContractContext, option_type: OptionType) -> Self {
        Self {
            date: contract.date(),
            time: contract.time(),
            firm: contract.firm().to_string(),
            expiration: contract.expiration(),
            option_type,
            strike_price: None,
            strike_spread: None,
            bid_price: None,
            ask_price: None,
            delta: None,
            implied_vol_spread: None,
            implied_vol_bps: None,
            implied_vol_price: None,
            reference_price: contract.reference_price(),
        }
    }

    /// Whether this is a placeholder side with no quote at all
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        self.strike_price.is_none()
    }
}
