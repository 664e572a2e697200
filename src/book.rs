//! Append-only collection of emitted quotes and its tabular export

use crate::error::Result;
use crate::types::QuoteRecord;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Date format of the `Date` and `Expiration` columns (`15-Mar-23`)
pub const DATE_FORMAT: &str = "%d-%b-%y";

/// Time format of the `Time` column
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Every record emitted across all scanned files, in line order
#[derive(Debug, Clone, Default)]
pub struct QuoteBook {
    records: Vec<QuoteRecord>,
}

impl QuoteBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a put/call pair, put first
    pub fn push_pair(&mut self, put: QuoteRecord, call: QuoteRecord) {
        self.records.push(put);
        self.records.push(call);
    }

    #[must_use]
    pub fn records(&self) -> &[QuoteRecord] {
        &self.records
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Exported rows in the order records were emitted
    pub fn rows(&self) -> impl Iterator<Item = QuoteRow<'_>> {
        self.records.iter().map(QuoteRow::from)
    }

    /// Write the table as CSV, header row included
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in self.rows() {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn write_csv_path(&self, path: &Path) -> Result<()> {
        self.write_csv(File::create(path)?)
    }

    /// Pretty-printed JSON array of the raw records
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }
}

impl Extend<(QuoteRecord, QuoteRecord)> for QuoteBook {
    fn extend<T: IntoIterator<Item = (QuoteRecord, QuoteRecord)>>(&mut self, iter: T) {
        for (put, call) in iter {
            self.push_pair(put, call);
        }
    }
}

/// One row of the exported table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteRow<'a> {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Firm")]
    pub firm: &'a str,
    #[serde(rename = "Expiration")]
    pub expiration: String,
    #[serde(rename = "Option Type")]
    pub option_type: &'static str,
    #[serde(rename = "Strike Px")]
    pub strike_price: Option<f64>,
    #[serde(rename = "Bid Price")]
    pub bid_price: Option<f64>,
    #[serde(rename = "Ask Price")]
    pub ask_price: Option<f64>,
    #[serde(rename = "Delta")]
    pub delta: Option<f64>,
    #[serde(rename = "Implied Vol Spd")]
    pub implied_vol_spread: Option<f64>,
    #[serde(rename = "Implied Vol Bps")]
    pub implied_vol_bps: Option<f64>,
    #[serde(rename = "Implied Vol Px")]
    pub implied_vol_price: Option<f64>,
    #[serde(rename = "Ref Px")]
    pub reference_price: Option<f64>,
}

impl<'a> From<&'a QuoteRecord> for QuoteRow<'a> {
    fn from(record: &'a QuoteRecord) -> Self {
        Self {
            date: format_date(record.date),
            time: format_time(record.time),
            firm: &record.firm,
            expiration: format_date(record.expiration),
            option_type: record.option_type.code(),
            strike_price: record.strike_price,
            bid_price: record.bid_price,
            ask_price: record.ask_price,
            delta: record.delta,
            implied_vol_spread: record.implied_vol_spread,
            implied_vol_bps: record.implied_vol_bps,
            implied_vol_price: record.implied_vol_price,
            reference_price: record.reference_price,
        }
    }
}

#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[must_use]
pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}
