// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! HY CDX option quote extraction
//!
//! Turns broker email dumps into a flat table of option quotes. Each dump
//! interleaves company headers, contract (expiry) headers and quote rows,
//! laid out differently by every sending firm.
//!
//! # Features
//!
//! - One regex grammar per known firm, selected from the company header
//! - Two-level parse state (company, contract) carried across lines
//! - `--` sentinels decoded as absent prices, never zero
//! - CSV export with fixed columns, JSON dump of the raw records
//!
//! # Example
//!
//! ```rust
//! use hycdx_quotes::{QuoteBook, scan_str};
//!
//! let dump = "From: XXX At: 01/02/23 09:30:00\n\
//!             Subject: Weekly - Ref 95.25 (S39)\n\
//!             Expiry 15Mar23 (100 5)\n\
//!             100.0  5.0 | 1.0/2.0  25.0  3.0/4.0  10.0  50.0\n";
//!
//! let mut book = QuoteBook::new();
//! scan_str(dump, &mut book).unwrap();
//!
//! assert_eq!(book.len(), 2);
//! assert_eq!(book.records()[0].bid_price, Some(1.0));
//! ```

mod book;
mod config;
mod error;
mod extract;
pub mod grammar;
mod scanner;
mod types;

pub use book::{DATE_FORMAT, QuoteBook, QuoteRow, TIME_FORMAT, format_date, format_time};
pub use config::ExtractConfig;
pub use error::{ExtractError, Result};
pub use extract::{ExtractReport, collect_quotes, discover_inputs, extract_directory};
pub use grammar::{Grammar, LineGrammar};
pub use scanner::{LineOutcome, ScanStats, Scanner, scan_file, scan_reader, scan_str};
pub use types::*;
