//! Line-by-line dispatch of an email dump onto the firm grammars
//!
//! The scanner owns the parse state of one file: the grammar selected by
//! the last company header, the current company context and the current
//! contract context. Each line is tried, in order, as a company header, a
//! subject line, a contract header and a quote row; the first match wins.

use crate::book::QuoteBook;
use crate::error::{ExtractError, Result};
use crate::grammar::{Grammar, LineGrammar};
use crate::types::{CompanyContext, ContractContext};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, warn};

/// What a single line did to the parse state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Empty or whitespace-only line
    Blank,
    /// Matched nothing in the active grammar
    Inert,
    /// Started a new company block
    CompanyHeader,
    /// Subject line applied to the company context
    Subject,
    /// Started a new contract block
    ContractHeader,
    /// Emitted a put/call pair
    Quote,
    /// Matched a pattern but a field did not decode; skipped
    Malformed,
}

/// Counters for one scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub lines: usize,
    pub blank: usize,
    pub company_headers: usize,
    pub subjects: usize,
    pub contract_headers: usize,
    pub quote_lines: usize,
    pub records: usize,
    pub malformed: usize,
}

#[derive(Debug, Default)]
struct ParseState {
    grammar: Grammar,
    company: Option<CompanyContext>,
    contract: Option<ContractContext>,
}

/// Stateful scanner over one line stream, appending into a shared book
#[derive(Debug)]
pub struct Scanner<'b> {
    book: &'b mut QuoteBook,
    state: ParseState,
    line_number: usize,
    stats: ScanStats,
}

impl<'b> Scanner<'b> {
    /// A scanner with empty parse state
    pub fn new(book: &'b mut QuoteBook) -> Self {
        Self {
            book,
            state: ParseState::default(),
            line_number: 0,
            stats: ScanStats::default(),
        }
    }

    /// Grammar selected by the current company header
    #[must_use]
    pub const fn grammar(&self) -> Grammar {
        self.state.grammar
    }

    #[must_use]
    pub const fn company(&self) -> Option<&CompanyContext> {
        self.state.company.as_ref()
    }

    #[must_use]
    pub const fn contract(&self) -> Option<&ContractContext> {
        self.state.contract.as_ref()
    }

    #[must_use]
    pub const fn stats(&self) -> ScanStats {
        self.stats
    }

    /// Feed one line (trailing line terminator allowed).
    ///
    /// A line that matches a pattern but carries an undecodable field is
    /// skipped and reported as [`LineOutcome::Malformed`]. A contract header
    /// or quote row arriving before its enclosing context is an error and
    /// the caller should stop scanning this stream.
    pub fn feed(&mut self, line: &str) -> Result<LineOutcome> {
        self.line_number += 1;
        self.stats.lines += 1;

        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            self.stats.blank += 1;
            return Ok(LineOutcome::Blank);
        }

        match self.dispatch(line) {
            Err(e) if e.is_malformed_field() => {
                warn!(line = self.line_number, error = %e, "Skipping malformed line");
                self.stats.malformed += 1;
                Ok(LineOutcome::Malformed)
            }
            other => other,
        }
    }

    fn dispatch(&mut self, line: &str) -> Result<LineOutcome> {
        let grammar = self.state.grammar;

        if let Some(company) = grammar.recognize_company_header(line)? {
            self.enter_company(company);
            return Ok(LineOutcome::CompanyHeader);
        }

        if let Some(company) = self.state.company.as_mut()
            && grammar.refine_reference(line, company)?
        {
            self.stats.subjects += 1;
            return Ok(LineOutcome::Subject);
        }

        if let Some(header) = grammar.contract_header(line)? {
            // Contract headers need an enclosing company block
            let company = self
                .state
                .company
                .as_ref()
                .ok_or(ExtractError::MissingCompany {
                    line: self.line_number,
                })?;
            let contract = ContractContext::new(company, header);
            debug!(
                firm = contract.firm(),
                expiration = %contract.expiration(),
                reference = ?contract.reference_price(),
                "Contract header"
            );
            self.state.contract = Some(contract);
            self.stats.contract_headers += 1;
            return Ok(LineOutcome::ContractHeader);
        }

        if let Some(quote) = grammar.quote_line(line)? {
            let contract = self
                .state
                .contract
                .as_ref()
                .ok_or(ExtractError::MissingContract {
                    line: self.line_number,
                })?;
            let (put, call) = quote.into_records(contract);
            self.book.push_pair(put, call);
            self.stats.quote_lines += 1;
            self.stats.records += 2;
            return Ok(LineOutcome::Quote);
        }

        Ok(LineOutcome::Inert)
    }

    // The contract context is left alone: it is only replaced by the next
    // contract header.
    fn enter_company(&mut self, company: CompanyContext) {
        let grammar = Grammar::for_firm(&company.firm).unwrap_or_else(|| {
            warn!(
                line = self.line_number,
                firm = %company.firm,
                "No grammar for firm; ignoring its lines"
            );
            Grammar::Generic
        });
        debug!(
            firm = %company.firm,
            date = %company.date,
            time = %company.time,
            grammar = grammar.name(),
            "Company header"
        );
        self.state.grammar = grammar;
        self.state.company = Some(company);
        self.stats.company_headers += 1;
    }
}

/// Scan a line stream with fresh parse state.
///
/// Invalid UTF-8 is decoded lossily; `\n`, `\r\n` and bare `\r` all end a line.
pub fn scan_reader<R: BufRead>(mut reader: R, book: &mut QuoteBook) -> Result<ScanStats> {
    let mut scanner = Scanner::new(book);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let text = String::from_utf8_lossy(&buf);
        let text = text.trim_end_matches(['\r', '\n']);
        for line in text.split('\r') {
            scanner.feed(line)?;
        }
    }

    Ok(scanner.stats())
}

pub fn scan_str(text: &str, book: &mut QuoteBook) -> Result<ScanStats> {
    scan_reader(text.as_bytes(), book)
}

/// Scan one file. The handle is closed before this returns, on every path.
pub fn scan_file(path: &Path, book: &mut QuoteBook) -> Result<ScanStats> {
    let file = File::open(path)?;
    let stats = scan_reader(BufReader::new(file), book)?;

    info!(
        file = %path.display(),
        lines = stats.lines,
        records = stats.records,
        malformed = stats.malformed,
        "Scanned file"
    );

    Ok(stats)
}
