use chrono::NaiveDate;
use hycdx_quotes::*;

const XXX_BLOCK: &str = "\
From: XXX At: 01/02/23 09:30:00
Subject: Weekly - Ref 95.25 (abc)
Expiry 15Mar23 (100 5)
100.0  5.0 | 1.0/2.0  25.0  3.0/4.0  10.0  50.0
";

const YYY_BLOCK: &str = "\
From: YYY At: 01/03/23 10:15:00
Subject: HY CDX Options - REF 101.5
EXPIRY: 17-Mar-2023 Fwd 101.25/101.5 Dv01 4.2
100 [350] | 120 140 25% | 80 100 -75% | 45.5% [ 40.1%] +1.2% 250
";

fn scan(text: &str) -> (QuoteBook, ScanStats) {
    let mut book = QuoteBook::new();
    let stats = scan_str(text, &mut book).unwrap();
    (book, stats)
}

// --- Firm A scenario ---

#[test]
fn test_xxx_scenario() {
    let (book, stats) = scan(XXX_BLOCK);

    assert_eq!(book.len(), 2);
    assert_eq!(stats.company_headers, 1);
    assert_eq!(stats.subjects, 1);
    assert_eq!(stats.contract_headers, 1);
    assert_eq!(stats.quote_lines, 1);
    assert_eq!(stats.records, 2);

    let put = &book.records()[0];
    assert_eq!(put.option_type, OptionType::Put);
    assert_eq!(put.strike_price, Some(100.0));
    assert_eq!(put.bid_price, Some(1.0));
    assert_eq!(put.ask_price, Some(2.0));
    assert_eq!(put.delta, Some(25.0));
    assert_eq!(put.reference_price, Some(95.25));

    let call = &book.records()[1];
    assert_eq!(call.option_type, OptionType::Call);
    assert_eq!(call.strike_price, Some(100.0));
    assert_eq!(call.bid_price, Some(3.0));
    assert_eq!(call.ask_price, Some(4.0));
    assert_eq!(call.reference_price, Some(95.25));
    assert_eq!(call.expiration, NaiveDate::from_ymd_opt(2023, 3, 15).unwrap());
}

#[test]
fn test_sentinel_put_bid() {
    let text = XXX_BLOCK.replace("1.0/2.0", "--/2.0");
    let (book, _) = scan(&text);

    let put = &book.records()[0];
    assert!(put.bid_price.is_none());
    assert_eq!(put.ask_price, Some(2.0));
}

// --- Line outcomes ---

#[test]
fn test_feed_outcomes() {
    let mut book = QuoteBook::new();
    let mut scanner = Scanner::new(&mut book);

    assert_eq!(scanner.feed("Hello team,").unwrap(), LineOutcome::Inert);
    assert_eq!(scanner.feed("").unwrap(), LineOutcome::Blank);
    assert_eq!(scanner.feed("   \r\n").unwrap(), LineOutcome::Blank);
    assert_eq!(
        scanner.feed("From: XXX At: 01/02/23 09:30:00\r\n").unwrap(),
        LineOutcome::CompanyHeader
    );
    assert_eq!(scanner.grammar(), Grammar::Xxx);
    assert_eq!(
        scanner.feed("Subject: Weekly - Ref 95.25 (abc)").unwrap(),
        LineOutcome::Subject
    );
    assert_eq!(
        scanner.feed("Expiry 15Mar23 (100 5)").unwrap(),
        LineOutcome::ContractHeader
    );
    assert_eq!(
        scanner.feed("Strike  Spd | Put  Delta  Call  Vol  Bps").unwrap(),
        LineOutcome::Inert
    );
    assert_eq!(
        scanner
            .feed("100.0  5.0 | 1.0/2.0  25.0  3.0/4.0  10.0  50.0")
            .unwrap(),
        LineOutcome::Quote
    );

    let stats = scanner.stats();
    assert_eq!(stats.lines, 8);
    assert_eq!(stats.blank, 2);
    assert_eq!(book.len(), 2);
}

#[test]
fn test_lines_before_company_are_inert() {
    let text = "\
Subject: Weekly - Ref 95.25 (abc)
Expiry 15Mar23 (100 5)
100.0  5.0 | 1.0/2.0  25.0  3.0/4.0  10.0  50.0
";
    let mut book = QuoteBook::new();
    let mut scanner = Scanner::new(&mut book);
    for line in text.lines() {
        assert_eq!(scanner.feed(line).unwrap(), LineOutcome::Inert);
    }
    assert_eq!(scanner.grammar(), Grammar::Generic);
    assert!(scanner.company().is_none());
    assert!(scanner.contract().is_none());
    assert!(book.is_empty());
}

// --- Reference propagation ---

#[test]
fn test_reference_fixed_on_contract() {
    let mut book = QuoteBook::new();
    let mut scanner = Scanner::new(&mut book);

    scanner.feed("From: XXX At: 01/02/23 09:30:00").unwrap();
    scanner.feed("Subject: Weekly - Ref 95.25 (abc)").unwrap();
    scanner.feed("Expiry 15Mar23 (100 5)").unwrap();
    scanner.feed("Subject: Update - Ref 96.5 (abc)").unwrap();

    assert_eq!(scanner.company().unwrap().reference_price, Some(96.5));
    assert_eq!(scanner.contract().unwrap().reference_price(), Some(95.25));

    scanner
        .feed("100.0  5.0 | 1.0/2.0  25.0  3.0/4.0  10.0  50.0")
        .unwrap();
    scanner.feed("Expiry 21Jun23 (100 5)").unwrap();
    scanner
        .feed("102.0  5.0 | 1.5/2.5  30.0  2.0/3.0  11.0  55.0")
        .unwrap();

    let records = book.records();
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].reference_price, Some(95.25));
    assert_eq!(records[1].reference_price, Some(95.25));
    assert_eq!(records[2].reference_price, Some(96.5));
    assert_eq!(records[3].reference_price, Some(96.5));
    assert_eq!(records[2].expiration, NaiveDate::from_ymd_opt(2023, 6, 21).unwrap());
}

#[test]
fn test_contract_without_subject_has_no_reference() {
    let text = "\
From: XXX At: 01/02/23 09:30:00
Expiry 15Mar23 (100 5)
100.0  5.0 | 1.0/2.0  25.0  3.0/4.0  10.0  50.0
";
    let (book, _) = scan(text);
    assert!(book.records().iter().all(|r| r.reference_price.is_none()));
}

// --- Multiple firms ---

#[test]
fn test_two_firms_in_one_file() {
    let text = format!("{XXX_BLOCK}\n{YYY_BLOCK}");
    let (book, stats) = scan(&text);

    assert_eq!(stats.company_headers, 2);
    assert_eq!(book.len(), 4);

    let (first, second) = book.records().split_at(2);
    for record in first {
        assert_eq!(record.firm, "XXX");
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
        assert_eq!(record.reference_price, Some(95.25));
        assert_eq!(record.expiration, NaiveDate::from_ymd_opt(2023, 3, 15).unwrap());
        assert_eq!(record.strike_spread, Some(5.0));
    }
    for record in second {
        assert_eq!(record.firm, "YYY");
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2023, 1, 3).unwrap());
        assert_eq!(record.reference_price, Some(101.5));
        assert_eq!(record.expiration, NaiveDate::from_ymd_opt(2023, 3, 17).unwrap());
        assert_eq!(record.strike_spread, Some(350.0));
    }
    assert_eq!(second[0].bid_price, Some(1.2));
}

#[test]
fn test_company_header_switches_grammar() {
    let mut book = QuoteBook::new();
    let mut scanner = Scanner::new(&mut book);

    scanner.feed("From: XXX At: 01/02/23 09:30:00").unwrap();
    assert_eq!(scanner.grammar(), Grammar::Xxx);
    scanner.feed("Expiry 15Mar23 (100 5)").unwrap();

    scanner.feed("From: WWW At: 01/02/23 11:00:00").unwrap();
    assert_eq!(scanner.grammar(), Grammar::Www);
    assert_eq!(scanner.company().unwrap().firm, "WWW");
    // Previous contract stays until the next contract header
    assert_eq!(scanner.contract().unwrap().firm(), "XXX");

    // XXX rows mean nothing to the WWW grammar
    assert_eq!(
        scanner
            .feed("100.0  5.0 | 1.0/2.0  25.0  3.0/4.0  10.0  50.0")
            .unwrap(),
        LineOutcome::Inert
    );
}

#[test]
fn test_unknown_firm_is_inert() {
    let text = "\
From: QQQ At: 01/02/23 09:30:00
Subject: Weekly - Ref 95.25 (abc)
Expiry 15Mar23 (100 5)
100.0  5.0 | 1.0/2.0  25.0  3.0/4.0  10.0  50.0
";
    let mut book = QuoteBook::new();
    let mut scanner = Scanner::new(&mut book);
    let outcomes: Vec<_> = text.lines().map(|l| scanner.feed(l).unwrap()).collect();

    assert_eq!(
        outcomes,
        vec![
            LineOutcome::CompanyHeader,
            LineOutcome::Inert,
            LineOutcome::Inert,
            LineOutcome::Inert,
        ]
    );
    assert_eq!(scanner.grammar(), Grammar::Generic);
    assert!(book.is_empty());
}

// --- Other firms end to end ---

#[test]
fn test_zzz_block() {
    let text = "\
From: ZZZ At: 02/10/23 07:45:00
Subject: HY swaptions - REF 99.0
Exp: 15-Mar-23 Swaptions Ref: 101.25
Strike | Put Bid / Ask  Delta | Call Bid / Ask  Delta | Vol Chg | Px
100 | 120 / 140 -25 | 80 / 100 75 | 45.0 +1.5 | 0.85
";
    let (book, stats) = scan(text);

    assert_eq!(stats.subjects, 1);
    assert_eq!(book.len(), 2);
    for record in book.records() {
        assert_eq!(record.firm, "ZZZ");
        assert_eq!(record.reference_price, Some(101.25));
        assert_eq!(record.implied_vol_price, Some(0.85));
    }
}

#[test]
fn test_www_put_only_pair() {
    let text = "\
From: WWW At: 02/10/23 07:45:00
Subject: HY CDX weekly run [ref 101.25]
CDX Options: HY (S39) 15-Mar-23 ** Fwd @101.5, Delta @101.25
105 | 120/140  60%  45.5  1.2  350| 100 | 80/100  -40%  44.0  1.1  340
  -  |     -       -    -    -   - | 95 | 30/45  -20%  50.0  1.4  380
";
    let (book, stats) = scan(text);

    assert_eq!(stats.quote_lines, 2);
    let records = book.records();
    assert_eq!(records.len(), 4);

    assert_eq!(records[0].option_type, OptionType::Put);
    assert_eq!(records[0].strike_price, Some(100.0));
    assert_eq!(records[1].option_type, OptionType::Call);
    assert_eq!(records[1].strike_price, Some(105.0));

    assert_eq!(records[2].option_type, OptionType::Put);
    assert_eq!(records[2].strike_price, Some(95.0));
    assert_eq!(records[3].option_type, OptionType::Call);
    assert!(records[3].is_placeholder());
    assert_eq!(records[3].reference_price, Some(101.25));
}

// --- Errors ---

#[test]
fn test_contract_survives_company_header() {
    let text = "\
From: XXX At: 01/02/23 09:30:00
Expiry 15Mar23 (100 5)
100.0  5.0 | 1.0/2.0  25.0  3.0/4.0  10.0  50.0
From: YYY At: 01/03/23 10:15:00
100 [350] | 120 140 25% | 80 100 -75% | 45.5% [ 40.1%] +1.2% 250
EXPIRY: 17-Mar-2023 Fwd 101.25/101.5 Dv01 4.2
";
    let (book, stats) = scan(text);

    // The XXX contract is still current when the YYY row arrives
    assert_eq!(stats.quote_lines, 2);
    assert_eq!(book.len(), 4);
    assert_eq!(book.records()[2].firm, "XXX");
    assert_eq!(book.records()[2].bid_price, Some(1.2));
}

#[test]
fn test_quote_without_any_contract() {
    let text = "\
From: XXX At: 01/02/23 09:30:00
100.0  5.0 | 1.0/2.0  25.0  3.0/4.0  10.0  50.0
";
    let mut book = QuoteBook::new();
    let err = scan_str(text, &mut book).unwrap_err();

    assert!(matches!(err, ExtractError::MissingContract { line: 2 }));
    assert!(!err.is_malformed_field());
    assert!(book.is_empty());
}

#[test]
fn test_malformed_line_is_skipped() {
    let text = "\
From: XXX At: 01/02/23 09:30:00
Expiry 15Mar23 (100 5)
Expiry 31Feb23 (100 5)
100.0  5.0 | 1.0/2.0  25.0  3.0/4.0  10.0  50.0
";
    let (book, stats) = scan(text);

    assert_eq!(stats.malformed, 1);
    assert_eq!(stats.contract_headers, 1);
    assert_eq!(book.len(), 2);
    assert_eq!(
        book.records()[0].expiration,
        NaiveDate::from_ymd_opt(2023, 3, 15).unwrap()
    );
}

// --- Line endings and encoding ---

#[test]
fn test_crlf_and_bare_cr() {
    let crlf = XXX_BLOCK.replace('\n', "\r\n");
    let (book, _) = scan(&crlf);
    assert_eq!(book.len(), 2);

    let cr = XXX_BLOCK.replace('\n', "\r");
    let (book, stats) = scan(&cr);
    assert_eq!(book.len(), 2);
    assert_eq!(stats.company_headers, 1);
}

#[test]
fn test_invalid_utf8_is_tolerated() {
    let mut bytes = b"Caf\xe9 notes\n".to_vec();
    bytes.extend_from_slice(XXX_BLOCK.as_bytes());

    let mut book = QuoteBook::new();
    let stats = scan_reader(bytes.as_slice(), &mut book).unwrap();

    assert_eq!(stats.lines, 5);
    assert_eq!(book.len(), 2);
}
