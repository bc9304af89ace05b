use chrono::{Datelike, NaiveDate};
use quickcheck_macros::quickcheck;
use strum::IntoEnumIterator;
use stock_month_chart::domain::market_data::{Company, Dataset, Month, Record, Selection};

const NAMES: [&str; 6] = ["Apple", "Microsoft", "Amazon", "Google", "Meta", "Netflix"];

/// Builds a dataset from arbitrary (company index, day offset, open, close) tuples
/// spread over roughly three years.
fn dataset_from(raw: &[(u8, u16, u16, u16)]) -> Dataset {
    let base = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
    Dataset::new(
        raw.iter()
            .map(|&(company, offset, open, close)| {
                Record::new(
                    NAMES[company as usize % NAMES.len()],
                    base + chrono::Duration::days((offset % 1100) as i64),
                    open as f64 / 100.0,
                    close as f64 / 100.0,
                )
            })
            .collect(),
    )
}

fn selection_from(company: u8, month: u8) -> Selection {
    let company = Company::iter().nth(company as usize % 5).unwrap();
    let month = Month::iter().nth(month as usize % 12).unwrap();
    Selection::new(company, month)
}

#[quickcheck]
fn filter_returns_only_matching_records(raw: Vec<(u8, u16, u16, u16)>, company: u8, month: u8) -> bool {
    let dataset = dataset_from(&raw);
    let selection = selection_from(company, month);
    dataset
        .filter(&selection)
        .records()
        .iter()
        .all(|r| r.company == selection.company.as_ref() && Month::of(&r.date) == selection.month)
}

#[quickcheck]
fn filter_keeps_every_matching_record(raw: Vec<(u8, u16, u16, u16)>, company: u8, month: u8) -> bool {
    let dataset = dataset_from(&raw);
    let selection = selection_from(company, month);
    let expected = dataset.records().iter().filter(|r| r.matches(&selection)).count();
    dataset.filter(&selection).len() == expected
}

#[quickcheck]
fn filtered_records_are_in_date_order(raw: Vec<(u8, u16, u16, u16)>, company: u8, month: u8) -> bool {
    let filtered = dataset_from(&raw).filter(&selection_from(company, month));
    filtered.records().windows(2).all(|w| w[0].date <= w[1].date)
}

#[quickcheck]
fn switching_company_selects_that_company_only(raw: Vec<(u8, u16, u16, u16)>, from: u8, to: u8, month: u8) -> bool {
    let dataset = dataset_from(&raw);
    let before = selection_from(from, month);
    let after = before.with_company(selection_from(to, 0).company);

    let month0 = Month::iter().position(|m| m == after.month).unwrap() as u32;
    let expected: Vec<Record> = {
        let mut records: Vec<Record> = dataset
            .records()
            .iter()
            .filter(|r| r.company == after.company.as_ref() && r.date.month0() == month0)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.date);
        records
    };
    dataset.filter(&after).records() == expected.as_slice()
}

#[test]
fn two_apple_november_records() {
    let dataset = Dataset::new(vec![
        Record::new("Apple", NaiveDate::from_ymd_opt(2023, 11, 1).unwrap(), 150.0, 152.0),
        Record::new("Apple", NaiveDate::from_ymd_opt(2023, 11, 2).unwrap(), 152.0, 149.0),
        Record::new("Apple", NaiveDate::from_ymd_opt(2023, 10, 31).unwrap(), 148.0, 150.0),
        Record::new("Google", NaiveDate::from_ymd_opt(2023, 11, 1).unwrap(), 130.0, 131.0),
    ]);
    let filtered = dataset.filter(&Selection::default());
    assert_eq!(filtered.len(), 2);
    assert_eq!(filtered.price_extent(), Some((149.0, 152.0)));
}

#[test]
fn month_filter_ignores_year() {
    let dataset = Dataset::new(vec![
        Record::new("Apple", NaiveDate::from_ymd_opt(2022, 11, 15).unwrap(), 140.0, 141.0),
        Record::new("Apple", NaiveDate::from_ymd_opt(2023, 11, 15).unwrap(), 180.0, 181.0),
    ]);
    let filtered = dataset.filter(&Selection::default());
    assert_eq!(filtered.len(), 2);
    assert_eq!(filtered.records()[0].date.year(), 2022);
}

#[test]
fn decodes_upstream_json() {
    let json = r#"[
        {"Company": "Apple", "Date": "2023-11-01", "Open": 150, "Close": 152.5},
        {"Company": "Meta", "Date": "2023-11-02", "Open": 310.25, "Close": 309}
    ]"#;
    let dataset = Dataset::from_json(json).unwrap();
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.records()[0].close, 152.5);
    assert_eq!(dataset.records()[1].date, NaiveDate::from_ymd_opt(2023, 11, 2).unwrap());

    assert!(Dataset::from_json(r#"[{"Company": "Apple"}]"#).is_err());
    assert!(Dataset::from_json("[]").unwrap().is_empty());
}
