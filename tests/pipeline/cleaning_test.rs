use inflation_hub::ingest::{CleanRecord, RawRecord, UNKNOWN_AREA_CODE, UNKNOWN_AREA_LABEL, clean_records};

use crate::utils::month;

fn messy_extract() -> Vec<RawRecord> {
    vec![
        RawRecord::new("CHL", "Chile", "2021-02-01", "3.1"),
        RawRecord::new(" chl ", "Chile", "2021-01-01", "2.9"),
        RawRecord::new("DEU", "Germany", "2021-01-01", "1.0"),
        RawRecord::new("DEU", "Germany", "Q1 2021", "1.2"),
        RawRecord::new("DEU", "Germany", "2021-02-01", ".."),
        RawRecord::new("", "  ", "2021-01-01", "7.5"),
        RawRecord {
            area_code: Some("ARG".to_string()),
            area_label: Some("Argentina".to_string()),
            period: None,
            value: Some("50.2".to_string()),
        },
        RawRecord::new("CHL", "Chile", "2021-01-15", "3.0"),
    ]
}

#[test]
fn test_cleaning_drops_malformed_rows() {
    let outcome = clean_records(messy_extract());

    println!("Rejected: {:?}", outcome.rejected);
    assert_eq!(outcome.rejected.invalid_period, 2);
    assert_eq!(outcome.rejected.invalid_value, 1);
    assert_eq!(outcome.rejected.duplicates, 1);
    assert_eq!(outcome.records.len(), 4);
}

#[test]
fn test_cleaning_output_is_sorted_and_normalised() {
    let outcome = clean_records(messy_extract());
    let keys: Vec<(&str, _)> = outcome
        .records
        .iter()
        .map(|record| (record.area_code.as_str(), record.period))
        .collect();

    assert_eq!(
        keys,
        vec![
            ("CHL", month(2021, 1)),
            ("CHL", month(2021, 2)),
            ("DEU", month(2021, 1)),
            (UNKNOWN_AREA_CODE, month(2021, 1)),
        ]
    );
    assert_eq!(outcome.records[3].area_label, UNKNOWN_AREA_LABEL);
}

#[test]
fn test_cleaning_is_idempotent() {
    let first = clean_records(messy_extract());
    let second = clean_records(first.records.iter().map(RawRecord::from));

    assert_eq!(second.rejected.total(), 0);
    assert_eq!(second.records, first.records);
}

#[test]
fn test_deduplication_keeps_last_row() {
    let outcome = clean_records(vec![
        RawRecord::new("BRA", "Brazil", "2022-06-01", "11.9"),
        RawRecord::new("BRA", "Brazil", "2022-05-01", "11.7"),
        RawRecord::new("BRA", "Brazil", "2022-06-01", "11.8"),
    ]);

    assert_eq!(
        outcome.records,
        vec![
            CleanRecord {
                area_code: "BRA".to_string(),
                area_label: "Brazil".to_string(),
                period: month(2022, 5),
                value: 11.7,
            },
            CleanRecord {
                area_code: "BRA".to_string(),
                area_label: "Brazil".to_string(),
                period: month(2022, 6),
                value: 11.8,
            },
        ]
    );
    assert_eq!(outcome.rejected.duplicates, 1);
}

#[test]
fn test_empty_extract() {
    let outcome = clean_records(Vec::<RawRecord>::new());
    assert!(outcome.records.is_empty());
    assert_eq!(outcome.rejected.total(), 0);
}
