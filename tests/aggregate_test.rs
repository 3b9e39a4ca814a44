//! Ingestion through aggregation into a canonical chip table.

mod common;

use std::collections::BTreeMap;

use common::{by_key, chip, duplicated_samples, raw};
use munsell_pages::error::TableError;
use munsell_pages::models::{HueCatalog, Rgb};
use munsell_pages::services::{aggregate, aggregate_by_hue_page};
use munsell_pages::table::{ChipTable, Column};
use pretty_assertions::assert_eq;

fn ingest(samples: &[munsell_pages::models::RawChip]) -> ChipTable {
    let catalog = HueCatalog::default();
    let mut samples = samples.to_vec();
    for sample in &mut samples {
        sample.resolve_hue_page(&catalog).unwrap();
    }
    ChipTable::from_raw(&samples).unwrap()
}

#[test]
fn test_ingest_requires_hue_page_index() {
    let result = ChipTable::from_raw(&duplicated_samples());
    assert!(matches!(
        result,
        Err(TableError::TypeCoercion {
            column: Column::HuePageIndex,
            ..
        })
    ));
}

#[test]
fn test_aggregate_duplicated_samples() {
    let table = ingest(&duplicated_samples());
    assert_eq!(table.len(), 6);

    let canonical = aggregate(&table).unwrap();
    let expected: BTreeMap<String, Rgb> = [
        ("00-01-02".to_string(), Rgb::new(85, 85, 85)),
        ("00-02-04".to_string(), Rgb::new(100, 100, 100)),
        ("05-03-06".to_string(), Rgb::new(10, 20, 30)),
    ]
    .into_iter()
    .collect();
    assert_eq!(by_key(&canonical), expected);
}

#[test]
fn test_canonical_names_survive() {
    let canonical = aggregate(&ingest(&duplicated_samples())).unwrap();
    let names = canonical
        .filter(&[(Column::ColorKey, "05-03-06".into())])
        .unwrap()
        .records()
        .map(|r| r.hue_page_name.clone())
        .collect::<Vec<_>>();
    assert_eq!(names, vec![Some("5.0YR".to_string())]);
}

#[test]
fn test_cardinality_matches_distinct_keys() {
    for distinct in 1..=6u32 {
        for repeats in 1..=4u32 {
            let mut table = ChipTable::new();
            for round in 0..repeats {
                for k in 0..distinct {
                    let shade = (round * 40 + k) as u8;
                    table.push(chip(k % 3, k + 1, 2 * (k + 1), (shade, shade, shade)));
                }
            }
            assert_eq!(table.len() as u32, distinct * repeats);
            assert_eq!(aggregate(&table).unwrap().len() as u32, distinct);
        }
    }
}

#[test]
fn test_aggregate_is_idempotent() {
    let once = aggregate(&ingest(&duplicated_samples())).unwrap();
    let twice = aggregate(&once).unwrap();
    assert_eq!(twice, once);
}

#[test]
fn test_by_hue_page_matches_plain_aggregate() {
    let table = ingest(&[
        raw("7.5P", 4, 6, (1, 2, 3)),
        raw("2.5R", 1, 2, (9, 9, 9)),
        raw("7.5P", 4, 6, (3, 4, 5)),
        raw("5.0G", 5, 10, (50, 60, 70)),
    ]);
    let plain = aggregate(&table).unwrap();
    let (paged, summary) = aggregate_by_hue_page(&table).unwrap();

    assert_eq!(by_key(&paged), by_key(&plain));
    assert_eq!(summary.input_rows, 4);
    assert_eq!(summary.output_rows, 3);

    let pages: Vec<u32> = paged.records().map(|r| r.hue_page_index).collect();
    assert_eq!(pages, vec![0, 17, 34]);
}

#[test]
fn test_stale_keys_are_rejected() {
    let table = ChipTable::from_records([
        chip(1, 2, 4, (0, 0, 0)).with_key("01-02-04"),
        chip(1, 2, 6, (0, 0, 0)).with_key("01-02-04"),
    ]);
    assert!(matches!(
        aggregate(&table),
        Err(TableError::KeyMismatch { .. })
    ));
}
