//! Chip table queries and mutations.

mod common;

use common::{four_chip_table, raw};
use munsell_pages::error::TableError;
use munsell_pages::models::RawChip;
use munsell_pages::table::{CellValue, ChipTable, Column, SortOrder};
use pretty_assertions::assert_eq;

fn chroma(table: &ChipTable) -> Vec<u32> {
    table.records().map(|r| r.chroma_column).collect()
}

#[test]
fn test_filter_by_name_and_value() {
    let table = four_chip_table();
    let filtered = table
        .filter(&[
            (Column::HuePageName, "10.0R".into()),
            (Column::ValueRow, 6.into()),
        ])
        .unwrap();
    assert_eq!(filtered.shape(), (1, 8));
}

#[test]
fn test_color_keys_replace_placeholder() {
    let mut table = four_chip_table();
    table.assign_color_keys().unwrap();
    let stale = table
        .filter(&[(Column::ColorKey, "change".into())])
        .unwrap();
    assert!(stale.is_empty());
    assert_eq!(stale.shape().0, 0);
}

#[test]
fn test_sort_by_chroma() {
    let table = four_chip_table();
    let asc = table.sort(&[(Column::ChromaColumn, SortOrder::Asc)]).unwrap();
    assert_eq!(chroma(&asc), vec![3, 5, 7, 8]);
    let desc = table.sort(&[(Column::ChromaColumn, SortOrder::Desc)]).unwrap();
    assert_eq!(chroma(&desc), vec![8, 7, 5, 3]);
}

#[test]
fn test_sort_unknown_column_by_name() {
    let table = four_chip_table();
    let result = "nonexistent_column"
        .parse::<Column>()
        .and_then(|column| table.sort(&[(column, SortOrder::Asc)]));
    assert_eq!(
        result,
        Err(TableError::UnknownColumn("nonexistent_column".to_string()))
    );
}

#[test]
fn test_sort_on_table_without_columns() {
    let table = ChipTable::without_columns();
    assert!(matches!(
        table.sort(&[(Column::ChromaColumn, SortOrder::Asc)]),
        Err(TableError::UnknownColumn(_))
    ));
}

#[test]
fn test_failed_sort_leaves_source_untouched() {
    let mut table = four_chip_table();
    table.drop_column(Column::G).unwrap();
    let before = table.clone();
    assert!(table
        .sort(&[
            (Column::ValueRow, SortOrder::Asc),
            (Column::G, SortOrder::Asc)
        ])
        .is_err());
    assert_eq!(table, before);
}

#[test]
fn test_append_partial_and_empty_records() {
    let mut table = ChipTable::new();
    let added = table
        .append(&[
            RawChip::new(),
            raw("2.5R", 1, 2, (1, 2, 3)).with(Column::HuePageIndex, 0),
        ])
        .unwrap();
    assert_eq!(added, 1);

    let record = table.get(0).unwrap();
    assert_eq!(record.color_key, None);
    assert_eq!(table.max(Column::ChromaColumn), Ok(2));
}

#[test]
fn test_append_missing_integer_is_rejected() {
    let mut table = four_chip_table();
    let partial = RawChip::new()
        .with(Column::HuePageIndex, 1)
        .with(Column::ValueRow, 2)
        .with(Column::ChromaColumn, 4);
    let result = table.append(&[partial]);
    assert!(matches!(
        result,
        Err(TableError::TypeCoercion { column: Column::R, .. })
    ));
    assert_eq!(table.len(), 4);
}

#[test]
fn test_remove_then_unique_pages() {
    let mut table = four_chip_table();
    let removed = table.remove(&[(Column::ValueRow, 6.into())], true).unwrap();
    assert_eq!(removed, 2);
    assert_eq!(table.index_labels(), vec![0, 1]);
    assert_eq!(
        table.unique_values(Column::HuePageName).unwrap(),
        vec![CellValue::from("2.5R"), CellValue::from("5.0R")]
    );
}
