//! JSON records persistence for chip tables.
//!
//! A table is stored as its declared columns plus one object per row
//! holding only those columns. Reading coerces the declared columns the
//! way ingestion does; columns the file does not declare are left neutral,
//! so a table read back after `drop_column` keeps its shape.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::RecordsError;
use crate::models::{ChipRecord, RawChip};
use crate::table::{CellValue, ChipTable, Column};

#[derive(Debug, Deserialize)]
struct TableFile {
    columns: Vec<Column>,
    records: Vec<RawChip>,
}

fn cell_to_json(value: CellValue) -> serde_json::Value {
    match value {
        CellValue::Missing => serde_json::Value::Null,
        CellValue::Int(v) => v.into(),
        CellValue::Text(s) => s.into(),
    }
}

/// One JSON object per row, keyed by declared column name.
pub fn to_records(table: &ChipTable) -> Vec<BTreeMap<String, serde_json::Value>> {
    table
        .records()
        .map(|record| {
            table
                .columns()
                .iter()
                .map(|c| (c.name().to_string(), cell_to_json(record.cell(*c))))
                .collect()
        })
        .collect()
}

pub fn to_json(table: &ChipTable) -> Result<String, serde_json::Error> {
    #[derive(Serialize)]
    struct Out<'a> {
        columns: &'a [Column],
        records: Vec<BTreeMap<String, serde_json::Value>>,
    }

    serde_json::to_string_pretty(&Out {
        columns: table.columns(),
        records: to_records(table),
    })
}

pub fn from_json(content: &str) -> Result<ChipTable, RecordsError> {
    let file: TableFile = serde_json::from_str(content)?;
    let mut table = ChipTable::with_columns(&file.columns);
    for raw in &file.records {
        if let Some(record) = ChipRecord::from_raw_columns(raw, &file.columns)? {
            table.push(record);
        }
    }
    Ok(table)
}

/// Parse a bare JSON array of raw records as supplied by an ingestion
/// adapter.
pub fn raw_from_json(content: &str) -> Result<Vec<RawChip>, serde_json::Error> {
    serde_json::from_str(content)
}

pub fn read_file(path: &Path) -> Result<ChipTable, RecordsError> {
    let content = std::fs::read_to_string(path)?;
    from_json(&content)
}

pub fn write_file(table: &ChipTable, path: &Path) -> Result<(), RecordsError> {
    let content = to_json(table)?;
    std::fs::write(path, content)?;
    tracing::info!(path = %path.display(), rows = table.len(), "Wrote chip table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TableError;
    use crate::table::ChipCoord;

    fn table() -> ChipTable {
        ChipTable::from_records([
            ChipRecord::new(ChipCoord::new(1, 9, 4), (255, 0, 0).into()).with_name("5.0R"),
            ChipRecord::new(ChipCoord::new(3, 6, 8), (0, 0, 255).into()).with_key("03-06-08"),
        ])
    }

    #[test]
    fn test_round_trip_preserves_table() {
        let original = table();
        let json = to_json(&original).unwrap();
        let restored = from_json(&json).unwrap();
        assert_eq!(restored.shape(), original.shape());
        assert_eq!(restored, original);
    }

    #[test]
    fn test_round_trip_empty_table_keeps_columns() {
        let json = to_json(&ChipTable::new()).unwrap();
        let restored = from_json(&json).unwrap();
        assert_eq!(restored.shape(), (0, 8));
    }

    #[test]
    fn test_records_hold_declared_columns_only() {
        let mut t = table();
        t.drop_column(Column::HuePageName).unwrap();
        let records = to_records(&t);
        assert_eq!(records[0].len(), 7);
        assert!(!records[0].contains_key("hue_page_name"));
        assert_eq!(records[1]["color_key"], serde_json::json!("03-06-08"));
        assert_eq!(records[0]["color_key"], serde_json::Value::Null);
    }

    #[test]
    fn test_round_trip_after_dropping_integer_column() {
        let mut t = table();
        t.drop_column(Column::B).unwrap();
        let json = to_json(&t).unwrap();
        let restored = from_json(&json).unwrap();

        assert_eq!(restored.shape(), (2, 7));
        assert_eq!(restored.columns(), t.columns());
        assert_eq!(to_records(&restored), to_records(&t));
        assert_eq!(
            restored.unique_values(Column::R).unwrap(),
            t.unique_values(Column::R).unwrap()
        );
    }

    #[test]
    fn test_missing_declared_integer_fails() {
        let json = r#"{
            "columns": ["hue_page_index", "value_row", "chroma_column", "r", "g", "b"],
            "records": [{"hue_page_index": 1, "value_row": 2, "chroma_column": 4, "r": 1, "g": 2}]
        }"#;
        assert!(matches!(
            from_json(json),
            Err(RecordsError::Table(TableError::TypeCoercion {
                column: Column::B,
                ..
            }))
        ));
    }

    #[test]
    fn test_raw_from_json() {
        let json = r#"[{"hue_page_name": "2.5R", "value_row": 1}, {}]"#;
        let raw = raw_from_json(json).unwrap();
        assert_eq!(raw.len(), 2);
        assert!(raw[1].is_empty());
    }
}
