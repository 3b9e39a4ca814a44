//! Test fixtures: chip tables and raw sample batches.

use std::collections::BTreeMap;

use munsell_pages::models::{ChipRecord, RawChip, Rgb};
use munsell_pages::table::{ChipCoord, ChipTable, Column};

/// Build a raw sample the way an ingestion adapter would.
pub fn raw(name: &str, value_row: i64, chroma_column: i64, rgb: (u8, u8, u8)) -> RawChip {
    RawChip::new()
        .with(Column::HuePageName, name)
        .with(Column::ValueRow, value_row)
        .with(Column::ChromaColumn, chroma_column)
        .with(Column::R, rgb.0)
        .with(Column::G, rgb.1)
        .with(Column::B, rgb.2)
}

pub fn chip(h: u32, v: u32, c: u32, rgb: (u8, u8, u8)) -> ChipRecord {
    ChipRecord::new(ChipCoord::new(h, v, c), rgb.into())
}

/// The four-row table used across table tests.
pub fn four_chip_table() -> ChipTable {
    ChipTable::from_records([
        chip(1, 9, 5, (255, 0, 0)).with_name("2.5R").with_key("change"),
        chip(2, 8, 3, (0, 255, 0)).with_name("5.0R").with_key("change"),
        chip(3, 6, 7, (0, 0, 255)).with_name("7.5R").with_key("change"),
        chip(3, 6, 8, (255, 0, 255)).with_name("10.0R").with_key("change"),
    ])
}

/// Raw samples with repeated measurements of the same chips.
pub fn duplicated_samples() -> Vec<RawChip> {
    vec![
        raw("2.5R", 1, 2, (255, 0, 0)),
        raw("2.5R", 1, 2, (0, 255, 0)),
        raw("2.5R", 1, 2, (0, 0, 255)),
        raw("2.5R", 2, 4, (100, 100, 100)),
        raw("5.0YR", 3, 6, (10, 20, 30)),
        raw("5.0YR", 3, 6, (11, 21, 31)),
        RawChip::new(),
    ]
}

/// Canonical table keyed by color key, for order-insensitive comparison.
pub fn by_key(table: &ChipTable) -> BTreeMap<String, Rgb> {
    table
        .records()
        .map(|r| (r.color_key.clone().unwrap_or_default(), r.rgb()))
        .collect()
}
