use thiserror::Error;

use crate::table::Column;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("Coordinate {field} = {value} does not fit a two-digit key field")]
    EncodingRange { field: &'static str, value: u32 },

    #[error("Malformed color key {key:?}: expected 3 fields, found {found}")]
    MalformedKey { key: String, found: usize },

    #[error("Invalid field {field:?} in color key {key:?}")]
    InvalidField { key: String, field: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("Cannot coerce {column}: {reason}")]
    TypeCoercion { column: Column, reason: String },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Column {0} has no values")]
    EmptyColumn(Column),

    #[error("Column {0} is not numeric")]
    NotNumeric(Column),

    #[error("Color key {key:?} does not match its coordinates (expected {expected:?})")]
    KeyMismatch { key: String, expected: String },

    #[error("Hue page index {index} out of range (catalog has {len} pages)")]
    HuePageOutOfRange { index: u32, len: usize },

    #[error("Color key error: {0}")]
    Key(#[from] KeyError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error(
        "Chip at value {value_row} chroma {chroma_column} overflows {canvas_width}x{canvas_height} canvas: ({x1}, {y1}, {x2}, {y2})"
    )]
    Overflow {
        value_row: u32,
        chroma_column: u32,
        x1: i64,
        y1: i64,
        x2: i64,
        y2: i64,
        canvas_width: u32,
        canvas_height: u32,
    },

    #[error("Invalid layout geometry: {0}")]
    InvalidGeometry(String),

    #[error("Table error: {0}")]
    Table(#[from] TableError),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to allocate {width}x{height} pixmap")]
    PixmapAllocation { width: u32, height: u32 },

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Table error: {0}")]
    Table(#[from] TableError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum RecordsError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Table error: {0}")]
    Table(#[from] TableError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
