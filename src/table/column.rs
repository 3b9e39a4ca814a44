//! Column names, declared column types and loosely typed cell values.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// Declared storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int,
    Text,
}

/// One column of a chip table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    HuePageIndex,
    HuePageName,
    ValueRow,
    ChromaColumn,
    ColorKey,
    R,
    G,
    B,
}

impl Column {
    /// The standard column set, in table order.
    pub const ALL: [Column; 8] = [
        Column::HuePageIndex,
        Column::HuePageName,
        Column::ValueRow,
        Column::ChromaColumn,
        Column::ColorKey,
        Column::R,
        Column::G,
        Column::B,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Column::HuePageIndex => "hue_page_index",
            Column::HuePageName => "hue_page_name",
            Column::ValueRow => "value_row",
            Column::ChromaColumn => "chroma_column",
            Column::ColorKey => "color_key",
            Column::R => "r",
            Column::G => "g",
            Column::B => "b",
        }
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::HuePageName | Column::ColorKey => ColumnType::Text,
            _ => ColumnType::Int,
        }
    }

    /// Integer columns must hold a value on every row.
    pub fn is_required(&self) -> bool {
        self.column_type() == ColumnType::Int
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or_else(|| TableError::UnknownColumn(s.to_string()))
    }
}

/// Direction of one sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// A single cell as seen by filters, `max` and raw ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CellValue {
    #[default]
    Missing,
    Int(i64),
    Text(String),
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            CellValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Coerce to an integer: integers pass through, decimal text is parsed.
    pub fn coerce_int(&self, column: Column) -> Result<Option<i64>, TableError> {
        match self {
            CellValue::Missing => Ok(None),
            CellValue::Int(v) => Ok(Some(*v)),
            CellValue::Text(s) => s.trim().parse::<i64>().map(Some).map_err(|_| {
                TableError::TypeCoercion {
                    column,
                    reason: format!("{s:?} is not an integer"),
                }
            }),
        }
    }

    /// Coerce to text: integers are stringified.
    pub fn coerce_text(&self) -> Option<String> {
        match self {
            CellValue::Missing => None,
            CellValue::Int(v) => Some(v.to_string()),
            CellValue::Text(s) => Some(s.clone()),
        }
    }

    /// Total order used by sorting: missing values sort last in either
    /// direction, integers before text.
    pub(crate) fn sort_cmp(&self, other: &Self, order: SortOrder) -> Ordering {
        let directed = |o: Ordering| match order {
            SortOrder::Asc => o,
            SortOrder::Desc => o.reverse(),
        };
        match (self, other) {
            (CellValue::Missing, CellValue::Missing) => Ordering::Equal,
            (CellValue::Missing, _) => Ordering::Greater,
            (_, CellValue::Missing) => Ordering::Less,
            (CellValue::Int(a), CellValue::Int(b)) => directed(a.cmp(b)),
            (CellValue::Text(a), CellValue::Text(b)) => directed(a.cmp(b)),
            (CellValue::Int(_), CellValue::Text(_)) => directed(Ordering::Less),
            (CellValue::Text(_), CellValue::Int(_)) => directed(Ordering::Greater),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Missing => write!(f, "None"),
            CellValue::Int(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Int(v as i64)
    }
}

impl From<u32> for CellValue {
    fn from(v: u32) -> Self {
        CellValue::Int(v as i64)
    }
}

impl From<u8> for CellValue {
    fn from(v: u8) -> Self {
        CellValue::Int(v as i64)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Missing)
    }
}

impl TryFrom<serde_json::Value> for CellValue {
    type Error = String;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value;

        match value {
            Value::Null => Ok(CellValue::Missing),
            Value::String(s) => Ok(CellValue::Text(s)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(CellValue::Int(i))
                } else {
                    match n.as_f64() {
                        // Spreadsheet exports write whole numbers as floats
                        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                            Ok(CellValue::Int(f as i64))
                        }
                        _ => Err(format!("{n} is not an integer")),
                    }
                }
            }
            other => Err(format!("unsupported cell value {other}")),
        }
    }
}
