use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{KeyError, TableError};
use crate::models::HueCatalog;
use crate::table::color_key::{self, ChipCoord};
use crate::table::{CellValue, Column};

/// 8-bit sRGB triple of a chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.r, self.g, self.b)
    }
}

/// One color sample at a hue page / value row / chroma column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChipRecord {
    pub hue_page_index: u32,
    #[serde(default)]
    pub hue_page_name: Option<String>,
    pub value_row: u32,
    pub chroma_column: u32,
    #[serde(default)]
    pub color_key: Option<String>,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ChipRecord {
    pub fn new(coord: ChipCoord, rgb: Rgb) -> Self {
        Self {
            hue_page_index: coord.hue_page_index,
            hue_page_name: None,
            value_row: coord.value_row,
            chroma_column: coord.chroma_column,
            color_key: None,
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.hue_page_name = Some(name.into());
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.color_key = Some(key.into());
        self
    }

    pub fn coord(&self) -> ChipCoord {
        ChipCoord::new(self.hue_page_index, self.value_row, self.chroma_column)
    }

    pub fn rgb(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Codec encoding of this record's coordinate.
    pub fn encoded_key(&self) -> Result<String, KeyError> {
        color_key::encode(self.coord())
    }

    /// The record's key, computed if absent and checked against the
    /// coordinate if present.
    pub fn canonical_key(&self) -> Result<String, TableError> {
        let expected = self.encoded_key()?;
        match &self.color_key {
            Some(key) if *key != expected => Err(TableError::KeyMismatch {
                key: key.clone(),
                expected,
            }),
            _ => Ok(expected),
        }
    }

    pub fn cell(&self, column: Column) -> CellValue {
        match column {
            Column::HuePageIndex => self.hue_page_index.into(),
            Column::HuePageName => self.hue_page_name.clone().into(),
            Column::ValueRow => self.value_row.into(),
            Column::ChromaColumn => self.chroma_column.into(),
            Column::ColorKey => self.color_key.clone().into(),
            Column::R => self.r.into(),
            Column::G => self.g.into(),
            Column::B => self.b.into(),
        }
    }

    /// Coerce a raw record to the declared column types.
    ///
    /// Returns `Ok(None)` for a record with no values at all. Missing
    /// coordinates are recovered from a present color key; any integer
    /// column still missing after that is a `TypeCoercion` error, while
    /// missing text columns are kept as `None`. Value rows start at 1 and
    /// chroma columns at 2. Odd chroma columns above that are kept and
    /// share the grid cell of the even column below.
    pub fn from_raw(raw: &RawChip) -> Result<Option<Self>, TableError> {
        Self::from_raw_columns(raw, &Column::ALL)
    }

    /// Like [`ChipRecord::from_raw`] for a table declaring only `columns`.
    ///
    /// Undeclared columns are not read: integers take 0 and text is `None`.
    pub fn from_raw_columns(raw: &RawChip, columns: &[Column]) -> Result<Option<Self>, TableError> {
        if raw.is_empty() {
            return Ok(None);
        }

        let declared = |column: Column| columns.contains(&column);
        let text = |column: Column| {
            if declared(column) {
                raw.get(column).coerce_text()
            } else {
                None
            }
        };
        let int = |column: Column| {
            if declared(column) {
                raw.get(column).coerce_int(column)
            } else {
                Ok(None)
            }
        };

        let hue_page_name = text(Column::HuePageName);
        let color_key = text(Column::ColorKey);

        let mut hue_page_index = int(Column::HuePageIndex)?;
        let mut value_row = int(Column::ValueRow)?;
        let mut chroma_column = int(Column::ChromaColumn)?;

        if hue_page_index.is_none() || value_row.is_none() || chroma_column.is_none() {
            if let Some(key) = &color_key {
                let decoded = color_key::decode(key)?;
                hue_page_index = hue_page_index.or(decoded.hue_page_index.map(i64::from));
                value_row = value_row.or(decoded.value_row.map(i64::from));
                chroma_column = chroma_column.or(decoded.chroma_column.map(i64::from));
            }
        }

        let coordinate = |column: Column, value: Option<i64>, min: u32| {
            if declared(column) {
                required_u32(column, value, min)
            } else {
                Ok(0)
            }
        };
        let channel = |column: Column| -> Result<u8, TableError> {
            if declared(column) {
                required_u8(column, int(column)?)
            } else {
                Ok(0)
            }
        };

        Ok(Some(Self {
            hue_page_index: coordinate(Column::HuePageIndex, hue_page_index, 0)?,
            hue_page_name,
            value_row: coordinate(Column::ValueRow, value_row, 1)?,
            chroma_column: coordinate(Column::ChromaColumn, chroma_column, 2)?,
            color_key,
            r: channel(Column::R)?,
            g: channel(Column::G)?,
            b: channel(Column::B)?,
        }))
    }
}

fn required(column: Column, value: Option<i64>) -> Result<i64, TableError> {
    value.ok_or_else(|| TableError::TypeCoercion {
        column,
        reason: "missing value".to_string(),
    })
}

fn required_u32(column: Column, value: Option<i64>, min: u32) -> Result<u32, TableError> {
    let value = required(column, value)?;
    match u32::try_from(value) {
        Ok(v) if v >= min => Ok(v),
        _ => Err(TableError::TypeCoercion {
            column,
            reason: format!("{value} is out of range (minimum {min})"),
        }),
    }
}

fn required_u8(column: Column, value: Option<i64>) -> Result<u8, TableError> {
    let value = required(column, value)?;
    u8::try_from(value).map_err(|_| TableError::TypeCoercion {
        column,
        reason: format!("{value} is outside 0..=255"),
    })
}

/// A loosely typed chip record as delivered by an ingestion adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<String, serde_json::Value>")]
pub struct RawChip {
    fields: BTreeMap<Column, CellValue>,
}

impl RawChip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: Column, value: impl Into<CellValue>) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: Column, value: impl Into<CellValue>) {
        self.fields.insert(column, value.into());
    }

    pub fn get(&self, column: Column) -> CellValue {
        self.fields.get(&column).cloned().unwrap_or_default()
    }

    /// True when no column holds a value.
    pub fn is_empty(&self) -> bool {
        self.fields.values().all(CellValue::is_missing)
    }

    /// Fill a missing hue page index from the name, or a missing name from
    /// the index, using the catalog.
    pub fn resolve_hue_page(&mut self, catalog: &HueCatalog) -> Result<(), TableError> {
        let index = self.get(Column::HuePageIndex);
        let name = self.get(Column::HuePageName);

        match (index.is_missing(), name.coerce_text()) {
            (true, Some(name)) => {
                if let Some(i) = catalog.index_of(&name) {
                    self.set(Column::HuePageIndex, i);
                }
            }
            (false, None) => {
                if let Some(i) = index.coerce_int(Column::HuePageIndex)? {
                    let i = u32::try_from(i).map_err(|_| TableError::TypeCoercion {
                        column: Column::HuePageIndex,
                        reason: format!("{i} is out of range"),
                    })?;
                    let page_name = catalog.check(i)?.to_string();
                    self.set(Column::HuePageName, page_name);
                }
            }
            _ => {}
        }
        Ok(())
    }
}

impl From<&ChipRecord> for RawChip {
    fn from(record: &ChipRecord) -> Self {
        let mut raw = RawChip::new();
        for column in Column::ALL {
            raw.set(column, record.cell(column));
        }
        raw
    }
}

impl TryFrom<BTreeMap<String, serde_json::Value>> for RawChip {
    type Error = TableError;

    fn try_from(map: BTreeMap<String, serde_json::Value>) -> Result<Self, Self::Error> {
        let mut raw = RawChip::new();
        for (name, value) in map {
            let column: Column = name.parse()?;
            let cell = CellValue::try_from(value)
                .map_err(|reason| TableError::TypeCoercion { column, reason })?;
            raw.set(column, cell);
        }
        Ok(raw)
    }
}
