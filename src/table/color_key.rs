//! Composite color key codec.
//!
//! A chip is identified by `HH-VV-CC`: hue page index, value row and chroma
//! column, each as a zero-padded two digit decimal field. Keys produced by
//! other tools may carry the literal `None` for an unknown coordinate.

use crate::error::KeyError;

/// Field separator inside a color key.
pub const SEPARATOR: char = '-';

/// Literal used for an unknown coordinate.
pub const NONE_FIELD: &str = "None";

/// Largest coordinate that fits one key field.
pub const MAX_FIELD: u32 = 99;

/// Fully known logical coordinate of a chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChipCoord {
    pub hue_page_index: u32,
    pub value_row: u32,
    pub chroma_column: u32,
}

impl ChipCoord {
    pub fn new(hue_page_index: u32, value_row: u32, chroma_column: u32) -> Self {
        Self {
            hue_page_index,
            value_row,
            chroma_column,
        }
    }
}

/// Decoded key where any coordinate may be unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodedKey {
    pub hue_page_index: Option<u32>,
    pub value_row: Option<u32>,
    pub chroma_column: Option<u32>,
}

impl DecodedKey {
    /// Returns the coordinate if no field was `None`.
    pub fn complete(&self) -> Option<ChipCoord> {
        Some(ChipCoord::new(
            self.hue_page_index?,
            self.value_row?,
            self.chroma_column?,
        ))
    }
}

impl From<ChipCoord> for DecodedKey {
    fn from(coord: ChipCoord) -> Self {
        Self {
            hue_page_index: Some(coord.hue_page_index),
            value_row: Some(coord.value_row),
            chroma_column: Some(coord.chroma_column),
        }
    }
}

fn check_field(field: &'static str, value: u32) -> Result<u32, KeyError> {
    if value > MAX_FIELD {
        return Err(KeyError::EncodingRange { field, value });
    }
    Ok(value)
}

/// Encode a coordinate as `HH-VV-CC`.
pub fn encode(coord: ChipCoord) -> Result<String, KeyError> {
    let h = check_field("hue_page_index", coord.hue_page_index)?;
    let v = check_field("value_row", coord.value_row)?;
    let c = check_field("chroma_column", coord.chroma_column)?;
    Ok(format!("{h:02}{SEPARATOR}{v:02}{SEPARATOR}{c:02}"))
}

/// Decode a key into its three coordinates.
///
/// Fields are parsed as plain integers, so keys written with other padding
/// (`9-1-2`) decode as well; only `encode`'s own output is guaranteed to
/// round-trip back to the same string.
pub fn decode(key: &str) -> Result<DecodedKey, KeyError> {
    let fields: Vec<&str> = key.split(SEPARATOR).collect();
    if fields.len() != 3 {
        return Err(KeyError::MalformedKey {
            key: key.to_string(),
            found: fields.len(),
        });
    }

    let parse = |field: &str| -> Result<Option<u32>, KeyError> {
        let field = field.trim();
        if field == NONE_FIELD {
            return Ok(None);
        }
        field
            .parse::<u32>()
            .map(Some)
            .map_err(|_| KeyError::InvalidField {
                key: key.to_string(),
                field: field.to_string(),
            })
    };

    Ok(DecodedKey {
        hue_page_index: parse(fields[0])?,
        value_row: parse(fields[1])?,
        chroma_column: parse(fields[2])?,
    })
}
