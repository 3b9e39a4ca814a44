//! Grid layout of chips on a hue page.
//!
//! Value rows are 1-based and chroma columns step by 2, so the chip at
//! value `v`, chroma `c` sits in grid cell `(c / 2 - 1, v - 1)`. Every cell
//! is `chip_size` square with `gap` between cells and `gap / 2` margin.

use crate::error::LayoutError;
use crate::models::LayoutConfig;
use crate::table::{ChipTable, Column};

/// Pixel rectangle of one chip, `x2 = x1 + chip_size`, `y2 = y1 + chip_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl PixelRect {
    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }
}

/// Rectangle for the chip at `(value_row, chroma_column)`.
///
/// Fails with [`LayoutError::Overflow`] when the rectangle leaves the
/// `gap / 2` margin of the canvas on any side.
pub fn chip_rect(
    value_row: u32,
    chroma_column: u32,
    chip_size: u32,
    gap: u32,
    canvas_width: u32,
    canvas_height: u32,
) -> Result<PixelRect, LayoutError> {
    let half = i64::from(gap / 2);
    let pitch = i64::from(chip_size) + i64::from(gap);
    let row_idx = i64::from(value_row) - 1;
    let col_idx = i64::from(chroma_column / 2) - 1;

    let x1 = half + col_idx * pitch;
    let y1 = half + row_idx * pitch;
    let x2 = x1 + i64::from(chip_size);
    let y2 = y1 + i64::from(chip_size);

    let fits = half <= x1
        && half <= y1
        && x2 <= i64::from(canvas_width) - half
        && y2 <= i64::from(canvas_height) - half;

    if !fits {
        return Err(LayoutError::Overflow {
            value_row,
            chroma_column,
            x1,
            y1,
            x2,
            y2,
            canvas_width,
            canvas_height,
        });
    }

    // All four are within 0..=canvas size here
    Ok(PixelRect {
        x1: x1 as u32,
        y1: y1 as u32,
        x2: x2 as u32,
        y2: y2 as u32,
    })
}

/// Chip geometry plus the canvas it is laid out on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub chip_size: u32,
    pub chip_gap: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl PageLayout {
    /// Canvas big enough for `max_chroma_column / 2` columns and
    /// `max_value_row` rows.
    pub fn new(
        config: &LayoutConfig,
        max_value_row: u32,
        max_chroma_column: u32,
    ) -> Result<Self, LayoutError> {
        config.validate()?;
        let pitch = config.pitch()?;
        let overflow = || LayoutError::InvalidGeometry("canvas size overflows u32".to_string());

        Ok(Self {
            chip_size: config.chip_size,
            chip_gap: config.chip_gap,
            canvas_width: (max_chroma_column / 2).checked_mul(pitch).ok_or_else(overflow)?,
            canvas_height: max_value_row.checked_mul(pitch).ok_or_else(overflow)?,
        })
    }

    /// Size the canvas from the table's own maximum value row and chroma
    /// column. Fails on a table without rows.
    pub fn for_table(table: &ChipTable, config: &LayoutConfig) -> Result<Self, LayoutError> {
        let max_value_row = clamp_u32(table.max(Column::ValueRow)?);
        let max_chroma_column = clamp_u32(table.max(Column::ChromaColumn)?);
        let layout = Self::new(config, max_value_row, max_chroma_column)?;
        tracing::debug!(
            max_value_row,
            max_chroma_column,
            width = layout.canvas_width,
            height = layout.canvas_height,
            "Computed page layout"
        );
        Ok(layout)
    }

    pub fn chip_rect(&self, value_row: u32, chroma_column: u32) -> Result<PixelRect, LayoutError> {
        chip_rect(
            value_row,
            chroma_column,
            self.chip_size,
            self.chip_gap,
            self.canvas_width,
            self.canvas_height,
        )
    }
}

fn clamp_u32(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}
