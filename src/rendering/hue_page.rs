//! Per-page chip placement and rasterization.

use tiny_skia::{Paint, Pixmap, Rect, Transform};

use crate::error::RenderError;
use crate::models::{ChipRecord, Rgb};
use crate::rendering::layout::{PageLayout, PixelRect};
use crate::table::ChipTable;

/// One chip ready to be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipPaint {
    pub rect: PixelRect,
    pub rgb: Rgb,
    pub color_key: Option<String>,
    pub value_row: u32,
    pub chroma_column: u32,
}

impl ChipPaint {
    fn from_record(record: &ChipRecord, layout: &PageLayout) -> Result<Self, RenderError> {
        Ok(Self {
            rect: layout.chip_rect(record.value_row, record.chroma_column)?,
            rgb: record.rgb(),
            color_key: record.color_key.clone(),
            value_row: record.value_row,
            chroma_column: record.chroma_column,
        })
    }
}

/// Rectangles and colors for every chip of one hue page, in table order.
pub fn plan_hue_page(
    table: &ChipTable,
    hue_page_index: u32,
    layout: &PageLayout,
) -> Result<Vec<ChipPaint>, RenderError> {
    let page = table.hue_page(hue_page_index)?;
    page.records()
        .map(|record| ChipPaint::from_record(record, layout))
        .collect()
}

/// Paint chips as opaque squares on a transparent canvas.
pub fn paint_hue_page(chips: &[ChipPaint], layout: &PageLayout) -> Result<Pixmap, RenderError> {
    let (width, height) = (layout.canvas_width, layout.canvas_height);
    let mut pixmap =
        Pixmap::new(width, height).ok_or(RenderError::PixmapAllocation { width, height })?;

    let mut paint = Paint::default();
    paint.anti_alias = false;

    for chip in chips {
        let PixelRect { x1, y1, x2, y2 } = chip.rect;
        // Zero-sized rects are rejected by tiny-skia; nothing to draw
        let Some(rect) = Rect::from_ltrb(x1 as f32, y1 as f32, x2 as f32, y2 as f32) else {
            continue;
        };
        paint.set_color_rgba8(chip.rgb.r, chip.rgb.g, chip.rgb.b, 255);
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    tracing::debug!(chips = chips.len(), width, height, "Painted hue page");
    Ok(pixmap)
}
