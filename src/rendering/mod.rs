pub mod hue_page;
pub mod layout;

pub use hue_page::{paint_hue_page, plan_hue_page, ChipPaint};
pub use layout::{chip_rect, PageLayout, PixelRect};
