pub mod catalog;
pub mod chip;
pub mod config;

pub use catalog::{HueCatalog, HUE_PAGE_NAMES};
pub use chip::{ChipRecord, RawChip, Rgb};
pub use config::{AppConfig, LayoutConfig};
