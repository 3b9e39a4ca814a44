pub mod chip_table;
pub mod color_key;
pub mod column;

pub use chip_table::ChipTable;
pub use color_key::{ChipCoord, DecodedKey};
pub use column::{CellValue, Column, ColumnType, SortOrder};
