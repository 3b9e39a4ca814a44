pub mod aggregator;
pub mod records;

pub use aggregator::{aggregate, aggregate_by_hue_page, aggregate_with_summary, AggregateSummary};
