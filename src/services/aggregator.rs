//! Collapses duplicate samples of the same logical chip into one record.
//!
//! Records are grouped by composite color key (computed when absent,
//! checked against the coordinate when present) and each group's color is
//! the per-channel floor of the mean. Groups are emitted in the order their
//! key was first seen, so a table that is already canonical comes back
//! unchanged.

use std::collections::{BTreeMap, HashMap};

use crate::error::TableError;
use crate::models::{ChipRecord, Rgb};
use crate::table::{ChipTable, Column};

/// Counts reported for one aggregation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AggregateSummary {
    pub input_rows: usize,
    pub output_rows: usize,
    /// Groups that held more than one sample
    pub merged_groups: usize,
}

struct Group {
    first: ChipRecord,
    key: String,
    sums: [u64; 3],
    count: u64,
}

impl Group {
    fn new(record: &ChipRecord, key: String) -> Self {
        Self {
            first: record.clone(),
            key,
            sums: [0; 3],
            count: 0,
        }
    }

    fn add(&mut self, rgb: Rgb) {
        self.sums[0] += rgb.r as u64;
        self.sums[1] += rgb.g as u64;
        self.sums[2] += rgb.b as u64;
        self.count += 1;
    }

    fn mean(&self, channel: usize) -> u8 {
        (self.sums[channel] as f64 / self.count as f64).floor() as u8
    }

    fn into_record(self) -> ChipRecord {
        let rgb = Rgb::new(self.mean(0), self.mean(1), self.mean(2));
        ChipRecord {
            color_key: Some(self.key),
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
            ..self.first
        }
    }
}

fn reduce<'a>(
    records: impl IntoIterator<Item = &'a ChipRecord>,
    summary: &mut AggregateSummary,
) -> Result<Vec<ChipRecord>, TableError> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();

    for record in records {
        let key = record.canonical_key()?;
        let position = match positions.get(&key) {
            Some(&p) => p,
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push(Group::new(record, key));
                groups.len() - 1
            }
        };
        groups[position].add(record.rgb());
        summary.input_rows += 1;
    }

    summary.merged_groups += groups.iter().filter(|g| g.count > 1).count();
    summary.output_rows += groups.len();
    Ok(groups.into_iter().map(Group::into_record).collect())
}

fn output_table(source: &ChipTable, records: Vec<ChipRecord>) -> ChipTable {
    let mut columns = source.columns().to_vec();
    if !columns.is_empty() && !columns.contains(&Column::ColorKey) {
        columns.push(Column::ColorKey);
    }
    let mut table = ChipTable::with_columns(&columns);
    for record in records {
        table.push(record);
    }
    table
}

fn require_coordinates(table: &ChipTable) -> Result<(), TableError> {
    [Column::HuePageIndex, Column::ValueRow, Column::ChromaColumn]
        .into_iter()
        .find(|c| !table.is_empty() && !table.has_column(*c))
        .map_or(Ok(()), |c| Err(TableError::UnknownColumn(c.name().to_string())))
}

/// Aggregate a table into its canonical form, one record per color key.
pub fn aggregate(table: &ChipTable) -> Result<ChipTable, TableError> {
    aggregate_with_summary(table).map(|(table, _)| table)
}

pub fn aggregate_with_summary(
    table: &ChipTable,
) -> Result<(ChipTable, AggregateSummary), TableError> {
    require_coordinates(table)?;

    let mut summary = AggregateSummary::default();
    let records = reduce(table.records(), &mut summary)?;

    tracing::debug!(
        input_rows = summary.input_rows,
        output_rows = summary.output_rows,
        merged_groups = summary.merged_groups,
        "Aggregated chip table"
    );
    Ok((output_table(table, records), summary))
}

/// Aggregate each hue page independently and concatenate the pages in
/// ascending page order. A key never spans two pages, so the result holds
/// the same records as [`aggregate`].
pub fn aggregate_by_hue_page(
    table: &ChipTable,
) -> Result<(ChipTable, AggregateSummary), TableError> {
    require_coordinates(table)?;

    let mut pages: BTreeMap<u32, Vec<&ChipRecord>> = BTreeMap::new();
    for record in table.records() {
        pages.entry(record.hue_page_index).or_default().push(record);
    }

    let mut summary = AggregateSummary::default();
    let mut records = Vec::with_capacity(table.len());
    for (page, page_records) in pages {
        let reduced = reduce(page_records, &mut summary)?;
        tracing::trace!(page, chips = reduced.len(), "Aggregated hue page");
        records.extend(reduced);
    }

    Ok((output_table(table, records), summary))
}
