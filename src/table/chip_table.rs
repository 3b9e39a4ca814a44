//! Owned, ordered table of chip records.
//!
//! Mutators (`append`, `push`, `remove`, `drop_column`, `reset_index`,
//! `assign_color_keys`) change the table in place and commit nothing when
//! they fail. Queries (`filter`, `sort`, `hue_page`) return a new table.

use std::collections::HashSet;

use crate::error::TableError;
use crate::models::{ChipRecord, HueCatalog, RawChip, Rgb};
use crate::table::{CellValue, Column, ColumnType, SortOrder};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Row {
    index: usize,
    record: ChipRecord,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipTable {
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl ChipTable {
    /// Empty table declaring the standard column set.
    pub fn new() -> Self {
        Self::with_columns(&Column::ALL)
    }

    /// Empty table with no declared columns.
    pub fn without_columns() -> Self {
        Self::with_columns(&[])
    }

    pub fn with_columns(columns: &[Column]) -> Self {
        let mut declared = Vec::with_capacity(columns.len());
        for c in columns {
            if !declared.contains(c) {
                declared.push(*c);
            }
        }
        Self {
            columns: declared,
            rows: Vec::new(),
        }
    }

    pub fn from_records(records: impl IntoIterator<Item = ChipRecord>) -> Self {
        let mut table = Self::new();
        for record in records {
            table.push(record);
        }
        table
    }

    pub fn from_raw(rows: &[RawChip]) -> Result<Self, TableError> {
        let mut table = Self::new();
        table.append(rows)?;
        Ok(table)
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    pub fn records(&self) -> impl Iterator<Item = &ChipRecord> {
        self.rows.iter().map(|row| &row.record)
    }

    pub fn get(&self, position: usize) -> Option<&ChipRecord> {
        self.rows.get(position).map(|row| &row.record)
    }

    /// Row index labels. Contiguous from 0 unless rows were removed without
    /// re-indexing, or the table is a filtered slice.
    pub fn index_labels(&self) -> Vec<usize> {
        self.rows.iter().map(|row| row.index).collect()
    }

    fn require(&self, column: Column) -> Result<(), TableError> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(TableError::UnknownColumn(column.name().to_string()))
        }
    }

    /// One past the largest label in use, whatever the row order.
    fn next_index(&self) -> usize {
        self.rows.iter().map(|row| row.index + 1).max().unwrap_or(0)
    }

    fn declare_standard_columns(&mut self) {
        if self.columns.is_empty() {
            self.columns = Column::ALL.to_vec();
        }
    }

    /// Append an already typed record.
    pub fn push(&mut self, record: ChipRecord) {
        self.declare_standard_columns();
        let index = self.next_index();
        self.rows.push(Row { index, record });
    }

    /// Coerce and append raw records, returning how many rows were added.
    ///
    /// Fully empty records add nothing. If any record fails coercion the
    /// table is left unchanged.
    pub fn append(&mut self, rows: &[RawChip]) -> Result<usize, TableError> {
        let mut coerced = Vec::with_capacity(rows.len());
        for raw in rows {
            if let Some(record) = ChipRecord::from_raw(raw)? {
                coerced.push(record);
            }
        }

        let added = coerced.len();
        for record in coerced {
            self.push(record);
        }
        tracing::debug!(added, skipped = rows.len() - added, "Appended chip rows");
        Ok(added)
    }

    fn matches(record: &ChipRecord, filters: &[(Column, CellValue)]) -> bool {
        filters
            .iter()
            .all(|(column, value)| record.cell(*column) == *value)
    }

    fn check_filters(&self, filters: &[(Column, CellValue)]) -> Result<(), TableError> {
        filters.iter().try_for_each(|(column, _)| self.require(*column))
    }

    /// Rows matching every `column == value` constraint. Index labels of the
    /// source are kept.
    pub fn filter(&self, filters: &[(Column, CellValue)]) -> Result<ChipTable, TableError> {
        self.check_filters(filters)?;
        Ok(Self {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| Self::matches(&row.record, filters))
                .cloned()
                .collect(),
        })
    }

    /// Delete every row matching all constraints, returning the number
    /// removed. With `reindex` the remaining rows are relabelled from 0.
    pub fn remove(
        &mut self,
        filters: &[(Column, CellValue)],
        reindex: bool,
    ) -> Result<usize, TableError> {
        self.check_filters(filters)?;
        let before = self.rows.len();
        self.rows.retain(|row| !Self::matches(&row.record, filters));
        let removed = before - self.rows.len();
        if reindex {
            self.reset_index();
        }
        tracing::debug!(removed, remaining = self.rows.len(), "Removed chip rows");
        Ok(removed)
    }

    pub fn reset_index(&mut self) {
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.index = i;
        }
    }

    /// Stable multi-column sort; the first key is primary.
    pub fn sort(&self, keys: &[(Column, SortOrder)]) -> Result<ChipTable, TableError> {
        keys.iter().try_for_each(|(column, _)| self.require(*column))?;

        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| {
            keys.iter()
                .map(|(column, order)| {
                    a.record
                        .cell(*column)
                        .sort_cmp(&b.record.cell(*column), *order)
                })
                .find(|o| o.is_ne())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(Self {
            columns: self.columns.clone(),
            rows,
        })
    }

    /// Maximum of an integer column. Fails with `EmptyColumn` on a table
    /// without rows.
    pub fn max(&self, column: Column) -> Result<i64, TableError> {
        self.require(column)?;
        if column.column_type() != ColumnType::Int {
            return Err(TableError::NotNumeric(column));
        }
        self.records()
            .filter_map(|r| r.cell(column).as_int())
            .max()
            .ok_or(TableError::EmptyColumn(column))
    }

    /// Distinct values of a column in first-seen order.
    pub fn unique_values(&self, column: Column) -> Result<Vec<CellValue>, TableError> {
        self.require(column)?;
        let mut seen = HashSet::new();
        Ok(self
            .records()
            .map(|r| r.cell(column))
            .filter(|v| seen.insert(v.clone()))
            .collect())
    }

    pub fn drop_column(&mut self, column: Column) -> Result<(), TableError> {
        self.require(column)?;
        self.columns.retain(|c| *c != column);
        Ok(())
    }

    /// True when the coordinate columns needed to encode a color key are
    /// all declared.
    pub fn has_encodable_coordinates(&self) -> bool {
        [Column::HuePageIndex, Column::ValueRow, Column::ChromaColumn]
            .iter()
            .all(|c| self.has_column(*c))
    }

    /// Overwrite every row's color key with its encoded coordinate.
    pub fn assign_color_keys(&mut self) -> Result<(), TableError> {
        let keys = self
            .records()
            .map(|r| r.encoded_key())
            .collect::<Result<Vec<_>, _>>()?;

        for (row, key) in self.rows.iter_mut().zip(keys) {
            row.record.color_key = Some(key);
        }
        if !self.has_column(Column::ColorKey) {
            self.columns.push(Column::ColorKey);
        }
        Ok(())
    }

    pub fn rgb_tuples(&self) -> Vec<Rgb> {
        self.records().map(ChipRecord::rgb).collect()
    }

    /// Slice holding only the given hue page.
    pub fn hue_page(&self, hue_page_index: u32) -> Result<ChipTable, TableError> {
        self.filter(&[(Column::HuePageIndex, hue_page_index.into())])
    }

    /// Fail on the first row whose hue page index is outside the catalog.
    pub fn check_hue_pages(&self, catalog: &HueCatalog) -> Result<(), TableError> {
        self.records()
            .try_for_each(|r| catalog.check(r.hue_page_index).map(|_| ()))
    }
}

impl Default for ChipTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<ChipRecord> for ChipTable {
    fn from_iter<I: IntoIterator<Item = ChipRecord>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}
