use crate::options::DiffOptions;
use crate::record::{DiffRecord, RowStatus};
use crate::report::DiffReport;
use indexmap::{IndexMap, IndexSet};
use std::collections::HashSet;
use tabkit_table::{CellValue, JoinOptions, MergeSide, Result, Table, TableError};

/// Name of the indicator column in [`TableDiffer::combined`]; padded with
/// `_` when an input table already uses it
pub const MERGE_COLUMN: &str = "_merge";
/// Name of the status label column in [`TableDiffer::combined`]; padded
/// with `_` when the joined table already uses it
pub const STATUS_COLUMN: &str = "descr";

/// Compares two tables that share one or more key columns.
///
/// Column names on both sides are normalised with the configured cleaner,
/// rows are reconciled on the join key with a full outer join and every
/// key is classified as dropped, added, changed or unchanged. The result
/// is computed once, at construction, from private copies of the inputs.
///
/// ```
/// use tabkit_diff::{RowStatus, TableDiffer};
/// use tabkit_table::Table;
///
/// let left = Table::new(vec!["a", "b"], vec![vec![1, 4], vec![2, 5], vec![3, 6]]).unwrap();
/// let right = Table::new(vec!["a", "B", "c"], vec![vec![1, 4, 5], vec![2, 5, 6], vec![4, 1, 1]]).unwrap();
///
/// let diff = TableDiffer::new(&left, &right, &["a"]).unwrap();
/// assert_eq!(diff.new_columns().len(), 1);
/// assert_eq!(diff.status_counts()[&RowStatus::Dropped], 1);
/// ```
#[derive(Debug, Clone)]
pub struct TableDiffer {
    left: Table,
    right: Table,
    join_on: Vec<String>,
    columns_to_compare: Vec<String>,
    combined: Table,
    status_column: String,
    records: Vec<DiffRecord>,
}

impl TableDiffer {
    /// Diff two tables with the default options (trim + lowercase names,
    /// `__left` / `__right` suffixes).
    pub fn new(left: &Table, right: &Table, join_on: &[&str]) -> Result<Self> {
        Self::with_options(left, right, join_on, &DiffOptions::default())
    }

    /// Diff two tables.
    ///
    /// # Errors
    ///
    /// - `TableError::DuplicateColumnName` if cleaning makes two names equal
    /// - `TableError::JoinKeyNotFound` if a join key is missing on either side
    /// - `TableError::DuplicateKey` if a key value repeats within one side
    pub fn with_options(
        left: &Table,
        right: &Table,
        join_on: &[&str],
        options: &DiffOptions,
    ) -> Result<Self> {
        let cleaner = &options.column_cleaner;

        let mut left = left.clone();
        let mut right = right.clone();
        left.rename_columns(|name| cleaner(name))?;
        right.rename_columns(|name| cleaner(name))?;

        let join_on: Vec<String> = join_on.iter().map(|key| cleaner(*key)).collect();
        let keys: Vec<&str> = join_on.iter().map(String::as_str).collect();
        ensure_unique_keys(&left, &keys, "left")?;
        ensure_unique_keys(&right, &keys, "right")?;

        let right_names: HashSet<&str> = right.column_names()?.iter().map(String::as_str).collect();
        let columns_to_compare: Vec<String> = left
            .column_names()?
            .iter()
            .filter(|name| right_names.contains(name.as_str()) && !join_on.contains(name))
            .cloned()
            .collect();
        if columns_to_compare.is_empty() {
            tracing::warn!("no shared non-key columns; rows can only be added or dropped");
        }

        let mut combined = left.join(
            &right,
            &keys,
            &JoinOptions::full()
                .with_suffixes(&options.left_suffix, &options.right_suffix)
                .with_indicator(MERGE_COLUMN),
        )?;

        // joined layout: keys, left non-keys, right non-keys, indicator
        let left_rest = non_key_columns(&left, &keys)?;
        let right_rest = non_key_columns(&right, &keys)?;
        let merge_position = combined.col_count() - 1;
        let compare_positions: Vec<(usize, usize)> = columns_to_compare
            .iter()
            .map(|col| {
                let l = left_rest.iter().position(|name| *name == col.as_str());
                let r = right_rest.iter().position(|name| *name == col.as_str());
                match (l, r) {
                    (Some(l), Some(r)) => Ok((keys.len() + l, keys.len() + left_rest.len() + r)),
                    _ => Err(TableError::ColumnNotFound { name: col.clone() }),
                }
            })
            .collect::<Result<_>>()?;

        let mut records = Vec::with_capacity(combined.row_count());
        for row in combined.rows() {
            let side = MergeSide::from_cell(&row[merge_position]).unwrap_or(MergeSide::Both);
            let left_values: Vec<CellValue> =
                compare_positions.iter().map(|&(l, _)| row[l].clone()).collect();
            let right_values: Vec<CellValue> =
                compare_positions.iter().map(|&(_, r)| row[r].clone()).collect();

            let changes: IndexMap<String, (CellValue, CellValue)> = columns_to_compare
                .iter()
                .zip(left_values.iter().zip(&right_values))
                .filter(|(_, (l, r))| !l.same_value(r))
                .map(|(col, (l, r))| (col.clone(), (l.clone(), r.clone())))
                .collect();

            let status = classify(side, &changes);
            records.push(DiffRecord {
                key: row[..keys.len()].to_vec(),
                left: (side != MergeSide::RightOnly).then_some(left_values),
                right: (side != MergeSide::LeftOnly).then_some(right_values),
                status,
                changes,
            });
        }

        let status_column = combined.free_column_name(STATUS_COLUMN);
        let labels: Vec<CellValue> = records
            .iter()
            .map(|record| CellValue::from(record.status.label()))
            .collect();
        combined.column_append(status_column.as_str(), labels)?;

        tracing::debug!(
            keys = records.len(),
            compared_columns = columns_to_compare.len(),
            "reconciled tables"
        );

        Ok(TableDiffer {
            left,
            right,
            join_on,
            columns_to_compare,
            combined,
            status_column,
            records,
        })
    }

    /// Cleaned column names of the left table
    #[must_use]
    pub fn left_columns(&self) -> IndexSet<String> {
        column_set(&self.left)
    }

    /// Cleaned column names of the right table
    #[must_use]
    pub fn right_columns(&self) -> IndexSet<String> {
        column_set(&self.right)
    }

    /// Columns present on both sides (join keys included)
    #[must_use]
    pub fn matching_columns(&self) -> IndexSet<String> {
        let right = self.right_columns();
        self.left_columns()
            .into_iter()
            .filter(|c| right.contains(c))
            .collect()
    }

    /// Columns only present in the right table
    #[must_use]
    pub fn new_columns(&self) -> IndexSet<String> {
        let left = self.left_columns();
        self.right_columns()
            .into_iter()
            .filter(|c| !left.contains(c))
            .collect()
    }

    /// Columns only present in the left table
    #[must_use]
    pub fn missing_columns(&self) -> IndexSet<String> {
        let right = self.right_columns();
        self.left_columns()
            .into_iter()
            .filter(|c| !right.contains(c))
            .collect()
    }

    /// Cleaned join key names
    #[must_use]
    pub fn join_on(&self) -> &[String] {
        &self.join_on
    }

    /// Shared non-key columns checked for changes
    #[must_use]
    pub fn columns_to_compare(&self) -> &[String] {
        &self.columns_to_compare
    }

    /// One record per reconciled key
    #[must_use]
    pub fn records(&self) -> &[DiffRecord] {
        &self.records
    }

    /// Record for a key, if the key exists on either side
    #[must_use]
    pub fn record(&self, key: &[CellValue]) -> Option<&DiffRecord> {
        self.records.iter().find(|record| record.key == key)
    }

    /// Records that are not unchanged
    pub fn differences(&self) -> impl Iterator<Item = &DiffRecord> {
        self.records
            .iter()
            .filter(|record| record.status != RowStatus::Unchanged)
    }

    /// The joined table with suffixed value columns, the `_merge` indicator
    /// and the `descr` status label
    #[must_use]
    pub fn combined(&self) -> &Table {
        &self.combined
    }

    /// Actual name of the status label column in the combined table
    #[must_use]
    pub fn status_column(&self) -> &str {
        &self.status_column
    }

    /// Alias of [`TableDiffer::combined`]
    #[must_use]
    pub fn comparable(&self) -> &Table {
        self.combined()
    }

    /// Number of keys per status, in [`RowStatus::ALL`] order
    #[must_use]
    pub fn status_counts(&self) -> IndexMap<RowStatus, usize> {
        let mut counts: IndexMap<RowStatus, usize> =
            RowStatus::ALL.iter().map(|&status| (status, 0)).collect();
        for record in &self.records {
            *counts.entry(record.status).or_default() += 1;
        }
        counts
    }

    /// Summary of column and row differences
    #[must_use]
    pub fn report(&self) -> DiffReport {
        DiffReport {
            removed_columns: self.missing_columns().into_iter().collect(),
            added_columns: self.new_columns().into_iter().collect(),
            matching_columns: self.matching_columns().into_iter().collect(),
            rows: self.status_counts(),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self) {
        println!("{}", self.report());
    }
}

/// Diff two tables on `join_on` and keep only the joined rows that are not
/// unchanged.
pub fn create_diff(left: &Table, right: &Table, join_on: &[&str]) -> Result<Table> {
    let differ = TableDiffer::new(left, right, join_on)?;
    let status_position = differ.combined.column_position(&differ.status_column)?;
    let unchanged = CellValue::from(RowStatus::Unchanged.label());

    let mut diff = differ.combined;
    diff.filter_rows(|row| row[status_position] != unchanged);
    Ok(diff)
}

fn classify(side: MergeSide, changes: &IndexMap<String, (CellValue, CellValue)>) -> RowStatus {
    match side {
        MergeSide::LeftOnly => RowStatus::Dropped,
        MergeSide::RightOnly => RowStatus::Added,
        MergeSide::Both if !changes.is_empty() => RowStatus::Changed,
        MergeSide::Both => RowStatus::Unchanged,
    }
}

fn non_key_columns<'t>(table: &'t Table, keys: &[&str]) -> Result<Vec<&'t str>> {
    Ok(table
        .column_names()?
        .iter()
        .map(String::as_str)
        .filter(|name| !keys.contains(name))
        .collect())
}

fn column_set(table: &Table) -> IndexSet<String> {
    table
        .column_names()
        .map(|names| names.iter().cloned().collect())
        .unwrap_or_default()
}

fn ensure_unique_keys(table: &Table, keys: &[&str], side: &str) -> Result<()> {
    let positions: Vec<usize> = keys
        .iter()
        .map(|key| {
            table
                .column_position(key)
                .map_err(|_| TableError::JoinKeyNotFound {
                    key: (*key).to_string(),
                    side: side.to_string(),
                })
        })
        .collect::<Result<_>>()?;

    let mut seen = HashSet::with_capacity(table.row_count());
    for row in table.rows() {
        let key: Vec<String> = positions.iter().map(|&p| row[p].key()).collect();
        if !seen.insert(key) {
            let shown: Vec<String> = positions.iter().map(|&p| row[p].to_string()).collect();
            return Err(TableError::DuplicateKey {
                key: format!("({})", shown.join(", ")),
                side: side.to_string(),
            });
        }
    }
    Ok(())
}
