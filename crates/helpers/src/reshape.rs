//! Header collapsing and wide-to-long reshaping

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;
use tabkit_table::{Aggregation, CellValue, Header, Result, Table, TableError};

/// Function that folds the values of one group into a single cell
pub type AggFn = Arc<dyn Fn(&[CellValue]) -> CellValue + Send + Sync>;

/// Default aggregation: collect the values into a list, in order
#[must_use]
pub fn collect_list(values: &[CellValue]) -> CellValue {
    CellValue::List(values.to_vec())
}

/// Options for [`squish`].
#[derive(Clone)]
pub struct SquishOptions {
    /// Separator between the group name and the suffix in column names
    pub col_sep: String,
    pub agg: AggFn,
}

impl Default for SquishOptions {
    fn default() -> Self {
        SquishOptions {
            col_sep: "_".to_string(),
            agg: Arc::new(collect_list),
        }
    }
}

impl SquishOptions {
    /// Set the column name separator
    #[must_use]
    pub fn with_separator(mut self, sep: &str) -> Self {
        self.col_sep = sep.to_string();
        self
    }

    /// Use a custom aggregation function
    #[must_use]
    pub fn with_agg<F>(mut self, agg: F) -> Self
    where
        F: Fn(&[CellValue]) -> CellValue + Send + Sync + 'static,
    {
        self.agg = Arc::new(agg);
        self
    }

    /// Aggregate with one of the built-in statistics
    #[must_use]
    pub fn with_aggregation(self, aggregation: Aggregation) -> Self {
        self.with_agg(move |values| {
            let refs: Vec<&CellValue> = values.iter().collect();
            aggregation.apply(&refs)
        })
    }
}

impl fmt::Debug for SquishOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SquishOptions")
            .field("col_sep", &self.col_sep)
            .finish_non_exhaustive()
    }
}

/// Collapse a two-level column header into flat names joined by `sep`.
///
/// The row index (typically group keys from [`Table::aggregate`]) becomes
/// the leading columns; without one, an `index` column of row positions is
/// added.
///
/// # Errors
///
/// - `TableError::NotHierarchical` for a flat header
/// - `TableError::HeaderDepth` when the header does not have exactly two levels
pub fn collapse_multiindex(table: &Table, sep: &str) -> Result<Table> {
    let Header::Nested(paths) = table.header() else {
        return Err(TableError::NotHierarchical);
    };
    let depth = table.header().depth();
    if depth != 2 {
        return Err(TableError::HeaderDepth {
            expected: 2,
            found: depth,
        });
    }

    let names: Vec<String> = paths.iter().map(|path| path.join(sep)).collect();
    table.clone().with_flat_header(names)?.reset_index()
}

/// Group label of a wide column: the second-to-last `sep`-separated token,
/// or the full name when it has no separator.
fn group_label<'a>(column: &'a str, sep: &str) -> &'a str {
    let parts: Vec<&str> = column.split(sep).collect();
    if parts.len() >= 2 {
        parts[parts.len() - 2]
    } else {
        column
    }
}

/// Reshape wide data into long format with a `group` column.
///
/// Every column not in `index_vars` is melted into `(variable, value)`
/// pairs; the group of a variable is derived from its name (`a_1` belongs
/// to group `a`). Values are then aggregated per identifier and group, in
/// original column order. The result has the columns
/// `[index_vars..., "group", "value"]`, sorted by identifiers then group.
///
/// ```
/// use tabkit_helpers::{squish, SquishOptions};
/// use tabkit_table::{CellValue, Table};
///
/// let wide = Table::new(
///     vec!["index_var", "a_1", "a_2", "b_1"],
///     vec![vec![1, 2, 3, 4]],
/// )
/// .unwrap();
///
/// let long = squish(&wide, &["index_var"], &SquishOptions::default()).unwrap();
/// assert_eq!(long.get_by_name(0, "value").unwrap(), &CellValue::from(vec![2, 3]));
/// ```
///
/// # Errors
///
/// - `TableError::EmptySeparator` if `options.col_sep` is empty
/// - `TableError::ColumnNotFound` for an unknown identifier column
pub fn squish(table: &Table, index_vars: &[&str], options: &SquishOptions) -> Result<Table> {
    if options.col_sep.is_empty() {
        return Err(TableError::EmptySeparator);
    }
    let names = table.column_names()?;
    let id_positions: Vec<usize> = index_vars
        .iter()
        .map(|name| table.column_position(name))
        .collect::<Result<_>>()?;
    let value_positions: Vec<usize> = (0..names.len())
        .filter(|i| !id_positions.contains(i))
        .collect();

    let mut groups: IndexMap<(Vec<String>, String), (Vec<CellValue>, Vec<CellValue>)> =
        IndexMap::new();
    for &col in &value_positions {
        let group = group_label(&names[col], &options.col_sep);
        for row in table.rows() {
            let ids: Vec<CellValue> = id_positions.iter().map(|&p| row[p].clone()).collect();
            let id_key: Vec<String> = ids.iter().map(CellValue::key).collect();
            groups
                .entry((id_key, group.to_string()))
                .or_insert_with(|| (ids, Vec::new()))
                .1
                .push(row[col].clone());
        }
    }

    let mut entries: Vec<(Vec<CellValue>, String, Vec<CellValue>)> = groups
        .into_iter()
        .map(|((_, group), (ids, values))| (ids, group, values))
        .collect();
    entries.sort_by(|(a_ids, a_group, _), (b_ids, b_group, _)| {
        a_ids
            .iter()
            .zip(b_ids.iter())
            .map(|(x, y)| x.total_cmp(y))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| a_group.cmp(b_group))
    });

    tracing::debug!(
        melted_columns = value_positions.len(),
        groups = entries.len(),
        "squished table"
    );

    let mut columns: Vec<String> = index_vars.iter().map(|v| (*v).to_string()).collect();
    columns.push("group".to_string());
    columns.push("value".to_string());

    let rows: Vec<Vec<CellValue>> = entries
        .into_iter()
        .map(|(mut ids, group, values)| {
            ids.push(CellValue::String(group));
            ids.push((options.agg)(values.as_slice()));
            ids
        })
        .collect();

    Table::new(columns, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_label() {
        assert_eq!(group_label("a_1", "_"), "a");
        assert_eq!(group_label("x_y_2", "_"), "y");
        assert_eq!(group_label("b", "_"), "b");
        assert_eq!(group_label("a.1", "."), "a");
        assert_eq!(group_label("_1", "_"), "");
    }
}
