use crate::cell::CellValue;
use crate::error::{Result, TableError};
use std::collections::HashMap;

/// Column labels of a table.
///
/// `Nested` holds, for every column, its label path from the outermost
/// level to the innermost one. All paths share the same depth.
#[derive(Debug, Clone, PartialEq)]
pub enum Header {
    Flat(Vec<String>),
    Nested(Vec<Vec<String>>),
}

impl Header {
    /// Number of columns described by the header
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Header::Flat(names) => names.len(),
            Header::Nested(paths) => paths.len(),
        }
    }

    /// Whether the header describes no columns
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of label levels (1 for a flat header)
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Header::Flat(_) => 1,
            Header::Nested(paths) => paths.first().map_or(0, Vec::len),
        }
    }

    #[must_use]
    pub fn is_hierarchical(&self) -> bool {
        matches!(self, Header::Nested(_))
    }
}

/// Named key columns stored alongside the data rows (e.g. group keys
/// produced by an aggregation).
#[derive(Debug, Clone, PartialEq)]
pub struct RowIndex {
    names: Vec<String>,
    values: Vec<Vec<CellValue>>,
}

impl RowIndex {
    /// Create a row index; every entry must hold one value per name.
    pub fn new<S: Into<String>>(names: Vec<S>, values: Vec<Vec<CellValue>>) -> Result<Self> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if let Some(bad) = values.iter().find(|v| v.len() != names.len()) {
            return Err(TableError::LengthMismatch {
                expected: names.len(),
                actual: bad.len(),
            });
        }
        Ok(RowIndex { names, values })
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn values(&self) -> &[Vec<CellValue>] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A table of named columns with row-major storage
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    header: Header,
    data: Vec<Vec<CellValue>>,
    index: Option<RowIndex>,
    column_index: HashMap<String, usize>,
}

impl Table {
    /// Create a table from column names and rows
    ///
    /// # Errors
    ///
    /// Returns `TableError::LengthMismatch` if a row does not match the
    /// number of columns and `TableError::DuplicateColumnName` if a name repeats.
    pub fn new<S, T>(columns: Vec<S>, rows: Vec<Vec<T>>) -> Result<Self>
    where
        S: Into<String>,
        T: Into<CellValue>,
    {
        let names: Vec<String> = columns.into_iter().map(Into::into).collect();
        let data: Vec<Vec<CellValue>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        Self::from_parts(Header::Flat(names), data, None)
    }

    /// Create a table from `(name, values)` column pairs
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<CellValue>)>) -> Result<Self> {
        let row_count = columns.first().map_or(0, |(_, values)| values.len());
        let mut names = Vec::with_capacity(columns.len());
        let mut data: Vec<Vec<CellValue>> = vec![Vec::with_capacity(columns.len()); row_count];

        for (name, values) in columns {
            if values.len() != row_count {
                return Err(TableError::LengthMismatch {
                    expected: row_count,
                    actual: values.len(),
                });
            }
            names.push(name.into());
            for (row, value) in data.iter_mut().zip(values) {
                row.push(value);
            }
        }

        Self::from_parts(Header::Flat(names), data, None)
    }

    /// Create a table with a hierarchical header and an optional row index
    pub fn nested(
        paths: Vec<Vec<String>>,
        rows: Vec<Vec<CellValue>>,
        index: Option<RowIndex>,
    ) -> Result<Self> {
        let depth = paths.first().map_or(0, Vec::len);
        if let Some(bad) = paths.iter().find(|p| p.len() != depth) {
            return Err(TableError::LengthMismatch {
                expected: depth,
                actual: bad.len(),
            });
        }
        Self::from_parts(Header::Nested(paths), rows, index)
    }

    pub(crate) fn from_parts(
        header: Header,
        data: Vec<Vec<CellValue>>,
        index: Option<RowIndex>,
    ) -> Result<Self> {
        let width = header.len();
        if let Some(bad) = data.iter().find(|row| row.len() != width) {
            return Err(TableError::LengthMismatch {
                expected: width,
                actual: bad.len(),
            });
        }
        if let Some(index) = &index {
            if index.len() != data.len() {
                return Err(TableError::LengthMismatch {
                    expected: data.len(),
                    actual: index.len(),
                });
            }
        }

        let column_index = match &header {
            Header::Flat(names) => build_column_index(names)?,
            Header::Nested(_) => HashMap::new(),
        };

        Ok(Table {
            header,
            data,
            index,
            column_index,
        })
    }

    /// Get the number of rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Get the number of columns
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.header.len()
    }

    /// `(rows, columns)`
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.col_count())
    }

    /// Check if the table has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    #[must_use]
    pub fn index(&self) -> Option<&RowIndex> {
        self.index.as_ref()
    }

    /// Get the flat column names
    ///
    /// # Errors
    ///
    /// Returns `TableError::HierarchicalHeader` for nested headers.
    pub fn column_names(&self) -> Result<&[String]> {
        match &self.header {
            Header::Flat(names) => Ok(names),
            Header::Nested(_) => Err(TableError::HierarchicalHeader),
        }
    }

    /// Check whether a flat column with this name exists
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index.contains_key(name)
    }

    /// `base`, padded with trailing underscores until no column uses it
    #[must_use]
    pub fn free_column_name(&self, base: &str) -> String {
        let mut name = base.to_string();
        while self.has_column(&name) {
            name.push('_');
        }
        name
    }

    /// Get the position of a column by name
    pub fn column_position(&self, name: &str) -> Result<usize> {
        if self.header.is_hierarchical() {
            return Err(TableError::HierarchicalHeader);
        }
        self.column_index
            .get(name)
            .copied()
            .ok_or_else(|| TableError::ColumnNotFound {
                name: name.to_string(),
            })
    }

    /// Get a cell by row and column index (0-based)
    pub fn get(&self, row: usize, col: usize) -> Result<&CellValue> {
        let cells = self.row(row)?;
        cells.get(col).ok_or(TableError::ColumnIndexOutOfBounds {
            index: col,
            count: self.col_count(),
        })
    }

    /// Get a cell by row index and column name
    pub fn get_by_name(&self, row: usize, name: &str) -> Result<&CellValue> {
        let col = self.column_position(name)?;
        self.get(row, col)
    }

    /// Get a row by index (0-based)
    pub fn row(&self, index: usize) -> Result<&[CellValue]> {
        self.data
            .get(index)
            .map(Vec::as_slice)
            .ok_or(TableError::RowIndexOutOfBounds {
                index,
                count: self.row_count(),
            })
    }

    /// Iterate over all rows
    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.data.iter().map(Vec::as_slice)
    }

    /// Get an entire column by index (0-based)
    pub fn column(&self, index: usize) -> Result<Vec<CellValue>> {
        if index >= self.col_count() {
            return Err(TableError::ColumnIndexOutOfBounds {
                index,
                count: self.col_count(),
            });
        }
        Ok(self.data.iter().map(|row| row[index].clone()).collect())
    }

    /// Get an entire column by name
    pub fn column_by_name(&self, name: &str) -> Result<Vec<CellValue>> {
        let index = self.column_position(name)?;
        self.column(index)
    }

    /// Rename every column with `f`
    ///
    /// # Errors
    ///
    /// Returns `TableError::DuplicateColumnName` if two columns end up with
    /// the same name.
    pub fn rename_columns<F>(&mut self, f: F) -> Result<()>
    where
        F: Fn(&str) -> String,
    {
        let renamed: Vec<String> = self.column_names()?.iter().map(|n| f(n.as_str())).collect();
        self.column_index = build_column_index(&renamed)?;
        self.header = Header::Flat(renamed);
        Ok(())
    }

    /// Replace the header with flat names, keeping data and row index
    pub fn with_flat_header<S: Into<String>>(mut self, names: Vec<S>) -> Result<Self> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() != self.col_count() {
            return Err(TableError::LengthMismatch {
                expected: self.col_count(),
                actual: names.len(),
            });
        }
        self.column_index = build_column_index(&names)?;
        self.header = Header::Flat(names);
        Ok(self)
    }

    /// Append a named column to the end of each row
    pub fn column_append<S, T>(&mut self, name: S, data: Vec<T>) -> Result<()>
    where
        S: Into<String>,
        T: Into<CellValue>,
    {
        let name = name.into();
        if data.len() != self.row_count() {
            return Err(TableError::LengthMismatch {
                expected: self.row_count(),
                actual: data.len(),
            });
        }
        let Header::Flat(names) = &mut self.header else {
            return Err(TableError::HierarchicalHeader);
        };
        if self.column_index.contains_key(&name) {
            return Err(TableError::DuplicateColumnName { name });
        }

        self.column_index.insert(name.clone(), names.len());
        names.push(name);
        for (row, value) in self.data.iter_mut().zip(data) {
            row.push(value.into());
        }
        Ok(())
    }

    /// Keep only the rows matching a predicate. The row index, if any,
    /// stays aligned with the data.
    pub fn filter_rows<F>(&mut self, predicate: F)
    where
        F: Fn(&[CellValue]) -> bool,
    {
        let keep: Vec<bool> = self.data.iter().map(|row| predicate(row)).collect();

        let mut flags = keep.iter();
        self.data.retain(|_| flags.next().copied().unwrap_or(false));

        if let Some(index) = &mut self.index {
            let mut flags = keep.iter();
            index
                .values
                .retain(|_| flags.next().copied().unwrap_or(false));
        }
    }

    /// Pass the table through `f`, for chaining transformations
    pub fn pipe<F, R>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        f(self)
    }

    /// Move the row index into leading data columns.
    ///
    /// Without a row index, a leading `index` column holding row positions
    /// is inserted instead.
    pub fn reset_index(self) -> Result<Self> {
        let Header::Flat(names) = self.header else {
            return Err(TableError::HierarchicalHeader);
        };

        let (mut new_names, index_values) = match self.index {
            Some(index) => (index.names, index.values),
            None => (
                vec!["index".to_string()],
                (0..self.data.len())
                    .map(|i| vec![CellValue::from(i)])
                    .collect(),
            ),
        };
        new_names.extend(names);

        let data = index_values
            .into_iter()
            .zip(self.data)
            .map(|(mut lead, row)| {
                lead.extend(row);
                lead
            })
            .collect();

        Self::from_parts(Header::Flat(new_names), data, None)
    }

    pub(crate) fn data(&self) -> &[Vec<CellValue>] {
        &self.data
    }
}

impl Default for Table {
    fn default() -> Self {
        Table {
            header: Header::Flat(Vec::new()),
            data: Vec::new(),
            index: None,
            column_index: HashMap::new(),
        }
    }
}

fn build_column_index(names: &[String]) -> Result<HashMap<String, usize>> {
    let mut index_map = HashMap::with_capacity(names.len());
    for (i, name) in names.iter().enumerate() {
        if index_map.insert(name.clone(), i).is_some() {
            return Err(TableError::DuplicateColumnName { name: name.clone() });
        }
    }
    Ok(index_map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(vec!["a", "b"], vec![vec![1, 4], vec![2, 5], vec![3, 6]]).unwrap()
    }

    #[test]
    fn test_new_table() {
        let table = sample();
        assert_eq!(table.shape(), (3, 2));
        assert_eq!(table.get_by_name(1, "b").unwrap(), &CellValue::Int(5));
        assert!(table.has_column("a"));
        assert!(!table.has_column("c"));
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let result = Table::new(vec!["a", "b"], vec![vec![1, 2], vec![3]]);
        assert!(matches!(result, Err(TableError::LengthMismatch { .. })));
    }

    #[test]
    fn test_new_rejects_duplicate_names() {
        let result = Table::new(vec!["a", "a"], vec![vec![1, 2]]);
        assert!(matches!(
            result,
            Err(TableError::DuplicateColumnName { name }) if name == "a"
        ));
    }

    #[test]
    fn test_from_columns() {
        let table = Table::from_columns(vec![
            ("x", vec![CellValue::from("p"), CellValue::from("q")]),
            ("y", vec![CellValue::Int(1), CellValue::Int(2)]),
        ])
        .unwrap();
        assert_eq!(table.shape(), (2, 2));
        assert_eq!(table.row(1).unwrap(), &[CellValue::from("q"), CellValue::Int(2)]);
    }

    #[test]
    fn test_rename_columns_detects_collisions() {
        let mut table = Table::new(vec!["A", "a "], vec![vec![1, 2]]).unwrap();
        let result = table.rename_columns(|n| n.trim().to_lowercase());
        assert!(matches!(result, Err(TableError::DuplicateColumnName { .. })));
    }

    #[test]
    fn test_column_append() {
        let mut table = sample();
        table.column_append("c", vec![7, 8, 9]).unwrap();
        assert_eq!(table.column_by_name("c").unwrap()[2], CellValue::Int(9));
        assert!(table.column_append("c", vec![1, 2, 3]).is_err());
        assert!(table.column_append("d", vec![1]).is_err());
    }

    #[test]
    fn test_free_column_name() {
        let table = Table::new(vec!["descr", "descr_", "x"], vec![vec![1, 2, 3]]).unwrap();
        assert_eq!(table.free_column_name("descr"), "descr__");
        assert_eq!(table.free_column_name("y"), "y");
    }

    #[test]
    fn test_filter_rows_and_pipe() {
        let out = sample().pipe(|mut t| {
            t.filter_rows(|row| row[0].as_int().unwrap_or(0) >= 2);
            t
        });
        assert_eq!(out.row_count(), 2);
        assert_eq!(out.get(0, 0).unwrap(), &CellValue::Int(2));
    }

    #[test]
    fn test_reset_index_without_index() {
        let table = sample().reset_index().unwrap();
        assert_eq!(table.column_names().unwrap(), &["index", "a", "b"]);
        assert_eq!(table.get(2, 0).unwrap(), &CellValue::Int(2));
    }

    #[test]
    fn test_nested_header_blocks_name_access() {
        let table = Table::nested(
            vec![vec!["v".into(), "mean".into()]],
            vec![vec![CellValue::Float(1.0)]],
            None,
        )
        .unwrap();
        assert_eq!(table.header().depth(), 2);
        assert!(matches!(
            table.column_by_name("v"),
            Err(TableError::HierarchicalHeader)
        ));
    }
}
