//! Spreadsheet-style column labels

use tabkit_table::{column_index_to_letters, Result, Table, TableError};

/// Number of labels produced by [`generate_excel_cols`]: `A..Z` plus `AA..ZZ`
pub const EXCEL_LABEL_COUNT: usize = 26 + 26 * 26;

/// Spreadsheet column labels in order: `A, B, ..., Z, AA, AB, ..., ZZ`
#[must_use]
pub fn generate_excel_cols() -> Vec<String> {
    (0..EXCEL_LABEL_COUNT).map(column_index_to_letters).collect()
}

/// Name of the table column sitting under spreadsheet label `label`.
///
/// ```
/// use tabkit_helpers::convert_excel_to_df_cols;
/// use tabkit_table::Table;
///
/// let table = Table::new(vec!["id", "name", "qty"], vec![vec![1, 2, 3]]).unwrap();
/// assert_eq!(convert_excel_to_df_cols(&table, "B").unwrap(), "name");
/// ```
///
/// # Errors
///
/// - `TableError::InvalidColumnLetters` if `label` is not one of the generated labels
/// - `TableError::ColumnIndexOutOfBounds` if the table is narrower than the label's position
pub fn convert_excel_to_df_cols<'t>(table: &'t Table, label: &str) -> Result<&'t str> {
    let position = generate_excel_cols()
        .iter()
        .position(|l| l == label)
        .ok_or_else(|| TableError::InvalidColumnLetters(label.to_string()))?;

    let names = table.column_names()?;
    names
        .get(position)
        .map(String::as_str)
        .ok_or(TableError::ColumnIndexOutOfBounds {
            index: position,
            count: names.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_bounds() {
        let labels = generate_excel_cols();
        assert_eq!(labels.len(), 702);
        assert_eq!(labels[0], "A");
        assert_eq!(labels[25], "Z");
        assert_eq!(labels[26], "AA");
        assert_eq!(labels[701], "ZZ");
    }

    #[test]
    fn test_lowercase_label_rejected() {
        let table = Table::new(vec!["x"], vec![vec![1]]).unwrap();
        assert!(matches!(
            convert_excel_to_df_cols(&table, "a"),
            Err(TableError::InvalidColumnLetters(_))
        ));
    }
}
