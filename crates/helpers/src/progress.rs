//! Pipeline progress printing

use std::io::Write;
use tabkit_table::{Result, Table};

/// Format the `(rows, cols): msg` progress line for a table
#[must_use]
pub fn shape_line(table: &Table, msg: Option<&str>) -> String {
    let (rows, cols) = table.shape();
    format!("({rows}, {cols}): {}", msg.unwrap_or_default())
}

/// Print the size of a table and an optional message, then hand the table
/// back so the call can sit in the middle of a [`Table::pipe`] chain.
///
/// ```
/// use tabkit_helpers::shout;
/// use tabkit_table::Table;
///
/// let table = Table::new(vec!["a"], vec![vec![10], vec![15], vec![20]])
///     .unwrap()
///     .pipe(|t| shout(t, Some("Starting pipeline")));
/// assert_eq!(table.row_count(), 3);
/// ```
#[must_use]
pub fn shout(table: Table, msg: Option<&str>) -> Table {
    tracing::debug!(rows = table.row_count(), cols = table.col_count(), msg, "pipeline checkpoint");
    println!("{}", shape_line(&table, msg));
    table
}

/// Like [`shout`], writing the line to `writer` instead of stdout
pub fn shout_to<W: Write>(writer: &mut W, table: Table, msg: Option<&str>) -> Result<Table> {
    writeln!(writer, "{}", shape_line(&table, msg))?;
    Ok(table)
}
