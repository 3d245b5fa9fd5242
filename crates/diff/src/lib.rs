//! Table diffing for tabkit
//!
//! Reconciles two tables on one or more key columns and reports which
//! columns were added or removed and which rows were dropped, added,
//! changed or left untouched.
//!
//! ```
//! use tabkit_diff::{RowStatus, TableDiffer};
//! use tabkit_table::{CellValue, Table};
//!
//! let before = Table::new(vec!["id", "qty"], vec![vec![1, 5], vec![2, 7]]).unwrap();
//! let after = Table::new(vec!["ID ", "Qty"], vec![vec![1, 5], vec![2, 8]]).unwrap();
//!
//! let diff = TableDiffer::new(&before, &after, &["id"]).unwrap();
//! let record = diff.record(&[CellValue::Int(2)]).unwrap();
//!
//! assert_eq!(record.status(), RowStatus::Changed);
//! assert_eq!(record.changes()["qty"], (CellValue::Int(7), CellValue::Int(8)));
//! ```

mod differ;
mod options;
mod record;
mod report;

pub use differ::{create_diff, TableDiffer, MERGE_COLUMN, STATUS_COLUMN};
pub use options::{default_cleaner, ColumnCleaner, DiffOptions, LEFT_SUFFIX, RIGHT_SUFFIX};
pub use record::{Change, DiffRecord, RowStatus};
pub use report::DiffReport;
