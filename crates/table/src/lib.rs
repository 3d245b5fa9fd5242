//! Table module for tabkit
//!
//! Provides a small in-memory table of named columns: dynamically typed
//! cells, hierarchical headers, composite-key hash joins and group-by
//! aggregation.
//!
//! # Examples
//!
//! ## Creating a table
//!
//! ```
//! use tabkit_table::{CellValue, Table};
//!
//! let table = Table::new(vec!["a", "b"], vec![vec![1, 4], vec![2, 5]]).unwrap();
//!
//! assert_eq!(table.shape(), (2, 2));
//! assert_eq!(table.get_by_name(1, "b").unwrap(), &CellValue::Int(5));
//! ```
//!
//! ## Joining on a key
//!
//! ```
//! use tabkit_table::{JoinOptions, Table};
//!
//! let left = Table::new(vec!["id", "x"], vec![vec![1, 10], vec![2, 20]]).unwrap();
//! let right = Table::new(vec!["id", "y"], vec![vec![2, 200], vec![3, 300]]).unwrap();
//!
//! let joined = left.join(&right, &["id"], &JoinOptions::full()).unwrap();
//! assert_eq!(joined.row_count(), 3);
//! ```
//!
//! ## Grouping
//!
//! ```
//! use tabkit_table::{Aggregation, Table};
//!
//! let table = Table::new(vec!["g", "v"], vec![vec![1, 2], vec![1, 4]]).unwrap();
//! let grouped = table.aggregate(&["g"], &[("v", &[Aggregation::Sum])]).unwrap();
//!
//! assert_eq!(grouped.header().depth(), 2);
//! ```

mod a1_notation;
mod cell;
mod error;
mod group;
mod join;
mod table;

/// Re-export column letter helpers.
pub use a1_notation::{column_index_to_letters, parse_column_letters};
/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export table error types.
pub use error::{Result, TableError};
/// Re-export aggregation type.
pub use group::Aggregation;
/// Re-export join types and options.
pub use join::{JoinOptions, JoinType, MergeSide};
/// Re-export table types.
pub use table::{Header, RowIndex, Table};
