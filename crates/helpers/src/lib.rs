//! Helpers module for tabkit
//!
//! Small pipeline utilities built on [`tabkit_table::Table`]: progress
//! printing, header collapsing, wide-to-long reshaping, random group
//! sampling, derived columns, spreadsheet labels and file-name timestamps.
//!
//! # Examples
//!
//! ```
//! use tabkit_helpers::{collapse_multiindex, shout};
//! use tabkit_table::{Aggregation, Table};
//!
//! let table = Table::new(vec!["g", "v"], vec![vec![1, 2], vec![1, 4], vec![2, 3]]).unwrap();
//! let flat = table
//!     .aggregate(&["g"], &[("v", &[Aggregation::Sum])])
//!     .and_then(|grouped| collapse_multiindex(&grouped, "_"))
//!     .unwrap()
//!     .pipe(|t| shout(t, Some("grouped")));
//!
//! assert_eq!(flat.column_names().unwrap(), &["g", "v_sum"]);
//! ```

pub mod column;
pub mod excel;
pub mod progress;
pub mod reshape;
pub mod sample;
pub mod time;

pub use column::{create_column, Arg, RowFn};
pub use excel::{convert_excel_to_df_cols, generate_excel_cols, EXCEL_LABEL_COUNT};
pub use progress::{shape_line, shout, shout_to};
pub use reshape::{collapse_multiindex, collect_list, squish, AggFn, SquishOptions};
pub use sample::{filter_random, filter_random_thread};
pub use time::{pathsafe, pathsafenow, PATH_SAFE_FORMAT};
