use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use tabkit_table::CellValue;

/// Classification of one reconciled key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RowStatus {
    /// Present only in the left table
    Dropped,
    /// Present only in the right table
    Added,
    /// Present in both with at least one differing value
    Changed,
    /// Present in both with identical values
    Unchanged,
}

impl RowStatus {
    /// All statuses, in report order
    pub const ALL: [RowStatus; 4] = [
        RowStatus::Dropped,
        RowStatus::Added,
        RowStatus::Changed,
        RowStatus::Unchanged,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RowStatus::Dropped => "Dropped",
            RowStatus::Added => "Added",
            RowStatus::Changed => "Changed",
            RowStatus::Unchanged => "Unchanged",
        }
    }

    /// Label with a change marker, as written to the `descr` column
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RowStatus::Dropped => "[-] Dropped",
            RowStatus::Added => "[+] Added",
            RowStatus::Changed => "[~] Changed",
            RowStatus::Unchanged => "[ ] Unchanged",
        }
    }
}

impl fmt::Display for RowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `(left, right)` values of one changed column
pub type Change = (CellValue, CellValue);

/// One reconciled key with its values from both sides.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffRecord {
    pub(crate) key: Vec<CellValue>,
    pub(crate) left: Option<Vec<CellValue>>,
    pub(crate) right: Option<Vec<CellValue>>,
    pub(crate) status: RowStatus,
    pub(crate) changes: IndexMap<String, Change>,
}

impl DiffRecord {
    /// Join key values, in `join_on` order
    #[must_use]
    pub fn key(&self) -> &[CellValue] {
        &self.key
    }

    /// Compared values from the left table, `None` when the key is absent there
    #[must_use]
    pub fn left(&self) -> Option<&[CellValue]> {
        self.left.as_deref()
    }

    /// Compared values from the right table, `None` when the key is absent there
    #[must_use]
    pub fn right(&self) -> Option<&[CellValue]> {
        self.right.as_deref()
    }

    #[must_use]
    pub fn status(&self) -> RowStatus {
        self.status
    }

    /// Columns whose values differ, mapped to `(left, right)`
    #[must_use]
    pub fn changes(&self) -> &IndexMap<String, Change> {
        &self.changes
    }

    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}
