use crate::record::RowStatus;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

const RULE: &str = "---------------";

/// Column and row summary of a diff
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffReport {
    pub removed_columns: Vec<String>,
    pub added_columns: Vec<String>,
    pub matching_columns: Vec<String>,
    pub rows: IndexMap<RowStatus, usize>,
}

impl DiffReport {
    /// Total number of reconciled keys
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.rows.values().sum()
    }
}

fn write_columns(f: &mut fmt::Formatter<'_>, label: &str, columns: &[String]) -> fmt::Result {
    if columns.is_empty() {
        writeln!(f, "{label}: None")
    } else {
        writeln!(f, "{label}: {{{}}}", columns.join(", "))
    }
}

impl fmt::Display for DiffReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "Difference report")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Columns:")?;
        write_columns(f, "Removed", &self.removed_columns)?;
        write_columns(f, "Added", &self.added_columns)?;
        write_columns(f, "Matching", &self.matching_columns)?;
        writeln!(f, "{RULE}")?;
        write!(f, "Rows:")?;
        for (status, count) in &self.rows {
            write!(f, "\n{:<14}{count}", status.label())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> DiffReport {
        DiffReport {
            removed_columns: vec![],
            added_columns: vec!["c".to_string()],
            matching_columns: vec!["a".to_string(), "b".to_string()],
            rows: RowStatus::ALL.iter().map(|&s| (s, 1)).collect(),
        }
    }

    #[test]
    fn test_display() {
        let text = report().to_string();
        assert!(text.contains("Removed: None"));
        assert!(text.contains("Added: {c}"));
        assert!(text.contains("Matching: {a, b}"));
        assert!(text.contains("[~] Changed"));
    }

    #[test]
    fn test_total_rows() {
        assert_eq!(report().total_rows(), 4);
    }
}
