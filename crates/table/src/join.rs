use crate::cell::CellValue;
use crate::error::{Result, TableError};
use crate::table::{Header, Table};
use std::collections::{HashMap, HashSet};

/// Which unmatched rows a join keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
}

/// Value written to the indicator column for each joined row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeSide {
    LeftOnly,
    RightOnly,
    Both,
}

impl MergeSide {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MergeSide::LeftOnly => "left_only",
            MergeSide::RightOnly => "right_only",
            MergeSide::Both => "both",
        }
    }

    /// Parse an indicator cell back into a side
    #[must_use]
    pub fn from_cell(cell: &CellValue) -> Option<Self> {
        match cell {
            CellValue::String(s) if s == "left_only" => Some(MergeSide::LeftOnly),
            CellValue::String(s) if s == "right_only" => Some(MergeSide::RightOnly),
            CellValue::String(s) if s == "both" => Some(MergeSide::Both),
            _ => None,
        }
    }
}

/// Options for joining two tables.
#[derive(Debug, Clone)]
pub struct JoinOptions {
    pub join_type: JoinType,
    /// Appended to non-key column names present on both sides
    pub suffixes: (String, String),
    /// Name of an extra column recording which side(s) each row came from
    pub indicator: Option<String>,
}

impl Default for JoinOptions {
    fn default() -> Self {
        JoinOptions {
            join_type: JoinType::Inner,
            suffixes: (String::new(), "_right".to_string()),
            indicator: None,
        }
    }
}

impl JoinOptions {
    /// Create options for a full outer join
    #[must_use]
    pub fn full() -> Self {
        JoinOptions {
            join_type: JoinType::Full,
            ..Default::default()
        }
    }

    /// Set the join type
    #[must_use]
    pub fn with_join_type(mut self, join_type: JoinType) -> Self {
        self.join_type = join_type;
        self
    }

    /// Set the suffixes used to disambiguate colliding column names
    #[must_use]
    pub fn with_suffixes(mut self, left: &str, right: &str) -> Self {
        self.suffixes = (left.to_string(), right.to_string());
        self
    }

    /// Add an indicator column with the given name
    #[must_use]
    pub fn with_indicator(mut self, name: &str) -> Self {
        self.indicator = Some(name.to_string());
        self
    }
}

/// Composite key of one row, as hashable cell keys
pub(crate) fn row_key(row: &[CellValue], positions: &[usize]) -> Vec<String> {
    positions.iter().map(|&i| row[i].key()).collect()
}

pub(crate) fn key_positions(table: &Table, keys: &[&str], side: &str) -> Result<Vec<usize>> {
    keys.iter()
        .map(|key| {
            table
                .column_position(key)
                .map_err(|err| match err {
                    TableError::ColumnNotFound { .. } => TableError::JoinKeyNotFound {
                        key: (*key).to_string(),
                        side: side.to_string(),
                    },
                    other => other,
                })
        })
        .collect()
}

/// Reserve `name`, repeating `pad` until it no longer collides
fn claim_name(mut name: String, pad: &str, taken: &mut HashSet<String>) -> String {
    let pad = if pad.is_empty() { "_" } else { pad };
    while taken.contains(&name) {
        name.push_str(pad);
    }
    taken.insert(name.clone());
    name
}

impl Table {
    /// Hash join with another table on one or more key columns.
    ///
    /// The result holds the key columns first (taken from whichever side
    /// has the row), then the left non-key columns, then the right non-key
    /// columns, then the indicator if requested. Non-key names present on
    /// both sides get the configured suffixes; a generated name that clashes
    /// with an existing column is padded with its suffix (`_` for the
    /// indicator) until unique. Matched and left-only rows keep left order; right-only
    /// rows follow in right order.
    ///
    /// # Errors
    ///
    /// Returns `TableError::JoinKeyNotFound` if a key column is missing on
    /// either side.
    pub fn join(&self, other: &Table, keys: &[&str], options: &JoinOptions) -> Result<Table> {
        let left_names = self.column_names()?;
        let right_names = other.column_names()?;
        let left_keys = key_positions(self, keys, "left")?;
        let right_keys = key_positions(other, keys, "right")?;

        let left_rest: Vec<usize> = (0..left_names.len())
            .filter(|i| !left_keys.contains(i))
            .collect();
        let right_rest: Vec<usize> = (0..right_names.len())
            .filter(|i| !right_keys.contains(i))
            .collect();

        let right_rest_names: HashSet<&str> =
            right_rest.iter().map(|&i| right_names[i].as_str()).collect();
        let left_rest_names: HashSet<&str> =
            left_rest.iter().map(|&i| left_names[i].as_str()).collect();

        let (left_suffix, right_suffix) = &options.suffixes;
        // names that pass through unchanged; generated names must avoid them
        let mut taken: HashSet<String> = keys.iter().map(|k| (*k).to_string()).collect();
        taken.extend(
            left_rest
                .iter()
                .map(|&i| &left_names[i])
                .filter(|name| !right_rest_names.contains(name.as_str()))
                .cloned(),
        );
        taken.extend(
            right_rest
                .iter()
                .map(|&i| &right_names[i])
                .filter(|name| !left_rest_names.contains(name.as_str()))
                .cloned(),
        );

        let mut result_names: Vec<String> = keys.iter().map(|k| (*k).to_string()).collect();
        for &i in &left_rest {
            let name = &left_names[i];
            if right_rest_names.contains(name.as_str()) {
                result_names.push(claim_name(format!("{name}{left_suffix}"), left_suffix, &mut taken));
            } else {
                result_names.push(name.clone());
            }
        }
        for &i in &right_rest {
            let name = &right_names[i];
            if left_rest_names.contains(name.as_str()) {
                result_names.push(claim_name(format!("{name}{right_suffix}"), right_suffix, &mut taken));
            } else {
                result_names.push(name.clone());
            }
        }
        if let Some(indicator) = &options.indicator {
            result_names.push(claim_name(indicator.clone(), "_", &mut taken));
        }

        let mut right_map: HashMap<Vec<String>, Vec<usize>> = HashMap::new();
        for (i, row) in other.data().iter().enumerate() {
            right_map
                .entry(row_key(row, &right_keys))
                .or_default()
                .push(i);
        }

        let build_row = |key_row: &[CellValue],
                         key_pos: &[usize],
                         left: Option<&[CellValue]>,
                         right: Option<&[CellValue]>,
                         side: MergeSide| {
            let mut out: Vec<CellValue> = Vec::with_capacity(result_names.len());
            out.extend(key_pos.iter().map(|&i| key_row[i].clone()));
            match left {
                Some(row) => out.extend(left_rest.iter().map(|&i| row[i].clone())),
                None => out.extend(std::iter::repeat(CellValue::Null).take(left_rest.len())),
            }
            match right {
                Some(row) => out.extend(right_rest.iter().map(|&i| row[i].clone())),
                None => out.extend(std::iter::repeat(CellValue::Null).take(right_rest.len())),
            }
            if options.indicator.is_some() {
                out.push(CellValue::from(side.as_str()));
            }
            out
        };

        let keep_left = matches!(options.join_type, JoinType::Left | JoinType::Full);
        let keep_right = matches!(options.join_type, JoinType::Right | JoinType::Full);

        let mut result_data: Vec<Vec<CellValue>> = Vec::new();
        let mut matched_right: HashSet<usize> = HashSet::new();

        for left_row in self.data() {
            if let Some(right_indices) = right_map.get(&row_key(left_row, &left_keys)) {
                for &right_idx in right_indices {
                    matched_right.insert(right_idx);
                    let right_row = &other.data()[right_idx];
                    result_data.push(build_row(
                        left_row.as_slice(),
                        &left_keys,
                        Some(left_row.as_slice()),
                        Some(right_row.as_slice()),
                        MergeSide::Both,
                    ));
                }
            } else if keep_left {
                result_data.push(build_row(
                    left_row.as_slice(),
                    &left_keys,
                    Some(left_row.as_slice()),
                    None,
                    MergeSide::LeftOnly,
                ));
            }
        }

        if keep_right {
            for (i, right_row) in other.data().iter().enumerate() {
                if !matched_right.contains(&i) {
                    result_data.push(build_row(
                        right_row.as_slice(),
                        &right_keys,
                        None,
                        Some(right_row.as_slice()),
                        MergeSide::RightOnly,
                    ));
                }
            }
        }

        tracing::debug!(
            join_type = ?options.join_type,
            left_rows = self.row_count(),
            right_rows = other.row_count(),
            result_rows = result_data.len(),
            "joined tables"
        );

        Table::from_parts(Header::Flat(result_names), result_data, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn left() -> Table {
        Table::new(
            vec!["id", "name", "score"],
            vec![
                vec![CellValue::Int(1), "ann".into(), CellValue::Int(10)],
                vec![CellValue::Int(2), "bob".into(), CellValue::Int(20)],
                vec![CellValue::Int(3), "cy".into(), CellValue::Int(30)],
            ],
        )
        .unwrap()
    }

    fn right() -> Table {
        Table::new(
            vec!["id", "score", "team"],
            vec![
                vec![CellValue::Int(2), CellValue::Int(25), "red".into()],
                vec![CellValue::Int(4), CellValue::Int(40), "blue".into()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_inner_join() {
        let joined = left().join(&right(), &["id"], &JoinOptions::default()).unwrap();
        assert_eq!(
            joined.column_names().unwrap(),
            &["id", "name", "score", "score_right", "team"]
        );
        assert_eq!(joined.row_count(), 1);
        assert_eq!(joined.get_by_name(0, "score_right").unwrap(), &CellValue::Int(25));
    }

    #[test]
    fn test_full_join_with_indicator() {
        let options = JoinOptions::full()
            .with_suffixes("__left", "__right")
            .with_indicator("_merge");
        let joined = left().join(&right(), &["id"], &options).unwrap();

        assert_eq!(
            joined.column_names().unwrap(),
            &["id", "name", "score__left", "score__right", "team", "_merge"]
        );
        assert_eq!(joined.row_count(), 4);

        let merge = joined.column_by_name("_merge").unwrap();
        let sides: Vec<_> = merge.iter().filter_map(MergeSide::from_cell).collect();
        assert_eq!(
            sides,
            vec![
                MergeSide::LeftOnly,
                MergeSide::Both,
                MergeSide::LeftOnly,
                MergeSide::RightOnly
            ]
        );
        // right-only row takes its key from the right side
        assert_eq!(joined.get(3, 0).unwrap(), &CellValue::Int(4));
        assert!(joined.get_by_name(3, "name").unwrap().is_null());
    }

    #[test]
    fn test_left_and_right_joins() {
        let l = left().join(&right(), &["id"], &JoinOptions::default().with_join_type(JoinType::Left));
        assert_eq!(l.unwrap().row_count(), 3);
        let r = left().join(&right(), &["id"], &JoinOptions::default().with_join_type(JoinType::Right));
        assert_eq!(r.unwrap().row_count(), 2);
    }

    #[test]
    fn test_composite_keys() {
        let a = Table::new(
            vec!["k1", "k2", "v"],
            vec![vec![1, 1, 100], vec![1, 2, 200]],
        )
        .unwrap();
        let b = Table::new(vec!["k2", "k1", "w"], vec![vec![2, 1, 7]]).unwrap();
        let joined = a.join(&b, &["k1", "k2"], &JoinOptions::default()).unwrap();
        assert_eq!(joined.row_count(), 1);
        assert_eq!(joined.get_by_name(0, "v").unwrap(), &CellValue::Int(200));
        assert_eq!(joined.get_by_name(0, "w").unwrap(), &CellValue::Int(7));
    }

    #[test]
    fn test_generated_names_avoid_existing_columns() {
        let a = Table::new(vec!["id", "v", "v_l", "flag"], vec![vec![1, 2, 3, 4]]).unwrap();
        let b = Table::new(vec!["id", "v", "v_r"], vec![vec![1, 5, 6]]).unwrap();
        let options = JoinOptions::default()
            .with_suffixes("_l", "_r")
            .with_indicator("flag");

        let joined = a.join(&b, &["id"], &options).unwrap();
        assert_eq!(
            joined.column_names().unwrap(),
            &["id", "v_l_l", "v_l", "flag", "v_r_r", "v_r", "flag_"]
        );
        assert_eq!(joined.get_by_name(0, "v_l_l").unwrap(), &CellValue::Int(2));
        assert_eq!(joined.get_by_name(0, "v_r_r").unwrap(), &CellValue::Int(5));
        assert_eq!(joined.get_by_name(0, "flag_").unwrap(), &CellValue::from("both"));
    }

    #[test]
    fn test_missing_key() {
        let result = left().join(&right(), &["name"], &JoinOptions::default());
        assert!(matches!(
            result,
            Err(TableError::JoinKeyNotFound { key, side }) if key == "name" && side == "right"
        ));
    }
}
