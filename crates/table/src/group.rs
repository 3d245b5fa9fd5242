use crate::cell::CellValue;
use crate::error::Result;
use crate::join::row_key;
use crate::table::{Header, RowIndex, Table};
use indexmap::IndexMap;

/// Statistic computed per group by [`Table::aggregate`].
///
/// Nulls are skipped. Statistics with no defined value for the remaining
/// cells (mean of nothing, sample deviation of one value) yield `Null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    Sum,
    Mean,
    Std,
    Min,
    Max,
    Count,
    First,
}

impl Aggregation {
    /// Label used for the inner header level
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Aggregation::Sum => "sum",
            Aggregation::Mean => "mean",
            Aggregation::Std => "std",
            Aggregation::Min => "min",
            Aggregation::Max => "max",
            Aggregation::Count => "count",
            Aggregation::First => "first",
        }
    }

    /// Apply the statistic to a group of cells
    #[must_use]
    pub fn apply(self, values: &[&CellValue]) -> CellValue {
        let present: Vec<&CellValue> = values.iter().copied().filter(|v| !v.is_null()).collect();
        match self {
            Aggregation::Count => CellValue::from(present.len()),
            Aggregation::First => present.first().map_or(CellValue::Null, |v| (*v).clone()),
            Aggregation::Min => present
                .iter()
                .min_by(|a, b| a.total_cmp(b))
                .map_or(CellValue::Null, |v| (*v).clone()),
            Aggregation::Max => present
                .iter()
                .max_by(|a, b| a.total_cmp(b))
                .map_or(CellValue::Null, |v| (*v).clone()),
            Aggregation::Sum => {
                if present.iter().all(|v| matches!(v, CellValue::Int(_))) {
                    CellValue::Int(present.iter().filter_map(|v| v.as_int()).sum())
                } else {
                    CellValue::Float(numbers(&present).iter().sum())
                }
            }
            Aggregation::Mean => {
                let nums = numbers(&present);
                if nums.is_empty() {
                    CellValue::Null
                } else {
                    CellValue::Float(nums.iter().sum::<f64>() / nums.len() as f64)
                }
            }
            Aggregation::Std => {
                let nums = numbers(&present);
                if nums.len() < 2 {
                    return CellValue::Null;
                }
                let n = nums.len() as f64;
                let mean = nums.iter().sum::<f64>() / n;
                let var = nums.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
                CellValue::Float(var.sqrt())
            }
        }
    }
}

fn numbers(values: &[&CellValue]) -> Vec<f64> {
    values.iter().filter_map(|v| v.as_float()).collect()
}

impl Table {
    /// Group rows by `by` and compute statistics for selected columns.
    ///
    /// The result has a two-level header (`[column, statistic]`) and a row
    /// index holding the group keys, sorted ascending.
    ///
    /// # Errors
    ///
    /// Returns `TableError::ColumnNotFound` for unknown group or value columns.
    pub fn aggregate(&self, by: &[&str], specs: &[(&str, &[Aggregation])]) -> Result<Table> {
        let by_positions: Vec<usize> = by
            .iter()
            .map(|name| self.column_position(name))
            .collect::<Result<_>>()?;
        let value_positions: Vec<usize> = specs
            .iter()
            .map(|(name, _)| self.column_position(name))
            .collect::<Result<_>>()?;

        let mut groups: IndexMap<Vec<String>, (Vec<CellValue>, Vec<usize>)> = IndexMap::new();
        for (i, row) in self.data().iter().enumerate() {
            groups
                .entry(row_key(row, &by_positions))
                .or_insert_with(|| {
                    (
                        by_positions.iter().map(|&p| row[p].clone()).collect(),
                        Vec::new(),
                    )
                })
                .1
                .push(i);
        }

        let mut ordered: Vec<(Vec<CellValue>, Vec<usize>)> = groups.into_values().collect();
        ordered.sort_by(|(a, _), (b, _)| {
            a.iter()
                .zip(b.iter())
                .map(|(x, y)| x.total_cmp(y))
                .find(|o| o.is_ne())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let paths: Vec<Vec<String>> = specs
            .iter()
            .flat_map(|(name, aggs)| {
                aggs.iter()
                    .map(move |agg| vec![(*name).to_string(), agg.name().to_string()])
            })
            .collect();

        let mut index_values = Vec::with_capacity(ordered.len());
        let mut rows = Vec::with_capacity(ordered.len());
        for (key, members) in ordered {
            let mut out = Vec::with_capacity(paths.len());
            for ((_, aggs), &pos) in specs.iter().zip(&value_positions) {
                let cells: Vec<&CellValue> = members.iter().map(|&r| &self.data()[r][pos]).collect();
                out.extend(aggs.iter().map(|agg| agg.apply(&cells)));
            }
            rows.push(out);
            index_values.push(key);
        }

        tracing::debug!(groups = rows.len(), columns = paths.len(), "aggregated table");

        let index = RowIndex::new(by.to_vec(), index_values)?;
        Table::from_parts(Header::Nested(paths), rows, Some(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics() {
        let vals = [CellValue::Int(1), CellValue::Int(3), CellValue::Null];
        let refs: Vec<&CellValue> = vals.iter().collect();
        assert_eq!(Aggregation::Sum.apply(&refs), CellValue::Int(4));
        assert_eq!(Aggregation::Mean.apply(&refs), CellValue::Float(2.0));
        assert_eq!(Aggregation::Count.apply(&refs), CellValue::Int(2));
        assert_eq!(Aggregation::Min.apply(&refs), CellValue::Int(1));
        assert_eq!(Aggregation::Max.apply(&refs), CellValue::Int(3));
        let std = Aggregation::Std.apply(&refs).as_float().unwrap();
        assert!((std - 1.414_213_562).abs() < 1e-6);
    }

    #[test]
    fn test_std_of_single_value_is_null() {
        let one = CellValue::Int(5);
        assert!(Aggregation::Std.apply(&[&one]).is_null());
    }

    #[test]
    fn test_aggregate_builds_two_level_header() {
        let table = Table::new(
            vec!["g", "val"],
            vec![
                vec![CellValue::from("b"), CellValue::Int(5)],
                vec![CellValue::from("a"), CellValue::Int(1)],
                vec![CellValue::from("a"), CellValue::Int(3)],
            ],
        )
        .unwrap();

        let grouped = table
            .aggregate(&["g"], &[("val", &[Aggregation::Mean, Aggregation::Std])])
            .unwrap();

        assert_eq!(
            grouped.header(),
            &Header::Nested(vec![
                vec!["val".to_string(), "mean".to_string()],
                vec!["val".to_string(), "std".to_string()],
            ])
        );
        let index = grouped.index().unwrap();
        assert_eq!(index.names(), &["g"]);
        assert_eq!(index.values()[0], vec![CellValue::from("a")]);
        assert_eq!(grouped.get(0, 0).unwrap(), &CellValue::Float(2.0));
        assert!(grouped.get(1, 1).unwrap().is_null());
    }
}
