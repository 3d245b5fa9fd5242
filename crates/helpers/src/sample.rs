use rand::seq::SliceRandom;
use rand::Rng;
use tabkit_table::{Result, Table, TableError};

/// Filter a table down to the rows holding one randomly chosen value of `col`.
///
/// The value is drawn uniformly over the rows of `col`, so frequent values
/// are proportionally more likely. Matching rows keep their original order.
///
/// # Errors
///
/// Returns `TableError::ColumnNotFound` for an unknown column and
/// `TableError::EmptyData` when the table has no rows.
pub fn filter_random<R>(table: &Table, col: &str, rng: &mut R) -> Result<Table>
where
    R: Rng + ?Sized,
{
    let position = table.column_position(col)?;
    let values = table.column(position)?;
    let chosen = values
        .choose(rng)
        .cloned()
        .ok_or_else(|| TableError::EmptyData(format!("no values in column '{col}' to pick from")))?;

    tracing::debug!(column = col, value = %chosen, "picked random value");

    let mut filtered = table.clone();
    filtered.filter_rows(|row| row[position] == chosen);
    Ok(filtered)
}

/// [`filter_random`] with the thread-local generator
pub fn filter_random_thread(table: &Table, col: &str) -> Result<Table> {
    filter_random(table, col, &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_single_value_column() {
        let table = Table::new(vec!["g", "v"], vec![vec![1, 10], vec![1, 20]]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let out = filter_random(&table, "g", &mut rng).unwrap();
        assert_eq!(out, table);
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new(vec!["g"], Vec::<Vec<i64>>::new()).unwrap();
        let result = filter_random_thread(&table, "g");
        assert!(matches!(result, Err(TableError::EmptyData(_))));
    }
}
