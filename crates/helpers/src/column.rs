use tabkit_table::{CellValue, Result, Table, TableError};

/// A row function with a declared number of arguments.
pub struct RowFn<'a> {
    arity: usize,
    func: Box<dyn Fn(&[CellValue]) -> CellValue + 'a>,
}

impl<'a> RowFn<'a> {
    /// Function of one argument
    pub fn unary<F>(f: F) -> Self
    where
        F: Fn(&CellValue) -> CellValue + 'a,
    {
        Self::with_arity(1, move |args| f(&args[0]))
    }

    /// Function of two arguments
    pub fn binary<F>(f: F) -> Self
    where
        F: Fn(&CellValue, &CellValue) -> CellValue + 'a,
    {
        Self::with_arity(2, move |args| f(&args[0], &args[1]))
    }

    /// Function of three arguments
    pub fn ternary<F>(f: F) -> Self
    where
        F: Fn(&CellValue, &CellValue, &CellValue) -> CellValue + 'a,
    {
        Self::with_arity(3, move |args| f(&args[0], &args[1], &args[2]))
    }

    /// Function receiving exactly `arity` arguments as a slice
    pub fn with_arity<F>(arity: usize, f: F) -> Self
    where
        F: Fn(&[CellValue]) -> CellValue + 'a,
    {
        RowFn {
            arity,
            func: Box::new(f),
        }
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Call the function, checking the argument count first
    pub fn call(&self, args: &[CellValue]) -> Result<CellValue> {
        self.check_arity(args.len())?;
        Ok((self.func)(args))
    }

    fn check_arity(&self, actual: usize) -> Result<()> {
        if actual == self.arity {
            Ok(())
        } else {
            Err(TableError::ArityMismatch {
                expected: self.arity,
                actual,
            })
        }
    }
}

/// Argument passed to a [`RowFn`]: a column's value in the current row,
/// or a fixed value shared by every row.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Column(String),
    Value(CellValue),
}

impl Arg {
    #[must_use]
    pub fn col(name: &str) -> Self {
        Arg::Column(name.to_string())
    }

    #[must_use]
    pub fn value<T: Into<CellValue>>(value: T) -> Self {
        Arg::Value(value.into())
    }
}

impl From<&str> for Arg {
    fn from(name: &str) -> Self {
        Arg::col(name)
    }
}

enum Resolved<'a> {
    Position(usize),
    Fixed(&'a CellValue),
}

/// Create a new column by applying `func` row-wise to `args`.
///
/// ```
/// use tabkit_helpers::{create_column, RowFn};
/// use tabkit_table::{CellValue, Table};
///
/// let people = Table::new(vec!["first", "last"], vec![vec!["myfirst", "mylast"]]).unwrap();
/// let full_name = RowFn::binary(|first, last| CellValue::from(format!("{last}, {first}")));
///
/// let out = create_column(&people, "mynewcolumn", &full_name, &["first".into(), "last".into()]).unwrap();
/// assert_eq!(out.get_by_name(0, "mynewcolumn").unwrap(), &CellValue::from("mylast, myfirst"));
/// ```
///
/// # Errors
///
/// - `TableError::ArityMismatch` if `args` does not match the function's arity
/// - `TableError::ColumnNotFound` if a referenced column does not exist
/// - `TableError::DuplicateColumnName` if `colname` already exists
pub fn create_column(table: &Table, colname: &str, func: &RowFn<'_>, args: &[Arg]) -> Result<Table> {
    func.check_arity(args.len())?;

    let resolved: Vec<Resolved<'_>> = args
        .iter()
        .map(|arg| match arg {
            Arg::Column(name) => table.column_position(name).map(Resolved::Position),
            Arg::Value(value) => Ok(Resolved::Fixed(value)),
        })
        .collect::<Result<_>>()?;

    let mut values = Vec::with_capacity(table.row_count());
    let mut call_args: Vec<CellValue> = Vec::with_capacity(resolved.len());
    for row in table.rows() {
        call_args.clear();
        call_args.extend(resolved.iter().map(|r| match r {
            Resolved::Position(p) => row[*p].clone(),
            Resolved::Fixed(value) => (*value).clone(),
        }));
        values.push(func.call(&call_args)?);
    }

    let mut out = table.clone();
    out.column_append(colname, values)?;
    Ok(out)
}
