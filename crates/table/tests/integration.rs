use tabkit_table::{
    column_index_to_letters, Aggregation, CellValue, Header, JoinOptions, JoinType, RowIndex,
    Table, TableError,
};

// ===== Table Creation Tests =====

#[test]
fn test_table_from_rows() {
    let table = Table::new(vec!["a", "b", "c"], vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();

    assert_eq!(table.row_count(), 2);
    assert_eq!(table.col_count(), 3);
    assert_eq!(table.get(0, 0).unwrap(), &CellValue::Int(1));
    assert_eq!(table.get(1, 2).unwrap(), &CellValue::Int(6));
}

#[test]
fn test_out_of_bounds_access() {
    let table = Table::new(vec!["a"], vec![vec![1]]).unwrap();

    assert!(matches!(
        table.get(5, 0),
        Err(TableError::RowIndexOutOfBounds { index: 5, count: 1 })
    ));
    assert!(matches!(
        table.column(3),
        Err(TableError::ColumnIndexOutOfBounds { index: 3, count: 1 })
    ));
    assert!(matches!(
        table.column_by_name("zzz"),
        Err(TableError::ColumnNotFound { .. })
    ));
}

#[test]
fn test_nested_table_with_index() {
    let index = RowIndex::new(vec!["g"], vec![vec!["a".into()], vec!["b".into()]]).unwrap();
    let table = Table::nested(
        vec![
            vec!["val".to_string(), "min".to_string()],
            vec!["val".to_string(), "max".to_string()],
        ],
        vec![
            vec![CellValue::Int(1), CellValue::Int(3)],
            vec![CellValue::Int(5), CellValue::Int(5)],
        ],
        Some(index),
    )
    .unwrap();

    assert!(table.header().is_hierarchical());
    assert_eq!(table.index().map(RowIndex::len), Some(2));
}

#[test]
fn test_nested_rejects_uneven_depth() {
    let result = Table::nested(
        vec![vec!["a".to_string(), "x".to_string()], vec!["b".to_string()]],
        vec![],
        None,
    );
    assert!(matches!(result, Err(TableError::LengthMismatch { .. })));
}

// ===== Join Tests =====

#[test]
fn test_full_join_keeps_both_sides() {
    let left = Table::new(vec!["id", "v"], vec![vec![1, 10], vec![2, 20]]).unwrap();
    let right = Table::new(vec!["id", "v"], vec![vec![2, 21], vec![3, 30]]).unwrap();

    let joined = left
        .join(
            &right,
            &["id"],
            &JoinOptions::full().with_suffixes("_l", "_r"),
        )
        .unwrap();

    assert_eq!(joined.column_names().unwrap(), &["id", "v_l", "v_r"]);
    assert_eq!(
        joined.column_by_name("id").unwrap(),
        vec![CellValue::Int(1), CellValue::Int(2), CellValue::Int(3)]
    );
    assert_eq!(
        joined.column_by_name("v_r").unwrap(),
        vec![CellValue::Null, CellValue::Int(21), CellValue::Int(30)]
    );
}

#[test]
fn test_join_matches_int_and_float_keys() {
    let left = Table::new(vec!["id", "x"], vec![vec![CellValue::Int(1), CellValue::Int(5)]]).unwrap();
    let right =
        Table::new(vec!["id", "y"], vec![vec![CellValue::Float(1.0), CellValue::Int(6)]]).unwrap();

    let joined = left
        .join(&right, &["id"], &JoinOptions::default().with_join_type(JoinType::Inner))
        .unwrap();
    assert_eq!(joined.row_count(), 1);
}

#[test]
fn test_join_with_duplicate_keys_expands() {
    let left = Table::new(vec!["id", "x"], vec![vec![1, 1], vec![1, 2]]).unwrap();
    let right = Table::new(vec!["id", "y"], vec![vec![1, 3], vec![1, 4]]).unwrap();

    let joined = left.join(&right, &["id"], &JoinOptions::default()).unwrap();
    assert_eq!(joined.row_count(), 4);
}

// ===== Aggregation Tests =====

#[test]
fn test_aggregate_multiple_keys() {
    let table = Table::new(
        vec!["g1", "g2", "a"],
        vec![
            vec![CellValue::from("x"), CellValue::from("p"), CellValue::Int(1)],
            vec![CellValue::from("x"), CellValue::from("q"), CellValue::Int(2)],
            vec![CellValue::from("x"), CellValue::from("p"), CellValue::Int(3)],
        ],
    )
    .unwrap();

    let grouped = table
        .aggregate(&["g1", "g2"], &[("a", &[Aggregation::Sum, Aggregation::Count])])
        .unwrap();

    assert_eq!(grouped.row_count(), 2);
    assert_eq!(grouped.index().unwrap().names(), &["g1", "g2"]);
    assert_eq!(grouped.get(0, 0).unwrap(), &CellValue::Int(4));
    assert_eq!(grouped.get(0, 1).unwrap(), &CellValue::Int(2));
    assert!(matches!(grouped.header(), Header::Nested(paths) if paths.len() == 2));
}

#[test]
fn test_aggregate_unknown_column() {
    let table = Table::new(vec!["g"], vec![vec![1]]).unwrap();
    let result = table.aggregate(&["g"], &[("missing", &[Aggregation::Sum])]);
    assert!(matches!(result, Err(TableError::ColumnNotFound { .. })));
}

// ===== Misc =====

#[test]
fn test_cell_values_serialize_untagged() {
    let row = vec![
        CellValue::Int(1),
        CellValue::from("x"),
        CellValue::Null,
        CellValue::from(vec![1, 2]),
    ];
    let json = serde_json::to_string(&row).unwrap();
    assert_eq!(json, r#"[1,"x",null,[1,2]]"#);
}

#[test]
fn test_column_letters() {
    assert_eq!(column_index_to_letters(27), "AB");
}
