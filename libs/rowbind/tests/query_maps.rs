mod common;
use common::*;

use pretty_assertions::assert_eq;
use rowbind::{ErrorKind, MapError, RowMap, Value};
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn test_query_maps_two_rows() {
    init_tracing();
    let db = MockDb::users();
    let cancel = CancellationToken::new();

    let rows = rowbind::query_maps(&cancel, &db, "SELECT * FROM users", &[])
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    let expected: RowMap = [
        ("id", Value::Int64(1)),
        ("name", text("John")),
        ("email", text("john@example.com")),
    ]
    .into_iter()
    .collect();
    assert_eq!(rows[0], expected);
    assert_eq!(rows[1].get("name"), Some(&text("Jane")));
    assert_eq!(db.close_count(), 1);
}

#[tokio::test]
async fn test_query_maps_empty_result() {
    let db = MockDb::new(&["id"], vec![]);
    let cancel = CancellationToken::new();

    let rows = rowbind::query_maps(&cancel, &db, "SELECT id FROM users WHERE false", &[])
        .await
        .unwrap();

    assert!(rows.is_empty());
    assert_eq!(db.close_count(), 1);
}

#[tokio::test]
async fn test_query_maps_values_untouched() {
    let db = MockDb::new(
        &["n", "blob", "missing"],
        vec![vec![Value::Decimal(1050, 2), Value::Bytes(vec![0, 1]), Value::Null]],
    );
    let cancel = CancellationToken::new();

    let rows = rowbind::query_maps(&cancel, &db, "SELECT n, blob, missing FROM t", &[])
        .await
        .unwrap();

    assert_eq!(rows[0].get("n"), Some(&Value::Decimal(1050, 2)));
    assert_eq!(rows[0].get("blob"), Some(&Value::Bytes(vec![0, 1])));
    assert_eq!(rows[0].get("missing"), Some(&Value::Null));
}

#[tokio::test]
async fn test_query_maps_duplicate_column_last_wins() {
    let db = MockDb::new(
        &["id", "name", "id"],
        vec![vec![Value::Int64(1), text("a"), Value::Int64(99)]],
    );
    let cancel = CancellationToken::new();

    let rows = rowbind::query_maps(&cancel, &db, "SELECT u.id, u.name, o.id FROM u JOIN o", &[])
        .await
        .unwrap();

    assert_eq!(rows[0].len(), 2);
    assert_eq!(rows[0].get("id"), Some(&Value::Int64(99)));
    assert_eq!(rows[0].keys().collect::<Vec<_>>(), ["id", "name"]);
}

#[tokio::test]
async fn test_query_maps_query_failure() {
    let db = MockDb {
        query_error: Some(rowbind::DriverError::protocol("relation \"nope\" does not exist")),
        ..MockDb::users()
    };
    let cancel = CancellationToken::new();

    let err = rowbind::query_maps(&cancel, &db, "SELECT * FROM nope", &[])
        .await
        .unwrap_err();

    assert!(matches!(err, MapError::Query(_)), "{err}");
    assert!(err.to_string().contains("does not exist"));
    assert_eq!(db.close_count(), 0);
}

#[tokio::test]
async fn test_query_maps_row_failure_closes_result_set() {
    let db = MockDb {
        values_error_at: Some(1),
        ..MockDb::users()
    };
    let cancel = CancellationToken::new();

    let err = rowbind::query_maps(&cancel, &db, "SELECT * FROM users", &[])
        .await
        .unwrap_err();

    assert!(matches!(err, MapError::RowRetrieval(_)), "{err}");
    assert_eq!(db.close_count(), 1);
}

#[tokio::test]
async fn test_query_maps_iteration_failure() {
    let db = MockDb {
        iteration_error: Some(rowbind::DriverError::io("connection reset by peer")),
        ..MockDb::users()
    };
    let cancel = CancellationToken::new();

    let err = rowbind::query_maps(&cancel, &db, "SELECT * FROM users", &[])
        .await
        .unwrap_err();

    match &err {
        MapError::Iteration(e) => assert_eq!(e.kind(), ErrorKind::Io),
        other => panic!("expected iteration error, got {other}"),
    }
    assert_eq!(db.close_count(), 1);
}

#[tokio::test]
async fn test_query_maps_forwards_cancellation() {
    let db = MockDb::users();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = rowbind::query_maps(&cancel, &db, "SELECT * FROM users", &[])
        .await
        .unwrap_err();

    assert_eq!(err.driver_error().map(|e| e.kind()), Some(ErrorKind::Cancelled));
}
