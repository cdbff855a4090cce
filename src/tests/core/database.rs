// Tests for the Database session: records, single rows, raw dumps

use crate::config::{ConfigError, OrmConfig};
use crate::database::*;
use crate::tests::test_helpers::{open_test_database, User, USERS_FIXTURE};
use chrono::NaiveDateTime;
use tempfile::TempDir;

#[test]
fn test_query_records_maps_columns_to_fields() {
    let db = open_test_database();

    let users: Vec<User> = db
        .query_records("SELECT * FROM users ORDER BY user_id", [])
        .unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(
        users[0],
        User {
            user_id: 1,
            name: "alice".to_string(),
            email: Some("alice@example.com".to_string()),
            created_at: Some(
                NaiveDateTime::parse_from_str("2024-03-01 12:30:00", "%Y-%m-%d %H:%M:%S").unwrap()
            ),
            score: 9.5,
            active: true,
            home_url: Some("https://alice.dev".to_string()),
        }
    );
}

#[test]
fn test_query_records_null_columns_keep_defaults() {
    let db = open_test_database();

    let users: Vec<User> = db
        .query_records("SELECT * FROM users WHERE user_id = ?1", [2])
        .unwrap();

    assert_eq!(
        users,
        vec![User {
            user_id: 2,
            name: "bob".to_string(),
            active: false,
            ..User::default()
        }]
    );
}

#[test]
fn test_query_records_with_column_aliases_and_subset() {
    let db = open_test_database();

    // Only some columns selected; an alias that resolves through the initialism form
    let users: Vec<User> = db
        .query_records("SELECT name, user_id AS user_id, 'ignored' AS nickname FROM users", [])
        .unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[1].user_id, 2);
    assert_eq!(users[1].name, "bob");
    assert_eq!(users[1].score, 0.0);
}

#[derive(Debug, Default)]
struct BadRecord {
    user_id: i64,
}

impl Record for BadRecord {
    fn fields() -> Vec<FieldDescriptor> {
        // Declared as Int32 but scanned into an i64
        vec![FieldDescriptor::new("UserID", TypeDescriptor::of(ValueKind::Int32))]
    }

    fn destinations(&mut self) -> Vec<(&'static str, Destination<'_>)> {
        vec![("UserID", Destination::I64(Slot::Value(&mut self.user_id)))]
    }
}

#[test]
fn test_query_records_reports_field_type_mismatch() {
    let db = open_test_database();

    let err = db
        .query_records::<BadRecord, _>("SELECT user_id FROM users", [])
        .unwrap_err();

    match err {
        DatabaseError::Scan(ScanError::Convert { column, source }) => {
            assert_eq!(column, 0);
            assert!(matches!(source, ConvertError::Mismatch { .. }));
        }
        other => panic!("expected mismatch, got {:?}", other),
    }
}

#[test]
fn test_query_row_into() {
    let db = open_test_database();

    let mut name = String::new();
    let mut score: Option<f64> = Some(1.0);
    let found = {
        let mut slots = vec![
            ColumnSlot::new(Destination::Text(Slot::Value(&mut name))),
            ColumnSlot::new(Destination::F64(Slot::Nullable(&mut score))),
        ];
        db.query_row_into("SELECT name, score FROM users WHERE user_id = 2", [], &mut slots)
            .unwrap()
    };

    assert!(found);
    assert_eq!(name, "bob");
    // NULL score skipped
    assert_eq!(score, Some(1.0));
}

#[test]
fn test_query_row_into_no_rows() {
    let db = open_test_database();

    let mut name = String::from("unchanged");
    let found = {
        let mut slots = vec![ColumnSlot::new(Destination::Text(Slot::Value(&mut name)))];
        db.query_row_into("SELECT name FROM users WHERE user_id = 99", [], &mut slots)
            .unwrap()
    };

    assert!(!found);
    assert_eq!(name, "unchanged");
}

#[test]
fn test_query_row_into_sqlite_error() {
    let db = open_test_database();
    let err = db
        .query_row_into("SELECT * FROM no_such_table", [], &mut [])
        .unwrap_err();
    assert!(matches!(err, DatabaseError::Sqlite(_)));
}

#[test]
fn test_query_raw_and_columns() {
    let db = open_test_database();

    let columns = db.columns("SELECT user_id, home_url FROM users").unwrap();
    assert_eq!(columns, vec!["user_id", "home_url"]);

    let (columns, rows) = db
        .query_raw("SELECT user_id, email FROM users ORDER BY user_id", [])
        .unwrap();
    assert_eq!(columns, vec!["user_id", "email"]);
    assert_eq!(
        rows,
        vec![
            vec![RawValue::Integer(1), RawValue::Text("alice@example.com".into())],
            vec![RawValue::Integer(2), RawValue::Null],
        ]
    );
}

#[test]
fn test_open_file_database() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("osm.db");

    {
        let db = Database::open(&db_path, &OrmConfig::default()).unwrap();
        assert_eq!(db.file_path(), Some(db_path.as_path()));
        db.connection().execute_batch(USERS_FIXTURE).unwrap();
    }

    let db = Database::open(&db_path, &OrmConfig::default()).unwrap();
    let users: Vec<User> = db.query_records("SELECT * FROM users", []).unwrap();
    assert_eq!(users.len(), 2);
}

#[test]
fn test_converter_follows_config_formats() {
    let config = OrmConfig {
        datetime_format: "%d/%m/%Y %H:%M".to_string(),
        ..OrmConfig::default()
    };
    let db = Database::open_in_memory(&config).unwrap();
    assert_eq!(db.converter().datetime_format(), "%d/%m/%Y %H:%M");

    let mut when: Option<NaiveDateTime> = None;
    {
        let mut slots = vec![ColumnSlot::new(Destination::DateTime(Slot::Nullable(&mut when)))];
        db.query_row_into("SELECT '01/02/2024 08:15'", [], &mut slots).unwrap();
    }
    assert_eq!(
        when,
        Some(NaiveDateTime::parse_from_str("2024-02-01 08:15:00", "%Y-%m-%d %H:%M:%S").unwrap())
    );
}

#[test]
fn test_open_with_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("osm.db");
    let config_path = temp_dir.path().join("osm.toml");

    // Missing config file falls back to defaults
    let db = Database::open_with_config_file(&db_path, &config_path).unwrap();
    assert_eq!(db.converter().date_format(), "%Y-%m-%d");
    drop(db);

    std::fs::write(&config_path, "date_format = \"%d.%m.%Y\"\n").unwrap();
    let db = Database::open_with_config_file(&db_path, &config_path).unwrap();
    assert_eq!(db.converter().date_format(), "%d.%m.%Y");
}

#[test]
fn test_open_with_malformed_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("osm.toml");
    std::fs::write(&config_path, "busy_timeout_ms = [1, 2]\n").unwrap();

    let err = Database::open_with_config_file(temp_dir.path().join("osm.db"), &config_path)
        .err()
        .expect("malformed config must fail");
    assert!(matches!(err, DatabaseError::Config(ConfigError::Parse { .. })));
}
