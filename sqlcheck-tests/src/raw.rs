use crate::silent_logs;
use sqlcheck_core::{ColumnType, Connection, Error, Position, Statement, Step};

pub fn select_one<C: Connection>(connection: &C) {
    let mut statement = connection
        .prepare("SELECT 1")
        .expect("Could not prepare SELECT 1");
    // No row before the first step
    assert_eq!(statement.column_count(), 1);
    assert_eq!(statement.column_type(Position::literal::<0>()), None);
    assert_eq!(statement.column_int64(Position::literal::<0>()), None);

    assert_eq!(statement.step().expect("Failed to step"), Step::Row);
    assert_eq!(
        statement.column_type(Position::literal::<0>()),
        Some(ColumnType::Integer)
    );
    assert_eq!(statement.column_int64(Position::literal::<0>()), Some(1));
    assert_eq!(statement.step().expect("Failed to step"), Step::Done);
    assert_eq!(statement.column_type(Position::literal::<0>()), None);

    statement.reset().expect("Failed to reset");
    assert_eq!(statement.column_int64(Position::literal::<0>()), None);
    assert_eq!(statement.step().expect("Failed to step"), Step::Row);
    assert_eq!(statement.column_int64(Position::literal::<0>()), Some(1));
}

pub fn invalid_sql<C: Connection>(connection: &C) {
    silent_logs! {
        let error = connection
            .prepare("SELEC 1 FROM")
            .err()
            .expect("Invalid SQL was prepared");
        assert!(error.status().is_some(), "Expected an engine error, got {:?}", error);
        assert!(matches!(connection.prepare(""), Err(Error::EmptyStatement)));
        assert!(matches!(connection.prepare("  -- nothing  "), Err(Error::EmptyStatement)));
        assert!(matches!(
            connection.prepare("SELECT 1; SELECT 2"),
            Err(Error::TrailingSql(..))
        ));
    }
    for sql in [
        "SELECT 1;  ",
        "SELECT 1; -- done",
        "SELECT 1 /* one */; /* nothing */\n",
    ] {
        let mut statement = connection
            .prepare(sql)
            .expect("Trailing comments are not a second statement");
        assert_eq!(statement.step().expect("Failed to step"), Step::Row);
        assert_eq!(statement.column_int64(Position::literal::<0>()), Some(1));
    }
    silent_logs! {
        assert!(matches!(
            connection.prepare("SELECT 1; -- done\nSELECT 2"),
            Err(Error::TrailingSql(..))
        ));
    }
}

pub fn scalars<C: Connection>(connection: &C) {
    let mut statement = connection
        .prepare("SELECT 1.5, 'abc', X'00FF', NULL, -3")
        .expect("Could not prepare the scalars query");
    assert_eq!(statement.step().expect("Failed to step"), Step::Row);
    assert_eq!(statement.column_count(), 5);
    let [float, text, blob, null, integer] = [0, 1, 2, 3, 4].map(|i| {
        Position::new(i).expect("Position is in range")
    });

    assert_eq!(statement.column_double(float), Some(1.5));
    assert_eq!(statement.column_text(text), Some("abc"));
    assert_eq!(statement.column_blob(blob), Some(&[0x00u8, 0xFF][..]));
    assert_eq!(statement.column_type(null), Some(ColumnType::Null));
    assert_eq!(statement.column_int64(integer), Some(-3));

    // Another dynamic type reads as absent, never as a converted value
    assert_eq!(statement.column_int64(float), None);
    assert_eq!(statement.column_double(integer), None);
    assert_eq!(statement.column_text(integer), None);
    assert_eq!(statement.column_int64(text), None);
    assert_eq!(statement.column_blob(text), None);
    assert_eq!(statement.column_text(blob), None);
    for read in [
        statement.column_int64(null).map(|_| ()),
        statement.column_double(null).map(|_| ()),
        statement.column_text(null).map(|_| ()),
        statement.column_blob(null).map(|_| ()),
    ] {
        assert_eq!(read, None);
    }

    // Past the last column
    let past = Position::literal::<5>();
    assert_eq!(statement.column_type(past), None);
    assert_eq!(statement.column_int64(past), None);
    assert_eq!(statement.column_text(past), None);

    assert_eq!(statement.step().expect("Failed to step"), Step::Done);
}

pub fn bind_values<C: Connection>(connection: &C) {
    let mut statement = connection
        .prepare("SELECT ?, ?, ?, ?, ?")
        .expect("Could not prepare the query with parameters");
    assert_eq!(statement.bind_parameter_count(), 5);
    statement
        .bind_int64(Position::literal::<0>(), 123456)
        .expect("Failed to bind the integer");
    statement
        .bind_double(Position::literal::<1>(), -0.25)
        .expect("Failed to bind the float");
    statement
        .bind_text(Position::literal::<2>(), "Hello, 世界")
        .expect("Failed to bind the text");
    statement
        .bind_blob(Position::literal::<3>(), &[1, 2, 3])
        .expect("Failed to bind the blob");
    statement
        .bind_null(Position::literal::<4>())
        .expect("Failed to bind NULL");
    assert_eq!(statement.step().expect("Failed to step"), Step::Row);
    assert_eq!(statement.column_int64(Position::literal::<0>()), Some(123456));
    assert_eq!(statement.column_double(Position::literal::<1>()), Some(-0.25));
    assert_eq!(
        statement.column_text(Position::literal::<2>()),
        Some("Hello, 世界")
    );
    assert_eq!(
        statement.column_blob(Position::literal::<3>()),
        Some(&[1u8, 2, 3][..])
    );
    assert_eq!(
        statement.column_type(Position::literal::<4>()),
        Some(ColumnType::Null)
    );
    assert_eq!(statement.step().expect("Failed to step"), Step::Done);
}

pub fn bind_out_of_range<C: Connection>(connection: &C) {
    let mut statement = connection
        .prepare("SELECT ?")
        .expect("Could not prepare the query with one parameter");
    silent_logs! {
        let error = statement
            .bind_int64(Position::literal::<1>(), 1)
            .expect_err("Binding past the last parameter must fail");
        assert!(error.status().is_some(), "Expected an engine error, got {:?}", error);
    }
    statement
        .bind_int64(Position::literal::<0>(), 1)
        .expect("Failed to bind the only parameter");
}

pub fn text_round_trip<C: Connection>(connection: &C) {
    let mut statement = connection
        .prepare("SELECT ?")
        .expect("Could not prepare the query with one parameter");
    let long = "x".repeat(100_000);
    for text in ["", "a", "abc", "with\0nul", "ünïcödé", long.as_str()] {
        statement.reset().expect("Failed to reset");
        statement
            .bind_text(Position::literal::<0>(), text)
            .expect("Failed to bind the text");
        assert_eq!(statement.step().expect("Failed to step"), Step::Row);
        let read = statement
            .column_text(Position::literal::<0>())
            .expect("Text was not read back");
        assert_eq!(read.len(), text.len());
        assert_eq!(read.as_bytes(), text.as_bytes());
        assert_eq!(statement.step().expect("Failed to step"), Step::Done);
    }
}

pub fn reuse<C: Connection>(connection: &C) {
    connection
        .execute("DROP TABLE IF EXISTS \"raw_reuse\"")
        .expect("Failed to drop raw_reuse");
    connection
        .execute("CREATE TABLE \"raw_reuse\" (\"value\" INTEGER NOT NULL)")
        .expect("Failed to create raw_reuse");
    let mut insert = connection
        .prepare("INSERT INTO \"raw_reuse\" (\"value\") VALUES (?)")
        .expect("Could not prepare the insert");
    for value in 0..10 {
        insert.reset().expect("Failed to reset the insert");
        insert
            .bind_int64(Position::literal::<0>(), value)
            .expect("Failed to bind the value");
        assert_eq!(insert.step().expect("Failed to insert"), Step::Done);
    }
    insert.clear_bindings().expect("Failed to clear the bindings");
    insert.reset().expect("Failed to reset the insert");
    silent_logs! {
        // NOT NULL constraint
        let error = insert.step().expect_err("Inserted a NULL value");
        assert!(error.status().is_some());
    }
    drop(insert);

    let mut select = connection
        .prepare("SELECT SUM(\"value\"), COUNT(*) FROM \"raw_reuse\"")
        .expect("Could not prepare the select");
    assert_eq!(select.step().expect("Failed to step"), Step::Row);
    assert_eq!(select.column_int64(Position::literal::<0>()), Some(45));
    assert_eq!(select.column_int64(Position::literal::<1>()), Some(10));
}
