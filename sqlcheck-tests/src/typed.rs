use indoc::indoc;
use sqlcheck_core::{Blob, Connection, Position, Statement, Step, Text, TypeList, TypedStatement};

fn declared<S: Statement, Args: TypeList, Cols: TypeList>(
    _statement: &TypedStatement<S, Args, Cols>,
) -> (usize, usize) {
    (
        TypedStatement::<S, Args, Cols>::ARGUMENTS,
        TypedStatement::<S, Args, Cols>::COLUMNS,
    )
}

pub fn typed_select<C: Connection>(connection: &C) {
    type Args = (i64, f64, Text);
    type Cols = (i64, f64, Text, i64);
    let mut statement = connection
        .prepare_typed::<Args, Cols>("SELECT ?, ?, ?, -3")
        .expect("Could not prepare the typed statement");
    assert_eq!(declared(&statement), (3, 4));
    statement.bind::<0>(123).expect("Failed to bind argument 0");
    statement.bind::<1>(456.0).expect("Failed to bind argument 1");
    statement.bind::<2>("abc").expect("Failed to bind argument 2");
    assert_eq!(statement.step().expect("Failed to step"), Step::Row);
    assert_eq!(statement.column_count(), 4);
    assert_eq!(statement.column::<0>(), Some(123));
    assert_eq!(statement.column::<1>(), Some(456.0));
    assert_eq!(statement.column::<2>(), Some("abc"));
    assert_eq!(statement.column::<3>(), Some(-3));
    assert_eq!(statement.step().expect("Failed to step"), Step::Done);
}

pub fn typed_matches_raw<C: Connection>(connection: &C) {
    const SQL: &str = "SELECT ?, ?, ?, ?";
    let mut typed = connection
        .prepare_typed::<(i64, f64, Text, Blob), (i64, f64, Text, Blob)>(SQL)
        .expect("Could not prepare the typed statement");
    let mut raw = connection
        .prepare(SQL)
        .expect("Could not prepare the raw statement");
    let blob = [0xDEu8, 0xAD, 0xBE, 0xEF];

    typed.bind::<0>(i64::MIN).expect("Failed to bind");
    typed.bind::<1>(f64::EPSILON).expect("Failed to bind");
    typed.bind::<2>("same").expect("Failed to bind");
    typed.bind::<3>(&blob[..]).expect("Failed to bind");
    raw.bind_int64(Position::literal::<0>(), i64::MIN)
        .expect("Failed to bind");
    raw.bind_double(Position::literal::<1>(), f64::EPSILON)
        .expect("Failed to bind");
    raw.bind_text(Position::literal::<2>(), "same")
        .expect("Failed to bind");
    raw.bind_blob(Position::literal::<3>(), &blob)
        .expect("Failed to bind");

    assert_eq!(typed.step().expect("Failed to step"), Step::Row);
    assert_eq!(raw.step().expect("Failed to step"), Step::Row);
    assert_eq!(typed.column::<0>(), raw.column_int64(Position::literal::<0>()));
    assert_eq!(typed.column::<1>(), raw.column_double(Position::literal::<1>()));
    assert_eq!(typed.column::<2>(), raw.column_text(Position::literal::<2>()));
    assert_eq!(typed.column::<3>(), raw.column_blob(Position::literal::<3>()));
    assert_eq!(typed.column::<3>(), Some(&blob[..]));
    assert_eq!(typed.step().expect("Failed to step"), Step::Done);
    assert_eq!(raw.step().expect("Failed to step"), Step::Done);
}

pub fn typed_mismatch<C: Connection>(connection: &C) {
    // Declared as integers, the engine produces NULL, text, float and blob
    let mut statement = connection
        .prepare_typed::<(), (i64, i64, i64, i64)>("SELECT NULL, '1', 1.0, X'01'")
        .expect("Could not prepare the typed statement");
    assert_eq!(statement.step().expect("Failed to step"), Step::Row);
    assert_eq!(statement.column::<0>(), None);
    assert_eq!(statement.column::<1>(), None);
    assert_eq!(statement.column::<2>(), None);
    assert_eq!(statement.column::<3>(), None);

    // Declared with more columns than the query has, the extra ones are absent
    let mut statement = connection
        .prepare_typed::<(), (i64, Text)>("SELECT 7")
        .expect("Could not prepare the typed statement");
    assert_eq!(statement.step().expect("Failed to step"), Step::Row);
    assert_eq!(statement.column::<0>(), Some(7));
    assert_eq!(statement.column::<1>(), None);

    // A missing cell is absent, not a NULL cell
    let mut statement = connection
        .prepare_typed::<(), (i64, Option<i64>)>("SELECT 7")
        .expect("Could not prepare the typed statement");
    assert_eq!(statement.column::<0>(), None);
    assert_eq!(statement.step().expect("Failed to step"), Step::Row);
    assert_eq!(statement.column::<1>(), None);

    let mut statement = connection
        .prepare_typed::<(), (Option<i64>, Option<Text>)>("SELECT NULL, 'x'")
        .expect("Could not prepare the typed statement");
    assert_eq!(statement.column::<0>(), None);
    assert_eq!(statement.step().expect("Failed to step"), Step::Row);
    assert_eq!(statement.column::<0>(), Some(None));
    assert_eq!(statement.column::<1>(), Some(Some("x")));
    assert_eq!(statement.step().expect("Failed to step"), Step::Done);
    assert_eq!(statement.column::<0>(), None);
}

pub fn typed_nullable<C: Connection>(connection: &C) {
    connection
        .execute("DROP TABLE IF EXISTS \"typed_person\"")
        .expect("Failed to drop typed_person");
    connection
        .execute(indoc! {r#"
            CREATE TABLE "typed_person" (
                "name" TEXT NOT NULL,
                "age" INTEGER,
                "height" REAL
            )
        "#})
        .expect("Failed to create typed_person");

    let mut insert = connection
        .prepare_typed::<(Text, Option<i64>, Option<f64>), ()>(
            "INSERT INTO \"typed_person\" (\"name\", \"age\", \"height\") VALUES (?, ?, ?)",
        )
        .expect("Could not prepare the insert");
    let people = [
        ("Ada", Some(36), Some(1.65)),
        ("Brendan", None, Some(1.80)),
        ("Grace", Some(3), None),
    ];
    for (name, age, height) in people {
        insert.reset().expect("Failed to reset the insert");
        insert.bind::<0>(name).expect("Failed to bind the name");
        insert.bind::<1>(age).expect("Failed to bind the age");
        insert.bind::<2>(height).expect("Failed to bind the height");
        assert_eq!(insert.step().expect("Failed to insert"), Step::Done);
    }
    drop(insert);

    let mut select = connection
        .prepare_typed::<(), (Text, Option<i64>, Option<f64>, Option<Text>)>(indoc! {r#"
            SELECT "name", "age", "height", 42
            FROM "typed_person"
            ORDER BY "name"
        "#})
        .expect("Could not prepare the select");
    let mut found = Vec::new();
    while select.step().expect("Failed to step") == Step::Row {
        let name = select.column::<0>().expect("Name is NOT NULL").to_string();
        let age = select.column::<1>().expect("Age is an integer or NULL");
        let height = select.column::<2>().expect("Height is a float or NULL");
        // An integer cell is neither text nor NULL
        assert_eq!(select.column::<3>(), None);
        found.push((name, age, height));
    }
    assert_eq!(
        found,
        people
            .iter()
            .map(|(name, age, height)| (name.to_string(), *age, *height))
            .collect::<Vec<_>>()
    );
}

pub fn typed_reuse<C: Connection>(connection: &C) {
    let mut square = connection
        .prepare_typed::<(i64,), (i64,)>("SELECT ? * ?1")
        .expect("Could not prepare the square query");
    for value in [-4, 0, 3, 1 << 20] {
        square.reset().expect("Failed to reset");
        square.bind::<0>(value).expect("Failed to bind the value");
        assert_eq!(square.step().expect("Failed to step"), Step::Row);
        assert_eq!(square.column::<0>(), Some(value * value));
    }
    let statement = square.into_inner();
    assert_eq!(statement.sql(), "SELECT ? * ?1");
}
