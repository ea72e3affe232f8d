#[cfg(test)]
mod tests {
    use indoc::indoc;
    use sqlcheck::{Blob, Connection, SqliteConnection, Step, Text};
    use sqlcheck_tests::init_logs;

    #[test]
    fn checked_statement() {
        init_logs();
        let connection =
            SqliteConnection::open_existing(":memory:").expect("Could not open the database");
        type Bound = (i64, f64, Text);
        type Columns = (i64, f64, Text, i64);
        let mut statement = connection
            .prepare_typed::<Bound, Columns>("SELECT ?, ?, ?, -3")
            .expect("Could not prepare the statement");
        statement.bind::<0>(123).expect("Failed to bind");
        statement.bind::<1>(456.0).expect("Failed to bind");
        statement.bind::<2>("abc").expect("Failed to bind");
        assert_eq!(statement.step().expect("Failed to step"), Step::Row);
        assert_eq!(statement.column_count(), 4);
        assert_eq!(statement.column::<0>(), Some(123));
        assert_eq!(statement.column::<1>(), Some(456.0));
        assert_eq!(statement.column::<2>().map(str::as_bytes), Some(&b"abc"[..]));
        assert_eq!(statement.column::<3>(), Some(-3));
        assert_eq!(statement.step().expect("Failed to step"), Step::Done);
    }

    #[test]
    fn inventory() {
        init_logs();
        let connection = SqliteConnection::open_memory().expect("Could not open the database");
        connection
            .execute(indoc! {r#"
                CREATE TABLE "part" (
                    "code" TEXT PRIMARY KEY,
                    "quantity" INTEGER NOT NULL,
                    "weight" REAL,
                    "drawing" BLOB
                )
            "#})
            .expect("Failed to create the part table");

        let mut insert = connection
            .prepare_typed::<(Text, i64, Option<f64>, Option<Blob>), ()>(
                "INSERT INTO \"part\" VALUES (?, ?, ?, ?)",
            )
            .expect("Could not prepare the insert");
        let drawing = [0x89, b'P', b'N', b'G'];
        let parts: [(&str, i64, Option<f64>, Option<&[u8]>); 3] = [
            ("bolt", 250, Some(0.012), None),
            ("gear", 12, Some(1.5), Some(&drawing)),
            ("spring", 0, None, None),
        ];
        for (code, quantity, weight, drawing) in parts {
            insert.reset().expect("Failed to reset the insert");
            insert.bind::<0>(code).expect("Failed to bind the code");
            insert.bind::<1>(quantity).expect("Failed to bind the quantity");
            insert.bind::<2>(weight).expect("Failed to bind the weight");
            insert.bind::<3>(drawing).expect("Failed to bind the drawing");
            assert_eq!(insert.step().expect("Failed to insert"), Step::Done);
            assert_eq!(connection.changes(), 1);
        }

        let mut select = connection
            .prepare_typed::<(i64,), (Text, i64, Option<f64>, Option<Blob>)>(indoc! {r#"
                SELECT "code", "quantity", "weight", "drawing"
                FROM "part"
                WHERE "quantity" > ?
                ORDER BY "code"
            "#})
            .expect("Could not prepare the select");
        select.bind::<0>(10).expect("Failed to bind the minimum quantity");
        assert_eq!(select.step().expect("Failed to step"), Step::Row);
        assert_eq!(select.column::<0>(), Some("bolt"));
        assert_eq!(select.column::<1>(), Some(250));
        assert_eq!(select.column::<2>(), Some(Some(0.012)));
        assert_eq!(select.column::<3>(), Some(None));
        assert_eq!(select.step().expect("Failed to step"), Step::Row);
        assert_eq!(select.column::<0>(), Some("gear"));
        assert_eq!(select.column::<3>(), Some(Some(&drawing[..])));
        assert_eq!(select.step().expect("Failed to step"), Step::Done);
    }
}
