#[cfg(test)]
mod tests {
    use sqlcheck::{Connection, SqliteConnection, Step, run_in_transaction};
    use sqlcheck_tests::init_logs;
    use std::panic;

    const CREATE: &str = "CREATE TABLE \"test\" (\"field\" INTEGER NOT NULL)";
    const INSERT: &str = "INSERT INTO \"test\" (\"field\") VALUES (123)";

    fn count(connection: &SqliteConnection) -> Option<i64> {
        let mut select = connection
            .prepare_typed::<(), (i64,)>("SELECT COUNT(*) FROM \"test\"")
            .expect("Could not prepare the count query");
        assert_eq!(select.step().expect("Failed to step"), Step::Row);
        select.column::<0>()
    }

    #[test]
    fn begin_transaction_commit() {
        init_logs();
        let connection = SqliteConnection::open_memory().expect("Could not open the database");
        connection.execute(CREATE).expect("Failed to create the table");
        let result = run_in_transaction(&connection, || -> anyhow::Result<i32> {
            connection.execute(INSERT)?;
            Ok(456)
        });
        assert_eq!(result.expect("The transaction failed"), 456);
        assert_eq!(count(&connection), Some(1));
    }

    #[test]
    fn begin_transaction_panic() {
        init_logs();
        let connection = SqliteConnection::open_memory().expect("Could not open the database");
        connection.execute(CREATE).expect("Failed to create the table");
        let payload = panic::catch_unwind(panic::AssertUnwindSafe(|| {
            let _ = run_in_transaction(&connection, || -> anyhow::Result<i32> {
                connection.execute(INSERT)?;
                panic::panic_any(String::from("rollback"))
            });
        }))
        .expect_err("The unit of work panicked");
        assert_eq!(payload.downcast_ref::<String>().map(String::as_str), Some("rollback"));
        assert_eq!(count(&connection), Some(0));
    }

    #[test]
    fn file_transaction_survives_reopen() {
        init_logs();
        let directory = tempfile::tempdir().expect("Could not create a temporary directory");
        let path = directory.path().join("transaction.sqlite");
        let path = path.to_str().expect("Temporary path is not valid UTF-8");
        {
            let connection =
                SqliteConnection::open_or_create(path).expect("Could not create the database");
            connection.execute(CREATE).expect("Failed to create the table");
            run_in_transaction(&connection, || {
                for _ in 0..3 {
                    connection.execute(INSERT)?;
                }
                Ok::<_, sqlcheck::Error>(())
            })
            .expect("The transaction failed");
            let _ = run_in_transaction(&connection, || {
                connection.execute(INSERT)?;
                Err::<(), _>(anyhow::anyhow!("discarded"))
            });
        }
        let connection =
            SqliteConnection::open_existing(path).expect("Could not reopen the database");
        assert_eq!(count(&connection), Some(3));
    }
}
