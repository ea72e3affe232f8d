#[cfg(test)]
mod tests {
    use sqlcheck_core::{Connection, Error, Position, Statement, Step};
    use sqlcheck_sqlite::SqliteConnection;
    use sqlcheck_tests::{init_logs, silent_logs};
    use std::path::Path;

    fn select_one(connection: &SqliteConnection) {
        let mut statement = connection
            .prepare("SELECT 1")
            .expect("Could not prepare SELECT 1");
        assert_eq!(statement.step().expect("Failed to step"), Step::Row);
        assert_eq!(statement.column_int64(Position::literal::<0>()), Some(1));
    }

    #[test]
    fn open_memory() {
        init_logs();
        select_one(&SqliteConnection::open_memory().expect("Could not open the database"));
        select_one(
            &SqliteConnection::open_existing(SqliteConnection::MEMORY)
                .expect("Could not open the database"),
        );
        select_one(
            &SqliteConnection::open_or_create(":memory:").expect("Could not open the database"),
        );
    }

    #[test]
    fn open_or_create_file() {
        init_logs();
        let directory = tempfile::tempdir().expect("Could not create a temporary directory");
        let path = directory.path().join("creation.sqlite");
        let path = path.to_str().expect("Temporary path is not valid UTF-8");
        {
            let connection =
                SqliteConnection::open_or_create(path).expect("Could not create the database");
            connection
                .execute("CREATE TABLE \"created\" (\"id\" INTEGER PRIMARY KEY)")
                .expect("Failed to create a table");
            connection
                .execute("INSERT INTO \"created\" DEFAULT VALUES")
                .expect("Failed to insert");
            assert_eq!(connection.last_insert_rowid(), 1);
            assert_eq!(connection.changes(), 1);
        }
        assert!(Path::new(path).exists(), "Database file should exist");
        // Reopen the existing file
        let connection =
            SqliteConnection::open_existing(path).expect("Could not open the existing database");
        let mut statement = connection
            .prepare_typed::<(), (i64,)>("SELECT COUNT(*) FROM \"created\"")
            .expect("Could not prepare the count query");
        assert_eq!(statement.step().expect("Failed to step"), Step::Row);
        assert_eq!(statement.column::<0>(), Some(1));
    }

    #[test]
    fn open_errors() {
        init_logs();
        let directory = tempfile::tempdir().expect("Could not create a temporary directory");
        let missing = directory.path().join("missing.sqlite");
        let missing = missing.to_str().expect("Temporary path is not valid UTF-8");
        silent_logs! {
            let error = SqliteConnection::open_existing(missing)
                .err()
                .expect("Opened a database that does not exist");
            assert!(error.status().is_some(), "Expected an engine error, got {:?}", error);
            assert!(!Path::new(missing).exists(), "open_existing must not create the file");

            let directory = directory.path().to_str().expect("Temporary path is not valid UTF-8");
            assert!(SqliteConnection::open_existing(directory).is_err());
            assert!(SqliteConnection::open_or_create(directory).is_err());

            assert!(matches!(
                SqliteConnection::open_or_create("nul\0byte.sqlite"),
                Err(Error::InvalidPath(..))
            ));
        }
    }

    #[test]
    fn connect_url() {
        init_logs();
        let directory = tempfile::tempdir().expect("Could not create a temporary directory");
        let path = directory.path().join("url.sqlite");
        let path = path.to_str().expect("Temporary path is not valid UTF-8");
        {
            let connection = SqliteConnection::connect(&format!("sqlite://{}?mode=rwc", path))
                .expect("Could not open the database");
            connection
                .execute("CREATE TABLE \"url\" (\"value\" TEXT)")
                .expect("Failed to create a table");
        }
        assert!(Path::new(path).exists(), "Database file should be created after connection");
        let read_only = SqliteConnection::connect(&format!("sqlite://{}?mode=ro", path))
            .expect("Could not open the database read only");
        silent_logs! {
            let error = read_only
                .execute("INSERT INTO \"url\" (\"value\") VALUES ('denied')")
                .expect_err("Wrote to a read only database");
            assert!(error.status().is_some());
        }
        select_one(
            &SqliteConnection::connect("sqlite://:memory:").expect("Could not open the database"),
        );
    }

    #[test]
    fn wrong_url() {
        silent_logs! {
            assert!(matches!(
                SqliteConnection::connect("duckdb://some_value"),
                Err(Error::InvalidUrl(..))
            ));
        };
    }

    #[test]
    fn move_connection() {
        init_logs();
        let connection = SqliteConnection::open_memory().expect("Could not open the database");
        connection
            .execute("CREATE TABLE \"moved\" (\"value\" INTEGER)")
            .expect("Failed to create a table");
        let moved = std::thread::spawn(move || {
            connection
                .execute("INSERT INTO \"moved\" VALUES (1)")
                .expect("Failed to insert");
            connection
        })
        .join()
        .expect("The thread panicked");
        select_one(&moved);
        assert_eq!(moved.changes(), 1);
    }
}
