#[cfg(test)]
mod tests {
    use sqlcheck_sqlite::SqliteConnection;
    use sqlcheck_tests::{execute_tests, init_logs};

    #[test]
    fn sqlite_memory() {
        init_logs();
        let connection = SqliteConnection::open_memory().expect("Could not open the database");
        execute_tests(&connection);
    }

    #[test]
    fn sqlite_file() {
        init_logs();
        let directory = tempfile::tempdir().expect("Could not create a temporary directory");
        let path = directory.path().join("tests.sqlite");
        let path = path.to_str().expect("Temporary path is not valid UTF-8");
        assert!(
            !std::path::Path::new(path).exists(),
            "Database file should not exist before test"
        );
        let connection =
            SqliteConnection::open_or_create(path).expect("Could not open the database");
        assert!(
            std::path::Path::new(path).exists(),
            "Database file should be created after connection"
        );
        execute_tests(&connection);
    }
}
