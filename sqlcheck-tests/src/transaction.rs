use crate::silent_logs;
use anyhow::anyhow;
use indoc::indoc;
use sqlcheck_core::{Connection, Error, Step, run_in_transaction};
use std::{
    cell::Cell,
    panic::{self, AssertUnwindSafe},
};

const TABLE: &str = "transaction_test";
const INSERT: &str = "INSERT INTO \"transaction_test\" (\"field\") VALUES (123)";

fn setup<C: Connection>(connection: &C) {
    connection
        .execute("DROP TABLE IF EXISTS \"transaction_test\"")
        .expect("Failed to drop transaction_test");
    connection
        .execute("CREATE TABLE \"transaction_test\" (\"field\" INTEGER NOT NULL)")
        .expect("Failed to create transaction_test");
}

fn count<C: Connection>(connection: &C) -> i64 {
    let mut statement = connection
        .prepare_typed::<(), (i64,)>(&format!("SELECT COUNT(*) FROM \"{}\"", TABLE))
        .expect("Could not prepare the count query");
    assert_eq!(statement.step().expect("Failed to step"), Step::Row);
    statement.column::<0>().expect("COUNT(*) is an integer")
}

#[derive(Debug, PartialEq)]
enum WorkError {
    Database(Error),
    Rejected(u32),
}

impl From<Error> for WorkError {
    fn from(value: Error) -> Self {
        WorkError::Database(value)
    }
}

pub fn transaction_commit<C: Connection>(connection: &C) {
    setup(connection);
    assert_eq!(count(connection), 0);
    let result = run_in_transaction(connection, || {
        connection.execute(INSERT)?;
        Ok::<_, Error>(456)
    });
    assert_eq!(result, Ok(456));
    assert_eq!(count(connection), 1);
}

pub fn transaction_error<C: Connection>(connection: &C) {
    setup(connection);
    let result = run_in_transaction(connection, || -> anyhow::Result<i64> {
        connection.execute(INSERT)?;
        assert_eq!(count(connection), 1);
        Err(anyhow!("rollback"))
    });
    let error = result.expect_err("The unit of work failed");
    assert_eq!(error.to_string(), "rollback");
    assert_eq!(count(connection), 0);

    let result = run_in_transaction(connection, || {
        connection.execute(INSERT)?;
        Err::<(), _>(WorkError::Rejected(7))
    });
    assert_eq!(result, Err(WorkError::Rejected(7)));
    assert_eq!(count(connection), 0);

    // A failing statement inside the unit of work rolls back the previous ones
    let result = silent_logs! {
        run_in_transaction(connection, || {
            connection.execute(INSERT)?;
            connection.execute("INSERT INTO \"transaction_test\" (\"field\") VALUES (NULL)")?;
            Ok::<_, WorkError>(())
        })
    };
    assert!(
        matches!(result, Err(WorkError::Database(Error::Engine { .. }))),
        "Unexpected result {:?}",
        result
    );
    assert_eq!(count(connection), 0);
}

pub fn transaction_panic<C: Connection>(connection: &C) {
    setup(connection);
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        run_in_transaction(connection, || -> Result<(), Error> {
            connection.execute(INSERT)?;
            panic!("rollback");
        })
    }));
    let payload = result.expect_err("The unit of work panicked");
    assert_eq!(payload.downcast_ref::<&str>(), Some(&"rollback"));
    assert_eq!(count(connection), 0);

    // The connection is usable afterwards
    run_in_transaction(connection, || connection.execute(INSERT))
        .expect("Failed to run a transaction after a panic");
    assert_eq!(count(connection), 1);
}

pub fn transaction_begin_failure<C: Connection>(connection: &C) {
    setup(connection);
    let outer = connection.begin().expect("Could not begin a transaction");
    let called = Cell::new(false);
    let result = silent_logs! {
        // Transactions do not nest, BEGIN fails
        run_in_transaction(connection, || {
            called.set(true);
            Ok::<_, Error>(())
        })
    };
    assert!(matches!(result, Err(Error::Engine { .. })));
    assert!(!called.get(), "The unit of work must not run when BEGIN fails");
    connection.execute(INSERT).expect("Failed to insert");
    outer.commit().expect("Failed to commit the transaction");
    assert_eq!(count(connection), 1);
}

pub fn transaction_failed_commit<C: Connection>(connection: &C) {
    connection
        .execute("PRAGMA foreign_keys = ON")
        .expect("Failed to enable foreign keys");
    connection
        .execute("DROP TABLE IF EXISTS \"order_line\"")
        .expect("Failed to drop order_line");
    connection
        .execute("DROP TABLE IF EXISTS \"order_head\"")
        .expect("Failed to drop order_head");
    connection
        .execute("CREATE TABLE \"order_head\" (\"id\" INTEGER PRIMARY KEY)")
        .expect("Failed to create order_head");
    connection
        .execute(indoc! {r#"
            CREATE TABLE "order_line" (
                "order" INTEGER NOT NULL
                    REFERENCES "order_head" ("id") DEFERRABLE INITIALLY DEFERRED
            )
        "#})
        .expect("Failed to create order_line");
    let lines = || {
        let mut statement = connection
            .prepare_typed::<(), (i64,)>("SELECT COUNT(*) FROM \"order_line\"")
            .expect("Could not prepare the count query");
        assert_eq!(statement.step().expect("Failed to step"), Step::Row);
        statement.column::<0>().expect("COUNT(*) is an integer")
    };

    // The deferred constraint is only checked by COMMIT, which fails without ending the transaction
    let result = silent_logs! {
        run_in_transaction(connection, || {
            connection.execute("INSERT INTO \"order_line\" (\"order\") VALUES (1)")?;
            Ok::<_, Error>(())
        })
    };
    assert!(
        matches!(result, Err(Error::Engine { .. })),
        "Unexpected result {:?}",
        result
    );
    assert!(!connection.in_transaction(), "The failed commit left the transaction open");
    assert_eq!(lines(), 0);

    let result = silent_logs! {
        let transaction = connection.begin().expect("Could not begin a transaction");
        connection
            .execute("INSERT INTO \"order_line\" (\"order\") VALUES (2)")
            .expect("Failed to insert");
        transaction.commit()
    };
    assert!(matches!(result, Err(Error::Engine { .. })));
    assert!(!connection.in_transaction());

    run_in_transaction(connection, || {
        connection.execute("INSERT INTO \"order_head\" (\"id\") VALUES (1)")?;
        connection.execute("INSERT INTO \"order_line\" (\"order\") VALUES (1)")
    })
    .expect("Failed to run a transaction after a failed commit");
    assert_eq!(lines(), 1);

    connection
        .execute("PRAGMA foreign_keys = OFF")
        .expect("Failed to disable foreign keys");
}

pub fn transaction_guard<C: Connection>(connection: &C) {
    setup(connection);

    assert!(!connection.in_transaction());
    let transaction = connection.begin().expect("Could not begin a transaction");
    assert!(connection.in_transaction());
    transaction
        .connection()
        .execute(INSERT)
        .expect("Failed to insert");
    transaction
        .rollback()
        .expect("Failed to rollback the transaction");
    assert!(!connection.in_transaction());
    assert_eq!(count(connection), 0);

    {
        let _transaction = connection.begin().expect("Could not begin a transaction");
        connection.execute(INSERT).expect("Failed to insert");
        assert_eq!(count(connection), 1);
        // Dropped without commit
    }
    assert!(!connection.in_transaction());
    assert_eq!(count(connection), 0);

    let transaction = connection.begin().expect("Could not begin a transaction");
    connection.execute(INSERT).expect("Failed to insert");
    connection.execute(INSERT).expect("Failed to insert");
    transaction
        .commit()
        .expect("Failed to commit the transaction");
    assert_eq!(count(connection), 2);
}
