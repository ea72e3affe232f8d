use crate::{Connection, Error, Result};

const BEGIN: &str = "BEGIN";
const COMMIT: &str = "COMMIT";
const ROLLBACK: &str = "ROLLBACK";

/// An open transaction on a connection.
///
/// Ends with exactly one of `COMMIT` or `ROLLBACK`:
/// * `commit` and `rollback` consume the transaction.
/// * Dropping it without either (early return, `?`, panic) issues `ROLLBACK`.
pub struct Transaction<'c, C: Connection> {
    connection: &'c C,
    finished: bool,
}

impl<'c, C: Connection> Transaction<'c, C> {
    pub fn new(connection: &'c C) -> Result<Self> {
        connection.execute(BEGIN)?;
        log::debug!("Transaction started");
        Ok(Self {
            connection,
            finished: false,
        })
    }

    pub fn connection(&self) -> &'c C {
        self.connection
    }

    /// Commits the transaction.
    ///
    /// When `COMMIT` fails but leaves the transaction open (a deferred constraint, a busy database),
    /// the transaction is rolled back and the `COMMIT` error is returned.
    pub fn commit(mut self) -> Result<()> {
        self.finished = true;
        if let Err(e) = self.connection.execute(COMMIT) {
            if self.connection.in_transaction() {
                match self.connection.execute(ROLLBACK) {
                    Ok(()) => log::warn!("Transaction rolled back after a failed commit"),
                    Err(rollback) => log::warn!(
                        "Could not roll back the transaction after a failed commit: {:#}",
                        rollback
                    ),
                }
            }
            return Err(e);
        }
        log::debug!("Transaction committed");
        Ok(())
    }

    pub fn rollback(mut self) -> Result<()> {
        self.finished = true;
        self.connection.execute(ROLLBACK)?;
        log::debug!("Transaction rolled back");
        Ok(())
    }
}

impl<'c, C: Connection> Drop for Transaction<'c, C> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        match self.connection.execute(ROLLBACK) {
            Ok(()) => log::debug!("Transaction rolled back on drop"),
            Err(e) => log::warn!("Could not roll back the transaction: {:#}", e),
        }
    }
}

/// Runs `work` between `BEGIN` and `COMMIT`.
///
/// * `BEGIN` failing returns its error and `work` is not called.
/// * `work` returning `Ok` commits, a failing `COMMIT` rolls back and is returned as the error.
/// * `work` returning `Err` rolls back and returns that same error, whatever happens to the rollback.
/// * `work` panicking rolls back while unwinding, then the panic continues.
///
/// ```rust,ignore
/// let inserted = run_in_transaction(&connection, || {
///     connection.execute("INSERT INTO log (line) VALUES ('started')")?;
///     Ok::<_, anyhow::Error>(connection.last_insert_rowid())
/// })?;
/// ```
pub fn run_in_transaction<C, T, E, F>(connection: &C, work: F) -> std::result::Result<T, E>
where
    C: Connection,
    E: From<Error>,
    F: FnOnce() -> std::result::Result<T, E>,
{
    let transaction = Transaction::new(connection)?;
    match work() {
        Ok(value) => {
            transaction.commit()?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback) = transaction.rollback() {
                log::warn!(
                    "Could not roll back the transaction after a failure: {:#}",
                    rollback
                );
            }
            Err(e)
        }
    }
}
