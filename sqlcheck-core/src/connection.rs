use crate::{Result, Statement, Transaction, TypeList, TypedStatement};

/// A live connection to a database that yields prepared statements.
///
/// Statements borrow the connection, they cannot outlive it.
/// A connection and its statements must be used by one thread at a time: implementations do not lock.
pub trait Connection {
    type Statement<'c>: Statement
    where
        Self: 'c;

    /// Prepares a single statement.
    fn prepare<'c>(&'c self, sql: &str) -> Result<Self::Statement<'c>>;

    /// Whether a transaction is open, the engine is not in autocommit mode.
    fn in_transaction(&self) -> bool;

    /// Prepares a statement with a declared list of parameter types and column types.
    fn prepare_typed<'c, Args, Cols>(
        &'c self,
        sql: &str,
    ) -> Result<TypedStatement<Self::Statement<'c>, Args, Cols>>
    where
        Args: TypeList,
        Cols: TypeList,
    {
        self.prepare(sql).map(TypedStatement::new)
    }

    /// Prepares the statement, steps it to completion and discards it.
    fn execute(&self, sql: &str) -> Result<()> {
        self.prepare(sql)?.run_to_completion()
    }

    /// Starts a transaction, it is rolled back unless committed.
    fn begin(&self) -> Result<Transaction<'_, Self>>
    where
        Self: Sized,
    {
        Transaction::new(self)
    }
}
