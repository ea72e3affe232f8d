use crate::{At, Position, Result, SqlType, Statement, Step, TypeList};
use std::{
    fmt::{self, Display},
    marker::PhantomData,
};

/// Prepared statement with a declared list of parameter types and a declared list of column types.
///
/// `Args` and `Cols` are tuples of `SqlType` markers (`i64`, `f64`, `Text`, `Blob`, `Option<_>`).
/// They exist only at compile time: binding or reading a position past the end of the list, or with
/// a value of the wrong type, does not build.
///
/// The declaration states what the caller expects. What the engine actually produced is still
/// checked on every read, so a cell that is NULL or of another dynamic type reads as `None`.
///
/// ```rust,ignore
/// let mut statement = connection
///     .prepare_typed::<(i64, Text), (i64, Text)>("SELECT ?, ?")?;
/// statement.bind::<0>(42)?;
/// statement.bind::<1>("hello")?;
/// assert_eq!(statement.step()?, Step::Row);
/// assert_eq!(statement.column::<0>(), Some(42));
/// assert_eq!(statement.column::<1>(), Some("hello"));
/// ```
pub struct TypedStatement<S, Args, Cols> {
    statement: S,
    types: PhantomData<fn() -> (Args, Cols)>,
}

impl<S, Args, Cols> TypedStatement<S, Args, Cols>
where
    S: Statement,
    Args: TypeList,
    Cols: TypeList,
{
    /// Number of declared parameters.
    pub const ARGUMENTS: usize = Args::LEN;
    /// Number of declared columns.
    pub const COLUMNS: usize = Cols::LEN;

    /// Attaches the declared types to a prepared statement.
    ///
    /// A declaration that disagrees with the shape reported by the engine is only logged.
    pub fn new(statement: S) -> Self {
        let parameters = statement.bind_parameter_count();
        if parameters != Args::LEN {
            log::warn!(
                "Statement declares {} arguments but the engine reports {} parameters:\n{}",
                Args::LEN,
                parameters,
                statement.sql(),
            );
        }
        let columns = statement.column_count();
        if columns != Cols::LEN {
            log::warn!(
                "Statement declares {} columns but the engine reports {}:\n{}",
                Cols::LEN,
                columns,
                statement.sql(),
            );
        }
        Self {
            statement,
            types: PhantomData,
        }
    }

    /// Binds the parameter at position `I`, its type is the one declared at `Args[I]`.
    pub fn bind<const I: usize>(
        &mut self,
        value: <<Args as At<I>>::Type as SqlType>::Value<'_>,
    ) -> Result<()>
    where
        Args: At<I>,
        <Args as At<I>>::Type: SqlType,
    {
        <<Args as At<I>>::Type as SqlType>::bind(&mut self.statement, Position::literal::<I>(), value)
    }

    /// Reads the column at position `I` of the current row as the type declared at `Cols[I]`.
    pub fn column<const I: usize>(&self) -> Option<<<Cols as At<I>>::Type as SqlType>::Value<'_>>
    where
        Cols: At<I>,
        <Cols as At<I>>::Type: SqlType,
    {
        let value = <<Cols as At<I>>::Type as SqlType>::read(&self.statement, Position::literal::<I>());
        if value.is_none() {
            log::trace!(
                "Column {} holds {:?}, expected {:?}",
                I,
                self.statement.column_type(Position::literal::<I>()),
                <<Cols as At<I>>::Type as SqlType>::COLUMN_TYPE,
            );
        }
        value
    }

    pub fn step(&mut self) -> Result<Step> {
        self.statement.step()
    }

    pub fn reset(&mut self) -> Result<()> {
        self.statement.reset()
    }

    pub fn clear_bindings(&mut self) -> Result<()> {
        self.statement.clear_bindings()
    }

    pub fn column_count(&self) -> Position {
        self.statement.column_count()
    }

    pub fn statement(&self) -> &S {
        &self.statement
    }

    /// Access to the untyped protocol, binds and reads done here bypass the declared types.
    pub fn statement_mut(&mut self) -> &mut S {
        &mut self.statement
    }

    pub fn into_inner(self) -> S {
        self.statement
    }
}

impl<S: Statement, Args, Cols> Display for TypedStatement<S, Args, Cols> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.statement, f)
    }
}
