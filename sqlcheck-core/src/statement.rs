use crate::{Position, Result};
use std::fmt::Display;

/// Outcome of advancing a statement.
///
/// Failures never show up here, they are reported through `Result`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// A row is ready to be read.
    Row,
    /// Execution completed.
    Done,
}

/// Dynamic type of a single result cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Integer,
    Float,
    Text,
    Blob,
    Null,
}

/// Positional protocol of a prepared statement.
///
/// Positions are 0-based, drivers translate them to the convention of the engine.
/// Operations must be issued in order: bind, step, read the row or step again, finalize by dropping.
///
/// # Reading
/// The `column_*` methods look at the dynamic type of the cell first and return `None` when it
/// does not match the requested type (including NULL cells). A mismatch is not an error.
/// Borrowed values (`column_text`, `column_blob`) live until the next `step`, `reset` or drop.
pub trait Statement: Display {
    fn bind_int64(&mut self, position: Position, value: i64) -> Result<()>;
    fn bind_double(&mut self, position: Position, value: f64) -> Result<()>;
    fn bind_text(&mut self, position: Position, value: &str) -> Result<()>;
    fn bind_blob(&mut self, position: Position, value: &[u8]) -> Result<()>;
    fn bind_null(&mut self, position: Position) -> Result<()>;

    /// Number of parameter placeholders in the statement.
    fn bind_parameter_count(&self) -> usize;

    fn step(&mut self) -> Result<Step>;

    /// Rewinds the statement so that it can be stepped again, bindings are kept.
    fn reset(&mut self) -> Result<()>;

    /// Sets all the parameters back to NULL.
    fn clear_bindings(&mut self) -> Result<()>;

    /// Number of columns in the current result shape, queried each time.
    fn column_count(&self) -> Position;

    /// Dynamic type of the cell at `position` in the current row.
    ///
    /// `None` when there is no such cell: no row is available or `position` is past the last column.
    fn column_type(&self, position: Position) -> Option<ColumnType>;

    fn column_int64(&self, position: Position) -> Option<i64>;
    fn column_double(&self, position: Position) -> Option<f64>;
    fn column_text(&self, position: Position) -> Option<&str>;
    fn column_blob(&self, position: Position) -> Option<&[u8]>;

    /// Text of the statement.
    fn sql(&self) -> &str;

    /// Steps until the statement is done, discarding any row.
    fn run_to_completion(&mut self) -> Result<()> {
        while self.step()? == Step::Row {}
        Ok(())
    }
}
