use crate::{ColumnType, Position, Result, Statement};

/// Text parameter or column, bound and read as `&str`.
#[derive(Clone, Copy, Debug)]
pub struct Text;

/// Blob parameter or column, bound and read as `&[u8]`.
#[derive(Clone, Copy, Debug)]
pub struct Blob;

/// A type that can be declared for a parameter or a column of a `TypedStatement`.
///
/// The implementing type is a marker, `Value` is what the caller actually binds and reads.
/// Reading always checks the dynamic type of the cell, the declaration alone is never trusted.
pub trait SqlType {
    type Value<'a>;

    /// Expected dynamic type of a non null cell.
    const COLUMN_TYPE: ColumnType;

    fn bind<S: Statement + ?Sized>(
        statement: &mut S,
        position: Position,
        value: Self::Value<'_>,
    ) -> Result<()>;

    fn read<S: Statement + ?Sized>(statement: &S, position: Position) -> Option<Self::Value<'_>>;
}

impl SqlType for i64 {
    type Value<'a> = i64;
    const COLUMN_TYPE: ColumnType = ColumnType::Integer;

    fn bind<S: Statement + ?Sized>(statement: &mut S, position: Position, value: i64) -> Result<()> {
        statement.bind_int64(position, value)
    }

    fn read<S: Statement + ?Sized>(statement: &S, position: Position) -> Option<i64> {
        statement.column_int64(position)
    }
}

impl SqlType for f64 {
    type Value<'a> = f64;
    const COLUMN_TYPE: ColumnType = ColumnType::Float;

    fn bind<S: Statement + ?Sized>(statement: &mut S, position: Position, value: f64) -> Result<()> {
        statement.bind_double(position, value)
    }

    fn read<S: Statement + ?Sized>(statement: &S, position: Position) -> Option<f64> {
        statement.column_double(position)
    }
}

impl SqlType for Text {
    type Value<'a> = &'a str;
    const COLUMN_TYPE: ColumnType = ColumnType::Text;

    fn bind<S: Statement + ?Sized>(
        statement: &mut S,
        position: Position,
        value: &str,
    ) -> Result<()> {
        statement.bind_text(position, value)
    }

    fn read<S: Statement + ?Sized>(statement: &S, position: Position) -> Option<&str> {
        statement.column_text(position)
    }
}

impl SqlType for Blob {
    type Value<'a> = &'a [u8];
    const COLUMN_TYPE: ColumnType = ColumnType::Blob;

    fn bind<S: Statement + ?Sized>(
        statement: &mut S,
        position: Position,
        value: &[u8],
    ) -> Result<()> {
        statement.bind_blob(position, value)
    }

    fn read<S: Statement + ?Sized>(statement: &S, position: Position) -> Option<&[u8]> {
        statement.column_blob(position)
    }
}

/// Nullable position.
///
/// Binding `None` binds NULL. Reading gives `Some(None)` for a NULL cell, `Some(Some(v))` when the
/// cell holds the inner type and `None` for any other dynamic type or for a missing cell.
impl<T: SqlType> SqlType for Option<T> {
    type Value<'a> = Option<T::Value<'a>>;
    const COLUMN_TYPE: ColumnType = T::COLUMN_TYPE;

    fn bind<S: Statement + ?Sized>(
        statement: &mut S,
        position: Position,
        value: Self::Value<'_>,
    ) -> Result<()> {
        match value {
            Some(value) => T::bind(statement, position, value),
            None => statement.bind_null(position),
        }
    }

    fn read<S: Statement + ?Sized>(statement: &S, position: Position) -> Option<Self::Value<'_>> {
        match statement.column_type(position)? {
            ColumnType::Null => Some(None),
            _ => T::read(statement, position).map(Some),
        }
    }
}
