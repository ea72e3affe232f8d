use crate::{CBox, SqliteConnection, engine_error};
use libsqlite3_sys::{
    SQLITE_BLOB, SQLITE_DONE, SQLITE_FLOAT, SQLITE_INTEGER, SQLITE_NULL, SQLITE_OK, SQLITE_ROW,
    SQLITE_TEXT, SQLITE_TRANSIENT, sqlite3_bind_blob, sqlite3_bind_double, sqlite3_bind_int64,
    sqlite3_bind_null, sqlite3_bind_parameter_count, sqlite3_bind_text, sqlite3_clear_bindings,
    sqlite3_column_blob, sqlite3_column_bytes, sqlite3_column_count, sqlite3_column_double,
    sqlite3_column_int64, sqlite3_column_text, sqlite3_column_type, sqlite3_db_handle,
    sqlite3_reset, sqlite3_sql, sqlite3_step, sqlite3_stmt,
};
use sqlcheck_core::{ColumnType, Error, Position, Result, Statement, Step, TextLength};
use std::{
    ffi::{CStr, c_char, c_int, c_void},
    fmt::{self, Display},
    marker::PhantomData,
    slice, str,
};

/// Exclusive owner of a prepared statement, finalized on drop.
///
/// Borrows the connection it was prepared from.
pub struct SqliteStatement<'c> {
    pub(crate) statement: CBox<*mut sqlite3_stmt>,
    /// The last step produced a row that was not rewound yet.
    row: bool,
    connection: PhantomData<&'c SqliteConnection>,
}

impl<'c> SqliteStatement<'c> {
    pub(crate) fn new(statement: CBox<*mut sqlite3_stmt>) -> Self {
        Self {
            statement,
            row: false,
            connection: PhantomData,
        }
    }

    fn error(&self, rc: c_int, action: fmt::Arguments) -> Error {
        let error = unsafe { engine_error(sqlite3_db_handle(*self.statement), rc) };
        log::error!("{:#}\nWhile {} in the query:\n{}", error, action, self.sql());
        error
    }

    /// Turns a status code returned by a call on this statement into a result.
    fn check(&self, rc: c_int, action: fmt::Arguments) -> Result<()> {
        if rc == SQLITE_OK {
            Ok(())
        } else {
            Err(self.error(rc, action))
        }
    }

    /// The 1-based index used by SQLite for parameters.
    fn parameter(position: Position) -> c_int {
        position.as_c_int() + 1
    }

    /// Only cells of the current row are handed to SQLite.
    fn column(&self, position: Position) -> Option<c_int> {
        if !self.row {
            log::trace!("No row available in the query:\n{}", self.sql());
            None
        } else if position < self.column_count().get() {
            Some(position.as_c_int())
        } else {
            log::trace!(
                "Column {} is past the last column of the query:\n{}",
                position,
                self.sql()
            );
            None
        }
    }

    fn bytes(&self, column: c_int, ptr: *const u8) -> &[u8] {
        unsafe {
            let len = sqlite3_column_bytes(*self.statement, column);
            if ptr.is_null() || len <= 0 {
                &[]
            } else {
                slice::from_raw_parts(ptr, len as usize)
            }
        }
    }
}

impl<'c> Statement for SqliteStatement<'c> {
    fn bind_int64(&mut self, position: Position, value: i64) -> Result<()> {
        let rc = unsafe { sqlite3_bind_int64(*self.statement, Self::parameter(position), value) };
        self.check(rc, format_args!("binding the integer parameter {}", position))
    }

    fn bind_double(&mut self, position: Position, value: f64) -> Result<()> {
        let rc = unsafe { sqlite3_bind_double(*self.statement, Self::parameter(position), value) };
        self.check(rc, format_args!("binding the float parameter {}", position))
    }

    fn bind_text(&mut self, position: Position, value: &str) -> Result<()> {
        let len = TextLength::try_from(value.len())?;
        // An empty text must still be bound through a valid pointer, a null pointer would bind NULL
        let ptr = if value.is_empty() {
            c"".as_ptr()
        } else {
            value.as_ptr() as *const c_char
        };
        let rc = unsafe {
            sqlite3_bind_text(
                *self.statement,
                Self::parameter(position),
                ptr,
                len.as_c_int(),
                SQLITE_TRANSIENT(),
            )
        };
        self.check(rc, format_args!("binding the text parameter {}", position))
    }

    fn bind_blob(&mut self, position: Position, value: &[u8]) -> Result<()> {
        let len = TextLength::try_from(value.len())?;
        let ptr = if value.is_empty() {
            c"".as_ptr() as *const c_void
        } else {
            value.as_ptr() as *const c_void
        };
        let rc = unsafe {
            sqlite3_bind_blob(
                *self.statement,
                Self::parameter(position),
                ptr,
                len.as_c_int(),
                SQLITE_TRANSIENT(),
            )
        };
        self.check(rc, format_args!("binding the blob parameter {}", position))
    }

    fn bind_null(&mut self, position: Position) -> Result<()> {
        let rc = unsafe { sqlite3_bind_null(*self.statement, Self::parameter(position)) };
        self.check(rc, format_args!("binding NULL to the parameter {}", position))
    }

    fn bind_parameter_count(&self) -> usize {
        unsafe { sqlite3_bind_parameter_count(*self.statement).max(0) as usize }
    }

    fn step(&mut self) -> Result<Step> {
        let rc = unsafe { sqlite3_step(*self.statement) };
        self.row = rc == SQLITE_ROW;
        match rc {
            SQLITE_ROW => Ok(Step::Row),
            SQLITE_DONE => Ok(Step::Done),
            rc => Err(self.error(rc, format_args!("stepping"))),
        }
    }

    fn reset(&mut self) -> Result<()> {
        self.row = false;
        let rc = unsafe { sqlite3_reset(*self.statement) };
        self.check(rc, format_args!("resetting"))
    }

    fn clear_bindings(&mut self) -> Result<()> {
        let rc = unsafe { sqlite3_clear_bindings(*self.statement) };
        self.check(rc, format_args!("clearing the parameters"))
    }

    fn column_count(&self) -> Position {
        let count = unsafe { sqlite3_column_count(*self.statement) };
        Position::new(count.into()).unwrap_or(Position::literal::<0>())
    }

    fn column_type(&self, position: Position) -> Option<ColumnType> {
        let column = self.column(position)?;
        Some(match unsafe { sqlite3_column_type(*self.statement, column) } {
            SQLITE_INTEGER => ColumnType::Integer,
            SQLITE_FLOAT => ColumnType::Float,
            SQLITE_TEXT => ColumnType::Text,
            SQLITE_BLOB => ColumnType::Blob,
            SQLITE_NULL => ColumnType::Null,
            other => {
                log::warn!("Unexpected column type {}, reading it as NULL", other);
                ColumnType::Null
            }
        })
    }

    fn column_int64(&self, position: Position) -> Option<i64> {
        match self.column_type(position)? {
            ColumnType::Integer => Some(unsafe {
                sqlite3_column_int64(*self.statement, position.as_c_int())
            }),
            _ => None,
        }
    }

    fn column_double(&self, position: Position) -> Option<f64> {
        match self.column_type(position)? {
            ColumnType::Float => Some(unsafe {
                sqlite3_column_double(*self.statement, position.as_c_int())
            }),
            _ => None,
        }
    }

    fn column_text(&self, position: Position) -> Option<&str> {
        if self.column_type(position)? != ColumnType::Text {
            return None;
        }
        let column = position.as_c_int();
        // The pointer must be obtained before the length
        let ptr = unsafe { sqlite3_column_text(*self.statement, column) };
        match str::from_utf8(self.bytes(column, ptr)) {
            Ok(text) => Some(text),
            Err(e) => {
                log::warn!("Column {} is not valid UTF-8 text: {}", position, e);
                None
            }
        }
    }

    fn column_blob(&self, position: Position) -> Option<&[u8]> {
        if self.column_type(position)? != ColumnType::Blob {
            return None;
        }
        let column = position.as_c_int();
        let ptr = unsafe { sqlite3_column_blob(*self.statement, column) } as *const u8;
        Some(self.bytes(column, ptr))
    }

    fn sql(&self) -> &str {
        unsafe {
            let ptr = sqlite3_sql(*self.statement);
            if ptr.is_null() {
                return "";
            }
            CStr::from_ptr(ptr).to_str().unwrap_or_default()
        }
    }
}

impl<'c> Display for SqliteStatement<'c> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:p}", *self.statement)
    }
}
