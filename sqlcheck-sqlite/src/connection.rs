use crate::{CBox, SqliteStatement, engine_error};
use libsqlite3_sys::{
    SQLITE_OK, SQLITE_OPEN_CREATE, SQLITE_OPEN_READWRITE, SQLITE_OPEN_URI, sqlite3, sqlite3_changes64,
    sqlite3_close, sqlite3_finalize, sqlite3_get_autocommit, sqlite3_last_insert_rowid,
    sqlite3_open_v2, sqlite3_prepare_v2, sqlite3_stmt,
};
use sqlcheck_core::{Connection, Error, Result, TextLength};
use std::{
    ffi::{CString, c_char, c_int},
    ptr,
};

/// Exclusive owner of a SQLite database connection, closed on drop.
///
/// Can be moved to another thread but not shared: every statement borrows it and none can outlive it.
pub struct SqliteConnection {
    pub(crate) connection: CBox<*mut sqlite3>,
}

impl SqliteConnection {
    /// Path designating a private, in-memory database.
    pub const MEMORY: &'static str = ":memory:";
    /// Prefix of the connection urls accepted by `connect`.
    pub const SCHEME: &'static str = "sqlite://";

    /// Opens a database that must already exist, for reading and writing.
    pub fn open_existing(path: &str) -> Result<Self> {
        Self::open(path, SQLITE_OPEN_READWRITE)
    }

    /// Opens a database for reading and writing, creating the file when missing.
    pub fn open_or_create(path: &str) -> Result<Self> {
        Self::open(path, SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE)
    }

    /// Opens a new in-memory database.
    pub fn open_memory() -> Result<Self> {
        Self::open_or_create(Self::MEMORY)
    }

    /// Opens a database from a url like `sqlite://path/to/file.sqlite?mode=ro`.
    ///
    /// The query string is passed to SQLite as URI parameters (`mode`, `cache`, `immutable`, ...).
    /// Without a `mode`, the database is created when missing.
    pub fn connect(url: &str) -> Result<Self> {
        let Some(target) = url.strip_prefix(Self::SCHEME) else {
            let error = Error::InvalidUrl(url.to_string());
            log::error!(
                "{:#}, expected sqlite connection url to start with `{}`",
                error,
                Self::SCHEME
            );
            return Err(error);
        };
        Self::open(
            &format!("file:{}", target),
            SQLITE_OPEN_URI | SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE,
        )
    }

    fn open(path: &str, flags: c_int) -> Result<Self> {
        let c_path = CString::new(path).map_err(|e| {
            let error = Error::from(e);
            log::error!("{:#}: `{}`", error, path.escape_debug());
            error
        })?;
        // Even a failed open can allocate a connection, it must be closed as well
        let mut connection = CBox::new(ptr::null_mut(), |p| unsafe {
            sqlite3_close(p);
        });
        let rc = unsafe { sqlite3_open_v2(c_path.as_ptr(), &mut *connection, flags, ptr::null()) };
        if rc != SQLITE_OK {
            let error = engine_error(*connection, rc);
            log::error!("{:#}\nWhile opening the database `{}`", error, path);
            return Err(error);
        }
        log::debug!("Opened the database `{}`", path);
        Ok(Self { connection })
    }

    /// Rowid of the most recent successful insert on this connection.
    pub fn last_insert_rowid(&self) -> i64 {
        unsafe { sqlite3_last_insert_rowid(*self.connection) }
    }

    /// Rows modified by the most recently completed insert, update or delete.
    pub fn changes(&self) -> i64 {
        unsafe { sqlite3_changes64(*self.connection) }
    }

    /// Compiles the first statement of `sql`, also returns the bytes of `sql` it consumed.
    ///
    /// The statement is null when `sql` holds only whitespace and comments.
    fn prepare_first(&self, sql: &str) -> Result<(CBox<*mut sqlite3_stmt>, usize)> {
        let len = TextLength::try_from(sql.len())?.as_c_int();
        let mut statement = CBox::new(ptr::null_mut(), |p| unsafe {
            sqlite3_finalize(p);
        });
        let mut tail: *const c_char = ptr::null();
        let rc = unsafe {
            sqlite3_prepare_v2(
                *self.connection,
                sql.as_ptr() as *const c_char,
                len,
                &mut *statement,
                &mut tail,
            )
        };
        if rc != SQLITE_OK {
            return Err(engine_error(*self.connection, rc));
        }
        let consumed = if tail.is_null() {
            sql.len()
        } else {
            unsafe { tail.offset_from(sql.as_ptr() as *const c_char) as usize }
        };
        Ok((statement, consumed))
    }

    /// Whether `sql` holds more than whitespace, comments and empty statements.
    fn has_statement(&self, mut sql: &str) -> bool {
        while !sql.trim().is_empty() {
            match self.prepare_first(sql) {
                Ok((statement, consumed)) if statement.is_null() && consumed > 0 => {
                    sql = sql.get(consumed..).unwrap_or_default();
                }
                _ => return true,
            }
        }
        false
    }
}

impl Connection for SqliteConnection {
    type Statement<'c> = SqliteStatement<'c>;

    fn prepare<'c>(&'c self, sql: &str) -> Result<SqliteStatement<'c>> {
        let (statement, consumed) = self.prepare_first(sql).map_err(|error| {
            log::error!("{:#}\nWhile preparing the query:\n{}", error, sql);
            error
        })?;
        if statement.is_null() {
            let error = Error::EmptyStatement;
            log::error!("{:#}:\n{}", error, sql);
            return Err(error);
        }
        let remaining = sql.get(consumed..).unwrap_or_default();
        if self.has_statement(remaining) {
            let error = Error::TrailingSql(remaining.trim().to_string());
            log::error!("{:#}\nWhile preparing the query:\n{}", error, sql);
            return Err(error);
        }
        Ok(SqliteStatement::new(statement))
    }

    fn in_transaction(&self) -> bool {
        unsafe { sqlite3_get_autocommit(*self.connection) == 0 }
    }
}
