//! Statically checked statements on top of SQLite.
//!
//! SQLite binds parameters and reads columns by position, and the type of every cell is only known
//! when the row is produced. This crate keeps that protocol but lets the caller declare, at compile
//! time, the type of each parameter and column of a statement:
//!
//! ```rust,ignore
//! use sqlcheck::{Connection, SqliteConnection, Step, Text, run_in_transaction};
//!
//! let connection = SqliteConnection::open_memory()?;
//! connection.execute("CREATE TABLE \"ship\" (\"name\" TEXT NOT NULL, \"tonnage\" INTEGER)")?;
//! run_in_transaction(&connection, || {
//!     let mut insert = connection.prepare_typed::<(Text, Option<i64>), ()>(
//!         "INSERT INTO \"ship\" (\"name\", \"tonnage\") VALUES (?, ?)",
//!     )?;
//!     insert.bind::<0>("Endurance")?;
//!     insert.bind::<1>(Some(350))?;
//!     insert.step()?;
//!     Ok::<_, sqlcheck::Error>(())
//! })?;
//! let mut select = connection
//!     .prepare_typed::<(), (Text, Option<i64>)>("SELECT \"name\", \"tonnage\" FROM \"ship\"")?;
//! while select.step()? == Step::Row {
//!     println!("{:?} {:?}", select.column::<0>(), select.column::<1>());
//! }
//! ```
//!
//! A position past the declared list, or a value of the wrong type, does not build. What the engine
//! actually produced is still checked on every read: a NULL cell or a cell of another type reads as
//! `None`, never as a converted value.
//!
//! Connections are not synchronized. A connection can move to another thread, but it and its
//! statements must be used by one thread at a time.

pub use sqlcheck_core::*;
pub use sqlcheck_sqlite::*;
