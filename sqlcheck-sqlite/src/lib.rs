mod cbox;
mod connection;
mod statement;

use libsqlite3_sys::{sqlite3, sqlite3_errcode, sqlite3_errmsg, sqlite3_errstr};
use sqlcheck_core::{Error, StatusCode};
use std::{
    ffi::{CStr, c_char, c_int},
    ptr,
};

pub(crate) use cbox::*;
pub use connection::*;
pub use statement::*;

pub(crate) fn error_message_from_ptr(ptr: &'_ *const c_char) -> &'_ str {
    unsafe {
        if *ptr != ptr::null() {
            CStr::from_ptr(*ptr)
                .to_str()
                .unwrap_or("Unknown error (the error message was not a valid C string)")
        } else {
            "Unknown error (could not extract the error message)"
        }
    }
}

/// Builds the error for a failed call that returned `code`.
///
/// The message of the connection is used when it refers to that same failure, otherwise the generic
/// description of the code.
pub(crate) fn engine_error(connection: *mut sqlite3, code: c_int) -> Error {
    let message = unsafe {
        let ptr = if !connection.is_null() && sqlite3_errcode(connection) == (code & 0xff) {
            sqlite3_errmsg(connection)
        } else {
            sqlite3_errstr(code)
        };
        error_message_from_ptr(&ptr).to_string()
    };
    Error::Engine {
        code: StatusCode(code),
        message,
    }
}
