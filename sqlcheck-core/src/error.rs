use std::{
    ffi::{NulError, c_int},
    fmt::{self, Display},
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Status code reported by the database engine.
///
/// Opaque on purpose: the value is carried to the caller untouched, only the engine knows what it means.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StatusCode(pub c_int);

impl StatusCode {
    pub const fn code(self) -> c_int {
        self.0
    }
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sqlite3:{}", self.0)
    }
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The engine rejected the call.
    #[error("{message} ({code})")]
    Engine { code: StatusCode, message: String },

    /// An index fell outside of `[0, bound)`.
    #[error("Value {value} is out of the range [0, {bound})")]
    OutOfRange { value: i64, bound: usize },

    #[error("Invalid database path")]
    InvalidPath(#[from] NulError),

    #[error("Invalid connection url `{0}`")]
    InvalidUrl(String),

    #[error("The SQL text does not contain any statement")]
    EmptyStatement,

    #[error("Cannot prepare more than one statement at a time, found trailing SQL `{0}`")]
    TrailingSql(String),
}

impl Error {
    /// The native status code, when the engine produced this error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Engine { code, .. } => Some(*code),
            _ => None,
        }
    }
}
