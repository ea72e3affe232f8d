mod bounded;
mod connection;
mod error;
mod sql_type;
mod statement;
mod transaction;
mod type_list;
mod typed;

pub use bounded::*;
pub use connection::*;
pub use error::*;
pub use sql_type::*;
pub use statement::*;
pub use transaction::*;
pub use type_list::*;
pub use typed::*;
