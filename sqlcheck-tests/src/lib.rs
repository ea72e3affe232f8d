mod raw;
mod transaction;
mod typed;

use crate::{
    raw::{bind_out_of_range, bind_values, invalid_sql, reuse, scalars, select_one, text_round_trip},
    transaction::{
        transaction_begin_failure, transaction_commit, transaction_error, transaction_failed_commit,
        transaction_guard, transaction_panic,
    },
    typed::{typed_matches_raw, typed_mismatch, typed_nullable, typed_reuse, typed_select},
};
use log::LevelFilter;
use sqlcheck_core::Connection;
use std::env;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

pub fn execute_tests<C: Connection>(connection: &C) {
    select_one(connection);
    invalid_sql(connection);
    scalars(connection);
    bind_values(connection);
    bind_out_of_range(connection);
    text_round_trip(connection);
    reuse(connection);
    typed_select(connection);
    typed_matches_raw(connection);
    typed_mismatch(connection);
    typed_nullable(connection);
    typed_reuse(connection);
    transaction_commit(connection);
    transaction_error(connection);
    transaction_panic(connection);
    transaction_begin_failure(connection);
    transaction_failed_commit(connection);
    transaction_guard(connection);
}

/// Runs the code with logging disabled, evaluates to the value of the code.
#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        let result = { $($code)+ };
        log::set_max_level(level);
        result
    }};
}
