#![doc(test(attr(deny(warnings))))]

//! CropKeeper keeps the records of a small farm operation in memory: crops,
//! field tasks and expenses scoped to a selected farm, with the command
//! handlers and aggregation views a dashboard needs.

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod notify;
pub mod services;
pub mod store;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("CropKeeper tracing initialized.");
    });
}
