#![doc(test(attr(deny(warnings))))]

//! Buyback Core offers the transaction logging, aggregation, and daily cash
//! reconciliation primitives that power a recycling buy-back platform's
//! dashboards and reports.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static INIT_TRACING: Once = Once::new();

/// Installs the global tracing subscriber, honoring `RUST_LOG` when set and
/// defaulting this crate to `info` otherwise. Safe to call repeatedly; only
/// the first call has any effect.
pub fn init() {
    INIT_TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("buyback_core=info"));
        fmt().with_env_filter(filter).init();
        tracing::info!("Buyback Core tracing initialized.");
    });
}
