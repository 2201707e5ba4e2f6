//! # docent-telemetry
//!
//! Logging setup for binaries built on the Docent crates.
//!
//! Library crates only emit `tracing` events; a binary installs exactly one
//! global subscriber through [`init_telemetry`] or [`init_json_telemetry`].
//! The filter is read from `RUST_LOG` and falls back to `info`.
//!
//! Tests that need to assert on emitted events use [`EventCapture`] with
//! `tracing::subscriber::with_default` instead of a global subscriber.

mod capture;

pub use capture::{CaptureLayer, CapturedEvent, EventCapture};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a human-readable subscriber for `service_name`.
///
/// Returns `false` if a global subscriber was already installed, in which
/// case nothing changes.
pub fn init_telemetry(service_name: &str) -> bool {
    let installed = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_target(true).compact())
        .try_init()
        .is_ok();
    if installed {
        tracing::info!(service.name = service_name, "telemetry initialized");
    }
    installed
}

/// Install a JSON subscriber (one object per line) for `service_name`.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_json_telemetry(service_name: &str) -> bool {
    let installed = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().json().with_current_span(true).with_span_list(false))
        .try_init()
        .is_ok();
    if installed {
        tracing::info!(service.name = service_name, format = "json", "telemetry initialized");
    }
    installed
}
