//! Test harness: a simtube page adapted behind the pipeline's DOM boundary.

pub mod sim_adapter;

pub use sim_adapter::SimDom;

/// Title link target for a video id, as the host page renders it.
pub fn watch_href(id: &str) -> String {
    format!("/watch?v={id}")
}

/// Debug-level tracing for test runs. Safe to call repeatedly.
pub fn init_tracing() {
    tubelens_common::telemetry::init(true);
}
