use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// With `debug` set, the default directive opens up debug-level diagnostics
/// for the tubelens crates; otherwise info. `RUST_LOG` still overrides.
/// Safe to call more than once; later calls are no-ops.
pub fn init(debug: bool) {
    let directive = if debug {
        "tubelens_pipeline=debug,tubelens_common=debug,ytdata_client=debug,simtube=debug"
    } else {
        "tubelens_pipeline=info,tubelens_common=info,ytdata_client=info"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
