use std::env;
use tracing_subscriber::EnvFilter;

/// Initializes tracing on stderr using the provided log level as the default filter.
///
/// `RUST_LOG` takes precedence when set. Logs go to stderr so report and
/// JSON output on stdout stay clean.
pub fn init_tracing(level: &str, json: bool) {
    let default_directive = format!("sales_dashboard={level},sales_forecast={level}");
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter_directive))
        .with_writer(std::io::stderr);

    if json {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}
