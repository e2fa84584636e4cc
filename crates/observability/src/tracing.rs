//! Tracing/logging initialization.
//!
//! `RUST_LOG` selects the filter and `STOCKROOM_LOG_FORMAT` the output
//! (`json`, the default, or `compact` for local development).

use tracing_subscriber::EnvFilter;

/// sqlx logs every statement at `info`; keep that out of the default output.
const DEFAULT_FILTER: &str = "info,sqlx=warn";

const FORMAT_VAR: &str = "STOCKROOM_LOG_FORMAT";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Compact,
}

impl LogFormat {
    /// Unknown values fall back to JSON.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("compact") | Some("text") => Self::Compact,
            _ => Self::Json,
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let format = LogFormat::parse(std::env::var(FORMAT_VAR).ok().as_deref());

    let installed = match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .with_current_span(true)
            .with_target(false)
            .try_init(),
        LogFormat::Compact => tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .compact()
            .with_target(true)
            .try_init(),
    };

    if installed.is_ok() {
        ::tracing::debug!(?format, "logging initialised");
    }
}
