use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file path.
pub const LOG_PATH_ENV: &str = "LIBRARY_VIEW_LOG";

/// Initialize tracing with optional file output.
///
/// Logging is disabled unless `LIBRARY_VIEW_LOG` names a file path; the host
/// application owns stdout and stderr.
///
/// Log files get unique names so several screens or processes never share
/// one: `{path}.{timestamp}.{pid}`. Returns the path actually written to.
pub fn init_tracing() -> Option<String> {
    let log_path = std::env::var(LOG_PATH_ENV).ok()?;

    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let unique_path = format!("{}.{}.{}", log_path, timestamp, pid);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Ok(file) = std::fs::File::create(&unique_path) else {
        eprintln!("Warning: Failed to create log file: {}", unique_path);
        return None;
    };

    let file_layer = fmt::layer()
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    // A host that already installed a subscriber keeps it.
    if tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        return None;
    }

    Some(unique_path)
}
