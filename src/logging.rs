use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `MEMOKEYS_LOG=memokeys=debug`
pub const LOG_ENV: &str = "MEMOKEYS_LOG";

/// Sends tracing output to `path`. The terminal is owned by the UI, so nothing goes to stderr.
pub fn init(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    // a subscriber may already be installed when running under a test harness
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();

    Ok(())
}
