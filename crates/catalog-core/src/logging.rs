use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize a tracing subscriber for catalog operations.
///
/// Logs go to stdout in the compact format. The level comes from the
/// `RUST_LOG` environment variable, defaulting to "info". The catalog
/// crates never call this themselves; it is for the binaries that embed them.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{info, warn};

    #[test]
    fn test_logging_init() {
        // A subscriber can only be installed once per process
        let _ = init();

        info!(url = "file:///catalog.git", "Cloned catalog repository");
        warn!(path = "catalog/broken", "Skipping entry with unreadable metadata");
    }

    #[test]
    fn test_second_init_fails() {
        let _ = init();
        assert!(init().is_err());
    }
}
