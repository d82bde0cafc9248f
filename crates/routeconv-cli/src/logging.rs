use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter directive for a `-v` count, `None` when no flag was given
fn verbosity_level(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Installs the global subscriber, writing to stderr
///
/// Precedence: `-v` flags, then `RUST_LOG`, then the configured level.
pub fn init(verbose: u8, configured_level: &str) -> Result<()> {
    let filter = match verbosity_level(verbose) {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(configured_level))?,
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(filter)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(verbosity_level(0), None);
        assert_eq!(verbosity_level(1), Some("debug"));
        assert_eq!(verbosity_level(5), Some("trace"));
    }
}
