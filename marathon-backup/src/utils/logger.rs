//! tracing setup for the `mbt` binary.
//!
//! Events are written to stderr so the run summary on stdout stays clean.
//! A `RUST_LOG` directive wins over the configured level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. Fails if one is already set.
pub fn init(level: &str) -> anyhow::Result<()> {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(build_filter(from_env.as_deref(), level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()?;

    Ok(())
}

/// First usable directive of: environment, configured level, `info`.
fn build_filter(from_env: Option<&str>, level: &str) -> EnvFilter {
    from_env
        .filter(|directive| !directive.trim().is_empty())
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
