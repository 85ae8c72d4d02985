//! Logging setup using tracing

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a stderr subscriber for hosts that don't bring their own.
///
/// The level is controlled by the `DOCKSTATE_LOG` environment variable,
/// e.g. `DOCKSTATE_LOG=dockstate=trace` to see ignored stale ids.
pub fn init() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_env("DOCKSTATE_LOG")
        .unwrap_or_else(|_| EnvFilter::new("dockstate=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true),
        )
        .try_init()?;

    tracing::debug!("dockstate logging initialised");
    Ok(())
}
