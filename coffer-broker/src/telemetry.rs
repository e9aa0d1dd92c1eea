use tracing::{info_span, Span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global JSON log subscriber; safe to call more than once.
pub fn init() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(false),
        )
        .try_init()
        .ok();

    Ok(())
}

/// Span wrapping a single dispatched request.
pub fn request_span(method: &str, correlation_id: &str) -> Span {
    info_span!(
        "request",
        method = %method,
        correlation_id = %correlation_id
    )
}
