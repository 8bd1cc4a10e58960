use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const DEFAULT_FILTER: &str = "faculty=debug,faculty_api=debug,tower_http=debug";

/// Initialize tracing. `log_format = "json"` switches the console output to JSON lines.
///
/// A second call (tests build several apps per process) leaves the first subscriber in place.
pub fn init_telemetry(log_format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let filter =
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let result = if log_format.eq_ignore_ascii_case("json") {
        tracing_subscriber::registry()
            .with(filter())
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .try_init()
    } else {
        let console_fmt = tracing_subscriber::fmt::layer().event_format(
            Format::default()
                .compact()
                .with_target(false)
                .without_time(),
        );
        tracing_subscriber::registry()
            .with(filter())
            .with(console_fmt)
            .try_init()
    };

    match result {
        Ok(()) => {
            tracing::info!(log_format = %log_format, "Tracing initialized");
            Ok(())
        }
        Err(e) => {
            tracing::debug!(error = %e, "Tracing subscriber already set");
            Ok(())
        }
    }
}

pub async fn shutdown_telemetry() {
    tracing::debug!("Telemetry shutdown");
}
