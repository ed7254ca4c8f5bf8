use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::http::{CLIENT_TARGET, TRACE_TARGET};

pub(crate) fn init_logging(verbose: bool, trace: bool, no_color: bool) {
    let filter = std::env::var("HTTPREQ_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| EnvFilter::new(default_directives(verbose, trace)),
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new("info")),
        );

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

fn default_directives(verbose: bool, trace: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    let client = if verbose { "debug" } else { "warn" };
    let trace_level = if trace { "info" } else { "off" };
    format!(
        "{},{}={},{}={}",
        level, CLIENT_TARGET, client, TRACE_TARGET, trace_level
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_is_idempotent() {
        init_logging(false, false, true);
        init_logging(true, true, true);
    }

    #[test]
    fn trace_target_is_off_unless_requested() -> Result<(), String> {
        let quiet = default_directives(false, false);
        if !quiet.contains("httpreq::trace=off") {
            return Err(format!("Unexpected directives: {}", quiet));
        }
        let traced = default_directives(true, true);
        if !traced.contains("httpreq::trace=info") || !traced.starts_with("debug") {
            return Err(format!("Unexpected directives: {}", traced));
        }
        Ok(())
    }
}
