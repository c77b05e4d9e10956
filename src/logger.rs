use std::str::FromStr;
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;
use crate::metrics::Outcome;

pub fn init_tracing(format: LogFormat) -> Result<(), anyhow::Error> {

    let filter = EnvFilter::from_str(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()).as_str()
    )?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stdout);

    let result = match format {
        LogFormat::Json => subscriber.json().try_init(),
        LogFormat::Text => subscriber.try_init()
    };

    // a subscriber may already be installed (tests, embedding)
    if let Err(e) = result {
        warn!("tracing already initialized: {}", e);
    }

    Ok(())

}

/// One line per relayed request.
pub fn log_generation(
    outcome: Outcome,
    language: Option<&str>,
    prompt_len: usize,
    elapsed: Duration
) {

    info!(
        outcome = outcome.as_str(),
        language = language.unwrap_or("-"),
        prompt_len,
        elapsed_ms = elapsed.as_millis() as u64,
        "generation request finished"
    );

}
