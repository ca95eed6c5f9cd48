//! Initialization helpers for the application startup.

use crate::config::Config;
use crate::engine::ListRegistry;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{info, warn};

/// Sets up the tracing subscriber with the configured filters.
pub fn setup_logging(config: &Config) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

/// Builds the registry for the configured lists.
pub fn init_registry(config: &Config) -> Arc<ListRegistry> {
    let registry = ListRegistry::from_config(config);

    if registry.is_empty() {
        warn!("No name lists configured");
    } else {
        info!(
            "Watching {} name lists, reload every {:?}",
            registry.len(),
            registry.reload_interval()
        );
    }

    Arc::new(registry)
}

/// Runs a full refresh on the blocking pool, since it does synchronous file I/O.
pub async fn refresh_in_background(registry: Arc<ListRegistry>) {
    let result = tokio::task::spawn_blocking(move || registry.refresh_all()).await;
    if let Err(e) = result {
        warn!("Name list refresh task failed: {}", e);
    }
}

/// Interval for the reload loop. A pass that overruns the period pushes the
/// next tick back rather than firing the missed ticks back to back.
pub fn reload_ticker(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Refreshes the registry every reload interval, forever.
pub async fn run_reloader(registry: Arc<ListRegistry>) {
    let mut interval = reload_ticker(registry.reload_interval());
    // The first tick completes immediately
    interval.tick().await;

    loop {
        interval.tick().await;
        refresh_in_background(registry.clone()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reload_ticker_delays_missed_ticks() {
        let interval = reload_ticker(Duration::from_secs(5));
        assert_eq!(interval.missed_tick_behavior(), MissedTickBehavior::Delay);
        assert_eq!(interval.period(), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overrun_does_not_burst() {
        let mut interval = reload_ticker(Duration::from_secs(10));
        interval.tick().await;

        // A pass three times longer than the period
        tokio::time::sleep(Duration::from_secs(30)).await;
        let start = tokio::time::Instant::now();
        interval.tick().await;
        interval.tick().await;

        assert_eq!(start.elapsed(), Duration::from_secs(10));
    }
}
