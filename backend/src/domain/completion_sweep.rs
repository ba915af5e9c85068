//! Periodic sweep that completes confirmed bookings whose stay has ended.

use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use super::booking_service::BookingService;

/// Runs the completion sweep forever at `interval`.
///
/// Intended to be spawned as a background task alongside the server. Each
/// pass is independent; a failed pass is logged and the next tick tries
/// again.
pub async fn run(service: BookingService, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    // A stalled pass should not cause a burst of catch-up passes.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(interval_secs = interval.as_secs(), "completion sweep started");
    loop {
        ticker.tick().await;
        match service.sweep_completions().await {
            Ok(0) => debug!("completion sweep found nothing to do"),
            Ok(completed) => info!(completed, "completion sweep finished"),
            Err(err) => error!(error = %err, "completion sweep failed"),
        }
    }
}
