//! Recurring background refresh of stats and health.

use super::command::Command;
use super::dispatcher::Dispatcher;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;

/// Every `period`, fires one stats request and one health request, without
/// waiting for earlier ones to finish. The first tick is one period after start.
pub fn spawn_poller(
    dispatcher: Dispatcher,
    period: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    dispatcher.dispatch(Command::LoadStats);
                    dispatcher.dispatch(Command::CheckHealth);
                }
            }
        }
    })
}
