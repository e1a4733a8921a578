use std::{sync::Arc, time::Duration};

use tokio::{
    sync::broadcast,
    time::{MissedTickBehavior, interval},
};
use tracing::{debug, info};

use crate::{
    client::HistoryApi,
    endpoint::EventQuery,
    widget::{HistoryWidget, LoadOutcome},
};

/// Load today's event now and again every `period` until `shutdown` fires.
/// Ticks that land on an in-flight load are dropped by the widget. A load
/// still running at shutdown is abandoned, which releases the in-flight flag.
pub async fn run_auto_refresh<A: HistoryApi>(
    widget: Arc<HistoryWidget<A>>,
    period: Duration,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(instance = %widget.instance_id(), period_secs = period.as_secs(), "Auto-refresh started");

    loop {
        tokio::select! {
            _ = shutdown.recv() => break,
            _ = ticker.tick() => {
                tokio::select! {
                    _ = shutdown.recv() => break,
                    outcome = widget.load(EventQuery::Today) => {
                        if outcome == LoadOutcome::Skipped {
                            debug!(instance = %widget.instance_id(), "Auto-refresh tick skipped");
                        }
                    }
                }
            }
        }
    }

    info!(instance = %widget.instance_id(), "Auto-refresh stopped");
}
