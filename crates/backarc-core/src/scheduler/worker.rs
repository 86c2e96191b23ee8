//! Worker loop: drain the shared queue until it runs dry or the run is
//! superseded.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::probe::Outcome;
use crate::transport::{Transport, HARD_TIMEOUT};

use super::context::RunContext;

pub(super) async fn run(slot: usize, ctx: Arc<RunContext>, transport: Arc<dyn Transport>) {
    debug!(slot, run = ctx.run(), "worker started");
    while ctx.is_current() {
        let Some(task) = ctx.pop() else {
            break;
        };
        ctx.task_started(&task);

        let outcome = tokio::select! {
            res = tokio::time::timeout(HARD_TIMEOUT, transport.dispatch(&task)) => {
                match res {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        warn!(slot, label = %task.label, url = %task.archive_url, "dispatch hit the hard timeout");
                        Outcome::Failure
                    }
                }
            }
            _ = ctx.cancelled() => break,
        };

        ctx.task_finished(&task, outcome);
    }
    debug!(slot, run = ctx.run(), "worker finished");
}
