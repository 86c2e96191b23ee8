//! Progress events streamed to the CLI printer.

use tokio::sync::mpsc;

use crate::probe::Outcome;

use super::RunSummary;

pub type EventSender = mpsc::UnboundedSender<RunEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<RunEvent>;

/// What happened during a run. `done` over `total` in `TaskFinished` is
/// strictly monotonic within one run.
#[derive(Debug, Clone)]
pub enum RunEvent {
    RunStarted {
        run: u64,
        total: usize,
    },
    TaskStarted {
        run: u64,
        index: usize,
        label: String,
        archive_url: String,
    },
    TaskFinished {
        run: u64,
        index: usize,
        label: String,
        outcome: Outcome,
        done: usize,
        total: usize,
    },
    RunFinished {
        run: u64,
        summary: RunSummary,
    },
}

pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
