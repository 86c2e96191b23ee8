//! Per-run shared state: the task queue, progress, and the generation
//! receiver workers watch for cancellation.

use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::watch;

use crate::probe::Outcome;
use crate::task::Task;

use super::events::{EventSender, RunEvent};
use super::{RunSummary, TaskResult};

pub(super) struct RunContext {
    run: u64,
    generation: watch::Receiver<u64>,
    queue: Mutex<VecDeque<Task>>,
    total: usize,
    progress: Mutex<Vec<TaskResult>>,
    events: Option<EventSender>,
}

impl RunContext {
    pub(super) fn new(
        run: u64,
        generation: watch::Receiver<u64>,
        tasks: Vec<Task>,
        events: Option<EventSender>,
    ) -> Self {
        let total = tasks.len();
        Self {
            run,
            generation,
            queue: Mutex::new(tasks.into()),
            total,
            progress: Mutex::new(Vec::with_capacity(total)),
            events,
        }
    }

    pub(super) fn run(&self) -> u64 {
        self.run
    }

    /// Whether this run is still the live generation.
    pub(super) fn is_current(&self) -> bool {
        *self.generation.borrow() == self.run
    }

    /// Resolves once a newer generation supersedes this run. Also resolves
    /// if the scheduler itself is gone.
    pub(super) async fn cancelled(&self) {
        let mut rx = self.generation.clone();
        let _ = rx.wait_for(|g| *g != self.run).await;
    }

    /// Take the next task. Each task is handed to exactly one worker.
    pub(super) fn pop(&self) -> Option<Task> {
        self.queue.lock().unwrap().pop_front()
    }

    pub(super) fn emit(&self, event: RunEvent) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event);
        }
    }

    pub(super) fn task_started(&self, task: &Task) {
        self.emit(RunEvent::TaskStarted {
            run: self.run,
            index: task.index,
            label: task.label.clone(),
            archive_url: task.archive_url.clone(),
        });
    }

    /// Record one finished task. A result arriving after the run was
    /// superseded is discarded. The progress lock is held across record and
    /// emit so `(done, total)` pairs leave in order.
    pub(super) fn task_finished(&self, task: &Task, outcome: Outcome) {
        let mut progress = self.progress.lock().unwrap();
        if !self.is_current() {
            return;
        }
        progress.push(TaskResult {
            index: task.index,
            target: task.target,
            label: task.label.clone(),
            backlink_url: task.backlink_url.clone(),
            archive_url: task.archive_url.clone(),
            outcome,
        });
        let done = progress.len();
        self.emit(RunEvent::TaskFinished {
            run: self.run,
            index: task.index,
            label: task.label.clone(),
            outcome,
            done,
            total: self.total,
        });
    }

    pub(super) fn summary(&self) -> RunSummary {
        let progress = self.progress.lock().unwrap();
        RunSummary {
            run: self.run,
            total: self.total,
            done: progress.len(),
            cancelled: !self.is_current(),
            results: progress.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::ArchiveTarget;
    use tokio::sync::mpsc;

    fn task() -> Task {
        Task {
            index: 0,
            target: ArchiveTarget::Wayback,
            label: "Wayback".to_string(),
            backlink_url: "https://example.com/x".to_string(),
            archive_url: "https://web.archive.org/save/https%3A%2F%2Fexample.com%2Fx".to_string(),
        }
    }

    #[test]
    fn result_recorded_while_run_is_current() {
        let (_gen, gen_rx) = watch::channel(1u64);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ctx = RunContext::new(1, gen_rx, vec![task()], Some(tx));

        let popped = ctx.pop().unwrap();
        ctx.task_finished(&popped, Outcome::Success);

        let summary = ctx.summary();
        assert_eq!(summary.done, 1);
        assert!(!summary.cancelled);
        assert!(matches!(
            rx.try_recv(),
            Ok(RunEvent::TaskFinished {
                done: 1,
                total: 1,
                ..
            })
        ));
    }

    #[test]
    fn late_result_after_supersession_is_discarded() {
        let (gen_tx, gen_rx) = watch::channel(1u64);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ctx = RunContext::new(1, gen_rx, vec![task()], Some(tx));
        let popped = ctx.pop().unwrap();

        // The run is superseded while the dispatch is still in flight; the
        // completion that straggles in afterwards must leave no trace.
        gen_tx.send_modify(|g| *g += 1);
        ctx.task_finished(&popped, Outcome::Success);

        let summary = ctx.summary();
        assert_eq!(summary.done, 0);
        assert!(summary.results.is_empty());
        assert!(summary.cancelled);
        assert!(rx.try_recv().is_err());
    }
}
