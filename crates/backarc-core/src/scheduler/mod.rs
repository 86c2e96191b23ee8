//! Bounded-concurrency submission scheduler.
//!
//! One `start` call is one run. Starting bumps a generation counter that
//! every worker watches; `stop` (or a newer `start`) bumps it again, which
//! cancels in-flight dispatches, and then sweeps every open window and
//! frame slot. Results that straggle in from a superseded run are
//! discarded.

mod context;
mod events;
mod worker;

pub use events::{event_channel, EventReceiver, EventSender, RunEvent};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::config::{Mode, Reuse};
use crate::probe::Outcome;
use crate::surface::{
    FrameGrid, HeadlessOpener, Navigator, WindowKind, WindowOpener, WindowRegistry,
};
use crate::task::{ArchiveTarget, TaskList};
use crate::transport::{FrameTransport, FreshWindowTransport, ReusedWindowTransport, Transport};

use context::RunContext;

/// Pause between a completed run and its automatic rerun.
pub const RERUN_PAUSE: Duration = Duration::from_millis(500);

/// Knobs for one run.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub mode: Mode,
    pub reuse: Reuse,
    pub concurrency: usize,
}

impl From<&crate::config::BackarcConfig> for RunOptions {
    fn from(cfg: &crate::config::BackarcConfig) -> Self {
        Self {
            mode: cfg.mode,
            reuse: cfg.reuse,
            concurrency: cfg.concurrency,
        }
    }
}

/// Outcome of one task, recorded in completion order.
#[derive(Debug, Clone)]
pub struct TaskResult {
    pub index: usize,
    pub target: ArchiveTarget,
    pub label: String,
    pub backlink_url: String,
    pub archive_url: String,
    pub outcome: Outcome,
}

/// Final accounting for one run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run: u64,
    pub total: usize,
    pub done: usize,
    pub cancelled: bool,
    pub results: Vec<TaskResult>,
}

impl RunSummary {
    pub fn successes(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.outcome == Outcome::Success)
            .count()
    }

    pub fn failures(&self) -> usize {
        self.done - self.successes()
    }
}

pub struct Scheduler {
    navigator: Arc<dyn Navigator>,
    opener: Arc<dyn WindowOpener>,
    windows: Arc<WindowRegistry>,
    frames: Arc<FrameGrid>,
    generation: watch::Sender<u64>,
    running: AtomicBool,
}

impl Scheduler {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self::with_opener(navigator, Arc::new(HeadlessOpener))
    }

    pub fn with_opener(navigator: Arc<dyn Navigator>, opener: Arc<dyn WindowOpener>) -> Self {
        let (generation, _) = watch::channel(0);
        Self {
            navigator,
            opener,
            windows: WindowRegistry::new(),
            frames: Arc::new(FrameGrid::new()),
            generation,
            running: AtomicBool::new(false),
        }
    }

    /// Whether a run is in flight. False as soon as `stop` is called, even
    /// while the superseded run is still unwinding.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn windows(&self) -> Arc<WindowRegistry> {
        Arc::clone(&self.windows)
    }

    pub fn frames(&self) -> Arc<FrameGrid> {
        Arc::clone(&self.frames)
    }

    /// Run the given tasks to completion (or cancellation) and return the
    /// summary. Supersedes any run still in flight.
    pub async fn start(
        &self,
        options: RunOptions,
        tasks: TaskList,
        events: Option<EventSender>,
    ) -> RunSummary {
        let mut run = 0;
        self.generation.send_modify(|g| {
            *g += 1;
            run = *g;
        });

        self.running.store(true, Ordering::Release);

        // Sweep anything a superseded run left behind before building anew.
        self.windows.close_all();
        let concurrency = options.concurrency.max(1);
        match options.mode {
            Mode::Iframe => self.frames.build(concurrency),
            Mode::Popup | Mode::Tab => self.frames.clear(),
        }

        let total = tasks.tasks.len();
        info!(run, total, concurrency, mode = ?options.mode, "run started");
        let ctx = Arc::new(RunContext::new(
            run,
            self.generation.subscribe(),
            tasks.tasks,
            events,
        ));
        ctx.emit(RunEvent::RunStarted { run, total });

        if total > 0 {
            let mut workers = JoinSet::new();
            for slot in 0..concurrency {
                let transport = self.make_transport(options, slot);
                let ctx = Arc::clone(&ctx);
                workers.spawn(worker::run(slot, ctx, transport));
            }
            while workers.join_next().await.is_some() {}
        }

        let summary = ctx.summary();
        if ctx.is_current() {
            // Natural completion: tear down run surfaces ourselves. On
            // cancellation the superseding stop/start already swept them.
            self.windows.close_all();
            self.frames.clear();
            self.running.store(false, Ordering::Release);
        }
        info!(
            run,
            done = summary.done,
            cancelled = summary.cancelled,
            "run finished"
        );
        ctx.emit(RunEvent::RunFinished {
            run,
            summary: summary.clone(),
        });
        summary
    }

    /// Cancel the run in flight, close every open window, and tear down
    /// the frame grid. Results that arrive after this are discarded.
    pub fn stop(&self) {
        self.generation.send_modify(|g| *g += 1);
        self.running.store(false, Ordering::Release);
        debug!("stop requested, sweeping surfaces");
        self.windows.close_all();
        self.frames.clear();
    }

    /// Run repeatedly while auto-rerun is on: a fresh task list is built
    /// for every pass, with a short pause between passes. Returns the last
    /// summary once cancelled or once rerun is off.
    pub async fn run_repeating<F>(
        &self,
        options: RunOptions,
        rerun: bool,
        mut build: F,
        events: Option<EventSender>,
    ) -> RunSummary
    where
        F: FnMut() -> TaskList,
    {
        loop {
            let summary = self.start(options, build(), events.clone()).await;
            if !rerun || summary.cancelled {
                return summary;
            }
            let before = *self.generation.borrow();
            tokio::time::sleep(RERUN_PAUSE).await;
            // A stop during the pause means no rerun.
            if *self.generation.borrow() != before {
                return summary;
            }
        }
    }

    fn make_transport(&self, options: RunOptions, slot: usize) -> Arc<dyn Transport> {
        match options.mode {
            Mode::Iframe => Arc::new(FrameTransport::new(
                slot,
                Arc::clone(&self.frames),
                Arc::clone(&self.navigator),
            )),
            Mode::Popup | Mode::Tab => {
                let kind = match options.mode {
                    Mode::Popup => WindowKind::Popup,
                    _ => WindowKind::Tab,
                };
                match options.reuse {
                    Reuse::Fresh => Arc::new(FreshWindowTransport::new(
                        kind,
                        Arc::clone(&self.windows),
                        Arc::clone(&self.opener),
                        Arc::clone(&self.navigator),
                    )),
                    Reuse::Reuse => Arc::new(ReusedWindowTransport::new(
                        kind,
                        Arc::clone(&self.windows),
                        Arc::clone(&self.opener),
                        Arc::clone(&self.navigator),
                    )),
                }
            }
        }
    }
}
