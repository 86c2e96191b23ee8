//! Shared test doubles for scheduler runs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use backarc_core::error::{NavError, OpenBlocked};
use backarc_core::probe::TitleReading;
use backarc_core::surface::{
    HeadlessOpener, Navigator, WindowHandle, WindowKind, WindowOpener, WindowRegistry,
};
use backarc_core::task::{build_tasks, TaskList};
use backarc_core::template::{parse_template_list, TemplateEntry};
use backarc_core::config::Targets;
use backarc_core::video::VideoId;

/// Scripted navigator behavior, applied to every load.
#[derive(Clone)]
pub enum Script {
    /// Resolve with the given title after a delay.
    Title(Duration, TitleReading),
    /// Fail after a delay.
    Fail(Duration),
    /// Never resolve; only the hard timeout ends the dispatch.
    Hang,
}

pub struct MockNavigator {
    script: Script,
    loads: Mutex<Vec<String>>,
}

impl MockNavigator {
    pub fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            loads: Mutex::new(Vec::new()),
        })
    }

    pub fn loads(&self) -> Vec<String> {
        self.loads.lock().unwrap().clone()
    }
}

#[async_trait]
impl Navigator for MockNavigator {
    async fn load(&self, url: &str) -> Result<TitleReading, NavError> {
        self.loads.lock().unwrap().push(url.to_string());
        match self.script.clone() {
            Script::Title(delay, reading) => {
                tokio::time::sleep(delay).await;
                Ok(reading)
            }
            Script::Fail(delay) => {
                tokio::time::sleep(delay).await;
                Err(NavError::Failed("scripted failure".to_string()))
            }
            Script::Hang => std::future::pending().await,
        }
    }
}

/// Opener that refuses every open.
pub struct BlockedOpener;

impl WindowOpener for BlockedOpener {
    fn open(
        &self,
        _registry: &Arc<WindowRegistry>,
        _kind: WindowKind,
    ) -> Result<Arc<WindowHandle>, OpenBlocked> {
        Err(OpenBlocked)
    }
}

/// Opener that counts how many windows were actually opened.
#[derive(Default)]
pub struct CountingOpener {
    inner: HeadlessOpener,
    opens: AtomicUsize,
}

impl CountingOpener {
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

impl WindowOpener for CountingOpener {
    fn open(
        &self,
        registry: &Arc<WindowRegistry>,
        kind: WindowKind,
    ) -> Result<Arc<WindowHandle>, OpenBlocked> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        self.inner.open(registry, kind)
    }
}

pub fn video_id() -> VideoId {
    VideoId::parse("dQw4w9WgXcQ").unwrap()
}

pub fn templates(n: usize) -> Vec<TemplateEntry> {
    let entries: Vec<String> = (0..n)
        .map(|i| format!("\"https://site{i}.example/[VIDEO_ID]\""))
        .collect();
    parse_template_list(&format!("[{}]", entries.join(","))).unwrap()
}

/// Deterministic task list: `n` templates, the given targets, no shuffle.
pub fn task_list(n: usize, targets: Targets) -> TaskList {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    let mut rng = StdRng::seed_from_u64(42);
    build_tasks(&video_id(), &templates(n), targets, false, &mut rng)
}

pub fn wayback_only() -> Targets {
    Targets {
        wayback: true,
        archivetoday: false,
    }
}
