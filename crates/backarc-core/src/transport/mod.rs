//! Delivery transports: how one submission URL actually gets loaded.
//!
//! A transport never fails the run. Anything that goes wrong inside a
//! dispatch (blocked open, missing frame slot, navigation error) degrades
//! to a `Failure` outcome for that one task.

mod frame;
mod fresh;
mod reused;

pub use frame::FrameTransport;
pub use fresh::FreshWindowTransport;
pub use reused::ReusedWindowTransport;

use async_trait::async_trait;
use std::time::Duration;

use crate::error::NavError;
use crate::probe::{Outcome, TitleReading};
use crate::surface::Navigator;
use crate::task::Task;

/// Hard cap on one dispatch; a hung load is recorded as a failure by the
/// worker.
pub const HARD_TIMEOUT: Duration = Duration::from_secs(180);

/// Dwell after a completed load before the title probe, giving archive
/// frontends time to redirect to their final page.
pub const SETTLE_DELAY: Duration = Duration::from_secs(8);

#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn dispatch(&self, task: &Task) -> Outcome;
}

/// Window-strategy path: load the URL, then wait out the settle delay
/// before reporting the title. Navigation errors skip the dwell. The frame
/// strategy resolves on load completion and never dwells.
pub(crate) async fn settle_and_probe(
    navigator: &dyn Navigator,
    url: &str,
) -> Result<TitleReading, NavError> {
    let reading = navigator.load(url).await?;
    tokio::time::sleep(SETTLE_DELAY).await;
    Ok(reading)
}
