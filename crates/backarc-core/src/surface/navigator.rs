use async_trait::async_trait;

use crate::error::NavError;
use crate::probe::TitleReading;

/// Drives one URL load and reports what could be read of the resulting
/// page. Implementations must be shareable across worker slots.
#[async_trait]
pub trait Navigator: Send + Sync + 'static {
    async fn load(&self, url: &str) -> Result<TitleReading, NavError>;
}
