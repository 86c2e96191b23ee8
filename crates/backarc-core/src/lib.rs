//! backarc core: backlink expansion and bulk archive submission.
//!
//! The centerpiece is [`scheduler`]: a bounded-concurrency worker pool that
//! drains a shared task queue through pluggable delivery transports
//! (embedded frame, fresh window, reused window), with generation-token
//! cancellation and a hard per-task timeout.

pub mod config;
pub mod error;
pub mod logging;
pub mod probe;
pub mod scheduler;
pub mod surface;
pub mod task;
pub mod template;
pub mod transport;
pub mod video;
