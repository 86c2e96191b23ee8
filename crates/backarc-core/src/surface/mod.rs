//! Delivery surfaces: navigation, windows, and embedded frame slots.

mod frame;
mod http;
mod navigator;
mod registry;
mod window;

pub use frame::FrameGrid;
pub use http::HttpNavigator;
pub use navigator::Navigator;
pub use registry::WindowRegistry;
pub use window::{HeadlessOpener, WindowHandle, WindowKind, WindowOpener};
