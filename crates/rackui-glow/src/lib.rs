//! OpenGL rendering and a baseview host for rackui widgets.
//!
//! [`GlowBackend`] implements [`rackui_core::GpuBackend`] with
//! `egui_glow::Painter`. [`open_parented`] and [`open_blocking`] put a
//! [`rackui_core::UiWidget`] in a baseview window with an OpenGL context and
//! act as its host toolkit: graphics-context notifications, GLFW-style input
//! events and one render tick per frame.
//!
//! # Architecture
//!
//! ```text
//! host parent window (RawWindowHandle)
//!     │
//!     ▼
//! baseview::Window (child window + GL context)
//!     │
//!     ▼
//! WidgetHandler
//!     ├── translate: baseview events → HostEvent → UiWidget handlers
//!     ├── frame: viewport + clear → UiWidget::draw_framebuffer
//!     └── GlowBackend: egui_glow::Painter → OpenGL
//! ```

mod backend;
mod handler;
pub mod translate;

pub use backend::GlowBackend;
pub use handler::{WindowOptions, open_blocking, open_parented};
pub use translate::HostEvent;
