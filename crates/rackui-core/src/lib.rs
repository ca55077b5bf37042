//! Embed an egui UI inside a modular-synth host widget.
//!
//! The host toolkit owns the window, the graphics context and the event
//! loop. This crate owns one egui context per widget and keeps it in step
//! with the host:
//!
//! - **Lifecycle**: the GPU backend is bound and unbound by the host's
//!   graphics-context create/destroy notifications, which arrive
//!   independently of the widget's own construction and drop.
//! - **Input**: host events (GLFW numbering) update a persistent input
//!   mirror, and each handler reports whether the UI consumed the event.
//! - **Frame**: each render tick sizes the display, runs the draw hook
//!   inside one egui pass and hands the tessellated result to the backend.
//!
//! # Architecture
//!
//! ```text
//! host toolkit ──events──► UiWidget ──► InputState ──┐
//!      │                      │                       ▼ (render tick)
//!      │ create / destroy     │               egui pass + DrawUi hook
//!      ▼                      ▼                       │
//! BackendBinding ◄──────── DrawData ◄── tessellate ◄──┘
//!      │
//!      ▼
//! GpuBackend (e.g. egui_glow) ──► framebuffer
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use rackui_core::egui;
//! use rackui_core::{
//!     BackendError, DrawData, GpuBackend, HoverEvent, UiContextConfig, UiWidget,
//! };
//!
//! struct NullBackend;
//!
//! impl GpuBackend for NullBackend {
//!     fn init(&mut self) -> Result<(), BackendError> { Ok(()) }
//!     fn shutdown(&mut self) {}
//!     fn render_draw_data(&mut self, _draw_data: &DrawData) {}
//! }
//!
//! let mut widget = UiWidget::new(
//!     NullBackend,
//!     |ctx: &egui::Context| {
//!         egui::CentralPanel::default().show(ctx, |ui| ui.label("cable settings"));
//!     },
//!     &UiContextConfig::default(),
//! );
//!
//! widget.on_context_create();
//! let _ = widget.on_hover(&HoverEvent {
//!     pos: egui::pos2(10.0, 10.0),
//!     mouse_delta: egui::Vec2::ZERO,
//! });
//! widget.draw_framebuffer([400, 300], egui::vec2(200.0, 150.0));
//! widget.on_context_destroy();
//! ```

pub mod backend;
pub mod context;
pub mod event;
pub mod frame;
pub mod input;
pub mod keymap;
pub mod lifecycle;
pub mod widget;

pub use backend::{BackendError, DrawData, GpuBackend, TextureLedger};
pub use context::{BASE_FONT_SIZE, FontResource, UiContext, UiContextConfig};
pub use event::{
    Action, ButtonEvent, DragHoverEvent, DragLeaveEvent, EventStatus, HoverEvent,
    HoverScrollEvent, Mods, MouseButton, SelectKeyEvent, SelectTextEvent,
};
pub use frame::{DisplayMetrics, DrawUi, FrameClock, FrameTime};
pub use input::{InputState, KeyModifiers, WHEEL_SCALE};
pub use keymap::{KEY_TABLE_SIZE, KeyMap, UiKey};
pub use lifecycle::{BackendBinding, BindingState, Transition};
pub use widget::{FrameSummary, UiWidget};

pub use egui;
