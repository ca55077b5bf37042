//! Baseview [`WindowHandler`] that hosts one [`UiWidget`].
//!
//! The window plays the host toolkit's part:
//!
//! 1. Context create is delivered as soon as the GL context is loaded
//! 2. Input events are translated and dispatched to the widget
//! 3. Each `on_frame()` sets the viewport, clears and runs the render tick
//! 4. Context destroy is delivered on `WillClose`

use std::sync::Arc;

use baseview::gl::GlConfig;
use baseview::{
    Event, EventStatus as BvEventStatus, Size, Window, WindowEvent, WindowHandler,
    WindowOpenOptions, WindowScalePolicy,
};
use egui::Vec2;
use glow::HasContext;
use rackui_core::{DrawUi, EventStatus, UiContextConfig, UiWidget};
use raw_window_handle::HasRawWindowHandle;

use crate::backend::GlowBackend;
use crate::translate::{self, HostEvent, Translator};

/// Window setup for [`open_parented`] and [`open_blocking`].
#[derive(Debug, Clone, PartialEq)]
pub struct WindowOptions {
    /// Window title.
    pub title: String,
    /// Width in logical pixels.
    pub width: u32,
    /// Height in logical pixels.
    pub height: u32,
    /// DPI scale factor (1.0 = no scaling).
    pub scale: f64,
    /// Color the framebuffer is cleared to before each frame.
    pub clear_color: [f32; 4],
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "rackui".to_owned(),
            width: 480,
            height: 320,
            scale: 1.0,
            clear_color: [0.1, 0.1, 0.12, 1.0],
        }
    }
}

impl WindowOptions {
    fn scale(&self) -> f64 {
        if self.scale.is_finite() && self.scale > 0.0 {
            self.scale
        } else {
            1.0
        }
    }

    fn to_baseview(&self) -> WindowOpenOptions {
        WindowOpenOptions {
            title: self.title.clone(),
            size: Size::new(f64::from(self.width), f64::from(self.height)),
            scale: WindowScalePolicy::ScaleFactor(self.scale()),
            gl_config: Some(GlConfig {
                version: (3, 2),
                ..GlConfig::default()
            }),
        }
    }
}

/// Open a widget window inside a host-provided parent.
///
/// `draw` runs once per frame. Returns a [`baseview::WindowHandle`];
/// dropping it closes the window.
pub fn open_parented<P, D>(
    parent: &P,
    options: WindowOptions,
    config: UiContextConfig,
    draw: D,
) -> baseview::WindowHandle
where
    P: HasRawWindowHandle,
    D: DrawUi + Send + 'static,
{
    let bv_options = options.to_baseview();
    baseview::Window::open_parented(parent, bv_options, move |window: &mut Window<'_>| {
        WidgetHandler::build(window, &options, &config, draw)
    })
}

/// Open a top-level widget window and run its event loop until it closes.
pub fn open_blocking<D>(options: WindowOptions, config: UiContextConfig, draw: D)
where
    D: DrawUi + Send + 'static,
{
    let bv_options = options.to_baseview();
    baseview::Window::open_blocking(bv_options, move |window: &mut Window<'_>| {
        WidgetHandler::build(window, &options, &config, draw)
    });
}

/// Drives one widget from baseview callbacks.
struct WidgetHandler<D: DrawUi> {
    widget: UiWidget<GlowBackend, D>,
    /// GL function table (shared with the backend), for viewport and clear.
    gl: Option<Arc<glow::Context>>,
    translator: Translator,
    /// Scratch buffer reused across events.
    pending: Vec<HostEvent>,
    physical_size: [u32; 2],
    logical_size: Vec2,
    clear_color: [f32; 4],
}

impl<D: DrawUi> WidgetHandler<D> {
    fn build(
        window: &mut Window<'_>,
        options: &WindowOptions,
        config: &UiContextConfig,
        draw: D,
    ) -> Self {
        let gl = window.gl_context().map(|gl_context| {
            #[allow(unsafe_code)]
            // SAFETY: the loader resolves function pointers from the window's
            // GL context, which stays valid for the window lifetime. The
            // context is made current before loading.
            unsafe {
                gl_context.make_current();
                Arc::new(glow::Context::from_loader_function(|s| {
                    gl_context.get_proc_address(s)
                }))
            }
        });

        let backend = match &gl {
            Some(gl) => GlowBackend::new(Arc::clone(gl)),
            None => {
                tracing::warn!(
                    title = %options.title,
                    "window has no GL context; UI will not render"
                );
                GlowBackend::without_context()
            }
        };

        let scale = options.scale();
        let logical_size = Vec2::new(options.width as f32, options.height as f32);
        let physical_size = [
            (f64::from(options.width) * scale).round() as u32,
            (f64::from(options.height) * scale).round() as u32,
        ];

        let mut widget = UiWidget::new(backend, draw, config);
        let _ = widget.on_context_create();

        Self {
            widget,
            gl,
            translator: Translator::new(),
            pending: Vec::new(),
            physical_size,
            logical_size,
            clear_color: options.clear_color,
        }
    }

    fn make_current(window: &mut Window<'_>) -> bool {
        let Some(gl_context) = window.gl_context() else {
            return false;
        };
        #[allow(unsafe_code)]
        // SAFETY: binds the window's own GL context to this thread; baseview
        // calls the handler on the window thread only.
        unsafe {
            gl_context.make_current();
        }
        true
    }

    fn dispatch(&mut self) -> EventStatus {
        let mut captured = false;
        for event in self.pending.drain(..) {
            let status = match event {
                HostEvent::Hover(e) => self.widget.on_hover(&e),
                HostEvent::DragHover(e) => self.widget.on_drag_hover(&e),
                HostEvent::DragLeave(e) => self.widget.on_drag_leave(&e),
                HostEvent::Scroll(e) => self.widget.on_hover_scroll(&e),
                HostEvent::Button(e) => self.widget.on_button(&e),
                HostEvent::Key(e) => self.widget.on_select_key(&e),
                HostEvent::Text(e) => self.widget.on_select_text(&e),
            };
            captured |= status.is_captured();
        }
        EventStatus::captured_if(captured)
    }

    fn clear(&self) {
        let Some(gl) = &self.gl else {
            return;
        };
        let [r, g, b, a] = self.clear_color;
        #[allow(unsafe_code)]
        // SAFETY: the context is current (checked by the caller) and the
        // arguments are plain values.
        unsafe {
            gl.viewport(
                0,
                0,
                self.physical_size[0] as i32,
                self.physical_size[1] as i32,
            );
            gl.clear_color(r, g, b, a);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }
}

impl<D: DrawUi> WindowHandler for WidgetHandler<D> {
    fn on_frame(&mut self, window: &mut Window<'_>) {
        if !Self::make_current(window) {
            return;
        }

        self.clear();
        self.widget
            .draw_framebuffer(self.physical_size, self.logical_size);

        if let Some(gl_context) = window.gl_context() {
            gl_context.swap_buffers();
        }
    }

    fn on_event(&mut self, window: &mut Window<'_>, event: Event) -> BvEventStatus {
        match event {
            Event::Mouse(mouse_event) => {
                self.translator.mouse(&mouse_event, &mut self.pending);
                to_baseview(self.dispatch())
            }

            Event::Keyboard(kb_event) => {
                translate::keyboard(&kb_event, &mut self.pending);
                to_baseview(self.dispatch())
            }

            Event::Window(WindowEvent::Resized(info)) => {
                let physical = info.physical_size();
                let logical = info.logical_size();
                self.physical_size = [physical.width, physical.height];
                self.logical_size = Vec2::new(logical.width as f32, logical.height as f32);
                tracing::trace!(
                    width = physical.width,
                    height = physical.height,
                    "framebuffer resized"
                );
                BvEventStatus::Captured
            }

            Event::Window(WindowEvent::WillClose) => {
                // The painter must be released while its context is current.
                Self::make_current(window);
                let _ = self.widget.on_context_destroy();
                BvEventStatus::Captured
            }

            Event::Window(_) => BvEventStatus::Ignored,
        }
    }
}

fn to_baseview(status: EventStatus) -> BvEventStatus {
    match status {
        EventStatus::Captured => BvEventStatus::Captured,
        EventStatus::Ignored => BvEventStatus::Ignored,
    }
}
