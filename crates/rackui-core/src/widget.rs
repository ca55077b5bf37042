//! The host-facing widget: lifecycle notifications, input events, render tick.
//!
//! | Host event | Input update | Captured when |
//! |---|---|---|
//! | hover / drag-hover | pointer = pos + delta | never |
//! | drag-leave | all buttons up | UI wants pointer |
//! | hover-scroll | wheel += delta × 0.01 | UI wants pointer |
//! | button (left only) | left down = press; modifiers | UI wants pointer |
//! | select-key (in table) | key down = press / up = release; modifiers | UI wants keyboard |
//! | select-text | queue code point | UI wants keyboard |
//!
//! Middle and right buttons are never taken so the host keeps its own
//! mouse shortcuts (panning, context menus) while the UI has focus.

use std::time::Instant;

use egui::Vec2;

use crate::backend::{DrawData, GpuBackend, TextureLedger};
use crate::context::{UiContext, UiContextConfig};
use crate::event::{
    Action, ButtonEvent, DragHoverEvent, DragLeaveEvent, EventStatus, HoverEvent,
    HoverScrollEvent, MouseButton, SelectKeyEvent, SelectTextEvent,
};
use crate::frame::{DisplayMetrics, DrawUi};
use crate::input::{BUTTON_LEFT, InputState, KeyModifiers};
use crate::keymap::KEY_TABLE_SIZE;
use crate::lifecycle::{BackendBinding, Transition};

/// What one render tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSummary {
    /// Sizes and HiDPI ratio used for the frame.
    pub metrics: DisplayMetrics,
    /// Whether the draw data reached the backend.
    pub rasterized: bool,
    /// Number of clipped primitives produced.
    pub primitives: usize,
}

/// An egui UI embedded in one host widget.
///
/// `B` renders, `D` draws the content. Field order matters: the binding is
/// declared first so that, on drop, a still-bound backend is shut down
/// before the UI context goes away.
pub struct UiWidget<B: GpuBackend, D: DrawUi> {
    binding: BackendBinding<B>,
    context: UiContext,
    textures: TextureLedger,
    replay_textures: bool,
    draw: D,
}

impl<B: GpuBackend, D: DrawUi> UiWidget<B, D> {
    /// Create the UI context now; the backend stays unbound until the host
    /// reports a graphics context (or the first render tick).
    pub fn new(backend: B, draw: D, config: &UiContextConfig) -> Self {
        Self {
            binding: BackendBinding::new(backend),
            context: UiContext::new(config),
            textures: TextureLedger::new(),
            replay_textures: false,
            draw,
        }
    }

    /// The widget's UI context.
    pub fn context(&self) -> &UiContext {
        &self.context
    }

    /// Mutable UI context.
    pub fn context_mut(&mut self) -> &mut UiContext {
        &mut self.context
    }

    /// Mirrored input state.
    pub fn input(&self) -> &InputState {
        self.context.input()
    }

    /// Backend binding.
    pub fn binding(&self) -> &BackendBinding<B> {
        &self.binding
    }

    /// The draw hook.
    pub fn draw_hook(&self) -> &D {
        &self.draw
    }

    /// Mutable draw hook.
    pub fn draw_hook_mut(&mut self) -> &mut D {
        &mut self.draw
    }

    // ── Lifecycle ───────────────────────────────────────────────────────────

    /// The host created its graphics context.
    pub fn on_context_create(&mut self) -> Transition {
        let transition = self.binding.on_graphics_create();
        if transition == Transition::Changed {
            self.replay_textures = true;
        }
        transition
    }

    /// The host is about to destroy its graphics context.
    pub fn on_context_destroy(&mut self) -> Transition {
        self.binding.on_graphics_destroy()
    }

    // ── Input ───────────────────────────────────────────────────────────────

    /// Pointer moved.
    pub fn on_hover(&mut self, e: &HoverEvent) -> EventStatus {
        self.context
            .input_mut()
            .set_pointer_pos(e.pos + e.mouse_delta);
        EventStatus::Ignored
    }

    /// Pointer moved during a drag.
    pub fn on_drag_hover(&mut self, e: &DragHoverEvent) -> EventStatus {
        self.context
            .input_mut()
            .set_pointer_pos(e.pos + e.mouse_delta);
        EventStatus::Ignored
    }

    /// A drag left the widget: nothing can still be held.
    pub fn on_drag_leave(&mut self, _e: &DragLeaveEvent) -> EventStatus {
        self.context.input_mut().release_all_buttons();
        EventStatus::captured_if(self.context.wants_pointer_capture())
    }

    /// Scroll over the widget.
    pub fn on_hover_scroll(&mut self, e: &HoverScrollEvent) -> EventStatus {
        self.context.input_mut().add_scroll(e.scroll_delta);
        EventStatus::captured_if(self.context.wants_pointer_capture())
    }

    /// Mouse button. Only the left button is taken.
    pub fn on_button(&mut self, e: &ButtonEvent) -> EventStatus {
        if e.button != MouseButton::Left {
            return EventStatus::Ignored;
        }
        let input = self.context.input_mut();
        input.set_modifiers(KeyModifiers::from_mods(e.mods));
        input.set_mouse_down(BUTTON_LEFT, e.action == Action::Press);
        EventStatus::captured_if(self.context.wants_pointer_capture())
    }

    /// Key transition while selected. Codes outside `0..KEY_TABLE_SIZE`
    /// and repeats are dropped without touching any state.
    pub fn on_select_key(&mut self, e: &SelectKeyEvent) -> EventStatus {
        if !(0..KEY_TABLE_SIZE as i32).contains(&e.key) {
            return EventStatus::Ignored;
        }
        let down = match e.action {
            Action::Press => true,
            Action::Release => false,
            Action::Repeat => return EventStatus::Ignored,
        };

        let key = self.context.key_map().ui_key(e.key);
        let input = self.context.input_mut();
        input.set_modifiers(KeyModifiers::from_mods(e.mods));
        input.set_key_down(e.key, down, key);
        EventStatus::captured_if(self.context.wants_keyboard_capture())
    }

    /// Text input while selected.
    pub fn on_select_text(&mut self, e: &SelectTextEvent) -> EventStatus {
        self.context.input_mut().push_codepoint(e.codepoint);
        EventStatus::captured_if(self.context.wants_keyboard_capture())
    }

    // ── Render ──────────────────────────────────────────────────────────────

    /// Render tick: build one frame and rasterize it.
    pub fn draw_framebuffer(
        &mut self,
        framebuffer_size: [u32; 2],
        logical_size: Vec2,
    ) -> FrameSummary {
        self.draw_framebuffer_at(framebuffer_size, logical_size, Instant::now())
    }

    /// [`draw_framebuffer`](Self::draw_framebuffer) with an explicit tick
    /// time.
    pub fn draw_framebuffer_at(
        &mut self,
        framebuffer_size: [u32; 2],
        logical_size: Vec2,
        now: Instant,
    ) -> FrameSummary {
        let metrics = DisplayMetrics::new(framebuffer_size, logical_size);

        let was_bound = self.binding.is_bound();
        let bound = self.binding.ensure_bound();
        if bound && !was_bound {
            self.replay_textures = true;
        }
        if bound {
            self.binding.backend_mut().new_frame();
        }

        let mut draw_data = self.context.build_frame(&metrics, now, &mut self.draw);
        self.textures.record(&draw_data.textures_delta);

        if bound {
            if std::mem::take(&mut self.replay_textures) {
                self.restore_textures(&mut draw_data);
            }
            self.binding.backend_mut().render_draw_data(&draw_data);
        }

        FrameSummary {
            metrics,
            rasterized: bound,
            primitives: draw_data.primitives.len(),
        }
    }

    // A fresh backend has no textures; send every live one again.
    fn restore_textures(&self, draw_data: &mut DrawData) {
        draw_data.textures_delta.set = self.textures.replay().set;
        tracing::debug!(
            textures = self.textures.len(),
            "re-uploading textures after backend bind"
        );
    }
}
