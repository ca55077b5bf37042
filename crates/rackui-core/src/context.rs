//! One isolated egui context with its mirrored input state.
//!
//! Every [`UiWidget`](crate::UiWidget) owns exactly one [`UiContext`]. There
//! is no process-wide "current context": all operations go through the
//! owning widget, so two widgets can never write into each other's state.

use std::sync::Arc;
use std::time::Instant;

use egui::{FontData, FontDefinitions, FontFamily, Pos2, RawInput, Rect, TextStyle, ViewportId};

use crate::backend::DrawData;
use crate::frame::{DisplayMetrics, DrawUi, FrameClock};
use crate::input::InputState;
use crate::keymap::KeyMap;

/// Body text size in points at scale factor 1.0.
pub const BASE_FONT_SIZE: f32 = 13.0;

/// Font bytes compiled into the embedding binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontResource {
    /// Name the font is registered under.
    pub name: &'static str,
    /// TrueType / OpenType data.
    pub data: &'static [u8],
}

/// Construction options for a [`UiContext`].
#[derive(Debug, Clone, PartialEq)]
pub struct UiContextConfig {
    /// Multiplier applied to every text size.
    pub scale_factor: f32,
    /// Primary font. `None` keeps egui's built-in fonts.
    pub font: Option<FontResource>,
}

impl Default for UiContextConfig {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            font: None,
        }
    }
}

impl UiContextConfig {
    /// Set the text scale factor.
    pub fn with_scale_factor(mut self, scale_factor: f32) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the primary font.
    pub fn with_font(mut self, font: FontResource) -> Self {
        self.font = Some(font);
        self
    }
}

/// egui context, input mirror, key map and frame clock of one widget.
pub struct UiContext {
    egui: egui::Context,
    input: InputState,
    key_map: KeyMap,
    clock: FrameClock,
}

impl UiContext {
    /// Create and configure a context.
    ///
    /// egui keeps nothing on disk unless a persistence layer asks it to, and
    /// Tab / arrow focus navigation is built in, so beyond the key map only
    /// fonts and text sizes need setting up. The new font atlas is built on
    /// the first frame.
    pub fn new(config: &UiContextConfig) -> Self {
        let egui = egui::Context::default();
        install_fonts(&egui, config);
        Self {
            egui,
            input: InputState::new(),
            key_map: KeyMap::glfw(),
            clock: FrameClock::default(),
        }
    }

    /// The egui context.
    pub fn egui(&self) -> &egui::Context {
        &self.egui
    }

    /// Mirrored input state.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Mutable input state.
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Key map built at construction.
    pub fn key_map(&self) -> &KeyMap {
        &self.key_map
    }

    /// Whether the UI claimed the pointer during the last frame.
    pub fn wants_pointer_capture(&self) -> bool {
        self.egui.wants_pointer_input()
    }

    /// Whether the UI claimed the keyboard during the last frame.
    pub fn wants_keyboard_capture(&self) -> bool {
        self.egui.wants_keyboard_input()
    }

    /// Build one frame from scratch: drain pending input, run `draw`
    /// between pass begin and end, and tessellate the result.
    pub fn build_frame(
        &mut self,
        metrics: &DisplayMetrics,
        now: Instant,
        draw: &mut dyn DrawUi,
    ) -> DrawData {
        let timing = self.clock.tick(now);

        let mut raw = RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, metrics.logical_size)),
            time: Some(timing.time),
            predicted_dt: timing.delta,
            ..RawInput::default()
        };
        raw.viewports
            .entry(ViewportId::ROOT)
            .or_default()
            .native_pixels_per_point = Some(metrics.pixels_per_point());
        self.input.take_frame_input(&mut raw);

        self.egui.begin_pass(raw);
        draw.draw_ui(&self.egui);
        let output = self.egui.end_pass();

        let primitives = self.egui.tessellate(output.shapes, output.pixels_per_point);
        DrawData {
            primitives,
            textures_delta: output.textures_delta,
            pixels_per_point: output.pixels_per_point,
            framebuffer_size: metrics.framebuffer_size,
        }
    }
}

fn install_fonts(ctx: &egui::Context, config: &UiContextConfig) {
    match config.font.filter(|font| !font.data.is_empty()) {
        Some(font) => {
            let mut fonts = FontDefinitions::default();
            fonts
                .font_data
                .insert(font.name.to_owned(), Arc::new(FontData::from_static(font.data)));
            // Primary face; egui's defaults stay behind it as glyph fallbacks.
            for family in [FontFamily::Proportional, FontFamily::Monospace] {
                fonts
                    .families
                    .entry(family)
                    .or_default()
                    .insert(0, font.name.to_owned());
            }
            ctx.set_fonts(fonts);
            tracing::debug!(font = font.name, "embedded font installed");
        }
        None => tracing::debug!("no embedded font; using egui default fonts"),
    }

    let body = BASE_FONT_SIZE * config.scale_factor;
    ctx.style_mut(|style| {
        for (text_style, font_id) in &mut style.text_styles {
            font_id.size = match text_style {
                TextStyle::Small => body * 0.75,
                TextStyle::Heading => body * 1.4,
                _ => body,
            };
        }
    });
}
