//! [`GpuBackend`] over `egui_glow::Painter`.

use std::sync::Arc;

use rackui_core::{BackendError, DrawData, GpuBackend};

/// OpenGL renderer for one widget.
///
/// Holds the GL function table for the window's context. The painter (shader
/// program, vertex buffers, textures) exists only between `init` and
/// `shutdown`.
pub struct GlowBackend {
    gl: Option<Arc<glow::Context>>,
    painter: Option<egui_glow::Painter>,
}

impl GlowBackend {
    /// Renderer for an already loaded GL context.
    pub fn new(gl: Arc<glow::Context>) -> Self {
        Self {
            gl: Some(gl),
            painter: None,
        }
    }

    /// Renderer for a window that came up without a GL context.
    /// Every `init` fails with [`BackendError::NoContext`].
    pub fn without_context() -> Self {
        Self {
            gl: None,
            painter: None,
        }
    }

    /// The GL function table, if any.
    pub fn gl(&self) -> Option<&Arc<glow::Context>> {
        self.gl.as_ref()
    }

    /// Whether GPU resources are currently allocated.
    pub fn has_painter(&self) -> bool {
        self.painter.is_some()
    }
}

impl GpuBackend for GlowBackend {
    fn init(&mut self) -> Result<(), BackendError> {
        let gl = self.gl.as_ref().ok_or(BackendError::NoContext)?;
        let painter = egui_glow::Painter::new(Arc::clone(gl), "", None, false)
            .map_err(|e| BackendError::init(e.to_string()))?;
        tracing::debug!(
            max_texture_side = painter.max_texture_side(),
            "egui_glow painter created"
        );
        self.painter = Some(painter);
        Ok(())
    }

    fn shutdown(&mut self) {
        if let Some(mut painter) = self.painter.take() {
            painter.destroy();
        }
    }

    fn render_draw_data(&mut self, draw_data: &DrawData) {
        let Some(painter) = self.painter.as_mut() else {
            return;
        };
        painter.paint_and_update_textures(
            draw_data.framebuffer_size,
            draw_data.pixels_per_point,
            &draw_data.primitives,
            &draw_data.textures_delta,
        );
    }
}
