//! GPU backend seam: the renderer that turns draw data into pixels.
//!
//! A backend owns GPU-side resources (shaders, buffers, textures) that only
//! exist while the host's graphics context is alive.
//! [`BackendBinding`](crate::BackendBinding) decides when [`GpuBackend::init`] and
//! [`GpuBackend::shutdown`] run; implementations only do the work.

use egui::epaint::ImageDelta;
use egui::{ClippedPrimitive, TextureId, TexturesDelta};
use thiserror::Error;

/// One frame's output, ready for rasterization.
#[derive(Debug, Clone, Default)]
pub struct DrawData {
    /// Tessellated meshes with their clip rectangles.
    pub primitives: Vec<ClippedPrimitive>,
    /// Texture uploads and frees to apply before painting.
    pub textures_delta: TexturesDelta,
    /// Physical pixels per logical point.
    pub pixels_per_point: f32,
    /// Target size in physical pixels.
    pub framebuffer_size: [u32; 2],
}

impl DrawData {
    /// Whether the frame has nothing to paint and no texture changes.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty() && self.textures_delta.is_empty()
    }
}

/// Errors raised while bringing a backend up.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The renderer could not create its GPU resources.
    #[error("GPU backend initialization failed: {reason}")]
    Init {
        /// Renderer-provided description.
        reason: String,
    },

    /// No graphics context is available to initialize against.
    #[error("no graphics context available")]
    NoContext,
}

impl BackendError {
    /// Create an initialization error.
    pub fn init(reason: impl Into<String>) -> Self {
        BackendError::Init {
            reason: reason.into(),
        }
    }
}

/// Renderer bound to a host graphics context.
pub trait GpuBackend {
    /// Create GPU resources. Called with the graphics context current.
    fn init(&mut self) -> Result<(), BackendError>;

    /// Release every GPU resource created by [`init`](Self::init).
    fn shutdown(&mut self);

    /// Per-frame preparation before the UI frame is built.
    fn new_frame(&mut self) {}

    /// Apply texture changes and paint `draw_data`.
    fn render_draw_data(&mut self, draw_data: &DrawData);
}

impl<B: GpuBackend + ?Sized> GpuBackend for Box<B> {
    fn init(&mut self) -> Result<(), BackendError> {
        (**self).init()
    }

    fn shutdown(&mut self) {
        (**self).shutdown();
    }

    fn new_frame(&mut self) {
        (**self).new_frame();
    }

    fn render_draw_data(&mut self, draw_data: &DrawData) {
        (**self).render_draw_data(draw_data);
    }
}

/// Record of every live texture's uploads, replayed after a re-init.
///
/// egui only sends a texture once plus later patches. When the graphics
/// context is destroyed and re-created the backend starts empty, so it
/// must upload the last whole image and every patch since, in order.
#[derive(Clone, Default)]
pub struct TextureLedger {
    textures: Vec<(TextureId, Vec<ImageDelta>)>,
}

// ImageDelta has no Debug impl; list each texture with its pending upload count.
impl std::fmt::Debug for TextureLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.textures.iter().map(|(id, images)| (id, images.len())))
            .finish()
    }
}

impl TextureLedger {
    /// Empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track the uploads and frees of one frame.
    pub fn record(&mut self, delta: &TexturesDelta) {
        for (id, image) in &delta.set {
            let index = match self.textures.iter().position(|(t, _)| t == id) {
                Some(i) => i,
                None => {
                    self.textures.push((*id, Vec::new()));
                    self.textures.len() - 1
                }
            };
            let slot = &mut self.textures[index].1;
            if image.is_whole() {
                slot.clear();
            }
            slot.push(image.clone());
        }
        self.textures.retain(|(id, _)| !delta.free.contains(id));
    }

    /// Everything needed to rebuild the live textures, oldest first.
    pub fn replay(&self) -> TexturesDelta {
        let mut delta = TexturesDelta::default();
        for (id, images) in &self.textures {
            delta
                .set
                .extend(images.iter().map(|image| (*id, image.clone())));
        }
        delta
    }

    /// Number of live textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Whether no texture is live.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Forget every texture.
    pub fn clear(&mut self) {
        self.textures.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, ColorImage, TextureOptions};

    fn whole(color: Color32) -> ImageDelta {
        ImageDelta::full(ColorImage::new([2, 2], color), TextureOptions::LINEAR)
    }

    fn patch(color: Color32) -> ImageDelta {
        ImageDelta::partial([1, 1], ColorImage::new([1, 1], color), TextureOptions::LINEAR)
    }

    fn set(entries: Vec<(TextureId, ImageDelta)>) -> TexturesDelta {
        TexturesDelta {
            set: entries,
            free: Vec::new(),
        }
    }

    #[test]
    fn patches_accumulate_on_top_of_whole_image() {
        let id = TextureId::Managed(0);
        let mut ledger = TextureLedger::new();
        ledger.record(&set(vec![(id, whole(Color32::RED))]));
        ledger.record(&set(vec![(id, patch(Color32::GREEN))]));
        ledger.record(&set(vec![(id, patch(Color32::BLUE))]));

        let replay = ledger.replay();
        assert_eq!(replay.set.len(), 3);
        assert!(replay.set[0].1.is_whole());
        assert!(!replay.set[1].1.is_whole());
        assert!(!replay.set[2].1.is_whole());
    }

    #[test]
    fn whole_image_supersedes_history() {
        let id = TextureId::Managed(0);
        let mut ledger = TextureLedger::new();
        ledger.record(&set(vec![(id, whole(Color32::RED))]));
        ledger.record(&set(vec![(id, patch(Color32::GREEN))]));
        ledger.record(&set(vec![(id, whole(Color32::BLUE))]));

        let replay = ledger.replay();
        assert_eq!(replay.set.len(), 1);
        assert!(replay.set[0].1.is_whole());
    }

    #[test]
    fn freed_textures_are_dropped() {
        let a = TextureId::Managed(0);
        let b = TextureId::Managed(1);
        let mut ledger = TextureLedger::new();
        ledger.record(&set(vec![(a, whole(Color32::RED)), (b, whole(Color32::RED))]));
        ledger.record(&TexturesDelta {
            set: Vec::new(),
            free: vec![a],
        });

        assert_eq!(ledger.len(), 1);
        let replay = ledger.replay();
        assert_eq!(replay.set.len(), 1);
        assert_eq!(replay.set[0].0, b);
    }

    #[test]
    fn debug_lists_upload_counts_per_texture() {
        let id = TextureId::Managed(0);
        let mut ledger = TextureLedger::new();
        assert_eq!(format!("{ledger:?}"), "{}");

        ledger.record(&set(vec![(id, whole(Color32::RED))]));
        ledger.record(&set(vec![(id, patch(Color32::GREEN))]));
        assert_eq!(format!("{ledger:?}"), "{Managed(0): 2}");
    }

    #[test]
    fn empty_draw_data_reports_empty() {
        assert!(DrawData::default().is_empty());
    }

    #[test]
    fn init_error_display() {
        let err = BackendError::init("no shaders");
        assert_eq!(err.to_string(), "GPU backend initialization failed: no shaders");
    }
}
