//! Per-tick frame parameters: display metrics, frame timing, the draw hook.

use std::time::Instant;

use egui::Vec2;

/// Content drawn into the UI once per render tick, between frame begin and
/// frame end.
pub trait DrawUi {
    /// Build this frame's UI.
    fn draw_ui(&mut self, ctx: &egui::Context);
}

impl<F> DrawUi for F
where
    F: FnMut(&egui::Context),
{
    fn draw_ui(&mut self, ctx: &egui::Context) {
        self(ctx);
    }
}

/// Display size and HiDPI ratio for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMetrics {
    /// Widget size in logical points.
    pub logical_size: Vec2,
    /// Framebuffer size in physical pixels.
    pub framebuffer_size: [u32; 2],
    /// Framebuffer pixels per logical point, per axis.
    pub scale: Vec2,
}

impl DisplayMetrics {
    /// Derive the per-axis scale from framebuffer and logical sizes. An axis
    /// with a zero (or otherwise unusable) logical size gets scale 1.0.
    pub fn new(framebuffer_size: [u32; 2], logical_size: Vec2) -> Self {
        let axis = |pixels: u32, points: f32| {
            let ratio = pixels as f32 / points;
            if ratio.is_finite() && ratio > 0.0 {
                ratio
            } else {
                1.0
            }
        };
        Self {
            logical_size,
            framebuffer_size,
            scale: Vec2::new(
                axis(framebuffer_size[0], logical_size.x),
                axis(framebuffer_size[1], logical_size.y),
            ),
        }
    }

    /// Uniform pixels-per-point handed to egui. egui only supports one
    /// ratio, so the horizontal one is used.
    pub fn pixels_per_point(&self) -> f32 {
        self.scale.x
    }
}

/// Wall-clock timing of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the clock started.
    pub time: f64,
    /// Seconds since the previous tick, clamped.
    pub delta: f32,
}

/// Measures time between render ticks.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Option<Instant>,
}

impl FrameClock {
    /// Delta reported for the first tick and for ticks with no measurable
    /// elapsed time.
    pub const DEFAULT_DELTA: f32 = 1.0 / 60.0;

    /// Longest delta reported; longer gaps (host stalls, hidden windows)
    /// are clamped so animations do not jump.
    pub const MAX_DELTA: f32 = 0.25;

    /// Start counting at `start`.
    pub fn new(start: Instant) -> Self {
        Self { start, last: None }
    }

    /// Record a tick at `now`.
    pub fn tick(&mut self, now: Instant) -> FrameTime {
        let delta = match self.last {
            None => Self::DEFAULT_DELTA,
            Some(last) => {
                let elapsed = now.saturating_duration_since(last).as_secs_f32();
                if elapsed > 0.0 {
                    elapsed.min(Self::MAX_DELTA)
                } else {
                    Self::DEFAULT_DELTA
                }
            }
        };
        self.last = Some(now);
        FrameTime {
            time: now.saturating_duration_since(self.start).as_secs_f64(),
            delta,
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}
