//! Shared test backend that records every call it receives.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use rackui_core::egui::TextureId;
use rackui_core::{BackendError, DrawData, GpuBackend};

/// One `render_draw_data` call.
#[derive(Debug, Clone)]
pub struct RenderedFrame {
    pub primitives: usize,
    /// `(texture, is_whole_image)` for every upload in the frame.
    pub uploads: Vec<(TextureId, bool)>,
    pub pixels_per_point: f32,
    pub framebuffer_size: [u32; 2],
}

#[derive(Debug, Default)]
pub struct BackendLog {
    pub init: usize,
    pub shutdown: usize,
    pub new_frame: usize,
    pub frames: Vec<RenderedFrame>,
}

/// Backend that only counts. `fail_init` makes every init fail.
pub struct RecordingBackend {
    pub log: Rc<RefCell<BackendLog>>,
    pub fail_init: bool,
}

impl RecordingBackend {
    pub fn new() -> (Self, Rc<RefCell<BackendLog>>) {
        let log = Rc::new(RefCell::new(BackendLog::default()));
        (
            Self {
                log: Rc::clone(&log),
                fail_init: false,
            },
            log,
        )
    }

    pub fn failing() -> (Self, Rc<RefCell<BackendLog>>) {
        let (mut backend, log) = Self::new();
        backend.fail_init = true;
        (backend, log)
    }
}

impl GpuBackend for RecordingBackend {
    fn init(&mut self) -> Result<(), BackendError> {
        self.log.borrow_mut().init += 1;
        if self.fail_init {
            Err(BackendError::init("test backend refuses to start"))
        } else {
            Ok(())
        }
    }

    fn shutdown(&mut self) {
        self.log.borrow_mut().shutdown += 1;
    }

    fn new_frame(&mut self) {
        self.log.borrow_mut().new_frame += 1;
    }

    fn render_draw_data(&mut self, draw_data: &DrawData) {
        self.log.borrow_mut().frames.push(RenderedFrame {
            primitives: draw_data.primitives.len(),
            uploads: draw_data
                .textures_delta
                .set
                .iter()
                .map(|(id, image)| (*id, image.is_whole()))
                .collect(),
            pixels_per_point: draw_data.pixels_per_point,
            framebuffer_size: draw_data.framebuffer_size,
        });
    }
}
