//! Backend binding driven through the widget: create/destroy notifications,
//! lazy binding on the render path, forced teardown on drop, and texture
//! re-upload after a graphics-context re-creation.

mod common;

use common::RecordingBackend;
use rackui_core::egui::{self, TextureId};
use rackui_core::{BindingState, Transition, UiContextConfig, UiWidget};

fn label_panel(ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.label("cable tension");
    });
}

const FB: [u32; 2] = [200, 100];
const LOGICAL: egui::Vec2 = egui::vec2(100.0, 50.0);

#[test]
fn construction_leaves_backend_unbound() {
    let (backend, log) = RecordingBackend::new();
    let widget = UiWidget::new(backend, label_panel, &UiContextConfig::default());
    assert_eq!(widget.binding().state(), BindingState::Unbound);
    assert_eq!(log.borrow().init, 0);
}

#[test]
fn duplicate_create_does_not_reinitialize() {
    let (backend, log) = RecordingBackend::new();
    let mut widget = UiWidget::new(backend, label_panel, &UiContextConfig::default());

    assert_eq!(widget.on_context_create(), Transition::Changed);
    assert_eq!(widget.on_context_create(), Transition::Unchanged);
    assert_eq!(log.borrow().init, 1);
    assert!(widget.binding().is_bound());
}

#[test]
fn destroy_twice_shuts_down_once() {
    let (backend, log) = RecordingBackend::new();
    let mut widget = UiWidget::new(backend, label_panel, &UiContextConfig::default());

    widget.on_context_create();
    assert_eq!(widget.on_context_destroy(), Transition::Changed);
    assert_eq!(widget.on_context_destroy(), Transition::Unchanged);
    assert_eq!(log.borrow().shutdown, 1);
    assert!(!widget.binding().is_bound());
}

#[test]
fn render_without_create_binds_lazily() {
    let (backend, log) = RecordingBackend::new();
    let mut widget = UiWidget::new(backend, label_panel, &UiContextConfig::default());

    let summary = widget.draw_framebuffer(FB, LOGICAL);
    assert!(summary.rasterized);
    assert!(widget.binding().is_bound());

    widget.draw_framebuffer(FB, LOGICAL);
    let log = log.borrow();
    assert_eq!(log.init, 1);
    assert_eq!(log.new_frame, 2);
    assert_eq!(log.frames.len(), 2);
}

#[test]
fn drop_while_bound_forces_single_shutdown() {
    let (backend, log) = RecordingBackend::new();
    let mut widget = UiWidget::new(backend, label_panel, &UiContextConfig::default());
    widget.on_context_create();
    widget.draw_framebuffer(FB, LOGICAL);

    drop(widget);
    assert_eq!(log.borrow().shutdown, 1);
}

#[test]
fn drop_after_destroy_does_not_shut_down_again() {
    let (backend, log) = RecordingBackend::new();
    let mut widget = UiWidget::new(backend, label_panel, &UiContextConfig::default());
    widget.on_context_create();
    widget.on_context_destroy();

    drop(widget);
    assert_eq!(log.borrow().shutdown, 1);
}

#[test]
fn drop_never_bound_does_not_shut_down() {
    let (backend, log) = RecordingBackend::new();
    let widget = UiWidget::new(backend, label_panel, &UiContextConfig::default());
    drop(widget);
    assert_eq!(log.borrow().shutdown, 0);
}

#[test]
fn textures_are_uploaded_again_after_context_recreation() {
    let (backend, log) = RecordingBackend::new();
    let mut widget = UiWidget::new(backend, label_panel, &UiContextConfig::default());

    widget.on_context_create();
    widget.draw_framebuffer(FB, LOGICAL);
    widget.draw_framebuffer(FB, LOGICAL);
    {
        let log = log.borrow();
        let font = TextureId::default();
        assert!(log.frames[0].uploads.contains(&(font, true)));
        assert!(
            !log.frames[1].uploads.contains(&(font, true)),
            "steady state must not re-send the whole atlas"
        );
    }

    widget.on_context_destroy();
    widget.on_context_create();
    widget.draw_framebuffer(FB, LOGICAL);

    let log = log.borrow();
    let replayed = &log.frames[2].uploads;
    assert_eq!(replayed.first(), Some(&(TextureId::default(), true)));
}

#[test]
fn lazy_bind_after_destroy_also_replays_textures() {
    let (backend, log) = RecordingBackend::new();
    let mut widget = UiWidget::new(backend, label_panel, &UiContextConfig::default());

    widget.draw_framebuffer(FB, LOGICAL);
    widget.on_context_destroy();
    widget.draw_framebuffer(FB, LOGICAL);

    let log = log.borrow();
    assert_eq!(log.init, 2);
    assert_eq!(log.frames.len(), 2);
    assert_eq!(log.frames[1].uploads.first(), Some(&(TextureId::default(), true)));
}

#[test]
fn failed_init_still_builds_frame() {
    let (backend, log) = RecordingBackend::failing();
    let mut widget = UiWidget::new(backend, label_panel, &UiContextConfig::default());

    assert_eq!(widget.on_context_create(), Transition::Failed);
    let summary = widget.draw_framebuffer(FB, LOGICAL);
    assert!(!summary.rasterized);
    assert!(summary.primitives > 0, "frame is still built");

    let log = log.borrow();
    assert_eq!(log.init, 2);
    assert!(log.frames.is_empty());
    assert_eq!(log.new_frame, 0);
}

#[test]
fn rendering_is_attempted_even_for_empty_ui() {
    let (backend, log) = RecordingBackend::new();
    let mut widget = UiWidget::new(backend, |_: &egui::Context| {}, &UiContextConfig::default());
    widget.on_context_create();

    for _ in 0..3 {
        let summary = widget.draw_framebuffer(FB, LOGICAL);
        assert!(summary.rasterized);
    }
    assert_eq!(log.borrow().frames.len(), 3);
}

#[test]
fn hidpi_frame_reports_scale_and_pixel_size() {
    let (backend, log) = RecordingBackend::new();
    let mut widget = UiWidget::new(backend, label_panel, &UiContextConfig::default());
    widget.on_context_create();

    let summary = widget.draw_framebuffer(FB, LOGICAL);
    assert_eq!(summary.metrics.scale, egui::vec2(2.0, 2.0));

    let log = log.borrow();
    assert_eq!(log.frames[0].pixels_per_point, 2.0);
    assert_eq!(log.frames[0].framebuffer_size, FB);
}
