//! Standalone window showing the bridge with a few widgets.
//!
//! Run with `cargo run -p rackui-glow --example standalone`.
//! Set `RUST_LOG=rackui_core=debug` to watch lifecycle transitions.

use rackui_core::UiContextConfig;
use rackui_core::egui;
use rackui_glow::{WindowOptions, open_blocking};
use tracing_subscriber::EnvFilter;

struct Panel {
    tension: f32,
    opacity: f32,
    label: String,
}

impl rackui_core::DrawUi for Panel {
    fn draw_ui(&mut self, ctx: &egui::Context) {
        egui::Window::new("Cables").show(ctx, |ui| {
            ui.add(egui::Slider::new(&mut self.tension, 0.0..=1.0).text("tension"));
            ui.add(egui::Slider::new(&mut self.opacity, 0.0..=1.0).text("opacity"));
            ui.horizontal(|ui| {
                ui.label("Label");
                ui.text_edit_singleline(&mut self.label);
            });
        });
    }
}

fn main() {
    // Initialize tracing subscriber; bridge log:: calls from egui and egui_glow
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    tracing_log::LogTracer::init().ok();

    tracing::info!("starting rackui standalone window");

    let panel = Panel {
        tension: 0.5,
        opacity: 0.5,
        label: String::from("VCO 1"),
    };

    open_blocking(
        WindowOptions {
            title: "rackui standalone".to_owned(),
            ..WindowOptions::default()
        },
        UiContextConfig::default(),
        panel,
    );
}
