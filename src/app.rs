use egui::{Sense, Slider};
use log::warn;

use crate::config::EditorConfig;
use crate::export::SvgExporter;
use crate::input::InputHandler;
use crate::renderer::Renderer;
use crate::scene::{Scene, SharedScene};

/// Storage key of the persisted editor config
pub const CONFIG_KEY: &str = "eframe_hull_config";

pub struct HullApp {
    scene: SharedScene,
    config: EditorConfig,
    input: InputHandler,
    renderer: Renderer,
    export_path: String,
    status: Option<String>,
}

impl Default for HullApp {
    fn default() -> Self {
        Self::with_config(EditorConfig::default())
    }
}

impl HullApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = cc
            .storage
            .and_then(|storage| eframe::get_value::<EditorConfig>(storage, CONFIG_KEY))
            .map(EditorConfig::validated)
            .unwrap_or_default();
        Self::with_config(config)
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            scene: Scene::new(config.clone()).into_shared(),
            config,
            input: InputHandler::new(),
            renderer: Renderer::new(),
            export_path: "hulls.svg".to_owned(),
            status: None,
        }
    }

    pub fn scene(&self) -> &SharedScene {
        &self.scene
    }

    fn side_panel(&mut self, ui: &mut egui::Ui) {
        let mut scene = self.scene.lock();

        ui.heading("Hulls");
        let active = scene.active_hull();
        let mut activate = None;
        for hull in scene.hulls() {
            let label = format!("{} ({} circles)", hull.id(), hull.circle_count());
            if ui.selectable_label(active == Some(hull.id()), label).clicked() {
                activate = Some(hull.id());
            }
        }
        if let Some(id) = activate {
            if let Err(err) = scene.set_active_hull(id) {
                warn!("{}", err);
            }
        }
        if ui.button("New hull").clicked() {
            let id = scene.add_hull();
            if let Err(err) = scene.set_active_hull(id) {
                warn!("{}", err);
            }
        }
        ui.label(format!("Uncontained: {}", scene.uncontained().count()));

        ui.separator();
        ui.heading("Settings");
        let mut changed = false;
        changed |= ui
            .add(Slider::new(&mut self.config.arc_resolution, 4..=256).text("Arc resolution"))
            .changed();
        let (min, max) = (self.config.min_radius, self.config.max_radius);
        changed |= ui
            .add(Slider::new(&mut self.config.default_radius, min..=max).text("New circle radius"))
            .changed();
        if changed {
            scene.set_config(self.config.clone());
        }

        ui.separator();
        ui.heading("Export");
        ui.text_edit_singleline(&mut self.export_path);
        if ui.button("Export SVG").clicked() {
            self.status = Some(match SvgExporter::write_to(&scene, &self.export_path) {
                Ok(()) => format!("Saved {}", self.export_path),
                Err(err) => {
                    warn!("{}", err);
                    err.to_string()
                }
            });
        }
        if let Some(status) = &self.status {
            ui.label(status);
        }

        ui.separator();
        ui.small("Double-click: inner circle (Alt: outer)");
        ui.small("Shift-drag: resize, Delete: remove, N: new hull");
    }
}

impl eframe::App for HullApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, CONFIG_KEY, &self.config);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("hull_panel").show(ctx, |ui| self.side_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());

            let events = self.input.process_input(ctx, response.rect);
            let mut scene = self.scene.lock();
            for event in &events {
                scene.handle_event(event);
            }

            self.renderer.render(&painter, &scene);
        });
    }
}
