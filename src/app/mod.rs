//! The eframe application.
//!
//! | Sub-module  | Responsibility |
//! | ----------- | -------------- |
//! | [`update`]  | Per-frame camera polling, overlay input and rendering |
//! | [`run`]     | [`run_tape_measure()`] entry point and icon loading |

mod run;
mod update;

pub use run::run_tape_measure;

use eframe::egui;

use crate::camera::{CameraManager, CameraSource};
use crate::config::{Settings, TapeConfig};
use crate::controller::InteractionController;
use crate::data::hotkeys::{detect_hotkey_actions, HotkeyName, Hotkeys};

/// Camera preview with a tap-to-measure overlay.
///
/// Owns all UI state explicitly: the [`InteractionController`] for the
/// measurement session and a [`CameraManager`] for the preview. A camera that
/// fails to open only produces a status line; measuring keeps working on a
/// blank surface.
pub struct TapeMeasureApp {
    pub(crate) controller: InteractionController,
    pub(crate) camera: CameraManager,
    pub(crate) settings: Settings,
    pub(crate) hotkeys: Hotkeys,
    pub(crate) preview: Option<egui::TextureHandle>,
    pub(crate) measured_at: Option<chrono::DateTime<chrono::Local>>,
    pub(crate) status: Option<String>,
}

impl TapeMeasureApp {
    pub fn new(source: Box<dyn CameraSource>, cfg: TapeConfig) -> Self {
        let mut controller = cfg.settings.measure.build_controller();
        controller.set_event_controller(cfg.event_ctrl.clone());

        let mut camera = CameraManager::new(source);
        camera.set_event_controller(cfg.event_ctrl.clone());
        let status = camera
            .mount()
            .err()
            .map(|e| format!("Camera unavailable: {e}"));

        Self {
            controller,
            camera,
            settings: cfg.settings,
            hotkeys: cfg.hotkeys.unwrap_or_default(),
            preview: None,
            measured_at: None,
            status,
        }
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub(crate) fn start_measurement(&mut self) {
        self.controller.start();
        self.measured_at = None;
    }

    pub(crate) fn next_camera(&mut self) {
        self.status = self
            .camera
            .next_device()
            .err()
            .map(|e| format!("Camera unavailable: {e}"));
    }

    pub(crate) fn switch_camera(&mut self, device_id: &str) {
        self.status = self
            .camera
            .switch_to(device_id)
            .err()
            .map(|e| format!("Camera unavailable: {e}"));
    }

    pub(crate) fn save_settings_dialog(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("YAML", &["yaml", "yml"])
            .add_filter("JSON", &["json"])
            .set_file_name("tapemeasure.yaml")
            .save_file()
        else {
            return;
        };
        match self.settings.save(&path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "saved settings");
                self.status = Some(format!("Saved settings to {}", path.display()));
                if let Err(e) = self.hotkeys.save_to_default_path() {
                    tracing::warn!("failed to save hotkeys: {e}");
                }
            }
            Err(e) => {
                tracing::error!("failed to save settings: {e}");
                self.status = Some(format!("Failed to save settings: {e}"));
            }
        }
    }

    fn handle_hotkeys(&mut self, ctx: &egui::Context) {
        for act in detect_hotkey_actions(&self.hotkeys, ctx) {
            match act {
                HotkeyName::StartMeasurement => self.start_measurement(),
                HotkeyName::NextCamera => self.next_camera(),
                HotkeyName::SaveSettings => self.save_settings_dialog(),
            }
        }
    }
}

impl eframe::App for TapeMeasureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_hotkeys(ctx);
        self.refresh_preview(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                self.render_surface(ui);
                ui.add_space(12.0);
                self.render_controls(ui);
            });
        });

        if self.camera.is_streaming() {
            ctx.request_repaint();
        }
    }
}
