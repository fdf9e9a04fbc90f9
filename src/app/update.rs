//! Per-frame logic for [`TapeMeasureApp`].

use eframe::egui;
use egui::{Color32, Rect};

use crate::controller::ControllerOutput;
use crate::data::hotkeys::format_button_tooltip;
use crate::overlay::{overlay_shapes, paint_shapes, OverlayGeometry};

use super::TapeMeasureApp;

/// Largest on-screen size of the preview, in points.
const MAX_PREVIEW_WIDTH: f32 = 512.0;
const PREVIEW_HEIGHT: f32 = 384.0;

impl TapeMeasureApp {
    /// Upload the newest camera frame into the preview texture.
    pub(crate) fn refresh_preview(&mut self, ctx: &egui::Context) {
        let Some(frame) = self.camera.poll_frame() else {
            if self.camera.last_error().is_some() && self.status.is_none() {
                self.status = self
                    .camera
                    .last_error()
                    .map(|e| format!("Camera unavailable: {e}"));
            }
            return;
        };
        let size = [frame.width() as usize, frame.height() as usize];
        let image = egui::ColorImage::from_rgba_unmultiplied(size, frame.as_raw());
        if let Some(tex) = self.preview.as_mut() {
            tex.set(image, egui::TextureOptions::LINEAR);
        } else {
            self.preview =
                Some(ctx.load_texture("camera_preview", image, egui::TextureOptions::LINEAR));
        }
    }

    /// Camera preview plus the clickable overlay surface.
    pub(crate) fn render_surface(&mut self, ui: &mut egui::Ui) {
        let width = ui.available_width().min(MAX_PREVIEW_WIDTH);
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(width, PREVIEW_HEIGHT), egui::Sense::click());
        let painter = ui.painter_at(rect);

        match &self.preview {
            Some(tex) if self.camera.is_streaming() => {
                let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                painter.image(tex.id(), rect, uv, Color32::WHITE);
            }
            _ => {
                painter.rect_filled(rect, 8.0, Color32::from_gray(30));
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "No camera",
                    egui::FontId::proportional(16.0),
                    Color32::GRAY,
                );
            }
        }

        let [sw, sh] = self.settings.surface_size;
        let geom = OverlayGeometry::new(rect, egui::vec2(sw, sh));

        if response.clicked() {
            if let Some(local) = response
                .interact_pointer_pos()
                .and_then(|pos| geom.to_local(pos))
            {
                if let ControllerOutput::Measured(_) = self.controller.capture(local) {
                    self.measured_at = Some(chrono::Local::now());
                }
            }
        }

        let shapes = overlay_shapes(
            self.controller.pending_point(),
            self.controller.last_points(),
        );
        paint_shapes(&painter, &geom, &shapes);
    }

    /// Result line, usage hint, buttons and camera selector.
    pub(crate) fn render_controls(&mut self, ui: &mut egui::Ui) {
        if let Some(result) = self.controller.last_result() {
            let mut text = format!("Distance: {}", result);
            if let Some(at) = self.measured_at {
                text.push_str(&format!("  ({})", at.format("%H:%M:%S")));
            }
            ui.label(egui::RichText::new(text).size(18.0).strong());
        }
        ui.label(egui::RichText::new(self.controller.prompt()).weak());
        ui.add_space(8.0);

        let start_label = format!("{} Start Measurement", egui_phosphor::regular::RULER);
        let start_tip =
            format_button_tooltip("Start a new measurement", self.hotkeys.start_measurement.as_ref());
        if ui.button(start_label).on_hover_text(start_tip).clicked() {
            self.start_measurement();
        }

        let mut switch_to: Option<String> = None;
        let selected = self
            .camera
            .current_device_id()
            .and_then(|id| self.camera.devices().iter().find(|d| d.id == id))
            .map(|d| d.display_label())
            .unwrap_or_else(|| "No camera".to_string());
        egui::ComboBox::from_id_salt("camera_select")
            .selected_text(format!("{} {}", egui_phosphor::regular::CAMERA, selected))
            .show_ui(ui, |ui| {
                let current = self.camera.current_device_id();
                for dev in self.camera.devices() {
                    let is_current = current == Some(dev.id.as_str());
                    if ui
                        .selectable_label(is_current, dev.display_label())
                        .clicked()
                        && !is_current
                    {
                        switch_to = Some(dev.id.clone());
                    }
                }
            });
        if let Some(id) = switch_to {
            self.switch_camera(&id);
        }

        let save_tip =
            format_button_tooltip("Save settings to a file", self.hotkeys.save_settings.as_ref());
        if ui
            .button(format!("{} Save Settings", egui_phosphor::regular::FLOPPY_DISK))
            .on_hover_text(save_tip)
            .clicked()
        {
            self.save_settings_dialog();
        }

        ui.add_space(6.0);
        ui.label(
            egui::RichText::new(format!(
                "Scale: {:.2} px/in",
                self.controller.calculator().scale().effective_pixels_per_inch()
            ))
            .small(),
        );
        if let Some(status) = &self.status {
            ui.colored_label(Color32::LIGHT_RED, status.as_str());
        }
    }
}
