//! Entry point for running the tape measure as a native window.

use eframe::egui;

use crate::camera::CameraSource;
use crate::config::TapeConfig;
use crate::data::hotkeys::Hotkeys;

use super::TapeMeasureApp;

/// Launch the tape measure in a native window.
///
/// 1. Resolves hotkeys (explicit config, then `~/.tapemeasure/hotkeys.yaml`,
///    then defaults).
/// 2. Builds a [`TapeMeasureApp`], which mounts the first camera of `camera`.
/// 3. Opens a native window and enters the eframe event loop.
///
/// Blocks until the window is closed.
pub fn run_tape_measure(
    camera: Box<dyn CameraSource>,
    mut cfg: TapeConfig,
) -> eframe::Result<()> {
    if cfg.hotkeys.is_none() {
        cfg.hotkeys = match Hotkeys::load_from_default_path() {
            Ok(hk) => hk,
            Err(e) => {
                tracing::warn!("ignoring hotkeys file: {e}");
                None
            }
        };
    }

    let title = cfg.settings.title.clone();
    let mut opts = cfg.native_options.take().unwrap_or_default();

    if opts.viewport.icon.is_none() {
        if let Some(icon) = load_app_icon_svg() {
            opts.viewport = opts.viewport.clone().with_icon(icon);
        }
    }
    if opts.viewport.inner_size.is_none() {
        opts.viewport = opts
            .viewport
            .clone()
            .with_inner_size(egui::vec2(560.0, 640.0));
    }

    let app = TapeMeasureApp::new(camera, cfg);
    eframe::run_native(
        &title,
        opts,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}

/// Render the bundled `icon.svg` into an [`egui::IconData`].
///
/// Returns `None` if the file is missing or cannot be parsed.
fn load_app_icon_svg() -> Option<egui::IconData> {
    let svg_path = concat!(env!("CARGO_MANIFEST_DIR"), "/icon.svg");
    let data = std::fs::read(svg_path).ok()?;

    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_data(&data, &opt).ok()?;
    let size = tree.size().to_int_size();
    if size.width() == 0 || size.height() == 0 {
        return None;
    }
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())?;
    let mut canvas = pixmap.as_mut();
    resvg::render(&tree, tiny_skia::Transform::default(), &mut canvas);
    Some(egui::IconData {
        rgba: pixmap.take(),
        width: size.width(),
        height: size.height(),
    })
}
