use anyhow::anyhow;
use eframe::egui;

use layrs::app::PainterApp;
use layrs::logging;
use layrs::settings::{Settings, SETTINGS_FILE};

fn main() -> anyhow::Result<()> {
    let settings_path = std::path::PathBuf::from(SETTINGS_FILE);
    let settings = Settings::load(&settings_path);
    logging::init(settings.debug_logging);

    let (width, height) = settings.window_size;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width, height])
            .with_min_inner_size([640.0, 480.0])
            .with_title("layrs"),
        ..Default::default()
    };

    eframe::run_native(
        "layrs",
        native_options,
        Box::new(move |_cc| Box::new(PainterApp::new(settings, settings_path))),
    )
    .map_err(|err| anyhow!("window loop failed: {err}"))
}
