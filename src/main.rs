mod app;

use app::MeetingClockApp;
use eframe::egui;

fn main() -> Result<(), eframe::Error> {
    // --- Load .env file first so RUST_LOG and APP_* overrides apply ---
    let dotenv = dotenvy::dotenv();

    env_logger::init();

    match dotenv {
        Ok(path) => log::info!("Loaded .env file from: {:?}", path),
        Err(_) => log::info!("Note: .env file not found. Relying on config files and environment variables."),
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 480.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default() // Use eframe defaults
    };

    log::info!("Starting egui application...");

    eframe::run_native(
        "Meeting Clock",
        options,
        Box::new(|cc| Ok(Box::new(MeetingClockApp::new(cc)))),
    )
}
