use eframe::egui;
use statewise::app::StatewiseApp;
use statewise::config::AppConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::load().unwrap_or_else(|e| {
        log::error!("Failed to read configuration, using defaults: {e:#}");
        AppConfig::default()
    });
    log::info!("data folder: {}", config.data_dir.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Statewise – Education & Income by State",
        options,
        Box::new(|_cc| Ok(Box::new(StatewiseApp::new(config)))),
    )
}
