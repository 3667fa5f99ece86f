mod app;
mod charts;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::Co2LensApp;
use clap::Parser;
use config::Config;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();
    let config = Config::parse();
    log::info!("Starting with data {:?}, palette {:?}", config.data, config.palette);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "CO2 Lens – Vehicle Emissions Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(Co2LensApp::new(&config)))),
    )
}
