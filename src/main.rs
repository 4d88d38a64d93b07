#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use stock_search::{Cli, SearchController, build_service, run_app};

use stock_search::config::APP_STATE_PATH;
use stock_search::ui::UI_TEXT;

fn main() -> eframe::Result {
    use clap::Parser;
    use eframe::NativeOptions;
    use std::path::PathBuf;
    use tokio::runtime::Runtime;

    // A. Init Logging
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {:?}", panic_info);
    }));
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Runtime for fetches. Must outlive the window.
    let rt = Runtime::new().expect("Failed to create Tokio runtime");

    let service = match build_service(&args) {
        Ok(service) => service,
        Err(e) => {
            log::error!("Could not set up data source: {:#}", e);
            std::process::exit(1);
        }
    };
    let controller =
        SearchController::new(service, rt.handle().clone()).with_timeout(args.search_timeout());

    // D. Run Native App
    let options = NativeOptions {
        persistence_path: Some(PathBuf::from(APP_STATE_PATH)),
        ..Default::default()
    };

    let initial_identifier = args.identifier.clone();
    eframe::run_native(
        UI_TEXT.window_title,
        options,
        Box::new(move |cc| Ok(run_app(cc, controller, initial_identifier))),
    )
}
