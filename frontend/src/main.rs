use gesty_landing::config;
use gesty_landing::error::InitError;
use log::{error, info, warn};

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Landing scripts loaded");
    match gesty_landing::start() {
        Ok(()) => {}
        Err(InitError::AlreadyInitialized) => warn!("Landing scripts already running on this page"),
        Err(e) => error!("Landing scripts not started: {}", e),
    }
}
