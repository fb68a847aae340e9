//! Cross-window drag and drop demo: icon trays.

use crossdrop_app::{App, AppConfig};
use crossdrop_app::demos::IconsDemo;
use crossdrop_core::DragConfig;

fn main() {
    env_logger::init();
    log::info!("Starting crossdrop icon trays");

    let drag_config = match DragConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let app = App::with_config(IconsDemo::new(), drag_config, AppConfig::default());
    if let Err(e) = app.run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
