//! Cross-window drag and drop demo: shared ToDo board with backlog.

use crossdrop_app::{App, AppConfig};
use crossdrop_app::demos::{TodoDemo, TodoLayout};
use crossdrop_core::DragConfig;

fn main() {
    env_logger::init();
    log::info!("Starting crossdrop shared ToDo board with backlog");

    let drag_config = match DragConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let app = App::with_config(TodoDemo::new(TodoLayout::SharedBoard), drag_config, AppConfig::default());
    if let Err(e) = app.run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
