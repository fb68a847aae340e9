//! Cross-window drag and drop demo: ToDo boards, one window per assignee.

use crossdrop_app::{App, AppConfig};
use crossdrop_app::demos::{TodoDemo, TodoLayout};
use crossdrop_core::DragConfig;

fn main() {
    env_logger::init();
    log::info!("Starting crossdrop ToDo boards, one window per assignee");

    let drag_config = match DragConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let app = App::with_config(TodoDemo::new(TodoLayout::PerAssignee), drag_config, AppConfig::default());
    if let Err(e) = app.run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
