use photostack::config;
use photostack::gui::app::AppModel;
use photostack::gui::stack::State;
use photostack::sys::{runtime, status};
use relm4::prelude::*;

fn main() {
    env_logger::init();

    let config = config::load_or_setup();
    let state = State::from_config(&config);
    let status = status::shared(state.status());

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx, status.clone());

    let app = RelmApp::new("org.photostack.viewer");

    app.run::<AppModel>((state, status, rx));
}
