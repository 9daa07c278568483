use crate::core::app::App;
use crate::core::config::Config;

pub fn create_test_app() -> App {
    create_test_app_with(&Config::default())
}

pub fn create_test_app_with(config: &Config) -> App {
    App::new(config, reqwest::Client::new())
}

/// Config that keeps the pending capture alive after a manual stop.
pub fn non_cancelling_voice_config() -> Config {
    Config {
        voice_cancel_on_toggle: Some(false),
        ..Default::default()
    }
}
