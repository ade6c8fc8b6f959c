mod api;
mod app;
mod components;
mod config;
mod dom;
mod error;
mod logging;
mod models;
mod pages;
mod request;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::bundled(), Some(e)),
    };

    logging::init(&config.log_level);
    if let Some(e) = config_error {
        tracing::warn!("{}; using bundled settings", e);
    }
    tracing::info!("Resume Intelligence starting, api base {}", config.api_base_url);

    leptos::mount::mount_to_body(move || view! { <App config=config /> });
}
