use log::{info, warn};

mod config;
mod dom;
mod enhancer;
mod error;
mod features {
    pub mod backdrop;
    pub mod hero_offsets;
    pub mod lightbox;
    pub mod nav_highlight;
    pub mod nav_toggle;
    pub mod reveal;
    pub mod scroll_progress;
    pub mod side_images;
}

use config::EnhancerConfig;
use enhancer::PageEnhancer;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let loaded = EnhancerConfig::from_document(&document);
    let level = loaded
        .as_ref()
        .map(|config| config.log_level)
        .unwrap_or_else(|_| config::default_log_level());

    console_log::init_with_level(level).expect("error initializing log");

    let config = loaded.unwrap_or_else(|err| {
        warn!("Ignoring page enhancer configuration: {err}");
        EnhancerConfig::default()
    });

    info!("Starting page enhancer");
    enhancer::when_ready(&document, move || match PageEnhancer::new(config) {
        Ok(enhancer) => enhancer.run(),
        Err(err) => warn!("Page enhancer unavailable: {err}"),
    });
}
