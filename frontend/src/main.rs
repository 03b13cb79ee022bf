use log::info;
use yew::prelude::*;

mod config;
mod contact {
    pub mod analytics;
    pub mod autosave;
    pub mod char_count;
    pub mod controller;
    pub mod draft;
    pub mod form;
    pub mod mailer;
    pub mod validation;
}
mod carousel {
    pub mod browser;
    pub mod controller;
    pub mod hero;
    pub mod slides;
    pub mod swipe;
}
mod components {
    pub mod effects;
    pub mod feedback;
    pub mod modal;
    pub mod nav;
}
mod pages {
    pub mod home;
    pub mod privacy;
}

use pages::home::Home;

#[function_component]
fn App() -> Html {
    html! {
        <Home />
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Component code logs through `log`, controllers through `tracing`
    console_log::init_with_level(config::log_level()).expect("error initializing log");
    tracing_wasm::set_as_global_default();

    carousel::browser::mark_webp_support();

    info!("Starting KEUB site");
    yew::Renderer::<App>::new().render();
}
