use log::Level;

// Contact form
pub const DRAFT_STORAGE_KEY: &str = "keub_form_draft";
pub const EMAILJS_SERVICE_ID: &str = "service_ddfnrxr";
pub const EMAILJS_TEMPLATE_ID: &str = "template_k28zsup";
/// Set at build time with `KEUB_EMAILJS_PUBLIC_KEY`; without it the form
/// reports delivery as unavailable.
pub const EMAILJS_PUBLIC_KEY: &str = match option_env!("KEUB_EMAILJS_PUBLIC_KEY") {
    Some(key) => key,
    None => "",
};
pub const CONTACT_EMAIL: &str = "Info@keubit.com";
pub const DRAFT_SAVE_DEBOUNCE_MS: u32 = 1_000;
pub const MIN_SUBMISSION_INTERVAL_MS: i64 = 5_000;
pub const ERROR_FOCUS_DELAY_MS: u32 = 10;
pub const MESSAGE_MAX_LENGTH: usize = 5_000;
pub const MAX_INPUT_LENGTH: usize = 10_000;

// Hero carousel
pub const AUTO_ROTATE_MS: u32 = 6_000;
pub const RESTART_AFTER_IDLE_MS: u32 = 6_000;
pub const INTERACTIONS_BEFORE_PAUSE: u32 = 3;
pub const SWIPE_THRESHOLD_PX: f64 = 40.0;

// Navigation
pub const NAVBAR_SCROLLED_AFTER_PX: f64 = 100.0;
pub const NAVBAR_FALLBACK_HEIGHT_PX: f64 = 80.0;

// Page effects
pub const REVEAL_SELECTOR: &str = ".product-feature, .experience-card, .benefit-item, .environment-item, .step, .why-keub-content p, .section-intro, .product-platform-description p, .operator-model, .vision-content, .traction-list li";
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const PARALLAX_RATE: f64 = 0.5;
pub const PARALLAX_FADE: f64 = 0.5;

#[cfg(debug_assertions)]
pub fn hero_config_url() -> &'static str {
    "/assets/images/hero/hero-images.json"  // trunk serve mounts the site at the root
}

#[cfg(not(debug_assertions))]
pub fn hero_config_url() -> &'static str {
    "assets/images/hero/hero-images.json"
}

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
