use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlImageElement, HtmlLinkElement};

/// Canvas-based WebP check: browsers that cannot encode WebP fall back to PNG
/// data URLs.
pub fn supports_webp() -> bool {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return false;
    };
    let Some(canvas) = document
        .create_element("canvas")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
    else {
        return false;
    };
    if !matches!(canvas.get_context("2d"), Ok(Some(_))) {
        return false;
    }
    canvas
        .to_data_url_with_type("image/webp")
        .map(|url| url.starts_with("data:image/webp"))
        .unwrap_or(false)
}

/// Adds `webp-supported` to `<body>` so stylesheets can pick WebP backgrounds.
pub fn mark_webp_support() {
    if !supports_webp() {
        return;
    }
    if let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    {
        let _ = body.class_list().add_1("webp-supported");
    }
}

pub fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false)
}

/// Warms the cache for `src` with both an image object and a preload hint so
/// the first slide does not flash empty.
pub fn preload_image(src: &str) {
    if src.is_empty() {
        return;
    }
    if let Ok(image) = HtmlImageElement::new() {
        image.set_src(src);
    }
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let link = document
        .create_element("link")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlLinkElement>().ok());
    if let (Some(link), Some(head)) = (link, document.head()) {
        link.set_rel("preload");
        link.set_as("image");
        link.set_href(src);
        if head.append_child(&link).is_err() {
            debug!("could not append preload hint for {}", src);
        }
    }
}
