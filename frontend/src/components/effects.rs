use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

use crate::config;

/// Inline style of a reveal-on-scroll element before and after it enters
/// the viewport.
pub fn reveal_style(visible: bool) -> [(&'static str, &'static str); 2] {
    if visible {
        [("opacity", "1"), ("transform", "translateY(0)")]
    } else {
        [("opacity", "0"), ("transform", "translateY(30px)")]
    }
}

fn apply_reveal(element: &HtmlElement, visible: bool) {
    let style = element.style();
    for (property, value) in reveal_style(visible) {
        let _ = style.set_property(property, value);
    }
}

/// Where the hero foreground sits for a given scroll position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxFrame {
    pub translate_y: f64,
    pub opacity: f64,
}

/// `None` once the hero has scrolled fully out of view; the last frame is
/// left in place.
pub fn parallax_frame(scrolled: f64, viewport_height: f64) -> Option<ParallaxFrame> {
    if viewport_height <= 0.0 || scrolled >= viewport_height {
        return None;
    }
    Some(ParallaxFrame {
        translate_y: scrolled * config::PARALLAX_RATE,
        opacity: 1.0 - (scrolled / viewport_height) * config::PARALLAX_FADE,
    })
}

/// Coalesces scroll events into at most one pending animation frame.
#[derive(Debug, Default)]
pub struct FrameThrottle {
    pending: bool,
}

impl FrameThrottle {
    /// Whether the caller should schedule a frame now.
    pub fn request(&mut self) -> bool {
        !std::mem::replace(&mut self.pending, true)
    }

    pub fn frame_done(&mut self) {
        self.pending = false;
    }
}

type EntriesCallback = Closure<dyn FnMut(js_sys::Array)>;

fn observe_reveals(selector: &str) -> Option<(IntersectionObserver, EntriesCallback)> {
    let document = web_sys::window()?.document()?;
    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array| {
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            if !entry.is_intersecting() {
                continue;
            }
            if let Ok(element) = entry.target().dyn_into::<HtmlElement>() {
                apply_reveal(&element, true);
            }
        }
    }) as Box<dyn FnMut(js_sys::Array)>);

    let mut options = IntersectionObserverInit::new();
    options
        .threshold(&JsValue::from_f64(config::REVEAL_THRESHOLD))
        .root_margin(config::REVEAL_ROOT_MARGIN);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options).ok()?;

    let nodes = document.query_selector_all(selector).ok()?;
    for i in 0..nodes.length() {
        let Some(element) = nodes.get(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        apply_reveal(&element, false);
        let _ = element
            .style()
            .set_property("transition", "opacity 0.6s ease, transform 0.6s ease");
        observer.observe(&element);
    }
    debug!("observing {} elements for reveal", nodes.length());
    Some((observer, callback))
}

/// Fades and slides matching elements in as they scroll into view.
#[hook]
pub fn use_reveal_on_scroll(selector: &'static str) {
    use_effect_with_deps(
        move |selector| {
            let observed = observe_reveals(selector);
            move || {
                if let Some((observer, _callback)) = observed {
                    observer.disconnect();
                }
            }
        },
        selector,
    );
}

/// Moves `content` down at half the scroll speed and fades it while the hero
/// is on screen, at most once per animation frame.
#[hook]
pub fn use_hero_parallax(content: NodeRef) {
    use_effect_with_deps(
        move |content: &NodeRef| {
            let window = web_sys::window();
            let throttle = Rc::new(RefCell::new(FrameThrottle::default()));

            let update = {
                let throttle = throttle.clone();
                let content = content.clone();
                Closure::wrap(Box::new(move || {
                    throttle.borrow_mut().frame_done();
                    let Some(window) = web_sys::window() else {
                        return;
                    };
                    let scrolled = window.page_y_offset().unwrap_or_default();
                    let viewport = window
                        .inner_height()
                        .ok()
                        .and_then(|h| h.as_f64())
                        .unwrap_or_default();
                    let (Some(frame), Some(element)) =
                        (parallax_frame(scrolled, viewport), content.cast::<HtmlElement>())
                    else {
                        return;
                    };
                    let style = element.style();
                    let _ = style.set_property("transform", &format!("translateY({}px)", frame.translate_y));
                    let _ = style.set_property("opacity", &frame.opacity.to_string());
                }) as Box<dyn FnMut()>)
            };

            let on_scroll = {
                let window = window.clone();
                let update: js_sys::Function = update.as_ref().unchecked_ref::<js_sys::Function>().clone();
                Closure::wrap(Box::new(move || {
                    if !throttle.borrow_mut().request() {
                        return;
                    }
                    if let Some(window) = &window {
                        let _ = window.request_animation_frame(&update);
                    }
                }) as Box<dyn FnMut()>)
            };

            if let Some(window) = &window {
                let _ = window
                    .add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
            }

            move || {
                if let Some(window) = window {
                    let _ = window
                        .remove_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
                }
                drop(update);
            }
        },
        content,
    );
}
