use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, ScrollBehavior, ScrollToOptions};
use yew::prelude::*;

use crate::config;

/// What a click on an in-page `#...` link should do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnchorAction {
    /// Bare `#`: left to the browser.
    Ignore,
    OpenContact,
    OpenPrivacy,
    ScrollTo(String),
}

impl AnchorAction {
    pub fn from_href(href: &str) -> Self {
        match href {
            "" | "#" => AnchorAction::Ignore,
            "#contact" | "#cta" => AnchorAction::OpenContact,
            "#privacy" => AnchorAction::OpenPrivacy,
            other => match other.strip_prefix('#') {
                Some(id) => AnchorAction::ScrollTo(id.to_string()),
                None => AnchorAction::Ignore,
            },
        }
    }
}

/// Scroll position that puts a section's top just under the fixed navbar.
pub fn scroll_offset(target_top: f64, navbar_height: Option<f64>) -> f64 {
    target_top - navbar_height.unwrap_or(config::NAVBAR_FALLBACK_HEIGHT_PX)
}

/// Smoothly scrolls the window to the element with id `id`, if there is one.
pub fn scroll_to_section(id: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let Some(target) = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        debug!("no section with id {}", id);
        return;
    };
    let navbar_height = document
        .query_selector(".navbar")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map(|el| el.offset_height() as f64);

    let mut options = ScrollToOptions::new();
    options
        .top(scroll_offset(target.offset_top() as f64, navbar_height))
        .behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

/// Click handler for an in-page link. Everything but a bare `#` is handled
/// here instead of by the browser.
pub fn anchor_click(href: &'static str, on_anchor: Callback<AnchorAction>) -> Callback<MouseEvent> {
    Callback::from(move |e: MouseEvent| {
        let action = AnchorAction::from_href(href);
        if action != AnchorAction::Ignore {
            e.prevent_default();
        }
        on_anchor.emit(action);
    })
}

const LINKS: [(&str, &str); 4] = [
    ("#product", "Product"),
    ("#experiences", "Experiences"),
    ("#operators", "Operators"),
    ("#vision", "Vision"),
];

#[derive(Properties, PartialEq)]
pub struct NavProps {
    pub on_anchor: Callback<AnchorAction>,
}

#[function_component(Nav)]
pub fn nav(props: &NavProps) -> Html {
    let menu_open = use_state(|| false);
    let is_scrolled = use_state(|| false);

    {
        let is_scrolled = is_scrolled.clone();
        use_effect_with_deps(
            move |_| {
                let window = web_sys::window();
                let listener = window.clone().map(|window| {
                    let scroll_window = window.clone();
                    let callback = Closure::wrap(Box::new(move || {
                        let offset = scroll_window.page_y_offset().unwrap_or_default();
                        is_scrolled.set(offset > config::NAVBAR_SCROLLED_AFTER_PX);
                    }) as Box<dyn FnMut()>);
                    let _ = window
                        .add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref());
                    callback
                });

                move || {
                    if let (Some(window), Some(callback)) = (window, listener) {
                        let _ = window.remove_event_listener_with_callback(
                            "scroll",
                            callback.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            (),
        );
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(!*menu_open);
        })
    };

    let link = |href: &'static str, label: &'static str, class: &'static str| {
        let follow = anchor_click(href, props.on_anchor.clone());
        let menu_open = menu_open.clone();
        let onclick = Callback::from(move |e: MouseEvent| {
            menu_open.set(false);
            follow.emit(e);
        });
        html! {
            <a {href} {class} {onclick}>{ label }</a>
        }
    };

    html! {
        <nav class={classes!("navbar", (*is_scrolled).then_some("scrolled"))}>
            <div class="nav-content">
                <a href="#" class="nav-logo">{"KEUB"}</a>
                <button
                    type="button"
                    class={classes!("mobile-menu-toggle", (*menu_open).then_some("active"))}
                    aria-label="Toggle navigation"
                    aria-expanded={(*menu_open).to_string()}
                    onclick={toggle_menu}
                >
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div class={classes!("nav-links", (*menu_open).then_some("active"))}>
                    { for LINKS.iter().map(|&(href, label)| link(href, label, "nav-link")) }
                    { link("#contact", "Contact", "nav-link nav-cta") }
                </div>
            </div>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn anchors_map_to_actions() {
        assert_eq!(AnchorAction::from_href("#"), AnchorAction::Ignore);
        assert_eq!(AnchorAction::from_href("#contact"), AnchorAction::OpenContact);
        assert_eq!(AnchorAction::from_href("#cta"), AnchorAction::OpenContact);
        assert_eq!(AnchorAction::from_href("#privacy"), AnchorAction::OpenPrivacy);
        assert_eq!(
            AnchorAction::from_href("#vision"),
            AnchorAction::ScrollTo("vision".to_string())
        );
    }

    #[test]
    fn non_fragment_links_are_ignored() {
        assert_eq!(AnchorAction::from_href("https://keubit.com"), AnchorAction::Ignore);
        assert_eq!(AnchorAction::from_href(""), AnchorAction::Ignore);
    }

    #[test]
    fn offset_subtracts_navbar_height() {
        assert_eq!(scroll_offset(900.0, Some(64.0)), 836.0);
    }

    #[test]
    fn offset_falls_back_without_navbar() {
        assert_eq!(scroll_offset(900.0, None), 820.0);
    }
}
