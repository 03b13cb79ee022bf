use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};
use yew::prelude::*;
use yew_hooks::use_event_with_window;

const FOCUSABLE: &str = "a[href], button:not([disabled]):not(.close-modal), textarea:not([disabled]), input:not([disabled]):not([tabindex=\"-1\"]), select:not([disabled])";

/// Where Tab should send focus to keep it inside the dialog, if the browser's
/// own order would leave it. `active` is the position of the focused element
/// among the dialog's focusable elements.
pub fn wrap_focus(count: usize, active: Option<usize>, backwards: bool) -> Option<usize> {
    let last = count.checked_sub(1)?;
    match (active, backwards) {
        (Some(0), true) => Some(last),
        (Some(i), false) if i == last => Some(0),
        _ => None,
    }
}

fn focusable_elements(dialog: &Element) -> Vec<HtmlElement> {
    let Ok(nodes) = dialog.query_selector_all(FOCUSABLE) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn set_body_scroll_locked(locked: bool) {
    if let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    {
        let _ = body
            .style()
            .set_property("overflow", if locked { "hidden" } else { "" });
    }
}

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub id: AttrValue,
    pub title: AttrValue,
    pub open: bool,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    let dialog_ref = use_node_ref();
    // Set while open; holds the element that had focus before opening.
    let trigger: Rc<RefCell<Option<Option<HtmlElement>>>> = use_mut_ref(|| None);

    {
        let dialog_ref = dialog_ref.clone();
        let trigger = trigger.clone();
        use_effect_with_deps(
            move |open| {
                let document = web_sys::window().and_then(|w| w.document());
                if *open {
                    *trigger.borrow_mut() = Some(
                        document
                            .and_then(|d| d.active_element())
                            .and_then(|el| el.dyn_into::<HtmlElement>().ok()),
                    );
                    set_body_scroll_locked(true);
                    if let Some(dialog) = dialog_ref.cast::<Element>() {
                        dialog.set_scroll_top(0);
                        if let Some(first) = focusable_elements(&dialog).first() {
                            let _ = first.focus();
                        }
                    }
                } else if let Some(previous) = trigger.borrow_mut().take() {
                    set_body_scroll_locked(false);
                    if let Some(previous) = previous {
                        let _ = previous.focus();
                    }
                }
                || ()
            },
            props.open,
        );
    }

    {
        let open = props.open;
        let on_close = props.on_close.clone();
        use_event_with_window("keydown", move |e: KeyboardEvent| {
            if open && e.key() == "Escape" {
                on_close.emit(());
            }
        });
    }

    let onkeydown = {
        let dialog_ref = dialog_ref.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() != "Tab" {
                return;
            }
            let Some(dialog) = dialog_ref.cast::<Element>() else {
                return;
            };
            let focusable = focusable_elements(&dialog);
            let active = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.active_element());
            let position = active.and_then(|active| {
                focusable
                    .iter()
                    .position(|el| el.unchecked_ref::<Element>() == &active)
            });
            if let Some(target) = wrap_focus(focusable.len(), position, e.shift_key()) {
                e.prevent_default();
                let _ = focusable[target].focus();
            }
        })
    };

    let onclick = {
        let dialog_ref = dialog_ref.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            // Only clicks on the backdrop itself, not bubbling from the content.
            let on_backdrop = match (e.target(), dialog_ref.get()) {
                (Some(target), Some(dialog)) => target.unchecked_ref::<web_sys::Node>() == &dialog,
                _ => false,
            };
            if on_backdrop {
                debug!("closing modal from backdrop click");
                on_close.emit(());
            }
        })
    };

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div
            ref={dialog_ref}
            id={props.id.clone()}
            class={classes!("modal", props.open.then_some("open"))}
            role="dialog"
            aria-modal="true"
            aria-label={props.title.clone()}
            aria-hidden={(!props.open).to_string()}
            {onclick}
            {onkeydown}
        >
            <div class="modal-content">
                <button type="button" class="close-modal" aria-label="Close dialog" onclick={close}>
                    {"×"}
                </button>
                <h2 class="modal-title">{ props.title.clone() }</h2>
                { for props.children.iter() }
            </div>
        </div>
    }
}
