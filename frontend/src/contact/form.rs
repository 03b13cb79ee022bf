use gloo_timers::callback::Timeout;
use log::{debug, info};
use web_sys::{
    HtmlElement, HtmlInputElement, HtmlTextAreaElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};
use yew::prelude::*;

use super::autosave::DraftAutosave;
use super::char_count::CharCount;
use super::controller::{FormController, FormInput, SubmitOutcome, SystemClock, SUCCESS_ANNOUNCEMENT};
use super::draft::{Draft, Field, LocalStorageDrafts};
use super::mailer::{DeliveryError, EmailJs, Mailer};
use super::validation::ValidationError;
use crate::components::feedback::{FeedbackKind, FeedbackPanel};
use crate::config;

pub enum ContactFormMsg {
    Input(Field, String),
    Honeypot(String),
    Focus(Field),
    SaveDraft(u64),
    Submit,
    Delivered(Result<(), DeliveryError>),
    FocusFirstError,
}

#[derive(Clone, Debug, PartialEq)]
enum Feedback {
    None,
    Success,
    Error(String),
}

pub struct ContactForm {
    controller: FormController<LocalStorageDrafts, SystemClock>,
    mailer: EmailJs,
    fields: Draft,
    honeypot: String,
    errors: Vec<ValidationError>,
    feedback: Feedback,
    announcement: String,
    field_refs: [NodeRef; 6],
    error_panel: NodeRef,
    autosave: DraftAutosave,
    save_timeout: Option<Timeout>,
    focus_timeout: Option<Timeout>,
    focus_error_panel: bool,
}

fn field_index(field: Field) -> usize {
    Field::ALL
        .iter()
        .position(|f| *f == field)
        .unwrap_or_default()
}

/// Ctrl+Enter, or Cmd+Enter on macOS, submits from any field.
pub fn is_submit_shortcut(key: &str, ctrl: bool, meta: bool) -> bool {
    key == "Enter" && (ctrl || meta)
}

impl ContactForm {
    fn error_for(&self, field: Field) -> String {
        self.errors
            .iter()
            .find(|e| e.field() == field)
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    fn show_error(&mut self, message: String) {
        self.announcement = format!("Error: {}", message);
        self.feedback = Feedback::Error(message);
        self.focus_error_panel = true;
    }

    fn apply_outcome(&mut self, ctx: &Context<Self>, outcome: SubmitOutcome) -> bool {
        match outcome {
            SubmitOutcome::Busy | SubmitOutcome::SpamDetected => false,
            SubmitOutcome::Rejected(errors) => {
                debug!("contact form rejected: {:?}", errors);
                self.errors = errors;
                // Give the error text a frame to render before moving focus to it.
                let link = ctx.link().clone();
                self.focus_timeout = Some(Timeout::new(config::ERROR_FOCUS_DELAY_MS, move || {
                    link.send_message(ContactFormMsg::FocusFirstError);
                }));
                true
            }
            SubmitOutcome::Delivered => {
                self.autosave.cancel();
                self.save_timeout = None;
                self.fields = Draft::default();
                self.honeypot.clear();
                self.errors.clear();
                self.feedback = Feedback::Success;
                self.announcement = SUCCESS_ANNOUNCEMENT.to_string();
                true
            }
            other => {
                if let Some(message) = other.error_message() {
                    self.show_error(message);
                }
                true
            }
        }
    }

    fn focus_first_error(&self) {
        let field = self
            .errors
            .first()
            .map(|e| e.field())
            .unwrap_or(Field::Name);
        if let Some(input) = self.field_refs[field_index(field)].cast::<HtmlElement>() {
            let _ = input.focus();
        }
        if self.errors.is_empty() {
            return;
        }
        let error_el = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(&field.error_id()));
        if let Some(error_el) = error_el {
            let mut options = ScrollIntoViewOptions::new();
            options
                .behavior(ScrollBehavior::Smooth)
                .block(ScrollLogicalPosition::Nearest);
            error_el.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }

    fn text_group(
        &self,
        ctx: &Context<Self>,
        field: Field,
        label: &'static str,
        input_type: &'static str,
        required: bool,
        autocomplete: &'static str,
    ) -> Html {
        let error = self.error_for(field);
        let oninput = ctx.link().callback(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            ContactFormMsg::Input(field, input.value())
        });
        let onfocus = ctx.link().callback(move |_: FocusEvent| ContactFormMsg::Focus(field));

        html! {
            <div class="form-group">
                <label for={field.id()}>
                    { label }
                    if required { <span class="required" aria-hidden="true">{" *"}</span> }
                </label>
                <input
                    ref={self.field_refs[field_index(field)].clone()}
                    id={field.id()}
                    name={field.id()}
                    type={input_type}
                    autocomplete={autocomplete}
                    required={required}
                    aria-required={required.to_string()}
                    aria-invalid={(!error.is_empty()).to_string()}
                    aria-describedby={field.error_id()}
                    value={self.fields.get(field).to_string()}
                    {oninput}
                    {onfocus}
                />
                <span id={field.error_id()} class="error-message" role="alert">{ error }</span>
            </div>
        }
    }

    fn message_group(&self, ctx: &Context<Self>) -> Html {
        let field = Field::Message;
        let count = CharCount::of(&self.fields.message, config::MESSAGE_MAX_LENGTH);
        let oninput = ctx.link().callback(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            ContactFormMsg::Input(field, input.value())
        });

        html! {
            <div class="form-group">
                <label for={field.id()}>{"Tell us about your trip"}</label>
                <textarea
                    ref={self.field_refs[field_index(field)].clone()}
                    id={field.id()}
                    name={field.id()}
                    rows="5"
                    maxlength={config::MESSAGE_MAX_LENGTH.to_string()}
                    aria-describedby="message-char-count message-error"
                    value={self.fields.message.clone()}
                    {oninput}
                />
                <span id="message-char-count" class={classes!("char-count", count.class())} aria-live="polite">
                    { count.label() }
                </span>
                <span id={field.error_id()} class="error-message" role="alert">{ self.error_for(field) }</span>
            </div>
        }
    }
}

impl Component for ContactForm {
    type Message = ContactFormMsg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let controller = FormController::new(LocalStorageDrafts, SystemClock);
        let mut fields = Draft::default();
        if controller.restore_draft(&mut fields) {
            info!("Restored contact form draft");
        }

        Self {
            controller,
            mailer: EmailJs::default(),
            fields,
            honeypot: String::new(),
            errors: Vec::new(),
            feedback: Feedback::None,
            announcement: String::new(),
            field_refs: Default::default(),
            error_panel: NodeRef::default(),
            autosave: DraftAutosave::default(),
            save_timeout: None,
            focus_timeout: None,
            focus_error_panel: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ContactFormMsg::Input(field, value) => {
                self.errors.retain(|e| e.field() != field);
                self.fields.set(field, value);
                let link = ctx.link().clone();
                let ticket = self.autosave.schedule();
                // Replacing the handle drops, and so cancels, the previous save.
                self.save_timeout = Some(Timeout::new(config::DRAFT_SAVE_DEBOUNCE_MS, move || {
                    link.send_message(ContactFormMsg::SaveDraft(ticket));
                }));
                true
            }
            ContactFormMsg::Honeypot(value) => {
                self.honeypot = value;
                false
            }
            ContactFormMsg::Focus(field) => {
                self.controller.record_focus(field);
                false
            }
            ContactFormMsg::SaveDraft(ticket) => {
                if self.autosave.fire(ticket) {
                    self.save_timeout = None;
                    self.controller.save_draft(&self.fields);
                }
                false
            }
            ContactFormMsg::Submit => {
                let input = FormInput {
                    fields: self.fields.clone(),
                    honeypot: self.honeypot.clone(),
                };
                match self.controller.begin_submit(&input, &self.mailer) {
                    Ok(params) => {
                        info!("Sending contact form");
                        self.errors.clear();
                        self.feedback = Feedback::None;
                        let send = self.mailer.send(
                            config::EMAILJS_SERVICE_ID,
                            config::EMAILJS_TEMPLATE_ID,
                            &params,
                        );
                        ctx.link()
                            .send_future(async move { ContactFormMsg::Delivered(send.await) });
                        true
                    }
                    Err(outcome) => self.apply_outcome(ctx, outcome),
                }
            }
            ContactFormMsg::Delivered(result) => {
                let outcome = self.controller.finish_submit(result);
                debug!("contact form analytics: {:?}", self.controller.analytics());
                self.apply_outcome(ctx, outcome)
            }
            ContactFormMsg::FocusFirstError => {
                self.focus_timeout = None;
                self.focus_first_error();
                false
            }
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        if self.focus_error_panel {
            self.focus_error_panel = false;
            if let Some(panel) = self.error_panel.cast::<HtmlElement>() {
                let _ = panel.focus();
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let sending = self.controller.is_sending();
        let succeeded = self.feedback == Feedback::Success;

        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            ContactFormMsg::Submit
        });
        let onkeydown = ctx.link().batch_callback(|e: KeyboardEvent| {
            if is_submit_shortcut(&e.key(), e.ctrl_key(), e.meta_key()) {
                e.prevent_default();
                Some(ContactFormMsg::Submit)
            } else {
                None
            }
        });
        let on_honeypot = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            ContactFormMsg::Honeypot(input.value())
        });

        html! {
            <form class="contact-form" novalidate={true} {onsubmit} {onkeydown}>
                if succeeded {
                    <FeedbackPanel kind={FeedbackKind::Success} />
                }
                <div id="form-loading-overlay" class={classes!("form-loading-overlay", sending.then_some("active"))} aria-hidden="true">
                    <div class="skeleton-line"></div>
                    <div class="skeleton-line"></div>
                    <div class="skeleton-line short"></div>
                </div>
                if !succeeded {
                    { self.text_group(ctx, Field::Name, "Name", "text", true, "name") }
                    { self.text_group(ctx, Field::Email, "Email", "email", true, "email") }
                    { self.text_group(ctx, Field::Phone, "Phone", "tel", false, "tel") }
                    { self.text_group(ctx, Field::Organization, "Organization", "text", false, "organization") }
                    { self.text_group(ctx, Field::Location, "Location", "text", false, "address-level2") }
                    { self.message_group(ctx) }
                }
                <div class="form-group honeypot-field" aria-hidden="true">
                    <label for="website">{"Website"}</label>
                    <input
                        id="website"
                        name="website"
                        type="text"
                        tabindex="-1"
                        autocomplete="off"
                        value={self.honeypot.clone()}
                        oninput={on_honeypot}
                    />
                </div>
                if !succeeded {
                    <button id="submit-btn" type="submit" class="btn btn-primary" disabled={sending}>
                        if sending {
                            <span class="btn-loading">{"Sending..."}</span>
                        } else {
                            <span class="btn-text">{"Send Message"}</span>
                        }
                    </button>
                }
                if let Feedback::Error(message) = &self.feedback {
                    <FeedbackPanel
                        kind={FeedbackKind::Error}
                        message={message.clone()}
                        panel_ref={self.error_panel.clone()}
                    />
                }
                <div id="aria-live-region" class="sr-only" aria-live="polite" aria-atomic="true">
                    { &self.announcement }
                </div>
            </form>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_or_cmd_enter_submits() {
        assert!(is_submit_shortcut("Enter", true, false));
        assert!(is_submit_shortcut("Enter", false, true));
        assert!(is_submit_shortcut("Enter", true, true));
    }

    #[test]
    fn plain_enter_and_other_chords_do_not_submit() {
        assert!(!is_submit_shortcut("Enter", false, false));
        assert!(!is_submit_shortcut("s", true, false));
        assert!(!is_submit_shortcut("Tab", false, true));
    }
}
