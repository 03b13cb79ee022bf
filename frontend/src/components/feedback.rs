use stylist::yew::styled_component;
use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
}

#[derive(Properties, PartialEq)]
pub struct FeedbackProps {
    pub kind: FeedbackKind,
    #[prop_or_default]
    pub message: String,
    #[prop_or_default]
    pub panel_ref: NodeRef,
}

/// Outcome panel rendered inside the contact form.
#[styled_component(FeedbackPanel)]
pub fn feedback_panel(props: &FeedbackProps) -> Html {
    let base = css!(
        r#"
        padding: 1rem;
        border-radius: 4px;
        margin-top: 1rem;
        text-align: center;
        font-weight: 600;
        "#
    );

    match props.kind {
        FeedbackKind::Success => html! {
            <div
                ref={props.panel_ref.clone()}
                class={classes!("form-success", base, css!(r#"
                    background: #23DC7D;
                    color: #0F1A17;
                    opacity: 0;
                    transform: translateY(20px);
                    animation: form-success-rise 0.4s ease forwards;

                    & h3, & p { color: #0F1A17; }
                    & .form-success-mark { font-size: 3rem; margin-bottom: 1rem; }
                "#))}
                role="status"
                aria-live="polite"
            >
                <div style="padding: 2rem;">
                    <div class="form-success-mark" aria-hidden="true">{"✓"}</div>
                    <h3 style="margin-bottom: 1rem;">{"Thank You!"}</h3>
                    <p style="margin-bottom: 0; font-size: 1.1rem;">
                        {"We've received your submission and will get back to you soon."}
                    </p>
                </div>
            </div>
        },
        FeedbackKind::Error => html! {
            <div
                ref={props.panel_ref.clone()}
                class={classes!("form-error", base, css!(r#"
                    background: #6B7C76;
                    color: #FFFFFF;
                "#))}
                role="alert"
                aria-live="assertive"
                tabindex="-1"
            >
                { &props.message }
            </div>
        },
    }
}
