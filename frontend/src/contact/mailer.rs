use futures::future::{FutureExt, LocalBoxFuture};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::config;

/// Template parameters understood by the EmailJS contact template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmailParams {
    pub to_email: String,
    pub from_name: String,
    pub from_email: String,
    pub phone: String,
    pub organization: String,
    pub location: String,
    pub message: String,
}

/// Rejection value of a send. EmailJS rejects with `{ status, text }`; other
/// failures may carry only one of the two, or neither.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Error)]
#[error("email delivery failed (status {status:?}): {}", .text.as_deref().unwrap_or("no details"))]
pub struct DeliveryError {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub text: Option<String>,
}

impl DeliveryError {
    pub fn with_status(status: u16) -> Self {
        Self {
            status: Some(status),
            text: None,
        }
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            status: None,
            text: Some(text.into()),
        }
    }

    pub fn from_js(value: JsValue) -> Self {
        if let Some(text) = value.as_string() {
            return Self::with_text(text);
        }
        let mut error: Self = serde_wasm_bindgen::from_value(value.clone()).unwrap_or_default();
        if error.text.is_none() {
            error.text = value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()));
        }
        error
    }

    pub fn classify(&self) -> DeliveryFailure {
        match self.status {
            Some(0) | Some(500..) => DeliveryFailure::Server,
            Some(400) => DeliveryFailure::InvalidData,
            Some(429) => DeliveryFailure::TooManyRequests,
            _ if self.text.as_deref().is_some_and(|t| t.contains("network")) => {
                DeliveryFailure::Network
            }
            _ => DeliveryFailure::Unknown,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeliveryFailure {
    Server,
    InvalidData,
    TooManyRequests,
    Network,
    Unknown,
}

impl DeliveryFailure {
    pub fn message(self) -> String {
        match self {
            DeliveryFailure::Server => format!(
                "Server error. Please try again in a few moments or email us directly at {}",
                config::CONTACT_EMAIL
            ),
            DeliveryFailure::InvalidData => {
                "Invalid form data. Please check your entries and try again.".to_string()
            }
            DeliveryFailure::TooManyRequests => {
                "Too many requests. Please wait a moment before trying again.".to_string()
            }
            DeliveryFailure::Network => {
                "Network error. Please check your connection and try again.".to_string()
            }
            DeliveryFailure::Unknown => format!(
                "There was a problem sending your message. Please try again or email us directly at {}",
                config::CONTACT_EMAIL
            ),
        }
    }
}

/// Outbound transactional email.
pub trait Mailer {
    /// Whether the delivery client is loaded and callable right now.
    fn is_available(&self) -> bool;

    fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &EmailParams,
    ) -> LocalBoxFuture<'static, Result<(), DeliveryError>>;
}

/// Per-call SDK options. EmailJS v4 refuses to send without a public key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOptions {
    pub public_key: String,
}

/// The EmailJS browser SDK, looked up on `window.emailjs` at call time.
/// Tracking-prevention features can block the SDK script entirely, so its
/// absence is an ordinary condition.
#[derive(Clone, Copy, Debug)]
pub struct EmailJs {
    public_key: &'static str,
}

impl Default for EmailJs {
    fn default() -> Self {
        Self::new(config::EMAILJS_PUBLIC_KEY)
    }
}

impl EmailJs {
    pub fn new(public_key: &'static str) -> Self {
        Self { public_key }
    }

    pub fn options(&self) -> SendOptions {
        SendOptions {
            public_key: self.public_key.to_string(),
        }
    }

    fn client() -> Option<(JsValue, js_sys::Function)> {
        let window = web_sys::window()?;
        let emailjs = js_sys::Reflect::get(&window, &JsValue::from_str("emailjs")).ok()?;
        if emailjs.is_undefined() || emailjs.is_null() {
            return None;
        }
        let send = js_sys::Reflect::get(&emailjs, &JsValue::from_str("send")).ok()?;
        let send = send.dyn_into::<js_sys::Function>().ok()?;
        Some((emailjs, send))
    }
}

impl Mailer for EmailJs {
    fn is_available(&self) -> bool {
        // A build without a key could never deliver.
        !self.public_key.is_empty() && Self::client().is_some()
    }

    fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &EmailParams,
    ) -> LocalBoxFuture<'static, Result<(), DeliveryError>> {
        let client = Self::client();
        let service_id = JsValue::from_str(service_id);
        let template_id = JsValue::from_str(template_id);
        let params = serde_wasm_bindgen::to_value(params);
        let options = serde_wasm_bindgen::to_value(&self.options());

        async move {
            let (emailjs, send) =
                client.ok_or_else(|| DeliveryError::with_text("EmailJS send function not available"))?;
            let params = params.map_err(|e| DeliveryError::with_text(e.to_string()))?;
            let options = options.map_err(|e| DeliveryError::with_text(e.to_string()))?;
            let args = js_sys::Array::of4(&service_id, &template_id, &params, &options);
            let pending = send.apply(&emailjs, &args).map_err(DeliveryError::from_js)?;
            let promise = pending
                .dyn_into::<js_sys::Promise>()
                .map_err(|_| DeliveryError::with_text("EmailJS send did not return a promise"))?;
            JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(DeliveryError::from_js)
        }
        .boxed_local()
    }
}

#[cfg(test)]
pub(crate) use fake::FakeMailer;

#[cfg(test)]
mod fake {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every send and answers with a scripted result.
    #[derive(Clone, Debug)]
    pub(crate) struct FakeMailer {
        pub(crate) available: bool,
        pub(crate) result: Result<(), DeliveryError>,
        pub(crate) sent: Rc<RefCell<Vec<(String, String, EmailParams)>>>,
    }

    impl FakeMailer {
        pub(crate) fn succeeding() -> Self {
            Self {
                available: true,
                result: Ok(()),
                sent: Rc::default(),
            }
        }

        pub(crate) fn failing(error: DeliveryError) -> Self {
            Self {
                result: Err(error),
                ..Self::succeeding()
            }
        }

        pub(crate) fn unavailable() -> Self {
            Self {
                available: false,
                ..Self::succeeding()
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.sent.borrow().len()
        }
    }

    impl Mailer for FakeMailer {
        fn is_available(&self) -> bool {
            self.available
        }

        fn send(
            &self,
            service_id: &str,
            template_id: &str,
            params: &EmailParams,
        ) -> LocalBoxFuture<'static, Result<(), DeliveryError>> {
            self.sent.borrow_mut().push((
                service_id.to_string(),
                template_id.to_string(),
                params.clone(),
            ));
            futures::future::ready(self.result.clone()).boxed_local()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_codes_map_to_categories() {
        assert_eq!(DeliveryError::with_status(0).classify(), DeliveryFailure::Server);
        assert_eq!(DeliveryError::with_status(502).classify(), DeliveryFailure::Server);
        assert_eq!(DeliveryError::with_status(400).classify(), DeliveryFailure::InvalidData);
        assert_eq!(DeliveryError::with_status(429).classify(), DeliveryFailure::TooManyRequests);
        assert_eq!(DeliveryError::with_status(404).classify(), DeliveryFailure::Unknown);
    }

    #[test]
    fn network_text_is_recognised_when_status_is_not_decisive() {
        assert_eq!(
            DeliveryError::with_text("a network failure occurred").classify(),
            DeliveryFailure::Network
        );
        let error = DeliveryError {
            status: Some(403),
            text: Some("network".into()),
        };
        assert_eq!(error.classify(), DeliveryFailure::Network);
        assert_eq!(DeliveryError::default().classify(), DeliveryFailure::Unknown);
    }

    #[test]
    fn status_takes_precedence_over_text() {
        let error = DeliveryError {
            status: Some(503),
            text: Some("network".into()),
        };
        assert_eq!(error.classify(), DeliveryFailure::Server);
    }

    #[test]
    fn server_and_generic_messages_offer_direct_email() {
        assert!(DeliveryFailure::Server.message().ends_with(config::CONTACT_EMAIL));
        assert!(DeliveryFailure::Unknown.message().ends_with(config::CONTACT_EMAIL));
        assert_eq!(
            DeliveryFailure::TooManyRequests.message(),
            "Too many requests. Please wait a moment before trying again."
        );
    }

    #[test]
    fn rejection_payload_deserializes() {
        let error: DeliveryError =
            serde_json::from_str(r#"{"status":412,"text":"bad template"}"#).unwrap();
        assert_eq!(error.status, Some(412));
        assert_eq!(error.text.as_deref(), Some("bad template"));
    }

    #[test]
    fn send_options_carry_the_public_key() {
        let options = EmailJs::new("pk_live_123").options();
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            serde_json::json!({ "publicKey": "pk_live_123" })
        );
    }

    #[test]
    fn missing_public_key_reports_unavailable() {
        assert!(!EmailJs::new("").is_available());
    }

    #[test]
    fn params_serialize_with_template_keys() {
        let params = EmailParams {
            to_email: "to@x.io".into(),
            from_name: "Ada".into(),
            from_email: "ada@x.io".into(),
            phone: "N/A".into(),
            organization: "N/A".into(),
            location: "N/A".into(),
            message: "hello".into(),
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["from_name"], "Ada");
        assert_eq!(json["to_email"], "to@x.io");
        assert_eq!(json.as_object().unwrap().len(), 7);
    }
}
