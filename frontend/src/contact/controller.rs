use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use super::analytics::FormAnalytics;
use super::draft::{Draft, DraftError, DraftStore, Field};
use super::mailer::{DeliveryError, DeliveryFailure, EmailParams, Mailer};
use super::validation::{self, ValidationError};
use crate::config;

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Whether a submission is currently being delivered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Sending,
}

/// Everything read from the form at submit time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormInput {
    pub fields: Draft,
    /// Hidden field only automated submitters fill in.
    pub honeypot: String,
}

/// How one submit attempt ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another attempt is still in flight; nothing happened.
    Busy,
    RateLimited,
    /// Honeypot was filled. Deliberately indistinguishable from nothing
    /// happening as far as the submitter can tell.
    SpamDetected,
    Rejected(Vec<ValidationError>),
    DeliveryUnavailable,
    Delivered,
    Failed(DeliveryFailure),
}

pub const RATE_LIMITED_MESSAGE: &str = "Please wait a moment before submitting again.";
pub const UNAVAILABLE_MESSAGE: &str = "EmailJS service is not available. This may be due to browser tracking prevention. Please try disabling tracking prevention for this site or use a different browser.";
pub const SUCCESS_ANNOUNCEMENT: &str =
    "Form submitted successfully. Thank you! We will be in touch soon.";

impl SubmitOutcome {
    /// Text for the error panel, if the outcome warrants one.
    pub fn error_message(&self) -> Option<String> {
        match self {
            SubmitOutcome::RateLimited => Some(RATE_LIMITED_MESSAGE.to_string()),
            SubmitOutcome::DeliveryUnavailable => Some(UNAVAILABLE_MESSAGE.to_string()),
            SubmitOutcome::Failed(failure) => Some(failure.message()),
            SubmitOutcome::Busy
            | SubmitOutcome::SpamDetected
            | SubmitOutcome::Rejected(_)
            | SubmitOutcome::Delivered => None,
        }
    }
}

/// Contact form state for one page view: draft persistence, submit gating and
/// the single in-flight delivery.
pub struct FormController<S, C = SystemClock> {
    store: S,
    clock: C,
    phase: FormPhase,
    last_attempt: Option<DateTime<Utc>>,
    analytics: FormAnalytics,
}

impl<S: DraftStore, C: Clock> FormController<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            phase: FormPhase::Idle,
            last_attempt: None,
            analytics: FormAnalytics::default(),
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_sending(&self) -> bool {
        self.phase == FormPhase::Sending
    }

    pub fn analytics(&self) -> &FormAnalytics {
        &self.analytics
    }

    pub fn record_focus(&mut self, field: Field) {
        self.analytics.record_focus(field);
    }

    /// Copies the persisted draft's non-empty values into `fields`.
    /// A corrupt entry is removed and otherwise ignored.
    pub fn restore_draft(&self, fields: &mut Draft) -> bool {
        match self.store.load() {
            Ok(Some(draft)) => draft.restore_into(fields),
            Ok(None) => false,
            Err(DraftError::Malformed(e)) => {
                debug!(error = %e, "discarding malformed form draft");
                if let Err(e) = self.store.clear() {
                    warn!(error = %e, "failed to remove malformed form draft");
                }
                false
            }
            Err(e) => {
                warn!(error = %e, "could not read form draft");
                false
            }
        }
    }

    pub fn save_draft(&self, fields: &Draft) {
        if let Err(e) = self.store.save(fields) {
            warn!(error = %e, "could not save form draft");
        }
    }

    /// Runs every gate in order and, if all pass, moves to `Sending` and hands
    /// back the parameters to deliver. Every `Err` is a terminal outcome.
    pub fn begin_submit<M: Mailer + ?Sized>(
        &mut self,
        input: &FormInput,
        mailer: &M,
    ) -> Result<EmailParams, SubmitOutcome> {
        if self.is_sending() {
            return Err(SubmitOutcome::Busy);
        }

        let now = self.clock.now();
        if let Some(last) = self.last_attempt {
            if now - last < Duration::milliseconds(config::MIN_SUBMISSION_INTERVAL_MS) {
                debug!("submission rate limited");
                return Err(SubmitOutcome::RateLimited);
            }
        }

        if !input.honeypot.trim().is_empty() {
            self.analytics.spam_attempts += 1;
            info!(spam_attempts = self.analytics.spam_attempts, "honeypot filled, dropping submission");
            return Err(SubmitOutcome::SpamDetected);
        }

        let submission = validation::validate(&input.fields).map_err(SubmitOutcome::Rejected)?;

        if !mailer.is_available() {
            self.analytics.errors += 1;
            warn!("email client unavailable");
            return Err(SubmitOutcome::DeliveryUnavailable);
        }

        self.phase = FormPhase::Sending;
        self.last_attempt = Some(now);
        Ok(submission.into_params(config::CONTACT_EMAIL))
    }

    /// Settles the in-flight delivery and returns the form to `Idle`.
    pub fn finish_submit(&mut self, result: Result<(), DeliveryError>) -> SubmitOutcome {
        self.phase = FormPhase::Idle;
        match result {
            Ok(()) => {
                self.last_attempt = Some(self.clock.now());
                self.analytics.submissions += 1;
                if let Err(e) = self.store.clear() {
                    warn!(error = %e, "could not clear form draft after submission");
                }
                info!(submissions = self.analytics.submissions, "contact form delivered");
                SubmitOutcome::Delivered
            }
            Err(e) => {
                self.analytics.errors += 1;
                let failure = e.classify();
                warn!(error = %e, ?failure, errors = self.analytics.errors, "contact form delivery failed");
                SubmitOutcome::Failed(failure)
            }
        }
    }

    /// One complete attempt: gates, a single send, settlement.
    pub async fn submit<M: Mailer + ?Sized>(&mut self, input: &FormInput, mailer: &M) -> SubmitOutcome {
        match self.begin_submit(input, mailer) {
            Ok(params) => {
                let result = mailer
                    .send(config::EMAILJS_SERVICE_ID, config::EMAILJS_TEMPLATE_ID, &params)
                    .await;
                self.finish_submit(result)
            }
            Err(outcome) => outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::draft::MemoryDrafts;
    use crate::contact::mailer::FakeMailer;
    use chrono::TimeZone;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone)]
    struct FakeClock(Rc<Cell<DateTime<Utc>>>);

    impl FakeClock {
        fn new() -> Self {
            Self(Rc::new(Cell::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap())))
        }

        fn advance_ms(&self, ms: i64) {
            self.0.set(self.0.get() + Duration::milliseconds(ms));
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> DateTime<Utc> {
            self.0.get()
        }
    }

    fn valid_input() -> FormInput {
        FormInput {
            fields: Draft {
                name: "Ada Lovelace".into(),
                email: "ada@example.com".into(),
                message: "Trip for twelve in March".into(),
                ..Draft::default()
            },
            honeypot: String::new(),
        }
    }

    fn controller() -> (FormController<MemoryDrafts, FakeClock>, MemoryDrafts, FakeClock) {
        let store = MemoryDrafts::default();
        let clock = FakeClock::new();
        (FormController::new(store.clone(), clock.clone()), store, clock)
    }

    #[test]
    fn empty_name_is_rejected_without_sending() {
        let (mut form, _, _) = controller();
        let mailer = FakeMailer::succeeding();
        let mut input = valid_input();
        input.fields.name.clear();

        let outcome = block_on(form.submit(&input, &mailer));
        assert_eq!(outcome, SubmitOutcome::Rejected(vec![ValidationError::NameRequired]));
        assert_eq!(mailer.calls(), 0);
        assert_eq!(form.phase(), FormPhase::Idle);
    }

    #[test]
    fn successful_delivery_sends_once_and_clears_the_draft() {
        let (mut form, store, _) = controller();
        let mailer = FakeMailer::succeeding();
        let input = valid_input();
        form.save_draft(&input.fields);
        assert!(store.raw().is_some());

        let outcome = block_on(form.submit(&input, &mailer));
        assert_eq!(outcome, SubmitOutcome::Delivered);
        assert_eq!(store.raw(), None);
        assert_eq!(form.analytics().submissions, 1);

        let sent = mailer.sent.borrow();
        assert_eq!(sent.len(), 1);
        let (service, template, params) = &sent[0];
        assert_eq!(service, config::EMAILJS_SERVICE_ID);
        assert_eq!(template, config::EMAILJS_TEMPLATE_ID);
        assert_eq!(params.to_email, config::CONTACT_EMAIL);
        assert_eq!(params.phone, "N/A");
    }

    #[test]
    fn second_attempt_within_cooldown_is_rate_limited() {
        let (mut form, _, clock) = controller();
        let mailer = FakeMailer::succeeding();

        assert_eq!(block_on(form.submit(&valid_input(), &mailer)), SubmitOutcome::Delivered);
        clock.advance_ms(4_999);
        let outcome = block_on(form.submit(&valid_input(), &mailer));
        assert_eq!(outcome, SubmitOutcome::RateLimited);
        assert_eq!(outcome.error_message().as_deref(), Some(RATE_LIMITED_MESSAGE));
        assert_eq!(mailer.calls(), 1);

        clock.advance_ms(1);
        assert_eq!(block_on(form.submit(&valid_input(), &mailer)), SubmitOutcome::Delivered);
        assert_eq!(mailer.calls(), 2);
    }

    #[test]
    fn failed_attempt_also_starts_the_cooldown() {
        let (mut form, _, clock) = controller();
        let mailer = FakeMailer::failing(DeliveryError::with_status(500));

        assert_eq!(
            block_on(form.submit(&valid_input(), &mailer)),
            SubmitOutcome::Failed(DeliveryFailure::Server)
        );
        clock.advance_ms(1_000);
        assert_eq!(block_on(form.submit(&valid_input(), &mailer)), SubmitOutcome::RateLimited);
    }

    #[test]
    fn honeypot_counts_spam_silently() {
        let (mut form, _, _) = controller();
        let mailer = FakeMailer::succeeding();
        let mut input = valid_input();
        input.honeypot = "http://spam.example".into();

        let outcome = block_on(form.submit(&input, &mailer));
        assert_eq!(outcome, SubmitOutcome::SpamDetected);
        assert_eq!(outcome.error_message(), None);
        assert_eq!(form.analytics().spam_attempts, 1);
        assert_eq!(mailer.calls(), 0);
    }

    #[test]
    fn in_flight_submission_blocks_reentry() {
        let (mut form, _, clock) = controller();
        let mailer = FakeMailer::succeeding();

        let params = form.begin_submit(&valid_input(), &mailer).unwrap();
        assert_eq!(params.from_name, "Ada Lovelace");
        assert!(form.is_sending());

        clock.advance_ms(60_000);
        assert_eq!(form.begin_submit(&valid_input(), &mailer), Err(SubmitOutcome::Busy));

        assert_eq!(form.finish_submit(Ok(())), SubmitOutcome::Delivered);
        assert_eq!(form.phase(), FormPhase::Idle);
    }

    #[test]
    fn unavailable_client_aborts_before_sending() {
        let (mut form, store, _) = controller();
        let mailer = FakeMailer::unavailable();
        let input = valid_input();
        form.save_draft(&input.fields);

        let outcome = block_on(form.submit(&input, &mailer));
        assert_eq!(outcome, SubmitOutcome::DeliveryUnavailable);
        assert_eq!(outcome.error_message().as_deref(), Some(UNAVAILABLE_MESSAGE));
        assert_eq!(form.analytics().errors, 1);
        assert_eq!(mailer.calls(), 0);
        assert!(!form.is_sending());
        assert!(store.raw().is_some());
    }

    #[test]
    fn failure_keeps_the_draft_and_counts_an_error() {
        let (mut form, store, _) = controller();
        let mailer = FakeMailer::failing(DeliveryError::with_status(429));
        let input = valid_input();
        form.save_draft(&input.fields);

        let outcome = block_on(form.submit(&input, &mailer));
        assert_eq!(outcome, SubmitOutcome::Failed(DeliveryFailure::TooManyRequests));
        assert_eq!(form.analytics().errors, 1);
        assert!(store.raw().is_some());
    }

    #[test]
    fn draft_restores_only_stored_non_empty_fields() {
        let (form, store, _) = controller();
        form.save_draft(&Draft {
            name: "Ada".into(),
            organization: "KEUB".into(),
            ..Draft::default()
        });

        let mut fields = Draft {
            email: "kept@example.com".into(),
            ..Draft::default()
        };
        assert!(form.restore_draft(&mut fields));
        assert_eq!(fields.name, "Ada");
        assert_eq!(fields.organization, "KEUB");
        assert_eq!(fields.email, "kept@example.com");
        assert!(store.raw().is_some());
    }

    #[test]
    fn malformed_draft_is_discarded() {
        let store = MemoryDrafts::with_raw("{\"name\": [");
        let form = FormController::new(store.clone(), FakeClock::new());
        let mut fields = Draft::default();

        assert!(!form.restore_draft(&mut fields));
        assert_eq!(fields, Draft::default());
        assert_eq!(store.raw(), None);
    }
}
