//! State machine behind the counter form.
//!
//! The form moves between four states:
//!
//! ```text
//!            submit (non-empty)           Ok
//!   Idle ─────────────────────▶ Submitting ──────▶ Success
//!     ▲                              │
//!     │ reset                        │ Err
//!     └──────────────────────────────┴────────────▶ Error
//! ```
//!
//! Only one request can be in flight: `begin_submit` refuses while the form
//! is already submitting, and the rendered submit button is disabled.

use crate::client::{ClientError, CountBackend};
use crate::count::CountResult;

/// Message shown for every failed submission
pub const CONNECTION_ERROR: &str = "Failed to connect to backend service";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
    Success(CountResult),
    Error(String),
}

/// One counter form: the raw input plus its current state.
#[derive(Debug, Clone)]
pub struct CounterForm {
    input: String,
    state: FormState,
}

impl Default for CounterForm {
    fn default() -> Self {
        Self::new("")
    }
}

impl CounterForm {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            state: FormState::Idle,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, FormState::Submitting)
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && !self.input.trim().is_empty()
    }

    pub fn result(&self) -> Option<&CountResult> {
        match &self.state {
            FormState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FormState::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Move to `Submitting` and return the trimmed name to send.
    ///
    /// Returns `None` without changing state when the trimmed input is
    /// empty or a request is already in flight.
    pub fn begin_submit(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        self.state = FormState::Submitting;
        Some(self.input.trim().to_string())
    }

    /// Record the outcome of the in-flight request.
    ///
    /// Ignored unless the form is submitting.
    pub fn complete(&mut self, outcome: Result<CountResult, ClientError>) {
        if !self.is_submitting() {
            return;
        }
        self.state = match outcome {
            Ok(result) => FormState::Success(result),
            Err(e) => {
                tracing::error!(error = %e, "Error calling backend");
                FormState::Error(CONNECTION_ERROR.to_string())
            }
        };
    }

    /// Clear input, result and error.
    pub fn reset(&mut self) {
        self.input.clear();
        self.state = FormState::Idle;
    }

    /// Run a full submission against `backend`.
    ///
    /// A no-op when `begin_submit` refuses.
    pub async fn submit(&mut self, backend: &dyn CountBackend) {
        let Some(name) = self.begin_submit() else {
            return;
        };
        let outcome = backend.count(&name).await;
        self.complete(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::count::{count, CountRequest};

    struct FakeBackend {
        calls: AtomicUsize,
        fail: bool,
    }

    impl FakeBackend {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl CountBackend for FakeBackend {
        async fn count(&self, name: &str) -> Result<CountResult, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(ClientError::Status(500))
            } else {
                Ok(count(CountRequest { name: name.into() }, "fake-pod"))
            }
        }
    }

    #[test]
    fn test_empty_input_is_noop() {
        let mut form = CounterForm::new("   ");
        assert!(!form.can_submit());
        assert_eq!(form.begin_submit(), None);
        assert_eq!(form.state(), &FormState::Idle);
    }

    #[test]
    fn test_begin_submit_trims() {
        let mut form = CounterForm::new("  Alice \n");
        assert_eq!(form.begin_submit().as_deref(), Some("Alice"));
        assert!(form.is_submitting());
    }

    #[test]
    fn test_second_submit_while_in_flight_refused() {
        let mut form = CounterForm::new("Alice");
        assert!(form.begin_submit().is_some());
        assert!(!form.can_submit());
        assert_eq!(form.begin_submit(), None);
        assert!(form.is_submitting());
    }

    #[test]
    fn test_complete_success() {
        let mut form = CounterForm::new("Alice");
        form.begin_submit();
        form.complete(Ok(count(CountRequest { name: "Alice".into() }, "pod")));
        assert_eq!(form.result().map(|r| r.char_count), Some(5));
        assert_eq!(form.error(), None);
        assert!(form.can_submit());
    }

    #[test]
    fn test_complete_error_hides_cause() {
        let mut form = CounterForm::new("Alice");
        form.begin_submit();
        form.complete(Err(ClientError::Status(503)));
        assert_eq!(form.error(), Some(CONNECTION_ERROR));
        assert!(form.result().is_none());
    }

    #[test]
    fn test_complete_ignored_when_idle() {
        let mut form = CounterForm::new("Alice");
        form.complete(Err(ClientError::Status(500)));
        assert_eq!(form.state(), &FormState::Idle);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut form = CounterForm::new("Alice");
        form.begin_submit();
        form.complete(Err(ClientError::Status(500)));
        form.reset();
        assert_eq!(form.input(), "");
        assert_eq!(form.state(), &FormState::Idle);
    }

    #[tokio::test]
    async fn test_submit_calls_backend_once() {
        let backend = FakeBackend::new(false);
        let mut form = CounterForm::new(" Bob ");
        form.submit(&backend).await;
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
        let result = form.result().unwrap();
        assert_eq!(result.name, "Bob");
        assert_eq!(result.char_count, 3);
    }

    #[tokio::test]
    async fn test_submit_empty_never_calls_backend() {
        let backend = FakeBackend::new(false);
        let mut form = CounterForm::new("");
        form.submit(&backend).await;
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
        assert_eq!(form.state(), &FormState::Idle);
    }

    #[tokio::test]
    async fn test_submit_failure() {
        let backend = FakeBackend::new(true);
        let mut form = CounterForm::new("Bob");
        form.submit(&backend).await;
        assert_eq!(form.error(), Some(CONNECTION_ERROR));
    }
}
