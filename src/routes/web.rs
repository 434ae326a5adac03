//! Handlers for the counter form.
//!
//! The page is rendered server-side. Submissions go through [`CounterForm`],
//! which calls the counting service over HTTP and records the outcome.

use axum::{extract::State, response::Html, Form};
use serde::Deserialize;
use tracing::instrument;

use crate::error::AppError;
use crate::form::CounterForm;
use crate::state::AppState;

/// Which button submitted the form
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormAction {
    #[default]
    Count,
    Reset,
}

/// Form data posted to `/`
#[derive(Debug, Deserialize)]
pub struct CounterSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub action: FormAction,
}

/// Empty form.
#[instrument(name = "web::index", skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render(&state, &CounterForm::default())
}

/// Count or reset, then render the resulting state.
#[instrument(name = "web::submit", skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    Form(submission): Form<CounterSubmission>,
) -> Result<Html<String>, AppError> {
    tracing::debug!(action = ?submission.action, "Form submitted");
    let mut form = CounterForm::new(submission.name);
    match submission.action {
        FormAction::Reset => form.reset(),
        FormAction::Count => form.submit(state.backend.as_ref()).await,
    }
    render(&state, &form)
}

fn render(state: &AppState, form: &CounterForm) -> Result<Html<String>, AppError> {
    let mut context = tera::Context::new();
    context.insert("config", &state.config.ui);
    context.insert("input", form.input());
    context.insert("can_submit", &form.can_submit());
    context.insert("result", &form.result());
    context.insert("error", &form.error());

    let html = state.tera.render("index.html", &context)?;
    Ok(Html(html))
}
