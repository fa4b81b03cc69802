//! Submission route handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::Result;
use crate::forms::{self, Submission, SubmittedRow};
use crate::sheets::SheetStore;
use crate::state::AppState;

/// Run the pipeline for one form submission.
///
/// The body is the tagged submission JSON; the response is the row that was
/// written, for the confirmation display. Validation and derivation
/// failures come back as 422 with a message naming the fields.
#[instrument(skip(state, submission), fields(form = ?submission.form_type()))]
pub async fn submit<S: SheetStore>(
    State(state): State<AppState<S>>,
    Json(submission): Json<Submission>,
) -> Result<Json<SubmittedRow>> {
    let row = forms::submit(state.reference(), state.sheets(), &submission).await?;
    Ok(Json(row))
}
