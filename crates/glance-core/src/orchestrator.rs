//! Request orchestration: validate, dispatch, carry the result back.
//!
//! Each call to [`Orchestrator::submit`] is one pass through
//!
//! ```text
//! Idle → Validating ─┬─→ Rejected
//!                    └─→ Dispatching → Completed
//! ```
//!
//! Nothing survives between passes. This is the only place inputs are
//! validated; the inference client trusts the request it is given.

use crate::error::ValidationFailure;
use crate::inference::InferenceClient;
use crate::ingest::UploadedImage;
use crate::types::{AnalysisRequest, AnalysisResult};

/// Phase of a single submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Validating,
    Dispatching,
    Rejected,
    Completed,
}

impl SubmitState {
    /// Whether `next` is a legal transition from this state.
    pub fn can_advance_to(self, next: SubmitState) -> bool {
        use SubmitState::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Rejected)
                | (Validating, Dispatching)
                | (Dispatching, Completed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, SubmitState::Rejected | SubmitState::Completed)
    }
}

/// Tracks one submission through its states.
#[derive(Debug)]
struct Submission {
    state: SubmitState,
}

impl Submission {
    fn new() -> Self {
        Self {
            state: SubmitState::Idle,
        }
    }

    fn advance(&mut self, next: SubmitState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "illegal transition {:?} -> {next:?}",
            self.state
        );
        tracing::trace!("Submission {:?} -> {next:?}", self.state);
        self.state = next;
    }
}

/// Check both preconditions, image first.
fn validate<'a>(
    image: Option<&'a UploadedImage>,
    question: &str,
) -> Result<AnalysisRequest<'a>, ValidationFailure> {
    let image = image.ok_or(ValidationFailure::ImageMissing)?;
    let question = question.trim();
    if question.is_empty() {
        return Err(ValidationFailure::QuestionMissing);
    }
    Ok(AnalysisRequest::new(question.to_string(), image))
}

/// Sequences validation, inference, and result mapping.
///
/// Holds only the read-only inference client. Callers must not run two
/// submissions at once; the presentation layer blocks input while one is in
/// flight.
pub struct Orchestrator {
    client: InferenceClient,
}

impl Orchestrator {
    pub fn new(client: InferenceClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &InferenceClient {
        &self.client
    }

    /// Run one analysis action.
    ///
    /// `image` is `None` when nothing has been uploaded. Returns the
    /// rejection reason if a precondition fails; otherwise the remote outcome,
    /// success or failure, unchanged.
    pub async fn submit(
        &self,
        image: Option<&UploadedImage>,
        question: &str,
    ) -> Result<AnalysisResult, ValidationFailure> {
        let mut submission = Submission::new();
        submission.advance(SubmitState::Validating);

        let request = match validate(image, question) {
            Ok(request) => request,
            Err(failure) => {
                submission.advance(SubmitState::Rejected);
                tracing::debug!("Submission rejected: {failure:?}");
                return Err(failure);
            }
        };

        submission.advance(SubmitState::Dispatching);
        let result = self.client.analyze(&request).await;
        submission.advance(SubmitState::Completed);

        Ok(result)
    }
}
