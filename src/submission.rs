//! Accepting external submissions for published forms

use chrono::Utc;

use crate::error::SubmitError;
use crate::repository::FormRepository;
use crate::state::{validate_submission, NewResponse, ResponseData, ResponseMetadata};

/// Validates submissions against the stored form and forwards them to the repository
pub struct SubmissionHandler<R> {
    repository: R,
}

impl<R: FormRepository> SubmissionHandler<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Store a submission and return the new response id.
    ///
    /// Unpublished and expired forms are closed to submissions; the owner can
    /// still read them through the repository.
    pub async fn submit(
        &self,
        form_id: &str,
        data: ResponseData,
        metadata: ResponseMetadata,
    ) -> Result<String, SubmitError> {
        let form = self.repository.get(form_id).await?;

        let now = Utc::now();
        if !form.is_published {
            tracing::warn!(form_id = %form_id, "Submission to unpublished form");
            return Err(SubmitError::Closed("form is not published".to_string()));
        }
        if form.is_expired(now) {
            tracing::warn!(form_id = %form_id, "Submission to expired form");
            return Err(SubmitError::Closed("form has expired".to_string()));
        }

        if let Err(e) = validate_submission(&form, &data) {
            tracing::warn!(form_id = %form_id, error = %e, "Rejected submission");
            return Err(e.into());
        }

        let id = self
            .repository
            .create_response(form_id, NewResponse { data, metadata })
            .await?;
        tracing::info!(form_id = %form_id, response_id = %id, "Accepted submission");
        Ok(id)
    }
}
