pub mod file;
pub mod web;

use crate::error::ChannelError;
use crate::extract;
use crate::results::ExtractionResult;
use serde::{Deserialize, Serialize};

/// Action name understood by the page side
pub const GET_JOB_DESCRIPTION: &str = "getJobDescription";

/// Message sent into a page context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRequest {
    pub action: String,
}

impl ExtractionRequest {
    /// The request for the job and company sections of the page
    pub fn job_description() -> Self {
        Self {
            action: GET_JOB_DESCRIPTION.to_string(),
        }
    }
}

/// Handle to the page the user is looking at.
///
/// A context is handed to the pipeline explicitly; the pipeline never looks one up.
#[allow(async_fn_in_trait)]
pub trait PageContext {
    /// Short description of the page for logs
    fn describe(&self) -> String;

    /// Install the extraction capability into the page
    async fn inject(&mut self) -> Result<(), ChannelError>;

    /// Deliver a request and wait for its single response
    async fn request(
        &mut self,
        request: &ExtractionRequest,
    ) -> Result<ExtractionResult, ChannelError>;
}

/// Page-side message handler.
///
/// Answers `getJobDescription` with the extracted fields and ignores every other
/// action, which the sender observes as a missing response.
pub fn respond(request: &ExtractionRequest, page_text: &str) -> Option<serde_json::Value> {
    if request.action != GET_JOB_DESCRIPTION {
        ::log::debug!("Ignoring unknown action: {}", request.action);
        return None;
    }

    ::log::debug!("Received extraction request");
    let result = extract::extract(page_text);
    ::log::debug!(
        "Extracted job: {}",
        crate::utils::preview(&result.job, crate::utils::LOG_PREVIEW_CHARS)
    );
    ::log::debug!(
        "Extracted company: {}",
        crate::utils::preview(&result.company, crate::utils::LOG_PREVIEW_CHARS)
    );

    serde_json::to_value(result).ok()
}

/// Decodes the page side's answer into an extraction result
pub fn decode_response(
    response: Option<serde_json::Value>,
) -> Result<ExtractionResult, ChannelError> {
    let value = response.ok_or(ChannelError::NoResponse)?;
    serde_json::from_value(value).map_err(|e| ChannelError::Decode(e.to_string()))
}
