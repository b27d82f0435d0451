use crate::backend::Backend;
use crate::contexts::{ExtractionRequest, PageContext};
use crate::render::{self, RenderFormat, RenderedOutput};
use crate::results::{BackendOutcome, ExtractionOutcome, Prompt};
use crate::utils;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shown when the page context could not be reached or did not answer
pub const CHANNEL_ERROR_MESSAGE: &str = "❌ Could not extract job description.";

/// Shown when the page answered but had no job section
pub const EMPTY_EXTRACTION_MESSAGE: &str = "⚠️ No job info found on this page.";

/// Shown for any transport or decoding failure talking to the backend
pub const SERVER_ERROR_MESSAGE: &str = "❌ Server error.";

/// Where an invocation currently is, or where it stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Injecting,
    AwaitingExtraction,
    ExtractionChannelError,
    ExtractionEmpty,
    BuildingPrompt,
    CallingBackend,
    BackendError,
    Rendering,
}

impl Stage {
    /// Whether the invocation has finished in this stage
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Stage::ExtractionChannelError
                | Stage::ExtractionEmpty
                | Stage::BackendError
                | Stage::Rendering
        )
    }
}

/// Runs extraction, the backend call and rendering for one page.
///
/// Every stage failure is turned into a user-facing message here; `run` never
/// returns an error.
pub struct Pipeline<C, B> {
    context: C,
    backend: B,
    format: RenderFormat,
    stage: Stage,
}

impl<C: PageContext, B: Backend> Pipeline<C, B> {
    /// Create a pipeline for the given page context and backend
    pub fn new(context: C, backend: B) -> Self {
        Self {
            context,
            backend,
            format: RenderFormat::default(),
            stage: Stage::Idle,
        }
    }

    /// Set the format recommendations are rendered in
    pub fn with_format(mut self, format: RenderFormat) -> Self {
        self.format = format;
        self
    }

    /// Stage reached by the most recent invocation
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Give back the context and backend, e.g. to close a browser session
    pub fn into_parts(self) -> (C, B) {
        (self.context, self.backend)
    }

    /// Runs one invocation from injection to rendered output
    pub async fn run(&mut self) -> RenderedOutput {
        let output = self.run_stages().await;
        debug_assert!(
            self.stage.is_terminal(),
            "pipeline stopped in non-terminal stage {:?}",
            self.stage
        );
        output
    }

    async fn run_stages(&mut self) -> RenderedOutput {
        self.enter(Stage::Idle);
        ::log::info!("Starting pipeline for {}", self.context.describe());

        let extraction = match self.extract().await {
            ExtractionOutcome::ChannelError(e) => {
                ::log::error!("Messaging failed: {}", e);
                self.enter(Stage::ExtractionChannelError);
                return RenderedOutput::Message(CHANNEL_ERROR_MESSAGE.to_string());
            }
            ExtractionOutcome::Empty => {
                ::log::warn!("No job info found on {}", self.context.describe());
                self.enter(Stage::ExtractionEmpty);
                return RenderedOutput::Message(EMPTY_EXTRACTION_MESSAGE.to_string());
            }
            ExtractionOutcome::Success(extraction) => extraction,
        };

        self.enter(Stage::BuildingPrompt);
        let prompt = Prompt::from_extraction(&extraction);

        self.enter(Stage::CallingBackend);
        match self.call_backend(&prompt).await {
            BackendOutcome::TransportError(e) => {
                ::log::error!("Backend call failed: {}", e);
                self.enter(Stage::BackendError);
                RenderedOutput::Message(SERVER_ERROR_MESSAGE.to_string())
            }
            BackendOutcome::Explicit(message) => {
                ::log::warn!("Backend reported an error: {}", message);
                self.enter(Stage::Rendering);
                RenderedOutput::Message(message)
            }
            BackendOutcome::Categories(categories) => {
                self.enter(Stage::Rendering);
                render::render(&categories, self.format)
            }
        }
    }

    async fn extract(&mut self) -> ExtractionOutcome {
        self.enter(Stage::Injecting);
        if let Err(e) = self.context.inject().await {
            return ExtractionOutcome::ChannelError(e);
        }

        self.enter(Stage::AwaitingExtraction);
        let request = ExtractionRequest::job_description();
        match self.context.request(&request).await {
            Err(e) => ExtractionOutcome::ChannelError(e),
            Ok(extraction) if extraction.job.is_empty() => ExtractionOutcome::Empty,
            Ok(extraction) => {
                ::log::info!("Got job info ({} chars)", extraction.job.chars().count());
                ::log::debug!(
                    "Job preview: {}",
                    utils::preview(&extraction.job, utils::LOG_PREVIEW_CHARS)
                );
                ExtractionOutcome::Success(extraction)
            }
        }
    }

    async fn call_backend(&self, prompt: &Prompt) -> BackendOutcome {
        match self.backend.generate(prompt).await {
            Ok(response) => BackendOutcome::from(response),
            Err(e) => BackendOutcome::TransportError(e),
        }
    }

    fn enter(&mut self, stage: Stage) {
        ::log::debug!("Pipeline stage: {:?} -> {:?}", self.stage, stage);
        self.stage = stage;
    }
}

/// A pipeline that can be triggered from several places.
///
/// Overlapping triggers do not cancel each other; they queue on a fair lock and
/// run one after another in arrival order, each producing its own output.
pub struct SharedPipeline<C, B> {
    inner: Arc<Mutex<Pipeline<C, B>>>,
}

impl<C, B> Clone for SharedPipeline<C, B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: PageContext, B: Backend> SharedPipeline<C, B> {
    pub fn new(pipeline: Pipeline<C, B>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pipeline)),
        }
    }

    /// Waits for any in-flight invocation to finish, then runs a new one
    pub async fn trigger(&self) -> RenderedOutput {
        let mut pipeline = self.inner.lock().await;
        pipeline.run().await
    }
}
