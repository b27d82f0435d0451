pub mod backend;
pub mod config;
pub mod contexts;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod render;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use extract::extract;
pub use pipeline::{Pipeline, SharedPipeline};
pub use render::RenderedOutput;
pub use results::ExtractionResult;

use backend::HttpBackend;
use config::ScoutConfig;
use contexts::file::FileContext;
use contexts::web::WebDriverContext;
use error::{BackendError, ConfigError};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Where the job posting is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    /// A live page opened in a WebDriver-controlled browser
    Web(String),
    /// A page saved to disk
    File(PathBuf),
}

/// Failure to set up a run, before the pipeline takes over
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("invalid page URL {url:?}: {source}")]
    PageUrl {
        url: String,
        source: url::ParseError,
    },
}

/// Main builder for a single recommendation run
pub struct Scout {
    source: PageSource,
    config: ScoutConfig,
}

impl Scout {
    /// Create a new Scout for the given page source with default configuration
    pub fn new(source: PageSource) -> Self {
        Self {
            source,
            config: ScoutConfig::default(),
        }
    }

    /// Set the configuration
    pub fn with_config(mut self, config: ScoutConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the pipeline once and return what it rendered.
    ///
    /// Only setup problems (bad configuration, bad page URL) are errors; every
    /// failure inside the pipeline is already part of the rendered output.
    pub async fn run(self) -> Result<RenderedOutput, SetupError> {
        self.config.validate()?;
        let backend = HttpBackend::new(
            &self.config.backend_url,
            self.config.request_timeout_secs.map(Duration::from_secs),
        )?;
        ::log::info!("Using backend endpoint {}", backend.endpoint());

        match self.source {
            PageSource::Web(url_str) => {
                let target = Url::parse(&url_str).map_err(|source| SetupError::PageUrl {
                    url: url_str.clone(),
                    source,
                })?;
                let context = WebDriverContext::new(&self.config.webdriver_url, target);
                let mut pipeline = Pipeline::new(context, backend).with_format(self.config.format);
                let output = pipeline.run().await;

                let (context, _) = pipeline.into_parts();
                context.close().await;
                Ok(output)
            }
            PageSource::File(path) => {
                let context = FileContext::new(path);
                let mut pipeline = Pipeline::new(context, backend).with_format(self.config.format);
                Ok(pipeline.run().await)
            }
        }
    }
}
