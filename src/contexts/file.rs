use crate::contexts::{ExtractionRequest, PageContext, decode_response, respond};
use crate::error::ChannelError;
use crate::extract::PageFormat;
use crate::results::ExtractionResult;
use std::path::PathBuf;

/// A page saved to disk, as text or HTML
pub struct FileContext {
    path: PathBuf,
    format: PageFormat,
    page_text: Option<String>,
}

impl FileContext {
    /// Create a context for the page at `path`, picking the format from its extension
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = PageFormat::from_path(&path);
        Self {
            path,
            format,
            page_text: None,
        }
    }
}

impl PageContext for FileContext {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    async fn inject(&mut self) -> Result<(), ChannelError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ChannelError::Inject(format!("{}: {}", self.path.display(), e)))?;

        self.page_text = Some(self.format.visible_text(&content));
        ::log::debug!("Loaded {} ({:?})", self.path.display(), self.format);
        Ok(())
    }

    async fn request(
        &mut self,
        request: &ExtractionRequest,
    ) -> Result<ExtractionResult, ChannelError> {
        let page_text = self.page_text.as_deref().ok_or(ChannelError::NoResponse)?;
        decode_response(respond(request, page_text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_page(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("job-scout-{}-{}", std::process::id(), name));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_text_page_round_trip() {
        let path = write_page("posting.txt", "About the job\nShip it\n\nAbout the company\nAcme\n\nFooter");
        let mut context = FileContext::new(&path);

        context.inject().await.unwrap();
        let result = context
            .request(&ExtractionRequest::job_description())
            .await
            .unwrap();
        assert_eq!(result.company, "Acme");
        assert!(result.job.starts_with("Ship it"));

        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn test_html_page_is_flattened() {
        let path = write_page(
            "posting.html",
            "<html><body><h2>About the job</h2><div>Ship it</div></body></html>",
        );
        let mut context = FileContext::new(&path);

        context.inject().await.unwrap();
        let result = context
            .request(&ExtractionRequest::job_description())
            .await
            .unwrap();
        assert_eq!(result.job, "Ship it");

        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_fails_injection() {
        let mut context = FileContext::new("/definitely/not/here.txt");
        assert!(matches!(
            context.inject().await,
            Err(ChannelError::Inject(_))
        ));
    }

    #[tokio::test]
    async fn test_request_before_injection_gets_no_response() {
        let mut context = FileContext::new("unused.txt");
        assert!(matches!(
            context.request(&ExtractionRequest::job_description()).await,
            Err(ChannelError::NoResponse)
        ));
    }
}
