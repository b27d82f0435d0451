use crate::contexts::{ExtractionRequest, PageContext, decode_response, respond};
use crate::error::ChannelError;
use crate::results::ExtractionResult;
use fantoccini::{Client, ClientBuilder};
use url::Url;

/// Installs the page-side text accessor
const INSTALL_SCRIPT: &str = r#"
window.__jobScoutPageText = function () {
    return document.body ? document.body.innerText : "";
};
return true;
"#;

/// Calls the accessor, or returns null when it is not installed
const REQUEST_SCRIPT: &str = r#"
if (typeof window.__jobScoutPageText !== "function") {
    return null;
}
return window.__jobScoutPageText();
"#;

/// Alternative WebDriver endpoints tried when the configured one is unreachable
const FALLBACK_WEBDRIVER_URLS: &[&str] = &[
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4444", // geckodriver / Selenium default
    "http://127.0.0.1:4444",
];

/// A browser tab driven over WebDriver.
///
/// The WebDriver session is opened lazily on injection and the tab is pointed at
/// the target page before the accessor is installed.
pub struct WebDriverContext {
    webdriver_url: String,
    target: Url,
    client: Option<Client>,
}

impl WebDriverContext {
    pub fn new(webdriver_url: impl Into<String>, target: Url) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
            target,
            client: None,
        }
    }

    /// Ends the WebDriver session if one was opened
    pub async fn close(self) {
        if let Some(client) = self.client {
            if let Err(e) = client.close().await {
                ::log::warn!("Failed to close WebDriver client: {}", e);
            }
        }
    }
}

impl PageContext for WebDriverContext {
    fn describe(&self) -> String {
        format!("tab {}", self.target)
    }

    async fn inject(&mut self) -> Result<(), ChannelError> {
        if self.client.is_none() {
            ::log::debug!("Connecting to WebDriver");
            self.client = Some(connect_to_webdriver(&self.webdriver_url).await?);
        }
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| ChannelError::Inject("no WebDriver session".to_string()))?;

        client
            .goto(self.target.as_str())
            .await
            .map_err(|e| ChannelError::Inject(format!("accessing {}: {}", self.target, e)))?;

        client
            .execute(INSTALL_SCRIPT, Vec::new())
            .await
            .map_err(|e| ChannelError::Inject(format!("installing accessor: {}", e)))?;

        ::log::debug!("Installed extraction accessor into {}", self.target);
        Ok(())
    }

    async fn request(
        &mut self,
        request: &ExtractionRequest,
    ) -> Result<ExtractionResult, ChannelError> {
        let client = self.client.as_ref().ok_or(ChannelError::NoResponse)?;

        let answer = client
            .execute(REQUEST_SCRIPT, Vec::new())
            .await
            .map_err(|e| {
                if e.to_string().contains("Unable to find session") {
                    ChannelError::Message(format!("lost session while reading {}", self.target))
                } else {
                    ChannelError::Message(e.to_string())
                }
            })?;

        match answer {
            serde_json::Value::String(page_text) => decode_response(respond(request, &page_text)),
            serde_json::Value::Null => Err(ChannelError::NoResponse),
            other => Err(ChannelError::Decode(format!(
                "expected page text, got {}",
                other
            ))),
        }
    }
}

/// Connects to the WebDriver instance, trying common alternatives if the configured one fails
async fn connect_to_webdriver(webdriver_url: &str) -> Result<Client, ChannelError> {
    let first_error = match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Ok(client);
        }
        Err(e) => {
            ::log::error!(
                "Failed to connect to WebDriver at {}: {}",
                webdriver_url,
                e
            );
            e.to_string()
        }
    };

    for url in FALLBACK_WEBDRIVER_URLS.iter() {
        if *url == webdriver_url {
            continue;
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = ClientBuilder::native().connect(url).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Ok(client);
        }
    }

    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    Err(ChannelError::Inject(format!(
        "no WebDriver server reachable at {}: {}",
        webdriver_url, first_error
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_request_without_session_gets_no_response() {
        let target = Url::parse("https://example.com/jobs/1").unwrap();
        let mut context = WebDriverContext::new("http://localhost:4444", target);
        assert_eq!(context.describe(), "tab https://example.com/jobs/1");
        assert!(matches!(
            context.request(&ExtractionRequest::job_description()).await,
            Err(ChannelError::NoResponse)
        ));
    }
}
