use crate::error::BackendError;
use crate::results::{Prompt, RecommendationResponse};
use crate::utils;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// The recommendation service, JSON in and JSON out
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// Send one prompt and decode the reply
    async fn generate(&self, prompt: &Prompt) -> Result<RecommendationResponse, BackendError>;
}

/// Backend reached over HTTP at `POST {base}/generate`
pub struct HttpBackend {
    client: Client,
    endpoint: Url,
}

impl HttpBackend {
    /// Create a backend client for the service at `base_url`.
    ///
    /// With `timeout` unset the request waits as long as the transport does.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, BackendError> {
        let endpoint =
            utils::generate_endpoint(base_url).map_err(|source| BackendError::Endpoint {
                base: base_url.to_string(),
                source,
            })?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|source| BackendError::Transport {
                url: endpoint.to_string(),
                source,
            })?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Backend for HttpBackend {
    async fn generate(&self, prompt: &Prompt) -> Result<RecommendationResponse, BackendError> {
        let url = self.endpoint.to_string();
        ::log::debug!("POST {}", url);

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(prompt)
            .send()
            .await
            .map_err(|source| BackendError::Transport {
                url: url.clone(),
                source,
            })?;

        // Explicit errors come back as JSON bodies on 4xx, so the status is only logged.
        let status = response.status();
        ::log::debug!("Backend answered with HTTP {}", status);

        let body = response
            .bytes()
            .await
            .map_err(|source| BackendError::Transport {
                url: url.clone(),
                source,
            })?;

        serde_json::from_slice(&body).map_err(|source| BackendError::Decode { url, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::ExtractionResult;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn prompt() -> Prompt {
        Prompt::from_extraction(&ExtractionResult::new("Build cool stuff.", "Acme Inc."))
    }

    #[tokio::test]
    async fn test_generate_posts_prompt_as_json() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/generate"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({
                "prompt": "Job Description:\nBuild cool stuff.\n\nAbout the Company:\nAcme Inc."
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "student_teams": [{ "name": "Club A", "url": "http://x", "reason": "match" }],
                "hackathons": [],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let backend = HttpBackend::new(&server.uri(), None).unwrap();
        let response = backend.generate(&prompt()).await.unwrap();

        let teams = response.student_teams.unwrap();
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].name, "Club A");
        assert_eq!(response.hackathons, Some(Vec::new()));
        assert_eq!(response.courses, None);
    }

    #[tokio::test]
    async fn test_error_status_body_is_still_decoded() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "No job description provided"
            })))
            .mount(&server)
            .await;

        let backend = HttpBackend::new(&server.uri(), None).unwrap();
        let response = backend.generate(&prompt()).await.unwrap();
        assert_eq!(
            response.error.as_deref(),
            Some("No job description provided")
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<h1>Internal Server Error</h1>"))
            .mount(&server)
            .await;

        let backend = HttpBackend::new(&server.uri(), None).unwrap();
        let err = backend.generate(&prompt()).await.unwrap_err();
        assert!(matches!(err, BackendError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_slow_reply_without_timeout_still_decodes() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "courses": [{ "name": "Rust 101" }] }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let config = crate::config::ScoutConfig::default();
        assert_eq!(config.request_timeout_secs, None);

        let backend =
            HttpBackend::new(&server.uri(), config.request_timeout_secs.map(Duration::from_secs))
                .unwrap();
        let response = backend.generate(&prompt()).await.unwrap();
        assert_eq!(response.courses.unwrap()[0].name, "Rust 101");
    }

    #[tokio::test]
    async fn test_configured_timeout_is_a_transport_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let backend =
            HttpBackend::new(&server.uri(), Some(Duration::from_millis(200))).unwrap();
        let err = backend.generate(&prompt()).await.unwrap_err();
        assert!(matches!(err, BackendError::Transport { .. }));
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpBackend::new("::not-a-url::", None)
            .err()
            .unwrap();
        assert!(matches!(err, BackendError::Endpoint { .. }));
    }
}
