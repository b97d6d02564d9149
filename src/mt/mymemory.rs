//! MyMemory API provider for machine translation
//!
//! MyMemory exposes a single unauthenticated GET endpoint:
//!
//! ```text
//! https://api.mymemory.translated.net/get?q=<text>&langpair=<src>|<dst>
//! ```
//!
//! An optional `de=<email>` parameter raises the anonymous daily quota.
//!
//! # Example
//!
//! ```ignore
//! use translator_widget::{Config, mt::{MachineTranslator, MyMemoryProvider}};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = MyMemoryProvider::new(&Config::from_env()?)?;
//!     let result = provider.translate("Good morning", "en-GB", "de-DE").await?;
//!     println!("{}", result);
//!     Ok(())
//! }
//! ```

use crate::config::Config;
use crate::mt::data::{MyMemoryResponse, TranslationRequest, TranslationResult};
use crate::mt::error::{MtError, MtResult};
use crate::mt::translator::{MachineTranslator, validate_locale};
use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, info};

/// MyMemory translation provider
#[derive(Clone)]
pub struct MyMemoryProvider {
    /// HTTP client for async requests
    client: reqwest::Client,
    /// `get` endpoint
    endpoint: String,
    /// Optional contact e-mail sent as `de`
    email: Option<String>,
}

impl MyMemoryProvider {
    /// MyMemory rejects queries longer than 500 bytes
    const MAX_QUERY_BYTES: usize = 500;

    /// Create a provider from runtime configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New provider instance
    /// * `Err(MtError)` - If the endpoint is not a URL or the HTTP client cannot be built
    pub fn new(config: &Config) -> MtResult<Self> {
        Url::parse(&config.endpoint).map_err(|e| {
            MtError::ConfigError(format!("Invalid endpoint '{}': {}", config.endpoint, e))
        })?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("translator-widget/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MtError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            email: config.email.clone(),
        })
    }

    #[cfg(test)]
    fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Build the request URL. Text and langpair are percent-encoded.
    pub fn request_url(&self, request: &TranslationRequest) -> MtResult<Url> {
        let langpair = request.langpair();
        let mut params: Vec<(&str, &str)> =
            vec![("q", request.text.as_str()), ("langpair", langpair.as_str())];
        if let Some(email) = self.email.as_deref() {
            params.push(("de", email));
        }
        Url::parse_with_params(&self.endpoint, &params)
            .map_err(|e| MtError::ConfigError(format!("Failed to build request URL: {}", e)))
    }

    /// Issue the GET and decode the body, without interpreting it
    pub async fn fetch(&self, request: &TranslationRequest) -> MtResult<MyMemoryResponse> {
        let url = self.request_url(request)?;
        debug!(langpair = %request.langpair(), "Sending MyMemory request");

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MtError::TranslationError(format!(
                "API error ({}): {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        let parsed: MyMemoryResponse = serde_json::from_str(&body)?;
        Ok(parsed)
    }
}

impl std::fmt::Debug for MyMemoryProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MyMemoryProvider")
            .field("endpoint", &self.endpoint)
            .field("email", &self.email.as_ref().map(|_| "***"))
            .finish()
    }
}

#[async_trait]
impl MachineTranslator for MyMemoryProvider {
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        validate_locale(source_locale)?;
        validate_locale(target_locale)?;

        let Some(request) = TranslationRequest::new(text, source_locale, target_locale) else {
            return Ok(String::new());
        };

        if request.text.len() > Self::MAX_QUERY_BYTES {
            return Err(MtError::TranslationError(format!(
                "Text exceeds maximum length of {} bytes",
                Self::MAX_QUERY_BYTES
            )));
        }

        let response = self.fetch(&request).await?;

        if let Some(status) = response.status_code() {
            if status != 200 {
                return Err(MtError::TranslationError(format!(
                    "MyMemory status {}: {}",
                    status,
                    response.details()
                )));
            }
        }

        let result = TranslationResult::from_response(&response);
        info!(
            langpair = %request.langpair(),
            matches = response.matches.len(),
            "Translation received"
        );
        Ok(result.translated_text)
    }

    fn provider_name(&self) -> &str {
        "MyMemory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn provider_for(endpoint: &str) -> MyMemoryProvider {
        let config = Config {
            endpoint: endpoint.to_string(),
            timeout: Duration::from_secs(5),
            ..Config::default()
        };
        // Loopback servers must not be routed through an ambient HTTP_PROXY
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .no_proxy()
            .build()
            .unwrap();
        MyMemoryProvider::new(&config).unwrap().with_client(client)
    }

    /// Serve exactly one HTTP response and hand back the request head
    async fn serve_once(status_line: &'static str, body: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            let reply = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\
                 Connection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&head).to_string()
        });
        (format!("http://{}/get", addr), handle)
    }

    // ========== Initialization Tests ==========

    #[test]
    fn test_new_with_default_config() {
        let provider = MyMemoryProvider::new(&Config::default()).unwrap();
        assert_eq!(provider.provider_name(), "MyMemory");
    }

    #[test]
    fn test_new_with_invalid_endpoint() {
        let config = Config {
            endpoint: "not a url".to_string(),
            ..Config::default()
        };
        match MyMemoryProvider::new(&config) {
            Err(MtError::ConfigError(msg)) => assert!(msg.contains("Invalid endpoint")),
            other => panic!("Expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_debug_masks_email() {
        let config = Config {
            email: Some("me@example.org".to_string()),
            ..Config::default()
        };
        let provider = MyMemoryProvider::new(&config).unwrap();
        let debug_str = format!("{:?}", provider);
        assert!(debug_str.contains("***"));
        assert!(!debug_str.contains("me@example.org"));
    }

    // ========== URL Tests ==========

    #[test]
    fn test_request_url_encodes_text_and_langpair() {
        let provider = MyMemoryProvider::new(&Config::default()).unwrap();
        let request = TranslationRequest::new("Fish & chips?", "en-GB", "de-DE").unwrap();
        let url = provider.request_url(&request).unwrap();

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "Fish & chips?".to_string()),
                ("langpair".to_string(), "en-GB|de-DE".to_string()),
            ]
        );
        let query = url.query().unwrap();
        assert!(query.contains("%7C"));
        assert!(!query.contains("& "));
        assert!(url.as_str().starts_with("https://api.mymemory.translated.net/get?"));
    }

    #[test]
    fn test_request_url_with_email() {
        let config = Config {
            email: Some("me@example.org".to_string()),
            ..Config::default()
        };
        let provider = MyMemoryProvider::new(&config).unwrap();
        let request = TranslationRequest::new("Hi", "en-GB", "fr-FR").unwrap();
        let url = provider.request_url(&request).unwrap();
        assert!(url.query_pairs().any(|(k, v)| k == "de" && v == "me@example.org"));
    }

    // ========== Validation Tests ==========

    #[tokio::test]
    async fn test_translate_blank_text_skips_request() {
        // Nothing listens on this port; a request would fail.
        let provider = provider_for("http://127.0.0.1:9/get");
        let result = provider.translate("   ", "en-GB", "de-DE").await.unwrap();
        assert_eq!(result, "");
    }

    #[tokio::test]
    async fn test_translate_invalid_langpair() {
        let provider = MyMemoryProvider::new(&Config::default()).unwrap();
        let result = provider.translate("hello", "en|xx", "de-DE").await;
        assert!(matches!(result, Err(MtError::InvalidLocale(_))));
    }

    #[tokio::test]
    async fn test_translate_text_too_long() {
        let provider = MyMemoryProvider::new(&Config::default()).unwrap();
        let long_text = "x".repeat(MyMemoryProvider::MAX_QUERY_BYTES + 1);
        match provider.translate(&long_text, "en-GB", "de-DE").await {
            Err(MtError::TranslationError(msg)) => assert!(msg.contains("exceeds maximum")),
            other => panic!("Expected TranslationError, got {:?}", other),
        }
    }

    // ========== Local Server Tests ==========

    #[tokio::test]
    async fn test_translate_prefers_primary_match() {
        let body = serde_json::json!({
            "responseData": {"translatedText": "Hallo"},
            "responseStatus": 200,
            "matches": [{"id": 0, "translation": "Guten Tag"}, {"id": 1, "translation": "Hi"}]
        })
        .to_string();
        let (endpoint, server) = serve_once("HTTP/1.1 200 OK", body).await;
        let provider = provider_for(&endpoint);

        let result = provider.translate("Good day", "en-GB", "de-DE").await.unwrap();
        assert_eq!(result, "Guten Tag");

        let head = server.await.unwrap();
        assert!(head.starts_with("GET /get?q=Good+day&langpair=en-GB%7Cde-DE"));
    }

    #[tokio::test]
    async fn test_translate_bulk_text() {
        let body = serde_json::json!({
            "responseData": {"translatedText": "Hallo"},
            "responseStatus": 200,
            "matches": [{"id": 1, "translation": "Hi"}]
        })
        .to_string();
        let (endpoint, _server) = serve_once("HTTP/1.1 200 OK", body).await;
        let provider = provider_for(&endpoint);

        let result = provider.translate("Hello", "en-GB", "de-DE").await.unwrap();
        assert_eq!(result, "Hallo");
    }

    #[tokio::test]
    async fn test_translate_reports_response_status() {
        let body = serde_json::json!({
            "responseData": {"translatedText": "MYMEMORY WARNING: QUOTA USED"},
            "responseStatus": 429,
            "matches": ""
        })
        .to_string();
        let (endpoint, _server) = serve_once("HTTP/1.1 200 OK", body).await;
        let provider = provider_for(&endpoint);

        match provider.translate("Hello", "en-GB", "de-DE").await {
            Err(MtError::TranslationError(msg)) => {
                assert!(msg.contains("429"));
                assert!(msg.contains("MYMEMORY WARNING"));
            }
            other => panic!("Expected TranslationError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_translate_http_error() {
        let (endpoint, _server) =
            serve_once("HTTP/1.1 503 Service Unavailable", "down".to_string()).await;
        let provider = provider_for(&endpoint);

        match provider.translate("Hello", "en-GB", "de-DE").await {
            Err(MtError::TranslationError(msg)) => assert!(msg.contains("503")),
            other => panic!("Expected TranslationError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_translate_malformed_body() {
        let (endpoint, _server) = serve_once("HTTP/1.1 200 OK", "<html>".to_string()).await;
        let provider = provider_for(&endpoint);

        let result = provider.translate("Hello", "en-GB", "de-DE").await;
        assert!(matches!(result, Err(MtError::MalformedResponse(_))));
    }

    // ========== Integration Tests (require network) ==========

    #[tokio::test]
    #[ignore] // Run with: cargo test -- --ignored
    async fn test_real_api_single_translation() {
        let provider = MyMemoryProvider::new(&Config::default()).unwrap();
        let result = provider.translate("Hello", "en-GB", "de-DE").await.unwrap();
        println!("Translation: Hello → {}", result);
        assert!(!result.is_empty());
    }
}
