//! Mock Machine Translator for testing
//!
//! A deterministic, network-free translator. It also records every call so
//! tests can assert that a request was (or was not) issued.
//!
//! # Example
//!
//! ```ignore
//! use translator_widget::mt::{MachineTranslator, MockTranslator, MockMode};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockTranslator::new(MockMode::Suffix);
//!     let result = mock.translate("hello", "en-GB", "fr-FR").await.unwrap();
//!     assert_eq!(result, "hello_fr-FR");
//! }
//! ```

use crate::mt::error::{MtError, MtResult};
use crate::mt::translator::MachineTranslator;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Mock translation modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append target suffix: "hello" → "hello_fr-FR"
    Suffix,

    /// Predefined mappings: (text, target_locale) → translation.
    /// Unknown pairs fall back to `Suffix`.
    Mappings(HashMap<(String, String), String>),

    /// Fail every call with the given error
    Error(MtError),

    /// Return input unchanged
    NoOp,
}

/// One recorded `translate` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    pub text: String,
    pub source_locale: String,
    pub target_locale: String,
}

/// Mock translator that simulates various translation scenarios
#[derive(Debug)]
pub struct MockTranslator {
    mode: MockMode,
    /// Simulated network delay applied to every call (in milliseconds)
    delay_ms: u64,
    /// Extra per-text delays, for reordering responses in tests
    text_delays: HashMap<String, u64>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockTranslator {
    /// Create a new MockTranslator with the given mode
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            delay_ms: 0,
            text_delays: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a MockTranslator with simulated network delay
    ///
    /// ```ignore
    /// let mock = MockTranslator::with_delay(MockMode::Suffix, 50);
    /// // Each translation will take ~50ms
    /// ```
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self {
            delay_ms,
            ..Self::new(mode)
        }
    }

    /// Delay only calls whose text equals `text`
    pub fn with_text_delay(mut self, text: &str, delay_ms: u64) -> Self {
        self.text_delays.insert(text.to_string(), delay_ms);
        self
    }

    /// All calls seen so far, in order
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }

    async fn apply_delay(&self, text: &str) {
        let delay = self.delay_ms + self.text_delays.get(text).copied().unwrap_or(0);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
    }

    fn apply_translation(&self, text: &str, target: &str) -> MtResult<String> {
        match &self.mode {
            MockMode::Suffix => Ok(format!("{}_{}", text, target)),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target.to_string());
                Ok(map
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| format!("{}_{}", text, target)))
            }
            MockMode::Error(err) => Err(err.clone()),
            MockMode::NoOp => Ok(text.to_string()),
        }
    }
}

#[async_trait]
impl MachineTranslator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(MockCall {
                text: text.to_string(),
                source_locale: source_locale.to_string(),
                target_locale: target_locale.to_string(),
            });
        }

        self.apply_delay(text).await;
        self.apply_translation(text, target_locale)
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_suffix_translation() {
        let mock = MockTranslator::new(MockMode::Suffix);
        assert_eq!(
            mock.translate("hello", "en-GB", "fr-FR").await.unwrap(),
            "hello_fr-FR"
        );
        assert_eq!(
            mock.translate("hello", "en-GB", "de-DE").await.unwrap(),
            "hello_de-DE"
        );
    }

    #[tokio::test]
    async fn test_mapping_and_fallback() {
        let mut map = HashMap::new();
        map.insert(
            ("Hello".to_string(), "de-DE".to_string()),
            "Hallo".to_string(),
        );
        let mock = MockTranslator::new(MockMode::Mappings(map));

        assert_eq!(mock.translate("Hello", "en-GB", "de-DE").await.unwrap(), "Hallo");
        assert_eq!(
            mock.translate("unknown", "en-GB", "de-DE").await.unwrap(),
            "unknown_de-DE"
        );
    }

    #[tokio::test]
    async fn test_error_mode_returns_error() {
        let err = MtError::NetworkError("connection refused".to_string());
        let mock = MockTranslator::new(MockMode::Error(err.clone()));
        assert_eq!(mock.translate("hello", "en-GB", "fr-FR").await, Err(err));
    }

    #[tokio::test]
    async fn test_noop_returns_unchanged() {
        let mock = MockTranslator::new(MockMode::NoOp);
        assert_eq!(
            mock.translate("Hello world", "en-GB", "fr-FR").await.unwrap(),
            "Hello world"
        );
    }

    #[tokio::test]
    async fn test_calls_are_recorded() {
        let mock = MockTranslator::new(MockMode::Suffix);
        assert_eq!(mock.call_count(), 0);

        mock.translate("one", "en-GB", "de-DE").await.unwrap();
        mock.translate("two", "de-DE", "en-GB").await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].text, "one");
        assert_eq!(calls[1].source_locale, "de-DE");
        assert_eq!(calls[1].target_locale, "en-GB");
    }

    #[tokio::test]
    async fn test_delay_adds_latency() {
        let mock = MockTranslator::with_delay(MockMode::Suffix, 50);
        let start = std::time::Instant::now();
        mock.translate("hello", "en-GB", "fr-FR").await.unwrap();
        assert!(start.elapsed().as_millis() >= 50);
    }

    #[tokio::test]
    async fn test_text_delay_only_applies_to_matching_text() {
        let mock = MockTranslator::new(MockMode::Suffix).with_text_delay("slow", 50);

        let start = std::time::Instant::now();
        mock.translate("slow", "en-GB", "fr-FR").await.unwrap();
        assert!(start.elapsed().as_millis() >= 50);
    }

    #[test]
    fn test_provider_name() {
        let mock = MockTranslator::new(MockMode::Suffix);
        assert_eq!(mock.provider_name(), "Mock Translator");
    }
}
