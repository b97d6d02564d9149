//! Data structures for a single translate action
//!
//! `TranslationRequest` is what the widget sends, `MyMemoryResponse` is what
//! the API answers, and `TranslationResult` is what ends up in the target field.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One translate action's input. Built fresh per activation and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    /// Source text, already trimmed and guaranteed non-empty
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
}

impl TranslationRequest {
    /// Build a request, returning `None` when the trimmed text is empty.
    pub fn new(text: &str, source_lang: &str, target_lang: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
        })
    }

    /// The `langpair` query value: `src|dst`
    pub fn langpair(&self) -> String {
        format!("{}|{}", self.source_lang, self.target_lang)
    }
}

/// Body of a MyMemory `get` response.
///
/// Only the fields the widget reads are modelled. MyMemory is loose with
/// types here: `responseStatus` arrives as a number or a string, match ids
/// as numbers or strings, and `matches` may be `""` on errors.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyMemoryResponse {
    pub response_data: ResponseData,
    #[serde(default)]
    pub response_status: Option<Value>,
    #[serde(default)]
    pub response_details: Option<Value>,
    #[serde(default, deserialize_with = "lenient_matches")]
    pub matches: Vec<MatchEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseData {
    #[serde(default)]
    pub translated_text: Option<String>,
}

/// Alternative translation candidate returned alongside the bulk translation
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatchEntry {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub translation: String,
}

impl MatchEntry {
    /// Numeric id 0 only; the string `"0"` does not count.
    pub fn is_primary(&self) -> bool {
        self.id.as_f64() == Some(0.0)
    }
}

fn lenient_matches<'de, D>(deserializer: D) -> Result<Vec<MatchEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

impl MyMemoryResponse {
    /// `responseStatus` as a number, accepting both `200` and `"200"`
    pub fn status_code(&self) -> Option<u64> {
        match self.response_status.as_ref()? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Human-readable failure detail, falling back to the translated text
    /// which MyMemory uses to carry quota warnings.
    pub fn details(&self) -> String {
        match &self.response_details {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => self.response_data.translated_text.clone().unwrap_or_default(),
        }
    }
}

/// What the target field shows after a successful translate
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslationResult {
    pub translated_text: String,
}

impl TranslationResult {
    /// Start from the bulk translation, then let every id-0 match override it
    /// in array order, so the last id-0 match wins.
    pub fn from_response(response: &MyMemoryResponse) -> Self {
        let mut translated_text = response
            .response_data
            .translated_text
            .clone()
            .unwrap_or_default();
        for entry in &response.matches {
            if entry.is_primary() {
                translated_text = entry.translation.clone();
            }
        }
        Self { translated_text }
    }
}
