//! Plain state types held by the widget

use crate::catalog::LanguageCatalog;
use crate::widget::error::{WidgetError, WidgetResult};

/// Target placeholder while idle
pub const PLACEHOLDER_IDLE: &str = "Translation";
/// Target placeholder while a request is in flight
pub const PLACEHOLDER_BUSY: &str = "Translating...";

/// A text area: its value and the placeholder shown when the value is empty
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextField {
    pub value: String,
    pub placeholder: String,
}

impl TextField {
    pub fn with_placeholder(placeholder: &str) -> Self {
        Self {
            value: String::new(),
            placeholder: placeholder.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageOption {
    pub code: &'static str,
    pub name: &'static str,
}

/// Dropdown of language codes with exactly one selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSelector {
    options: Vec<LanguageOption>,
    selected: String,
}

impl LanguageSelector {
    /// One option per catalog entry, in catalog order, with `default` selected.
    ///
    /// If `default` is not in the catalog the first option is selected, as a
    /// `<select>` without a `selected` option would.
    pub fn populate(catalog: &LanguageCatalog, default: &str) -> Self {
        let options: Vec<LanguageOption> = catalog
            .iter()
            .map(|(code, name)| LanguageOption { code, name })
            .collect();
        let selected = options
            .iter()
            .find(|o| o.code == default)
            .or_else(|| options.first())
            .map(|o| o.code.to_string())
            .unwrap_or_default();
        Self { options, selected }
    }

    pub fn options(&self) -> &[LanguageOption] {
        &self.options
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn selected_name(&self) -> Option<&'static str> {
        self.options
            .iter()
            .find(|o| o.code == self.selected)
            .map(|o| o.name)
    }

    pub fn select(&mut self, code: &str) -> WidgetResult<()> {
        if !self.options.iter().any(|o| o.code == code) {
            return Err(WidgetError::UnknownLanguage(code.to_string()));
        }
        self.selected = code.to_string();
        Ok(())
    }

    pub(crate) fn swap_selection(&mut self, other: &mut LanguageSelector) {
        std::mem::swap(&mut self.selected, &mut other.selected);
    }
}

/// Which half of the widget a control belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Source,
    Target,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::Source => "from",
            Side::Target => "to",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "from" | "source" | "src" => Some(Side::Source),
            "to" | "target" | "dst" => Some(Side::Target),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconAction {
    Copy,
    Speak,
}

/// An icon control, declared with what it does and which field it acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconBinding {
    pub action: IconAction,
    pub side: Side,
}

impl IconBinding {
    pub const fn new(action: IconAction, side: Side) -> Self {
        Self { action, side }
    }

    /// Speak and copy for each side, in on-screen order
    pub const fn standard() -> [IconBinding; 4] {
        [
            IconBinding::new(IconAction::Speak, Side::Source),
            IconBinding::new(IconAction::Copy, Side::Source),
            IconBinding::new(IconAction::Speak, Side::Target),
            IconBinding::new(IconAction::Copy, Side::Target),
        ]
    }
}

/// What a front-end needs to draw the widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSnapshot {
    pub source: TextField,
    pub target: TextField,
    pub source_lang: String,
    pub target_lang: String,
    /// Inline message from the last failed translate, cleared by the next one
    pub error: Option<String>,
    /// A translate request is in flight
    pub busy: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DEFAULT_SOURCE, DEFAULT_TARGET};

    const SMALL: &[(&str, &str)] = &[
        ("en-GB", "English"),
        ("fr-FR", "French"),
        ("de-DE", "German"),
    ];

    #[test]
    fn test_populate_preserves_catalog_order() {
        let selector = LanguageSelector::populate(&LanguageCatalog::from_static(SMALL), "de-DE");
        let codes: Vec<_> = selector.options().iter().map(|o| o.code).collect();
        assert_eq!(codes, vec!["en-GB", "fr-FR", "de-DE"]);
        assert_eq!(selector.selected(), "de-DE");
        assert_eq!(selector.selected_name(), Some("German"));
    }

    #[test]
    fn test_populate_missing_default_selects_first() {
        let selector = LanguageSelector::populate(&LanguageCatalog::from_static(SMALL), "ja-JP");
        assert_eq!(selector.selected(), "en-GB");
    }

    #[test]
    fn test_populate_empty_catalog() {
        let selector =
            LanguageSelector::populate(&LanguageCatalog::from_static(&[]), DEFAULT_SOURCE);
        assert!(selector.options().is_empty());
        assert_eq!(selector.selected(), "");
    }

    #[test]
    fn test_select_rejects_unknown_code() {
        let mut selector = LanguageSelector::populate(&LanguageCatalog::builtin(), DEFAULT_TARGET);
        assert!(selector.select("fr-FR").is_ok());
        assert_eq!(selector.selected(), "fr-FR");

        match selector.select("xx-XX") {
            Err(WidgetError::UnknownLanguage(code)) => assert_eq!(code, "xx-XX"),
            other => panic!("Expected UnknownLanguage, got {:?}", other),
        }
        assert_eq!(selector.selected(), "fr-FR");
    }

    #[test]
    fn test_side_parse() {
        assert_eq!(Side::parse("from"), Some(Side::Source));
        assert_eq!(Side::parse("TO"), Some(Side::Target));
        assert_eq!(Side::parse("left"), None);
        assert_eq!(Side::Source.label(), "from");
    }

    #[test]
    fn test_standard_icons_cover_every_pair() {
        let icons = IconBinding::standard();
        for action in [IconAction::Copy, IconAction::Speak] {
            for side in [Side::Source, Side::Target] {
                assert!(icons.contains(&IconBinding::new(action, side)));
            }
        }
    }
}
