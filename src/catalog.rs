//! Compiled-in language catalog
//!
//! Codes are the `langpair` halves MyMemory accepts and double as speech
//! language tags.

/// Default source language
pub const DEFAULT_SOURCE: &str = "en-GB";
/// Default target language
pub const DEFAULT_TARGET: &str = "de-DE";

const LANGUAGES: &[(&str, &str)] = &[
    ("am-ET", "Amharic"),
    ("ar-SA", "Arabic"),
    ("be-BY", "Bielarus"),
    ("bem-ZM", "Bemba"),
    ("bi-VU", "Bislama"),
    ("bjs-BB", "Bajan"),
    ("bn-IN", "Bengali"),
    ("bo-CN", "Tibetan"),
    ("br-FR", "Breton"),
    ("bs-BA", "Bosnian"),
    ("ca-ES", "Catalan"),
    ("cop-EG", "Coptic"),
    ("cs-CZ", "Czech"),
    ("cy-GB", "Welsh"),
    ("da-DK", "Danish"),
    ("dz-BT", "Dzongkha"),
    ("de-DE", "German"),
    ("dv-MV", "Maldivian"),
    ("el-GR", "Greek"),
    ("en-GB", "English"),
    ("es-ES", "Spanish"),
    ("et-EE", "Estonian"),
    ("eu-ES", "Basque"),
    ("fa-IR", "Persian"),
    ("fi-FI", "Finnish"),
    ("fn-FNG", "Fanagalo"),
    ("fo-FO", "Faroese"),
    ("fr-FR", "French"),
    ("gl-ES", "Galician"),
    ("gu-IN", "Gujarati"),
    ("ha-NE", "Hausa"),
    ("he-IL", "Hebrew"),
    ("hi-IN", "Hindi"),
    ("hr-HR", "Croatian"),
    ("hu-HU", "Hungarian"),
    ("id-ID", "Indonesian"),
    ("is-IS", "Icelandic"),
    ("it-IT", "Italian"),
    ("ja-JP", "Japanese"),
    ("kk-KZ", "Kazakh"),
    ("km-KM", "Khmer"),
    ("kn-IN", "Kannada"),
    ("ko-KR", "Korean"),
    ("ku-TR", "Kurdish"),
    ("ky-KG", "Kyrgyz"),
    ("la-VA", "Latin"),
    ("lo-LA", "Lao"),
    ("lv-LV", "Latvian"),
    ("men-SL", "Mende"),
    ("mg-MG", "Malagasy"),
    ("mi-NZ", "Maori"),
    ("ms-MY", "Malay"),
    ("mt-MT", "Maltese"),
    ("my-MM", "Burmese"),
    ("ne-NP", "Nepali"),
    ("niu-NU", "Niuean"),
    ("nl-NL", "Dutch"),
    ("no-NO", "Norwegian"),
    ("ny-MW", "Nyanja"),
    ("ur-PK", "Pakistani"),
    ("pau-PW", "Palauan"),
    ("pa-IN", "Panjabi"),
    ("ps-PK", "Pashto"),
    ("pis-SB", "Pijin"),
    ("pl-PL", "Polish"),
    ("pt-PT", "Portuguese"),
    ("rn-BI", "Kirundi"),
    ("ro-RO", "Romanian"),
    ("ru-RU", "Russian"),
    ("sg-CF", "Sango"),
    ("si-LK", "Sinhala"),
    ("sk-SK", "Slovak"),
    ("sm-WS", "Samoan"),
    ("sn-ZW", "Shona"),
    ("so-SO", "Somali"),
    ("sq-AL", "Albanian"),
    ("sr-RS", "Serbian"),
    ("sv-SE", "Swedish"),
    ("sw-SZ", "Swahili"),
    ("ta-LK", "Tamil"),
    ("te-IN", "Telugu"),
    ("tet-TL", "Tetum"),
    ("tg-TJ", "Tajik"),
    ("th-TH", "Thai"),
    ("ti-TI", "Tigrinya"),
    ("tk-TM", "Turkmen"),
    ("tl-PH", "Tagalog"),
    ("tn-BW", "Tswana"),
    ("to-TO", "Tongan"),
    ("tr-TR", "Turkish"),
    ("uk-UA", "Ukrainian"),
    ("uz-UZ", "Uzbek"),
    ("vi-VN", "Vietnamese"),
    ("wo-SN", "Wolof"),
    ("xh-ZA", "Xhosa"),
    ("yi-YD", "Yiddish"),
    ("zu-ZA", "Zulu"),
];

/// Ordered mapping from language code to display name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageCatalog {
    entries: &'static [(&'static str, &'static str)],
}

impl Default for LanguageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LanguageCatalog {
    pub const fn builtin() -> Self {
        Self { entries: LANGUAGES }
    }

    /// Catalog over caller-provided entries; mostly useful in tests
    pub const fn from_static(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Entries in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }

    pub fn codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.iter().map(|(code, _)| code)
    }

    pub fn name(&self, code: &str) -> Option<&'static str> {
        self.iter().find(|(c, _)| *c == code).map(|(_, name)| name)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.name(code).is_some()
    }

    /// Find a code by exact code, case-insensitive code, or display name
    pub fn resolve(&self, query: &str) -> Option<&'static str> {
        let query = query.trim();
        self.iter()
            .find(|(code, _)| *code == query)
            .or_else(|| {
                self.iter().find(|(code, name)| {
                    code.eq_ignore_ascii_case(query) || name.eq_ignore_ascii_case(query)
                })
            })
            .map(|(code, _)| code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
