//! Language table — maps a UI language code to its prompt template and speech locale.
//!
//! Lookup is a flat scan over `LANGUAGES`; unknown or absent codes resolve to
//! the first entry. Supporting another language means adding a row.

use serde::Serialize;

use crate::assistant::prompts::{PromptTemplate, ENGLISH, HINDI, PUNJABI};

#[derive(Debug, Serialize)]
pub struct LanguageProfile {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
    /// BCP 47 tag clients hand to speech recognition / synthesis.
    pub speech_locale: &'static str,
    #[serde(skip)]
    pub prompt: &'static PromptTemplate,
}

/// Supported languages. The first entry is the default.
pub static LANGUAGES: &[LanguageProfile] = &[
    LanguageProfile {
        code: "en",
        name: "English",
        native_name: "English",
        speech_locale: "en-IN",
        prompt: &ENGLISH,
    },
    LanguageProfile {
        code: "hi",
        name: "Hindi",
        native_name: "हिंदी",
        speech_locale: "hi-IN",
        prompt: &HINDI,
    },
    LanguageProfile {
        code: "pa",
        name: "Punjabi",
        native_name: "ਪੰਜਾਬੀ",
        speech_locale: "pa-IN",
        prompt: &PUNJABI,
    },
];

pub fn default_language() -> &'static LanguageProfile {
    &LANGUAGES[0]
}

/// Profile for `code`, or the default profile when the code is unknown or absent.
pub fn resolve(code: Option<&str>) -> &'static LanguageProfile {
    code.and_then(|code| LANGUAGES.iter().find(|l| l.code == code))
        .unwrap_or_else(default_language)
}
