use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Output language requested by the client. English is the default and adds
/// nothing to a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Hindi,
    Telugu,
    Tamil,
}

// (language, ISO 639-1 code, prompt directive)
const LANGUAGES: [(Language, &str, &str); 4] = [
    (Language::English, "en", ""),
    (
        Language::Hindi,
        "hi",
        "\n\nWrite the entire response in Hindi (Devanagari script). Keep any JSON keys in English.",
    ),
    (
        Language::Telugu,
        "te",
        "\n\nWrite the entire response in Telugu (Telugu script). Keep any JSON keys in English.",
    ),
    (
        Language::Tamil,
        "ta",
        "\n\nWrite the entire response in Tamil (Tamil script). Keep any JSON keys in English.",
    ),
];

impl Language {
    /// Resolves an optional `language` parameter, falling back to English.
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(str::trim).filter(|p| !p.is_empty()) {
            None => Self::English,
            Some(p) => p.parse().unwrap_or_else(|_| {
                debug!("Unknown language '{}', using English", p);
                Self::English
            }),
        }
    }

    fn entry(self) -> &'static (Language, &'static str, &'static str) {
        LANGUAGES
            .iter()
            .find(|(lang, _, _)| *lang == self)
            .unwrap_or(&LANGUAGES[0])
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "Hindi",
            Self::Telugu => "Telugu",
            Self::Tamil => "Tamil",
        }
    }

    pub fn code(self) -> &'static str {
        self.entry().1
    }

    /// Text appended to every prompt so the model answers in this language.
    pub fn directive(self) -> &'static str {
        self.entry().2
    }

    /// Suffix added to lesson descriptions in the curriculum listing.
    pub fn lesson_suffix(self) -> Option<String> {
        match self {
            Self::English => None,
            other => Some(format!(" (Available in {})", other.name())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage(pub String);

impl fmt::Display for UnknownLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown language: {}", self.0)
    }
}

impl std::error::Error for UnknownLanguage {}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim();
        LANGUAGES
            .iter()
            .find(|(lang, code, _)| {
                lang.name().eq_ignore_ascii_case(wanted) || code.eq_ignore_ascii_case(wanted)
            })
            .map(|(lang, _, _)| *lang)
            .ok_or_else(|| UnknownLanguage(wanted.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
