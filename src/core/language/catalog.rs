//! # Language catalog
//!
//! The catalog is the single table of engine codes the gateway can synthesize
//! (`supported`) plus every caller tag it knows how to map onto one of them
//! (`aliases`). It is built once at startup and shared read-only afterwards.
//!
//! Alias keys are stored case-folded. Every supported code is also registered as
//! an alias of itself, so `ZH-cn` finds `zh-CN` through the alias table.
//!
//! The built-in table reconciles the differing per-endpoint tables the gateway
//! replaced:
//!
//! | Tag                     | Code    | Note                                     |
//! |-------------------------|---------|------------------------------------------|
//! | `he`, `he-IL`, `hebrew` | `iw`    | engine still uses the legacy ISO code    |
//! | `fil`, `fil-PH`         | `tl`    | engine has no `fil` voice                |
//! | `zh`                    | `zh-CN` | bare Chinese means Simplified            |
//! | `pa`, `ur`, `am`        | itself  | listed as supported, engine accepts them |

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::error;

use super::tag::NormalizedCode;

/// Bumped whenever the built-in tables change.
pub const CATALOG_VERSION: &str = "2024.1";

/// Errors raised while building a catalog
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Alias '{tag}' points to unsupported code '{code}'")]
    UnsupportedAliasTarget { tag: String, code: String },

    #[error("Fallback language '{0}' is not a supported code")]
    UnsupportedFallback(String),

    #[error("Empty language code")]
    EmptyCode,
}

/// Voice the engine uses for a supported code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VoiceProfile {
    /// Display name, e.g. "Hindi (Google)"
    pub name: String,
    /// Engine top-level domain that gives the regional accent
    pub tld: String,
}

// (code, voice name, tld)
const BUILTIN_LANGUAGES: &[(&str, &str, &str)] = &[
    // Indian
    ("hi", "Hindi (Google)", "co.in"),
    ("bn", "Bengali (Google)", "co.in"),
    ("gu", "Gujarati (Google)", "co.in"),
    ("kn", "Kannada (Google)", "co.in"),
    ("ml", "Malayalam (Google)", "co.in"),
    ("mr", "Marathi (Google)", "co.in"),
    ("pa", "Punjabi (Google)", "co.in"),
    ("ta", "Tamil (Google)", "co.in"),
    ("te", "Telugu (Google)", "co.in"),
    ("ur", "Urdu (Google)", "com"),
    // English
    ("en", "English (Google)", "com"),
    // European
    ("es", "Spanish (Google)", "com"),
    ("fr", "French (Google)", "com"),
    ("de", "German (Google)", "com"),
    ("it", "Italian (Google)", "com"),
    ("pt", "Portuguese (Google)", "com"),
    ("ru", "Russian (Google)", "com"),
    ("nl", "Dutch (Google)", "com"),
    ("pl", "Polish (Google)", "com"),
    ("tr", "Turkish (Google)", "com"),
    ("sv", "Swedish (Google)", "com"),
    ("no", "Norwegian (Google)", "com"),
    ("da", "Danish (Google)", "com"),
    ("fi", "Finnish (Google)", "com"),
    ("el", "Greek (Google)", "com"),
    ("cs", "Czech (Google)", "com"),
    ("ro", "Romanian (Google)", "com"),
    ("hu", "Hungarian (Google)", "com"),
    ("uk", "Ukrainian (Google)", "com"),
    ("ca", "Catalan (Google)", "com"),
    ("hr", "Croatian (Google)", "com"),
    ("sr", "Serbian (Google)", "com"),
    ("sk", "Slovak (Google)", "com"),
    ("sl", "Slovenian (Google)", "com"),
    ("bg", "Bulgarian (Google)", "com"),
    ("lt", "Lithuanian (Google)", "com"),
    ("lv", "Latvian (Google)", "com"),
    ("et", "Estonian (Google)", "com"),
    // East and Southeast Asian
    ("zh-CN", "Chinese Simplified (Google)", "com"),
    ("zh-TW", "Chinese Traditional (Google)", "com"),
    ("ja", "Japanese (Google)", "com"),
    ("ko", "Korean (Google)", "com"),
    ("th", "Thai (Google)", "com"),
    ("vi", "Vietnamese (Google)", "com"),
    ("id", "Indonesian (Google)", "com"),
    ("ms", "Malay (Google)", "com"),
    ("tl", "Filipino (Google)", "com"),
    // Middle Eastern
    ("ar", "Arabic (Google)", "com"),
    ("iw", "Hebrew (Google)", "com"),
    ("fa", "Persian (Google)", "com"),
    // African
    ("af", "Afrikaans (Google)", "com"),
    ("sw", "Swahili (Google)", "com"),
    ("am", "Amharic (Google)", "com"),
];

// (tag, code); supported codes are added as self-aliases automatically
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    // Region tags
    ("hi-IN", "hi"),
    ("bn-IN", "bn"),
    ("gu-IN", "gu"),
    ("kn-IN", "kn"),
    ("ml-IN", "ml"),
    ("mr-IN", "mr"),
    ("pa-IN", "pa"),
    ("ta-IN", "ta"),
    ("te-IN", "te"),
    ("ur-PK", "ur"),
    ("en-US", "en"),
    ("en-GB", "en"),
    ("en-IN", "en"),
    ("es-ES", "es"),
    ("fr-FR", "fr"),
    ("de-DE", "de"),
    ("it-IT", "it"),
    ("pt-PT", "pt"),
    ("pt-BR", "pt"),
    ("ru-RU", "ru"),
    ("nl-NL", "nl"),
    ("pl-PL", "pl"),
    ("tr-TR", "tr"),
    ("sv-SE", "sv"),
    ("no-NO", "no"),
    ("nb-NO", "no"),
    ("da-DK", "da"),
    ("fi-FI", "fi"),
    ("el-GR", "el"),
    ("cs-CZ", "cs"),
    ("ro-RO", "ro"),
    ("hu-HU", "hu"),
    ("uk-UA", "uk"),
    ("ca-ES", "ca"),
    ("hr-HR", "hr"),
    ("sr-RS", "sr"),
    ("sk-SK", "sk"),
    ("sl-SI", "sl"),
    ("bg-BG", "bg"),
    ("lt-LT", "lt"),
    ("lv-LV", "lv"),
    ("et-EE", "et"),
    ("zh", "zh-CN"),
    ("ja-JP", "ja"),
    ("ko-KR", "ko"),
    ("th-TH", "th"),
    ("vi-VN", "vi"),
    ("id-ID", "id"),
    ("ms-MY", "ms"),
    ("fil", "tl"),
    ("fil-PH", "tl"),
    ("ar-SA", "ar"),
    ("he", "iw"),
    ("he-IL", "iw"),
    ("fa-IR", "fa"),
    ("af-ZA", "af"),
    ("sw-KE", "sw"),
    ("am-ET", "am"),
    // Language names
    ("english", "en"),
    ("hindi", "hi"),
    ("kannada", "kn"),
    ("tamil", "ta"),
    ("telugu", "te"),
    ("malayalam", "ml"),
    ("bengali", "bn"),
    ("gujarati", "gu"),
    ("marathi", "mr"),
    ("punjabi", "pa"),
    ("urdu", "ur"),
    ("spanish", "es"),
    ("french", "fr"),
    ("german", "de"),
    ("chinese", "zh-CN"),
    ("japanese", "ja"),
    ("korean", "ko"),
    ("arabic", "ar"),
    ("russian", "ru"),
    ("portuguese", "pt"),
    ("italian", "it"),
    ("dutch", "nl"),
    ("turkish", "tr"),
    ("polish", "pl"),
    ("vietnamese", "vi"),
    ("thai", "th"),
    ("indonesian", "id"),
    ("filipino", "tl"),
    ("tagalog", "tl"),
    ("malay", "ms"),
    ("persian", "fa"),
    ("hebrew", "iw"),
    ("greek", "el"),
    ("czech", "cs"),
    ("swedish", "sv"),
    ("danish", "da"),
    ("finnish", "fi"),
    ("norwegian", "no"),
    ("romanian", "ro"),
    ("hungarian", "hu"),
    ("slovak", "sk"),
    ("bulgarian", "bg"),
    ("croatian", "hr"),
    ("serbian", "sr"),
    ("ukrainian", "uk"),
];

static BUILTIN: Lazy<LanguageCatalog> =
    Lazy::new(|| from_tables(BUILTIN_LANGUAGES, BUILTIN_ALIASES));

// The static tables are covered by `test_builtin_catalog_is_consistent`.
fn tables_builder(
    languages: &[(&str, &str, &str)],
    aliases: &[(&str, &str)],
) -> CatalogBuilder {
    let mut builder = LanguageCatalog::builder();
    for (code, name, tld) in languages {
        builder = builder.language(*code, *name, *tld);
    }
    for (tag, code) in aliases {
        builder = builder.alias(*tag, *code);
    }
    builder
}

/// An invalid table yields an empty catalog, which then fails startup on
/// the fallback check; the underlying cause is logged here.
fn from_tables(languages: &[(&str, &str, &str)], aliases: &[(&str, &str)]) -> LanguageCatalog {
    tables_builder(languages, aliases)
        .build()
        .unwrap_or_else(|e| {
            error!("Built-in language catalog is invalid, starting with an empty one: {e}");
            LanguageCatalog::empty()
        })
}

/// Immutable alias table plus supported-code set.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageCatalog {
    version: String,
    supported: BTreeMap<String, VoiceProfile>,
    aliases: BTreeMap<String, String>,
}

impl LanguageCatalog {
    /// The built-in catalog, constructed on first use
    pub fn builtin() -> &'static LanguageCatalog {
        &BUILTIN
    }

    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Start a builder pre-filled with this catalog's entries
    ///
    /// Used to layer configured aliases over the built-in table.
    pub fn to_builder(&self) -> CatalogBuilder {
        CatalogBuilder {
            version: Some(self.version.clone()),
            languages: self
                .supported
                .iter()
                .map(|(code, voice)| (code.clone(), voice.clone()))
                .collect(),
            aliases: self
                .aliases
                .iter()
                .map(|(tag, code)| (tag.clone(), code.clone()))
                .collect(),
        }
    }

    fn empty() -> Self {
        Self {
            version: CATALOG_VERSION.to_string(),
            supported: BTreeMap::new(),
            aliases: BTreeMap::new(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Exact (case-sensitive) membership test against the supported set
    pub fn is_supported(&self, code: &str) -> bool {
        self.supported.contains_key(code)
    }

    /// Returns the normalized code if `code` is a supported code
    pub fn supported_code(&self, code: &str) -> Option<NormalizedCode> {
        self.supported
            .get_key_value(code)
            .map(|(code, _)| NormalizedCode::new(code.clone()))
    }

    /// Looks up a case-folded tag in the alias table
    ///
    /// Only returns codes that are members of the supported set.
    pub fn alias(&self, folded_tag: &str) -> Option<NormalizedCode> {
        self.aliases
            .get(folded_tag)
            .and_then(|code| self.supported_code(code))
    }

    pub fn supported_codes(&self) -> Vec<String> {
        self.supported.keys().cloned().collect()
    }

    pub fn aliases(&self) -> &BTreeMap<String, String> {
        &self.aliases
    }

    pub fn voice(&self, code: &NormalizedCode) -> Option<&VoiceProfile> {
        self.supported.get(code.as_str())
    }

    pub fn voices(&self) -> &BTreeMap<String, VoiceProfile> {
        &self.supported
    }

    pub fn len(&self) -> usize {
        self.supported.len()
    }

    pub fn is_empty(&self) -> bool {
        self.supported.is_empty()
    }
}

/// Collects languages and aliases, validating them on [`CatalogBuilder::build`]
#[derive(Debug, Default, Clone)]
pub struct CatalogBuilder {
    version: Option<String>,
    languages: Vec<(String, VoiceProfile)>,
    aliases: Vec<(String, String)>,
}

impl CatalogBuilder {
    pub fn language(
        mut self,
        code: impl Into<String>,
        name: impl Into<String>,
        tld: impl Into<String>,
    ) -> Self {
        self.languages.push((
            code.into(),
            VoiceProfile {
                name: name.into(),
                tld: tld.into(),
            },
        ));
        self
    }

    /// Maps `tag` onto `code`. Later entries for the same tag win.
    pub fn alias(mut self, tag: impl Into<String>, code: impl Into<String>) -> Self {
        self.aliases.push((tag.into(), code.into()));
        self
    }

    pub fn build(self) -> Result<LanguageCatalog, CatalogError> {
        let mut supported = BTreeMap::new();
        let mut aliases = BTreeMap::new();

        for (code, voice) in self.languages {
            let code = code.trim().to_string();
            if code.is_empty() {
                return Err(CatalogError::EmptyCode);
            }
            aliases.insert(code.to_lowercase(), code.clone());
            supported.insert(code, voice);
        }

        for (tag, code) in self.aliases {
            let code = code.trim().to_string();
            if !supported.contains_key(&code) {
                return Err(CatalogError::UnsupportedAliasTarget { tag, code });
            }
            aliases.insert(tag.trim().to_lowercase(), code);
        }

        Ok(LanguageCatalog {
            version: self
                .version
                .unwrap_or_else(|| CATALOG_VERSION.to_string()),
            supported,
            aliases,
        })
    }
}
