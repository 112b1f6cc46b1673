use serde::Deserialize;

use crate::core::language::LanguageTag;

/// Body of every synthesis endpoint, as received
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SpeakRequest {
    /// Text to synthesize
    #[cfg_attr(feature = "openapi", schema(example = "ನಮಸ್ಕಾರ"))]
    #[serde(default)]
    pub text: Option<String>,
    /// Language tag such as `kn-IN`, `hi` or `english`
    #[cfg_attr(feature = "openapi", schema(example = "kn-IN"))]
    #[serde(default)]
    pub language: Option<String>,
}

/// A request that passed validation: trimmed, non-empty text and a tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub text: String,
    pub tag: LanguageTag,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("No text provided")]
    EmptyText,
}

/// Checks text presence and fills in the default language tag
#[derive(Debug, Clone)]
pub struct RequestValidator {
    default_tag: String,
}

impl RequestValidator {
    pub fn new(default_tag: impl Into<String>) -> Self {
        Self {
            default_tag: default_tag.into(),
        }
    }

    pub fn default_tag(&self) -> &str {
        &self.default_tag
    }

    /// Blank or missing `language` counts as absent.
    pub fn validate(&self, raw: SpeakRequest) -> Result<SynthesisRequest, ValidationError> {
        let text = raw.text.as_deref().map(str::trim).unwrap_or_default();
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }

        let tag = match raw.language {
            Some(language) if !language.trim().is_empty() => language,
            _ => self.default_tag.clone(),
        };

        Ok(SynthesisRequest {
            text: text.to_string(),
            tag: LanguageTag::new(tag),
        })
    }
}
