use std::fmt;

use serde::{Serialize, Serializer};

/// Caller-supplied language identifier, e.g. `hi-IN`, `EN`, `fil_PH`.
///
/// Kept exactly as received; case folding and subtag splitting happen on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageTag(String);

impl LanguageTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The tag as the caller sent it
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Trimmed, lower-cased form used for every catalog lookup
    pub fn folded(&self) -> String {
        self.0.trim().to_lowercase()
    }

    /// Primary subtag, i.e. everything before the first `-` or `_`
    ///
    /// `"hi-IN"` gives `"hi"`, `"EN"` gives `"en"`.
    pub fn base(&self) -> String {
        let folded = self.folded();
        match folded.split(['-', '_']).next() {
            Some(base) => base.to_string(),
            None => folded,
        }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for LanguageTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

/// Code accepted by the speech engine, e.g. `hi`, `en`, `zh-CN`.
///
/// Only a [`LanguageCatalog`](super::LanguageCatalog) hands these out, so a value
/// of this type is always one of the catalog's supported codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedCode(String);

impl NormalizedCode {
    pub(crate) fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for NormalizedCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<str> for NormalizedCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl Serialize for NormalizedCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
