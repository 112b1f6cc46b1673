use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use super::catalog::{CatalogError, LanguageCatalog};
use super::tag::{LanguageTag, NormalizedCode};

/// Which lookup step produced a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The whole case-folded tag is an alias
    FullTag,
    /// The primary subtag is itself a supported code
    BaseSubtag,
    /// The primary subtag is an alias
    BaseAlias,
    /// Nothing matched; the configured fallback was used
    Fallback,
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchKind::FullTag => "full-tag",
            MatchKind::BaseSubtag => "base-subtag",
            MatchKind::BaseAlias => "base-alias",
            MatchKind::Fallback => "fallback",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub code: NormalizedCode,
    pub matched: MatchKind,
}

/// Maps arbitrary caller tags onto supported engine codes.
///
/// Never fails: tags that match nothing resolve to the fallback code.
#[derive(Debug, Clone)]
pub struct LanguageResolver {
    catalog: Arc<LanguageCatalog>,
    fallback: NormalizedCode,
}

impl LanguageResolver {
    /// Fails when `fallback` is not a supported code of `catalog`
    pub fn new(catalog: Arc<LanguageCatalog>, fallback: &str) -> Result<Self, CatalogError> {
        let fallback = catalog
            .supported_code(fallback.trim())
            .ok_or_else(|| CatalogError::UnsupportedFallback(fallback.to_string()))?;
        Ok(Self { catalog, fallback })
    }

    pub fn catalog(&self) -> &Arc<LanguageCatalog> {
        &self.catalog
    }

    pub fn fallback(&self) -> &NormalizedCode {
        &self.fallback
    }

    pub fn resolve(&self, tag: &LanguageTag) -> NormalizedCode {
        self.resolve_detailed(tag).code
    }

    /// Resolution order: full-tag alias, supported base subtag, base-subtag alias,
    /// fallback. A full-tag alias always wins, even over a supported base subtag.
    pub fn resolve_detailed(&self, tag: &LanguageTag) -> Resolution {
        let folded = tag.folded();

        if let Some(code) = self.catalog.alias(&folded) {
            return self.matched(tag, code, MatchKind::FullTag);
        }

        let base = tag.base();
        if let Some(code) = self.catalog.supported_code(&base) {
            return self.matched(tag, code, MatchKind::BaseSubtag);
        }

        if let Some(code) = self.catalog.alias(&base) {
            return self.matched(tag, code, MatchKind::BaseAlias);
        }

        warn!(
            tag = %tag,
            fallback = %self.fallback,
            "Language tag not supported, falling back"
        );
        Resolution {
            code: self.fallback.clone(),
            matched: MatchKind::Fallback,
        }
    }

    fn matched(&self, tag: &LanguageTag, code: NormalizedCode, matched: MatchKind) -> Resolution {
        debug!(tag = %tag, code = %code, matched = %matched, "Resolved language tag");
        Resolution { code, matched }
    }
}
