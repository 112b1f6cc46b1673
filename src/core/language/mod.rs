//! Language tag handling: the catalog of supported engine codes and the resolver
//! that maps caller tags onto them.

mod catalog;
mod resolver;
mod tag;

pub use catalog::{CATALOG_VERSION, CatalogBuilder, CatalogError, LanguageCatalog, VoiceProfile};
pub use resolver::{LanguageResolver, MatchKind, Resolution};
pub use tag::{LanguageTag, NormalizedCode};
