//! On-demand machine translation of site copy.
//!
//! # Overview
//!
//! - **Provider**: One request to an external translation service per string
//! - **Cache**: Source text -> translation memo shared per target locale
//! - **Client**: Cache lookup, bounded call, fallback to the original text
//! - **Tree**: Shape-preserving translation of a whole bundle, `images` excluded
//!
//! Translation never fails from the caller's point of view. A failed call yields
//! [`Translation::Fallback`] carrying the original text, and a translated bundle
//! always has the same keys and sequence lengths as its source.

mod cache;
mod client;
mod error;
mod provider;
mod tree;

pub use cache::{MemoryCache, TranslationCache};
pub use client::{Translation, TranslationReport, Translator, TranslatorConfig};
pub use error::{FallbackReason, TranslateError};
pub use provider::{GoogleTranslateProvider, TranslationProvider, parse_segments};
pub use tree::{TranslationStats, TreeTranslator};
