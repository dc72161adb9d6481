//! Translation between the local language and the pivot language.
//!
//! [`TranslationBackend`] is the raw primitive (one bounded text in, one text
//! out); [`Translator`] wraps it with chunking, entity repair, caching and
//! the fallback contract the relay depends on.

mod backend;
mod client;
mod entities;
mod language;
mod translator;

pub use backend::{TranslationBackend, TranslationError};
pub use client::{DEFAULT_TRANSLATE_ENDPOINT, GoogleTranslateClient};
pub use entities::repair_entities;
pub use language::{SUPPORTED_LANGUAGES, language_name, parse_language, print_languages};
pub use translator::{Fallback, TranslationResult, Translator, TranslatorSettings};
