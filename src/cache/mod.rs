mod sqlite;

pub use sqlite::{TranslationCache, TranslationKey};
