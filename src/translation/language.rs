//! Language code validation and supported languages.

use crate::ui::Style;

/// Language codes accepted by the translation backend and their names.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("af", "Afrikaans"),
    ("am", "Amharic"),
    ("ar", "Arabic"),
    ("de", "German"),
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("ha", "Hausa"),
    ("hi", "Hindi"),
    ("ig", "Igbo"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("mg", "Malagasy"),
    ("nl", "Dutch"),
    ("ny", "Chichewa"),
    ("om", "Afaan Oromo"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("rw", "Kinyarwanda"),
    ("sn", "Shona"),
    ("so", "Somali"),
    ("st", "Sesotho"),
    ("sw", "Swahili"),
    ("ti", "Tigrinya"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("xh", "Xhosa"),
    ("yo", "Yoruba"),
    ("zh", "Chinese (Simplified)"),
    ("zu", "Zulu"),
];

/// Returns the display name for a supported language code.
pub fn language_name(code: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Prints all supported language codes to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Supported language codes"));
    for (code, name) in SUPPORTED_LANGUAGES {
        println!("  {:5} {}", Style::code(code), Style::secondary(name));
    }
}

/// Clap value parser accepting only supported language codes.
pub fn parse_language(code: &str) -> Result<String, String> {
    if language_name(code).is_some() {
        Ok(code.to_string())
    } else {
        Err(format!(
            "unsupported language code '{code}' (run 'pivot-relay languages' to see all codes)"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language_valid() {
        assert_eq!(parse_language("om").as_deref(), Ok("om"));
        assert!(parse_language("en").is_ok());
        assert!(parse_language("ti").is_ok());
    }

    #[test]
    fn test_parse_language_invalid() {
        assert!(parse_language("invalid").is_err());
        assert!(parse_language("").is_err());
        assert!(parse_language("OM").is_err()); // case sensitive
    }

    #[test]
    fn test_language_name() {
        assert_eq!(language_name("om"), Some("Afaan Oromo"));
        assert_eq!(language_name("xx"), None);
    }

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<_> = SUPPORTED_LANGUAGES.iter().map(|(c, _)| *c).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), SUPPORTED_LANGUAGES.len());
    }
}
