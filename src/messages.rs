//! Fixed user-facing texts in the local language.
//!
//! Every terminal state of the relay that does not carry a translated reply
//! answers with one of these. Defaults are in Afaan Oromo; each can be
//! overridden from the `[messages]` config section.

use serde::{Deserialize, Serialize};

pub const DEFAULT_WELCOME: &str = "Baga nagaan dhuftan! Afaan Oromootiin waan hunda keessan waliin haasa'a. \
     Gaaffii kamiinuu natti qabaa!";
pub const DEFAULT_HELP: &str = "Ergaa kee Afaan Oromootiin barreessi, deebii Afaan Oromootiin siif nan kenna.\n\
     /start - jalqabi\n/help - gargaarsa";
pub const DEFAULT_REFUSAL: &str = "Gaaffii wanta tola hin oolleef deebii hin kennu.";
pub const DEFAULT_INFERENCE_FALLBACK: &str =
    "Maaloo, amma kana yaada keessan qabachuuf rakkina qaba.";
pub const DEFAULT_TRANSLATION_APOLOGY: &str = "Rakkina dubbii qaba, deebii hin argamne.";
pub const DEFAULT_TECHNICAL_ERROR: &str =
    "Rakkinni teeknikaa uumameera. Maaloo yeroo muraasa booda irra deebi'aa yaalaa.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Reply to `/start`.
    pub welcome: String,
    /// Reply to `/help`.
    pub help: String,
    /// Reply when the content filter rejects a message.
    pub refusal: String,
    /// Reply when every generation attempt failed.
    pub inference_fallback: String,
    /// Reply when the generated text could not be translated back.
    pub translation_apology: String,
    /// Reply when the pipeline failed in an unexpected way.
    pub technical_error: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            welcome: DEFAULT_WELCOME.to_string(),
            help: DEFAULT_HELP.to_string(),
            refusal: DEFAULT_REFUSAL.to_string(),
            inference_fallback: DEFAULT_INFERENCE_FALLBACK.to_string(),
            translation_apology: DEFAULT_TRANSLATION_APOLOGY.to_string(),
            technical_error: DEFAULT_TECHNICAL_ERROR.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_section_keeps_defaults() {
        let messages: Messages = toml::from_str(r#"refusal = "No.""#).unwrap();

        assert_eq!(messages.refusal, "No.");
        assert_eq!(messages.welcome, DEFAULT_WELCOME);
        assert_eq!(messages.technical_error, DEFAULT_TECHNICAL_ERROR);
    }

    #[test]
    fn test_terminal_messages_are_distinct() {
        let m = Messages::default();
        let texts = [
            &m.refusal,
            &m.inference_fallback,
            &m.translation_apology,
            &m.technical_error,
        ];
        for (i, a) in texts.iter().enumerate() {
            for b in &texts[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
