//! Denylist-based rejection of disallowed input.

/// Terms rejected by default, matched case-insensitively as substrings.
pub const DEFAULT_DENYLIST: &[&str] = &["sexy", "porn", "nude", "sex", "xxx", "adult", "nsfw"];

#[derive(Debug, Clone)]
pub struct ContentFilter {
    terms: Vec<String>,
}

impl ContentFilter {
    /// Builds a filter from the given terms. Blank terms are ignored.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    /// The default denylist plus `extra` terms.
    pub fn with_extra_terms<S: AsRef<str>>(extra: &[S]) -> Self {
        let mut terms: Vec<String> = DEFAULT_DENYLIST.iter().map(|t| (*t).to_string()).collect();
        terms.extend(extra.iter().map(|t| t.as_ref().to_string()));
        Self::new(terms)
    }

    /// Returns the first denylisted term contained in `text`, if any.
    pub fn matched_term(&self, text: &str) -> Option<&str> {
        let lowered = text.to_lowercase();
        self.terms
            .iter()
            .find(|term| lowered.contains(term.as_str()))
            .map(String::as_str)
    }

    pub fn is_disallowed(&self, text: &str) -> bool {
        self.matched_term(text).is_some()
    }
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::new(DEFAULT_DENYLIST)
    }
}
