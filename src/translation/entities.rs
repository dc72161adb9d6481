/// HTML entities the web translation endpoint leaves in its output.
///
/// `&amp;` is decoded last so an escaped entity such as `&amp;quot;` decodes
/// once to `&quot;` and not twice to `"`.
const ENTITIES: &[(&str, &str)] = &[
    ("&#39;", "'"),
    ("&quot;", "\""),
    ("&#10;", "\n"),
    ("&amp;", "&"),
];

/// Replaces known HTML-entity artifacts with the characters they encode.
pub fn repair_entities(text: &str) -> String {
    ENTITIES
        .iter()
        .fold(text.to_string(), |acc, (entity, plain)| acc.replace(entity, plain))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repairs_each_entity() {
        assert_eq!(repair_entities("haasa&#39;a"), "haasa'a");
        assert_eq!(repair_entities("&quot;hi&quot;"), "\"hi\"");
        assert_eq!(repair_entities("a&#10;b"), "a\nb");
        assert_eq!(repair_entities("salt &amp; pepper"), "salt & pepper");
    }

    #[test]
    fn test_escaped_entity_decodes_once() {
        assert_eq!(repair_entities("&amp;quot;"), "&quot;");
    }

    #[test]
    fn test_plain_text_is_untouched() {
        assert_eq!(repair_entities("I am fine, thank you!"), "I am fine, thank you!");
    }
}
