//! Identifier conventions for generated output.

use regex::Regex;
use std::sync::LazyLock;

static CASE_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());
static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s_./]+").unwrap());
static DASH_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());

/// `"Semantic Colors/Light"` -> `"semantic-colors-light"`, `"fontSize"` -> `"font-size"`.
pub fn kebab_case(s: &str) -> String {
    let split = CASE_BOUNDARY.replace_all(s, "$1-$2");
    let dashed = SEPARATORS.replace_all(&split, "-");
    DASH_RUNS.replace_all(&dashed, "-").to_lowercase()
}

/// camelCase identifier safe for Swift, Kotlin and Dart.
///
/// Non-alphanumeric characters split words; a leading digit gets a `_` prefix.
pub fn camel_identifier(s: &str) -> String {
    let mut out = String::new();
    for word in s.split(|c: char| !c.is_ascii_alphanumeric()).filter(|w| !w.is_empty()) {
        if out.is_empty() {
            out.push_str(&lower_first(word));
        } else {
            out.push_str(&upper_first(word));
        }
    }
    if out.is_empty() {
        return "token".to_string();
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

fn lower_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Escapes a value for a double-quoted string literal.
pub fn escape_double_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Escapes a value for a single-quoted string literal.
pub fn escape_single_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kebab_case_matches_style_dictionary_names() {
        assert_eq!(kebab_case("Semantic Colors/Light"), "semantic-colors-light");
        assert_eq!(kebab_case("Brand-Primary"), "brand-primary");
        assert_eq!(kebab_case("fontSize"), "font-size");
        assert_eq!(kebab_case("Heading-H1 line-height"), "heading-h1-line-height");
        assert_eq!(kebab_case("a__b..c"), "a-b-c");
        assert_eq!(kebab_case("Spacing-2XL"), "spacing-2-xl");
    }

    #[test]
    fn camel_identifier_is_a_valid_symbol() {
        assert_eq!(camel_identifier("colors-light-brand-primary"), "colorsLightBrandPrimary");
        assert_eq!(camel_identifier("500"), "_500");
        assert_eq!(camel_identifier("---"), "token");
        assert_eq!(camel_identifier("Surface Background"), "surfaceBackground");
    }

    #[test]
    fn escaping() {
        assert_eq!(escape_double_quoted(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_single_quoted("it's"), r"it\'s");
    }
}
