//! Tailwind `theme.extend` config.
//!
//! Tokens are bucketed by type and by their last path segment: colors go to
//! `colors`; numbers named like a radius go to `borderRadius`, like a font
//! or size to `fontSize`, anything else to `spacing`; texts named like a
//! font family go to `fontFamily`. Other tokens are left out.

use super::web::px;
use crate::naming::escape_single_quoted;
use crate::tokens::TokenTree;
use crate::types::{Token, TokenType, TokenValue};
use indexmap::IndexMap;
use regex::Regex;
use std::fmt::Write;
use std::sync::LazyLock;

static NON_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9-]").unwrap());

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Bucket {
    Colors,
    Spacing,
    FontSize,
    FontFamily,
    BorderRadius,
}

impl Bucket {
    const ORDER: [Bucket; 5] = [
        Bucket::Colors,
        Bucket::Spacing,
        Bucket::FontSize,
        Bucket::FontFamily,
        Bucket::BorderRadius,
    ];

    fn key(&self) -> &'static str {
        match self {
            Bucket::Colors => "colors",
            Bucket::Spacing => "spacing",
            Bucket::FontSize => "fontSize",
            Bucket::FontFamily => "fontFamily",
            Bucket::BorderRadius => "borderRadius",
        }
    }
}

fn bucket_for(key: &str, token: &Token) -> Option<Bucket> {
    let key = key.to_lowercase();
    match token.kind {
        TokenType::Color => Some(Bucket::Colors),
        TokenType::Number if key.contains("radius") => Some(Bucket::BorderRadius),
        TokenType::Number if key.contains("font") || key.contains("size") => Some(Bucket::FontSize),
        TokenType::Number => Some(Bucket::Spacing),
        TokenType::Text if key.contains("font") || key.contains("family") => Some(Bucket::FontFamily),
        _ => None,
    }
}

fn config_name(root: &str, path: &[&str]) -> String {
    let joined = std::iter::once(root).chain(path.iter().copied()).collect::<Vec<_>>().join("-");
    NON_NAME.replace_all(&joined.to_lowercase(), "-").into_owned()
}

fn entry_value(bucket: Bucket, value: &TokenValue) -> String {
    let text = match value {
        TokenValue::Number(n) => px(*n),
        other => other.to_string(),
    };
    let quoted = format!("'{}'", escape_single_quoted(&text));
    if bucket == Bucket::FontFamily {
        format!("[{}]", quoted)
    } else {
        quoted
    }
}

pub fn config(tree: &TokenTree) -> String {
    let mut buckets: IndexMap<Bucket, Vec<(String, String)>> = IndexMap::new();
    for (root, node) in tree.roots() {
        for (path, token) in node.leaves() {
            let key = path.last().copied().unwrap_or(root.as_str());
            if let Some(bucket) = bucket_for(key, token) {
                buckets
                    .entry(bucket)
                    .or_default()
                    .push((config_name(root, &path), entry_value(bucket, &token.value)));
            }
        }
    }

    let mut out = String::from("module.exports = {\n  theme: {\n    extend: {\n");
    for bucket in Bucket::ORDER {
        let Some(entries) = buckets.get(&bucket) else { continue };
        let _ = writeln!(out, "      {}: {{", bucket.key());
        for (name, value) in entries {
            let _ = writeln!(out, "        '{}': {},", name, value);
        }
        out.push_str("      },\n");
    }
    out.push_str("    },\n  },\n};\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn tree() -> TokenTree {
        let mut tree = TokenTree::new();
        tree.insert(
            ["Colors/Light", "Brand", "Primary"],
            Token::new(TokenType::Color, TokenValue::Color(Color::new(0.0, 0.4, 1.0, 1.0))),
        );
        tree.insert(["Spacing/Base", "Gap"], Token::new(TokenType::Number, TokenValue::Number(8.0)));
        tree.insert(
            ["Spacing/Base", "Corner Radius"],
            Token::new(TokenType::Number, TokenValue::Number(4.0)),
        );
        tree.insert(["Type/Base", "Body Size"], Token::new(TokenType::Number, TokenValue::Number(16.0)));
        tree.insert(
            ["Type/Base", "Font Family"],
            Token::new(TokenType::Text, TokenValue::Text("Inter".into())),
        );
        tree.insert(["Type/Base", "Flag"], Token::new(TokenType::Boolean, TokenValue::Boolean(true)));
        tree
    }

    #[test]
    fn tokens_land_in_their_buckets() {
        let out = config(&tree());
        assert_eq!(
            out,
            "module.exports = {\n  theme: {\n    extend: {\n\
             \x20     colors: {\n        'colors-light-brand-primary': '#0066ff',\n      },\n\
             \x20     spacing: {\n        'spacing-base-gap': '8px',\n      },\n\
             \x20     fontSize: {\n        'type-base-body-size': '16px',\n      },\n\
             \x20     fontFamily: {\n        'type-base-font-family': ['Inter'],\n      },\n\
             \x20     borderRadius: {\n        'spacing-base-corner-radius': '4px',\n      },\n\
             \x20   },\n  },\n};\n"
        );
    }

    #[test]
    fn root_level_tokens_use_their_root_key() {
        let mut tree = TokenTree::new();
        tree.insert(["Primary"], Token::new(TokenType::Color, TokenValue::Color(Color::new(1.0, 0.0, 0.0, 1.0))));
        tree.insert(["Radius"], Token::new(TokenType::Number, TokenValue::Number(6.0)));
        let out = config(&tree);
        assert!(out.contains("colors: {\n        'primary': '#ff0000',\n      },"));
        assert!(out.contains("borderRadius: {\n        'radius': '6px',\n      },"));
    }

    #[test]
    fn empty_buckets_are_omitted() {
        let mut tree = TokenTree::new();
        tree.insert(["Spacing/Base", "Gap"], Token::new(TokenType::Number, TokenValue::Number(8.0)));
        let out = config(&tree);
        assert!(out.contains("spacing: {"));
        assert!(!out.contains("colors"));
        assert!(!out.contains("fontFamily"));
    }
}
