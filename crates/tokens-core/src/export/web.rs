//! Stylesheet and JavaScript formatters.

use crate::dictionary::{FlatToken, StyleDictionary};
use crate::naming::escape_single_quoted;
use crate::types::{format_number, TokenValue};
use std::fmt::Write;

/// Value as written into a stylesheet: dimensions get `px`.
pub fn css_value(token: &FlatToken) -> String {
    match &token.value {
        TokenValue::Number(n) => px(*n),
        other => other.to_string(),
    }
}

pub(crate) fn px(n: f64) -> String {
    format!("{}px", format_number(n))
}

pub fn css(table: &StyleDictionary) -> String {
    let mut out = String::from(":root {\n");
    for (category, name, token) in table.entries() {
        let _ = writeln!(out, "  --{}-{}: {};", category, name, css_value(token));
    }
    out.push_str("}\n");
    out
}

pub fn scss(table: &StyleDictionary) -> String {
    let mut out = String::new();
    for (category, tokens) in table.categories() {
        let _ = writeln!(out, "// {}", category);
        for (name, token) in tokens {
            let _ = writeln!(out, "${}-{}: {};", category, name, css_value(token));
        }
        out.push('\n');
    }
    out
}

fn object_literal(out: &mut String, table: &StyleDictionary) {
    for (category, tokens) in table.categories() {
        let _ = writeln!(out, "  '{}': {{", escape_single_quoted(category));
        for (name, token) in tokens {
            let _ = writeln!(
                out,
                "    '{}': '{}',",
                escape_single_quoted(name),
                escape_single_quoted(&token.value.to_string())
            );
        }
        out.push_str("  },\n");
    }
}

pub fn javascript(table: &StyleDictionary) -> String {
    let mut out = String::from("export const designTokens = {\n");
    object_literal(&mut out, table);
    out.push_str("};\n");
    out
}

pub fn typescript(table: &StyleDictionary) -> String {
    let mut out = String::from("export interface DesignTokens {\n");
    for (category, tokens) in table.categories() {
        let _ = writeln!(out, "  '{}': {{", escape_single_quoted(category));
        for name in tokens.keys() {
            let _ = writeln!(out, "    '{}': string;", escape_single_quoted(name));
        }
        out.push_str("  };\n");
    }
    out.push_str("}\n\nexport const designTokens: DesignTokens = {\n");
    object_literal(&mut out, table);
    out.push_str("};\n");
    out
}

pub fn react_native(table: &StyleDictionary) -> String {
    let mut out = String::from("const designTokens = {\n");
    object_literal(&mut out, table);
    out.push_str("};\n\nexport default designTokens;\n");
    out
}
