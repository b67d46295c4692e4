//! Swift, Kotlin and Dart formatters.
//!
//! Identifiers are the camelCased `category-name` pair, so tokens from
//! different modes never collide. Colors are re-parsed from their display
//! value; a value that is not a color (an alias placeholder) is written as a
//! string and flagged `// unresolved`.

use crate::dictionary::{FlatToken, StyleDictionary};
use crate::naming::{camel_identifier, escape_double_quoted, escape_single_quoted};
use crate::types::{format_number, Color, TokenType, TokenValue};
use std::fmt::Write;

fn identifier(category: &str, name: &str) -> String {
    camel_identifier(&format!("{}-{}", category, name))
}

fn color_of(token: &FlatToken) -> Option<Color> {
    match &token.value {
        TokenValue::Color(c) => Some(*c),
        other => Color::parse(&other.to_string()).ok(),
    }
}

fn component(c: f64) -> String {
    format_number((c.clamp(0.0, 1.0) * 1000.0).round() / 1000.0)
}

fn argb_literal(color: &Color) -> String {
    format!("0x{:08X}", color.to_argb())
}

pub fn swift(table: &StyleDictionary) -> String {
    let mut out = String::from("import UIKit\n\npublic enum DesignTokens {\n");
    for (category, tokens) in table.categories() {
        let _ = writeln!(out, "    // MARK: - {}", category);
        for (name, token) in tokens {
            let id = identifier(category, name);
            let line = match (token.kind, &token.value) {
                (TokenType::Color, _) => match color_of(token) {
                    Some(c) => format!(
                        "public static let {} = UIColor(red: {}, green: {}, blue: {}, alpha: {})",
                        id,
                        component(c.r),
                        component(c.g),
                        component(c.b),
                        component(c.a)
                    ),
                    None => unresolved_swift(&id, token),
                },
                (TokenType::Number, TokenValue::Number(n)) => {
                    format!("public static let {}: CGFloat = {}", id, format_number(*n))
                }
                (TokenType::Boolean, TokenValue::Boolean(b)) => {
                    format!("public static let {} = {}", id, b)
                }
                (TokenType::Text, TokenValue::Text(s)) => {
                    format!("public static let {} = \"{}\"", id, escape_double_quoted(s))
                }
                _ => unresolved_swift(&id, token),
            };
            let _ = writeln!(out, "    {}", line);
        }
        out.push('\n');
    }
    out.push_str("}\n");
    out
}

fn unresolved_swift(id: &str, token: &FlatToken) -> String {
    format!(
        "public static let {} = \"{}\" // unresolved",
        id,
        escape_double_quoted(&token.value.to_string())
    )
}

pub fn kotlin(table: &StyleDictionary) -> String {
    let mut out = String::from(
        "package com.example.designsystem\n\nimport androidx.compose.ui.graphics.Color\n\nobject DesignTokens {\n",
    );
    for (category, tokens) in table.categories() {
        let _ = writeln!(out, "    // {}", category);
        for (name, token) in tokens {
            let id = identifier(category, name);
            let line = match (token.kind, &token.value) {
                (TokenType::Color, _) => match color_of(token) {
                    Some(c) => format!("val {} = Color({})", id, argb_literal(&c)),
                    None => unresolved_kotlin(&id, token),
                },
                (TokenType::Number, TokenValue::Number(n)) => {
                    format!("const val {} = {}f", id, format_number(*n))
                }
                (TokenType::Boolean, TokenValue::Boolean(b)) => format!("const val {} = {}", id, b),
                (TokenType::Text, TokenValue::Text(s)) => {
                    format!("const val {} = \"{}\"", id, escape_kotlin(s))
                }
                _ => unresolved_kotlin(&id, token),
            };
            let _ = writeln!(out, "    {}", line);
        }
        out.push('\n');
    }
    out.push_str("}\n");
    out
}

fn escape_kotlin(s: &str) -> String {
    escape_double_quoted(s).replace('$', "\\$")
}

fn unresolved_kotlin(id: &str, token: &FlatToken) -> String {
    format!(
        "const val {} = \"{}\" // unresolved",
        id,
        escape_kotlin(&token.value.to_string())
    )
}

pub fn dart(table: &StyleDictionary) -> String {
    let mut out = String::from(
        "import 'package:flutter/material.dart';\n\nclass DesignTokens {\n  DesignTokens._();\n\n",
    );
    for (category, tokens) in table.categories() {
        let _ = writeln!(out, "  // {}", category);
        for (name, token) in tokens {
            let id = identifier(category, name);
            let line = match (token.kind, &token.value) {
                (TokenType::Color, _) => match color_of(token) {
                    Some(c) => format!("static const Color {} = Color({});", id, argb_literal(&c)),
                    None => unresolved_dart(&id, token),
                },
                (TokenType::Number, TokenValue::Number(n)) => {
                    format!("static const double {} = {};", id, format_number(*n))
                }
                (TokenType::Boolean, TokenValue::Boolean(b)) => {
                    format!("static const bool {} = {};", id, b)
                }
                (TokenType::Text, TokenValue::Text(s)) => {
                    format!("static const String {} = '{}';", id, escape_dart(s))
                }
                _ => unresolved_dart(&id, token),
            };
            let _ = writeln!(out, "  {}", line);
        }
        out.push('\n');
    }
    out.push_str("}\n");
    out
}

fn escape_dart(s: &str) -> String {
    escape_single_quoted(s).replace('$', "\\$")
}

fn unresolved_dart(id: &str, token: &FlatToken) -> String {
    format!(
        "static const String {} = '{}'; // unresolved",
        id,
        escape_dart(&token.value.to_string())
    )
}
