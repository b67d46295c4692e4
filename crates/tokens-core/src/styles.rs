//! # Styles Module
//!
//! Tokens derived from classic paint and text styles.
//!
//! Styles land at the tree root under their own name path. A style is skipped
//! whenever any variable in the snapshot has the same dotted name, so a value
//! exposed through both systems only appears once, as the variable.

use crate::flatten::{ExportOptions, PAINT_STYLES, TEXT_STYLES};
use crate::tokens::TokenTree;
use crate::types::{Color, Token, TokenType, TokenValue};
use std::collections::HashSet;
use tokens_data::model::{alias_path, LineHeightUnit, PaintKind, PaintStyle, TextStyle, VariableSnapshot};
use tracing::debug;

pub fn merge_styles(tree: &mut TokenTree, snapshot: &VariableSnapshot, options: &ExportOptions) {
    let claimed: HashSet<String> = snapshot.variables.iter().map(|v| v.alias_path()).collect();

    if options.includes(PAINT_STYLES) {
        for style in &snapshot.paint_styles {
            if claimed.contains(&alias_path(&style.name)) {
                debug!(style = %style.name, "Paint style shadowed by a variable");
                continue;
            }
            if let Some(token) = paint_style_token(style) {
                tree.insert(style.name.split('/'), token);
            }
        }
    }

    if options.includes(TEXT_STYLES) {
        for style in &snapshot.text_styles {
            if claimed.contains(&alias_path(&style.name)) {
                debug!(style = %style.name, "Text style shadowed by a variable");
                continue;
            }
            if let Some(token) = text_style_token(style) {
                tree.insert(style.name.split('/'), token);
            }
        }
    }
}

/// Color token from the first paint, when it is a visible solid fill.
pub fn paint_style_token(style: &PaintStyle) -> Option<Token> {
    let paint = style.paints.first()?;
    if paint.kind != PaintKind::Solid || !paint.visible {
        return None;
    }
    let c = paint.color?;
    let color = Color::new(c.r, c.g, c.b, paint.opacity.unwrap_or(1.0));
    Some(Token::new(TokenType::Color, TokenValue::Color(color)).with_description(&style.description))
}

/// Number token: line height for styles named `... line-height`, font size otherwise.
pub fn text_style_token(style: &TextStyle) -> Option<Token> {
    let value = if style.name.to_lowercase().contains("line-height") {
        match style.line_height.unit {
            LineHeightUnit::Auto => None,
            _ => style.line_height.value,
        }
    } else {
        style.font_size
    };
    value.map(|v| Token::new(TokenType::Number, TokenValue::Number(v)).with_description(&style.description))
}
