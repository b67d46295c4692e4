//! # Types Module
//!
//! Shared data types used across the exporter.
//!
//! ## Responsibilities
//! - **Color**: RGBA color with canonical hex formatting and the inverse parser.
//! - **Token**: The platform-agnostic leaf stored in a token tree.
//! - **Numbers**: Unit-less number rendering shared by all formatters.
//!
//! ## Key Types
//! - `Color`: Float-based RGBA color.
//! - `TokenType`: `color`, `number`, `text` or `boolean`.
//! - `TokenValue`: A resolved literal or an alias placeholder.

use crate::errors::TokenError;
use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use tokens_data::model::{ResolvedType, Rgba};

static FUNCTIONAL_COMPONENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?|\.\d+").unwrap());

/// Represents a RGBA color in float format (0.0 - 1.0).
///
/// Hex convention: `#rrggbb` for opaque colors, `#rrggbbaa` (alpha last)
/// otherwise. Digits are lowercase. [`Color::parse`] reads the same layout.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        }
    }

    /// Channels as bytes: `round(clamp(c, 0, 1) * 255)`.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            channel(self.r),
            channel(self.g),
            channel(self.b),
            channel(self.a),
        ]
    }

    /// True when alpha rounds to the byte `ff`.
    pub fn is_opaque(&self) -> bool {
        channel(self.a) == u8::MAX
    }

    /// Canonical hex form, alpha appended only when the color is not fully opaque.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
        }
    }

    /// Packed `0xAARRGGBB`, the layout Compose and Flutter expect.
    pub fn to_argb(&self) -> u32 {
        let [r, g, b, a] = self.to_rgba8();
        u32::from_be_bytes([a, r, g, b])
    }

    /// `rgba(255, 0, 0, 0.5)` with byte channels and fractional alpha.
    pub fn to_rgba_string(&self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("rgba({}, {}, {}, {})", r, g, b, format_number(self.a))
    }

    /// Parses `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(...)` and `rgba(...)`.
    pub fn parse(value: &str) -> Result<Color, TokenError> {
        let value = value.trim();
        if let Some(hex) = value.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| TokenError::InvalidColor(value.to_string()));
        }
        if value.starts_with("rgb") {
            let parts: Vec<f64> = FUNCTIONAL_COMPONENT
                .find_iter(value)
                .filter_map(|m| m.as_str().parse().ok())
                .collect();
            if parts.len() >= 3 {
                let a = parts.get(3).copied().unwrap_or(1.0);
                return Ok(Color::new(
                    parts[0] / 255.0,
                    parts[1] / 255.0,
                    parts[2] / 255.0,
                    a,
                ));
            }
        }
        Err(TokenError::InvalidColor(value.to_string()))
    }
}

fn channel(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expanded: String = match hex.len() {
        3 | 4 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => hex.to_string(),
        _ => return None,
    };
    let byte = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    let a = if expanded.len() == 8 { byte(6)? } else { 255 };
    Some(Color::from_rgba8(byte(0)?, byte(2)?, byte(4)?, a))
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<Rgba> for Color {
    fn from(c: Rgba) -> Self {
        Color::new(c.r, c.g, c.b, c.a)
    }
}

/// Renders a number without a unit. Integral values drop the fraction (`8`, not `8.0`).
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Color,
    Number,
    Text,
    Boolean,
}

impl TokenType {
    /// Maps the host's declared type. Unknown types have no token form.
    pub fn from_resolved(resolved: ResolvedType) -> Option<Self> {
        match resolved {
            ResolvedType::Color => Some(TokenType::Color),
            ResolvedType::Float => Some(TokenType::Number),
            ResolvedType::String => Some(TokenType::Text),
            ResolvedType::Boolean => Some(TokenType::Boolean),
            ResolvedType::Unknown => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Color => "color",
            TokenType::Number => "number",
            TokenType::Text => "text",
            TokenType::Boolean => "boolean",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "color" => Some(TokenType::Color),
            "number" | "dimension" => Some(TokenType::Number),
            "text" | "string" => Some(TokenType::Text),
            "boolean" => Some(TokenType::Boolean),
            _ => None,
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value of a token leaf.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenValue {
    Color(Color),
    Number(f64),
    Text(String),
    Boolean(bool),
    /// Dotted path (or raw id) of an alias target that was not resolved.
    /// Rendered as `{path}`.
    Alias(String),
}

impl TokenValue {
    pub fn as_color(&self) -> Option<Color> {
        match self {
            TokenValue::Color(c) => Some(*c),
            _ => None,
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Color(c) => f.write_str(&c.to_hex()),
            TokenValue::Number(n) => f.write_str(&format_number(*n)),
            TokenValue::Text(s) => f.write_str(s),
            TokenValue::Boolean(b) => write!(f, "{}", b),
            TokenValue::Alias(path) => write!(f, "{{{}}}", path),
        }
    }
}

impl Serialize for TokenValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TokenValue::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                serializer.serialize_i64(*n as i64)
            }
            TokenValue::Number(n) => serializer.serialize_f64(*n),
            TokenValue::Boolean(b) => serializer.serialize_bool(*b),
            TokenValue::Text(s) => serializer.serialize_str(s),
            other => serializer.serialize_str(&other.to_string()),
        }
    }
}

/// A single design token: `{ $type, $value, $description? }`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Token {
    #[serde(rename = "$type")]
    pub kind: TokenType,
    #[serde(rename = "$value")]
    pub value: TokenValue,
    #[serde(rename = "$description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Token {
    pub fn new(kind: TokenType, value: TokenValue) -> Self {
        Self {
            kind,
            value,
            description: None,
        }
    }

    /// Attaches a description; empty strings count as none.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = if description.is_empty() {
            None
        } else {
            Some(description.to_string())
        };
        self
    }
}
