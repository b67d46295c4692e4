//! # Export Module
//!
//! Renders a [`TokenTree`] into platform source files.
//!
//! ## Responsibilities
//! - **Platforms**: The closed set of output targets and their file names.
//! - **Code formatters**: CSS, SCSS, JS, TS, React Native ([`web`]), Swift,
//!   Kotlin, Dart ([`native`]) and Tailwind ([`tailwind`]), all driven by the
//!   flat [`StyleDictionary`] table or the tree.
//! - **JSON formatters**: the flat table, the DTCG tree and Token Studio sets
//!   ([`studio`]).
//! - **Batch**: [`render_all`] runs every platform and reports failures inline.

pub mod native;
pub mod studio;
pub mod tailwind;
pub mod web;

use crate::dictionary::StyleDictionary;
use crate::errors::TokenError;
use crate::tokens::TokenTree;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::{instrument, warn};

/// File name used for the combined output of [`render_all`].
pub const ALL_PLATFORMS_FILENAME: &str = "all-platforms.json";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    Css,
    Scss,
    Js,
    Ts,
    Ios,
    Android,
    Flutter,
    ReactNative,
    Json,
    Tailwind,
    TokenStudio,
    Dtcg,
}

impl Platform {
    pub const ALL: [Platform; 12] = [
        Platform::Css,
        Platform::Scss,
        Platform::Js,
        Platform::Ts,
        Platform::Ios,
        Platform::Android,
        Platform::Flutter,
        Platform::ReactNative,
        Platform::Json,
        Platform::Tailwind,
        Platform::TokenStudio,
        Platform::Dtcg,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Platform::Css => "css",
            Platform::Scss => "scss",
            Platform::Js => "js",
            Platform::Ts => "ts",
            Platform::Ios => "ios",
            Platform::Android => "android",
            Platform::Flutter => "flutter",
            Platform::ReactNative => "react-native",
            Platform::Json => "json",
            Platform::Tailwind => "tailwind",
            Platform::TokenStudio => "token-studio",
            Platform::Dtcg => "dtcg",
        }
    }

    pub fn filename(&self) -> &'static str {
        match self {
            Platform::Css => "design-tokens.css",
            Platform::Scss => "design-tokens.scss",
            Platform::Js => "design-tokens.js",
            Platform::Ts => "design-tokens.ts",
            Platform::Ios => "DesignTokens.swift",
            Platform::Android => "DesignTokens.kt",
            Platform::Flutter => "design_tokens.dart",
            Platform::ReactNative => "DesignTokens.js",
            Platform::Json => "design-tokens.json",
            Platform::Tailwind => "tailwind.config.js",
            Platform::TokenStudio => "tokens-studio.json",
            Platform::Dtcg => "tokens.json",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Platform {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Platform::ALL
            .into_iter()
            .find(|p| p.id() == wanted)
            .ok_or_else(|| TokenError::UnknownPlatform(s.to_string()))
    }
}

/// One platform, or every platform at once (`"all"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ExportTarget {
    All,
    Only(Platform),
}

impl ExportTarget {
    pub fn filename(&self) -> &'static str {
        match self {
            ExportTarget::All => ALL_PLATFORMS_FILENAME,
            ExportTarget::Only(p) => p.filename(),
        }
    }
}

impl fmt::Display for ExportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportTarget::All => f.write_str("all"),
            ExportTarget::Only(p) => p.fmt(f),
        }
    }
}

impl FromStr for ExportTarget {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(ExportTarget::All)
        } else {
            s.parse::<Platform>().map(ExportTarget::Only)
        }
    }
}

impl TryFrom<String> for ExportTarget {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ExportTarget> for String {
    fn from(target: ExportTarget) -> Self {
        target.to_string()
    }
}

impl From<Platform> for ExportTarget {
    fn from(platform: Platform) -> Self {
        ExportTarget::Only(platform)
    }
}

/// Renders one platform file from the tree.
#[instrument(level = "debug", skip(tree), fields(tokens = tree.len()))]
pub fn render(platform: Platform, tree: &TokenTree) -> Result<String, TokenError> {
    let table = || StyleDictionary::from_tree(tree);
    let output = match platform {
        Platform::Css => web::css(&table()),
        Platform::Scss => web::scss(&table()),
        Platform::Js => web::javascript(&table()),
        Platform::Ts => web::typescript(&table()),
        Platform::ReactNative => web::react_native(&table()),
        Platform::Ios => native::swift(&table()),
        Platform::Android => native::kotlin(&table()),
        Platform::Flutter => native::dart(&table()),
        Platform::Json => table().to_json_pretty()?,
        Platform::Tailwind => tailwind::config(tree),
        Platform::TokenStudio => studio::to_json_pretty(tree)?,
        Platform::Dtcg => tree.to_json_pretty()?,
    };
    Ok(output)
}

/// Renders every platform into one JSON object keyed by platform id.
///
/// A platform that fails is recorded as `{ "error": message }` and the rest
/// still render.
pub fn render_all(tree: &TokenTree) -> Result<String, TokenError> {
    let mut outputs = Map::new();
    for platform in Platform::ALL {
        let entry = match render(platform, tree) {
            Ok(text) => Value::String(text),
            Err(e) => {
                warn!(%platform, "Platform export failed: {}", e);
                serde_json::json!({ "error": e.to_string() })
            }
        };
        outputs.insert(platform.id().to_string(), entry);
    }
    Ok(serde_json::to_string_pretty(&Value::Object(outputs))?)
}

/// Renders `target`, returning the output and its file name.
pub fn render_target(target: ExportTarget, tree: &TokenTree) -> Result<(String, &'static str), TokenError> {
    let output = match target {
        ExportTarget::All => render_all(tree)?,
        ExportTarget::Only(platform) => render(platform, tree)?,
    };
    Ok((output, target.filename()))
}
