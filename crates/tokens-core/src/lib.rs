//! # Tokens Core
//!
//! `tokens-core` turns a snapshot of design variables and styles into design
//! tokens and renders them for every supported platform.
//!
//! ## Core Features
//!
//! *   **Alias Resolution**: Follows `VARIABLE_ALIAS` chains with a fixed depth ceiling.
//! *   **Token Tree**: Ordered, DTCG-shaped tree keyed by `"{collection}/{mode}"`.
//! *   **Styles**: Paint and text styles merged in, with variables taking precedence.
//! *   **Formatters**: CSS, SCSS, JS, TS, Swift, Kotlin, Dart, React Native,
//!     Tailwind, Style Dictionary JSON, Token Studio and DTCG output.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tokens_core::{build_token_tree, export, ExportOptions, JsonFileSource, SnapshotSource};
//!
//! # async fn run() -> Result<(), tokens_core::TokenError> {
//! let snapshot = JsonFileSource::new("variables.json").fetch().await?;
//! let tree = build_token_tree(&snapshot, &ExportOptions::default());
//! let css = export::render(export::Platform::Css, &tree)?;
//! # Ok(())
//! # }
//! ```

/// Variable listing grouped by collection.
pub mod catalog;

/// Style Dictionary flat table.
pub mod dictionary;

pub mod errors;

/// Platform formatters.
pub mod export;

/// Token tree construction from a snapshot.
pub mod flatten;

/// Identifier and string-literal helpers for generated code.
pub mod naming;

/// Alias chain resolution.
pub mod resolver;

pub mod styles;

/// The ordered token tree.
pub mod tokens;

/// Colors, token types and values.
pub mod types;

pub use catalog::{list_variables, VariableCatalog, VariableSummary};
pub use dictionary::StyleDictionary;
pub use errors::TokenError;
pub use flatten::{build_token_tree, AliasMode, ExportOptions};
pub use resolver::{resolve_alias, AliasResolver, MAX_ALIAS_DEPTH};
pub use tokens::{TokenNode, TokenTree};
pub use types::{Color, Token, TokenType, TokenValue};

use async_trait::async_trait;
use std::path::PathBuf;
use tokens_data::model::VariableSnapshot;
use tracing::instrument;

/// Where snapshots come from.
///
/// The host document is only reachable through some bridge (a plugin
/// message, an HTTP endpoint, a file dropped on disk), so fetching is async
/// and may fail with [`TokenError::Transport`]. Every command fetches a
/// fresh snapshot.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch(&self) -> Result<VariableSnapshot, TokenError>;
}

/// Reads a snapshot from a JSON file.
#[derive(Clone, Debug)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotSource for JsonFileSource {
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> Result<VariableSnapshot, TokenError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            TokenError::Transport(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Serves a snapshot that is already in memory.
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    snapshot: VariableSnapshot,
}

impl StaticSource {
    pub fn new(snapshot: VariableSnapshot) -> Self {
        Self { snapshot }
    }
}

#[async_trait]
impl SnapshotSource for StaticSource {
    async fn fetch(&self) -> Result<VariableSnapshot, TokenError> {
        Ok(self.snapshot.clone())
    }
}
