//! # Tokenforge
//!
//! `tokenforge` resolves design variables exported from a design file into
//! design tokens and renders them for web, native and JSON tool chains.
//!
//! The work is split across the workspace crates, re-exported here:
//!
//! *   [`data`]: serde model of the variable snapshot.
//! *   [`tokens`]: alias resolution, the token tree and the platform formatters.
//! *   [`schema`]: command and response messages.
//! *   [`pipeline`]: runs one command against one snapshot.
//! *   [`github`]: pushes an exported file to a repository.
//!
//! ```rust,no_run
//! # async fn run() -> anyhow::Result<()> {
//! let css = tokenforge::export_file("variables.json", "css", Default::default()).await?;
//! println!("{}", css);
//! # Ok(())
//! # }
//! ```

pub use tokens_core as tokens;
pub use tokens_data as data;
pub use tokens_github as github;
pub use tokens_pipeline as pipeline;
pub use tokens_schema as schema;

use anyhow::{Context, Result};
use std::path::Path;
use tokens_core::export::{self, ExportTarget};
use tokens_core::{build_token_tree, ExportOptions, JsonFileSource, SnapshotSource};

/// Reads a snapshot file and renders it for `platform` (a platform id or `"all"`).
pub async fn export_file(path: impl AsRef<Path>, platform: &str, options: ExportOptions) -> Result<String> {
    let target: ExportTarget = platform.parse()?;
    let snapshot = JsonFileSource::new(path.as_ref()).fetch().await?;
    let tree = build_token_tree(&snapshot, &options);
    let (output, _) = export::render_target(target, &tree)?;
    Ok(output)
}

/// Parses a JSON command message, runs it against the snapshot file and
/// returns the JSON response. Pushes go to the public GitHub API.
pub async fn run_message(snapshot: impl AsRef<Path>, message: &str) -> Result<String> {
    let command: schema::Command = serde_json::from_str(message).context("invalid command message")?;
    let source = JsonFileSource::new(snapshot.as_ref());
    let publisher = github::GitHubPublisher::new();
    let response = pipeline::handle_command(&source, &publisher, command).await;
    Ok(serde_json::to_string(&response)?)
}
