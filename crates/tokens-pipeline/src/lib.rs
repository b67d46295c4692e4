use thiserror::Error;
use tokens_core::export::{self, ExportTarget, Platform};
use tokens_core::{build_token_tree, list_variables, ExportOptions, SnapshotSource, TokenError};
use tokens_github::{PublishError, PublishRequest, Publisher};
use tokens_schema::{Command, PushRequest, PushResult, Response};
use tracing::{error, info, instrument};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to load variables: {0}")]
    Snapshot(#[source] TokenError),
    #[error("Export failed: {0}")]
    Export(#[from] TokenError),
    #[error("Failed to push to GitHub: {0}")]
    Publish(#[from] PublishError),
}

/// Runs one command and turns any failure into [`Response::ExportError`].
#[instrument(level = "info", skip_all, fields(command = command_name(&command)))]
pub async fn handle_command(
    source: &dyn SnapshotSource,
    publisher: &dyn Publisher,
    command: Command,
) -> Response {
    match run(source, publisher, command).await {
        Ok(response) => response,
        Err(e) => {
            error!("{}", e);
            Response::error(e.to_string())
        }
    }
}

/// Same as [`handle_command`] but keeps the typed error.
pub async fn run(
    source: &dyn SnapshotSource,
    publisher: &dyn Publisher,
    command: Command,
) -> Result<Response, PipelineError> {
    match command {
        Command::GetVariables => {
            let snapshot = source.fetch().await.map_err(PipelineError::Snapshot)?;
            Ok(Response::VariablesLoaded {
                variables: list_variables(&snapshot),
            })
        }
        Command::ExportTokens(options) => export_target(source, Platform::Dtcg.into(), &options).await,
        Command::ExportTokenStudio(options) => {
            export_target(source, Platform::TokenStudio.into(), &options).await
        }
        Command::ExportStyleDictionary(request) => {
            export_target(source, request.platform, &request.options).await
        }
        Command::ExportTailwindCss(options) => {
            export_target(source, Platform::Tailwind.into(), &options).await
        }
        Command::PushToGithub(request) => push(publisher, request).await,
    }
}

async fn export_target(
    source: &dyn SnapshotSource,
    target: ExportTarget,
    options: &ExportOptions,
) -> Result<Response, PipelineError> {
    let snapshot = source.fetch().await.map_err(PipelineError::Snapshot)?;
    let tree = build_token_tree(&snapshot, options);
    let (output, filename) = export::render_target(target, &tree)?;
    info!(%target, tokens = tree.len(), bytes = output.len(), "Export complete");
    Ok(Response::ExportComplete {
        output,
        filename: filename.to_string(),
        platform: Some(target),
    })
}

async fn push(publisher: &dyn Publisher, request: PushRequest) -> Result<Response, PipelineError> {
    let filename = request.filename.clone();
    let published = publisher.publish(&publish_request(request)).await?;
    info!(publisher = publisher.name(), path = %published.path, created = published.created, "Push complete");
    Ok(Response::GithubPushComplete {
        result: PushResult {
            success: true,
            message: format!("Successfully pushed {} to GitHub", filename),
            url: published.html_url,
        },
    })
}

pub fn publish_request(request: PushRequest) -> PublishRequest {
    PublishRequest {
        repo_url: request.repo_url,
        token: request.token,
        branch: request.branch,
        path: request.path,
        content: request.content,
        filename: request.filename,
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::GetVariables => "get-variables",
        Command::ExportTokens(_) => "export-tokens",
        Command::ExportTokenStudio(_) => "export-token-studio",
        Command::ExportStyleDictionary(_) => "export-style-dictionary",
        Command::ExportTailwindCss(_) => "export-tailwind-css",
        Command::PushToGithub(_) => "push-to-github",
    }
}
