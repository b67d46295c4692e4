use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use tokens_core::export::ExportTarget;
use tokens_core::{AliasMode, ExportOptions, JsonFileSource};
use tokens_github::GitHubPublisher;
use tokens_schema::{Command, PushRequest, Response, StyleDictionaryRequest};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "tokenforge", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,

    /// Log level
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// List variables and paint styles grouped by collection
    List {
        /// Snapshot JSON exported from the design file
        #[arg(value_name = "SNAPSHOT")]
        snapshot: PathBuf,
    },
    /// Write the DTCG token tree
    Tree {
        #[arg(value_name = "SNAPSHOT")]
        snapshot: PathBuf,
        #[command(flatten)]
        filter: FilterArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Render one platform, or every platform with `--platform all`
    Export {
        #[arg(value_name = "SNAPSHOT")]
        snapshot: PathBuf,
        /// css, scss, js, ts, ios, android, flutter, react-native, json,
        /// tailwind, token-studio, dtcg or all
        #[arg(short, long, default_value = "json")]
        platform: ExportTarget,
        #[command(flatten)]
        filter: FilterArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Run a JSON command message and print the JSON response
    Run {
        #[arg(value_name = "SNAPSHOT")]
        snapshot: PathBuf,
        /// File holding the command, `-` for stdin
        #[arg(value_name = "COMMAND")]
        command: PathBuf,
    },
    /// Create or update a file in a GitHub repository
    Push {
        /// File whose content is pushed
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(long)]
        repo: String,
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: String,
        #[arg(long, default_value = "main")]
        branch: String,
        /// Directory inside the repository
        #[arg(long, default_value = "")]
        path: String,
        /// Name in the repository; defaults to the local file name
        #[arg(long)]
        filename: Option<String>,
        #[arg(long, env = "GITHUB_API_URL", default_value = tokens_github::contents::DEFAULT_API_BASE)]
        api_url: String,
    },
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Collections to include, comma separated ("Paint Styles" and "Text Styles" select styles)
    #[arg(long, value_delimiter = ',')]
    collections: Vec<String>,

    /// How alias values are written
    #[arg(long, value_enum, default_value_t = AliasModeArg::Resolve)]
    alias_mode: AliasModeArg,
}

impl FilterArgs {
    fn options(&self) -> ExportOptions {
        ExportOptions {
            selected_collections: self.collections.clone(),
            alias_mode: match self.alias_mode {
                AliasModeArg::Resolve => AliasMode::Resolve,
                AliasModeArg::Reference => AliasMode::Reference,
            },
        }
    }
}

#[derive(Args, Debug, Default)]
struct OutputArgs {
    /// Output file; stdout when omitted
    #[arg(short, long, conflicts_with = "out_dir")]
    output: Option<PathBuf>,

    /// Directory to write the platform's default file name into
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

impl OutputArgs {
    fn destination(&self, filename: &str) -> Option<PathBuf> {
        match (&self.output, &self.out_dir) {
            (Some(path), _) => Some(path.clone()),
            (None, Some(dir)) => Some(dir.join(filename)),
            (None, None) => None,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug, Default)]
enum AliasModeArg {
    #[default]
    Resolve,
    Reference,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogFormat {
    Pretty,
    Json,
}

fn init_logging(level: LogLevel, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.to_string().parse()?)
        .from_env_lossy();

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level, cli.log_format)?;

    if let Err(e) = execute(cli.command).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn execute(command: CliCommand) -> Result<()> {
    match command {
        CliCommand::List { snapshot } => {
            let response = dispatch(&snapshot, None, Command::GetVariables).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        CliCommand::Tree { snapshot, filter, output } => {
            let response = dispatch(&snapshot, None, Command::ExportTokens(filter.options())).await?;
            write_export(response, &output)?;
        }
        CliCommand::Export {
            snapshot,
            platform,
            filter,
            output,
        } => {
            let command = Command::ExportStyleDictionary(StyleDictionaryRequest {
                platform,
                options: filter.options(),
            });
            let response = dispatch(&snapshot, None, command).await?;
            write_export(response, &output)?;
        }
        CliCommand::Run { snapshot, command } => {
            let text = if command.as_os_str() == "-" {
                std::io::read_to_string(std::io::stdin())?
            } else {
                fs::read_to_string(&command).with_context(|| format!("reading {}", command.display()))?
            };
            let message: Command = serde_json::from_str(&text).context("parsing command message")?;
            let api_url = std::env::var("GITHUB_API_URL").ok();
            let response = dispatch(&snapshot, api_url, message).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        CliCommand::Push {
            file,
            repo,
            token,
            branch,
            path,
            filename,
            api_url,
        } => {
            let content =
                fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?;
            let filename = match filename {
                Some(name) => name,
                None => file_name(&file)?,
            };
            let command = Command::PushToGithub(PushRequest {
                repo_url: repo,
                token,
                branch,
                path,
                content,
                filename,
            });
            // The snapshot is never read for a push.
            match dispatch(Path::new(""), Some(api_url), command).await? {
                Response::GithubPushComplete { result } => {
                    info!("{}", result.message);
                    if let Some(url) = result.url {
                        println!("{}", url);
                    }
                }
                Response::ExportError { message } => bail!(message),
                other => bail!("unexpected response: {:?}", other),
            }
        }
    }
    Ok(())
}

async fn dispatch(snapshot: &Path, api_url: Option<String>, command: Command) -> Result<Response> {
    let source = JsonFileSource::new(snapshot);
    let publisher = match api_url {
        Some(url) => GitHubPublisher::with_api_base(url),
        None => GitHubPublisher::new(),
    };
    Ok(tokens_pipeline::handle_command(&source, &publisher, command).await)
}

fn write_export(response: Response, output: &OutputArgs) -> Result<()> {
    match response {
        Response::ExportComplete { output: text, filename, .. } => match output.destination(&filename) {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
                info!("Wrote {}", path.display());
            }
            None => print!("{}", text),
        },
        Response::ExportError { message } => bail!(message),
        other => bail!("unexpected response: {:?}", other),
    }
    Ok(())
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .with_context(|| format!("{} has no file name", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tokens_core::export::Platform;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn export_arguments() {
        let cli = Cli::try_parse_from([
            "tokenforge",
            "export",
            "vars.json",
            "--platform",
            "react-native",
            "--collections",
            "Colors,Paint Styles",
            "--alias-mode",
            "reference",
            "--out-dir",
            "dist",
        ])
        .unwrap();
        let CliCommand::Export { platform, filter, output, .. } = cli.command else {
            panic!("expected export");
        };
        assert_eq!(platform, ExportTarget::Only(Platform::ReactNative));
        let options = filter.options();
        assert_eq!(options.selected_collections, ["Colors", "Paint Styles"]);
        assert_eq!(options.alias_mode, AliasMode::Reference);
        assert_eq!(output.destination("DesignTokens.js"), Some(PathBuf::from("dist/DesignTokens.js")));
    }

    #[test]
    fn unknown_platform_is_rejected() {
        assert!(Cli::try_parse_from(["tokenforge", "export", "vars.json", "-p", "cobol"]).is_err());
    }

    #[test]
    fn output_and_out_dir_conflict() {
        assert!(Cli::try_parse_from(["tokenforge", "tree", "v.json", "-o", "a.json", "--out-dir", "d"]).is_err());
    }

    #[test]
    fn global_log_flags() {
        let cli = Cli::try_parse_from(["tokenforge", "list", "v.json", "--log-level", "debug", "--log-format", "json"])
            .unwrap();
        assert_eq!(cli.log_level, LogLevel::Debug);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn push_takes_token_from_flag() {
        let cli = Cli::try_parse_from([
            "tokenforge",
            "push",
            "dist/tokens.json",
            "--repo",
            "https://github.com/acme/tokens",
            "--token",
            "abc",
        ])
        .unwrap();
        let CliCommand::Push { branch, path, filename, .. } = cli.command else {
            panic!("expected push");
        };
        assert_eq!(branch, "main");
        assert_eq!(path, "");
        assert_eq!(filename, None);
        assert_eq!(file_name(Path::new("dist/tokens.json")).unwrap(), "tokens.json");
    }

    #[tokio::test]
    async fn export_writes_into_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("vars.json");
        fs::write(
            &snapshot,
            r#"{
                "collections": [{ "id": "c", "name": "Spacing", "modes": [{ "modeId": "m", "name": "Base" }], "variableIds": ["v"] }],
                "variables": [{ "id": "v", "name": "Gap", "resolvedType": "FLOAT", "valuesByMode": { "m": 4 } }]
            }"#,
        )
        .unwrap();

        execute(CliCommand::Export {
            snapshot,
            platform: Platform::Css.into(),
            filter: FilterArgs::default(),
            output: OutputArgs {
                output: None,
                out_dir: Some(dir.path().join("out")),
            },
        })
        .await
        .unwrap();

        let css = fs::read_to_string(dir.path().join("out/design-tokens.css")).unwrap();
        assert_eq!(css, ":root {\n  --spacing-base-gap: 4px;\n}\n");
    }

    #[tokio::test]
    async fn missing_snapshot_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = execute(CliCommand::Tree {
            snapshot: dir.path().join("nope.json"),
            filter: FilterArgs::default(),
            output: OutputArgs::default(),
        })
        .await;
        assert!(result.is_err());
    }
}
