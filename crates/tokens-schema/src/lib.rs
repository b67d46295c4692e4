//! Messages exchanged between a front end and the exporter.
//!
//! Both directions are JSON objects tagged by `type`, e.g.
//! `{"type": "export-style-dictionary", "platform": "css", "selectedCollections": ["Colors"]}`.

use serde::{Deserialize, Serialize};
use tokens_core::catalog::VariableCatalog;
use tokens_core::export::ExportTarget;
use tokens_core::ExportOptions;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Command {
    /// List variables and paint styles grouped by collection.
    GetVariables,
    /// DTCG token tree.
    ExportTokens(ExportOptions),
    ExportTokenStudio(ExportOptions),
    /// One platform file, or all of them with `"platform": "all"`.
    ExportStyleDictionary(StyleDictionaryRequest),
    ExportTailwindCss(ExportOptions),
    PushToGithub(PushRequest),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StyleDictionaryRequest {
    pub platform: ExportTarget,
    #[serde(flatten)]
    pub options: ExportOptions,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PushRequest {
    /// Any URL containing `github.com/{owner}/{repo}`.
    pub repo_url: String,
    pub token: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Directory inside the repository; empty for the root.
    #[serde(default)]
    pub path: String,
    pub content: String,
    pub filename: String,
}

fn default_branch() -> String {
    "main".to_string()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Response {
    VariablesLoaded {
        variables: VariableCatalog,
    },
    ExportComplete {
        output: String,
        filename: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        platform: Option<ExportTarget>,
    },
    GithubPushComplete {
        result: PushResult,
    },
    ExportError {
        message: String,
    },
}

impl Response {
    pub fn error(message: impl Into<String>) -> Self {
        Response::ExportError {
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Response::ExportError { .. })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PushResult {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokens_core::export::Platform;
    use tokens_core::AliasMode;

    #[test]
    fn bare_commands_use_default_options() {
        let cmd: Command = serde_json::from_value(json!({ "type": "export-tokens" })).unwrap();
        assert_eq!(cmd, Command::ExportTokens(ExportOptions::default()));

        let cmd: Command = serde_json::from_value(json!({ "type": "get-variables" })).unwrap();
        assert_eq!(cmd, Command::GetVariables);
    }

    #[test]
    fn export_options_are_read_from_the_message() {
        let cmd: Command = serde_json::from_value(json!({
            "type": "export-style-dictionary",
            "platform": "react-native",
            "selectedCollections": ["Colors", "Paint Styles"],
            "aliasMode": "reference"
        }))
        .unwrap();
        let Command::ExportStyleDictionary(request) = cmd else {
            panic!("wrong command: {:?}", cmd);
        };
        assert_eq!(request.platform, ExportTarget::Only(Platform::ReactNative));
        assert_eq!(request.options.selected_collections, ["Colors", "Paint Styles"]);
        assert_eq!(request.options.alias_mode, AliasMode::Reference);
    }

    #[test]
    fn all_platforms_target() {
        let cmd: Command =
            serde_json::from_value(json!({ "type": "export-style-dictionary", "platform": "all" })).unwrap();
        assert!(matches!(
            cmd,
            Command::ExportStyleDictionary(StyleDictionaryRequest { platform: ExportTarget::All, .. })
        ));
    }

    #[test]
    fn unknown_platform_is_rejected() {
        let result: Result<Command, _> =
            serde_json::from_value(json!({ "type": "export-style-dictionary", "platform": "cobol" }));
        assert!(result.is_err());
    }

    #[test]
    fn push_request_defaults() {
        let cmd: Command = serde_json::from_value(json!({
            "type": "push-to-github",
            "repoUrl": "https://github.com/acme/tokens",
            "token": "ghp_x",
            "content": "{}",
            "filename": "tokens.json"
        }))
        .unwrap();
        let Command::PushToGithub(push) = cmd else {
            panic!("wrong command");
        };
        assert_eq!(push.branch, "main");
        assert_eq!(push.path, "");
    }

    #[test]
    fn responses_are_tagged() {
        let ok = Response::ExportComplete {
            output: ":root {}".into(),
            filename: "design-tokens.css".into(),
            platform: Some(ExportTarget::Only(Platform::Css)),
        };
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({ "type": "export-complete", "output": ":root {}", "filename": "design-tokens.css", "platform": "css" })
        );
        assert_eq!(
            serde_json::to_value(Response::error("boom")).unwrap(),
            json!({ "type": "export-error", "message": "boom" })
        );
        let pushed = Response::GithubPushComplete {
            result: PushResult {
                success: true,
                message: "done".into(),
                url: None,
            },
        };
        assert_eq!(
            serde_json::to_value(&pushed).unwrap(),
            json!({ "type": "github-push-complete", "result": { "success": true, "message": "done" } })
        );
    }
}
