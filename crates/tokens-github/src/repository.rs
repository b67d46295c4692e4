use crate::{PublishError, PublishResult};
use regex::Regex;
use std::sync::LazyLock;

static GITHUB_REPO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com[/:]([^/?#]+)/([^/?#]+)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    /// Extracts `owner/name` from any URL containing `github.com/{owner}/{name}`.
    pub fn parse(url: &str) -> PublishResult<Self> {
        let caps = GITHUB_REPO
            .captures(url)
            .ok_or_else(|| PublishError::InvalidRepositoryUrl(url.to_string()))?;
        let name = caps[2].trim_end_matches(".git");
        if name.is_empty() {
            return Err(PublishError::InvalidRepositoryUrl(url.to_string()));
        }
        Ok(Self {
            owner: caps[1].to_string(),
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_web_and_clone_urls() {
        let expected = Repository {
            owner: "acme".into(),
            name: "design-tokens".into(),
        };
        assert_eq!(Repository::parse("https://github.com/acme/design-tokens").unwrap(), expected);
        assert_eq!(Repository::parse("https://github.com/acme/design-tokens.git").unwrap(), expected);
        assert_eq!(Repository::parse("git@github.com:acme/design-tokens.git").unwrap(), expected);
        assert_eq!(
            Repository::parse("https://github.com/acme/design-tokens/tree/main/tokens").unwrap(),
            expected
        );
    }

    #[test]
    fn rejects_other_hosts() {
        assert!(matches!(
            Repository::parse("https://gitlab.com/acme/design-tokens"),
            Err(PublishError::InvalidRepositoryUrl(_))
        ));
        assert!(Repository::parse("https://github.com/acme").is_err());
    }
}
