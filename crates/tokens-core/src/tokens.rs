//! # Tokens Module
//!
//! The nested token tree produced by the flattener.
//!
//! ## Responsibilities
//! - **Insertion**: Places a token at a path, replacing whatever is in the way.
//! - **Traversal**: Depth-first leaf iteration in insertion order.
//! - **Re-import**: Reads a DTCG-style JSON tree back into a `TokenTree`.
//!
//! ## Key Types
//! - `TokenTree`: Ordered roots (`"Collection/Mode"` or style paths).
//! - `TokenNode`: A group of children or a single `Token` leaf.

use crate::errors::TokenError;
use crate::types::{Color, Token, TokenType, TokenValue};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TokenNode {
    Group(IndexMap<String, TokenNode>),
    Token(Token),
}

impl TokenNode {
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            TokenNode::Token(t) => Some(t),
            TokenNode::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&IndexMap<String, TokenNode>> {
        match self {
            TokenNode::Group(children) => Some(children),
            TokenNode::Token(_) => None,
        }
    }

    /// Leaves below this node, with paths relative to it.
    pub fn leaves(&self) -> Vec<(Vec<&str>, &Token)> {
        let mut out = Vec::new();
        collect_leaves(self, Vec::new(), &mut out);
        out
    }
}

/// Converts `node` into a group if it is a leaf and returns its children.
fn ensure_group(node: &mut TokenNode) -> &mut IndexMap<String, TokenNode> {
    if let TokenNode::Token(_) = node {
        *node = TokenNode::Group(IndexMap::new());
    }
    match node {
        TokenNode::Group(children) => children,
        TokenNode::Token(_) => unreachable!("leaf replaced by a group above"),
    }
}

/// A tree of tokens keyed by path segment. Keys keep insertion order.
#[derive(Clone, Debug, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct TokenTree {
    roots: IndexMap<String, TokenNode>,
}

impl TokenTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `token` at `path`. Leaves met on the way down become groups and
    /// the final segment is overwritten, so the last write wins.
    pub fn insert<I, S>(&mut self, path: I, token: Token)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut segments: Vec<String> = path.into_iter().map(Into::into).collect();
        let Some(last) = segments.pop() else {
            debug!("Ignoring token with an empty path");
            return;
        };

        let mut current = &mut self.roots;
        for segment in segments {
            let node = current
                .entry(segment)
                .or_insert_with(|| TokenNode::Group(IndexMap::new()));
            current = ensure_group(node);
        }
        current.insert(last, TokenNode::Token(token));
    }

    pub fn get(&self, path: &[&str]) -> Option<&TokenNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.roots.get(*first)?;
        for segment in rest {
            node = node.as_group()?.get(*segment)?;
        }
        Some(node)
    }

    pub fn token(&self, path: &[&str]) -> Option<&Token> {
        self.get(path)?.as_token()
    }

    pub fn roots(&self) -> impl Iterator<Item = (&String, &TokenNode)> {
        self.roots.iter()
    }

    /// Every leaf with its full path, depth-first in insertion order.
    pub fn leaves(&self) -> Vec<(Vec<&str>, &Token)> {
        let mut out = Vec::new();
        for (key, node) in &self.roots {
            collect_leaves(node, vec![key.as_str()], &mut out);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.leaves().len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn to_json_pretty(&self) -> Result<String, TokenError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads a tree written by [`TokenTree::to_json_pretty`] (or any DTCG-style
    /// document). An object holding both `$type` and `$value` is a leaf; other
    /// `$`-prefixed keys are metadata and skipped.
    pub fn from_json(value: &Value) -> Result<TokenTree, TokenError> {
        let Value::Object(map) = value else {
            return Err(TokenError::InvalidTree("root must be an object".into()));
        };
        let mut tree = TokenTree::new();
        for (key, child) in map {
            if key.starts_with('$') {
                continue;
            }
            import_node(child, vec![key.clone()], &mut tree)?;
        }
        Ok(tree)
    }
}

fn collect_leaves<'a>(
    node: &'a TokenNode,
    path: Vec<&'a str>,
    out: &mut Vec<(Vec<&'a str>, &'a Token)>,
) {
    match node {
        TokenNode::Token(token) => out.push((path, token)),
        TokenNode::Group(children) => {
            for (key, child) in children {
                let mut child_path = path.clone();
                child_path.push(key.as_str());
                collect_leaves(child, child_path, out);
            }
        }
    }
}

fn import_node(value: &Value, path: Vec<String>, tree: &mut TokenTree) -> Result<(), TokenError> {
    let Value::Object(map) = value else {
        debug!(path = %path.join("/"), "Skipping non-object node");
        return Ok(());
    };
    if let (Some(kind), Some(raw)) = (map.get("$type"), map.get("$value")) {
        let kind = kind
            .as_str()
            .and_then(TokenType::parse)
            .ok_or_else(|| TokenError::InvalidTree(format!("unknown $type at {}", path.join("/"))))?;
        let mut token = Token::new(kind, import_value(kind, raw, &path)?);
        if let Some(desc) = map.get("$description").and_then(Value::as_str) {
            token = token.with_description(desc);
        }
        tree.insert(path, token);
        return Ok(());
    }
    for (key, child) in map {
        if key.starts_with('$') {
            continue;
        }
        let mut child_path = path.clone();
        child_path.push(key.clone());
        import_node(child, child_path, tree)?;
    }
    Ok(())
}

fn import_value(kind: TokenType, raw: &Value, path: &[String]) -> Result<TokenValue, TokenError> {
    if let Some(reference) = raw
        .as_str()
        .and_then(|s| s.strip_prefix('{'))
        .and_then(|s| s.strip_suffix('}'))
    {
        return Ok(TokenValue::Alias(reference.to_string()));
    }
    let mismatch = || TokenError::TypeMismatch {
        variable: path.join("/"),
        expected: kind.as_str(),
    };
    match kind {
        TokenType::Color => {
            let s = raw.as_str().ok_or_else(mismatch)?;
            Ok(TokenValue::Color(Color::parse(s)?))
        }
        TokenType::Number => raw.as_f64().map(TokenValue::Number).ok_or_else(mismatch),
        TokenType::Text => raw
            .as_str()
            .map(|s| TokenValue::Text(s.to_string()))
            .ok_or_else(mismatch),
        TokenType::Boolean => raw.as_bool().map(TokenValue::Boolean).ok_or_else(mismatch),
    }
}
