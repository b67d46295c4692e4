//! # Dictionary Module
//!
//! The flat, Style Dictionary-shaped view of a token tree that the code
//! formatters consume: `category -> token name -> { value, type, description }`.
//!
//! Categories are the kebab-cased root keys (`"Semantic Colors/Light"` becomes
//! `semantic-colors-light`); names are the kebab-cased leaf paths joined by `-`.
//! A token sitting directly at the root (a style named `Primary`) goes to the
//! [`ROOT_CATEGORY`] under its own kebab-cased key.

use crate::errors::TokenError;
use crate::naming::kebab_case;
use crate::tokens::TokenTree;
use crate::types::{TokenType, TokenValue};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlatToken {
    pub value: TokenValue,
    #[serde(rename = "type", serialize_with = "serialize_sd_type")]
    pub kind: TokenType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FlatToken {
    /// Style Dictionary calls numeric tokens `dimension`.
    pub fn sd_type(&self) -> &'static str {
        sd_type_name(self.kind)
    }
}

fn sd_type_name(kind: TokenType) -> &'static str {
    match kind {
        TokenType::Number => "dimension",
        other => other.as_str(),
    }
}

fn serialize_sd_type<S: Serializer>(kind: &TokenType, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(sd_type_name(*kind))
}

pub type Category = IndexMap<String, FlatToken>;

/// Category for root-level tokens.
pub const ROOT_CATEGORY: &str = "styles";

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StyleDictionary {
    categories: IndexMap<String, Category>,
}

impl StyleDictionary {
    pub fn from_tree(tree: &TokenTree) -> Self {
        let mut categories: IndexMap<String, Category> = IndexMap::new();
        for (root, node) in tree.roots() {
            for (path, token) in node.leaves() {
                let (category, name) = if path.is_empty() {
                    (ROOT_CATEGORY.to_string(), kebab_case(root))
                } else {
                    (kebab_case(root), kebab_case(&path.join("-")))
                };
                categories.entry(category).or_default().insert(
                    name,
                    FlatToken {
                        value: token.value.clone(),
                        kind: token.kind,
                        description: token.description.clone(),
                    },
                );
            }
        }
        Self { categories }
    }

    pub fn categories(&self) -> impl Iterator<Item = (&String, &Category)> {
        self.categories.iter()
    }

    /// All tokens as `(category, name, token)` in table order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &FlatToken)> {
        self.categories
            .iter()
            .flat_map(|(c, tokens)| tokens.iter().map(move |(n, t)| (c.as_str(), n.as_str(), t)))
    }

    pub fn get(&self, category: &str, name: &str) -> Option<&FlatToken> {
        self.categories.get(category)?.get(name)
    }

    pub fn len(&self) -> usize {
        self.categories.values().map(|c| c.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_json_pretty(&self) -> Result<String, TokenError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
