//! # Flatten Module
//!
//! Builds a [`TokenTree`] from a snapshot.
//!
//! ## Responsibilities
//! - **Variables**: Walks collections × modes × owned variables and places
//!   each token under `"{collection}/{mode}"` plus the variable's name path.
//! - **Recovery**: Missing ids, missing modes, alias failures and unsupported
//!   types never abort the build. They skip the token or emit a placeholder.
//! - **Styles**: Merges paint and text styles afterwards (see [`crate::styles`]).

use crate::errors::TokenError;
use crate::resolver::{AliasResolver, Literal};
use crate::styles;
use crate::tokens::TokenTree;
use crate::types::{Color, Token, TokenType, TokenValue};
use serde::{Deserialize, Serialize};
use tokens_data::model::{ValueSlot, Variable, VariableSnapshot};
use tracing::{debug, instrument, warn};

/// Pseudo-collection name selecting the paint style pass.
pub const PAINT_STYLES: &str = "Paint Styles";
/// Pseudo-collection name selecting the text style pass.
pub const TEXT_STYLES: &str = "Text Styles";

/// How alias slots are written into the tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AliasMode {
    /// Follow the chain and write the literal. Failures fall back to a reference.
    #[default]
    Resolve,
    /// Always write `{target.path}`.
    Reference,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    /// Collection names to include. Empty means everything.
    #[serde(default)]
    pub selected_collections: Vec<String>,
    #[serde(default)]
    pub alias_mode: AliasMode,
}

impl ExportOptions {
    pub fn includes(&self, collection_name: &str) -> bool {
        self.selected_collections.is_empty()
            || self.selected_collections.iter().any(|c| c == collection_name)
    }
}

/// Builds the token tree for every selected collection and mode, then merges styles.
#[instrument(level = "debug", skip_all, fields(
    collections = snapshot.collections.len(),
    variables = snapshot.variables.len(),
))]
pub fn build_token_tree(snapshot: &VariableSnapshot, options: &ExportOptions) -> TokenTree {
    let resolver = AliasResolver::new(snapshot);
    let mut tree = TokenTree::new();

    for collection in &snapshot.collections {
        if !options.includes(&collection.name) {
            debug!(collection = %collection.name, "Collection filtered out");
            continue;
        }
        for mode in &collection.modes {
            let set_name = format!("{}/{}", collection.name, mode.name);
            for variable_id in &collection.variable_ids {
                let Some(variable) = resolver.variable(variable_id) else {
                    debug!(%variable_id, "Owned variable missing from snapshot");
                    continue;
                };
                match variable_token(&resolver, variable, &mode.mode_id, options.alias_mode) {
                    Ok(token) => {
                        let path = std::iter::once(set_name.clone())
                            .chain(variable.name.split('/').map(String::from));
                        tree.insert(path, token);
                    }
                    Err(TokenError::NoValueForMode { .. }) => {
                        debug!(variable = %variable.name, mode = %mode.name, "No value for mode");
                    }
                    Err(e) => {
                        warn!(variable = %variable.name, mode = %mode.name, "Skipping token: {}", e);
                    }
                }
            }
        }
    }

    styles::merge_styles(&mut tree, snapshot, options);
    tree
}

/// Produces the token for one variable in one mode.
///
/// Errors mean "no token": `UnsupportedType`, `NoValueForMode` or
/// `TypeMismatch`. Alias failures are not errors here; they become a
/// `{target.path}` placeholder.
pub fn variable_token<'a>(
    resolver: &AliasResolver<'a>,
    variable: &'a Variable,
    mode_id: &str,
    alias_mode: AliasMode,
) -> Result<Token, TokenError> {
    let kind = TokenType::from_resolved(variable.resolved_type)
        .ok_or_else(|| TokenError::UnsupportedType(variable.name.clone()))?;
    let slot = variable
        .value_for_mode(mode_id)
        .ok_or_else(|| TokenError::NoValueForMode {
            variable: variable.name.clone(),
            mode: mode_id.to_string(),
        })?;

    let value = match (slot, alias_mode) {
        (ValueSlot::Alias(alias), AliasMode::Reference) => {
            TokenValue::Alias(resolver.reference_for(&alias.id))
        }
        (ValueSlot::Alias(alias), AliasMode::Resolve) => {
            match resolver.resolve(&variable.id, mode_id) {
                Ok(literal) => literal_value(kind, literal, variable)?,
                Err(e) => {
                    warn!(variable = %variable.name, "Unresolved alias: {}", e);
                    TokenValue::Alias(resolver.reference_for(&alias.id))
                }
            }
        }
        _ => literal_value(kind, resolver.resolve(&variable.id, mode_id)?, variable)?,
    };

    Ok(Token::new(kind, value).with_description(&variable.description))
}

fn literal_value(kind: TokenType, literal: Literal, variable: &Variable) -> Result<TokenValue, TokenError> {
    match (kind, literal) {
        (TokenType::Color, Literal::Color(c)) => Ok(TokenValue::Color(Color::from(c))),
        (TokenType::Number, Literal::Number(n)) => Ok(TokenValue::Number(n)),
        (TokenType::Text, Literal::String(s)) => Ok(TokenValue::Text(s)),
        (TokenType::Boolean, Literal::Boolean(b)) => Ok(TokenValue::Boolean(b)),
        _ => Err(TokenError::TypeMismatch {
            variable: variable.name.clone(),
            expected: kind.as_str(),
        }),
    }
}
