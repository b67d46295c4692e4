//! # Resolver Module
//!
//! Follows `VARIABLE_ALIAS` chains down to a literal value.
//!
//! Resolution always looks up the same mode id at every hop. A chain is cut
//! off once the hop count passes [`MAX_ALIAS_DEPTH`], which also stops cycles
//! without tracking visited ids.

use crate::errors::TokenError;
use std::collections::HashMap;
use tokens_data::model::{alias_path, Rgba, ValueSlot, Variable, VariableSnapshot};
use tracing::{debug, warn};

/// Maximum number of alias hops followed before giving up.
pub const MAX_ALIAS_DEPTH: usize = 10;

/// A fully resolved literal.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Color(Rgba),
    Number(f64),
    String(String),
    Boolean(bool),
}

/// Resolves `variable_id` in `mode_id` against an id lookup.
///
/// Fails with `NotFound`, `NoValueForMode` or `AliasDepthExceeded`. Callers
/// are expected to recover from all three.
pub fn resolve_alias<'a>(
    variable_id: &'a str,
    mode_id: &str,
    variables: &HashMap<&str, &'a Variable>,
) -> Result<Literal, TokenError> {
    let mut current = variable_id;
    for depth in 0..=MAX_ALIAS_DEPTH {
        let variable: &'a Variable = variables
            .get(current)
            .copied()
            .ok_or_else(|| TokenError::NotFound(current.to_string()))?;
        let slot = variable
            .value_for_mode(mode_id)
            .ok_or_else(|| TokenError::NoValueForMode {
                variable: variable.name.clone(),
                mode: mode_id.to_string(),
            })?;
        let literal = match slot {
            ValueSlot::Alias(alias) => {
                debug!(from = %variable.name, to = %alias.id, depth, "Following alias");
                current = alias.id.as_str();
                continue;
            }
            ValueSlot::Color(c) => Literal::Color(*c),
            ValueSlot::Number(n) => Literal::Number(*n),
            ValueSlot::String(s) => Literal::String(s.clone()),
            ValueSlot::Boolean(b) => Literal::Boolean(*b),
        };
        return Ok(literal);
    }
    warn!(variable_id, mode_id, "Alias chain exceeded maximum depth");
    Err(TokenError::AliasDepthExceeded(
        variable_id.to_string(),
        MAX_ALIAS_DEPTH,
    ))
}

/// An id lookup over one snapshot, built once per export.
pub struct AliasResolver<'a> {
    variables: HashMap<&'a str, &'a Variable>,
}

impl<'a> AliasResolver<'a> {
    pub fn new(snapshot: &'a VariableSnapshot) -> Self {
        Self {
            variables: snapshot.variables_by_id(),
        }
    }

    pub fn from_variables(variables: &'a [Variable]) -> Self {
        Self {
            variables: variables.iter().map(|v| (v.id.as_str(), v)).collect(),
        }
    }

    pub fn variable(&self, id: &str) -> Option<&'a Variable> {
        self.variables.get(id).copied()
    }

    pub fn resolve(&self, variable_id: &'a str, mode_id: &str) -> Result<Literal, TokenError> {
        resolve_alias(variable_id, mode_id, &self.variables)
    }

    /// Dotted path used in `{...}` placeholders: the target's name when the id
    /// is known, the raw id otherwise.
    pub fn reference_for(&self, target_id: &str) -> String {
        match self.variable(target_id) {
            Some(v) => alias_path(&v.name),
            None => target_id.to_string(),
        }
    }
}
