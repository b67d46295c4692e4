//! Token Studio document: one token set per tree root plus theme metadata.

use crate::errors::TokenError;
use crate::tokens::TokenTree;
use serde_json::{json, Map, Value};

pub fn document(tree: &TokenTree) -> Result<Value, TokenError> {
    let set_order: Vec<&String> = tree.roots().map(|(name, _)| name).collect();
    let mut doc = Map::new();
    doc.insert("$themes".to_string(), json!([]));
    doc.insert("$metadata".to_string(), json!({ "tokenSetOrder": set_order }));
    for (name, node) in tree.roots() {
        doc.insert(name.clone(), serde_json::to_value(node)?);
    }
    Ok(Value::Object(doc))
}

pub fn to_json_pretty(tree: &TokenTree) -> Result<String, TokenError> {
    Ok(serde_json::to_string_pretty(&document(tree)?)?)
}
