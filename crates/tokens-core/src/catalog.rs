//! # Catalog Module
//!
//! The "get variables" listing shown before an export: every variable and
//! paint style with a display value, grouped by collection name.

use crate::types::{Color, TokenValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tokens_data::model::{PaintKind, PaintStyle, ResolvedType, ValueSlot, Variable, VariableSnapshot};

/// Group name for variables no collection claims.
pub const UNKNOWN_COLLECTION: &str = "Unknown";
/// Group name (and summary type) for paint styles.
pub const PAINT_STYLE_GROUP: &str = "Paint Styles";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariableSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// First mode's value, one alias hop followed. `null` when there is none.
    pub value: Value,
    pub collection: String,
    pub modes: Vec<String>,
    pub description: String,
}

/// Collection name -> summaries, groups in alphabetical order.
pub type VariableCatalog = BTreeMap<String, Vec<VariableSummary>>;

pub fn list_variables(snapshot: &VariableSnapshot) -> VariableCatalog {
    let by_id = snapshot.variables_by_id();
    let mut catalog = VariableCatalog::new();

    for variable in &snapshot.variables {
        let collection = snapshot.collection_of(variable);
        let first_mode = collection.and_then(|c| c.modes.first());

        let value = match first_mode.and_then(|m| variable.value_for_mode(&m.mode_id).map(|s| (m, s))) {
            Some((mode, ValueSlot::Alias(alias))) => match by_id.get(alias.id.as_str()) {
                Some(target) => target
                    .value_for_mode(&mode.mode_id)
                    .map(display_value)
                    .unwrap_or(Value::Null),
                None => display_value(&ValueSlot::Alias(alias.clone())),
            },
            Some((_, slot)) => display_value(slot),
            None => Value::Null,
        };

        let group = collection.map_or(UNKNOWN_COLLECTION, |c| c.name.as_str());
        catalog.entry(group.to_string()).or_default().push(VariableSummary {
            id: variable.id.clone(),
            name: variable.name.clone(),
            kind: type_label(variable).to_string(),
            value,
            collection: group.to_string(),
            modes: collection
                .map(|c| c.modes.iter().map(|m| m.name.clone()).collect())
                .unwrap_or_default(),
            description: variable.description.clone(),
        });
    }

    for style in &snapshot.paint_styles {
        catalog
            .entry(PAINT_STYLE_GROUP.to_string())
            .or_default()
            .push(paint_style_summary(style));
    }

    catalog
}

fn type_label(variable: &Variable) -> &'static str {
    match variable.resolved_type {
        ResolvedType::Color => "COLOR",
        ResolvedType::Float => "FLOAT",
        ResolvedType::String => "STRING",
        ResolvedType::Boolean => "BOOLEAN",
        ResolvedType::Unknown => "VARIABLE",
    }
}

fn display_value(slot: &ValueSlot) -> Value {
    match slot {
        ValueSlot::Color(c) => Value::String(Color::from(*c).to_rgba_string()),
        ValueSlot::Number(n) => serde_json::to_value(TokenValue::Number(*n)).unwrap_or(Value::Null),
        ValueSlot::String(s) => Value::String(s.clone()),
        ValueSlot::Boolean(b) => Value::Bool(*b),
        ValueSlot::Alias(alias) => serde_json::to_value(alias).unwrap_or(Value::Null),
    }
}

fn paint_style_summary(style: &PaintStyle) -> VariableSummary {
    let value = match style.paints.first() {
        Some(paint) if paint.kind == PaintKind::Solid => match paint.color {
            Some(c) => {
                let color = Color::new(c.r, c.g, c.b, paint.opacity.unwrap_or(1.0));
                if color.is_opaque() {
                    color.to_hex()
                } else {
                    color.to_rgba_string()
                }
            }
            None => "No value".to_string(),
        },
        _ => "No value".to_string(),
    };
    VariableSummary {
        id: style.id.clone(),
        name: style.name.clone(),
        kind: "PAINT_STYLE".to_string(),
        value: Value::String(value),
        collection: PAINT_STYLE_GROUP.to_string(),
        modes: vec!["Default".to_string()],
        description: style.description.clone(),
    }
}

/// Number of summaries across all groups.
pub fn summary_count(catalog: &VariableCatalog) -> usize {
    catalog.values().map(Vec::len).sum()
}
