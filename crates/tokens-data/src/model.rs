use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One read-only export of the host document's variables and styles.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VariableSnapshot {
    #[serde(default)]
    pub collections: Vec<VariableCollection>,
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub paint_styles: Vec<PaintStyle>,
    #[serde(default)]
    pub text_styles: Vec<TextStyle>,
}

impl VariableSnapshot {
    /// Builds the id lookup used for alias resolution.
    pub fn variables_by_id(&self) -> HashMap<&str, &Variable> {
        self.variables.iter().map(|v| (v.id.as_str(), v)).collect()
    }

    /// Finds the collection owning `variable`. The variable's own
    /// `variableCollectionId` wins over the collections' id lists.
    pub fn collection_of(&self, variable: &Variable) -> Option<&VariableCollection> {
        if let Some(cid) = &variable.variable_collection_id {
            if let Some(c) = self.collections.iter().find(|c| &c.id == cid) {
                return Some(c);
            }
        }
        self.collections
            .iter()
            .find(|c| c.variable_ids.iter().any(|id| id == &variable.id))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VariableCollection {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub modes: Vec<Mode>,
    #[serde(default)]
    pub variable_ids: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Mode {
    pub mode_id: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub id: String,
    /// Slash-delimited path, e.g. `Colors/Brand/Primary`.
    pub name: String,
    pub resolved_type: ResolvedType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub variable_collection_id: Option<String>,
    #[serde(default)]
    pub values_by_mode: BTreeMap<String, ValueSlot>,
}

impl Variable {
    /// Name with `/` replaced by `.`, the form used inside alias references.
    pub fn alias_path(&self) -> String {
        alias_path(&self.name)
    }

    pub fn value_for_mode(&self, mode_id: &str) -> Option<&ValueSlot> {
        self.values_by_mode.get(mode_id)
    }
}

/// Normalizes a slash-delimited name into its dotted reference form.
pub fn alias_path(name: &str) -> String {
    name.replace('/', ".")
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolvedType {
    Color,
    Float,
    String,
    Boolean,
    #[serde(other)]
    Unknown,
}

/// A per-mode value: either a literal or a reference to another variable.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ValueSlot {
    Alias(VariableAlias),
    Color(Rgba),
    Boolean(bool),
    Number(f64),
    String(String),
}

impl ValueSlot {
    pub fn alias(target: impl Into<String>) -> Self {
        ValueSlot::Alias(VariableAlias {
            kind: AliasKind::VariableAlias,
            id: target.into(),
        })
    }

    pub fn as_alias(&self) -> Option<&str> {
        match self {
            ValueSlot::Alias(a) => Some(&a.id),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VariableAlias {
    #[serde(rename = "type")]
    pub kind: AliasKind,
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum AliasKind {
    #[serde(rename = "VARIABLE_ALIAS")]
    VariableAlias,
}

/// Color channels as 0-1 fractions.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "default_one")]
    pub a: f64,
}

fn default_one() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaintStyle {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub paints: Vec<Paint>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Paint {
    #[serde(rename = "type")]
    pub kind: PaintKind,
    #[serde(default)]
    pub color: Option<Rgba>,
    #[serde(default)]
    pub opacity: Option<f64>,
    #[serde(default = "default_true")]
    pub visible: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaintKind {
    Solid,
    GradientLinear,
    GradientRadial,
    GradientAngular,
    GradientDiamond,
    Image,
    #[serde(other)]
    Other,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub font_size: Option<f64>,
    #[serde(default)]
    pub line_height: LineHeight,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct LineHeight {
    #[serde(default)]
    pub unit: LineHeightUnit,
    #[serde(default)]
    pub value: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineHeightUnit {
    Pixels,
    Percent,
    #[default]
    Auto,
}
