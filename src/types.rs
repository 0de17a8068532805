//! Data model for template field mappings
//!
//! The wire-facing [`FieldRequest`] stays loose (strings and raw JSON) the
//! way HTTP callers send it; the validator converts it into the typed
//! [`FieldDefinition`] whose mapping is a tagged union keyed by kind.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::reference::{CellRef, RangeRef, RangeShape};

/// How a field maps onto the template grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Exactly one cell (e.g. `B5`).
    Single,
    /// A one-dimensional cell range (e.g. `C10:C29`).
    Range,
}

impl FieldKind {
    /// Case-insensitive parse of the wire form.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Some(FieldKind::Single),
            "range" => Some(FieldKind::Range),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Single => "single",
            FieldKind::Range => "range",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared type of the extracted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Date,
}

impl FieldType {
    /// Case-insensitive parse of the wire form.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Some(FieldType::Text),
            "number" => Some(FieldType::Number),
            "date" => Some(FieldType::Date),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Date => "date",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An incoming field-definition request, exactly as callers send it.
///
/// Everything is optional or stringly typed on purpose: the validator owns
/// every semantic check and produces precise reason codes instead of serde
/// errors surfacing to the user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldRequest {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub field_type: String,
    /// Boolean-ish: JSON bool, "true"/"false", or a number.
    #[serde(default)]
    pub required: Value,
    #[serde(default)]
    pub cell_ref: Option<String>,
    #[serde(default)]
    pub range_ref: Option<String>,
    /// Open validation map; `validation_json` is the legacy wire name.
    #[serde(default, alias = "validation_json")]
    pub validation: Option<Map<String, Value>>,
}

/// Validation rules attached to a field.
///
/// `expected_count` is enforced against the range cardinality; `min`/`max`
/// are reserved fields, parsed as numbers when numeric but not enforced.
/// Keys this version does not recognize are retained verbatim in `extra`
/// so they round-trip through persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationRules {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ValidationRules {
    pub fn is_empty(&self) -> bool {
        self.expected_count.is_none()
            && self.min.is_none()
            && self.max.is_none()
            && self.extra.is_empty()
    }
}

/// The reference side of a validated field: one variant per kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldMapping {
    Single {
        cell_ref: CellRef,
    },
    Range {
        range_ref: RangeRef,
        shape: RangeShape,
    },
}

impl FieldMapping {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldMapping::Single { .. } => FieldKind::Single,
            FieldMapping::Range { .. } => FieldKind::Range,
        }
    }

    /// The canonical normalized reference string, used for duplicate
    /// comparison and display.
    pub fn reference(&self) -> String {
        match self {
            FieldMapping::Single { cell_ref } => cell_ref.to_string(),
            FieldMapping::Range { range_ref, .. } => range_ref.to_string(),
        }
    }
}

/// A validated, canonical field definition.
///
/// Identifier and creation timestamp are assigned by the store, not here;
/// the definition itself never changes after validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDefinition {
    pub label: String,
    pub field_type: FieldType,
    pub required: bool,
    #[serde(flatten)]
    pub mapping: FieldMapping,
    #[serde(skip_serializing_if = "ValidationRules::is_empty")]
    pub validation: ValidationRules,
}

/// The slice of an existing field the duplicate check needs: its kind and
/// its normalized reference string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingField {
    pub kind: FieldKind,
    pub reference: String,
}

impl ExistingField {
    pub fn new(kind: FieldKind, reference: impl Into<String>) -> Self {
        Self {
            kind,
            reference: reference.into(),
        }
    }
}

impl From<&FieldDefinition> for ExistingField {
    fn from(definition: &FieldDefinition) -> Self {
        Self {
            kind: definition.mapping.kind(),
            reference: definition.mapping.reference(),
        }
    }
}
