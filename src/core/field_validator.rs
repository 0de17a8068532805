//! Field-mapping validation
//!
//! Converts a loose [`FieldRequest`] into a canonical [`FieldDefinition`]
//! or a [`Rejection`] carrying one of the fixed reason codes. Checks run
//! in a fixed order and the first failure wins; a rejected request has no
//! side effects.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::core::reference::{normalize_ref, ReferenceParser};
use crate::types::{
    ExistingField, FieldDefinition, FieldKind, FieldMapping, FieldRequest, FieldType,
    ValidationRules,
};

/// Stable reason codes for rejected field requests.
///
/// These are a wire contract: HTTP layers map them 1:1 to status codes
/// (409 for the duplicate codes, 400 for the rest) without looking at the
/// detail text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectCode {
    InvalidKind,
    InvalidLabel,
    InvalidFieldType,
    InvalidCellRef,
    InvalidRangeRef,
    #[serde(rename = "range_must_be_1d")]
    RangeMustBe1d,
    InvalidExpectedCount,
    ExpectedCountMismatch,
    DuplicateCellRef,
    DuplicateRangeRef,
}

impl RejectCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectCode::InvalidKind => "invalid_kind",
            RejectCode::InvalidLabel => "invalid_label",
            RejectCode::InvalidFieldType => "invalid_field_type",
            RejectCode::InvalidCellRef => "invalid_cell_ref",
            RejectCode::InvalidRangeRef => "invalid_range_ref",
            RejectCode::RangeMustBe1d => "range_must_be_1d",
            RejectCode::InvalidExpectedCount => "invalid_expected_count",
            RejectCode::ExpectedCountMismatch => "expected_count_mismatch",
            RejectCode::DuplicateCellRef => "duplicate_cell_ref",
            RejectCode::DuplicateRangeRef => "duplicate_range_ref",
        }
    }

    /// Duplicate codes are conflicts (HTTP 409); everything else is a
    /// plain validation failure (HTTP 400).
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            RejectCode::DuplicateCellRef | RejectCode::DuplicateRangeRef
        )
    }
}

impl fmt::Display for RejectCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected field request: one reason code plus an optional
/// human-readable detail string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    #[serde(rename = "error")]
    pub code: RejectCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Rejection {
    pub fn new(code: RejectCode) -> Self {
        Self { code, detail: None }
    }

    pub fn with_detail(code: RejectCode, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: Some(detail.into()),
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {}", self.code, detail),
            None => write!(f, "{}", self.code),
        }
    }
}

impl std::error::Error for Rejection {}

/// Validates field-definition requests against a template's existing
/// fields.
///
/// Duplicate detection compares normalized reference strings exactly, so
/// `A1:A5` and `A5:A1` count as different fields even though they cover
/// the same cells. Known limitation, kept for compatibility with stored
/// data.
pub struct FieldValidator {
    parser: ReferenceParser,
}

impl FieldValidator {
    pub fn new() -> Self {
        Self {
            parser: ReferenceParser::new(),
        }
    }

    /// Validate a request and produce the canonical definition.
    ///
    /// `existing` is the snapshot of fields already defined on the same
    /// template. This check is a fast path for good error messages; the
    /// store re-verifies uniqueness under its write lock, since a snapshot
    /// check alone is not atomic against concurrent inserts.
    pub fn validate(
        &self,
        request: &FieldRequest,
        existing: &[ExistingField],
    ) -> Result<FieldDefinition, Rejection> {
        let kind = FieldKind::parse(&request.kind).ok_or_else(|| {
            Rejection::with_detail(
                RejectCode::InvalidKind,
                format!(
                    "kind must be 'single' or 'range', got '{}'",
                    request.kind.trim()
                ),
            )
        })?;

        let label = request.label.trim();
        if label.chars().count() < 2 {
            return Err(Rejection::with_detail(
                RejectCode::InvalidLabel,
                "label must be at least 2 characters long",
            ));
        }

        let field_type = FieldType::parse(&request.field_type).ok_or_else(|| {
            Rejection::with_detail(
                RejectCode::InvalidFieldType,
                format!(
                    "field_type must be 'text', 'number' or 'date', got '{}'",
                    request.field_type.trim()
                ),
            )
        })?;

        let empty = Map::new();
        let raw_rules = request.validation.as_ref().unwrap_or(&empty);

        let mapping = match kind {
            FieldKind::Single => {
                let normalized = normalize_ref(request.cell_ref.as_deref().unwrap_or(""));
                let cell_ref = self.parser.parse_cell(&normalized).map_err(|e| {
                    Rejection::with_detail(RejectCode::InvalidCellRef, e.to_string())
                })?;
                FieldMapping::Single { cell_ref }
            }
            FieldKind::Range => {
                let normalized = normalize_ref(request.range_ref.as_deref().unwrap_or(""));
                let range_ref = self.parser.parse_range(&normalized).map_err(|e| {
                    Rejection::with_detail(RejectCode::InvalidRangeRef, e.to_string())
                })?;

                let shape = range_ref.shape();
                if !shape.is_one_dimensional() {
                    return Err(Rejection::with_detail(
                        RejectCode::RangeMustBe1d,
                        format!(
                            "{} spans {} rows x {} columns; use a single-row range (e.g. B2:E2) \
                             or a single-column range (e.g. C10:C29)",
                            range_ref, shape.row_span, shape.col_span
                        ),
                    ));
                }

                if let Some(raw) = raw_rules.get("expected_count") {
                    let count = coerce_number(raw)
                        .filter(|n| n.is_finite() && *n > 0.0)
                        .ok_or_else(|| {
                            Rejection::with_detail(
                                RejectCode::InvalidExpectedCount,
                                format!("expected_count must be a number greater than zero, got {raw}"),
                            )
                        })?;
                    if count != shape.cell_count as f64 {
                        return Err(Rejection::with_detail(
                            RejectCode::ExpectedCountMismatch,
                            format!(
                                "range {} covers {} cells but expected_count is {}",
                                range_ref, shape.cell_count, raw
                            ),
                        ));
                    }
                }

                FieldMapping::Range { range_ref, shape }
            }
        };

        let reference = mapping.reference();
        if existing
            .iter()
            .any(|field| field.kind == kind && field.reference == reference)
        {
            let code = match kind {
                FieldKind::Single => RejectCode::DuplicateCellRef,
                FieldKind::Range => RejectCode::DuplicateRangeRef,
            };
            return Err(Rejection::with_detail(
                code,
                format!("a {kind} field already maps {reference}"),
            ));
        }

        Ok(FieldDefinition {
            label: label.to_string(),
            field_type,
            required: coerce_required(&request.required),
            mapping,
            validation: parse_rules(raw_rules),
        })
    }
}

impl Default for FieldValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Coerce a JSON value to a number the way loosely-typed callers expect:
/// numbers pass through, numeric strings parse.
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Boolean-ish coercion for the `required` flag. Absent and null mean
/// not required.
fn coerce_required(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    }
}

/// Lift recognized keys of the raw validation map into typed fields and
/// keep everything else verbatim. Values that do not fit a recognized key
/// (e.g. a non-numeric `min`) stay in `extra` so nothing is dropped.
fn parse_rules(raw: &Map<String, Value>) -> ValidationRules {
    let mut rules = ValidationRules::default();
    for (key, value) in raw {
        match key.as_str() {
            "expected_count" => match coerce_number(value)
                .filter(|n| n.is_finite() && *n > 0.0 && n.fract() == 0.0)
            {
                Some(n) => rules.expected_count = Some(n as u64),
                None => {
                    rules.extra.insert(key.clone(), value.clone());
                }
            },
            "min" => match coerce_number(value) {
                Some(n) => rules.min = Some(n),
                None => {
                    rules.extra.insert(key.clone(), value.clone());
                }
            },
            "max" => match coerce_number(value) {
                Some(n) => rules.max = Some(n),
                None => {
                    rules.extra.insert(key.clone(), value.clone());
                }
            },
            _ => {
                rules.extra.insert(key.clone(), value.clone());
            }
        }
    }
    rules
}
