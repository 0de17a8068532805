//! Core engine: A1 reference parsing and field-mapping validation

pub mod field_validator;
pub mod reference;

pub use field_validator::{FieldValidator, RejectCode, Rejection};
pub use reference::{normalize_ref, CellRef, RangeRef, RangeShape, ReferenceParser};
