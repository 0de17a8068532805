//! Cellmap - spreadsheet template field mapping
//!
//! This library validates A1 cell and range references over uploaded
//! spreadsheet templates and turns loose field-definition requests into
//! canonical field mappings.
//!
//! # Features
//!
//! - A1 reference grammar (cells like `B5`, 1-D ranges like `C10:C29`)
//! - Field-mapping validation with stable rejection reason codes
//! - Duplicate detection per template and kind
//! - In-memory template store with an HTTP API and CLI on top
//!
//! # Example
//!
//! ```
//! use cellmap::core::FieldValidator;
//! use cellmap::types::FieldRequest;
//!
//! let validator = FieldValidator::new();
//! let request = FieldRequest {
//!     kind: "range".to_string(),
//!     label: "Tablet weights".to_string(),
//!     field_type: "number".to_string(),
//!     range_ref: Some("C10:C29".to_string()),
//!     ..Default::default()
//! };
//!
//! let field = validator.validate(&request, &[])?;
//! assert_eq!(field.mapping.reference(), "C10:C29");
//! # Ok::<(), cellmap::core::field_validator::Rejection>(())
//! ```

pub mod api;
pub mod cli;
pub mod core;
pub mod error;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use crate::core::{FieldValidator, RejectCode, Rejection, ReferenceParser};
pub use error::{CellmapError, CellmapResult};
pub use types::{FieldDefinition, FieldKind, FieldMapping, FieldRequest, FieldType};
