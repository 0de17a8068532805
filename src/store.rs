//! In-memory template and field store
//!
//! The persistence seam around the pure core: assigns identifiers and
//! creation timestamps, and owns the authoritative uniqueness check. The
//! validator's duplicate check runs against a snapshot and is only a fast
//! path for good error messages; this store re-verifies under its write
//! lock so concurrent inserts cannot slip past it.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::field_validator::{RejectCode, Rejection};
use crate::error::{CellmapError, CellmapResult};
use crate::types::{ExistingField, FieldDefinition, FieldKind};

/// An uploaded template's metadata. File content handling lives outside
/// this crate; callers pass the already-extracted attributes.
#[derive(Debug, Clone, Serialize)]
pub struct Template {
    pub id: Uuid,
    pub name: String,
    pub original_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
}

/// Template attributes supplied at registration time.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateMeta {
    pub name: String,
    pub original_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

/// A persisted field: store-assigned id and timestamp around the
/// validated definition.
#[derive(Debug, Clone, Serialize)]
pub struct StoredField {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub definition: FieldDefinition,
}

struct TemplateEntry {
    template: Template,
    fields: Vec<StoredField>,
}

/// Thread-safe in-memory store keyed by template id.
pub struct TemplateStore {
    inner: RwLock<HashMap<Uuid, TemplateEntry>>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Register a template and assign its id and timestamp.
    pub fn add_template(&self, meta: TemplateMeta) -> Template {
        let template = Template {
            id: Uuid::new_v4(),
            name: meta.name,
            original_name: meta.original_name,
            mime_type: meta.mime_type,
            size_bytes: meta.size_bytes,
            created_at: Utc::now(),
        };
        let mut inner = self.inner.write().expect("store lock poisoned");
        inner.insert(
            template.id,
            TemplateEntry {
                template: template.clone(),
                fields: Vec::new(),
            },
        );
        template
    }

    /// All templates, newest first.
    pub fn list_templates(&self) -> Vec<Template> {
        let inner = self.inner.read().expect("store lock poisoned");
        let mut templates: Vec<Template> =
            inner.values().map(|entry| entry.template.clone()).collect();
        templates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        templates
    }

    pub fn get_template(&self, id: Uuid) -> CellmapResult<Template> {
        let inner = self.inner.read().expect("store lock poisoned");
        inner
            .get(&id)
            .map(|entry| entry.template.clone())
            .ok_or(CellmapError::TemplateNotFound(id))
    }

    /// Snapshot of a template's fields in duplicate-check form.
    pub fn existing_fields(&self, template_id: Uuid) -> CellmapResult<Vec<ExistingField>> {
        let inner = self.inner.read().expect("store lock poisoned");
        let entry = inner
            .get(&template_id)
            .ok_or(CellmapError::TemplateNotFound(template_id))?;
        Ok(entry
            .fields
            .iter()
            .map(|field| ExistingField::from(&field.definition))
            .collect())
    }

    /// Insert a validated field, re-checking reference uniqueness under
    /// the write lock.
    pub fn add_field(
        &self,
        template_id: Uuid,
        definition: FieldDefinition,
    ) -> CellmapResult<StoredField> {
        let mut inner = self.inner.write().expect("store lock poisoned");
        let entry = inner
            .get_mut(&template_id)
            .ok_or(CellmapError::TemplateNotFound(template_id))?;

        let kind = definition.mapping.kind();
        let reference = definition.mapping.reference();
        let taken = entry.fields.iter().any(|field| {
            field.definition.mapping.kind() == kind
                && field.definition.mapping.reference() == reference
        });
        if taken {
            let code = match kind {
                FieldKind::Single => RejectCode::DuplicateCellRef,
                FieldKind::Range => RejectCode::DuplicateRangeRef,
            };
            return Err(CellmapError::Rejected(Rejection::with_detail(
                code,
                format!("a {kind} field already maps {reference}"),
            )));
        }

        let field = StoredField {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            definition,
        };
        entry.fields.push(field.clone());
        Ok(field)
    }

    /// A template's fields in insertion order.
    pub fn list_fields(&self, template_id: Uuid) -> CellmapResult<Vec<StoredField>> {
        let inner = self.inner.read().expect("store lock poisoned");
        let entry = inner
            .get(&template_id)
            .ok_or(CellmapError::TemplateNotFound(template_id))?;
        Ok(entry.fields.clone())
    }

    /// Delete a field by (template, field) id pair.
    pub fn delete_field(&self, template_id: Uuid, field_id: Uuid) -> CellmapResult<()> {
        let mut inner = self.inner.write().expect("store lock poisoned");
        let entry = inner
            .get_mut(&template_id)
            .ok_or(CellmapError::TemplateNotFound(template_id))?;
        let before = entry.fields.len();
        entry.fields.retain(|field| field.id != field_id);
        if entry.fields.len() == before {
            return Err(CellmapError::FieldNotFound(field_id));
        }
        Ok(())
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::new()
    }
}
