//! Colored labels attached to tickets and clients.

use chrono::{DateTime, Utc};
use opsdesk_core::{AppResult, FieldErrors, RecordId};
use serde::{Deserialize, Serialize};

use crate::{CellValue, ColumnSpec, FormContext, FormMode, RecordForm, TableRecord};

/// Label definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Row identifier.
    pub id: RecordId,
    /// Label text.
    pub name: String,
    /// Brand domain the tag belongs to.
    pub domain: String,
    /// Operator who created the tag.
    pub created_by: String,
    /// Operator who last changed the tag.
    pub updated_by: String,
    /// `#RRGGBB` color.
    pub color: String,
    /// Usage notes.
    pub description: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

const TAG_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::text("name", "Name").pinned(),
    ColumnSpec::text("domain", "Domain").filterable(),
    ColumnSpec::text("created_by", "Created By"),
    ColumnSpec::text("updated_by", "Updated By").hidden(),
    ColumnSpec::value("color", "Color"),
    ColumnSpec::text("description", "Description"),
    ColumnSpec::value("created_at", "Created"),
    ColumnSpec::value("updated_at", "Updated").hidden(),
];

impl TableRecord for Tag {
    const TABLE: &'static str = "tags";
    const LABEL: &'static str = "tag";

    fn columns() -> &'static [ColumnSpec] {
        TAG_COLUMNS
    }

    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn cell(&self, column: &str) -> CellValue {
        match column {
            "name" => CellValue::text(self.name.as_str()),
            "domain" => CellValue::text(self.domain.as_str()),
            "created_by" => CellValue::text(self.created_by.as_str()),
            "updated_by" => CellValue::text(self.updated_by.as_str()),
            "color" => CellValue::text(self.color.as_str()),
            "description" => CellValue::text(self.description.as_str()),
            "created_at" => CellValue::Timestamp(self.created_at),
            "updated_at" => CellValue::Timestamp(self.updated_at),
            _ => CellValue::Empty,
        }
    }
}

/// Returns whether `value` is a `#RRGGBB` hex color.
#[must_use]
pub fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };

    digits.len() == 6 && digits.chars().all(|digit| digit.is_ascii_hexdigit())
}

/// Add/edit form for tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagForm {
    /// Label text.
    pub name: String,
    /// Brand domain.
    pub domain: String,
    /// `#RRGGBB` color.
    pub color: String,
    /// Usage notes.
    pub description: String,
}

impl TagForm {
    fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        errors.require("name", &self.name, "Tag name is required");
        errors.require("domain", &self.domain, "Domain is required");
        if errors.require("color", &self.color, "Color is required")
            && !is_hex_color(self.color.trim())
        {
            errors.push("color", "Color must be a hex value like #1E90FF");
        }

        errors.into_result()
    }
}

impl RecordForm for TagForm {
    type Record = Tag;

    fn from_record(record: &Tag) -> Self {
        Self {
            name: record.name.clone(),
            domain: record.domain.clone(),
            color: record.color.clone(),
            description: record.description.clone(),
        }
    }

    fn validate(&self, _mode: FormMode) -> Result<(), FieldErrors> {
        self.check()
    }

    fn into_record(self, id: RecordId, context: &FormContext) -> AppResult<Tag> {
        self.check()?;
        Ok(Tag {
            id,
            name: self.name.trim().to_owned(),
            domain: self.domain.trim().to_owned(),
            created_by: context.operator.clone(),
            updated_by: context.operator.clone(),
            color: self.color.trim().to_uppercase(),
            description: self.description.trim().to_owned(),
            created_at: context.now,
            updated_at: context.now,
        })
    }

    fn apply_to(self, record: &mut Tag, context: &FormContext) -> AppResult<()> {
        self.check()?;
        record.name = self.name.trim().to_owned();
        record.domain = self.domain.trim().to_owned();
        record.color = self.color.trim().to_uppercase();
        record.description = self.description.trim().to_owned();
        record.updated_by = context.operator.clone();
        record.updated_at = context.now;
        Ok(())
    }
}
