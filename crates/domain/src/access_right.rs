//! Access rights: named permission bundles granted to a class of users.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};
use opsdesk_core::{AppResult, FieldErrors, RecordId};
use serde::{Deserialize, Serialize};

use crate::choice::choice_enum;
use crate::validation::{optional_text, parse_choice, parse_integer_in_range, parse_optional_date};
use crate::{CellValue, ColumnSpec, FormContext, FormMode, RecordForm, TableRecord};

choice_enum! {
    /// Class of users an access right applies to.
    pub enum UserType ("user type") {
        /// Back-office administrators.
        Admin => ("admin", "Admin"),
        /// Account and desk managers.
        Manager => ("manager", "Manager"),
        /// Support agents.
        Support => ("support", "Support"),
        /// Trading clients.
        Client => ("client", "Client"),
    }
}

choice_enum! {
    /// Action that can be granted inside a permission category.
    pub enum PermissionAction ("permission action") {
        /// Read access.
        View => ("view", "View"),
        /// Create new records.
        Create => ("create", "Create"),
        /// Modify records.
        Edit => ("edit", "Edit"),
        /// Remove records.
        Delete => ("delete", "Delete"),
        /// Export data.
        Export => ("export", "Export"),
        /// Approve pending operations.
        Approve => ("approve", "Approve"),
    }
}

/// Granted actions keyed by permission category (`clients`, `reports`, ...).
pub type PermissionMatrix = BTreeMap<String, BTreeSet<PermissionAction>>;

/// Named permission bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRight {
    /// Row identifier.
    pub id: RecordId,
    /// Unique display name.
    pub name: String,
    /// What the bundle is for.
    pub description: String,
    /// Class of users the bundle targets.
    pub user_type: UserType,
    /// Granted actions per category.
    pub permissions: PermissionMatrix,
    /// Whether the bundle is currently in force.
    pub is_active: bool,
    /// Precedence rank, 1 (lowest) to 10.
    pub priority: u8,
    /// Optional last day the bundle applies.
    pub expires_on: Option<NaiveDate>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl AccessRight {
    /// Total number of granted actions across categories.
    #[must_use]
    pub fn granted_action_count(&self) -> usize {
        self.permissions.values().map(BTreeSet::len).sum()
    }

    /// Returns whether the bundle expired before `today`.
    #[must_use]
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expires_on.is_some_and(|expires_on| expires_on < today)
    }
}

const ACCESS_RIGHT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::text("name", "Name").pinned(),
    ColumnSpec::text("description", "Description"),
    ColumnSpec::discrete("user_type", "User Type"),
    ColumnSpec::value("permissions", "Permissions"),
    ColumnSpec::discrete("is_active", "Active"),
    ColumnSpec::value("priority", "Priority"),
    ColumnSpec::value("expires_on", "Expires"),
    ColumnSpec::text("notes", "Notes").hidden(),
    ColumnSpec::value("updated_at", "Updated").hidden(),
];

impl TableRecord for AccessRight {
    const TABLE: &'static str = "access-rights";
    const LABEL: &'static str = "access right";

    fn columns() -> &'static [ColumnSpec] {
        ACCESS_RIGHT_COLUMNS
    }

    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn cell(&self, column: &str) -> CellValue {
        match column {
            "name" => CellValue::text(self.name.as_str()),
            "description" => CellValue::text(self.description.as_str()),
            "user_type" => self.user_type.cell(),
            "permissions" => CellValue::Integer(
                i64::try_from(self.granted_action_count()).unwrap_or(i64::MAX),
            ),
            "is_active" => CellValue::Bool(self.is_active),
            "priority" => CellValue::Integer(i64::from(self.priority)),
            "expires_on" => self.expires_on.map_or(CellValue::Empty, CellValue::Date),
            "notes" => CellValue::optional_text(self.notes.as_deref()),
            "updated_at" => CellValue::Timestamp(self.updated_at),
            _ => CellValue::Empty,
        }
    }
}

/// Add/edit form for access rights.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessRightForm {
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// User type transport value.
    pub user_type: String,
    /// Action transport values per category.
    pub permissions: BTreeMap<String, Vec<String>>,
    /// Active flag.
    pub is_active: bool,
    /// Priority as typed.
    pub priority: String,
    /// Optional expiry date (`YYYY-MM-DD`).
    pub expires_on: String,
    /// Optional notes.
    pub notes: String,
}

struct ParsedAccessRight {
    name: String,
    description: String,
    user_type: UserType,
    permissions: PermissionMatrix,
    priority: u8,
    expires_on: Option<NaiveDate>,
}

impl AccessRightForm {
    fn parse(&self) -> Result<ParsedAccessRight, FieldErrors> {
        let mut errors = FieldErrors::new();

        errors.require("name", &self.name, "Access right name is required");
        errors.require("description", &self.description, "Description is required");
        let user_type = parse_choice::<UserType>(
            &mut errors,
            "user_type",
            &self.user_type,
            "User type is required",
            "Select a valid user type",
        );
        let permissions = self.parse_permissions(&mut errors);
        let priority = parse_integer_in_range(
            &mut errors,
            "priority",
            &self.priority,
            "Priority is required",
            1..=10,
            "Priority must be between 1 and 10",
        );
        let expires_on = parse_optional_date(&mut errors, "expires_on", &self.expires_on);

        match (user_type, priority, expires_on) {
            (Some(user_type), Some(priority), Some(expires_on)) if errors.is_empty() => {
                Ok(ParsedAccessRight {
                    name: self.name.trim().to_owned(),
                    description: self.description.trim().to_owned(),
                    user_type,
                    permissions,
                    priority: u8::try_from(priority).unwrap_or(1),
                    expires_on,
                })
            }
            _ => Err(errors),
        }
    }

    fn parse_permissions(&self, errors: &mut FieldErrors) -> PermissionMatrix {
        let mut matrix = PermissionMatrix::new();
        for (category, actions) in &self.permissions {
            let category = category.trim();
            if category.is_empty() {
                errors.push("permissions", "Permission category names cannot be blank");
                continue;
            }

            for action in actions {
                match action.parse::<PermissionAction>() {
                    Ok(action) => {
                        matrix.entry(category.to_owned()).or_default().insert(action);
                    }
                    Err(_) => errors.push(
                        "permissions",
                        format!("Unknown permission action '{}'", action.trim()),
                    ),
                }
            }
        }

        if matrix.is_empty() {
            errors.push("permissions", "Select at least one permission");
        }

        matrix
    }
}

impl RecordForm for AccessRightForm {
    type Record = AccessRight;

    fn from_record(record: &AccessRight) -> Self {
        Self {
            name: record.name.clone(),
            description: record.description.clone(),
            user_type: record.user_type.as_str().to_owned(),
            permissions: record
                .permissions
                .iter()
                .map(|(category, actions)| {
                    (
                        category.clone(),
                        actions
                            .iter()
                            .map(|action| action.as_str().to_owned())
                            .collect(),
                    )
                })
                .collect(),
            is_active: record.is_active,
            priority: record.priority.to_string(),
            expires_on: record
                .expires_on
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            notes: record.notes.clone().unwrap_or_default(),
        }
    }

    fn validate(&self, _mode: FormMode) -> Result<(), FieldErrors> {
        self.parse().map(|_| ())
    }

    fn into_record(self, id: RecordId, context: &FormContext) -> AppResult<AccessRight> {
        let parsed = self.parse()?;
        Ok(AccessRight {
            id,
            name: parsed.name,
            description: parsed.description,
            user_type: parsed.user_type,
            permissions: parsed.permissions,
            is_active: self.is_active,
            priority: parsed.priority,
            expires_on: parsed.expires_on,
            notes: optional_text(&self.notes),
            created_at: context.now,
            updated_at: context.now,
        })
    }

    fn apply_to(self, record: &mut AccessRight, context: &FormContext) -> AppResult<()> {
        let parsed = self.parse()?;
        record.name = parsed.name;
        record.description = parsed.description;
        record.user_type = parsed.user_type;
        record.permissions = parsed.permissions;
        record.is_active = self.is_active;
        record.priority = parsed.priority;
        record.expires_on = parsed.expires_on;
        record.notes = optional_text(&self.notes);
        record.updated_at = context.now;
        Ok(())
    }
}
