//! Back-office managers.

use chrono::{DateTime, Utc};
use opsdesk_core::{AppResult, FieldErrors, RecordId};
use serde::{Deserialize, Serialize};

use crate::choice::choice_enum;
use crate::validation::{check_email, check_password_pair, parse_choice};
use crate::{CellValue, ColumnSpec, FormContext, FormMode, RecordForm, TableRecord};

choice_enum! {
    /// Role held by a manager.
    pub enum ManagerRole ("manager role") {
        /// Full control over every desk.
        SuperAdmin => ("super_admin", "Super Admin"),
        /// Administers one domain.
        Admin => ("admin", "Admin"),
        /// Runs client accounts.
        Manager => ("manager", "Manager"),
        /// Handles support tickets.
        Support => ("support", "Support"),
        /// Read-only access.
        Viewer => ("viewer", "Viewer"),
    }
}

choice_enum! {
    /// Whether a manager account may be used.
    pub enum ManagerStatus ("manager status") {
        /// Account enabled.
        Active => ("active", "Active"),
        /// Account disabled.
        Inactive => ("inactive", "Inactive"),
    }
}

/// Back-office manager account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manager {
    /// Row identifier.
    pub id: RecordId,
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Role.
    pub role: ManagerRole,
    /// Brand domain the manager works on.
    pub domain: String,
    /// Account status.
    pub status: ManagerStatus,
    /// Last sign-in, if any.
    pub last_login_at: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

const MANAGER_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::text("name", "Name").pinned(),
    ColumnSpec::text("email", "Email"),
    ColumnSpec::discrete("role", "Role"),
    ColumnSpec::text("domain", "Domain").filterable(),
    ColumnSpec::discrete("status", "Status"),
    ColumnSpec::value("last_login_at", "Last Login"),
    ColumnSpec::value("created_at", "Created").hidden(),
];

impl TableRecord for Manager {
    const TABLE: &'static str = "managers";
    const LABEL: &'static str = "manager";

    fn columns() -> &'static [ColumnSpec] {
        MANAGER_COLUMNS
    }

    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn cell(&self, column: &str) -> CellValue {
        match column {
            "name" => CellValue::text(self.name.as_str()),
            "email" => CellValue::text(self.email.as_str()),
            "role" => self.role.cell(),
            "domain" => CellValue::text(self.domain.as_str()),
            "status" => self.status.cell(),
            "last_login_at" => self
                .last_login_at
                .map_or(CellValue::Empty, CellValue::Timestamp),
            "created_at" => CellValue::Timestamp(self.created_at),
            _ => CellValue::Empty,
        }
    }
}

/// Add/edit form for managers.
///
/// The password pair is required when creating an account and optional when
/// editing. Credentials are checked but never copied onto the record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManagerForm {
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Role transport value.
    pub role: String,
    /// Brand domain.
    pub domain: String,
    /// Status transport value.
    pub status: String,
    /// New password.
    pub password: String,
    /// Password confirmation.
    pub confirm_password: String,
}

struct ParsedManager {
    name: String,
    email: String,
    role: ManagerRole,
    domain: String,
    status: ManagerStatus,
}

impl ManagerForm {
    fn parse(&self, mode: FormMode) -> Result<ParsedManager, FieldErrors> {
        let mut errors = FieldErrors::new();

        errors.require("name", &self.name, "Name is required");
        check_email(&mut errors, "email", &self.email, "Email is required");
        let role = parse_choice::<ManagerRole>(
            &mut errors,
            "role",
            &self.role,
            "Role is required",
            "Select a valid role",
        );
        errors.require("domain", &self.domain, "Domain is required");
        let status = parse_choice::<ManagerStatus>(
            &mut errors,
            "status",
            &self.status,
            "Status is required",
            "Select a valid status",
        );
        check_password_pair(
            &mut errors,
            &self.password,
            &self.confirm_password,
            mode == FormMode::Create,
        );

        match (role, status) {
            (Some(role), Some(status)) if errors.is_empty() => Ok(ParsedManager {
                name: self.name.trim().to_owned(),
                email: self.email.trim().to_lowercase(),
                role,
                domain: self.domain.trim().to_owned(),
                status,
            }),
            _ => Err(errors),
        }
    }
}

impl RecordForm for ManagerForm {
    type Record = Manager;

    fn from_record(record: &Manager) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            role: record.role.as_str().to_owned(),
            domain: record.domain.clone(),
            status: record.status.as_str().to_owned(),
            password: String::new(),
            confirm_password: String::new(),
        }
    }

    fn validate(&self, mode: FormMode) -> Result<(), FieldErrors> {
        self.parse(mode).map(|_| ())
    }

    fn into_record(self, id: RecordId, context: &FormContext) -> AppResult<Manager> {
        let parsed = self.parse(FormMode::Create)?;
        Ok(Manager {
            id,
            name: parsed.name,
            email: parsed.email,
            role: parsed.role,
            domain: parsed.domain,
            status: parsed.status,
            last_login_at: None,
            created_at: context.now,
            updated_at: context.now,
        })
    }

    fn apply_to(self, record: &mut Manager, context: &FormContext) -> AppResult<()> {
        let parsed = self.parse(FormMode::Edit)?;
        record.name = parsed.name;
        record.email = parsed.email;
        record.role = parsed.role;
        record.domain = parsed.domain;
        record.status = parsed.status;
        record.updated_at = context.now;
        Ok(())
    }
}
