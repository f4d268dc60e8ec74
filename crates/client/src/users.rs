//! User records as the backend serves them, plus the create/update payloads.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use adminconsole_core::{FieldValue, UserId, ValidationErrors};
use adminconsole_view::Record;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            /// Value the console does not know; kept verbatim.
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $wire,)+
                    $name::Other(v) => v.as_str(),
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $($wire => $name::$variant,)+
                    _ => $name::Other(value),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(v) => v,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum!(
    EmployeeType {
        FullTime => "FULL_TIME",
        PartTime => "PART_TIME",
        Contractor => "CONTRACTOR",
        Intern => "INTERN",
    }
);

wire_enum!(
    UserStatus {
        Active => "ACTIVE",
        Inactive => "INACTIVE",
    }
);

impl Default for EmployeeType {
    fn default() -> Self {
        EmployeeType::FullTime
    }
}

impl Default for UserStatus {
    fn default() -> Self {
        UserStatus::Active
    }
}

/// A user as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub employee_type: EmployeeType,
    #[serde(default)]
    pub phone_no: Option<String>,
    #[serde(default)]
    pub department_code: Option<String>,
    #[serde(default)]
    pub department_name: Option<String>,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_by: Option<String>,
}

impl UserRecord {
    /// Field names addressable through [`Record::field`], in column order.
    pub const FIELDS: [&'static str; 15] = [
        "id",
        "username",
        "email",
        "displayName",
        "employeeId",
        "employeeType",
        "phoneNo",
        "departmentCode",
        "departmentName",
        "status",
        "role",
        "createdAt",
        "createdBy",
        "updatedAt",
        "updatedBy",
    ];
}

fn text(value: &str) -> Option<FieldValue<'_>> {
    Some(FieldValue::Text(Cow::Borrowed(value)))
}

impl Record for UserRecord {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => text(self.id.as_str()),
            "username" => text(&self.username),
            "email" => text(&self.email),
            "displayName" => text(&self.display_name),
            "employeeId" => text(&self.employee_id),
            "employeeType" => text(self.employee_type.as_str()),
            "phoneNo" => self.phone_no.as_deref().and_then(text),
            "departmentCode" => self.department_code.as_deref().and_then(text),
            "departmentName" => self.department_name.as_deref().and_then(text),
            "status" => text(self.status.as_str()),
            "role" => text(&self.role),
            "createdAt" => self.created_at.map(FieldValue::Timestamp),
            "createdBy" => self.created_by.as_deref().and_then(text),
            "updatedAt" => self.updated_at.map(FieldValue::Timestamp),
            "updatedBy" => self.updated_by.as_deref().and_then(text),
            _ => None,
        }
    }
}

/// Minimal structural email check: `local@domain.tld`, no whitespace.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}

/// Payload for creating a user.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub password: String,
    pub employee_id: String,
    pub employee_type: EmployeeType,
    pub phone_no: String,
    pub department_code: String,
    pub department_name: String,
    pub role: String,
    pub status: UserStatus,
}

impl Default for NewUser {
    fn default() -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            display_name: String::new(),
            password: String::new(),
            employee_id: String::new(),
            employee_type: EmployeeType::FullTime,
            phone_no: String::new(),
            department_code: String::new(),
            department_name: String::new(),
            role: "Specialist".to_string(),
            status: UserStatus::Active,
        }
    }
}

impl core::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .field("password", &"<redacted>")
            .field("employee_id", &self.employee_id)
            .field("employee_type", &self.employee_type)
            .field("department_code", &self.department_code)
            .field("role", &self.role)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl NewUser {
    fn required(&self) -> [(&'static str, &str); 8] {
        [
            ("username", self.username.as_str()),
            ("email", self.email.as_str()),
            ("displayName", self.display_name.as_str()),
            ("password", self.password.as_str()),
            ("employeeId", self.employee_id.as_str()),
            ("phoneNo", self.phone_no.as_str()),
            ("departmentCode", self.department_code.as_str()),
            ("departmentName", self.department_name.as_str()),
        ]
    }

    /// Presence of every required field, then email format.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let blank: Vec<&str> = self
            .required()
            .into_iter()
            .filter(|(_, v)| v.trim().is_empty())
            .map(|(name, _)| name)
            .collect();
        if !blank.is_empty() {
            errors.push("form", REQUIRED_FIELDS_MESSAGE);
            for name in blank {
                errors.push(name, "This field is required.");
            }
            return errors.into_result();
        }

        if !is_valid_email(self.email.trim()) {
            errors.push("email", INVALID_EMAIL_MESSAGE);
        }
        errors.into_result()
    }
}

/// Partial update; absent fields are left as they are on the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_type: Option<EmployeeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

impl UserUpdate {
    /// Present fields must be non-blank; a present email must be well formed.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let present = [
            ("username", self.username.as_deref()),
            ("email", self.email.as_deref()),
            ("displayName", self.display_name.as_deref()),
            ("employeeId", self.employee_id.as_deref()),
            ("phoneNo", self.phone_no.as_deref()),
            ("departmentCode", self.department_code.as_deref()),
            ("departmentName", self.department_name.as_deref()),
            ("role", self.role.as_deref()),
        ];

        for (name, value) in present {
            if value.is_some_and(|v| v.trim().is_empty()) {
                if errors.is_empty() {
                    errors.push("form", REQUIRED_FIELDS_MESSAGE);
                }
                errors.push(name, "This field must not be blank.");
            }
        }

        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            if !is_valid_email(email.trim()) {
                errors.push("email", INVALID_EMAIL_MESSAGE);
            }
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete_new_user() -> NewUser {
        NewUser {
            username: "jdoe".into(),
            email: "john.doe@corp.io".into(),
            display_name: "John Doe".into(),
            password: "s3cret!".into(),
            employee_id: "E-1001".into(),
            phone_no: "+1 555 0100".into(),
            department_code: "ENG".into(),
            department_name: "Engineering".into(),
            ..NewUser::default()
        }
    }

    #[test]
    fn backend_record_deserialises_and_exposes_fields() {
        let user: UserRecord = serde_json::from_value(json!({
            "id": "u-1",
            "username": "jdoe",
            "email": "john.doe@corp.io",
            "displayName": "John Doe",
            "employeeId": "E-1001",
            "employeeType": "SEASONAL",
            "status": "ACTIVE",
            "role": "Specialist",
            "departmentName": null,
            "createdAt": "2024-05-01T08:30:00Z"
        }))
        .unwrap();

        assert_eq!(user.employee_type, EmployeeType::Other("SEASONAL".into()));
        assert_eq!(user.field("displayName"), Some(FieldValue::text("John Doe")));
        assert_eq!(user.field("departmentName"), None);
        assert!(matches!(user.field("createdAt"), Some(FieldValue::Timestamp(_))));
        assert_eq!(user.field("nope"), None);
    }

    #[test]
    fn unknown_enum_values_round_trip_verbatim() {
        let value = serde_json::to_value(EmployeeType::Other("SEASONAL".into())).unwrap();
        assert_eq!(value, json!("SEASONAL"));
        assert_eq!(serde_json::to_value(UserStatus::Inactive).unwrap(), json!("INACTIVE"));
    }

    #[test]
    fn new_user_defaults() {
        let user = NewUser::default();
        assert_eq!(user.employee_type, EmployeeType::FullTime);
        assert_eq!(user.role, "Specialist");
        assert_eq!(user.status, UserStatus::Active);
    }

    #[test]
    fn blank_required_field_reports_form_message_first() {
        let user = NewUser {
            phone_no: "  ".into(),
            ..complete_new_user()
        };
        let errors = user.validate().unwrap_err();
        assert_eq!(errors.errors()[0].message, REQUIRED_FIELDS_MESSAGE);
        assert_eq!(errors.for_field("phoneNo").count(), 1);
    }

    #[test]
    fn malformed_email_is_field_scoped() {
        let user = NewUser {
            email: "john.doe@corp".into(),
            ..complete_new_user()
        };
        let errors = user.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].field, "email");
        assert!(complete_new_user().validate().is_ok());
    }

    #[test]
    fn email_rules() {
        for ok in ["a@b.co", "first.last@sub.corp.io"] {
            assert!(is_valid_email(ok), "{ok}");
        }
        for bad in ["", "@b.co", "a@b", "a@.co", "a@b.", "a b@c.io", "a@b@c.io", "plain"] {
            assert!(!is_valid_email(bad), "{bad}");
        }
    }

    #[test]
    fn password_is_redacted_in_debug_output() {
        let rendered = format!("{:?}", complete_new_user());
        assert!(!rendered.contains("s3cret!"));
    }

    #[test]
    fn update_rejects_present_blank_fields_only() {
        assert!(UserUpdate::default().validate().is_ok());

        let update = UserUpdate {
            display_name: Some(" ".into()),
            ..UserUpdate::default()
        };
        let errors = update.validate().unwrap_err();
        assert_eq!(errors.errors()[0].message, REQUIRED_FIELDS_MESSAGE);

        let update = UserUpdate {
            email: Some("not-an-email".into()),
            ..UserUpdate::default()
        };
        assert_eq!(update.validate().unwrap_err().errors()[0].field, "email");
    }

    #[test]
    fn update_serialises_only_present_fields() {
        let update = UserUpdate {
            status: Some(UserStatus::Inactive),
            ..UserUpdate::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"status": "INACTIVE"}));
    }
}
