use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Privilege level a user holds over a snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionRole {
    /// Read, write, share and delete
    Owner,
    /// Read and write
    Write,
    /// Read only
    Read,
}

impl PermissionRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionRole::Owner => "OWNER",
            PermissionRole::Write => "WRITE",
            PermissionRole::Read => "READ",
        }
    }
}

impl std::str::FromStr for PermissionRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OWNER" => Ok(PermissionRole::Owner),
            "WRITE" => Ok(PermissionRole::Write),
            "READ" => Ok(PermissionRole::Read),
            other => Err(format!("Unknown permission role: {other}")),
        }
    }
}

/// Body of `POST /api/permissions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePermissionRequest {
    pub snippet_id: String,
    pub user_id: String,
    #[serde(default = "default_role")]
    pub role: PermissionRole,
}

fn default_role() -> PermissionRole {
    PermissionRole::Owner
}

/// Body of `PUT /api/permissions/snippet/{snippetId}/user/{userId}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePermissionRequest {
    pub role: PermissionRole,
}

/// A stored permission, as returned by every successful mutation or listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionResponse {
    pub id: String,
    pub snippet_id: String,
    pub user_id: String,
    pub role: PermissionRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of `GET /api/permissions/check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionCheckResponse {
    pub has_permission: bool,
    pub role: Option<PermissionRole>,
}

/// Error body shared by every failure response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            status,
            error: error.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_use_screaming_names_on_the_wire() {
        assert_eq!(serde_json::to_string(&PermissionRole::Owner).unwrap(), "\"OWNER\"");
        assert_eq!(serde_json::to_string(&PermissionRole::Write).unwrap(), "\"WRITE\"");
        assert_eq!(serde_json::to_string(&PermissionRole::Read).unwrap(), "\"READ\"");

        let role: PermissionRole = serde_json::from_str("\"WRITE\"").unwrap();
        assert_eq!(role, PermissionRole::Write);
    }

    #[test]
    fn create_request_defaults_role_to_owner() {
        let request: CreatePermissionRequest =
            serde_json::from_str(r#"{"snippet_id": "s1", "user_id": "u1"}"#).unwrap();
        assert_eq!(request.role, PermissionRole::Owner);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let result = serde_json::from_str::<CreatePermissionRequest>(
            r#"{"snippet_id": "s1", "user_id": "u1", "role": "ADMIN"}"#,
        );
        assert!(result.is_err());
        assert!("ADMIN".parse::<PermissionRole>().is_err());
    }

    #[test]
    fn role_round_trips_through_storage_form() {
        for role in [PermissionRole::Owner, PermissionRole::Write, PermissionRole::Read] {
            assert_eq!(role.as_str().parse::<PermissionRole>().unwrap(), role);
        }
    }
}
