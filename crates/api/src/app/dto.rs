use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

// -------------------------
// Inbound
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }
}

/// `?page=&size=` on the list route. Unparseable values fall back to defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub size: Option<String>,
}

impl ListQuery {
    pub fn into_request(self) -> ListUsersRequest {
        fn parse(v: Option<String>, default: u32) -> u32 {
            v.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
        }
        ListUsersRequest {
            page: parse(self.page, DEFAULT_PAGE),
            size: parse(self.size, DEFAULT_PAGE_SIZE),
        }
    }
}

// -------------------------
// Backend-bound
// -------------------------

#[derive(Debug, Serialize)]
pub struct BackendLoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListUsersRequest {
    pub page: u32,
    pub size: u32,
}
