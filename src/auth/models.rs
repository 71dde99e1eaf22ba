//! Authentication models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Portal roles, as written by the backend into the role cookie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// School administration - users, classes, subjects, timetables
    Admin,
    /// Teaching staff - attendance, exams, results, materials
    Teacher,
    /// Enrolled student - read-only views of their own records
    Student,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Teacher, Role::Student];

    /// Dashboard the role lands on after login
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Teacher => "/teacher",
            Role::Student => "/student",
        }
    }

    /// Path prefix of the area only this role may enter
    pub fn area_prefix(&self) -> &'static str {
        self.home_path()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Teacher => "TEACHER",
            Role::Student => "STUDENT",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned for any role label outside the known set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role '{}'", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    // Case-sensitive: the backend only ever writes upper-case names
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "TEACHER" => Ok(Role::Teacher),
            "STUDENT" => Ok(Role::Student),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Cookie-derived authentication state
///
/// Never stored server-side. `role` only carries meaning while
/// `has_access_token` is true; a missing token is unauthenticated whatever
/// the role cookie says.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub has_access_token: bool,
    /// Raw role cookie value, kept so an unrecognized label is not lost
    pub role: Option<String>,
}

impl Session {
    /// The state assumed before anything has been read
    pub fn logged_out() -> Self {
        Self::default()
    }

    pub fn new(has_access_token: bool, role: Option<String>) -> Self {
        Self {
            has_access_token,
            role,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.has_access_token
    }

    /// Parsed role, `None` when absent or unrecognized
    pub fn parsed_role(&self) -> Option<Role> {
        self.role.as_deref().and_then(|r| r.parse().ok())
    }

    /// Role of an authenticated session; `None` when logged out
    pub fn authenticated_role(&self) -> Option<Role> {
        if self.has_access_token {
            self.parsed_role()
        } else {
            None
        }
    }

    /// Where an authenticated session belongs; `/` for unrecognized roles
    pub fn home_path(&self) -> &'static str {
        self.parsed_role().map(|r| r.home_path()).unwrap_or("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_label() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn test_role_parse_is_case_sensitive() {
        assert!("admin".parse::<Role>().is_err());
        assert_eq!(
            "SUPERUSER".parse::<Role>(),
            Err(UnknownRole("SUPERUSER".to_string()))
        );
    }

    #[test]
    fn test_role_serializes_upper_case() {
        let json = serde_json::to_string(&Role::Teacher).unwrap();
        assert_eq!(json, "\"TEACHER\"");
    }

    #[test]
    fn test_session_without_token_has_no_role() {
        let session = Session::new(false, Some("ADMIN".to_string()));
        assert!(!session.is_logged_in());
        assert_eq!(session.authenticated_role(), None);
        assert_eq!(session.parsed_role(), Some(Role::Admin));
    }

    #[test]
    fn test_session_home_path_falls_back_to_root() {
        assert_eq!(Session::new(true, Some("STUDENT".into())).home_path(), "/student");
        assert_eq!(Session::new(true, Some("SUPERUSER".into())).home_path(), "/");
        assert_eq!(Session::new(true, None).home_path(), "/");
    }

    #[test]
    fn test_session_json_shape() {
        let json = serde_json::to_value(Session::new(true, Some("ADMIN".into()))).unwrap();
        assert_eq!(json["hasAccessToken"], true);
        assert_eq!(json["role"], "ADMIN");
    }
}
