//! Configuration schema definitions

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub cookies: CookieNames,

    #[serde(default)]
    pub session: SessionConfig,
}

/// Server configuration for the edge HTTP server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Shown in page titles and headers
    #[serde(default = "default_school_name")]
    pub school_name: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_school_name() -> String {
    "Amfofana High School".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            school_name: default_school_name(),
        }
    }
}

/// School REST backend the `/api` proxy forwards to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Names of the cookies the guard and the auth signal read
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CookieNames {
    /// HttpOnly access token set by the backend; only its presence matters
    #[serde(default = "default_access_token_cookie")]
    pub access_token: String,

    #[serde(default = "default_role_cookie")]
    pub role: String,

    /// Identifies the tabs of one browser for the auth signal
    #[serde(default = "default_client_id_cookie")]
    pub client_id: String,
}

fn default_access_token_cookie() -> String {
    "accessToken".to_string()
}

fn default_role_cookie() -> String {
    "userRole".to_string()
}

fn default_client_id_cookie() -> String {
    "schoolgateClient".to_string()
}

impl Default for CookieNames {
    fn default() -> Self {
        Self {
            access_token: default_access_token_cookie(),
            role: default_role_cookie(),
            client_id: default_client_id_cookie(),
        }
    }
}

/// Auth signal housekeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Minutes a signal with no subscribers survives without activity
    #[serde(default = "default_idle_minutes")]
    pub idle_minutes: i64,
}

fn default_idle_minutes() -> i64 {
    30
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_minutes: default_idle_minutes(),
        }
    }
}

impl Config {
    /// Address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
