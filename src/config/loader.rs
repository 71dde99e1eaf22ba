//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use super::Config;

pub const CONFIG_FILENAME: &str = "schoolgate.toml";

/// Load configuration from schoolgate.toml
pub fn load_config() -> Result<Config> {
    load_config_from_path(&find_config_file()?)
}

/// Load configuration, falling back to defaults when no file exists
pub fn load_config_or_default() -> Result<Config> {
    match load_config() {
        Err(Error::ConfigNotFound) => Ok(Config::default()),
        other => other,
    }
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let raw = fs::read_to_string(path).map_err(|_| Error::ConfigNotFound)?;
    Ok(toml::from_str(&interpolate_env_vars(&raw))?)
}

/// Write a configuration to disk
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

/// Find the configuration file, searching upward from current directory
fn find_config_file() -> Result<PathBuf> {
    let cwd = env::current_dir().map_err(|e| Error::Config(e.to_string()))?;
    find_config_in(&cwd).ok_or(Error::ConfigNotFound)
}

/// Nearest `schoolgate.toml` in `start` or one of its ancestors
fn find_config_in(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILENAME))
        .find(|candidate| candidate.is_file())
}

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}").expect("env interpolation pattern is a valid regex")
});

/// Expand `${NAME}` and `${NAME:-fallback}`; unset variables without a fallback become empty
fn interpolate_env_vars(content: &str) -> String {
    ENV_VAR
        .replace_all(content, |caps: &regex::Captures| {
            let fallback = caps.get(2).map_or("", |m| m.as_str());
            env::var(&caps[1]).unwrap_or_else(|_| fallback.to_string())
        })
        .into_owned()
}

/// Generate a default configuration file content
pub fn default_config_content() -> &'static str {
    r#"# schoolgate configuration

[server]
host = "0.0.0.0"
port = 3000
school_name = "Amfofana High School"

# School REST backend; every /api/* call is forwarded here with cookies attached
[backend]
base_url = "${SCHOOL_API_URL:-http://localhost:8080}"
timeout_secs = 15

# Cookie names written by the backend on /auth/login
[cookies]
access_token = "accessToken"
role = "userRole"
client_id = "schoolgateClient"

[session]
idle_minutes = 30
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_interpolation() {
        env::set_var("SCHOOLGATE_TEST_VAR", "hello");
        let content = "value = \"${SCHOOLGATE_TEST_VAR}\"";
        let result = interpolate_env_vars(content);
        assert_eq!(result, "value = \"hello\"");
        env::remove_var("SCHOOLGATE_TEST_VAR");
    }

    #[test]
    fn test_env_interpolation_with_default() {
        let content = "value = \"${SCHOOLGATE_NONEXISTENT_VAR:-default_value}\"";
        let result = interpolate_env_vars(content);
        assert_eq!(result, "value = \"default_value\"");
    }

    #[test]
    fn test_config_found_in_parent_directory() {
        let root = tempfile::TempDir::new().unwrap();
        let nested = root.path().join("portal").join("admin");
        fs::create_dir_all(&nested).unwrap();
        assert_eq!(find_config_in(&nested), None);

        fs::write(root.path().join(CONFIG_FILENAME), "").unwrap();
        assert_eq!(find_config_in(&nested), Some(root.path().join(CONFIG_FILENAME)));
    }

    #[test]
    fn test_default_content_parses() {
        let content = interpolate_env_vars(default_config_content());
        let config: Config = toml::from_str(&content).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.cookies.access_token, "accessToken");
        assert_eq!(config.cookies.role, "userRole");
    }
}
