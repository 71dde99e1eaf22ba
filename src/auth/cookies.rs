//! Cookie store and role resolution

use axum::http::{header, HeaderMap};
use std::collections::BTreeMap;

use crate::auth::models::Session;
use crate::config::CookieNames;

/// Anything cookies can be read from synchronously
pub trait CookieSource {
    fn cookie(&self, name: &str) -> Option<String>;
}

/// Name/value snapshot of a browser's cookies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: BTreeMap<String, String>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `Cookie` request header value (`a=1; b=2`)
    pub fn parse(header_value: &str) -> Self {
        let mut jar = Self::new();
        jar.extend_from_header(header_value);
        jar
    }

    /// Collect every `Cookie` header of a request
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut jar = Self::new();
        for value in headers.get_all(header::COOKIE) {
            if let Ok(value) = value.to_str() {
                jar.extend_from_header(value);
            }
        }
        jar
    }

    fn extend_from_header(&mut self, header_value: &str) {
        for pair in header_value.split(';') {
            let Some((name, value)) = pair.trim().split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            self.cookies
                .insert(name.to_string(), value.trim().trim_matches('"').to_string());
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) {
        self.cookies.remove(name);
    }

    pub fn clear(&mut self) {
        self.cookies.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Apply one `Set-Cookie` response header the way a browser would
    ///
    /// `Max-Age<=0` or an `Expires` in the past deletes the cookie.
    pub fn apply_set_cookie(&mut self, set_cookie: &str) {
        let mut parts = set_cookie.split(';');
        let Some((name, value)) = parts.next().and_then(|p| p.trim().split_once('=')) else {
            return;
        };
        let name = name.trim();
        if name.is_empty() {
            return;
        }

        let mut expired = false;
        for attr in parts {
            let (key, val) = attr.trim().split_once('=').unwrap_or((attr.trim(), ""));
            if key.eq_ignore_ascii_case("max-age") {
                if let Ok(secs) = val.trim().parse::<i64>() {
                    // Max-Age takes precedence over Expires
                    expired = secs <= 0;
                    break;
                }
            } else if key.eq_ignore_ascii_case("expires") {
                if let Ok(at) = chrono::DateTime::parse_from_rfc2822(val.trim()) {
                    expired = at < chrono::Utc::now();
                }
            }
        }

        if expired {
            self.remove(name);
        } else {
            self.set(name, value.trim().trim_matches('"'));
        }
    }

    /// Apply every `Set-Cookie` header of a response
    pub fn apply_set_cookie_headers(&mut self, headers: &HeaderMap) {
        for value in headers.get_all(header::SET_COOKIE) {
            if let Ok(value) = value.to_str() {
                self.apply_set_cookie(value);
            }
        }
    }

    /// Render back into a `Cookie` request header value
    pub fn to_header_value(&self) -> String {
        self.cookies
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl CookieSource for CookieJar {
    fn cookie(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }
}

/// Current role label, `None` when the cookie is absent or empty
pub fn resolve_role(source: &impl CookieSource, names: &CookieNames) -> Option<String> {
    source.cookie(&names.role).filter(|r| !r.is_empty())
}

/// Whether an access token cookie is present; its value is never inspected
pub fn has_access_token(source: &impl CookieSource, names: &CookieNames) -> bool {
    source
        .cookie(&names.access_token)
        .is_some_and(|t| !t.is_empty())
}

/// Derive the session from a cookie store
pub fn read_session(source: &impl CookieSource, names: &CookieNames) -> Session {
    Session::new(has_access_token(source, names), resolve_role(source, names))
}

/// `Set-Cookie` value issuing the tab-group id
pub fn client_id_set_cookie(name: &str, id: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", name, id)
}
