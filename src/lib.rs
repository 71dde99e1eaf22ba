//! schoolgate - role-gated edge server for the school management portal
//!
//! This is the library interface for schoolgate: the route guard, the
//! cookie-derived session model, the cross-tab auth signal, and the HTTP
//! server that puts them in front of the school REST backend.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod ui;

pub use auth::{GuardDecision, Role, Session};
pub use config::Config;
pub use error::Error;
