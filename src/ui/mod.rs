//! Server-rendered page shells

mod handlers;
pub mod menu;
mod templates;

pub use handlers::*;
pub use menu::{menu_for, MenuItem};
