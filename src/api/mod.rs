//! HTTP API: health, session, backend proxy and the auth signal socket

pub mod backend;
pub mod proxy;
pub mod routes;
pub mod server;
pub mod websocket;

pub use backend::BackendClient;
pub use server::*;
