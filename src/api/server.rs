//! HTTP edge server

use axum::{
    middleware,
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::auth::{route_guard, AuthSignal};
use crate::config::Config;
use crate::error::Result;
use crate::ui::{self, Pages};

use super::backend::BackendClient;
use super::{proxy, routes, websocket};

const IDLE_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub backend: BackendClient,
    pub signal: AuthSignal,
    pub pages: Pages,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let backend = BackendClient::new(&config.backend)?;
        let signal = AuthSignal::new(config.cookies.clone());
        let pages = Pages::new()?;
        Ok(Self {
            config,
            backend,
            signal,
            pages,
        })
    }
}

pub type SharedState = Arc<AppState>;

/// Run the edge server until Ctrl-C
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState::new(config)?);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Server listening on {}", addr);
    info!("Proxying /api to {}", state.backend.base_url());

    spawn_idle_sweep(state.clone());

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Create the router with all routes; every request passes the route guard
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        // API routes
        .route("/api/health", get(routes::health))
        .route("/api/session", get(routes::session))
        .route("/api/{*path}", any(proxy::forward))
        .route("/ws/session", get(websocket::ws_handler))
        // UI routes
        .route("/", get(ui::home))
        .route("/about", get(ui::about))
        .route("/login", get(ui::login))
        .route("/register", get(ui::register))
        .route("/admin", get(ui::dashboard))
        .route("/admin/", get(ui::dashboard))
        .route("/admin/{*rest}", get(ui::dashboard))
        .route("/teacher", get(ui::dashboard))
        .route("/teacher/", get(ui::dashboard))
        .route("/teacher/{*rest}", get(ui::dashboard))
        .route("/student", get(ui::dashboard))
        .route("/student/", get(ui::dashboard))
        .route("/student/{*rest}", get(ui::dashboard))
        .fallback(ui::not_found)
        // Middleware
        .layer(middleware::from_fn_with_state(state.clone(), route_guard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Periodically drop auth signals no tab listens to
fn spawn_idle_sweep(state: SharedState) {
    let idle_minutes = state.config.session.idle_minutes;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(IDLE_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let purged = state.signal.purge_idle(idle_minutes).await;
            if purged > 0 {
                debug!("Purged {} idle session signals", purged);
            }
        }
    });
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until the process is killed
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
