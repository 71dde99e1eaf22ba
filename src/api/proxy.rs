//! `/api/*` proxy to the school backend
//!
//! Pages issue their REST calls against the edge; the edge forwards them
//! with the browser's cookies and hands back the backend's answer,
//! including any `Set-Cookie`. Those cookies are also fed to the auth
//! signal so other tabs learn about logins and logouts immediately.

use axum::{
    body::{Body, Bytes},
    extract::{Extension, Path, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use super::backend::{BackendRequest, BackendResponse};
use super::server::SharedState;
use crate::auth::RequestContext;
use crate::error::{Error, Result};

const LOGOUT_PATH: &str = "auth/logout";

/// Forward one request to the backend
pub async fn forward(
    State(state): State<SharedState>,
    Extension(ctx): Extension<RequestContext>,
    Path(path): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match forward_inner(&state, &ctx, &path, method, &uri, &headers, body).await {
        Ok(response) => response,
        Err(e) => {
            warn!("Proxy {} failed: {}", path, e);
            e.into_response()
        }
    }
}

async fn forward_inner(
    state: &SharedState,
    ctx: &RequestContext,
    path: &str,
    method: Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: Bytes,
) -> Result<Response> {
    let cookie = ctx.backend_cookie_header(&state.config.cookies.client_id);
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let is_logout = method == Method::POST && path.trim_matches('/') == LOGOUT_PATH;

    debug!("Proxy {} /{}", method, path);
    let response = state
        .backend
        .forward(
            method,
            BackendRequest {
                path,
                query: uri.query(),
                cookie: Some(&cookie),
                content_type,
                body,
            },
        )
        .await?;

    if !response.set_cookies.is_empty() {
        state
            .signal
            .apply_set_cookies(&ctx.client_id, &response.set_cookies)
            .await;
    }
    if is_logout && response.is_success() {
        state.signal.invalidate(&ctx.client_id).await;
    }

    into_response(response)
}

fn into_response(backend: BackendResponse) -> Result<Response> {
    let status = StatusCode::from_u16(backend.status).unwrap_or(StatusCode::BAD_GATEWAY);
    let mut builder = Response::builder().status(status);

    if let Some(content_type) = backend.content_type.as_deref() {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    for cookie in &backend.set_cookies {
        if let Ok(value) = HeaderValue::from_str(cookie) {
            builder = builder.header(header::SET_COOKIE, value);
        }
    }

    builder
        .body(Body::from(backend.body))
        .map_err(|e| Error::Other(format!("Failed to build proxy response: {}", e)))
}
