//! API route handlers

use axum::{extract::Extension, response::IntoResponse, Json};
use serde::Serialize;

use crate::auth::RequestContext;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn err(message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

// Health check

pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok("healthy"))
}

// Session of the calling browser, for pages deciding which dashboard to link

pub async fn session(Extension(ctx): Extension<RequestContext>) -> impl IntoResponse {
    Json(ApiResponse::ok(ctx.session))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_shapes() {
        let ok = serde_json::to_value(ApiResponse::ok("healthy")).unwrap();
        assert_eq!(ok["success"], true);
        assert_eq!(ok["data"], "healthy");
        assert!(ok["error"].is_null());

        let err = serde_json::to_value(ApiResponse::err("boom")).unwrap();
        assert_eq!(err["success"], false);
        assert_eq!(err["error"], "boom");
    }
}
