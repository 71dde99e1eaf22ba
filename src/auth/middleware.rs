//! Route guard middleware and request session extraction

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::api::server::SharedState;
use crate::auth::cookies::{client_id_set_cookie, read_session, CookieJar};
use crate::auth::guard::{evaluate, GuardDecision};
use crate::auth::models::Session;
use crate::config::CookieNames;

/// Cookie-derived state of the current request, stored in request extensions
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub session: Session,
    pub client_id: String,
    pub jar: CookieJar,
    /// The client id was minted for this request and still has to be set
    pub new_client: bool,
}

impl RequestContext {
    /// Read cookies from a request, minting a client id if the browser has none
    pub fn from_request(req: &Request, names: &CookieNames) -> Self {
        let jar = CookieJar::from_headers(req.headers());
        let session = read_session(&jar, names);
        match jar.get(&names.client_id).filter(|id| !id.is_empty()) {
            Some(id) => Self {
                session,
                client_id: id.to_string(),
                jar,
                new_client: false,
            },
            None => Self {
                session,
                client_id: uuid::Uuid::new_v4().to_string(),
                jar,
                new_client: true,
            },
        }
    }

    /// `Cookie` header for backend calls: the browser's cookies minus the edge's client id
    pub fn backend_cookie_header(&self, client_id_cookie: &str) -> String {
        let mut jar = self.jar.clone();
        jar.remove(client_id_cookie);
        jar.to_header_value()
    }
}

/// Gate every request with the route guard.
///
/// Unmatched paths proceed untouched. A request from a browser that already
/// carries a client id counts as a storage-change observation for its auth
/// signal; ids minted for this request have nothing to observe yet.
/// Redirects leave cookies alone; the client id is only issued on responses
/// that proceed.
pub async fn route_guard(State(state): State<SharedState>, mut req: Request, next: Next) -> Response {
    let names = state.config.cookies.clone();
    let ctx = RequestContext::from_request(&req, &names);

    if !ctx.new_client {
        state
            .signal
            .notify_storage_change(&ctx.client_id, &ctx.jar)
            .await;
    }

    let path = req.uri().path().to_string();
    if let GuardDecision::Redirect(target) = evaluate(&path, &ctx.session) {
        debug!("Guard redirect {} -> {}", path, target);
        return Redirect::temporary(target).into_response();
    }

    let new_client = ctx.new_client.then(|| ctx.client_id.clone());
    req.extensions_mut().insert(ctx);
    let mut response = next.run(req).await;
    if let Some(id) = new_client {
        append_client_cookie(&mut response, &names, &id);
    }
    response
}

fn append_client_cookie(response: &mut Response, names: &CookieNames, client_id: &str) {
    if let Ok(value) = HeaderValue::from_str(&client_id_set_cookie(&names.client_id, client_id)) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_context_without_cookies_mints_client_id() {
        let req = Request::builder()
            .method("GET")
            .uri("/admin")
            .body(Body::empty())
            .unwrap();

        let ctx = RequestContext::from_request(&req, &CookieNames::default());
        assert!(ctx.new_client);
        assert!(!ctx.client_id.is_empty());
        assert_eq!(ctx.session, Session::logged_out());
    }

    #[test]
    fn test_context_reads_cookies() {
        let req = Request::builder()
            .uri("/teacher")
            .header("Cookie", "accessToken=x; userRole=TEACHER; schoolgateClient=abc")
            .body(Body::empty())
            .unwrap();

        let ctx = RequestContext::from_request(&req, &CookieNames::default());
        assert!(!ctx.new_client);
        assert_eq!(ctx.client_id, "abc");
        assert_eq!(ctx.session, Session::new(true, Some("TEACHER".to_string())));
    }
}
