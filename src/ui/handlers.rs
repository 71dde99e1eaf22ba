//! Web UI handlers

use axum::{
    extract::{Extension, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use minijinja::{context, Environment, Value};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::menu::{menu_for, page_title};
use super::templates;
use crate::api::server::SharedState;
use crate::auth::{classify, RequestContext, Role, RouteClass, Session};
use crate::error::Result;

const REPORT_SUMMARY_PATH: &str = "/admin/reports/summary";

/// Compiled page templates
pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("base.html", templates::BASE)?;
        env.add_template("navbar.html", templates::NAVBAR)?;
        env.add_template("home.html", templates::HOME)?;
        env.add_template("about.html", templates::ABOUT)?;
        env.add_template("login.html", templates::LOGIN)?;
        env.add_template("register.html", templates::REGISTER)?;
        env.add_template("dashboard.html", templates::DASHBOARD)?;
        env.add_template("not_found.html", templates::NOT_FOUND)?;
        Ok(Self { env })
    }

    pub fn render(&self, name: &str, ctx: Value) -> Result<String> {
        Ok(self.env.get_template(name)?.render(ctx)?)
    }
}

/// Admin dashboard counters served by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_students: u64,
    pub total_teachers: u64,
    pub total_admins: u64,
    pub total_classes: u64,
    pub total_exams: u64,
    pub total_subjects: u64,
}

#[derive(Debug, Serialize)]
pub struct ReportCard {
    pub label: &'static str,
    pub value: u64,
}

impl ReportSummary {
    pub fn cards(&self) -> Vec<ReportCard> {
        vec![
            ReportCard { label: "Total Students", value: self.total_students },
            ReportCard { label: "Total Teachers", value: self.total_teachers },
            ReportCard { label: "Total Admins", value: self.total_admins },
            ReportCard { label: "Total Classes", value: self.total_classes },
            ReportCard { label: "Total Exams", value: self.total_exams },
            ReportCard { label: "Total Subjects", value: self.total_subjects },
        ]
    }
}

/// Key the page script compares live session frames against
fn session_key(session: &Session) -> String {
    format!(
        "{}:{}",
        session.has_access_token,
        session.role.as_deref().unwrap_or("")
    )
}

/// Dashboard link for the navbar; only for sessions with a known role
fn dashboard_href(session: &Session) -> Option<&'static str> {
    session.authenticated_role().map(|role| role.home_path())
}

fn public_page(state: &SharedState, ctx: &RequestContext, name: &str) -> Result<Html<String>> {
    let html = state.pages.render(
        name,
        context! {
            school => &state.config.server.school_name,
            session_key => session_key(&ctx.session),
            dashboard_href => dashboard_href(&ctx.session),
        },
    )?;
    Ok(Html(html))
}

/// Landing page
pub async fn home(
    State(state): State<SharedState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Html<String>> {
    public_page(&state, &ctx, "home.html")
}

pub async fn about(
    State(state): State<SharedState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Html<String>> {
    public_page(&state, &ctx, "about.html")
}

/// Login form; only reachable while logged out
pub async fn login(
    State(state): State<SharedState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Html<String>> {
    public_page(&state, &ctx, "login.html")
}

pub async fn register(
    State(state): State<SharedState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Html<String>> {
    public_page(&state, &ctx, "register.html")
}

/// Role dashboard shell for every page under `/admin`, `/teacher`, `/student`
pub async fn dashboard(
    State(state): State<SharedState>,
    Extension(ctx): Extension<RequestContext>,
    uri: Uri,
) -> Result<Response> {
    let path = uri.path();
    let RouteClass::RoleArea(role) = classify(path) else {
        return not_found(State(state), Extension(ctx)).await;
    };

    let mut report = None;
    let mut notice = None;
    if role == Role::Admin && path.trim_end_matches('/') == Role::Admin.home_path() {
        match load_report(&state, &ctx).await {
            Ok(summary) => report = Some(summary.cards()),
            Err(e) => {
                warn!("Dashboard report unavailable: {}", e);
                notice = Some("Failed to fetch dashboard data");
            }
        }
    }

    let html = state.pages.render(
        "dashboard.html",
        context! {
            school => &state.config.server.school_name,
            session_key => session_key(&ctx.session),
            role => role.as_str(),
            menu => menu_for(role),
            active => path.trim_end_matches('/'),
            title => page_title(role, path),
            report => report,
            notice => notice,
        },
    )?;
    Ok(Html(html).into_response())
}

async fn load_report(state: &SharedState, ctx: &RequestContext) -> Result<ReportSummary> {
    let cookie = ctx.backend_cookie_header(&state.config.cookies.client_id);
    state.backend.fetch_json(REPORT_SUMMARY_PATH, &cookie).await
}

/// Fallback for unknown paths
pub async fn not_found(
    State(state): State<SharedState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Response> {
    let html = public_page(&state, &ctx, "not_found.html")?;
    Ok((StatusCode::NOT_FOUND, html).into_response())
}
