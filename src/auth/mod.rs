//! Cookie-derived sessions, the route guard and the cross-tab auth signal

pub mod cookies;
pub mod guard;
pub mod middleware;
pub mod models;
pub mod signal;

pub use cookies::{read_session, resolve_role, CookieJar, CookieSource};
pub use guard::{classify, decide, evaluate, is_guarded, GuardDecision, RouteClass};
pub use middleware::{route_guard, RequestContext};
pub use models::{Role, Session, UnknownRole};
pub use signal::{AuthSignal, SessionProvider};
