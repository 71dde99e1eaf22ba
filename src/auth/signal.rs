//! Session provider and cross-tab auth signal
//!
//! All tabs of one browser share a client id cookie. Each client id owns a
//! [`SessionProvider`]: the single place cookie-derived auth state lives,
//! published through a `watch` channel. Any observation of that browser's
//! cookies (a request passing the edge, a `Set-Cookie` from the backend)
//! counts as a storage change: the provider re-reads its store and
//! republishes only when the derived session actually changed.

use std::collections::HashMap;
use tokio::sync::{watch, RwLock};
use tracing::debug;

use crate::auth::cookies::{read_session, CookieJar, CookieSource};
use crate::auth::models::Session;
use crate::config::CookieNames;

/// Owner of one browser's auth state
#[derive(Debug)]
pub struct SessionProvider {
    names: CookieNames,
    store: CookieJar,
    tx: watch::Sender<Session>,
    /// Access token cleared by the last logout; jars still carrying it are stale
    revoked_token: Option<String>,
    last_activity: chrono::DateTime<chrono::Utc>,
}

impl SessionProvider {
    /// Create a provider that reports logged out until initialized
    pub fn new(names: CookieNames) -> Self {
        let (tx, _rx) = watch::channel(Session::logged_out());
        Self {
            names,
            store: CookieJar::new(),
            tx,
            revoked_token: None,
            last_activity: chrono::Utc::now(),
        }
    }

    /// Value every subscriber renders before its subscription is live.
    ///
    /// Always logged out, so server-rendered and client-rendered first
    /// frames agree.
    pub fn initial_snapshot() -> Session {
        Session::logged_out()
    }

    /// Seed the provider with the cookies seen at startup
    pub fn initialize(&mut self, jar: &CookieJar) -> Session {
        self.refresh(jar);
        self.current()
    }

    /// Storage-change notification: replace the store and republish if the
    /// derived session differs. Returns whether subscribers were notified.
    ///
    /// A jar still presenting the token a logout revoked was read before
    /// that logout reached the browser; it is ignored.
    pub fn refresh(&mut self, jar: &CookieJar) -> bool {
        if self.is_stale(jar) {
            debug!("Ignoring cookies carrying a revoked access token");
            self.last_activity = chrono::Utc::now();
            return false;
        }
        self.store = jar.clone();
        self.republish()
    }

    /// Apply backend `Set-Cookie` values to the store, then republish
    pub fn apply_set_cookies<'a>(&mut self, set_cookies: impl IntoIterator<Item = &'a str>) -> bool {
        let previous = self.access_token();
        for value in set_cookies {
            self.store.apply_set_cookie(value);
        }
        match self.access_token() {
            Some(_) => self.revoked_token = None,
            None if previous.is_some() => self.revoked_token = previous,
            None => {}
        }
        self.republish()
    }

    /// Logout: drop the auth cookies and publish logged out
    pub fn invalidate(&mut self) -> bool {
        if let Some(token) = self.access_token() {
            self.revoked_token = Some(token);
        }
        self.store.remove(&self.names.access_token);
        self.store.remove(&self.names.role);
        self.republish()
    }

    fn access_token(&self) -> Option<String> {
        self.store
            .get(&self.names.access_token)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
    }

    fn is_stale(&self, jar: &CookieJar) -> bool {
        self.revoked_token
            .as_deref()
            .is_some_and(|revoked| jar.get(&self.names.access_token) == Some(revoked))
    }

    fn republish(&mut self) -> bool {
        self.last_activity = chrono::Utc::now();
        let next = read_session(&self.store, &self.names);
        self.tx.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                debug!(
                    "Session changed: token={} role={:?}",
                    next.has_access_token, next.role
                );
                *current = next;
                true
            }
        })
    }

    pub fn current(&self) -> Session {
        self.tx.borrow().clone()
    }

    /// Receiver that wakes on every published change
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// No subscribers and no activity for `idle_minutes`
    pub fn is_idle(&self, idle_minutes: i64) -> bool {
        self.subscriber_count() == 0
            && chrono::Utc::now()
                .signed_duration_since(self.last_activity)
                .num_minutes()
                >= idle_minutes
    }
}

impl CookieSource for SessionProvider {
    fn cookie(&self, name: &str) -> Option<String> {
        self.store.cookie(name)
    }
}

/// Per-browser session providers keyed by client id
#[derive(Debug)]
pub struct AuthSignal {
    names: CookieNames,
    providers: RwLock<HashMap<String, SessionProvider>>,
}

impl AuthSignal {
    pub fn new(names: CookieNames) -> Self {
        Self {
            names,
            providers: RwLock::new(HashMap::new()),
        }
    }

    /// A browser's cookies were observed; returns whether its tabs were notified
    pub async fn notify_storage_change(&self, client_id: &str, jar: &CookieJar) -> bool {
        let mut providers = self.providers.write().await;
        match providers.get_mut(client_id) {
            Some(provider) => provider.refresh(jar),
            None => {
                let mut provider = SessionProvider::new(self.names.clone());
                provider.initialize(jar);
                providers.insert(client_id.to_string(), provider);
                false
            }
        }
    }

    /// Backend `Set-Cookie` headers reached a browser
    pub async fn apply_set_cookies(&self, client_id: &str, set_cookies: &[String]) -> bool {
        let mut providers = self.providers.write().await;
        let provider = providers
            .entry(client_id.to_string())
            .or_insert_with(|| SessionProvider::new(self.names.clone()));
        provider.apply_set_cookies(set_cookies.iter().map(String::as_str))
    }

    /// Logout from one tab; every other tab of the browser sees logged out
    pub async fn invalidate(&self, client_id: &str) -> bool {
        let mut providers = self.providers.write().await;
        providers
            .get_mut(client_id)
            .map(SessionProvider::invalidate)
            .unwrap_or(false)
    }

    /// Subscribe a tab, creating a logged-out provider if none exists yet
    pub async fn subscribe(&self, client_id: &str) -> watch::Receiver<Session> {
        let mut providers = self.providers.write().await;
        providers
            .entry(client_id.to_string())
            .or_insert_with(|| SessionProvider::new(self.names.clone()))
            .subscribe()
    }

    pub async fn current(&self, client_id: &str) -> Session {
        let providers = self.providers.read().await;
        providers
            .get(client_id)
            .map(SessionProvider::current)
            .unwrap_or_else(SessionProvider::initial_snapshot)
    }

    pub async fn client_count(&self) -> usize {
        self.providers.read().await.len()
    }

    /// Drop providers nobody listens to anymore
    pub async fn purge_idle(&self, idle_minutes: i64) -> usize {
        let mut providers = self.providers.write().await;
        let before = providers.len();
        providers.retain(|_, provider| !provider.is_idle(idle_minutes));
        before - providers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::cookies::resolve_role;

    #[test]
    fn test_provider_starts_logged_out() {
        let provider = SessionProvider::new(CookieNames::default());
        assert_eq!(provider.current(), Session::logged_out());
        assert_eq!(SessionProvider::initial_snapshot(), Session::logged_out());
    }

    #[test]
    fn test_refresh_publishes_only_on_change() {
        let mut provider = SessionProvider::new(CookieNames::default());
        let mut rx = provider.subscribe();

        let jar = CookieJar::parse("accessToken=t; userRole=ADMIN");
        assert!(provider.refresh(&jar));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().role.as_deref(), Some("ADMIN"));

        // Unrelated cookie changes do not wake subscribers
        let jar = CookieJar::parse("accessToken=t; userRole=ADMIN; theme=dark");
        assert!(!provider.refresh(&jar));
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_invalidate_publishes_logged_out() {
        let mut provider = SessionProvider::new(CookieNames::default());
        provider.initialize(&CookieJar::parse("accessToken=t; userRole=TEACHER"));
        let rx = provider.subscribe();

        assert!(provider.invalidate());
        assert_eq!(*rx.borrow(), Session::logged_out());
        assert_eq!(resolve_role(&provider, &CookieNames::default()), None);
    }

    #[test]
    fn test_late_request_after_logout_does_not_log_back_in() {
        let names = CookieNames::default();
        let before_logout = CookieJar::parse("accessToken=t; userRole=ADMIN");
        let mut provider = SessionProvider::new(names.clone());
        provider.initialize(&before_logout);
        let mut rx = provider.subscribe();

        provider.apply_set_cookies([
            "accessToken=; Path=/; Max-Age=0; HttpOnly",
            "userRole=; Path=/; Max-Age=0",
        ]);
        provider.invalidate();
        assert_eq!(*rx.borrow_and_update(), Session::logged_out());

        // Another tab's request, sent before the logout, arrives afterwards
        assert!(!provider.refresh(&before_logout));
        assert!(!rx.has_changed().unwrap());
        assert_eq!(provider.current(), Session::logged_out());

        // The browser's own cookies after logout are still accepted
        assert!(!provider.refresh(&CookieJar::parse("theme=dark")));
        assert_eq!(provider.cookie("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_new_login_after_logout_is_published() {
        let mut provider = SessionProvider::new(CookieNames::default());
        provider.initialize(&CookieJar::parse("accessToken=t; userRole=ADMIN"));
        provider.invalidate();

        // The backend may hand out the same token value again
        assert!(provider.apply_set_cookies(["accessToken=t; Path=/; HttpOnly", "userRole=TEACHER; Path=/"]));
        assert_eq!(provider.current(), Session::new(true, Some("TEACHER".to_string())));
        assert!(!provider.refresh(&CookieJar::parse("accessToken=t; userRole=TEACHER")));

        provider.invalidate();
        assert!(provider.refresh(&CookieJar::parse("accessToken=fresh; userRole=STUDENT")));
        assert_eq!(provider.current().role.as_deref(), Some("STUDENT"));
    }

    #[test]
    fn test_apply_set_cookies_from_logout_response() {
        let mut provider = SessionProvider::new(CookieNames::default());
        provider.initialize(&CookieJar::parse("accessToken=t; userRole=STUDENT"));

        let changed = provider.apply_set_cookies([
            "accessToken=; Path=/; Max-Age=0; HttpOnly",
            "userRole=; Path=/; Max-Age=0",
        ]);
        assert!(changed);
        assert!(!provider.current().is_logged_in());
    }

    #[tokio::test]
    async fn test_signal_reaches_other_tabs() {
        let signal = AuthSignal::new(CookieNames::default());
        let logged_in = CookieJar::parse("accessToken=t; userRole=ADMIN");
        signal.notify_storage_change("browser-1", &logged_in).await;

        let mut tab_a = signal.subscribe("browser-1").await;
        let mut tab_b = signal.subscribe("browser-1").await;
        assert!(tab_a.borrow_and_update().is_logged_in());
        tab_b.borrow_and_update();

        // Logout in tab A
        assert!(signal.invalidate("browser-1").await);
        tab_b.changed().await.unwrap();
        assert_eq!(*tab_b.borrow(), Session::logged_out());
        assert!(tab_a.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_signal_isolates_browsers() {
        let signal = AuthSignal::new(CookieNames::default());
        signal
            .notify_storage_change("a", &CookieJar::parse("accessToken=t; userRole=ADMIN"))
            .await;
        let rx_b = signal.subscribe("b").await;

        signal.invalidate("a").await;
        assert!(!rx_b.has_changed().unwrap());
        assert_eq!(signal.current("b").await, Session::logged_out());
        assert_eq!(signal.current("unknown").await, Session::logged_out());
    }

    #[tokio::test]
    async fn test_purge_idle_keeps_subscribed_clients() {
        let signal = AuthSignal::new(CookieNames::default());
        signal.notify_storage_change("gone", &CookieJar::new()).await;
        let _rx = signal.subscribe("live").await;

        let purged = signal.purge_idle(0).await;
        assert_eq!(purged, 1);
        assert_eq!(signal.client_count().await, 1);
    }
}
