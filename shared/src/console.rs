//! Top-level application state.
//!
//! Owns the session, the view router and the transient notice. The frontend
//! wraps one [`Console`] in a reducer; every panel talks to it through
//! actions, never through globals.

use crate::{
    api::ApiError,
    router::{LoadTicket, PageKey, ViewRouter},
    session::{SessionError, SessionState, SessionStore, TokenStorage},
};

/// Which top-level screen is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Login form.
    Login,
    /// Authenticated console with sidebar and panels.
    Console,
}

/// Visual tone of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeTone {
    /// Action completed.
    Success,
    /// Action or session failure.
    Error,
    /// Neutral information.
    Info,
}

/// Transient, non-blocking message for action buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Distinguishes two notices with the same text.
    pub id: u64,
    /// Visual tone.
    pub tone: NoticeTone,
    /// Message text.
    pub text: String,
}

/// Session + router + notice, with a login/logout lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Console<S> {
    session: SessionStore<S>,
    router: ViewRouter,
    notice: Option<Notice>,
    notice_seq: u64,
    login_error: Option<String>,
    login_pending: bool,
}

impl<S: TokenStorage> Console<S> {
    /// Initial state. A stored token means the dashboard is shown straight
    /// away with its load already issued.
    pub fn boot(storage: S) -> Self {
        let session = SessionStore::restore(storage);
        let mut router = ViewRouter::default();
        if session.state() == SessionState::Authenticated {
            router.navigate_to(PageKey::Dashboard);
        }
        Self {
            session,
            router,
            notice: None,
            notice_seq: 0,
            login_error: None,
            login_pending: false,
        }
    }

    /// Visible screen, derived from the session state.
    pub fn screen(&self) -> Screen {
        match self.session.state() {
            SessionState::Authenticated => Screen::Console,
            SessionState::Anonymous => Screen::Login,
        }
    }

    /// Token for outbound calls.
    pub fn token(&self) -> Option<&str> {
        self.session.token()
    }

    /// View router.
    pub fn router(&self) -> &ViewRouter {
        &self.router
    }

    /// Current notice, if any.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Error text under the login form.
    pub fn login_error(&self) -> Option<&str> {
        self.login_error.as_deref()
    }

    /// Whether a login call is in flight; the submit button is disabled.
    pub fn login_pending(&self) -> bool {
        self.login_pending
    }

    /// Login form submitted.
    pub fn begin_login(&mut self) {
        self.login_pending = true;
        self.login_error = None;
    }

    /// Login call returned a token. Shows the dashboard and returns its one
    /// load ticket.
    ///
    /// # Errors
    ///
    /// [`SessionError::EmptyToken`] for a blank token; the login screen stays
    /// with an error message.
    pub fn login_succeeded(&mut self, token: &str) -> Result<LoadTicket, SessionError> {
        self.login_pending = false;
        if let Err(err) = self.session.login(token) {
            self.login_error = Some(err.to_string());
            return Err(err);
        }
        self.login_error = None;
        self.router = ViewRouter::default();
        Ok(self.router.navigate_to(PageKey::Dashboard))
    }

    /// Login call failed.
    pub fn login_failed(&mut self, message: impl Into<String>) {
        self.login_pending = false;
        self.login_error = Some(message.into());
    }

    /// Explicit logout.
    pub fn logout(&mut self) {
        self.session.logout();
        self.router = ViewRouter::default();
        self.login_pending = false;
    }

    /// A call answered 401: drop the session, show login, post the fixed
    /// expiry message.
    pub fn session_expired(&mut self) {
        let message = self.session.expire();
        self.router = ViewRouter::default();
        self.login_pending = false;
        self.notify(NoticeTone::Error, message);
    }

    /// Sidebar navigation. Ignored on the login screen.
    pub fn navigate(&mut self, key: &str) -> Option<LoadTicket> {
        if self.screen() != Screen::Console {
            return None;
        }
        self.router.navigate(key)
    }

    /// URL changed underneath the console.
    pub fn sync_route(&mut self, key: &str) -> Option<LoadTicket> {
        if self.screen() != Screen::Console {
            return None;
        }
        self.router.sync(key)
    }

    /// Open or close the mobile drawer.
    pub fn toggle_drawer(&mut self) {
        self.router.toggle_drawer();
    }

    /// Post a notice, replacing any previous one.
    pub fn notify(&mut self, tone: NoticeTone, text: impl Into<String>) {
        self.notice_seq += 1;
        self.notice = Some(Notice {
            id: self.notice_seq,
            tone,
            text: text.into(),
        });
    }

    /// Dismiss notice `id`; a newer notice is left alone.
    pub fn dismiss_notice(&mut self, id: u64) {
        if self.notice.as_ref().is_some_and(|notice| notice.id == id) {
            self.notice = None;
        }
    }

    /// Surface a failed action call.
    pub fn report(&mut self, err: &ApiError) {
        if err.is_session_expired() {
            self.session_expired();
        } else {
            self.notify(NoticeTone::Error, err.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{api::SESSION_EXPIRED_MESSAGE, session::MemoryStorage};

    #[test]
    fn boot_without_token_shows_login() {
        let console = Console::boot(MemoryStorage::default());
        assert_eq!(console.screen(), Screen::Login);
        assert_eq!(console.router().current_ticket().seq, 0);
    }

    #[test]
    fn boot_with_token_issues_one_dashboard_load() {
        let console = Console::boot(MemoryStorage::with_token("t"));
        assert_eq!(console.screen(), Screen::Console);
        let ticket = console.router().current_ticket();
        assert_eq!(ticket.page, PageKey::Dashboard);
        assert_eq!(ticket.seq, 1);
    }

    #[test]
    fn navigation_is_ignored_while_anonymous() {
        let mut console = Console::boot(MemoryStorage::default());
        assert_eq!(console.navigate("audio"), None);
        assert_eq!(console.sync_route("audio"), None);
    }

    #[test]
    fn failed_login_keeps_login_screen_with_message() {
        let mut console = Console::boot(MemoryStorage::default());
        console.begin_login();
        assert!(console.login_pending());

        console.login_failed("Login yoki parol noto'g'ri");

        assert!(!console.login_pending());
        assert_eq!(console.screen(), Screen::Login);
        assert_eq!(console.login_error(), Some("Login yoki parol noto'g'ri"));
    }

    #[test]
    fn blank_token_is_reported_under_the_form() {
        let mut console = Console::boot(MemoryStorage::default());
        assert!(console.login_succeeded("").is_err());
        assert_eq!(console.screen(), Screen::Login);
        assert!(console.login_error().is_some());
    }

    #[test]
    fn ordinary_failures_post_an_error_notice_only() {
        let mut console = Console::boot(MemoryStorage::with_token("t"));
        console.report(&ApiError::Request {
            status: 500,
            message: "boom".to_string(),
        });

        assert_eq!(console.screen(), Screen::Console);
        let notice = console.notice().expect("notice");
        assert_eq!(notice.tone, NoticeTone::Error);
        assert_eq!(notice.text, "boom");
    }

    #[test]
    fn expiry_report_forces_logout() {
        let storage = MemoryStorage::with_token("t");
        let mut console = Console::boot(storage.clone());

        console.report(&ApiError::SessionExpired);

        assert_eq!(console.screen(), Screen::Login);
        assert_eq!(console.token(), None);
        assert_eq!(console.notice().map(|n| n.text.as_str()), Some(SESSION_EXPIRED_MESSAGE));
    }

    #[test]
    fn stale_dismiss_keeps_newer_notice() {
        let mut console = Console::boot(MemoryStorage::with_token("t"));
        console.notify(NoticeTone::Info, "first");
        let first = console.notice().map(|n| n.id).expect("first");
        console.notify(NoticeTone::Success, "second");

        console.dismiss_notice(first);
        assert_eq!(console.notice().map(|n| n.text.as_str()), Some("second"));

        let second = console.notice().map(|n| n.id).expect("second");
        console.dismiss_notice(second);
        assert!(console.notice().is_none());
    }

    #[test]
    fn logout_returns_to_login() {
        let storage = MemoryStorage::with_token("t");
        let mut console = Console::boot(storage.clone());
        console.navigate("audio");

        console.logout();

        assert_eq!(console.screen(), Screen::Login);
        assert_eq!(storage.load(), None);
        assert_eq!(console.router().active(), PageKey::Dashboard);
    }
}
