use std::{ops::Deref, rc::Rc};

use soniy_admin_shared::{ApiError, Console, NoticeTone, PageKey};
use yew::prelude::*;

use crate::{api::ApiClient, storage::BrowserStorage};

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleState {
    console: Console<BrowserStorage>,
}

impl Default for ConsoleState {
    fn default() -> Self {
        let mut console = Console::boot(BrowserStorage);
        // Start on the page the URL names so the dashboard is not loaded first.
        if let Some(key) = initial_page_key() {
            console.sync_route(&key);
        }
        Self {
            console,
        }
    }
}

fn initial_page_key() -> Option<String> {
    let path = web_sys::window()?.location().pathname().ok()?;
    let key = path.trim_matches('/');
    PageKey::parse(key).map(|page| page.as_str().to_string())
}

impl Deref for ConsoleState {
    type Target = Console<BrowserStorage>;

    fn deref(&self) -> &Self::Target {
        &self.console
    }
}

pub enum ConsoleAction {
    BeginLogin,
    LoginSucceeded(String),
    LoginFailed(String),
    Logout,
    SessionExpired,
    Navigate(PageKey),
    /// Location changed underneath the console (back button, typed URL).
    SyncRoute(String),
    ToggleDrawer,
    Notify(NoticeTone, String),
    DismissNotice(u64),
    Report(ApiError),
}

impl Reducible for ConsoleState {
    type Action = ConsoleAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        let console = &mut next.console;
        match action {
            ConsoleAction::BeginLogin => console.begin_login(),
            ConsoleAction::LoginSucceeded(token) => {
                // Blank tokens are reported under the form by the console itself.
                let _ = console.login_succeeded(&token);
            },
            ConsoleAction::LoginFailed(message) => console.login_failed(message),
            ConsoleAction::Logout => console.logout(),
            ConsoleAction::SessionExpired => console.session_expired(),
            ConsoleAction::Navigate(page) => {
                console.navigate(page.as_str());
            },
            ConsoleAction::SyncRoute(key) => {
                if console.sync_route(&key).is_none() {
                    return self;
                }
            },
            ConsoleAction::ToggleDrawer => console.toggle_drawer(),
            ConsoleAction::Notify(tone, text) => console.notify(tone, text),
            ConsoleAction::DismissNotice(id) => {
                if console.notice().map(|notice| notice.id) != Some(id) {
                    return self;
                }
                console.dismiss_notice(id);
            },
            ConsoleAction::Report(err) => {
                // The client already dispatched `SessionExpired` for a 401.
                if err.is_session_expired() {
                    return self;
                }
                console.report(&err);
            },
        }
        Rc::new(next)
    }
}

pub type ConsoleContext = UseReducerHandle<ConsoleState>;

#[derive(Properties, PartialEq)]
pub struct ConsoleProviderProps {
    pub children: Html,
}

#[function_component(ConsoleProvider)]
pub fn console_provider(props: &ConsoleProviderProps) -> Html {
    let state = use_reducer(ConsoleState::default);
    html! {
        <ContextProvider<ConsoleContext> context={state}>
            {props.children.clone()}
        </ContextProvider<ConsoleContext>>
    }
}

/// Console handle from context. Panels are only ever mounted under
/// [`ConsoleProvider`].
#[hook]
pub fn use_console() -> Option<ConsoleContext> {
    use_context::<ConsoleContext>()
}

/// Backend client carrying the current token. A 401 on any call drops the
/// session and returns the console to the login screen.
#[hook]
pub fn use_api() -> ApiClient {
    let ctx = use_context::<ConsoleContext>();
    match ctx {
        Some(ctx) => {
            let token = ctx.token().map(str::to_string);
            let on_expired = Callback::from(move |_| ctx.dispatch(ConsoleAction::SessionExpired));
            ApiClient::new(token, on_expired)
        },
        None => ApiClient::anonymous(),
    }
}
