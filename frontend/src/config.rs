//! Build-time and runtime configuration of the console.

// SONIY_API_BASE overrides at compile time; otherwise derived from the current host
const API_BASE_OVERRIDE: Option<&str> = option_env!("SONIY_API_BASE");

/// Backend used when the console is served from a developer machine.
const LOCAL_API_BASE: &str = "http://localhost:8000/api/v1";
/// Same-origin backend used everywhere else.
const DEPLOYED_API_BASE: &str = "/api/v1";

/// `localStorage` key of the bearer token. The only persisted field.
pub const TOKEN_KEY: &str = "admin_token";

/// Wait after a PDF import upload before the page grid is refreshed.
pub const PDF_IMPORT_REFRESH_MS: u32 = 3000;
/// How long a successful audio action bar stays before the list reloads.
pub const ACTION_SUCCESS_LINGER_MS: u32 = 2000;
/// How long the Telegram save/test result line stays visible.
pub const SETTINGS_RESULT_MS: u32 = 5000;
/// Auto-dismiss delay of action notices.
pub const NOTICE_DISMISS_MS: u32 = 4000;
/// Interval between cosmetic progress stages.
pub const PROGRESS_STAGE_MS: u32 = 600;

/// Book every upload is attached to.
pub const DEFAULT_BOOK_ID: i64 = 1;

/// External page annotator; opened in a new tab from the page grid.
pub const PAGE_EDITOR_PATH: &str = "page-editor.html";

/// Base URL of the backend API, without a trailing slash.
pub fn api_base() -> String {
    if let Some(base) = API_BASE_OVERRIDE {
        return base.trim_end_matches('/').to_string();
    }
    let hostname = web_sys::window()
        .and_then(|window| window.location().hostname().ok())
        .unwrap_or_default();
    if hostname == "localhost" || hostname == "127.0.0.1" {
        LOCAL_API_BASE.to_string()
    } else {
        DEPLOYED_API_BASE.to_string()
    }
}

/// Full URL of an API path.
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Link to the page annotator for one page.
pub fn page_editor_url(page_id: i64) -> String {
    format!("{PAGE_EDITOR_PATH}#page-{page_id}")
}
