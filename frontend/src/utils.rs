use js_sys::Date;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{File, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::config;

/// Resolve a media path returned by the backend. Relative paths are served
/// by the backend origin, which differs from ours during local development.
pub fn media_url(path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("data:") {
        return path.to_string();
    }
    let base = config::api_base();
    let origin = base.find("/api").map_or(base.as_str(), |idx| &base[..idx]);
    if path.starts_with('/') {
        format!("{origin}{path}")
    } else {
        format!("{origin}/{path}")
    }
}

/// Localized timestamp; unparseable input is shown as-is.
pub fn format_timestamp(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    let date = Date::new(&JsValue::from_str(raw));
    if date.get_time().is_nan() {
        return raw.to_string();
    }
    String::from(date.to_locale_string("uz", &JsValue::UNDEFINED))
}

pub fn input_value(event: &Event) -> String {
    event
        .target_dyn_into::<HtmlInputElement>()
        .map(|input| input.value())
        .unwrap_or_default()
}

pub fn textarea_value(event: &Event) -> String {
    event
        .target_dyn_into::<HtmlTextAreaElement>()
        .map(|input| input.value())
        .unwrap_or_default()
}

pub fn select_value(event: &Event) -> String {
    event
        .target_dyn_into::<HtmlSelectElement>()
        .map(|select| select.value())
        .unwrap_or_default()
}

/// First picked file of a file input. The input is cleared so picking the
/// same file again fires another change event.
pub fn take_selected_file(event: &Event) -> Option<File> {
    let input = event.target_dyn_into::<HtmlInputElement>()?;
    let file = input.files().and_then(|files| files.get(0));
    input.set_value("");
    file
}

/// Open the file picker behind a hidden input.
pub fn open_file_picker(input: &NodeRef) {
    if let Some(input) = input.cast::<HtmlInputElement>() {
        input.click();
    }
}

pub fn prompt(message: &str, default: &str) -> Option<String> {
    web_sys::window()
        .and_then(|window| window.prompt_with_message_and_default(message, default).ok().flatten())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn open_in_new_tab(url: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.open_with_url_and_target(url, "_blank");
    }
}

pub fn log_error(context: &str, err: &impl std::fmt::Display) {
    web_sys::console::error_1(&format!("{context}: {err}").into());
}

/// `JsValue` errors from DOM calls carry no useful `Display`.
pub fn describe_js_error(err: &JsValue) -> String {
    err.dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| "unknown error".to_string())
}
