// One module per sidebar panel, plus the login screen and the shell.

pub mod audio;
pub mod audit;
pub mod book;
pub mod dashboard;
pub mod feedback;
pub mod login;
pub mod pages;
pub mod settings;
pub mod shell;
pub mod waveform;

use std::{cell::RefCell, rc::Rc};

use soniy_admin_shared::{ApiError, NoticeTone};
use yew::prelude::*;

use crate::{
    components::loading_spinner::LoadingSpinner,
    console_context::{ConsoleAction, ConsoleContext},
    i18n::current::common,
};

/// Result of a panel's initial fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Loadable::Ready(value),
            Err(err) => Loadable::Failed(err.to_string()),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Loadable::Ready(_))
    }
}

/// Last-issued-wins counter for one panel's loads.
pub type RequestSeq = Rc<RefCell<u64>>;

/// Issue the next request id; only the newest one may land.
pub fn next_request(seq: &RequestSeq) -> u64 {
    let mut current = seq.borrow_mut();
    *current += 1;
    *current
}

pub fn is_latest(seq: &RequestSeq, request_id: u64) -> bool {
    *seq.borrow() == request_id
}

/// Spinner or inline error for the non-ready states; `None` once loaded.
pub fn placeholder<T>(state: &Loadable<T>) -> Option<Html> {
    match state {
        Loadable::Loading => Some(html! { <LoadingSpinner /> }),
        Loadable::Failed(message) => Some(error_line(message)),
        Loadable::Ready(_) => None,
    }
}

/// Error messages already read as sentences ("Xatolik: 500" included).
fn inline_error(message: &str) -> String {
    let message = message.trim();
    if message.is_empty() {
        common::ERROR.to_string()
    } else {
        message.to_string()
    }
}

pub fn error_line(message: &str) -> Html {
    html! {
        <p class="panel-error" role="alert">{ inline_error(message) }</p>
    }
}

pub fn empty_line(text: &str) -> Html {
    html! { <p class="panel-empty">{ text.to_string() }</p> }
}

pub fn notify(console: &Option<ConsoleContext>, tone: NoticeTone, text: String) {
    if let Some(ctx) = console.as_ref() {
        ctx.dispatch(ConsoleAction::Notify(tone, text));
    }
}

/// Failed action call; a 401 has already been handled by the client.
pub fn report(console: &Option<ConsoleContext>, err: ApiError) {
    if let Some(ctx) = console.as_ref() {
        ctx.dispatch(ConsoleAction::Report(err));
    }
}

/// Table with a fixed header. Loading, failure and an empty result each take
/// a single full-width row.
pub fn data_table<T>(columns: &[&str], state: &Loadable<Vec<T>>, row: impl Fn(&T) -> Html) -> Html {
    let span = columns.len().to_string();
    let body = match state {
        Loadable::Loading => html! {
            <tr><td colspan={span} class="text-muted">{ common::LOADING }</td></tr>
        },
        Loadable::Failed(message) => html! {
            <tr><td colspan={span} class="text-danger">{ message.clone() }</td></tr>
        },
        Loadable::Ready(items) if items.is_empty() => html! {
            <tr><td colspan={span} class="text-muted">{ common::NO_DATA }</td></tr>
        },
        Loadable::Ready(items) => html! { { for items.iter().map(row) } },
    };
    html! {
        <div class="table-wrapper">
            <table class="data-table">
                <thead>
                    <tr>{ for columns.iter().map(|title| html! { <th>{ *title }</th> }) }</tr>
                </thead>
                <tbody>{ body }</tbody>
            </table>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_fallback_is_not_prefixed_twice() {
        let err = soniy_admin_shared::api::interpret(500, "").expect_err("500 must fail");
        assert_eq!(inline_error(&err.to_string()), "Xatolik: 500");
        assert_eq!(inline_error("Sahifa topilmadi"), "Sahifa topilmadi");
        assert_eq!(inline_error("  "), common::ERROR);
    }

    #[test]
    fn only_newest_request_is_latest() {
        let seq = RequestSeq::default();
        let first = next_request(&seq);
        let second = next_request(&seq);

        assert!(!is_latest(&seq, first));
        assert!(is_latest(&seq, second));
    }

    #[test]
    fn only_ready_loads_count_as_ready() {
        assert!(Loadable::Ready(()).is_ready());
        assert!(!Loadable::<()>::Loading.is_ready());
        assert!(!Loadable::<()>::Failed("Xatolik: 500".to_string()).is_ready());
    }
}
