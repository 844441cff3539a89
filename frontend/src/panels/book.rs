use soniy_admin_shared::{
    models::Book,
    views::{chapter_rows, BookSummary},
};
use yew::prelude::*;

use super::{empty_line, is_latest, next_request, placeholder, report, Loadable, RequestSeq};
use crate::{
    api::ApiClient,
    components::modal::ConfirmDialog,
    console_context::{use_api, use_console},
    i18n::current::{audio, book as t},
};

fn load_book(api: ApiClient, book: UseStateHandle<Loadable<Book>>, seq: RequestSeq) {
    let request_id = next_request(&seq);
    wasm_bindgen_futures::spawn_local(async move {
        let result = api.fetch_book().await;
        if !is_latest(&seq, request_id) {
            return;
        }
        book.set(Loadable::from_result(result));
    });
}

#[function_component(BookPanel)]
pub fn book_panel() -> Html {
    let api = use_api();
    let console = use_console();
    let book = use_state(|| Loadable::<Book>::Loading);
    let pending_delete = use_state(|| None::<i64>);
    let seq = use_mut_ref(|| 0_u64);

    {
        let api = api.clone();
        let book = book.clone();
        let seq = seq.clone();
        use_effect_with((), move |_| {
            load_book(api, book, seq);
            || ()
        });
    }

    let cancel = {
        let pending_delete = pending_delete.clone();
        Callback::from(move |_| pending_delete.set(None))
    };
    let confirm = {
        let pending_delete = pending_delete.clone();
        let book = book.clone();
        let api = api.clone();
        Callback::from(move |_| {
            let Some(chapter_id) = *pending_delete else {
                return;
            };
            pending_delete.set(None);
            let api = api.clone();
            let book = book.clone();
            let console = console.clone();
            let seq = seq.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api.delete_chapter(chapter_id).await {
                    Ok(()) => load_book(api, book, seq),
                    Err(err) => report(&console, err),
                }
            });
        })
    };

    let Loadable::Ready(data) = &*book else {
        return placeholder(&*book).unwrap_or_default();
    };

    let summary = BookSummary::from(data);
    let rows = chapter_rows(&data.chapters);
    let chapters = if rows.is_empty() {
        empty_line(t::NO_CHAPTERS)
    } else {
        html! {
            <ul class="chapter-list">
                { for rows.into_iter().map(|row| {
                    let on_delete = {
                        let pending_delete = pending_delete.clone();
                        let id = row.id;
                        Callback::from(move |_: MouseEvent| pending_delete.set(Some(id)))
                    };
                    html! {
                        <li class="chapter-item" key={row.id}>
                            <span class="chapter-number">{ row.number }</span>
                            <div class="chapter-info">
                                <strong>{ row.title }</strong>
                                <small>{ row.pages }</small>
                            </div>
                            <button type="button" class="btn btn-sm btn-danger" onclick={on_delete}>
                                { audio::DELETE }
                            </button>
                        </li>
                    }
                }) }
            </ul>
        }
    };

    html! {
        <div class="book-panel">
            <div class="card book-info">
                <p><b>{ t::NAME }</b>{" "}{ summary.title }</p>
                <p><b>{ t::AUTHOR }</b>{" "}{ summary.author }</p>
                <p><b>{ t::TOTAL_PAGES }</b>{" "}{ summary.total_pages }</p>
                <p><b>{ t::VERSION }</b>{" "}{ summary.version }</p>
                <p><b>{ t::STATE }</b>{" "}{ summary.state }</p>
            </div>
            <div class="card">
                <h3>{ t::CHAPTERS }</h3>
                { chapters }
            </div>
            if pending_delete.is_some() {
                <ConfirmDialog
                    message={t::DELETE_CHAPTER_CONFIRM}
                    on_confirm={confirm}
                    on_cancel={cancel}
                    danger=true
                />
            }
        </div>
    }
}
