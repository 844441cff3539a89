use gloo_timers::future::TimeoutFuture;
use soniy_admin_shared::{
    models::{NewTextUnit, PageSummary},
    views::StatusBadge as Badge,
    NoticeTone,
};
use yew::prelude::*;

use super::{empty_line, is_latest, next_request, notify, placeholder, report, Loadable, RequestSeq};
use crate::{
    api::ApiClient,
    components::{modal::Modal, status_badge::StatusBadge},
    config::{self, PDF_IMPORT_REFRESH_MS},
    console_context::{use_api, use_console},
    i18n::{
        current::{common, pages as t},
        fill_one,
    },
    utils::{
        input_value, media_url, open_file_picker, open_in_new_tab, prompt, select_value,
        take_selected_file, textarea_value,
    },
};

/// Text unit form of one page; coordinates stay raw until submit.
#[derive(Debug, Clone, PartialEq)]
struct UnitDraft {
    page_id: i64,
    page_number: i64,
    text: String,
    unit_type: String,
    x: String,
    y: String,
    w: String,
    h: String,
}

impl UnitDraft {
    fn new(page: &PageSummary) -> Self {
        Self {
            page_id: page.id,
            page_number: page.page_number,
            text: String::new(),
            unit_type: t::UNIT_TYPES[0].to_string(),
            x: "0".to_string(),
            y: "0".to_string(),
            w: "0".to_string(),
            h: "0".to_string(),
        }
    }

    fn to_unit(&self) -> Option<NewTextUnit> {
        let parse = |raw: &str| raw.trim().parse::<f64>().ok().filter(|v| v.is_finite());
        Some(NewTextUnit {
            text_content: self.text.clone(),
            unit_type: self.unit_type.clone(),
            bbox_x: parse(&self.x)?,
            bbox_y: parse(&self.y)?,
            bbox_w: parse(&self.w)?,
            bbox_h: parse(&self.h)?,
        })
    }
}

fn load_pages(api: ApiClient, pages: UseStateHandle<Loadable<Vec<PageSummary>>>, seq: RequestSeq) {
    let request_id = next_request(&seq);
    wasm_bindgen_futures::spawn_local(async move {
        let result = api.fetch_pages().await;
        if !is_latest(&seq, request_id) {
            return;
        }
        pages.set(Loadable::from_result(result));
    });
}

#[function_component(PagesPanel)]
pub fn pages_panel() -> Html {
    let api = use_api();
    let console = use_console();
    let pages = use_state(|| Loadable::<Vec<PageSummary>>::Loading);
    let draft = use_state(|| None::<UnitDraft>);
    let draft_error = use_state(|| None::<String>);
    let image_input = use_node_ref();
    let pdf_input = use_node_ref();
    let seq = use_mut_ref(|| 0_u64);

    {
        let api = api.clone();
        let pages = pages.clone();
        let seq = seq.clone();
        use_effect_with((), move |_| {
            load_pages(api, pages, seq);
            || ()
        });
    }

    let on_image_picked = {
        let api = api.clone();
        let console = console.clone();
        let pages = pages.clone();
        let seq = seq.clone();
        Callback::from(move |e: Event| {
            let Some(file) = take_selected_file(&e) else {
                return;
            };
            let Some(page_number) = prompt(t::PAGE_NUMBER_PROMPT, "1") else {
                return;
            };
            let api = api.clone();
            let console = console.clone();
            let pages = pages.clone();
            let seq = seq.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api.upload_page_image(&file, &page_number).await {
                    Ok(uploaded) => {
                        notify(
                            &console,
                            NoticeTone::Success,
                            fill_one(t::IMAGE_UPLOADED_TEMPLATE, uploaded.analysis_status.as_str()),
                        );
                        load_pages(api, pages, seq);
                    },
                    Err(err) => report(&console, err),
                }
            });
        })
    };

    let on_pdf_picked = {
        let api = api.clone();
        let console = console.clone();
        let pages = pages.clone();
        let seq = seq.clone();
        Callback::from(move |e: Event| {
            let Some(file) = take_selected_file(&e) else {
                return;
            };
            let api = api.clone();
            let console = console.clone();
            let pages = pages.clone();
            let seq = seq.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api.import_pdf(&file).await {
                    Ok(task) => {
                        notify(&console, NoticeTone::Info, fill_one(t::IMPORT_STARTED_TEMPLATE, task.task_id));
                        // Import runs server-side; look again after a fixed wait.
                        TimeoutFuture::new(PDF_IMPORT_REFRESH_MS).await;
                        load_pages(api, pages, seq);
                    },
                    Err(err) => report(&console, err),
                }
            });
        })
    };

    let pick_image = {
        let image_input = image_input.clone();
        Callback::from(move |_: MouseEvent| open_file_picker(&image_input))
    };
    let pick_pdf = {
        let pdf_input = pdf_input.clone();
        Callback::from(move |_: MouseEvent| open_file_picker(&pdf_input))
    };

    let close_draft = {
        let draft = draft.clone();
        let draft_error = draft_error.clone();
        Callback::from(move |_| {
            draft.set(None);
            draft_error.set(None);
        })
    };

    let submit_draft = {
        let draft = draft.clone();
        let draft_error = draft_error.clone();
        let api = api.clone();
        let console = console.clone();
        let pages = pages.clone();
        let seq = seq.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(current) = (*draft).clone() else {
                return;
            };
            let Some(unit) = current.to_unit() else {
                draft_error.set(Some(t::INVALID_NUMBER.to_string()));
                return;
            };
            let api = api.clone();
            let console = console.clone();
            let pages = pages.clone();
            let seq = seq.clone();
            let draft = draft.clone();
            let draft_error = draft_error.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api.create_text_unit(current.page_id, &unit).await {
                    Ok(()) => {
                        draft.set(None);
                        draft_error.set(None);
                        notify(&console, NoticeTone::Success, t::UNIT_CREATED.to_string());
                        load_pages(api, pages, seq);
                    },
                    Err(err) => draft_error.set(Some(err.to_string())),
                }
            });
        })
    };

    let grid = match &*pages {
        Loadable::Ready(list) if list.is_empty() => empty_line(t::EMPTY),
        Loadable::Ready(list) => html! {
            <div class="pages-grid">
                { for list.iter().map(|page| render_thumb(page, &draft, &draft_error)) }
            </div>
        },
        other => placeholder(other).unwrap_or_default(),
    };

    html! {
        <div class="pages-panel">
            <div class="panel-actions">
                <button type="button" class="btn" onclick={pick_image}>{ t::UPLOAD_IMAGE }</button>
                <button type="button" class="btn btn-primary" onclick={pick_pdf}>{ t::IMPORT_PDF }</button>
                <input ref={image_input} type="file" accept="image/*" hidden=true onchange={on_image_picked} />
                <input ref={pdf_input} type="file" accept=".pdf" hidden=true onchange={on_pdf_picked} />
            </div>
            { grid }
            if let Some(current) = (*draft).clone() {
                { render_draft(&current, &draft, (*draft_error).clone(), close_draft, submit_draft) }
            }
        </div>
    }
}

fn render_thumb(
    page: &PageSummary,
    draft: &UseStateHandle<Option<UnitDraft>>,
    draft_error: &UseStateHandle<Option<String>>,
) -> Html {
    let page_id = page.id;
    let open_editor = Callback::from(move |_: MouseEvent| {
        open_in_new_tab(&config::page_editor_url(page_id));
    });
    let open_draft = {
        let draft = draft.clone();
        let draft_error = draft_error.clone();
        let fresh = UnitDraft::new(page);
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            draft_error.set(None);
            draft.set(Some(fresh.clone()));
        })
    };
    let label = fill_one(t::PAGE_LABEL_TEMPLATE, page.page_number);
    let thumb = match page.thumbnail_url() {
        Some(url) => html! { <img src={media_url(url)} alt={label.clone()} loading="lazy" /> },
        None => html! { <div class="page-thumb-empty">{ page.page_number }</div> },
    };

    html! {
        <div class="page-thumb" key={page.id} onclick={open_editor} title={t::OPEN_EDITOR}>
            { thumb }
            <div class="page-thumb-info">
                <span class="page-num">{ label }</span>
                <span class="page-status">
                    <StatusBadge badge={Badge::page(page.analysis_status)} />
                    {" · "}
                    { fill_one(t::UNIT_COUNT_TEMPLATE, page.unit_count.unwrap_or(0)) }
                </span>
                <button type="button" class="btn btn-sm" onclick={open_draft}>{ t::ADD_UNIT }</button>
            </div>
        </div>
    }
}

fn render_draft(
    current: &UnitDraft,
    draft: &UseStateHandle<Option<UnitDraft>>,
    error: Option<String>,
    on_close: Callback<()>,
    on_submit: Callback<MouseEvent>,
) -> Html {
    let edit = |apply: fn(&mut UnitDraft, String), read: fn(&Event) -> String| {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            if let Some(mut next) = (*draft).clone() {
                apply(&mut next, read(&e));
                draft.set(Some(next));
            }
        })
    };
    let cancel = {
        let on_close = on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let footer = html! {
        <>
            <button type="button" class="btn" onclick={cancel}>{ common::CANCEL }</button>
            <button type="button" class="btn btn-primary" onclick={on_submit}>{ common::SAVE }</button>
        </>
    };

    html! {
        <Modal
            title={fill_one(t::UNIT_MODAL_TITLE_TEMPLATE, current.page_number)}
            on_close={on_close}
            footer={footer}
        >
            <div class="form-group">
                <label>{ t::UNIT_TEXT }</label>
                <textarea
                    value={current.text.clone()}
                    onchange={edit(|d, v| d.text = v, textarea_value)}
                />
            </div>
            <div class="form-group">
                <label>{ t::UNIT_TYPE }</label>
                <select onchange={edit(|d, v| d.unit_type = v, select_value)}>
                    { for t::UNIT_TYPES.iter().map(|kind| html! {
                        <option value={*kind} selected={current.unit_type == *kind}>{ *kind }</option>
                    }) }
                </select>
            </div>
            <div class="form-row">
                <label>{ t::BBOX_X }
                    <input type="number" value={current.x.clone()} onchange={edit(|d, v| d.x = v, input_value)} />
                </label>
                <label>{ t::BBOX_Y }
                    <input type="number" value={current.y.clone()} onchange={edit(|d, v| d.y = v, input_value)} />
                </label>
                <label>{ t::BBOX_W }
                    <input type="number" value={current.w.clone()} onchange={edit(|d, v| d.w = v, input_value)} />
                </label>
                <label>{ t::BBOX_H }
                    <input type="number" value={current.h.clone()} onchange={edit(|d, v| d.h = v, input_value)} />
                </label>
            </div>
            if let Some(message) = error {
                <p class="panel-error" role="alert">{ message }</p>
            }
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use soniy_admin_shared::models::PageStatus;

    use super::*;

    fn page() -> PageSummary {
        PageSummary {
            id: 12,
            page_number: 3,
            image_url: None,
            source_image_url: None,
            analysis_status: PageStatus::Draft,
            unit_count: Some(2),
        }
    }

    #[test]
    fn draft_parses_coordinates() {
        let mut draft = UnitDraft::new(&page());
        draft.text = "Alif".to_string();
        draft.x = " 10.5 ".to_string();
        draft.w = "40".to_string();

        let unit = draft.to_unit().expect("valid draft");
        assert_eq!(unit.text_content, "Alif");
        assert_eq!(unit.unit_type, "word");
        assert_eq!(unit.bbox_x, 10.5);
        assert_eq!(unit.bbox_w, 40.0);
        assert_eq!(draft.page_id, 12);
    }

    #[test]
    fn draft_rejects_non_numbers() {
        let mut draft = UnitDraft::new(&page());
        draft.h = "abc".to_string();
        assert!(draft.to_unit().is_none());

        draft.h = "NaN".to_string();
        assert!(draft.to_unit().is_none());
    }
}
