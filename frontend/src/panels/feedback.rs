use soniy_admin_shared::{
    models::{FeedbackItem, FeedbackKind},
    views::{feedback_rows, FeedbackRow},
};
use yew::prelude::*;

use super::{data_table, is_latest, next_request, Loadable, RequestSeq};
use crate::{
    api::ApiClient,
    console_context::use_api,
    i18n::current::feedback as t,
    utils::{format_timestamp, select_value},
};

fn load_feedback(
    api: ApiClient,
    kind: Option<FeedbackKind>,
    rows: UseStateHandle<Loadable<Vec<FeedbackRow>>>,
    seq: RequestSeq,
) {
    let request_id = next_request(&seq);
    rows.set(Loadable::Loading);
    wasm_bindgen_futures::spawn_local(async move {
        let result = api.fetch_feedback(kind).await;
        if !is_latest(&seq, request_id) {
            return;
        }
        rows.set(Loadable::from_result(result.map(|items: Vec<FeedbackItem>| feedback_rows(&items))));
    });
}

#[function_component(FeedbackPanel)]
pub fn feedback_panel() -> Html {
    let api = use_api();
    let rows = use_state(|| Loadable::<Vec<FeedbackRow>>::Loading);
    let seq = use_mut_ref(|| 0_u64);

    {
        let api = api.clone();
        let rows = rows.clone();
        let seq = seq.clone();
        use_effect_with((), move |_| {
            load_feedback(api, None, rows, seq);
            || ()
        });
    }

    let on_filter = {
        let rows = rows.clone();
        Callback::from(move |e: Event| {
            let kind = FeedbackKind::parse(&select_value(&e));
            load_feedback(api.clone(), kind, rows.clone(), seq.clone());
        })
    };

    let table = data_table(&t::COLUMNS, &*rows, |row| {
        html! {
            <tr key={row.index}>
                <td>{ row.index }</td>
                <td>{ row.name.clone() }</td>
                <td>{ row.phone.clone() }</td>
                <td><span class="badge">{ row.kind }</span></td>
                <td class="cell-details">{ row.details.clone() }</td>
                <td>{ row.telegram }</td>
                <td>{ format_timestamp(&row.created_at) }</td>
            </tr>
        }
    });

    html! {
        <div class="feedback-panel">
            <div class="panel-actions">
                <select class="feedback-filter" onchange={on_filter}>
                    <option value="">{ t::FILTER_ALL }</option>
                    <option value={FeedbackKind::Suggestion.as_str()}>{ t::FILTER_SUGGESTION }</option>
                    <option value={FeedbackKind::Bug.as_str()}>{ t::FILTER_BUG }</option>
                </select>
            </div>
            { table }
        </div>
    }
}
