use soniy_admin_shared::views::{audit_rows, AuditRow};
use yew::prelude::*;

use super::{data_table, Loadable};
use crate::{console_context::use_api, i18n::current::audit as t, utils::format_timestamp};

#[function_component(AuditPanel)]
pub fn audit_panel() -> Html {
    let api = use_api();
    let rows = use_state(|| Loadable::<Vec<AuditRow>>::Loading);

    {
        let rows = rows.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let result = api.fetch_audit_log().await;
                rows.set(Loadable::from_result(result.map(|entries| audit_rows(&entries))));
            });
            || ()
        });
    }

    let table = data_table(&t::COLUMNS, &*rows, |row| {
        html! {
            <tr key={row.index}>
                <td>{ row.index }</td>
                <td>{ row.action.clone() }</td>
                <td>{ row.entity_type.clone() }</td>
                <td>{ row.entity_id.clone() }</td>
                <td class="cell-details">{ row.details.clone() }</td>
                <td>{ format_timestamp(&row.created_at) }</td>
            </tr>
        }
    });

    html! { <div class="audit-panel">{ table }</div> }
}
