use soniy_admin_shared::{models::Manifest, views::DashboardStats, NoticeTone};
use yew::prelude::*;

use super::{is_latest, next_request, notify, placeholder, report, Loadable, RequestSeq};
use crate::{
    api::ApiClient,
    components::{modal::ConfirmDialog, stats_card::StatsCard},
    console_context::{use_api, use_console},
    i18n::{current::dashboard as t, fill_two},
};

fn load_manifest(
    api: ApiClient,
    manifest: UseStateHandle<Loadable<Manifest>>,
    seq: RequestSeq,
) {
    let request_id = next_request(&seq);
    wasm_bindgen_futures::spawn_local(async move {
        let result = api.fetch_manifest().await;
        if !is_latest(&seq, request_id) {
            return;
        }
        manifest.set(Loadable::from_result(result));
    });
}

#[function_component(DashboardPanel)]
pub fn dashboard_panel() -> Html {
    let api = use_api();
    let console = use_console();
    let manifest = use_state(|| Loadable::<Manifest>::Loading);
    let confirm_open = use_state(|| false);
    let publishing = use_state(|| false);
    let seq = use_mut_ref(|| 0_u64);

    {
        let api = api.clone();
        let manifest = manifest.clone();
        let seq = seq.clone();
        use_effect_with((), move |_| {
            load_manifest(api, manifest, seq);
            || ()
        });
    }

    let open_confirm = {
        let confirm_open = confirm_open.clone();
        Callback::from(move |_: MouseEvent| confirm_open.set(true))
    };
    let cancel = {
        let confirm_open = confirm_open.clone();
        Callback::from(move |_| confirm_open.set(false))
    };
    let publish = {
        let confirm_open = confirm_open.clone();
        let publishing = publishing.clone();
        let manifest = manifest.clone();
        let seq = seq.clone();
        Callback::from(move |_| {
            confirm_open.set(false);
            publishing.set(true);
            let api = api.clone();
            let console = console.clone();
            let publishing = publishing.clone();
            let manifest = manifest.clone();
            let seq = seq.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = api.publish_book().await;
                publishing.set(false);
                match result {
                    Ok(published) => {
                        notify(
                            &console,
                            NoticeTone::Success,
                            fill_two(t::PUBLISHED_TEMPLATE, published.message, published.version),
                        );
                        load_manifest(api, manifest, seq);
                    },
                    Err(err) => report(&console, err),
                }
            });
        })
    };

    let body = match &*manifest {
        Loadable::Ready(manifest) => {
            let stats = DashboardStats::from(manifest);
            html! {
                <div class="stats-grid">
                    <StatsCard icon="📄" value={stats.pages.to_string()} label={t::PAGES} />
                    <StatsCard icon="🔤" value={stats.units.to_string()} label={t::UNITS} />
                    <StatsCard icon="🎵" value={stats.segments.to_string()} label={t::SEGMENTS} />
                    <StatsCard icon="📦" value={stats.version} label={t::VERSION} />
                </div>
            }
        },
        other => placeholder(other).unwrap_or_default(),
    };

    html! {
        <div class="dashboard-panel">
            { body }
            <div class="panel-actions">
                <button
                    type="button"
                    class="btn btn-primary"
                    disabled={*publishing}
                    onclick={open_confirm}
                >
                    { t::PUBLISH }
                </button>
            </div>
            if *confirm_open {
                <ConfirmDialog message={t::PUBLISH_CONFIRM} on_confirm={publish} on_cancel={cancel} />
            }
        </div>
    }
}
