use soniy_admin_shared::PageKey;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    console_context::{use_console, ConsoleAction},
    i18n::current::{common, nav, shell},
    router::Route,
};

fn icon(page: PageKey) -> &'static str {
    match page {
        PageKey::Dashboard => nav::DASHBOARD_ICON,
        PageKey::Book => nav::BOOK_ICON,
        PageKey::Pages => nav::PAGES_ICON,
        PageKey::Audio => nav::AUDIO_ICON,
        PageKey::Waveform => nav::WAVEFORM_ICON,
        PageKey::Feedback => nav::FEEDBACK_ICON,
        PageKey::Settings => nav::SETTINGS_ICON,
        PageKey::Audit => nav::AUDIT_ICON,
    }
}

#[function_component(Sidebar)]
pub fn sidebar() -> Html {
    let console = use_console();
    let navigator = use_navigator();
    let route = use_route::<Route>();

    let Some(ctx) = console else {
        return Html::default();
    };

    let items = PageKey::ALL.into_iter().map(|page| {
        let onclick = {
            let ctx = ctx.clone();
            let navigator = navigator.clone();
            let route = route.clone();
            Callback::from(move |e: MouseEvent| {
                e.prevent_default();
                // The URL follows; the route effect then sees the page already active.
                ctx.dispatch(ConsoleAction::Navigate(page));
                let target = Route::for_page(page);
                if route.as_ref() != Some(&target) {
                    if let Some(nav) = navigator.as_ref() {
                        nav.push(&target);
                    }
                }
            })
        };
        let class = classes!("nav-item", ctx.router().is_active(page).then_some("active"));
        html! {
            <a href="#" class={class} data-page={page.as_str()} onclick={onclick}>
                <span class="nav-icon" aria-hidden="true">{ icon(page) }</span>
                <span class="nav-label">{ page.title() }</span>
            </a>
        }
    });

    let on_logout = {
        let ctx = ctx.clone();
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            ctx.dispatch(ConsoleAction::Logout);
            if let Some(nav) = navigator.as_ref() {
                nav.push(&Route::Home);
            }
        })
    };

    let sidebar_class = classes!("sidebar", ctx.router().drawer_open().then_some("open"));

    html! {
        <aside class={sidebar_class}>
            <div class="sidebar-brand">{ common::APP_NAME }</div>
            <nav class="sidebar-nav">
                { for items }
            </nav>
            <button type="button" class="btn sidebar-logout" onclick={on_logout}>
                { shell::LOGOUT }
            </button>
        </aside>
    }
}
