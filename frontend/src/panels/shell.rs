use soniy_admin_shared::{PageKey, Screen};
use yew::prelude::*;
use yew_router::prelude::*;

use super::{audio, audit, book, dashboard, feedback, login, pages, settings, waveform};
use crate::{
    components::{audio_player::AudioPlayer, notice_banner::NoticeBanner, sidebar::Sidebar},
    console_context::{use_console, ConsoleAction},
    i18n::current::shell as t,
    router::Route,
};

/// Login screen or the console, following the session.
#[function_component(Root)]
pub fn root() -> Html {
    let console = use_console();
    let route = use_route::<Route>();

    // Back/forward and typed URLs.
    {
        let console = console.clone();
        use_effect_with(route.clone(), move |route| {
            if let (Some(ctx), Some(page)) =
                (console.as_ref(), route.as_ref().and_then(Route::page_key))
            {
                ctx.dispatch(ConsoleAction::SyncRoute(page.as_str().to_string()));
            }
            || ()
        });
    }

    let Some(ctx) = console else {
        return Html::default();
    };

    match ctx.screen() {
        Screen::Login => html! {
            <>
                <NoticeBanner />
                <login::LoginPanel />
            </>
        },
        Screen::Console => html! { <ConsoleLayout /> },
    }
}

#[function_component(ConsoleLayout)]
fn console_layout() -> Html {
    let Some(ctx) = use_console() else {
        return Html::default();
    };
    let ticket = ctx.router().current_ticket();

    let on_toggle = {
        let ctx = ctx.clone();
        Callback::from(move |_: MouseEvent| ctx.dispatch(ConsoleAction::ToggleDrawer))
    };

    // Keyed on the ticket: every navigation mounts a fresh panel, which
    // fetches once on mount.
    let panel = match ticket.page {
        PageKey::Dashboard => html! { <dashboard::DashboardPanel key={ticket.seq} /> },
        PageKey::Book => html! { <book::BookPanel key={ticket.seq} /> },
        PageKey::Pages => html! { <pages::PagesPanel key={ticket.seq} /> },
        PageKey::Audio => html! { <audio::AudioPanel key={ticket.seq} /> },
        PageKey::Waveform => html! { <waveform::WaveformPanel key={ticket.seq} /> },
        PageKey::Feedback => html! { <feedback::FeedbackPanel key={ticket.seq} /> },
        PageKey::Settings => html! { <settings::SettingsPanel key={ticket.seq} /> },
        PageKey::Audit => html! { <audit::AuditPanel key={ticket.seq} /> },
    };

    html! {
        <div class="admin-layout">
            <Sidebar />
            <main class="main-content">
                <header class="top-bar">
                    <button
                        type="button"
                        class="menu-toggle"
                        aria-label={t::TOGGLE_MENU}
                        onclick={on_toggle}
                    >
                        {"☰"}
                    </button>
                    <h1 class="page-title">{ ctx.router().title() }</h1>
                </header>
                <NoticeBanner />
                <section id={format!("page-{}", ticket.page.as_str())} class="page active">
                    { panel }
                </section>
            </main>
            <AudioPlayer />
        </div>
    }
}
