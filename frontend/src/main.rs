//! Soniy admin console: a Yew single-page app over the book/audio backend.
//!
//! State machines live in `soniy-admin-shared`; this crate owns the browser
//! side (HTTP transport, `localStorage`, the `<audio>` element, the waveform
//! canvas) and the component tree.

mod api;
mod components;
mod config;
mod console_context;
mod i18n;
mod panels;
mod player_context;
mod router;
mod storage;
mod utils;

use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {
    html! {
        <>
            <router::AppRouter />
        </>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
