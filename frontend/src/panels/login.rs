use soniy_admin_shared::ApiError;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    api::ApiClient,
    console_context::{use_console, ConsoleAction},
    i18n::current::{common, login as t},
    router::Route,
    utils::input_value,
};

#[function_component(LoginPanel)]
pub fn login_panel() -> Html {
    let console = use_console();
    let navigator = use_navigator();
    let username = use_state(String::new);
    let password = use_state(String::new);

    let Some(ctx) = console else {
        return Html::default();
    };

    let on_username = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| username.set(input_value(&e)))
    };
    let on_password = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| password.set(input_value(&e)))
    };

    let on_submit = {
        let ctx = ctx.clone();
        let username = username.clone();
        let password = password.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if ctx.login_pending() {
                return;
            }
            ctx.dispatch(ConsoleAction::BeginLogin);
            let ctx = ctx.clone();
            let navigator = navigator.clone();
            let user = (*username).clone();
            let pass = (*password).clone();
            wasm_bindgen_futures::spawn_local(async move {
                match ApiClient::anonymous().login(&user, &pass).await {
                    Ok(resp) => {
                        ctx.dispatch(ConsoleAction::LoginSucceeded(resp.access_token));
                        if let Some(nav) = navigator.as_ref() {
                            nav.push(&Route::Home);
                        }
                    },
                    // The login endpoint answers 401 for wrong credentials.
                    Err(ApiError::SessionExpired) => {
                        ctx.dispatch(ConsoleAction::LoginFailed(t::BAD_CREDENTIALS.to_string()));
                    },
                    Err(err) => ctx.dispatch(ConsoleAction::LoginFailed(err.to_string())),
                }
            });
        })
    };

    let pending = ctx.login_pending();

    html! {
        <div class="login-screen">
            <form class="login-card" onsubmit={on_submit}>
                <h1>{ common::APP_NAME }</h1>
                <p class="login-subtitle">{ t::TITLE }</p>
                <label for="login-username">{ t::USERNAME }</label>
                <input
                    id="login-username"
                    type="text"
                    autocomplete="username"
                    value={(*username).clone()}
                    oninput={on_username}
                    required=true
                />
                <label for="login-password">{ t::PASSWORD }</label>
                <input
                    id="login-password"
                    type="password"
                    autocomplete="current-password"
                    value={(*password).clone()}
                    oninput={on_password}
                    required=true
                />
                if let Some(message) = ctx.login_error() {
                    <p class="login-error" role="alert">{ message.to_string() }</p>
                }
                <button type="submit" class="btn btn-primary" disabled={pending}>
                    { if pending { t::SUBMITTING } else { t::SUBMIT } }
                </button>
            </form>
        </div>
    }
}
