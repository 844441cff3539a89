use soniy_admin_shared::{models::TelegramSettings, views::telegram_settings};
use yew::prelude::*;
use yew_hooks::prelude::use_timeout;

use super::{placeholder, Loadable};
use crate::{
    config::SETTINGS_RESULT_MS,
    console_context::use_api,
    i18n::current::{common, settings as t},
    utils::input_value,
};

/// Outcome line under the Telegram form.
#[derive(Debug, Clone, PartialEq)]
struct ResultLine {
    ok: bool,
    text: String,
}

#[function_component(SettingsPanel)]
pub fn settings_panel() -> Html {
    let api = use_api();
    let loaded = use_state(|| Loadable::<()>::Loading);
    let form = use_state(TelegramSettings::default);
    let result = use_state(|| None::<ResultLine>);
    let saving = use_state(|| false);

    let hide_result = {
        let result = result.clone();
        use_timeout(move || result.set(None), SETTINGS_RESULT_MS)
    };

    {
        let api = api.clone();
        let form = form.clone();
        let loaded = loaded.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let result = api.fetch_settings().await.map(|entries| {
                    form.set(telegram_settings(&entries));
                });
                loaded.set(Loadable::from_result(result));
            });
            || ()
        });
    }

    let show = {
        let result = result.clone();
        let hide_result = hide_result.clone();
        move |ok: bool, text: String| {
            result.set(Some(ResultLine {
                ok,
                text,
            }));
            hide_result.reset();
        }
    };

    let on_token = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = (*form).clone();
            next.bot_token = input_value(&e);
            form.set(next);
        })
    };
    let on_chat_ids = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = (*form).clone();
            next.chat_ids = input_value(&e);
            form.set(next);
        })
    };

    let on_submit = {
        let api = api.clone();
        let form = form.clone();
        let loaded = loaded.clone();
        let saving = saving.clone();
        let show = show.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            // Saving a form that never loaded would blank the stored settings.
            if !loaded.is_ready() {
                return;
            }
            let api = api.clone();
            let settings = (*form).clone();
            let saving = saving.clone();
            let show = show.clone();
            saving.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match api.save_telegram(&settings).await {
                    Ok(()) => show(true, t::SAVED.to_string()),
                    Err(err) => show(false, err.to_string()),
                }
                saving.set(false);
            });
        })
    };

    let on_test = {
        let show = show.clone();
        Callback::from(move |_: MouseEvent| {
            let api = api.clone();
            let show = show.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api.test_telegram().await {
                    Ok(reply) => show(reply.success, reply.message),
                    Err(err) => show(false, err.to_string()),
                }
            });
        })
    };

    if let Some(pending) = placeholder(&*loaded) {
        return html! {
            <div class="settings-panel card">
                <h3>{ t::TELEGRAM_TITLE }</h3>
                { pending }
            </div>
        };
    }

    html! {
        <div class="settings-panel card">
            <h3>{ t::TELEGRAM_TITLE }</h3>
            <form class="telegram-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="tg-bot-token">{ t::BOT_TOKEN }</label>
                    <input
                        id="tg-bot-token"
                        type="text"
                        value={form.bot_token.clone()}
                        oninput={on_token}
                    />
                </div>
                <div class="form-group">
                    <label for="tg-chat-ids">{ t::CHAT_IDS }</label>
                    <input
                        id="tg-chat-ids"
                        type="text"
                        value={form.chat_ids.clone()}
                        oninput={on_chat_ids}
                    />
                </div>
                <div class="form-actions">
                    <button type="submit" class="btn btn-primary" disabled={*saving}>{ common::SAVE }</button>
                    <button type="button" class="btn" onclick={on_test}>{ t::TEST }</button>
                </div>
            </form>
            if let Some(line) = (*result).clone() {
                <p class={classes!("mt-2", if line.ok { "text-success" } else { "text-danger" })}>
                    { line.text }
                </p>
            }
        </div>
    }
}
