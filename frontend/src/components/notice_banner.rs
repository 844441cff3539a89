use soniy_admin_shared::NoticeTone;
use yew::prelude::*;
use yew_hooks::prelude::use_timeout;

use crate::{
    config::NOTICE_DISMISS_MS,
    console_context::{use_console, ConsoleAction},
    i18n::current::common as t,
};

/// Shows the console's current notice and clears it after a few seconds.
#[function_component(NoticeBanner)]
pub fn notice_banner() -> Html {
    let console = use_console();
    let notice = console.as_ref().and_then(|ctx| ctx.notice().cloned());
    let notice_id = notice.as_ref().map(|n| n.id);

    let dismiss = {
        let console = console.clone();
        Callback::from(move |_: ()| {
            if let (Some(ctx), Some(id)) = (console.as_ref(), notice_id) {
                ctx.dispatch(ConsoleAction::DismissNotice(id));
            }
        })
    };

    let auto_timeout = {
        let dismiss = dismiss.clone();
        use_timeout(move || dismiss.emit(()), NOTICE_DISMISS_MS)
    };

    {
        let auto_timeout = auto_timeout.clone();
        use_effect_with(notice_id, move |id| {
            if id.is_some() {
                auto_timeout.reset();
            } else {
                auto_timeout.cancel();
            }
        });
    }

    let Some(notice) = notice else {
        return Html::default();
    };

    let (tone_class, icon) = match notice.tone {
        NoticeTone::Success => ("notice-success", "✅"),
        NoticeTone::Error => ("notice-error", "⚠️"),
        NoticeTone::Info => ("notice-info", "ℹ️"),
    };
    let role = if notice.tone == NoticeTone::Error { "alert" } else { "status" };
    let close = Callback::from(move |_: MouseEvent| dismiss.emit(()));

    html! {
        <div class={classes!("notice-banner", tone_class)} role={role} aria-live="polite">
            <span class="notice-icon" aria-hidden="true">{ icon }</span>
            <p class="notice-text">{ notice.text.clone() }</p>
            <button type="button" class="notice-close" aria-label={t::CLOSE} onclick={close}>
                {"×"}
            </button>
        </div>
    }
}
