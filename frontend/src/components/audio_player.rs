use std::{cell::RefCell, rc::Rc};

use soniy_admin_shared::format::format_seconds;
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{HtmlAudioElement, HtmlInputElement};
use yew::prelude::*;

use crate::{
    i18n::current::player as t,
    player_context::{PlayerAction, PlayerContext},
    utils::media_url,
};

/// Call `audio.play()`; a rejected promise (autoplay policy) pauses the
/// transport so the toggle shows the real state.
fn try_play(audio: &HtmlAudioElement, ctx: &PlayerContext) {
    if let Ok(promise) = audio.play() {
        let ctx = ctx.clone();
        let cb = Closure::once(move |_: JsValue| ctx.dispatch(PlayerAction::Pause));
        let _ = promise.catch(&cb);
        cb.forget();
    }
}

fn range_value(e: &InputEvent) -> Option<f64> {
    e.target()
        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        .and_then(|input| input.value().parse::<f64>().ok())
}

/// Player bar bound to the single shared `<audio>` element.
#[function_component(AudioPlayer)]
pub fn audio_player() -> Html {
    let ctx = use_context::<PlayerContext>();
    let audio_ref = use_node_ref();

    let ctx = match ctx {
        Some(c) => c,
        None => return html! {},
    };

    // New load: bind source, jump to the start offset, play.
    {
        let audio_ref = audio_ref.clone();
        let ctx = ctx.clone();
        use_effect_with(ctx.load_id(), move |_| {
            if let (Some(audio), Some(src)) = (audio_ref.cast::<HtmlAudioElement>(), ctx.source()) {
                audio.set_src(&media_url(src));
                audio.set_current_time(ctx.start_at());
                try_play(&audio, &ctx);
            }
            || ()
        });
    }

    // Play/pause follows the transport.
    {
        let audio_ref = audio_ref.clone();
        let ctx_for_sync = ctx.clone();
        use_effect_with((ctx.playing(), ctx.visible()), move |(playing, visible)| {
            if let Some(audio) = audio_ref.cast::<HtmlAudioElement>() {
                if *playing && *visible {
                    if audio.paused() {
                        try_play(&audio, &ctx_for_sync);
                    }
                } else {
                    let _ = audio.pause();
                }
            }
            || ()
        });
    }

    {
        let audio_ref = audio_ref.clone();
        use_effect_with(ctx.volume().to_bits(), move |bits| {
            if let Some(audio) = audio_ref.cast::<HtmlAudioElement>() {
                audio.set_volume(f64::from_bits(*bits));
            }
            || ()
        });
    }

    {
        let audio_ref = audio_ref.clone();
        use_effect_with(ctx.rate().to_bits(), move |bits| {
            if let Some(audio) = audio_ref.cast::<HtmlAudioElement>() {
                audio.set_playback_rate(f64::from_bits(*bits));
            }
            || ()
        });
    }

    // Element events feed back into the transport.
    {
        let audio_ref = audio_ref.clone();
        let ctx = ctx.clone();
        use_effect_with((), move |_| {
            let closures: Rc<RefCell<Vec<Closure<dyn FnMut()>>>> = Rc::default();

            if let Some(audio) = audio_ref.cast::<HtmlAudioElement>() {
                let ctx_c = ctx.clone();
                let on_time = Closure::<dyn FnMut()>::new({
                    let audio = audio.clone();
                    move || ctx_c.dispatch(PlayerAction::TimeUpdate(audio.current_time()))
                });
                let _ = audio
                    .add_event_listener_with_callback("timeupdate", on_time.as_ref().unchecked_ref());
                closures.borrow_mut().push(on_time);

                let ctx_c = ctx.clone();
                let on_meta = Closure::<dyn FnMut()>::new({
                    let audio = audio.clone();
                    move || ctx_c.dispatch(PlayerAction::SetDuration(audio.duration()))
                });
                let _ = audio.add_event_listener_with_callback(
                    "loadedmetadata",
                    on_meta.as_ref().unchecked_ref(),
                );
                closures.borrow_mut().push(on_meta);

                let ctx_c = ctx.clone();
                let on_ended = Closure::<dyn FnMut()>::new(move || ctx_c.dispatch(PlayerAction::Ended));
                let _ =
                    audio.add_event_listener_with_callback("ended", on_ended.as_ref().unchecked_ref());
                closures.borrow_mut().push(on_ended);
            }

            move || {
                drop(closures);
            }
        });
    }

    let on_toggle = {
        let ctx = ctx.clone();
        Callback::from(move |_: MouseEvent| ctx.dispatch(PlayerAction::TogglePlay))
    };

    let on_close = {
        let ctx = ctx.clone();
        Callback::from(move |_: MouseEvent| ctx.dispatch(PlayerAction::Close))
    };

    let on_seek = {
        let ctx = ctx.clone();
        let audio_ref = audio_ref.clone();
        Callback::from(move |e: InputEvent| {
            let Some(percent) = range_value(&e) else {
                return;
            };
            let mut probe = (**ctx).clone();
            if let Some(target) = probe.seek_percent(percent) {
                if let Some(audio) = audio_ref.cast::<HtmlAudioElement>() {
                    audio.set_current_time(target);
                }
                ctx.dispatch(PlayerAction::Seek(percent));
            }
        })
    };

    let on_volume = {
        let ctx = ctx.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(percent) = range_value(&e) {
                ctx.dispatch(PlayerAction::SetVolume(percent));
            }
        })
    };

    let title = if ctx.title().is_empty() { t::DEFAULT_TITLE } else { ctx.title() };
    let bar_style = if ctx.visible() { "" } else { "display:none;" };

    html! {
        <div class="audio-player-bar" style={bar_style}>
            <audio ref={audio_ref} preload="metadata" style="display:none;" />
            <button class="btn btn-sm audio-player-toggle" onclick={on_toggle}>
                { if ctx.playing() { t::PAUSE } else { t::PLAY } }
            </button>
            <span class="audio-player-name">{ title }</span>
            <span class="audio-player-time">{ format_seconds(ctx.position()) }</span>
            <input
                type="range"
                class="audio-player-seek"
                min="0"
                max="100"
                step="0.1"
                value={format!("{:.1}", ctx.progress_percent())}
                oninput={on_seek}
            />
            <span class="audio-player-time">{ format_seconds(ctx.duration()) }</span>
            <label class="audio-player-volume" title={t::VOLUME}>
                {"🔊"}
                <input
                    type="range"
                    min="0"
                    max="100"
                    value={format!("{:.0}", ctx.volume() * 100.0)}
                    oninput={on_volume}
                />
            </label>
            <button class="btn btn-sm audio-player-close" onclick={on_close}>{ t::CLOSE }</button>
        </div>
    }
}
