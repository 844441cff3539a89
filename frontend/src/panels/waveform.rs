use soniy_admin_shared::{
    format::format_ms,
    models::{AudioFile, Segment},
    player::{MAX_RATE, MIN_RATE},
    waveform::{WaveformBuffer, Zoom},
};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::{error_line, is_latest, next_request, placeholder, report, Loadable};
use crate::{
    components::waveform_canvas::WaveformCanvas,
    console_context::{use_api, use_console},
    i18n::{
        current::{audio, waveform as t},
        fill_one, fill_two,
    },
    player_context::{PlayerAction, PlayerContext},
    utils::select_value,
};

#[function_component(WaveformPanel)]
pub fn waveform_panel() -> Html {
    let api = use_api();
    let console = use_console();
    let player = use_context::<PlayerContext>();
    let files = use_state(|| Loadable::<Vec<AudioFile>>::Loading);
    let buffer = use_state(WaveformBuffer::default);
    let zoom = use_state(Zoom::default);
    let segments = use_state(|| None::<Loadable<Vec<Segment>>>);
    let segment_seq = use_mut_ref(|| 0_u64);

    {
        let api = api.clone();
        let files = files.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                files.set(Loadable::from_result(api.fetch_audio_files().await));
            });
            || ()
        });
    }

    let on_select = {
        let api = api.clone();
        let files = files.clone();
        let buffer = buffer.clone();
        let segments = segments.clone();
        let segment_seq = segment_seq.clone();
        Callback::from(move |e: Event| {
            let Loadable::Ready(list) = &*files else {
                return;
            };
            let requested = select_value(&e).parse::<i64>().ok();
            let mut next = (*buffer).clone();
            let selected = next.select(list, requested);
            buffer.set(next);

            let request_id = next_request(&segment_seq);
            let Some(asset_id) = selected else {
                segments.set(None);
                return;
            };
            segments.set(Some(Loadable::Loading));
            let api = api.clone();
            let segments = segments.clone();
            let segment_seq = segment_seq.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = api.fetch_segments(asset_id).await;
                if !is_latest(&segment_seq, request_id) {
                    return;
                }
                segments.set(Some(Loadable::from_result(result.map(|mut list| {
                    list.sort_by_key(|segment| segment.segment_index);
                    list
                }))));
            });
        })
    };

    let on_zoom_in = {
        let zoom = zoom.clone();
        Callback::from(move |_: MouseEvent| zoom.set(zoom.zoom_in()))
    };
    let on_zoom_out = {
        let zoom = zoom.clone();
        Callback::from(move |_: MouseEvent| zoom.set(zoom.zoom_out()))
    };

    let rate = player.as_ref().map_or(1.0, |p| p.rate());
    let on_speed = {
        let player = player.clone();
        Callback::from(move |e: InputEvent| {
            let Some(input) = e.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            if let (Some(player), Ok(rate)) = (player.as_ref(), input.value().parse::<f64>()) {
                player.dispatch(PlayerAction::SetRate(rate));
            }
        })
    };

    let preview = {
        let api = api.clone();
        let console = console.clone();
        let player = player.clone();
        let selected = buffer.asset_id();
        move |segment: &Segment| {
            let api = api.clone();
            let console = console.clone();
            let player = player.clone();
            let (start_ms, end_ms, index) = (segment.start_ms, segment.end_ms, segment.segment_index);
            Callback::from(move |_: MouseEvent| {
                let Some(asset_id) = selected else {
                    return;
                };
                let api = api.clone();
                let console = console.clone();
                let player = player.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    match api.fetch_playback(asset_id).await {
                        Ok(source) => {
                            if let Some(player) = player.as_ref() {
                                player.dispatch(PlayerAction::PlayRange {
                                    url: source.url,
                                    start_ms,
                                    end_ms,
                                    title: fill_one(audio::SEGMENT_TITLE_TEMPLATE, index),
                                });
                            }
                        },
                        Err(err) => report(&console, err),
                    }
                });
            })
        }
    };

    let options = match &*files {
        Loadable::Ready(list) => html! {
            { for list.iter().map(|file| html! {
                <option
                    value={file.id.to_string()}
                    selected={buffer.asset_id() == Some(file.id)}
                >
                    { fill_two(t::OPTION_TEMPLATE, &file.original_filename, &file.status) }
                </option>
            }) }
        },
        _ => Html::default(),
    };

    let segment_list = match &*segments {
        None => Html::default(),
        Some(Loadable::Ready(list)) => html! {
            <div class="segments-preview">
                { for list.iter().map(|segment| html! {
                    <div
                        class={classes!("segment-item", segment.is_silence.then_some("silence"))}
                        key={segment.id}
                    >
                        <span class="segment-idx">{ format!("#{}", segment.segment_index) }</span>
                        <span class="segment-time">
                            { format!("{} → {}", format_ms(segment.start_ms), format_ms(segment.end_ms)) }
                        </span>
                        <span>{ format!("{}ms", segment.duration_ms) }</span>
                        <span>{ if segment.is_silence { t::SILENCE } else { t::CONTENT } }</span>
                        <span>{ segment.label.clone().unwrap_or_default() }</span>
                        <button type="button" class="btn btn-sm" onclick={preview(segment)}>
                            { t::PREVIEW }
                        </button>
                    </div>
                }) }
            </div>
        },
        Some(other) => placeholder(other).unwrap_or_default(),
    };

    html! {
        <div class="waveform-panel">
            if let Loadable::Failed(message) = &*files {
                { error_line(message) }
            }
            <div class="waveform-toolbar">
                <select class="waveform-select" onchange={on_select}>
                    <option value="">{ t::SELECT_PLACEHOLDER }</option>
                    { options }
                </select>
                <button type="button" class="btn btn-sm" onclick={on_zoom_out}>{ t::ZOOM_OUT }</button>
                <button type="button" class="btn btn-sm" onclick={on_zoom_in}>{ t::ZOOM_IN }</button>
                <label class="speed-control">
                    { t::SPEED }
                    <input
                        type="range"
                        min={MIN_RATE.to_string()}
                        max={MAX_RATE.to_string()}
                        step="0.1"
                        value={rate.to_string()}
                        oninput={on_speed}
                    />
                    <span class="speed-label">{ format!("{rate}x") }</span>
                </label>
            </div>
            <WaveformCanvas peaks={buffer.peaks().to_vec()} zoom={*zoom} />
            { segment_list }
        </div>
    }
}
