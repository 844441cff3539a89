use std::{cell::RefCell, rc::Rc};

use gloo_timers::future::TimeoutFuture;
use soniy_admin_shared::{
    audio_review::{AssetAction, AssetCard, AudioReview, ListState, SegmentsState},
    format::{format_megabytes, format_ms, page_range_label},
    models::{AudioFile, Segment},
    views::{StatusBadge as Badge, MISSING},
    ApiError, NoticeTone,
};
use yew::prelude::*;

use super::{error_line, notify, report};
use crate::{
    api::ApiClient,
    components::{
        loading_spinner::LoadingSpinner, modal::ConfirmDialog, progress_bar::ProgressBar,
        status_badge::StatusBadge,
    },
    config::{ACTION_SUCCESS_LINGER_MS, PROGRESS_STAGE_MS},
    console_context::{use_api, use_console, ConsoleContext},
    i18n::{
        current::{common, audio as t},
        fill_one,
    },
    player_context::{PlayerAction, PlayerContext},
    utils::{open_file_picker, take_selected_file},
};

/// Everything an audio card callback needs. The review state lives in a
/// `RefCell`; every mutation is followed by a forced re-render.
#[derive(Clone)]
struct Review {
    state: Rc<RefCell<AudioReview>>,
    rerender: UseForceUpdateHandle,
    api: ApiClient,
    console: Option<ConsoleContext>,
    player: Option<PlayerContext>,
}

impl Review {
    fn update<R>(&self, f: impl FnOnce(&mut AudioReview) -> R) -> R {
        let out = f(&mut self.state.borrow_mut());
        self.rerender.force_update();
        out
    }

    fn reload(&self) {
        let generation = self.update(AudioReview::begin_reload);
        let this = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = this.api.fetch_audio_files().await.map_err(|err| err.to_string());
            this.update(|review| review.finish_reload(generation, result));
        });
    }

    fn toggle(&self, asset_id: i64) {
        let Some(request) = self.update(|review| review.toggle(asset_id)) else {
            return;
        };
        let this = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = this
                .api
                .fetch_segments(request.asset_id)
                .await
                .map_err(|err| err.to_string());
            this.update(|review| review.finish_segments(request, result));
        });
    }

    fn play(&self, asset_id: i64) {
        let this = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match this.api.fetch_playback(asset_id).await {
                Ok(source) => {
                    if let Some(player) = this.player.as_ref() {
                        player.dispatch(PlayerAction::PlaySource {
                            url: source.url,
                            title: source.filename.unwrap_or_default(),
                        });
                    }
                },
                Err(err) => report(&this.console, err),
            }
        });
    }

    fn play_segment(&self, segment: &Segment) {
        let (Some(player), Some(url)) = (self.player.as_ref(), segment.file_url.clone()) else {
            return;
        };
        player.dispatch(PlayerAction::PlaySource {
            url,
            title: fill_one(t::SEGMENT_TITLE_TEMPLATE, segment.segment_index),
        });
    }

    fn run(&self, asset_id: i64, action: AssetAction) {
        if let Err(blocked) = self.update(|review| review.begin_action(asset_id, action)) {
            web_sys::console::warn_1(&format!("audio action rejected: {blocked}").into());
            return;
        }
        let this = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let call = {
                let api = this.api.clone();
                async move {
                    match action {
                        AssetAction::Process => api.process_audio(asset_id).await,
                        AssetAction::Cut => api.cut_audio(asset_id).await,
                    }
                }
            };
            let stages = {
                let this = this.clone();
                async move {
                    loop {
                        TimeoutFuture::new(PROGRESS_STAGE_MS).await;
                        if !this.update(|review| review.advance_action(asset_id)) {
                            break;
                        }
                    }
                }
            };
            // Stage text is cosmetic; the call alone decides the outcome.
            wasm_bindgen_futures::spawn_local(stages);
            let result = call.await;
            // A 401 has already switched the console to the login screen.
            if result.as_ref().is_err_and(ApiError::is_session_expired) {
                return;
            }
            let succeeded = result.is_ok();
            let result = result.map(|reply| reply.message).map_err(|err| err.to_string());
            this.update(|review| review.finish_action(asset_id, result));
            if succeeded {
                TimeoutFuture::new(ACTION_SUCCESS_LINGER_MS).await;
                this.update(|review| review.dismiss_progress(asset_id));
                this.reload();
            }
        });
    }

    fn request_delete(&self, asset_id: i64) {
        self.update(|review| review.request_delete(asset_id));
    }

    fn cancel_delete(&self) {
        self.update(AudioReview::cancel_delete);
    }

    fn confirm_delete(&self) {
        let Some(asset_id) = self.update(AudioReview::confirm_delete) else {
            return;
        };
        let this = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match this.api.delete_audio(asset_id).await {
                Ok(()) => this.reload(),
                Err(err) => report(&this.console, err),
            }
        });
    }

    fn upload(&self, file: web_sys::File) {
        let this = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match this.api.upload_audio(&file).await {
                Ok(()) => {
                    notify(&this.console, NoticeTone::Success, t::UPLOADED.to_string());
                    this.reload();
                },
                Err(err) => report(&this.console, err),
            }
        });
    }
}

#[function_component(AudioPanel)]
pub fn audio_panel() -> Html {
    let state = use_mut_ref(AudioReview::default);
    let rerender = use_force_update();
    let review = Review {
        state,
        rerender,
        api: use_api(),
        console: use_console(),
        player: use_context::<PlayerContext>(),
    };
    let upload_input = use_node_ref();

    {
        let review = review.clone();
        use_effect_with((), move |_| {
            review.reload();
            || ()
        });
    }

    let pick_upload = {
        let upload_input = upload_input.clone();
        Callback::from(move |_: MouseEvent| open_file_picker(&upload_input))
    };
    let on_upload = {
        let review = review.clone();
        Callback::from(move |e: Event| {
            if let Some(file) = take_selected_file(&e) {
                review.upload(file);
            }
        })
    };

    let snapshot = review.state.borrow().clone();
    let stats = snapshot.stats();

    let list = match snapshot.list_state() {
        ListState::Loading => html! { <LoadingSpinner /> },
        ListState::Failed(message) => html! { <div class="card mt-4">{ error_line(&message) }</div> },
        ListState::Empty => html! {
            <div class="card mt-4 audio-empty">
                <div class="audio-empty-icon">{"🎵"}</div>
                <h3>{ t::EMPTY_TITLE }</h3>
                <p class="text-muted">{ t::EMPTY_HINT }</p>
            </div>
        },
        ListState::Ready => html! {
            <div class="audio-files">
                { for snapshot.files().iter().filter_map(|file| {
                    snapshot.card(file.id).map(|card| render_card(&review, &snapshot, file, card))
                }) }
            </div>
        },
    };

    let confirm = snapshot.pending_delete().map(|_| {
        let on_confirm = {
            let review = review.clone();
            Callback::from(move |_| review.confirm_delete())
        };
        let on_cancel = {
            let review = review.clone();
            Callback::from(move |_| review.cancel_delete())
        };
        html! {
            <ConfirmDialog
                message={t::DELETE_CONFIRM}
                on_confirm={on_confirm}
                on_cancel={on_cancel}
                danger=true
            />
        }
    });

    html! {
        <div class="audio-panel">
            <div class="panel-actions">
                <button type="button" class="btn btn-primary" onclick={pick_upload}>{ t::UPLOAD }</button>
                <input ref={upload_input} type="file" accept="audio/*" hidden=true onchange={on_upload} />
            </div>
            <div class="audio-stats-row">
                <div class="audio-stat-chip"><strong>{ stats.total }</strong>{" "}{ t::STAT_TOTAL }</div>
                <div class="audio-stat-chip text-success"><strong>{ stats.ready }</strong>{" "}{ t::STAT_READY }</div>
                <div class="audio-stat-chip"><strong>{ stats.segmented }</strong>{" "}{ t::STAT_SEGMENTED }</div>
                <div class="audio-stat-chip"><strong>{ stats.segments }</strong>{" "}{ t::STAT_SEGMENTS }</div>
            </div>
            { list }
            { confirm.unwrap_or_default() }
        </div>
    }
}

fn render_card(review: &Review, snapshot: &AudioReview, file: &AudioFile, card: &AssetCard) -> Html {
    let id = file.id;
    let duration = file.duration_ms.map_or_else(|| MISSING.to_string(), format_ms);
    let size = file.file_size_bytes.map_or_else(|| MISSING.to_string(), format_megabytes);
    let pages = page_range_label(file.page_start, file.page_end);

    let on_toggle = {
        let review = review.clone();
        Callback::from(move |_: MouseEvent| review.toggle(id))
    };
    let on_play = {
        let review = review.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            review.play(id);
        })
    };
    let on_process = {
        let review = review.clone();
        Callback::from(move |_: MouseEvent| review.run(id, AssetAction::Process))
    };
    let on_cut = {
        let review = review.clone();
        Callback::from(move |_: MouseEvent| review.run(id, AssetAction::Cut))
    };
    let on_delete = {
        let review = review.clone();
        Callback::from(move |_: MouseEvent| review.request_delete(id))
    };

    let processing = card.busy == Some(AssetAction::Process);
    let cutting = card.busy == Some(AssetAction::Cut);

    html! {
        <div class={classes!("audio-file-card", card.expanded.then_some("expanded"))} key={id}>
            <div class="audio-file-header" onclick={on_toggle}>
                <button type="button" class="btn btn-sm btn-primary audio-play-mini" title={t::PLAY} onclick={on_play}>
                    {"▶️"}
                </button>
                <div class="audio-file-info">
                    <div class="audio-file-name">{ file.original_filename.clone() }</div>
                    <div class="audio-file-meta">
                        <span>{ duration }</span>
                        <span>{" · "}{ size }</span>
                        if let Some(pages) = pages {
                            <span>{" · "}{ pages }</span>
                        }
                        <span>{" · "}{ fill_one(t::SEGMENT_COUNT_TEMPLATE, file.segment_count.unwrap_or(0)) }</span>
                    </div>
                </div>
                <StatusBadge badge={Badge::audio(&file.status)} />
                <span class="audio-expand-icon">{ if card.expanded { "▲" } else { "▼" } }</span>
            </div>
            if let Some(progress) = card.progress.clone() {
                <ProgressBar progress={progress} />
            }
            if card.expanded {
                <div class="audio-file-body">
                    <div class="audio-actions-bar">
                        <button
                            type="button"
                            class="btn btn-sm btn-accent"
                            disabled={!snapshot.can_process(id)}
                            onclick={on_process}
                        >
                            { if processing { t::PROCESSING } else { t::PROCESS } }
                        </button>
                        <button
                            type="button"
                            class="btn btn-sm btn-success"
                            disabled={!snapshot.can_cut(id)}
                            onclick={on_cut}
                        >
                            { if cutting { t::CUTTING } else { t::CUT } }
                        </button>
                        <button type="button" class="btn btn-sm btn-danger" onclick={on_delete}>
                            { t::DELETE }
                        </button>
                    </div>
                    if let Some(message) = file.error_message.clone() {
                        <div class="audio-error-msg">{ format!("❌ {message}") }</div>
                    }
                    <div class="audio-segments-area">
                        { render_segments(review, &card.segments) }
                    </div>
                </div>
            }
        </div>
    }
}

fn render_segments(review: &Review, segments: &SegmentsState) -> Html {
    match segments {
        SegmentsState::Idle => Html::default(),
        SegmentsState::Loading => html! { <p class="text-muted">{ common::LOADING }</p> },
        SegmentsState::Failed(message) => error_line(message),
        SegmentsState::Loaded(list) if list.is_empty() => {
            html! { <p class="text-muted">{ t::NO_SEGMENTS }</p> }
        },
        SegmentsState::Loaded(list) => html! {
            <>
                <div class="segments-header">{ fill_one(t::SEGMENTS_TEMPLATE, list.len()) }</div>
                <div class="segments-list-compact">
                    { for list.iter().map(|segment| render_segment(review, segment)) }
                </div>
            </>
        },
    }
}

fn render_segment(review: &Review, segment: &Segment) -> Html {
    let duration =
        if segment.duration_ms > 0 { format_ms(segment.duration_ms) } else { "0:00".to_string() };
    let kind = if segment.is_silence { "silence" } else { "content" };
    let play = segment.file_url.as_ref().map(|_| {
        let review = review.clone();
        let segment = segment.clone();
        let onclick = Callback::from(move |_: MouseEvent| review.play_segment(&segment));
        html! { <button type="button" class="btn btn-sm" title={t::PLAY} onclick={onclick}>{"▶️"}</button> }
    });

    html! {
        <div class={classes!("segment-chip", kind)} key={segment.id}>
            <span class="seg-idx">{ format!("#{}", segment.segment_index) }</span>
            <span class="seg-type">{ if segment.is_silence { t::SILENCE_ICON } else { t::CONTENT_ICON } }</span>
            <span class="seg-range">
                { format!("{} → {}", format_ms(segment.start_ms), format_ms(segment.end_ms)) }
            </span>
            <span class="seg-dur">{ duration }</span>
            if let Some(label) = segment.label.clone() {
                <span class="seg-label">{ label }</span>
            }
            { play.unwrap_or_default() }
        </div>
    }
}
