//! Audio review: asset list, per-asset cards, long-running actions.
//!
//! Every list reload and every segment fetch carries a generation number.
//! Only the most recently issued request of each kind may land; anything
//! older is dropped when it finally arrives.

use thiserror::Error;

use crate::models::{AudioFile, AudioStatus, Segment};

/// Stage text shown while a processing call is running.
pub const PROCESS_STAGES: [(u8, &str); 2] = [
    (30, "Audio tahlil qilinmoqda..."),
    (50, "FFmpeg: davomiylik, waveform, segmentatsiya..."),
];
/// Stage text shown while a cutting call is running.
pub const CUT_STAGES: [(u8, &str); 1] = [(40, "FFmpeg bilan segmentlar kesilmoqda...")];

/// Aggregate counters shown above the asset list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AudioStats {
    /// Number of assets.
    pub total: usize,
    /// Assets whose status is `ready`.
    pub ready: usize,
    /// Assets whose status is `segmented`.
    pub segmented: usize,
    /// Sum of per-asset segment counts.
    pub segments: u64,
}

impl AudioStats {
    /// Recompute from a full list.
    pub fn from_files(files: &[AudioFile]) -> Self {
        files.iter().fold(Self::default(), |mut stats, file| {
            stats.total += 1;
            match file.status {
                AudioStatus::Ready => stats.ready += 1,
                AudioStatus::Segmented => stats.segmented += 1,
                _ => {},
            }
            stats.segments += u64::from(file.segment_count.unwrap_or(0));
            stats
        })
    }
}

/// What the list area currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    /// A reload is in flight and nothing has been shown yet.
    Loading,
    /// Cards are shown.
    Ready,
    /// The server has no assets.
    Empty,
    /// The last reload failed; the text replaces the list.
    Failed(String),
}

/// Long-running server action on one asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetAction {
    /// Duration, waveform and silence analysis.
    Process,
    /// Cutting segment files.
    Cut,
}

impl AssetAction {
    /// Cosmetic progress stages while the call is in flight.
    pub fn stages(self) -> &'static [(u8, &'static str)] {
        match self {
            AssetAction::Process => &PROCESS_STAGES,
            AssetAction::Cut => &CUT_STAGES,
        }
    }

    /// Success text used when the server reply carries none.
    fn fallback_message(self) -> &'static str {
        match self {
            AssetAction::Process => "Tahlil tugadi",
            AssetAction::Cut => "Segmentlar kesildi",
        }
    }
}

/// Phase of a progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressPhase {
    /// Call in flight; percent is cosmetic.
    Running,
    /// Call succeeded.
    Succeeded,
    /// Call failed; the control is re-enabled for retry.
    Failed,
}

/// Progress bar under an asset card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    /// Action the bar belongs to.
    pub action: AssetAction,
    /// Index into [`AssetAction::stages`] while running.
    pub stage: usize,
    /// Bar fill, 0–100.
    pub percent: u8,
    /// Caption.
    pub text: String,
    /// Phase.
    pub phase: ProgressPhase,
}

impl Progress {
    fn start(action: AssetAction) -> Self {
        let (percent, text) = action.stages()[0];
        Self {
            action,
            stage: 0,
            percent,
            text: text.to_string(),
            phase: ProgressPhase::Running,
        }
    }
}

/// Segment list of an expanded card.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentsState {
    /// Collapsed; nothing fetched.
    Idle,
    /// Fetch in flight.
    Loading,
    /// Segments in ascending index order.
    Loaded(Vec<Segment>),
    /// Fetch failed.
    Failed(String),
}

/// UI state of one asset card.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetCard {
    /// Asset id.
    pub asset_id: i64,
    /// Whether the detail area is open.
    pub expanded: bool,
    /// Generation of the segment fetch issued by the current expansion.
    pub expansion: u64,
    /// Segment list.
    pub segments: SegmentsState,
    /// In-flight action; disables that asset's action buttons.
    pub busy: Option<AssetAction>,
    /// Progress bar, if shown.
    pub progress: Option<Progress>,
}

impl AssetCard {
    fn collapsed(asset_id: i64) -> Self {
        Self {
            asset_id,
            expanded: false,
            expansion: 0,
            segments: SegmentsState::Idle,
            busy: None,
            progress: None,
        }
    }
}

/// Segment fetch to perform for an expanded card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentRequest {
    /// Asset whose segments to fetch.
    pub asset_id: i64,
    /// Generation to hand back with the result.
    pub generation: u64,
}

/// Why an action trigger was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionBlocked {
    /// The asset is not in the current list.
    #[error("audio {0} is not in the current list")]
    UnknownAsset(i64),
    /// Another action on the same asset is still running.
    #[error("audio {0} is busy")]
    Busy(i64),
    /// Cutting requires boundaries first.
    #[error("audio {0} is not segmented yet")]
    CutNotAllowed(i64),
}

/// Result of settling an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Success: dismiss the bar after the linger delay, then reload.
    Succeeded,
    /// Failure: the bar shows the error, controls are enabled again.
    Failed,
    /// The asset vanished or was not busy; nothing changed.
    Ignored,
}

/// State of the audio panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioReview {
    files: Vec<AudioFile>,
    cards: Vec<AssetCard>,
    stats: AudioStats,
    list: Option<ListState>,
    reload_seq: u64,
    segment_seq: u64,
    pending_delete: Option<i64>,
}

impl AudioReview {
    /// Assets of the last applied reload, in server order.
    pub fn files(&self) -> &[AudioFile] {
        &self.files
    }

    /// Asset by id.
    pub fn file(&self, asset_id: i64) -> Option<&AudioFile> {
        self.files.iter().find(|file| file.id == asset_id)
    }

    /// Card by id.
    pub fn card(&self, asset_id: i64) -> Option<&AssetCard> {
        self.cards.iter().find(|card| card.asset_id == asset_id)
    }

    fn card_mut(&mut self, asset_id: i64) -> Option<&mut AssetCard> {
        self.cards.iter_mut().find(|card| card.asset_id == asset_id)
    }

    /// Aggregate counters.
    pub fn stats(&self) -> AudioStats {
        self.stats
    }

    /// List area state.
    pub fn list_state(&self) -> ListState {
        self.list.clone().unwrap_or(ListState::Loading)
    }

    /// Issue a reload; hand the returned generation to [`Self::finish_reload`].
    pub fn begin_reload(&mut self) -> u64 {
        self.reload_seq += 1;
        if self.list.is_none() {
            self.list = Some(ListState::Loading);
        }
        self.reload_seq
    }

    /// Apply a list response. Returns `false` when the response belongs to
    /// a superseded reload and was dropped.
    pub fn finish_reload(&mut self, generation: u64, result: Result<Vec<AudioFile>, String>) -> bool {
        if generation != self.reload_seq {
            tracing::debug!(generation, current = self.reload_seq, "dropping stale audio list");
            return false;
        }

        match result {
            Ok(files) => {
                let cards = files
                    .iter()
                    .map(|file| {
                        let mut card = AssetCard::collapsed(file.id);
                        if let Some(old) = self.card(file.id) {
                            card.busy = old.busy;
                            card.progress = old.progress.clone();
                        }
                        card
                    })
                    .collect();
                self.stats = AudioStats::from_files(&files);
                self.list = Some(if files.is_empty() { ListState::Empty } else { ListState::Ready });
                self.cards = cards;
                self.files = files;
            },
            Err(message) => {
                // Calls still in flight keep their busy flag and bar.
                self.cards.retain(|card| card.busy.is_some() || card.progress.is_some());
                for card in &mut self.cards {
                    card.expanded = false;
                    card.segments = SegmentsState::Idle;
                }
                self.files.clear();
                self.stats = AudioStats::default();
                self.list = Some(ListState::Failed(message));
            },
        }
        if self.pending_delete.is_some_and(|id| self.file(id).is_none()) {
            self.pending_delete = None;
        }
        true
    }

    /// Expand or collapse a card. Expanding returns the segment fetch to
    /// issue; collapsing discards whatever was fetched.
    pub fn toggle(&mut self, asset_id: i64) -> Option<SegmentRequest> {
        let next_generation = self.segment_seq + 1;
        let card = self.card_mut(asset_id)?;
        if card.expanded {
            card.expanded = false;
            card.segments = SegmentsState::Idle;
            return None;
        }
        card.expanded = true;
        card.expansion = next_generation;
        card.segments = SegmentsState::Loading;
        self.segment_seq = next_generation;
        Some(SegmentRequest {
            asset_id,
            generation: next_generation,
        })
    }

    /// Apply a segment response. Dropped unless the card is still expanded
    /// by the same expansion that issued the request.
    pub fn finish_segments(
        &mut self,
        request: SegmentRequest,
        result: Result<Vec<Segment>, String>,
    ) -> bool {
        let Some(card) = self.card_mut(request.asset_id) else {
            return false;
        };
        if !card.expanded || card.expansion != request.generation {
            tracing::debug!(asset_id = request.asset_id, "dropping stale segment list");
            return false;
        }
        card.segments = match result {
            Ok(mut segments) => {
                segments.sort_by_key(|segment| segment.segment_index);
                SegmentsState::Loaded(segments)
            },
            Err(message) => SegmentsState::Failed(message),
        };
        true
    }

    /// Whether the process button is enabled.
    pub fn can_process(&self, asset_id: i64) -> bool {
        self.card(asset_id).is_some_and(|card| card.busy.is_none())
    }

    /// Whether the cut button is enabled.
    pub fn can_cut(&self, asset_id: i64) -> bool {
        self.can_process(asset_id)
            && self.file(asset_id).is_some_and(|file| file.status.allows_cut())
    }

    /// Start an action: mark the asset busy and show the first stage.
    ///
    /// # Errors
    ///
    /// [`ActionBlocked`] when the asset is unknown, already busy, or (for
    /// [`AssetAction::Cut`]) not segmented yet.
    pub fn begin_action(&mut self, asset_id: i64, action: AssetAction) -> Result<(), ActionBlocked> {
        self.try_begin_action(asset_id, action)
            .inspect_err(|blocked| tracing::warn!(%blocked, "audio action rejected"))
    }

    fn try_begin_action(&mut self, asset_id: i64, action: AssetAction) -> Result<(), ActionBlocked> {
        let allows_cut = self
            .file(asset_id)
            .ok_or(ActionBlocked::UnknownAsset(asset_id))?
            .status
            .allows_cut();
        let card = self.card_mut(asset_id).ok_or(ActionBlocked::UnknownAsset(asset_id))?;
        if card.busy.is_some() {
            return Err(ActionBlocked::Busy(asset_id));
        }
        if action == AssetAction::Cut && !allows_cut {
            return Err(ActionBlocked::CutNotAllowed(asset_id));
        }
        card.busy = Some(action);
        card.progress = Some(Progress::start(action));
        Ok(())
    }

    /// Move a running bar to its next cosmetic stage. Returns `true` when
    /// there are further stages left.
    pub fn advance_action(&mut self, asset_id: i64) -> bool {
        let Some(progress) = self.card_mut(asset_id).and_then(|card| card.progress.as_mut()) else {
            return false;
        };
        if progress.phase != ProgressPhase::Running {
            return false;
        }
        let stages = progress.action.stages();
        if progress.stage + 1 < stages.len() {
            progress.stage += 1;
            let (percent, text) = stages[progress.stage];
            progress.percent = percent;
            progress.text = text.to_string();
        }
        progress.stage + 1 < stages.len()
    }

    /// Settle an action with the server's answer.
    pub fn finish_action(&mut self, asset_id: i64, result: Result<String, String>) -> ActionOutcome {
        let Some(card) = self.card_mut(asset_id) else {
            return ActionOutcome::Ignored;
        };
        let Some(action) = card.busy.take() else {
            return ActionOutcome::Ignored;
        };
        let (phase, text, outcome) = match result {
            Ok(message) => {
                let message = if message.trim().is_empty() {
                    action.fallback_message().to_string()
                } else {
                    message
                };
                (ProgressPhase::Succeeded, format!("✅ {message}"), ActionOutcome::Succeeded)
            },
            Err(error) => (ProgressPhase::Failed, format!("❌ {error}"), ActionOutcome::Failed),
        };
        card.progress = Some(Progress {
            action,
            stage: action.stages().len() - 1,
            percent: 100,
            text,
            phase,
        });
        outcome
    }

    /// Hide a settled progress bar. Running bars stay.
    pub fn dismiss_progress(&mut self, asset_id: i64) {
        if let Some(card) = self.card_mut(asset_id) {
            if card.progress.as_ref().is_some_and(|p| p.phase != ProgressPhase::Running) {
                card.progress = None;
            }
        }
    }

    /// First step of deletion: ask for confirmation. Returns `false` for an
    /// unknown asset.
    pub fn request_delete(&mut self, asset_id: i64) -> bool {
        if self.file(asset_id).is_none() {
            return false;
        }
        self.pending_delete = Some(asset_id);
        true
    }

    /// Asset awaiting confirmation.
    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    /// User confirmed: returns the id to delete.
    pub fn confirm_delete(&mut self) -> Option<i64> {
        self.pending_delete.take()
    }

    /// User backed out.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(id: i64, status: AudioStatus, segments: Option<u32>) -> AudioFile {
        AudioFile {
            id,
            book_id: Some(1),
            original_filename: format!("dars-{id}.mp3"),
            duration_ms: Some(60_000),
            file_size_bytes: Some(1024),
            status,
            error_message: None,
            page_start: None,
            page_end: None,
            waveform_peaks: None,
            segment_count: segments,
            created_at: None,
        }
    }

    fn segment(index: u32, silence: bool) -> Segment {
        Segment {
            id: i64::from(index) + 100,
            segment_index: index,
            file_url: None,
            start_ms: i64::from(index) * 1000,
            end_ms: i64::from(index) * 1000 + 900,
            duration_ms: 900,
            is_silence: silence,
            label: None,
        }
    }

    fn loaded(files: Vec<AudioFile>) -> AudioReview {
        let mut review = AudioReview::default();
        let generation = review.begin_reload();
        assert!(review.finish_reload(generation, Ok(files)));
        review
    }

    #[test]
    fn stats_follow_statuses() {
        let review = loaded(vec![
            file(1, AudioStatus::Ready, Some(12)),
            file(2, AudioStatus::Segmented, Some(4)),
            file(3, AudioStatus::Ready, None),
            file(4, AudioStatus::Uploaded, None),
        ]);

        assert_eq!(review.stats(), AudioStats {
            total: 4,
            ready: 2,
            segmented: 1,
            segments: 16,
        });
        assert_eq!(review.list_state(), ListState::Ready);
    }

    #[test]
    fn empty_list_shows_empty_state() {
        let review = loaded(Vec::new());
        assert_eq!(review.list_state(), ListState::Empty);
        assert_eq!(review.stats(), AudioStats::default());
    }

    #[test]
    fn stale_reload_is_dropped() {
        let mut review = AudioReview::default();
        let first = review.begin_reload();
        let second = review.begin_reload();

        assert!(review.finish_reload(second, Ok(vec![file(2, AudioStatus::Ready, None)])));
        assert!(!review.finish_reload(first, Ok(vec![file(1, AudioStatus::Uploaded, None)])));

        assert_eq!(review.files().len(), 1);
        assert_eq!(review.files()[0].id, 2);
    }

    #[test]
    fn failed_reload_replaces_list_with_error() {
        let mut review = loaded(vec![file(1, AudioStatus::Ready, Some(2))]);
        let generation = review.begin_reload();
        review.finish_reload(generation, Err("Xatolik: 500".to_string()));

        assert_eq!(review.list_state(), ListState::Failed("Xatolik: 500".to_string()));
        assert!(review.files().is_empty());
    }

    #[test]
    fn expanding_fetches_once_per_expansion() {
        let mut review = loaded(vec![file(1, AudioStatus::Ready, None)]);

        let first = review.toggle(1).expect("expand issues fetch");
        assert_eq!(review.toggle(1), None);
        let second = review.toggle(1).expect("re-expand fetches again");

        assert_ne!(first.generation, second.generation);
        assert!(!review.finish_segments(first, Ok(vec![segment(0, false)])));
        assert!(review.finish_segments(second, Ok(vec![segment(0, false)])));
    }

    #[test]
    fn segments_are_sorted_by_index() {
        let mut review = loaded(vec![file(1, AudioStatus::Ready, None)]);
        let request = review.toggle(1).expect("expand");

        review.finish_segments(request, Ok(vec![segment(2, true), segment(0, false), segment(1, true)]));

        let Some(SegmentsState::Loaded(segments)) = review.card(1).map(|card| card.segments.clone())
        else {
            panic!("segments should be loaded");
        };
        let order: Vec<u32> = segments.iter().map(|s| s.segment_index).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn collapsed_card_ignores_late_segments() {
        let mut review = loaded(vec![file(1, AudioStatus::Ready, None)]);
        let request = review.toggle(1).expect("expand");
        review.toggle(1);

        assert!(!review.finish_segments(request, Ok(vec![segment(0, false)])));
        assert_eq!(review.card(1).map(|c| c.segments.clone()), Some(SegmentsState::Idle));
    }

    #[test]
    fn cut_requires_segmentation() {
        let mut review = loaded(vec![
            file(1, AudioStatus::Uploaded, None),
            file(2, AudioStatus::Segmented, Some(3)),
        ]);

        assert!(!review.can_cut(1));
        assert_eq!(review.begin_action(1, AssetAction::Cut), Err(ActionBlocked::CutNotAllowed(1)));
        assert!(review.card(1).is_some_and(|card| card.busy.is_none()));

        assert!(review.can_cut(2));
        assert_eq!(review.begin_action(2, AssetAction::Cut), Ok(()));
    }

    #[test]
    fn busy_asset_rejects_second_action() {
        let mut review = loaded(vec![file(1, AudioStatus::Ready, None)]);
        review.begin_action(1, AssetAction::Process).expect("start");

        assert!(!review.can_process(1));
        assert!(!review.can_cut(1));
        assert_eq!(review.begin_action(1, AssetAction::Cut), Err(ActionBlocked::Busy(1)));
        assert_eq!(review.begin_action(9, AssetAction::Process), Err(ActionBlocked::UnknownAsset(9)));
    }

    #[test]
    fn process_walks_stages_then_succeeds() {
        let mut review = loaded(vec![file(1, AudioStatus::Uploaded, None)]);
        review.begin_action(1, AssetAction::Process).expect("start");
        assert_eq!(review.card(1).and_then(|c| c.progress.as_ref()).map(|p| p.percent), Some(30));

        assert!(!review.advance_action(1));
        let progress = review.card(1).and_then(|c| c.progress.clone()).expect("progress");
        assert_eq!(progress.percent, 50);
        assert_eq!(progress.text, PROCESS_STAGES[1].1);

        assert_eq!(review.finish_action(1, Ok("12 ta segment".to_string())), ActionOutcome::Succeeded);
        let progress = review.card(1).and_then(|c| c.progress.clone()).expect("progress");
        assert_eq!(progress.percent, 100);
        assert_eq!(progress.text, "✅ 12 ta segment");
        assert!(review.can_process(1));
    }

    #[test]
    fn failure_reenables_for_retry() {
        let mut review = loaded(vec![file(1, AudioStatus::Segmented, None)]);
        review.begin_action(1, AssetAction::Cut).expect("start");

        assert_eq!(review.finish_action(1, Err("ffmpeg topilmadi".to_string())), ActionOutcome::Failed);

        let progress = review.card(1).and_then(|c| c.progress.clone()).expect("progress");
        assert_eq!(progress.phase, ProgressPhase::Failed);
        assert_eq!(progress.text, "❌ ffmpeg topilmadi");
        assert!(review.can_cut(1));
        assert_eq!(review.finish_action(1, Ok(String::new())), ActionOutcome::Ignored);
    }

    #[test]
    fn reload_collapses_cards_but_keeps_busy_state() {
        let mut review = loaded(vec![
            file(1, AudioStatus::Ready, None),
            file(2, AudioStatus::Ready, None),
        ]);
        review.toggle(2);
        review.begin_action(1, AssetAction::Process).expect("start");

        let generation = review.begin_reload();
        review.finish_reload(generation, Ok(vec![
            file(1, AudioStatus::Processing, None),
            file(2, AudioStatus::Ready, None),
        ]));

        assert_eq!(review.card(1).and_then(|c| c.busy), Some(AssetAction::Process));
        assert!(review.card(2).is_some_and(|c| !c.expanded));
    }

    #[test]
    fn failed_reload_keeps_running_action() {
        let mut review = loaded(vec![file(1, AudioStatus::Uploaded, None)]);
        review.begin_action(1, AssetAction::Process).expect("start");

        let generation = review.begin_reload();
        review.finish_reload(generation, Err("Xatolik: 502".to_string()));
        assert_eq!(review.list_state(), ListState::Failed("Xatolik: 502".to_string()));

        let generation = review.begin_reload();
        review.finish_reload(generation, Ok(vec![file(1, AudioStatus::Processing, None)]));

        assert!(!review.can_process(1));
        assert_eq!(review.begin_action(1, AssetAction::Process), Err(ActionBlocked::Busy(1)));
        assert_eq!(review.finish_action(1, Ok("tayyor".to_string())), ActionOutcome::Succeeded);
        assert_eq!(
            review.card(1).and_then(|c| c.progress.as_ref()).map(|p| p.text.clone()),
            Some("✅ tayyor".to_string())
        );
    }

    #[test]
    fn running_bar_cannot_be_dismissed() {
        let mut review = loaded(vec![file(1, AudioStatus::Ready, None)]);
        review.begin_action(1, AssetAction::Process).expect("start");
        review.dismiss_progress(1);
        assert!(review.card(1).is_some_and(|c| c.progress.is_some()));

        review.finish_action(1, Ok("ok".to_string()));
        review.dismiss_progress(1);
        assert!(review.card(1).is_some_and(|c| c.progress.is_none()));
    }

    #[test]
    fn delete_needs_confirmation() {
        let mut review = loaded(vec![file(1, AudioStatus::Ready, None)]);

        assert!(!review.request_delete(5));
        assert!(review.request_delete(1));
        review.cancel_delete();
        assert_eq!(review.confirm_delete(), None);

        review.request_delete(1);
        assert_eq!(review.confirm_delete(), Some(1));
        assert_eq!(review.pending_delete(), None);
    }
}
