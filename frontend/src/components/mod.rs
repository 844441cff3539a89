// Reusable components live here.

pub mod audio_player;
pub mod loading_spinner;
pub mod modal;
pub mod notice_banner;
pub mod progress_bar;
pub mod sidebar;
pub mod stats_card;
pub mod status_badge;
pub mod waveform_canvas;
