//! State of the single shared audio transport.
//!
//! One `<audio>` element serves the whole console. The frontend mirrors this
//! state onto the element and feeds element events back in; the bounded
//! playback rule (stop at a segment end) lives here.

/// Default gain when the player first opens.
pub const DEFAULT_VOLUME: f64 = 0.8;
/// Slowest playback speed offered.
pub const MIN_RATE: f64 = 0.5;
/// Fastest playback speed offered.
pub const MAX_RATE: f64 = 2.0;

/// What the frontend must do after feeding a position update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportEvent {
    /// Nothing to do.
    None,
    /// The bounded range ended: pause the element now.
    BoundReached,
}

/// Shared transport state.
#[derive(Debug, Clone, PartialEq)]
pub struct Transport {
    source: Option<String>,
    title: String,
    /// Bumped on every (re)load so the element restarts even for the same URL.
    load_id: u64,
    start_at: f64,
    visible: bool,
    playing: bool,
    position: f64,
    duration: f64,
    volume: f64,
    rate: f64,
    end_bound: Option<f64>,
}

impl Default for Transport {
    fn default() -> Self {
        Self {
            source: None,
            title: String::new(),
            load_id: 0,
            start_at: 0.0,
            visible: false,
            playing: false,
            position: 0.0,
            duration: 0.0,
            volume: DEFAULT_VOLUME,
            rate: 1.0,
            end_bound: None,
        }
    }
}

impl Transport {
    /// Bound source URL.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Display name of the current source.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Identity of the current load.
    pub fn load_id(&self) -> u64 {
        self.load_id
    }

    /// Offset (seconds) playback starts from after a load.
    pub fn start_at(&self) -> f64 {
        self.start_at
    }

    /// Whether the player bar is shown.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Whether playback should be running.
    pub fn playing(&self) -> bool {
        self.playing
    }

    /// Last reported position, seconds.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Known duration, seconds; zero until metadata loads.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Gain, 0.0..=1.0.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Playback speed.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Pending end bound, seconds.
    pub fn end_bound(&self) -> Option<f64> {
        self.end_bound
    }

    /// Position as 0–100 for the seek control.
    pub fn progress_percent(&self) -> f64 {
        if self.duration > 0.0 && self.duration.is_finite() {
            (self.position / self.duration * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    /// Play `url` from the start.
    pub fn play_source(&mut self, url: &str, title: &str) {
        self.load(url, title, 0.0);
        self.end_bound = None;
    }

    /// Play `url` from `start_ms` and pause once `end_ms` is reached.
    pub fn play_range(&mut self, url: &str, start_ms: i64, end_ms: i64, title: &str) {
        let start = start_ms.max(0) as f64 / 1000.0;
        let end = end_ms.max(0) as f64 / 1000.0;
        self.load(url, title, start);
        self.end_bound = (end > start).then_some(end);
    }

    fn load(&mut self, url: &str, title: &str, start_at: f64) {
        self.source = Some(url.to_string());
        self.title = title.to_string();
        self.load_id += 1;
        self.start_at = start_at;
        self.position = start_at;
        self.duration = 0.0;
        self.visible = true;
        self.playing = true;
    }

    /// Play/pause toggle.
    pub fn toggle(&mut self) {
        if self.source.is_some() {
            self.playing = !self.playing;
        }
    }

    /// Force pause (e.g. the browser refused to autoplay).
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Hide the bar and stop.
    pub fn close(&mut self) {
        self.playing = false;
        self.visible = false;
        self.end_bound = None;
    }

    /// Metadata arrived.
    pub fn set_duration(&mut self, duration: f64) {
        self.duration = if duration.is_finite() && duration > 0.0 { duration } else { 0.0 };
    }

    /// Map a 0–100 seek control value to seconds. `None` until the duration
    /// is known.
    pub fn seek_percent(&mut self, percent: f64) -> Option<f64> {
        if self.duration <= 0.0 || !percent.is_finite() {
            return None;
        }
        let target = percent.clamp(0.0, 100.0) / 100.0 * self.duration;
        self.position = target;
        Some(target)
    }

    /// Map a 0–100 volume control value to gain and return it.
    pub fn set_volume_percent(&mut self, percent: f64) -> f64 {
        let gain = if percent.is_finite() { percent.clamp(0.0, 100.0) / 100.0 } else { self.volume };
        self.volume = gain;
        gain
    }

    /// Set playback speed, clamped to the offered range; returns the
    /// applied rate.
    pub fn set_rate(&mut self, rate: f64) -> f64 {
        if rate.is_finite() {
            self.rate = rate.clamp(MIN_RATE, MAX_RATE);
        }
        self.rate
    }

    /// Position observer. Fires [`TransportEvent::BoundReached`] once when a
    /// bounded range ends, then deregisters the bound.
    pub fn time_update(&mut self, position: f64) -> TransportEvent {
        if !position.is_finite() {
            return TransportEvent::None;
        }
        self.position = position;
        match self.end_bound {
            Some(end) if position >= end => {
                self.end_bound = None;
                self.playing = false;
                TransportEvent::BoundReached
            },
            _ => TransportEvent::None,
        }
    }

    /// The element reached its natural end.
    pub fn ended(&mut self) {
        self.playing = false;
        self.end_bound = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_a_source_shows_bar_and_plays() {
        let mut transport = Transport::default();
        transport.play_source("/media/a.mp3", "a.mp3");

        assert!(transport.visible());
        assert!(transport.playing());
        assert_eq!(transport.source(), Some("/media/a.mp3"));
        assert_eq!(transport.volume(), DEFAULT_VOLUME);
    }

    #[test]
    fn reloading_same_url_restarts() {
        let mut transport = Transport::default();
        transport.play_source("/a", "a");
        let first = transport.load_id();
        transport.play_source("/a", "a");
        assert!(transport.load_id() > first);
    }

    #[test]
    fn bound_fires_once_then_deregisters() {
        let mut transport = Transport::default();
        transport.play_range("/seg", 1_000, 2_500, "Segment #1");
        assert_eq!(transport.start_at(), 1.0);

        assert_eq!(transport.time_update(2.0), TransportEvent::None);
        assert_eq!(transport.time_update(2.5), TransportEvent::BoundReached);
        assert!(!transport.playing());
        assert_eq!(transport.end_bound(), None);

        transport.toggle();
        assert_eq!(transport.time_update(3.0), TransportEvent::None);
        assert!(transport.playing());
    }

    #[test]
    fn new_source_drops_pending_bound() {
        let mut transport = Transport::default();
        transport.play_range("/seg", 0, 500, "seg");
        transport.play_source("/whole", "whole");

        assert_eq!(transport.time_update(10.0), TransportEvent::None);
        assert!(transport.playing());
    }

    #[test]
    fn empty_range_registers_no_bound() {
        let mut transport = Transport::default();
        transport.play_range("/seg", 800, 800, "seg");
        assert_eq!(transport.end_bound(), None);
    }

    #[test]
    fn seek_requires_known_duration() {
        let mut transport = Transport::default();
        transport.play_source("/a", "a");
        assert_eq!(transport.seek_percent(50.0), None);

        transport.set_duration(200.0);
        assert_eq!(transport.seek_percent(25.0), Some(50.0));
        assert_eq!(transport.seek_percent(150.0), Some(200.0));
        assert_eq!(transport.progress_percent(), 100.0);
    }

    #[test]
    fn volume_maps_percent_to_gain() {
        let mut transport = Transport::default();
        assert_eq!(transport.set_volume_percent(35.0), 0.35);
        assert_eq!(transport.set_volume_percent(180.0), 1.0);
        assert_eq!(transport.set_volume_percent(-3.0), 0.0);
    }

    #[test]
    fn rate_is_clamped() {
        let mut transport = Transport::default();
        assert_eq!(transport.set_rate(4.0), MAX_RATE);
        assert_eq!(transport.set_rate(0.1), MIN_RATE);
        assert_eq!(transport.set_rate(f64::NAN), MIN_RATE);
    }

    #[test]
    fn close_hides_and_stops() {
        let mut transport = Transport::default();
        transport.play_range("/a", 0, 1000, "a");
        transport.close();
        assert!(!transport.visible());
        assert!(!transport.playing());
        assert_eq!(transport.end_bound(), None);
    }
}
