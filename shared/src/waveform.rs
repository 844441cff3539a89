//! Waveform scene layout.
//!
//! Peaks come precomputed from the server; this module only turns a peak
//! buffer and a zoom factor into rectangles. The frontend painter draws the
//! resulting [`WaveformScene`] onto a 2-D canvas without further math.

use crate::models::AudioFile;

/// Narrowest canvas, in pixels.
pub const MIN_CANVAS_WIDTH: u32 = 1200;
/// Canvas height, in pixels.
pub const CANVAS_HEIGHT: u32 = 200;
/// Vertical gridlines drawn over the bars.
pub const GRIDLINE_COUNT: u32 = 10;
/// Headroom left above and below the tallest bar.
pub const BAR_MARGIN: f64 = 20.0;
/// Smallest zoom factor.
pub const MIN_ZOOM: f64 = 1.0;
/// Largest zoom factor.
pub const MAX_ZOOM: f64 = 10.0;
/// Multiplicative step of one zoom action.
pub const ZOOM_STEP: f64 = 1.5;
/// Label drawn when there is nothing to show.
pub const PLACEHOLDER_LABEL: &str = "Audio tanlang";

/// Horizontal zoom, always within [`MIN_ZOOM`, `MAX_ZOOM`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom(f64);

impl Default for Zoom {
    fn default() -> Self {
        Zoom(MIN_ZOOM)
    }
}

impl Zoom {
    /// Clamp an arbitrary factor into range.
    pub fn new(factor: f64) -> Self {
        if factor.is_nan() {
            return Zoom::default();
        }
        Zoom(factor.clamp(MIN_ZOOM, MAX_ZOOM))
    }

    /// Current factor.
    pub fn factor(self) -> f64 {
        self.0
    }

    /// One step in.
    #[must_use]
    pub fn zoom_in(self) -> Self {
        Zoom::new(self.0 * ZOOM_STEP)
    }

    /// One step out.
    #[must_use]
    pub fn zoom_out(self) -> Self {
        Zoom::new(self.0 / ZOOM_STEP)
    }
}

/// One peak bar, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

/// What to draw inside the background.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneContent {
    /// Centered hint text, no bars and no gridlines.
    Placeholder {
        /// Text to draw.
        label: &'static str,
        /// Anchor x (text is centered on it).
        x: f64,
        /// Anchor y.
        y: f64,
    },
    /// Peak bars plus gridline x positions.
    Bars {
        /// One bar per peak, in peak order.
        bars: Vec<Bar>,
        /// Gridline x positions.
        gridlines: Vec<f64>,
    },
}

/// Complete drawing instructions for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformScene {
    /// Canvas width.
    pub width: u32,
    /// Canvas height.
    pub height: u32,
    /// Foreground.
    pub content: SceneContent,
}

/// Lay out `peaks` at `zoom`.
pub fn layout(peaks: &[f32], zoom: Zoom) -> WaveformScene {
    let scaled = (peaks.len() as f64 * zoom.factor()).ceil();
    let width = (scaled as u32).max(MIN_CANVAS_WIDTH);
    let height = CANVAS_HEIGHT;
    let w = f64::from(width);
    let h = f64::from(height);
    let mid = h / 2.0;

    if peaks.is_empty() {
        return WaveformScene {
            width,
            height,
            content: SceneContent::Placeholder {
                label: PLACEHOLDER_LABEL,
                x: w / 2.0,
                y: mid,
            },
        };
    }

    let slot = w / peaks.len() as f64;
    let bar_width = (slot - 1.0).max(1.0);
    let bars = peaks
        .iter()
        .enumerate()
        .map(|(index, peak)| {
            let magnitude = if peak.is_finite() { f64::from(*peak).clamp(0.0, 1.0) } else { 0.0 };
            let bar_height = magnitude * (h - BAR_MARGIN);
            Bar {
                x: index as f64 * slot,
                y: mid - bar_height / 2.0,
                width: bar_width,
                height: bar_height,
            }
        })
        .collect();

    let gridlines = (0..GRIDLINE_COUNT)
        .map(|line| w / f64::from(GRIDLINE_COUNT) * f64::from(line))
        .collect();

    WaveformScene {
        width,
        height,
        content: SceneContent::Bars {
            bars,
            gridlines,
        },
    }
}

/// Peak buffer of the asset selected in the waveform panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaveformBuffer {
    asset_id: Option<i64>,
    peaks: Vec<f32>,
}

impl WaveformBuffer {
    /// Select `asset_id` from `files`; `None` or an unknown id clears the
    /// buffer. Returns the selected id.
    pub fn select(&mut self, files: &[AudioFile], asset_id: Option<i64>) -> Option<i64> {
        let selected = asset_id.and_then(|id| files.iter().find(|file| file.id == id));
        match selected {
            Some(file) => {
                self.asset_id = Some(file.id);
                self.peaks = file.peaks().to_vec();
            },
            None => {
                self.asset_id = None;
                self.peaks.clear();
            },
        }
        self.asset_id
    }

    /// Selected asset id.
    pub fn asset_id(&self) -> Option<i64> {
        self.asset_id
    }

    /// Current peak buffer.
    pub fn peaks(&self) -> &[f32] {
        &self.peaks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AudioStatus;

    #[test]
    fn zoom_stays_in_range_under_any_sequence() {
        let mut zoom = Zoom::default();
        for step in 0..200 {
            zoom = if step % 7 < 4 { zoom.zoom_in() } else { zoom.zoom_out() };
            assert!((MIN_ZOOM..=MAX_ZOOM).contains(&zoom.factor()));
        }
        for _ in 0..50 {
            zoom = zoom.zoom_in();
        }
        assert_eq!(zoom.factor(), MAX_ZOOM);
        for _ in 0..50 {
            zoom = zoom.zoom_out();
        }
        assert_eq!(zoom.factor(), MIN_ZOOM);
    }

    #[test]
    fn zoom_is_reversible_inside_range() {
        let zoom = Zoom::default().zoom_in().zoom_in();
        let back = zoom.zoom_out().zoom_out();
        assert!((back.factor() - MIN_ZOOM).abs() < 1e-9);
    }

    #[test]
    fn nan_zoom_resets_to_minimum() {
        assert_eq!(Zoom::new(f64::NAN).factor(), MIN_ZOOM);
    }

    #[test]
    fn empty_peaks_render_placeholder() {
        let scene = layout(&[], Zoom::default());
        assert_eq!(scene.width, MIN_CANVAS_WIDTH);
        assert_eq!(scene.height, CANVAS_HEIGHT);
        assert!(matches!(
            scene.content,
            SceneContent::Placeholder { label: PLACEHOLDER_LABEL, .. }
        ));
    }

    #[test]
    fn width_grows_with_peak_count_and_zoom() {
        let peaks = vec![0.5_f32; 1000];
        assert_eq!(layout(&peaks, Zoom::default()).width, MIN_CANVAS_WIDTH);
        assert_eq!(layout(&peaks, Zoom::new(3.0)).width, 3000);
    }

    #[test]
    fn bars_are_centered_and_proportional() {
        let scene = layout(&[1.0, 0.5, 0.0], Zoom::default());
        let SceneContent::Bars { bars, gridlines } = scene.content else {
            panic!("expected bars");
        };
        assert_eq!(bars.len(), 3);
        assert_eq!(gridlines.len(), GRIDLINE_COUNT as usize);
        assert_eq!(gridlines[0], 0.0);

        let full = bars[0];
        assert_eq!(full.height, f64::from(CANVAS_HEIGHT) - BAR_MARGIN);
        assert_eq!(full.y + full.height / 2.0, f64::from(CANVAS_HEIGHT) / 2.0);
        assert_eq!(bars[1].height, full.height / 2.0);
        assert_eq!(bars[2].height, 0.0);
        assert_eq!(bars[1].x, 400.0);
        assert_eq!(full.width, 399.0);
    }

    #[test]
    fn out_of_range_peaks_are_clamped() {
        let scene = layout(&[2.0, -1.0, f32::NAN], Zoom::default());
        let SceneContent::Bars { bars, .. } = scene.content else {
            panic!("expected bars");
        };
        assert_eq!(bars[0].height, f64::from(CANVAS_HEIGHT) - BAR_MARGIN);
        assert_eq!(bars[1].height, 0.0);
        assert_eq!(bars[2].height, 0.0);
    }

    #[test]
    fn dense_peaks_keep_one_pixel_bars() {
        let peaks = vec![0.3_f32; 5000];
        let scene = layout(&peaks, Zoom::default());
        let SceneContent::Bars { bars, .. } = scene.content else {
            panic!("expected bars");
        };
        assert!(bars.iter().all(|bar| bar.width >= 1.0));
    }

    #[test]
    fn buffer_follows_selection() {
        let file = AudioFile {
            id: 4,
            book_id: Some(1),
            original_filename: "a.mp3".to_string(),
            duration_ms: None,
            file_size_bytes: None,
            status: AudioStatus::Ready,
            error_message: None,
            page_start: None,
            page_end: None,
            waveform_peaks: Some(vec![0.1, 0.2]),
            segment_count: None,
            created_at: None,
        };
        let mut buffer = WaveformBuffer::default();

        assert_eq!(buffer.select(std::slice::from_ref(&file), Some(4)), Some(4));
        assert_eq!(buffer.peaks(), &[0.1, 0.2]);

        assert_eq!(buffer.select(std::slice::from_ref(&file), Some(99)), None);
        assert!(buffer.peaks().is_empty());
    }
}
