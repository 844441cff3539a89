//! Client-side projections of backend records.
//!
//! Nothing here is persisted locally. Every value is created from a list/get
//! response and replaced wholesale on the next reload.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Processing state of an uploaded audio asset, as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AudioStatus {
    /// Stored, not yet analysed.
    Uploaded,
    /// Server-side analysis is running.
    Processing,
    /// Silence/content boundaries exist; segment files are not cut yet.
    Segmented,
    /// Segment files are cut and playable.
    Ready,
    /// Processing failed; see [`AudioFile::error_message`].
    Error,
    /// A status this client does not know about.
    Other(String),
}

impl AudioStatus {
    /// Wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            AudioStatus::Uploaded => "uploaded",
            AudioStatus::Processing => "processing",
            AudioStatus::Segmented => "segmented",
            AudioStatus::Ready => "ready",
            AudioStatus::Error => "error",
            AudioStatus::Other(raw) => raw.as_str(),
        }
    }

    /// Segment cutting is offered only once boundaries exist.
    pub fn allows_cut(&self) -> bool {
        matches!(self, AudioStatus::Segmented | AudioStatus::Ready)
    }
}

impl From<String> for AudioStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "uploaded" => AudioStatus::Uploaded,
            "processing" => AudioStatus::Processing,
            "segmented" => AudioStatus::Segmented,
            "ready" => AudioStatus::Ready,
            "error" => AudioStatus::Error,
            _ => AudioStatus::Other(raw),
        }
    }
}

impl From<AudioStatus> for String {
    fn from(status: AudioStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for AudioStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An uploaded audio asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioFile {
    /// Server id.
    pub id: i64,
    /// Owning book.
    #[serde(default)]
    pub book_id: Option<i64>,
    /// Name the file was uploaded with.
    pub original_filename: String,
    /// Total duration in milliseconds, known after processing.
    #[serde(default)]
    pub duration_ms: Option<i64>,
    /// Size on disk.
    #[serde(default)]
    pub file_size_bytes: Option<u64>,
    /// Server-authoritative status.
    pub status: AudioStatus,
    /// Last processing failure, if any.
    #[serde(default)]
    pub error_message: Option<String>,
    /// First book page covered by this recording.
    #[serde(default)]
    pub page_start: Option<i64>,
    /// Last book page covered by this recording.
    #[serde(default)]
    pub page_end: Option<i64>,
    /// Precomputed normalized amplitudes (0..1).
    #[serde(default)]
    pub waveform_peaks: Option<Vec<f32>>,
    /// Number of derived segments.
    #[serde(default)]
    pub segment_count: Option<u32>,
    /// Upload timestamp (ISO-8601).
    #[serde(default)]
    pub created_at: Option<String>,
}

impl AudioFile {
    /// Peaks as a slice, empty when the server has none yet.
    pub fn peaks(&self) -> &[f32] {
        self.waveform_peaks.as_deref().unwrap_or(&[])
    }
}

/// A time-bounded slice of an audio asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Server id.
    pub id: i64,
    /// Position within the parent asset.
    pub segment_index: u32,
    /// Playable URL once the segment has been cut.
    #[serde(default)]
    pub file_url: Option<String>,
    /// Start offset in milliseconds.
    pub start_ms: i64,
    /// End offset in milliseconds.
    pub end_ms: i64,
    /// Length in milliseconds.
    #[serde(default)]
    pub duration_ms: i64,
    /// Silence (`true`) or content (`false`).
    #[serde(default)]
    pub is_silence: bool,
    /// Optional editorial label.
    #[serde(default)]
    pub label: Option<String>,
}

/// Text analysis state of a book page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PageStatus {
    /// No image or text yet.
    Empty,
    /// Queued for analysis.
    Pending,
    /// Analysis running.
    Analyzing,
    /// Analysed, awaiting review.
    Draft,
    /// Visible to readers.
    Published,
    /// Analysis failed.
    Error,
}

impl PageStatus {
    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            PageStatus::Empty => "empty",
            PageStatus::Pending => "pending",
            PageStatus::Analyzing => "analyzing",
            PageStatus::Draft => "draft",
            PageStatus::Published => "published",
            PageStatus::Error => "error",
        }
    }
}

impl From<String> for PageStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => PageStatus::Pending,
            "analyzing" => PageStatus::Analyzing,
            "draft" => PageStatus::Draft,
            "published" => PageStatus::Published,
            "error" => PageStatus::Error,
            _ => PageStatus::Empty,
        }
    }
}

impl From<PageStatus> for String {
    fn from(status: PageStatus) -> Self {
        status.as_str().to_string()
    }
}

/// One page of the book as listed in the admin grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSummary {
    /// Server id.
    pub id: i64,
    /// 1-based page number.
    pub page_number: i64,
    /// Processed page image.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Original scan, used when no processed image exists.
    #[serde(default)]
    pub source_image_url: Option<String>,
    /// Analysis state.
    #[serde(default = "default_page_status")]
    pub analysis_status: PageStatus,
    /// Number of text units on the page.
    #[serde(default)]
    pub unit_count: Option<u32>,
}

fn default_page_status() -> PageStatus {
    PageStatus::Empty
}

impl PageSummary {
    /// Best available image for the thumbnail.
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .or(self.source_image_url.as_deref())
            .filter(|url| !url.trim().is_empty())
    }
}

/// A chapter of the book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    /// Server id.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// 0-based ordering key.
    pub sort_order: i64,
    /// First page, when known.
    #[serde(default)]
    pub start_page: Option<i64>,
    /// Last page, when known.
    #[serde(default)]
    pub end_page: Option<i64>,
}

/// Book detail returned by the admin book endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Title.
    pub title: String,
    /// Author, if recorded.
    #[serde(default)]
    pub author: Option<String>,
    /// Page count.
    #[serde(default)]
    pub total_pages: i64,
    /// Current manifest version.
    #[serde(default)]
    pub manifest_version: i64,
    /// Whether readers can see the book.
    #[serde(default)]
    pub is_published: bool,
    /// Table of contents.
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

/// Server-side summary of the book structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Page count.
    pub total_pages: i64,
    /// Text unit count.
    pub total_units: i64,
    /// Audio segment count.
    pub total_segments: i64,
    /// Published manifest version.
    pub version: i64,
}

/// A reader-submitted suggestion or bug report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackItem {
    /// Sender name.
    #[serde(default)]
    pub name: String,
    /// Sender phone.
    #[serde(default)]
    pub phone: String,
    /// `taklif` (suggestion) or `xatolik` (error report).
    #[serde(default)]
    pub feedback_type: String,
    /// Free text.
    #[serde(default)]
    pub details: String,
    /// Whether the Telegram notification went out.
    #[serde(default)]
    pub telegram_sent: bool,
    /// Submission timestamp (ISO-8601).
    #[serde(default)]
    pub created_at: String,
}

/// Feedback filter values accepted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    /// Suggestion.
    Suggestion,
    /// Error report.
    Bug,
}

impl FeedbackKind {
    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackKind::Suggestion => "taklif",
            FeedbackKind::Bug => "xatolik",
        }
    }

    /// Parse a filter value; empty or unknown means "no filter".
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "taklif" => Some(FeedbackKind::Suggestion),
            "xatolik" => Some(FeedbackKind::Bug),
            _ => None,
        }
    }
}

/// One key-value row from the settings endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingEntry {
    /// Setting key.
    pub key: String,
    /// Setting value, absent when unset.
    #[serde(default)]
    pub value: Option<String>,
}

/// One audit log row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Action name.
    pub action: String,
    /// Affected entity type.
    #[serde(default)]
    pub entity_type: Option<String>,
    /// Affected entity id.
    #[serde(default)]
    pub entity_id: Option<i64>,
    /// Free-form JSON details.
    #[serde(default)]
    pub details: Option<serde_json::Value>,
    /// Timestamp (ISO-8601).
    #[serde(default)]
    pub created_at: String,
}

/// Login form payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Administrator name.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Successful login reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token.
    pub access_token: String,
}

/// Resolved playback location of a whole asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSource {
    /// Playable URL.
    pub url: String,
    /// Display name.
    #[serde(default)]
    pub filename: Option<String>,
}

/// Generic `{ "message": ... }` reply of action endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionMessage {
    /// Human readable result.
    #[serde(default)]
    pub message: String,
}

/// Reply of the publish endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishResult {
    /// Human readable result.
    #[serde(default)]
    pub message: String,
    /// New manifest version.
    pub version: i64,
}

/// Telegram notification settings payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TelegramSettings {
    /// Bot token.
    pub bot_token: String,
    /// Comma-separated chat ids.
    pub chat_ids: String,
}

/// Reply of the Telegram connectivity test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelegramTestResult {
    /// Whether the test message was delivered.
    pub success: bool,
    /// Human readable result.
    #[serde(default)]
    pub message: String,
}

/// Reply of the PDF import endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportTask {
    /// Background task id.
    pub task_id: String,
}

/// Reply of the page image upload endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedPage {
    /// Analysis state after upload.
    pub analysis_status: PageStatus,
}

/// Payload for creating a text unit on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTextUnit {
    /// Unit text.
    pub text_content: String,
    /// Unit kind (e.g. `word`, `line`).
    pub unit_type: String,
    /// Bounding box left edge.
    pub bbox_x: f64,
    /// Bounding box top edge.
    pub bbox_y: f64,
    /// Bounding box width.
    pub bbox_w: f64,
    /// Bounding box height.
    pub bbox_h: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_file_tolerates_missing_optional_fields() {
        let file: AudioFile = serde_json::from_value(serde_json::json!({
            "id": 7,
            "original_filename": "Dars 1.mp3",
            "status": "uploaded"
        }))
        .expect("decode audio file");

        assert_eq!(file.status, AudioStatus::Uploaded);
        assert!(file.peaks().is_empty());
        assert_eq!(file.segment_count, None);
    }

    #[test]
    fn unknown_audio_status_is_preserved() {
        let status = AudioStatus::from("archived".to_string());
        assert_eq!(status, AudioStatus::Other("archived".to_string()));
        assert_eq!(status.to_string(), "archived");
        assert!(!status.allows_cut());
    }

    #[test]
    fn cut_is_allowed_only_after_segmentation() {
        assert!(AudioStatus::Segmented.allows_cut());
        assert!(AudioStatus::Ready.allows_cut());
        assert!(!AudioStatus::Uploaded.allows_cut());
        assert!(!AudioStatus::Processing.allows_cut());
        assert!(!AudioStatus::Error.allows_cut());
    }

    #[test]
    fn unknown_page_status_falls_back_to_empty() {
        let page: PageSummary = serde_json::from_value(serde_json::json!({
            "id": 1,
            "page_number": 3,
            "analysis_status": "weird",
            "source_image_url": "/media/p3.png"
        }))
        .expect("decode page");

        assert_eq!(page.analysis_status, PageStatus::Empty);
        assert_eq!(page.thumbnail_url(), Some("/media/p3.png"));
    }

    #[test]
    fn feedback_filter_parses_known_kinds_only() {
        assert_eq!(FeedbackKind::parse("taklif"), Some(FeedbackKind::Suggestion));
        assert_eq!(FeedbackKind::parse(" xatolik "), Some(FeedbackKind::Bug));
        assert_eq!(FeedbackKind::parse(""), None);
    }
}
