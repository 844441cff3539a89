//! View models for the console panels.
//!
//! Each function turns a decoded response into exactly what a panel renders,
//! so the Yew components stay free of formatting decisions.

use crate::models::{
    AudioStatus, AuditEntry, Book, Chapter, FeedbackItem, Manifest, PageStatus, SettingEntry,
    TelegramSettings,
};

/// Placeholder for a missing value.
pub const MISSING: &str = "—";
/// Settings key of the Telegram bot token.
pub const BOT_TOKEN_KEY: &str = "telegram_bot_token";
/// Settings key of the Telegram chat id list.
pub const CHAT_IDS_KEY: &str = "telegram_chat_ids";

/// The four dashboard counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    /// Page count.
    pub pages: i64,
    /// Text unit count.
    pub units: i64,
    /// Audio segment count.
    pub segments: i64,
    /// `v{version}`.
    pub version: String,
}

impl From<&Manifest> for DashboardStats {
    fn from(manifest: &Manifest) -> Self {
        Self {
            pages: manifest.total_pages,
            units: manifest.total_units,
            segments: manifest.total_segments,
            version: version_label(manifest.version),
        }
    }
}

/// `v3` for version 3.
pub fn version_label(version: i64) -> String {
    format!("v{version}")
}

/// Icon + label + css class of a status pill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    /// Leading emoji.
    pub icon: &'static str,
    /// Text.
    pub label: String,
    /// Extra css class, possibly empty.
    pub class: &'static str,
}

impl StatusBadge {
    fn new(icon: &'static str, label: &str, class: &'static str) -> Self {
        Self {
            icon,
            label: label.to_string(),
            class,
        }
    }

    /// Badge of an audio asset.
    pub fn audio(status: &AudioStatus) -> Self {
        match status {
            AudioStatus::Uploaded => Self::new("📤", "Yuklangan", "status-uploaded"),
            AudioStatus::Processing => Self::new("⏳", "Ishlanmoqda", "status-processing"),
            AudioStatus::Segmented => Self::new("📊", "Segmentlangan", "status-segmented"),
            AudioStatus::Ready => Self::new("✅", "Tayyor", "status-ready"),
            AudioStatus::Error => Self::new("❌", "Xatolik", "status-error"),
            AudioStatus::Other(raw) => Self::new("❓", raw, ""),
        }
    }

    /// Badge of a page thumbnail.
    pub fn page(status: PageStatus) -> Self {
        match status {
            PageStatus::Empty => Self::new("⚪", "Bo'sh", ""),
            PageStatus::Pending => Self::new("⏳", "Kutilmoqda", "text-warning"),
            PageStatus::Analyzing => Self::new("🔄", "Tahlil...", "text-info"),
            PageStatus::Draft => Self::new("📝", "Qoralama", "text-warning"),
            PageStatus::Published => Self::new("✅", "Nashr", "text-success"),
            PageStatus::Error => Self::new("❌", "Xatolik", "text-danger"),
        }
    }

    /// `icon label` as one string.
    pub fn text(&self) -> String {
        format!("{} {}", self.icon, self.label)
    }
}

/// Book header lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSummary {
    /// Title.
    pub title: String,
    /// Author or [`MISSING`].
    pub author: String,
    /// Page count.
    pub total_pages: i64,
    /// `v{n}`.
    pub version: String,
    /// Publication state line.
    pub state: &'static str,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: non_blank(book.author.as_deref()).unwrap_or(MISSING).to_string(),
            total_pages: book.total_pages,
            version: version_label(book.manifest_version),
            state: if book.is_published { "✅ Nashr qilingan" } else { "⏳ Qoralama" },
        }
    }
}

/// One chapter line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterRow {
    /// Chapter id, for the delete action.
    pub id: i64,
    /// 1-based position.
    pub number: i64,
    /// Title.
    pub title: String,
    /// `Sahifalar: a — b` with `?` for unknown bounds.
    pub pages: String,
}

/// Chapter lines in `sort_order`.
pub fn chapter_rows(chapters: &[Chapter]) -> Vec<ChapterRow> {
    let mut sorted: Vec<&Chapter> = chapters.iter().collect();
    sorted.sort_by_key(|chapter| chapter.sort_order);
    sorted
        .into_iter()
        .map(|chapter| ChapterRow {
            id: chapter.id,
            number: chapter.sort_order + 1,
            title: chapter.title.clone(),
            pages: format!(
                "Sahifalar: {} — {}",
                page_bound(chapter.start_page),
                page_bound(chapter.end_page)
            ),
        })
        .collect()
}

fn page_bound(page: Option<i64>) -> String {
    page.filter(|page| *page > 0)
        .map_or_else(|| "?".to_string(), |page| page.to_string())
}

/// One feedback table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRow {
    /// 1-based row number.
    pub index: usize,
    /// Sender name.
    pub name: String,
    /// Sender phone.
    pub phone: String,
    /// Type label with icon.
    pub kind: &'static str,
    /// Free text.
    pub details: String,
    /// `✅` or `❌`.
    pub telegram: &'static str,
    /// Raw timestamp; the frontend localizes it.
    pub created_at: String,
}

/// Feedback table rows in server order.
pub fn feedback_rows(items: &[FeedbackItem]) -> Vec<FeedbackRow> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| FeedbackRow {
            index: i + 1,
            name: item.name.clone(),
            phone: item.phone.clone(),
            kind: if item.feedback_type == "taklif" { "📝 Taklif" } else { "🐛 Xatolik" },
            details: item.details.clone(),
            telegram: if item.telegram_sent { "✅" } else { "❌" },
            created_at: item.created_at.clone(),
        })
        .collect()
}

/// One audit table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRow {
    /// 1-based row number.
    pub index: usize,
    /// Action name.
    pub action: String,
    /// Entity type or [`MISSING`].
    pub entity_type: String,
    /// Entity id or [`MISSING`].
    pub entity_id: String,
    /// Compact JSON or [`MISSING`].
    pub details: String,
    /// Raw timestamp; the frontend localizes it.
    pub created_at: String,
}

/// Audit table rows in server order.
pub fn audit_rows(entries: &[AuditEntry]) -> Vec<AuditRow> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| AuditRow {
            index: i + 1,
            action: entry.action.clone(),
            entity_type: non_blank(entry.entity_type.as_deref()).unwrap_or(MISSING).to_string(),
            entity_id: entry
                .entity_id
                .map_or_else(|| MISSING.to_string(), |id| id.to_string()),
            details: entry
                .details
                .as_ref()
                .filter(|details| !details.is_null())
                .map_or_else(|| MISSING.to_string(), |details| details.to_string()),
            created_at: entry.created_at.clone(),
        })
        .collect()
}

/// Pull the Telegram form values out of the key-value settings list.
/// Missing or null keys become empty fields.
pub fn telegram_settings(entries: &[SettingEntry]) -> TelegramSettings {
    let lookup = |key: &str| {
        entries
            .iter()
            .find(|entry| entry.key == key)
            .and_then(|entry| entry.value.clone())
            .unwrap_or_default()
    };
    TelegramSettings {
        bot_token: lookup(BOT_TOKEN_KEY),
        chat_ids: lookup(CHAT_IDS_KEY),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn dashboard_uses_manifest_counts() {
        let manifest = Manifest {
            total_pages: 48,
            total_units: 930,
            total_segments: 412,
            version: 7,
        };
        let stats = DashboardStats::from(&manifest);
        assert_eq!(stats, DashboardStats {
            pages: 48,
            units: 930,
            segments: 412,
            version: "v7".to_string(),
        });
    }

    #[test]
    fn audio_badges_cover_unknown_statuses() {
        assert_eq!(StatusBadge::audio(&AudioStatus::Ready).text(), "✅ Tayyor");
        let other = StatusBadge::audio(&AudioStatus::Other("archived".to_string()));
        assert_eq!(other.text(), "❓ archived");
        assert_eq!(other.class, "");
    }

    #[test]
    fn page_badges_match_statuses() {
        assert_eq!(StatusBadge::page(PageStatus::Draft).text(), "📝 Qoralama");
        assert_eq!(StatusBadge::page(PageStatus::Empty).label, "Bo'sh");
    }

    #[test]
    fn book_summary_fills_missing_author() {
        let book: Book = serde_json::from_value(json!({
            "title": "Muallimi Soniy",
            "author": "  ",
            "total_pages": 48,
            "manifest_version": 2
        }))
        .expect("decode book");
        let summary = BookSummary::from(&book);
        assert_eq!(summary.author, MISSING);
        assert_eq!(summary.version, "v2");
        assert_eq!(summary.state, "⏳ Qoralama");
    }

    #[test]
    fn chapters_are_ordered_and_numbered() {
        let chapters = vec![
            Chapter {
                id: 9,
                title: "Ikkinchi".to_string(),
                sort_order: 1,
                start_page: Some(5),
                end_page: None,
            },
            Chapter {
                id: 3,
                title: "Birinchi".to_string(),
                sort_order: 0,
                start_page: Some(1),
                end_page: Some(4),
            },
        ];
        let rows = chapter_rows(&chapters);
        assert_eq!(rows[0].id, 3);
        assert_eq!(rows[0].number, 1);
        assert_eq!(rows[0].pages, "Sahifalar: 1 — 4");
        assert_eq!(rows[1].pages, "Sahifalar: 5 — ?");
    }

    #[test]
    fn feedback_rows_label_types() {
        let items: Vec<FeedbackItem> = serde_json::from_value(json!([
            { "name": "Ali", "feedback_type": "taklif", "telegram_sent": true },
            { "name": "Vali", "feedback_type": "xatolik" }
        ]))
        .expect("decode feedback");
        let rows = feedback_rows(&items);
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[0].kind, "📝 Taklif");
        assert_eq!(rows[0].telegram, "✅");
        assert_eq!(rows[1].kind, "🐛 Xatolik");
        assert_eq!(rows[1].telegram, "❌");
    }

    #[test]
    fn audit_rows_mark_missing_fields() {
        let entries: Vec<AuditEntry> = serde_json::from_value(json!([
            { "action": "publish", "entity_type": "book", "entity_id": 1, "details": { "version": 3 } },
            { "action": "login", "details": null }
        ]))
        .expect("decode audit");
        let rows = audit_rows(&entries);
        assert_eq!(rows[0].details, r#"{"version":3}"#);
        assert_eq!(rows[0].entity_id, "1");
        assert_eq!(rows[1].entity_type, MISSING);
        assert_eq!(rows[1].entity_id, MISSING);
        assert_eq!(rows[1].details, MISSING);
    }

    #[test]
    fn telegram_settings_are_extracted_by_key() {
        let entries = vec![
            SettingEntry {
                key: CHAT_IDS_KEY.to_string(),
                value: Some("1,2".to_string()),
            },
            SettingEntry {
                key: BOT_TOKEN_KEY.to_string(),
                value: None,
            },
        ];
        let settings = telegram_settings(&entries);
        assert_eq!(settings.chat_ids, "1,2");
        assert_eq!(settings.bot_token, "");
    }
}
