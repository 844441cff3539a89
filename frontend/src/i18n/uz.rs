pub mod common {
    pub const APP_NAME: &str = "Muallimi Soniy";
    pub const LOADING: &str = "Yuklanmoqda...";
    pub const NO_DATA: &str = "Ma'lumot yo'q";
    pub const CANCEL: &str = "Bekor qilish";
    pub const CONFIRM: &str = "Tasdiqlash";
    pub const CLOSE: &str = "Yopish";
    pub const SAVE: &str = "Saqlash";
    pub const ERROR: &str = "Xatolik";
}

pub mod login {
    pub const TITLE: &str = "Admin panel";
    pub const USERNAME: &str = "Login";
    pub const PASSWORD: &str = "Parol";
    pub const SUBMIT: &str = "Kirish";
    pub const SUBMITTING: &str = "Kirilmoqda...";
    pub const BAD_CREDENTIALS: &str = "Login yoki parol noto'g'ri";
}

pub mod shell {
    pub const LOGOUT: &str = "🚪 Chiqish";
    pub const TOGGLE_MENU: &str = "Menyuni ochish";
}

pub mod nav {
    pub const DASHBOARD_ICON: &str = "📊";
    pub const BOOK_ICON: &str = "📖";
    pub const PAGES_ICON: &str = "📄";
    pub const AUDIO_ICON: &str = "🎵";
    pub const WAVEFORM_ICON: &str = "〰️";
    pub const FEEDBACK_ICON: &str = "💬";
    pub const SETTINGS_ICON: &str = "⚙️";
    pub const AUDIT_ICON: &str = "📋";
}

pub mod dashboard {
    pub const PAGES: &str = "Sahifalar";
    pub const UNITS: &str = "Matn birliklari";
    pub const SEGMENTS: &str = "Audio segmentlar";
    pub const VERSION: &str = "Manifest versiya";
    pub const PUBLISH: &str = "🚀 Nashr qilish";
    pub const PUBLISH_CONFIRM: &str =
        "Kitobni nashr qilishni tasdiqlaysizmi? Bu manifest versiyasini oshiradi.";
    pub const PUBLISHED_TEMPLATE: &str = "✅ {} (v{})";
}

pub mod book {
    pub const NAME: &str = "Nomi:";
    pub const AUTHOR: &str = "Muallif:";
    pub const TOTAL_PAGES: &str = "Jami sahifalar:";
    pub const VERSION: &str = "Manifest versiya:";
    pub const STATE: &str = "Holat:";
    pub const CHAPTERS: &str = "Boblar";
    pub const NO_CHAPTERS: &str = "Boblar yo'q";
    pub const DELETE_CHAPTER_CONFIRM: &str = "Bu bobni o'chirishni tasdiqlaysizmi?";
}

pub mod pages {
    pub const EMPTY: &str = "Sahifalar yo'q. PDF import qiling yoki rasm yuklang.";
    pub const IMPORT_PDF: &str = "📥 PDF import";
    pub const UPLOAD_IMAGE: &str = "🖼️ Rasm yuklash";
    pub const PAGE_NUMBER_PROMPT: &str = "Sahifa raqamini kiriting:";
    pub const PAGE_LABEL_TEMPLATE: &str = "Sahifa {}";
    pub const UNIT_COUNT_TEMPLATE: &str = "{} unit";
    pub const IMAGE_UPLOADED_TEMPLATE: &str = "✅ Rasm yuklandi! Status: {}";
    pub const IMPORT_STARTED_TEMPLATE: &str = "PDF import boshlandi! Task ID: {}";
    pub const OPEN_EDITOR: &str = "✏️ Tahrirlash";
    pub const ADD_UNIT: &str = "➕ Matn birligi";
    pub const UNIT_MODAL_TITLE_TEMPLATE: &str = "Sahifa {}: yangi matn birligi";
    pub const UNIT_TEXT: &str = "Matn";
    pub const UNIT_TYPE: &str = "Turi";
    pub const UNIT_TYPES: [&str; 3] = ["word", "line", "block"];
    pub const BBOX_X: &str = "X";
    pub const BBOX_Y: &str = "Y";
    pub const BBOX_W: &str = "Kenglik";
    pub const BBOX_H: &str = "Balandlik";
    pub const UNIT_CREATED: &str = "✅ Matn birligi qo'shildi";
    pub const INVALID_NUMBER: &str = "Koordinatalar son bo'lishi kerak";
}

pub mod audio {
    pub const UPLOAD: &str = "📤 Audio yuklash";
    pub const UPLOADED: &str = "Audio yuklandi!";
    pub const STAT_TOTAL: &str = "audio fayl";
    pub const STAT_READY: &str = "tayyor";
    pub const STAT_SEGMENTED: &str = "segmentlangan";
    pub const STAT_SEGMENTS: &str = "jami segment";
    pub const EMPTY_TITLE: &str = "Audio fayllar yo'q";
    pub const EMPTY_HINT: &str = "Audio yuklash tugmasini bosing";
    pub const PLAY: &str = "Tinglash";
    pub const PROCESS: &str = "🔄 Qayta ishlash";
    pub const PROCESSING: &str = "⏳ Ishlanmoqda...";
    pub const CUT: &str = "✂️ Segmentlarni kesish";
    pub const CUTTING: &str = "⏳ Kesilmoqda...";
    pub const DELETE: &str = "🗑️ O'chirish";
    pub const DELETE_CONFIRM: &str =
        "Bu audio faylni o'chirishni tasdiqlaysizmi? Barcha segmentlar ham o'chiriladi.";
    pub const SEGMENT_COUNT_TEMPLATE: &str = "{} segment";
    pub const SEGMENTS_TEMPLATE: &str = "Segmentlar ({})";
    pub const NO_SEGMENTS: &str = "Segmentlar yo'q. \"Qayta ishlash\" tugmasini bosing.";
    pub const SEGMENT_TITLE_TEMPLATE: &str = "Segment #{}";
    pub const SILENCE_ICON: &str = "🔇";
    pub const CONTENT_ICON: &str = "🔊";
}

pub mod waveform {
    pub const SELECT_PLACEHOLDER: &str = "Audio tanlang...";
    pub const ZOOM_IN: &str = "🔍+";
    pub const ZOOM_OUT: &str = "🔍−";
    pub const SPEED: &str = "Tezlik";
    pub const SILENCE: &str = "🔇 Jimlik";
    pub const CONTENT: &str = "🔊 Kontent";
    pub const PREVIEW: &str = "▶️";
    pub const OPTION_TEMPLATE: &str = "{} ({})";
}

pub mod feedback {
    pub const FILTER_ALL: &str = "Barchasi";
    pub const FILTER_SUGGESTION: &str = "📝 Takliflar";
    pub const FILTER_BUG: &str = "🐛 Xatoliklar";
    pub const COLUMNS: [&str; 7] = ["#", "Ism", "Telefon", "Turi", "Tafsilot", "Telegram", "Sana"];
}

pub mod settings {
    pub const TELEGRAM_TITLE: &str = "Telegram bildirishnomalari";
    pub const BOT_TOKEN: &str = "Bot token";
    pub const CHAT_IDS: &str = "Chat ID lar (vergul bilan)";
    pub const TEST: &str = "📨 Sinov xabari";
    pub const SAVED: &str = "Sozlamalar saqlandi!";
}

pub mod audit {
    pub const COLUMNS: [&str; 6] = ["#", "Amal", "Obyekt turi", "Obyekt ID", "Tafsilot", "Sana"];
}

pub mod player {
    pub const PLAY: &str = "▶️";
    pub const PAUSE: &str = "⏸️";
    pub const CLOSE: &str = "✕";
    pub const DEFAULT_TITLE: &str = "Audio";
    pub const VOLUME: &str = "Ovoz";
}
