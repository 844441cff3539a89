use gloo_net::http::{Request, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use soniy_admin_shared::{
    api::{self, endpoints, ApiError, PayloadKind, Reply},
    models::{
        ActionMessage, AudioFile, AuditEntry, Book, FeedbackItem, FeedbackKind, ImportTask,
        LoginRequest, LoginResponse, Manifest, NewTextUnit, PageSummary, PlaybackSource,
        PublishResult, Segment, SettingEntry, TelegramSettings, TelegramTestResult, UploadedPage,
    },
    session::TokenStorage,
};
use web_sys::{File, FormData};
use yew::Callback;

use crate::{
    config::{self, DEFAULT_BOOK_ID},
    storage::BrowserStorage,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Put,
    Delete,
}

enum Body {
    None,
    Json(String),
    Form(FormData),
}

/// Backend client bound to the current session token.
///
/// A 401 on any call clears the stored token before `on_expired` fires, so
/// calls issued afterwards already go out unauthenticated.
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    token: Option<String>,
    on_expired: Callback<()>,
}

impl ApiClient {
    pub fn new(token: Option<String>, on_expired: Callback<()>) -> Self {
        Self {
            token,
            on_expired,
        }
    }

    /// Client without a token, for the login call.
    pub fn anonymous() -> Self {
        Self::new(None, Callback::noop())
    }

    async fn call(&self, method: Method, path: &str, body: Body) -> Result<Reply, ApiError> {
        let url = config::api_url(path);
        let payload = match body {
            Body::Form(_) => PayloadKind::Form,
            _ => PayloadKind::Json,
        };
        let mut builder: RequestBuilder = match method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Put => Request::put(&url),
            Method::Delete => Request::delete(&url),
        };
        for (name, value) in api::request_headers(self.token.as_deref(), payload) {
            builder = builder.header(name, &value);
        }
        let request = match body {
            Body::None => builder.build(),
            Body::Json(text) => builder.body(text),
            Body::Form(form) => builder.body(form),
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;

        let response = request.send().await.map_err(|e| {
            web_sys::console::error_1(&format!("Request to {path} failed: {e}").into());
            ApiError::Network(e.to_string())
        })?;
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        match api::interpret(status, &text) {
            Err(ApiError::SessionExpired) => {
                BrowserStorage.clear();
                self.on_expired.emit(());
                Err(ApiError::SessionExpired)
            },
            other => other,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.call(Method::Get, path, Body::None).await?.decode()
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        payload: &B,
    ) -> Result<Reply, ApiError> {
        let text = serde_json::to_string(payload).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.call(method, path, Body::Json(text)).await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let payload = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.send_json(Method::Post, endpoints::LOGIN, &payload)
            .await?
            .decode()
    }

    pub async fn fetch_manifest(&self) -> Result<Manifest, ApiError> {
        self.get(endpoints::MANIFEST).await
    }

    pub async fn fetch_book(&self) -> Result<Book, ApiError> {
        self.get(endpoints::BOOK).await
    }

    pub async fn publish_book(&self) -> Result<PublishResult, ApiError> {
        self.call(Method::Put, endpoints::PUBLISH, Body::None)
            .await?
            .decode()
    }

    pub async fn delete_chapter(&self, chapter_id: i64) -> Result<(), ApiError> {
        self.call(Method::Delete, &endpoints::chapter(chapter_id), Body::None)
            .await
            .map(|_| ())
    }

    pub async fn fetch_pages(&self) -> Result<Vec<PageSummary>, ApiError> {
        self.get(endpoints::PAGES).await
    }

    pub async fn upload_page_image(
        &self,
        file: &File,
        page_number: &str,
    ) -> Result<UploadedPage, ApiError> {
        let form = file_form(file, &[("page_number", page_number)])?;
        self.call(Method::Post, endpoints::PAGE_IMAGE_UPLOAD, Body::Form(form))
            .await?
            .decode()
    }

    pub async fn import_pdf(&self, file: &File) -> Result<ImportTask, ApiError> {
        let form = file_form(file, &[])?;
        self.call(Method::Post, endpoints::PDF_IMPORT, Body::Form(form))
            .await?
            .decode()
    }

    pub async fn create_text_unit(&self, page_id: i64, unit: &NewTextUnit) -> Result<(), ApiError> {
        self.send_json(Method::Post, &endpoints::page_units(page_id), unit)
            .await
            .map(|_| ())
    }

    pub async fn fetch_audio_files(&self) -> Result<Vec<AudioFile>, ApiError> {
        self.get(endpoints::AUDIO_FILES).await
    }

    pub async fn upload_audio(&self, file: &File) -> Result<(), ApiError> {
        let book_id = DEFAULT_BOOK_ID.to_string();
        let form = file_form(file, &[("book_id", book_id.as_str())])?;
        self.call(Method::Post, endpoints::AUDIO_UPLOAD, Body::Form(form))
            .await
            .map(|_| ())
    }

    pub async fn delete_audio(&self, audio_id: i64) -> Result<(), ApiError> {
        self.call(Method::Delete, &endpoints::audio_file(audio_id), Body::None)
            .await
            .map(|_| ())
    }

    pub async fn fetch_playback(&self, audio_id: i64) -> Result<PlaybackSource, ApiError> {
        self.get(&endpoints::audio_play(audio_id)).await
    }

    pub async fn process_audio(&self, audio_id: i64) -> Result<ActionMessage, ApiError> {
        self.call(Method::Post, &endpoints::audio_process(audio_id), Body::None)
            .await
            .and_then(action_message)
    }

    pub async fn cut_audio(&self, audio_id: i64) -> Result<ActionMessage, ApiError> {
        self.call(Method::Post, &endpoints::audio_cut(audio_id), Body::None)
            .await
            .and_then(action_message)
    }

    pub async fn fetch_segments(&self, audio_id: i64) -> Result<Vec<Segment>, ApiError> {
        self.get(&endpoints::audio_segments(audio_id)).await
    }

    pub async fn fetch_feedback(
        &self,
        kind: Option<FeedbackKind>,
    ) -> Result<Vec<FeedbackItem>, ApiError> {
        self.get(&endpoints::feedback(kind)).await
    }

    pub async fn fetch_settings(&self) -> Result<Vec<SettingEntry>, ApiError> {
        self.get(endpoints::SETTINGS).await
    }

    pub async fn save_telegram(&self, settings: &TelegramSettings) -> Result<(), ApiError> {
        self.send_json(Method::Put, endpoints::TELEGRAM_SETTINGS, settings)
            .await
            .map(|_| ())
    }

    pub async fn test_telegram(&self) -> Result<TelegramTestResult, ApiError> {
        self.call(Method::Post, endpoints::TELEGRAM_TEST, Body::None)
            .await?
            .decode()
    }

    pub async fn fetch_audit_log(&self) -> Result<Vec<AuditEntry>, ApiError> {
        self.get(endpoints::AUDIT_LOG).await
    }
}

/// Action endpoints may answer 204; treat that as a message-less success.
fn action_message(reply: Reply) -> Result<ActionMessage, ApiError> {
    if reply.is_empty() {
        return Ok(ActionMessage {
            message: String::new(),
        });
    }
    reply.decode()
}

fn file_form(file: &File, fields: &[(&str, &str)]) -> Result<FormData, ApiError> {
    let form_error = |_| ApiError::Network("FormData yaratib bo'lmadi".to_string());
    let form = FormData::new().map_err(form_error)?;
    form.append_with_blob("file", file).map_err(form_error)?;
    for (name, value) in fields {
        form.append_with_str(name, value).map_err(form_error)?;
    }
    Ok(form)
}
