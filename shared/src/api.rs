//! Transport-independent half of the API client.
//!
//! The browser transport lives in the frontend crate; everything that decides
//! *what* a response means (session expiry, server error text, empty bodies)
//! is here so it can be tested on the host.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Fixed message shown when the backend rejects the bearer token.
pub const SESSION_EXPIRED_MESSAGE: &str = "Sessiya tugadi";

/// Failure of a single backend call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// HTTP 401: the session is gone and the user must log in again.
    #[error("{}", SESSION_EXPIRED_MESSAGE)]
    SessionExpired,
    /// Any other non-2xx status.
    #[error("{message}")]
    Request {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, or a generic status-coded one.
        message: String,
    },
    /// The request never produced a response.
    #[error("Tarmoq xatosi: {0}")]
    Network(String),
    /// The response body did not match the expected shape.
    #[error("Javobni o'qib bo'lmadi: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether this failure ends the session.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired)
    }
}

/// Successful response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// HTTP 204 or an empty 2xx body. Distinct from a JSON `null`.
    Empty,
    /// Parsed JSON body, `Value::Null` included.
    Json(Value),
}

impl Reply {
    /// True for [`Reply::Empty`] only.
    pub fn is_empty(&self) -> bool {
        matches!(self, Reply::Empty)
    }

    /// Decode the body into `T`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Decode`] when the body is empty or has the wrong shape.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match self {
            Reply::Empty => Err(ApiError::Decode("bo'sh javob".to_string())),
            Reply::Json(value) => {
                serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
            },
        }
    }
}

/// Body kind of an outbound request, as far as headers are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// No body or a JSON body.
    Json,
    /// Multipart form upload; the browser sets the boundary header itself.
    Form,
}

/// Headers to attach to a request.
pub fn request_headers(token: Option<&str>, payload: PayloadKind) -> Vec<(&'static str, String)> {
    let mut headers = Vec::with_capacity(2);
    if let Some(token) = token.map(str::trim).filter(|token| !token.is_empty()) {
        headers.push(("Authorization", format!("Bearer {token}")));
    }
    if payload == PayloadKind::Json {
        headers.push(("Content-Type", "application/json".to_string()));
    }
    headers
}

/// Turn a raw status + body into a reply or a single error.
///
/// # Errors
///
/// [`ApiError::SessionExpired`] on 401, [`ApiError::Request`] on any other
/// non-2xx status, [`ApiError::Decode`] when a 2xx body is not JSON.
pub fn interpret(status: u16, body: &str) -> Result<Reply, ApiError> {
    if status == 401 {
        tracing::debug!("backend answered 401, session expired");
        return Err(ApiError::SessionExpired);
    }

    if !(200..300).contains(&status) {
        let message = server_message(body).unwrap_or_else(|| format!("Xatolik: {status}"));
        return Err(ApiError::Request {
            status,
            message,
        });
    }

    if status == 204 || body.trim().is_empty() {
        return Ok(Reply::Empty);
    }

    serde_json::from_str(body)
        .map(Reply::Json)
        .map_err(|err| ApiError::Decode(err.to_string()))
}

fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["detail", "message"].iter().find_map(|field| {
        value
            .get(*field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    })
}

/// Backend routes consumed by the console, relative to the API base.
pub mod endpoints {
    use crate::models::FeedbackKind;

    /// `POST` credentials, returns a bearer token.
    pub const LOGIN: &str = "/admin/auth/login";
    /// `GET` manifest summary.
    pub const MANIFEST: &str = "/manifest";
    /// `GET` book detail with chapters.
    pub const BOOK: &str = "/admin/book";
    /// `GET` page list.
    pub const PAGES: &str = "/admin/book/pages";
    /// `POST` multipart page image.
    pub const PAGE_IMAGE_UPLOAD: &str = "/admin/book/pages/upload-image";
    /// `POST` multipart PDF.
    pub const PDF_IMPORT: &str = "/admin/book/import-pdf";
    /// `PUT` publish the book.
    pub const PUBLISH: &str = "/admin/book/publish";
    /// `GET` audio asset list.
    pub const AUDIO_FILES: &str = "/admin/audio/files";
    /// `POST` multipart audio upload.
    pub const AUDIO_UPLOAD: &str = "/admin/audio/upload";
    /// `GET` key-value settings.
    pub const SETTINGS: &str = "/admin/settings";
    /// `PUT` Telegram settings.
    pub const TELEGRAM_SETTINGS: &str = "/admin/telegram-settings";
    /// `POST` Telegram connectivity test.
    pub const TELEGRAM_TEST: &str = "/admin/telegram-test";
    /// `GET` audit log.
    pub const AUDIT_LOG: &str = "/admin/audit-log";

    /// `POST` a text unit onto a page.
    pub fn page_units(page_id: i64) -> String {
        format!("/admin/book/pages/{page_id}/units")
    }

    /// `DELETE` a chapter.
    pub fn chapter(chapter_id: i64) -> String {
        format!("/admin/book/chapters/{chapter_id}")
    }

    /// `DELETE` an audio asset.
    pub fn audio_file(audio_id: i64) -> String {
        format!("{AUDIO_FILES}/{audio_id}")
    }

    /// `GET` the playable URL of an asset.
    pub fn audio_play(audio_id: i64) -> String {
        format!("{AUDIO_FILES}/{audio_id}/play")
    }

    /// `POST` blocking server-side processing.
    pub fn audio_process(audio_id: i64) -> String {
        format!("{AUDIO_FILES}/{audio_id}/sync-process")
    }

    /// `POST` blocking segment cutting.
    pub fn audio_cut(audio_id: i64) -> String {
        format!("{AUDIO_FILES}/{audio_id}/sync-cut")
    }

    /// `GET` ordered segments of an asset.
    pub fn audio_segments(audio_id: i64) -> String {
        format!("{AUDIO_FILES}/{audio_id}/segments")
    }

    /// `GET` feedback, optionally filtered by type.
    pub fn feedback(kind: Option<FeedbackKind>) -> String {
        match kind {
            Some(kind) => format!("/admin/feedback?feedback_type={}", kind.as_str()),
            None => "/admin/feedback".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeedbackKind, Manifest};

    #[test]
    fn unauthorized_is_session_expired_regardless_of_body() {
        let err = interpret(401, r#"{"detail":"token expired"}"#).expect_err("401 must fail");
        assert_eq!(err, ApiError::SessionExpired);
        assert_eq!(err.to_string(), SESSION_EXPIRED_MESSAGE);
    }

    #[test]
    fn server_detail_becomes_error_message() {
        let err = interpret(400, r#"{"detail":"Faqat MP3 fayl qabul qilinadi"}"#)
            .expect_err("400 must fail");
        assert_eq!(
            err,
            ApiError::Request {
                status: 400,
                message: "Faqat MP3 fayl qabul qilinadi".to_string(),
            }
        );
    }

    #[test]
    fn message_field_is_used_when_detail_is_missing() {
        let err = interpret(409, r#"{"message":"busy"}"#).expect_err("409 must fail");
        assert_eq!(err.to_string(), "busy");
    }

    #[test]
    fn missing_server_message_falls_back_to_status_code() {
        let err = interpret(502, "<html>bad gateway</html>").expect_err("502 must fail");
        assert_eq!(err.to_string(), "Xatolik: 502");

        let err = interpret(500, r#"{"detail":"   "}"#).expect_err("500 must fail");
        assert_eq!(err.to_string(), "Xatolik: 500");
    }

    #[test]
    fn no_content_is_distinct_from_json_null() {
        assert_eq!(interpret(204, ""), Ok(Reply::Empty));
        assert_eq!(interpret(200, "null"), Ok(Reply::Json(Value::Null)));
        assert!(interpret(204, "").expect("204").is_empty());
    }

    #[test]
    fn reply_decodes_typed_bodies() {
        let reply = interpret(
            200,
            r#"{"total_pages":40,"total_units":900,"total_segments":1200,"version":3}"#,
        )
        .expect("200");
        let manifest: Manifest = reply.decode().expect("manifest");
        assert_eq!(manifest.total_segments, 1200);

        let err = Reply::Empty.decode::<Manifest>().expect_err("empty cannot decode");
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn malformed_success_body_is_a_decode_error() {
        assert!(matches!(interpret(200, "{not json"), Err(ApiError::Decode(_))));
    }

    #[test]
    fn bearer_header_only_with_token() {
        let headers = request_headers(Some("abc"), PayloadKind::Json);
        assert_eq!(
            headers,
            vec![
                ("Authorization", "Bearer abc".to_string()),
                ("Content-Type", "application/json".to_string()),
            ]
        );

        let anonymous = request_headers(None, PayloadKind::Json);
        assert_eq!(anonymous, vec![("Content-Type", "application/json".to_string())]);
    }

    #[test]
    fn form_uploads_skip_json_content_type() {
        let headers = request_headers(Some("abc"), PayloadKind::Form);
        assert_eq!(headers, vec![("Authorization", "Bearer abc".to_string())]);
    }

    #[test]
    fn endpoint_paths_match_backend_routes() {
        assert_eq!(endpoints::audio_cut(5), "/admin/audio/files/5/sync-cut");
        assert_eq!(endpoints::audio_segments(5), "/admin/audio/files/5/segments");
        assert_eq!(
            endpoints::feedback(Some(FeedbackKind::Bug)),
            "/admin/feedback?feedback_type=xatolik"
        );
        assert_eq!(endpoints::feedback(None), "/admin/feedback");
        assert_eq!(endpoints::chapter(2), "/admin/book/chapters/2");
    }
}
