use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single gateway call.
///
/// Backend errors carry the `{ detail }` body verbatim when the backend
/// supplied one; any other body shape degrades to a generic message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("網路錯誤：{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{}", backend_message(.status, .detail))]
    Backend {
        status: StatusCode,
        detail: Option<String>,
    },
}

fn backend_message(status: &StatusCode, detail: &Option<String>) -> String {
    match detail {
        Some(d) => d.clone(),
        None => format!("伺服器錯誤 ({status})"),
    }
}

impl ApiError {
    /// Message suitable for a transient notice. Backend detail is passed
    /// through untouched; everything else gets a generic rendering.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
