use axum::{
    http::{header::InvalidHeaderValue, StatusCode},
    response::{Html, IntoResponse},
};
use minijinja::context;
use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AppError {
    #[error("There is no corpus at position {index}, the list only contains {len} corpora.")]
    CorpusIndexOutOfRange { index: usize, len: usize },
    #[error("{1}")]
    Rejection(StatusCode, &'static str),
    #[error(transparent)]
    Axum(#[from] axum::http::Error),
    #[error(transparent)]
    InvalidHeaderValue(#[from] InvalidHeaderValue),
    #[error(transparent)]
    Minijinja(#[from] minijinja::Error),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    UrlParsing(#[from] url::ParseError),
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
    #[error(transparent)]
    Session(#[from] tower_sessions::session::SessionError),
    #[error(transparent)]
    Sqlx(#[from] tower_sessions::sqlx::Error),
}

impl From<(StatusCode, &'static str)> for AppError {
    fn from((status, message): (StatusCode, &'static str)) -> Self {
        AppError::Rejection(status, message)
    }
}

fn render_error_page(status: StatusCode, message: &str) -> Result<String, minijinja::Error> {
    let mut templates = minijinja::Environment::new();
    templates.set_loader(crate::load_template);
    templates.get_template("error.html")?.render(context! {
        url_prefix => "/",
        status_code => status.as_u16(),
        reason => status.canonical_reason(),
        message,
    })
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        tracing::debug!("{}", &self);
        let (status, message) = match self {
            AppError::CorpusIndexOutOfRange { .. } => (StatusCode::BAD_REQUEST, format!("{}", self)),
            AppError::Rejection(status, message) => (status, message.to_string()),
            AppError::Reqwest(e) => (StatusCode::BAD_GATEWAY, format!("{}", e)),
            AppError::UrlParsing(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Url could not be parsed: {}", e),
            ),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", &self)),
        };
        let html = render_error_page(status, &message)
            .unwrap_or_else(|e| format!("Error page template did not compile: {}", e));
        (status, Html(html)).into_response()
    }
}
