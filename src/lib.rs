pub mod client;
pub mod components;
pub mod config;
pub(crate) mod errors;
pub mod state;
mod views;

use axum::{
    body::{self, Empty, Full},
    error_handling::HandleErrorLayer,
    extract::Path,
    http::{header, HeaderValue, Response, StatusCode},
    response::{IntoResponse, Redirect},
    routing::get,
    BoxError, Router,
};
use config::CliConfig;
use include_dir::{include_dir, Dir};
use state::GlobalAppState;
use std::{sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_sessions::{
    cookie::SameSite, sqlx::SqlitePool, MokaStore, SessionManagerLayer, SessionStore, SqliteStore,
};

static STATIC_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/static");
/// Form values of sessions that were not used for this long are discarded.
const FORM_STATE_MAX_IDLE: Duration = Duration::from_secs(24 * 60 * 60);

static TEMPLATES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

pub type Result<T> = std::result::Result<T, errors::AppError>;

/// Load templates by name from the included templates folder.
pub(crate) fn load_template(name: &str) -> std::result::Result<Option<String>, minijinja::Error> {
    if let Some(file) = TEMPLATES_DIR.get_file(name) {
        Ok(file.contents_utf8().map(|s| s.to_string()))
    } else {
        Ok(None)
    }
}

async fn static_file(Path(path): Path<String>) -> Result<impl IntoResponse> {
    let path = path.trim_start_matches('/');
    let mime_type = mime_guess::from_path(path).first_or_text_plain();

    let response = match STATIC_DIR.get_file(path) {
        None => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(body::boxed(Empty::new()))?,
        Some(file) => Response::builder()
            .status(StatusCode::OK)
            .header(
                header::CONTENT_TYPE,
                HeaderValue::from_str(mime_type.as_ref())?,
            )
            .body(body::boxed(Full::from(file.contents())))?,
    };
    Ok(response)
}

pub async fn app(config: &CliConfig, cleanup_interval: Duration) -> Result<Router> {
    let global_state = GlobalAppState::new(config)?;
    let global_state = Arc::new(global_state);

    if let Some(session_file) = &config.session_file {
        let db_uri = format!("sqlite://{}?mode=rwc", session_file.to_string_lossy());
        let db_pool = SqlitePool::connect(&db_uri).await?;
        let store = SqliteStore::new(db_pool);
        store.migrate().await?;

        tokio::task::spawn(store.clone().continuously_delete_expired(cleanup_interval));
        tracing::info!(
            "Storing sessions in {}",
            session_file.to_string_lossy()
        );

        app_with_state(global_state, store, cleanup_interval)
    } else {
        // Fallback to a a store based on a cache
        let store = MokaStore::new(Some(1_000));
        app_with_state(global_state, store, cleanup_interval)
    }
}

fn app_with_state<S: SessionStore>(
    global_state: Arc<GlobalAppState>,
    session_store: S,
    cleanup_interval: Duration,
) -> Result<Router> {
    let routes = Router::new()
        .route("/", get(|| async { Redirect::temporary("search") }))
        .route("/static/*path", get(static_file))
        .nest("/search", views::search::create_routes()?)
        .with_state(global_state.clone());

    let session_service = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(|_: BoxError| async {
            StatusCode::BAD_REQUEST
        }))
        .layer(SessionManagerLayer::new(session_store).with_same_site(SameSite::Lax));

    tokio::task::spawn(async move {
        loop {
            tokio::time::sleep(cleanup_interval).await;
            let removed = global_state.forms.remove_idle(FORM_STATE_MAX_IDLE);
            tracing::debug!(removed, "removed form values of idle sessions");
        }
    });

    Ok(routes.layer(session_service))
}

#[cfg(test)]
pub mod tests;
