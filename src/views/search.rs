use std::{fmt, str::FromStr, sync::Arc};

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    Form, Router,
};
use minijinja::context;
use serde::{de, Deserialize, Deserializer};

use crate::{
    client,
    components::{
        binding::Binding,
        search_form::{QueryButton, SearchForm, Target},
        selection,
        uri::SearchUri,
    },
    errors::AppError,
    state::{GlobalAppState, Session},
    Result,
};

const SEARCH_BUTTON_LABEL: &str = "Search";

pub fn create_routes() -> Result<Router<Arc<GlobalAppState>>> {
    let result = Router::new()
        .route("/", get(show_page).post(submit))
        .route("/corpora", post(toggle_corpus));
    Ok(result)
}

/// Maps empty strings to `None`, so an empty form field counts as absent.
fn empty_string_as_none<'de, D, T>(de: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => FromStr::from_str(s).map_err(de::Error::custom).map(Some),
    }
}

/// Parameters of the search page and of a submitted form.
///
/// The selected corpora of a link are repeated parameters and are read
/// separately.
#[derive(Deserialize, Debug, Default)]
struct FormParams {
    query: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    target: Option<Target>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    suggestions: Option<bool>,
}

#[derive(Deserialize, Debug)]
struct ToggleParams {
    index: usize,
    query: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    target: Option<Target>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    suggestions: Option<bool>,
}

#[tracing::instrument(skip(session, state), fields(session = session.id()))]
async fn show_page(
    mut session: Session,
    State(state): State<Arc<GlobalAppState>>,
    Query(params): Query<FormParams>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse> {
    let corpora = client::corpora::list(&state).await?;
    let (mut selected_corpora, query) = session.bindings();

    if let Some(names) = SearchUri::linked_corpora(&pairs) {
        // A link restores the selection it was created with
        let restored = selection::restore(names, &corpora);
        selected_corpora.request_change(restored)?;
    }

    let mut form = SearchForm::new(
        &state.form_config,
        &corpora,
        selected_corpora,
        query,
        &state.search_uri,
    )
    .with_target(params.target)
    .with_query_suggestions(params.suggestions)
    .with_button_after_query(Some(QueryButton::new(SEARCH_BUTTON_LABEL)));
    if let Some(query) = params.query {
        form.change_query(query)?;
    }

    let html = state
        .templates
        .get_template("search.html")?
        .render(context! {
            form => form.view(),
        })?;
    Ok(Html(html))
}

#[tracing::instrument(skip(session, state), fields(session = session.id()))]
async fn submit(
    mut session: Session,
    State(state): State<Arc<GlobalAppState>>,
    Form(params): Form<FormParams>,
) -> Result<impl IntoResponse> {
    let corpora = client::corpora::list(&state).await?;
    let (selected_corpora, query) = session.bindings();
    let mut form = SearchForm::new(
        &state.form_config,
        &corpora,
        selected_corpora,
        query,
        &state.search_uri,
    )
    .with_target(params.target)
    .with_query_suggestions(params.suggestions);
    form.change_query(params.query.unwrap_or_default())?;

    let uri = form.submit_uri();
    tracing::debug!(%uri, "query submitted");
    Ok(Redirect::to(uri.as_str()))
}

#[tracing::instrument(skip(session, state), fields(session = session.id()))]
async fn toggle_corpus(
    mut session: Session,
    State(state): State<Arc<GlobalAppState>>,
    Form(params): Form<ToggleParams>,
) -> Result<impl IntoResponse> {
    let corpora = client::corpora::list(&state).await?;
    if params.index >= corpora.len() {
        return Err(AppError::CorpusIndexOutOfRange {
            index: params.index,
            len: corpora.len(),
        });
    }

    let (selected_corpora, query) = session.bindings();
    let mut form = SearchForm::new(
        &state.form_config,
        &corpora,
        selected_corpora,
        query,
        &state.search_uri,
    )
    .with_target(params.target)
    .with_query_suggestions(params.suggestions)
    .with_button_after_query(Some(QueryButton::new(SEARCH_BUTTON_LABEL)));
    if let Some(query) = params.query {
        form.change_query(query)?;
    }
    form.toggle_corpus(params.index)?;

    // Only render the form itself, it replaces the existing one
    let html = state
        .templates
        .get_template("search/form.html")?
        .render(context! {
            form => form.view(),
        })?;
    Ok(Html(html))
}
