use crate::{
    components::{binding::Binding, suggestions::FormConfig, uri::SearchUri},
    config::CliConfig,
    errors::AppError,
    Result,
};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use url::Url;

#[derive(Debug)]
struct FormEntry {
    values: HashMap<&'static str, serde_json::Value>,
    last_access: Instant,
}

/// Form values of all active sessions, indexed by the session ID.
///
/// Changes to a session that the session layer still caches from an earlier
/// request are not persisted by the layer. Form values are therefore kept here
/// and only mirrored into the session.
#[derive(Debug, Default)]
pub struct FormStore {
    entries: DashMap<String, FormEntry>,
}

impl FormStore {
    pub fn get<T: DeserializeOwned>(&self, session_id: &str, key: &str) -> Result<Option<T>> {
        if let Some(mut entry) = self.entries.get_mut(session_id) {
            entry.last_access = Instant::now();
            if let Some(value) = entry.values.get(key) {
                return Ok(Some(serde_json::from_value(value.clone())?));
            }
        }
        Ok(None)
    }

    pub fn insert<T: Serialize>(
        &self,
        session_id: &str,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        let value = serde_json::to_value(value)?;
        let mut entry = self
            .entries
            .entry(session_id.to_string())
            .or_insert_with(|| FormEntry {
                values: HashMap::new(),
                last_access: Instant::now(),
            });
        entry.last_access = Instant::now();
        entry.values.insert(key, value);
        Ok(())
    }

    /// Removes the values of sessions that have not been accessed for
    /// `max_idle` and returns how many sessions were removed.
    pub fn remove_idle(&self, max_idle: Duration) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_session_id, entry| entry.last_access.elapsed() < max_idle);
        before - self.entries.len()
    }
}

/// Form state of a user that survives between requests.
#[derive(Debug, Clone, Default)]
pub struct Session {
    selected_corpora: Vec<String>,
    query: String,
    session: tower_sessions::Session,
    session_id: String,
    forms: Arc<FormStore>,
}

impl Session {
    pub const SELECTED_CORPORA_KEY: &'static str = "selected_corpora";
    pub const QUERY_KEY: &'static str = "query";

    pub fn id(&self) -> &str {
        &self.session_id
    }

    /// Bindings for the corpus selection and the query, both backed by the
    /// form store of the application.
    pub fn bindings(&mut self) -> (SessionBinding<'_, Vec<String>>, SessionBinding<'_, String>) {
        (
            SessionBinding {
                key: Self::SELECTED_CORPORA_KEY,
                value: &mut self.selected_corpora,
                session: &self.session,
                session_id: &self.session_id,
                forms: &self.forms,
            },
            SessionBinding {
                key: Self::QUERY_KEY,
                value: &mut self.query,
                session: &self.session,
                session_id: &self.session_id,
                forms: &self.forms,
            },
        )
    }

    fn load<T>(
        forms: &FormStore,
        session: &tower_sessions::Session,
        session_id: &str,
        key: &str,
    ) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        if let Some(value) = forms.get(session_id, key)? {
            Ok(value)
        } else {
            // Fall back to the persisted session, e.g. after a restart
            Ok(session.get(key)?.unwrap_or_default())
        }
    }
}

#[async_trait]
impl FromRequestParts<Arc<GlobalAppState>> for Session {
    type Rejection = AppError;

    async fn from_request_parts(
        req: &mut Parts,
        state: &Arc<GlobalAppState>,
    ) -> std::result::Result<Self, Self::Rejection> {
        let session = tower_sessions::Session::from_request_parts(req, state).await?;
        let session_id = session.id().to_string();
        let forms = state.forms.clone();

        let selected_corpora =
            Self::load(&forms, &session, &session_id, Self::SELECTED_CORPORA_KEY)?;
        let query = Self::load(&forms, &session, &session_id, Self::QUERY_KEY)?;

        Ok(Self {
            session_id,
            session,
            selected_corpora,
            query,
            forms,
        })
    }
}

/// A single form value of a session.
///
/// Change requests are written to the form store and mirrored into the
/// session before the value is replaced.
pub struct SessionBinding<'a, T> {
    key: &'static str,
    value: &'a mut T,
    session: &'a tower_sessions::Session,
    session_id: &'a str,
    forms: &'a FormStore,
}

impl<'a, T> Binding<T> for SessionBinding<'a, T>
where
    T: Serialize,
{
    fn value(&self) -> &T {
        self.value
    }

    fn request_change(&mut self, new_value: T) -> Result<()> {
        self.forms.insert(self.session_id, self.key, &new_value)?;
        self.session.insert(self.key, &new_value)?;
        *self.value = new_value;
        Ok(())
    }
}

pub struct GlobalAppState {
    pub service_url: Url,
    pub templates: minijinja::Environment<'static>,
    pub form_config: FormConfig,
    pub search_uri: SearchUri,
    pub forms: Arc<FormStore>,
    default_client: reqwest::Client,
}

impl GlobalAppState {
    pub fn new(config: &CliConfig) -> Result<Self> {
        let mut templates = minijinja::Environment::new();

        // Define any global variables
        templates.add_global("url_prefix", config.frontend_prefix.to_string());

        // Load templates by name from the included templates folder
        templates.set_loader(crate::load_template);

        let service_url = if config.service_url.is_empty() {
            Url::parse("http://127.0.0.1:5711")?
        } else {
            Url::parse(&config.service_url)?
        };
        let default_client = reqwest::ClientBuilder::new().build()?;
        let result = Self {
            service_url,
            templates,
            form_config: config.form_config(),
            search_uri: SearchUri::new(&config.frontend_prefix)?,
            forms: Arc::new(FormStore::default()),
            default_client,
        };
        Ok(result)
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.default_client
    }
}
