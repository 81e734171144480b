use std::{convert::Infallible, str::FromStr};

use serde::{Deserialize, Serialize};
use url::Url;

use super::{
    binding::Binding,
    layout::{self, ColumnWidths},
    selection::{self, Corpus},
    suggestions::{self, FormConfig},
    uri::SearchUri,
};
use crate::Result;

/// Secondary selection of the search, e.g. the unit the results are grouped by.
///
/// The form does not interpret the value, it only needs to know whether there
/// is one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct Target(String);

impl Target {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Target {
    fn from(value: &str) -> Self {
        Target(value.to_string())
    }
}

impl FromStr for Target {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Target::from(s))
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
    pub index: usize,
    pub name: String,
    pub description: Option<String>,
    pub selected: bool,
}

/// Button rendered right after the query input.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct QueryButton {
    pub label: String,
}

impl QueryButton {
    pub fn new<S: Into<String>>(label: S) -> Self {
        Self {
            label: label.into(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SuggestionGroup {
    pub disabled: bool,
    pub uri: String,
}

/// Everything the templates need to render the search form.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchFormView {
    pub query: String,
    pub query_disabled: bool,
    pub button_after_query: Option<QueryButton>,
    pub widths: ColumnWidths,
    pub corpora: Vec<CorpusEntry>,
    pub selected_corpora: Vec<String>,
    pub target: Option<Target>,
    pub suggestions: Option<SuggestionGroup>,
    /// Explicit suggestion flag of the request, kept so it survives partial updates.
    pub suggestions_override: Option<bool>,
}

/// The search form with a query input, the corpus selection, an optional
/// target and optional query suggestions.
pub struct SearchForm<'a, S, Q> {
    config: &'a FormConfig,
    corpora: &'a [Corpus],
    selected_corpus_names: S,
    query: Q,
    target: Option<Target>,
    show_query_suggestions: Option<bool>,
    button_after_query: Option<QueryButton>,
    uri: &'a SearchUri,
}

impl<'a, S, Q> SearchForm<'a, S, Q>
where
    S: Binding<Vec<String>>,
    Q: Binding<String>,
{
    pub fn new(
        config: &'a FormConfig,
        corpora: &'a [Corpus],
        selected_corpus_names: S,
        query: Q,
        uri: &'a SearchUri,
    ) -> Self {
        Self {
            config,
            corpora,
            selected_corpus_names,
            query,
            target: None,
            show_query_suggestions: None,
            button_after_query: None,
            uri,
        }
    }

    pub fn with_target(mut self, target: Option<Target>) -> Self {
        self.target = target;
        self
    }

    pub fn with_query_suggestions(mut self, show: Option<bool>) -> Self {
        self.show_query_suggestions = show;
        self
    }

    pub fn with_button_after_query(mut self, button: Option<QueryButton>) -> Self {
        self.button_after_query = button;
        self
    }

    pub fn show_query_suggestions(&self) -> bool {
        suggestions::should_show(self.show_query_suggestions, self.config.ml.disable)
    }

    pub fn widths(&self) -> ColumnWidths {
        layout::widths(self.target.is_some(), self.show_query_suggestions())
    }

    /// Searching is only possible once at least one corpus is selected.
    pub fn query_disabled(&self) -> bool {
        self.selected_corpus_names.value().is_empty()
    }

    /// Selects or deselects the corpus at the given position of the corpus list.
    ///
    /// # Panics
    ///
    /// Panics if the index is outside of the corpus list.
    pub fn toggle_corpus(&mut self, index: usize) -> Result<()> {
        let new_selection =
            selection::toggle(index, self.corpora, self.selected_corpus_names.value());
        self.selected_corpus_names.request_change(new_selection)
    }

    pub fn change_query(&mut self, query: String) -> Result<()> {
        self.query.request_change(query)
    }

    /// Link to the search page that restores the current state of the form.
    pub fn submit_uri(&self) -> Url {
        self.uri.make_uri(
            self.query.value(),
            self.target.as_ref(),
            self.show_query_suggestions,
            self.selected_corpus_names.value(),
        )
    }

    pub fn view(&self) -> SearchFormView {
        let selected = self.selected_corpus_names.value();
        let corpora = self
            .corpora
            .iter()
            .enumerate()
            .map(|(index, c)| CorpusEntry {
                index,
                name: c.name.clone(),
                description: c.description.clone(),
                selected: selected.contains(&c.name),
            })
            .collect();
        let suggestions = if self.show_query_suggestions() {
            Some(SuggestionGroup {
                disabled: self.query_disabled(),
                uri: self.submit_uri().to_string(),
            })
        } else {
            None
        };

        SearchFormView {
            query: self.query.value().clone(),
            query_disabled: self.query_disabled(),
            button_after_query: self.button_after_query.clone(),
            widths: self.widths(),
            corpora,
            selected_corpora: selected.clone(),
            target: self.target.clone(),
            suggestions,
            suggestions_override: self.show_query_suggestions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{binding::CallbackBinding, suggestions::MlConfig};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    fn corpora() -> Vec<Corpus> {
        vec![Corpus::new("a"), Corpus::new("b")]
    }

    fn uri() -> SearchUri {
        SearchUri::new("http://127.0.0.1:3000/").unwrap()
    }

    #[test]
    fn toggle_is_requested_through_binding() {
        let config = FormConfig::default();
        let corpora = corpora();
        let uri = uri();
        let requested = RefCell::new(Vec::new());

        let selection = CallbackBinding::new(vec!["a".to_string()], |names| {
            requested.borrow_mut().push(names);
            Ok(())
        });
        let query = CallbackBinding::new(String::new(), |_| Ok(()));
        let mut form = SearchForm::new(&config, &corpora, selection, query, &uri);

        form.toggle_corpus(1).unwrap();
        form.toggle_corpus(0).unwrap();

        assert_eq!(
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["b".to_string()]
            ],
            *requested.borrow()
        );
    }

    #[test]
    fn query_disabled_without_selection() {
        let config = FormConfig::default();
        let corpora = corpora();
        let uri = uri();
        let selection = CallbackBinding::new(Vec::<String>::new(), |_| Ok(()));
        let query = CallbackBinding::new(String::new(), |_| Ok(()));
        let mut form = SearchForm::new(&config, &corpora, selection, query, &uri);

        let view = form.view();
        assert!(view.query_disabled);
        assert_eq!(Some(true), view.suggestions.map(|s| s.disabled));

        form.toggle_corpus(0).unwrap();
        let view = form.view();
        assert!(!view.query_disabled);
        assert_eq!(Some(false), view.suggestions.map(|s| s.disabled));
        assert_eq!(
            vec![true, false],
            view.corpora.iter().map(|c| c.selected).collect::<Vec<_>>()
        );
    }

    #[test]
    fn layout_follows_target_and_suggestions() {
        let config = FormConfig {
            ml: MlConfig { disable: true },
        };
        let corpora = corpora();
        let uri = uri();
        let selection = CallbackBinding::new(Vec::<String>::new(), |_| Ok(()));
        let query = CallbackBinding::new(String::new(), |_| Ok(()));
        let form = SearchForm::new(&config, &corpora, selection, query, &uri)
            .with_target(Some(Target::from("sentence")));

        let view = form.view();
        assert_eq!(None, view.suggestions);
        assert_eq!(layout::widths(true, false), view.widths);

        let form = form.with_query_suggestions(Some(true));
        let view = form.view();
        assert!(view.suggestions.is_some());
        assert_eq!(Some(true), view.suggestions_override);
        assert_eq!(8, view.widths.query_span);
    }

    #[test]
    fn submit_uri_contains_state() {
        let config = FormConfig::default();
        let corpora = corpora();
        let uri = uri();
        let selection = CallbackBinding::new(vec!["b".to_string()], |_| Ok(()));
        let query = CallbackBinding::new(String::new(), |_| Ok(()));
        let mut form = SearchForm::new(&config, &corpora, selection, query, &uri);
        form.change_query("tok".to_string()).unwrap();

        assert_eq!(
            "http://127.0.0.1:3000/search?query=tok&corpus=b",
            form.submit_uri().as_str()
        );
        assert_eq!(form.submit_uri().to_string(), form.view().suggestions.unwrap().uri);

        // An explicit suggestion flag is part of the link
        let form = form.with_query_suggestions(Some(false));
        assert_eq!(
            "http://127.0.0.1:3000/search?query=tok&suggestions=false&corpus=b",
            form.submit_uri().as_str()
        );
    }

    #[test]
    fn button_after_query() {
        let config = FormConfig::default();
        let corpora = corpora();
        let uri = uri();
        let selection = CallbackBinding::new(Vec::<String>::new(), |_| Ok(()));
        let query = CallbackBinding::new(String::new(), |_| Ok(()));
        let form = SearchForm::new(&config, &corpora, selection, query, &uri);
        assert_eq!(None, form.view().button_after_query);

        let form = form.with_button_after_query(Some(QueryButton::new("Search")));
        assert_eq!(
            Some(QueryButton::new("Search")),
            form.view().button_after_query
        );
    }
}
