use url::Url;

use super::search_form::Target;
use crate::Result;

/// Builds navigable links to the search page that restore a given form state.
#[derive(Debug, Clone)]
pub struct SearchUri {
    base: Url,
}

impl SearchUri {
    pub const QUERY_PARAM: &'static str = "query";
    pub const TARGET_PARAM: &'static str = "target";
    pub const SUGGESTIONS_PARAM: &'static str = "suggestions";
    /// Repeated once per selected corpus. A single empty value stands for an
    /// empty selection.
    pub const CORPUS_PARAM: &'static str = "corpus";

    pub fn new(frontend_prefix: &str) -> Result<Self> {
        let prefix = Url::parse(frontend_prefix)?;
        let base = prefix.join("search")?;
        Ok(Self { base })
    }

    pub fn make_uri(
        &self,
        query: &str,
        target: Option<&Target>,
        suggestions: Option<bool>,
        corpora: &[String],
    ) -> Url {
        let mut result = self.base.clone();
        {
            let mut pairs = result.query_pairs_mut();
            pairs.append_pair(Self::QUERY_PARAM, query);
            if let Some(target) = target {
                pairs.append_pair(Self::TARGET_PARAM, target.as_str());
            }
            if let Some(suggestions) = suggestions {
                pairs.append_pair(Self::SUGGESTIONS_PARAM, &suggestions.to_string());
            }
            if corpora.is_empty() {
                pairs.append_pair(Self::CORPUS_PARAM, "");
            }
            for corpus in corpora {
                pairs.append_pair(Self::CORPUS_PARAM, corpus);
            }
        }
        result
    }

    /// The corpus names of a link, or `None` if the link does not contain a
    /// selection at all.
    pub fn linked_corpora(pairs: &[(String, String)]) -> Option<Vec<&str>> {
        let mut found = false;
        let mut names = Vec::new();
        for (key, value) in pairs {
            if key == Self::CORPUS_PARAM {
                found = true;
                if !value.is_empty() {
                    names.push(value.as_str());
                }
            }
        }
        found.then_some(names)
    }
}
