use crate::{components::selection::Corpus, state::GlobalAppState, Result};

/// Get all corpora sorted by their name, ignoring the case.
#[tracing::instrument(skip(state))]
pub async fn list(state: &GlobalAppState) -> Result<Vec<Corpus>> {
    let client = state.client();
    let request = client.get(state.service_url.join("corpora")?).build()?;
    let mut names: Vec<String> = client
        .execute(request)
        .await?
        .error_for_status()?
        .json()
        .await?;
    names.sort_by_key(|k| k.to_lowercase());
    tracing::debug!(corpora = names.len(), "received corpus list");

    Ok(names.into_iter().map(Corpus::new).collect())
}
