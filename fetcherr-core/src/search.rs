use fetcherr_model::SearchResult;
use tracing::info;

use crate::{
    affordance::{Affordance, plan_affordances},
    backend::MediaBackend,
    error::Result,
    requestability::Requestability,
};

/// Results rendered per search.
pub const MAX_RESULTS: usize = 5;

/// A search result with everything the presentation layer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedResult {
    pub result: SearchResult,
    pub requestability: Requestability,
    pub affordances: Vec<Affordance>,
}

impl ResolvedResult {
    pub fn resolve(result: SearchResult) -> Self {
        let requestability = Requestability::for_result(&result);
        let affordances = plan_affordances(&result, &requestability);
        Self {
            result,
            requestability,
            affordances,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchReport {
    NoResults,
    Results(Vec<ResolvedResult>),
}

/// Runs a search and resolves the top [`MAX_RESULTS`] matches.
///
/// A blank query is answered with [`SearchReport::NoResults`] without
/// asking the backend.
pub async fn search(
    backend: &dyn MediaBackend,
    query: &str,
) -> Result<SearchReport> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(SearchReport::NoResults);
    }

    let results = backend.search(query).await?;
    info!(query = %query, matches = results.len(), "search completed");
    if results.is_empty() {
        return Ok(SearchReport::NoResults);
    }

    Ok(SearchReport::Results(
        results
            .into_iter()
            .take(MAX_RESULTS)
            .map(ResolvedResult::resolve)
            .collect(),
    ))
}
