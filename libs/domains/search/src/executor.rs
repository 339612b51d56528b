//! Plan execution with a single degradation step: a refused full-text plan
//! is retried once as a minimal pattern plan.

use std::sync::Arc;

use crate::error::{SearchError, SearchResult};
use crate::models::SearchPage;
use crate::query::{QueryPlan, TextQuery};
use crate::repository::SearchRepository;

pub struct SearchExecutor<R: SearchRepository> {
    repository: Arc<R>,
}

impl<R: SearchRepository> SearchExecutor<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn execute(
        &self,
        plan: &QueryPlan,
        skip: u64,
        limit: u64,
    ) -> SearchResult<SearchPage> {
        match self.repository.search(plan, skip, limit).await {
            Ok((items, total)) => Ok(SearchPage { total, items }),
            Err(SearchError::TextSearchUnsupported)
                if matches!(plan.text, Some(TextQuery::FullText { .. })) =>
            {
                tracing::warn!(
                    term = %plan.term,
                    "Full-text plan refused, retrying on the pattern path"
                );
                let fallback = plan.minimal_pattern();
                let (items, total) = self.repository.search(&fallback, skip, limit).await?;
                Ok(SearchPage { total, items })
            }
            Err(e) => Err(e),
        }
    }
}
