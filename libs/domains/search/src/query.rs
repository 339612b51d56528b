//! Strategy-selecting query builder.
//!
//! Native full-text search is used only when the store has a text index and
//! the term is long enough and not purely right-to-left script. Everything
//! else goes through the pattern path: word alternations over title and
//! description, widened with brands and categories whose names match the
//! term.

use std::sync::Arc;
use uuid::Uuid;

use crate::error::SearchResult;
use crate::models::{BaseFilter, SortOrder};
use crate::repository::SearchRepository;

/// Hebrew through Arabic Extended-A.
const RTL_RANGE: std::ops::RangeInclusive<char> = '\u{0590}'..='\u{08FF}';

/// Text constraint of a query plan
#[derive(Debug, Clone, PartialEq)]
pub enum TextQuery {
    /// Native full-text match on title + description, ranked by relevance
    FullText { term: String },
    /// Word alternation over title/description, plus products of brands and
    /// categories whose names match the term
    Pattern {
        words: Vec<String>,
        brand_ids: Vec<Uuid>,
        category_ids: Vec<Uuid>,
    },
}

/// Result ordering, always tie-broken by created_at desc
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSort {
    Relevance,
    Rated,
    Newest,
    PriceAsc,
    PriceDesc,
}

impl From<SortOrder> for PlanSort {
    fn from(sort: SortOrder) -> Self {
        match sort {
            SortOrder::Newest => PlanSort::Newest,
            SortOrder::PriceAsc => PlanSort::PriceAsc,
            SortOrder::PriceDesc => PlanSort::PriceDesc,
            SortOrder::Rating => PlanSort::Rated,
        }
    }
}

/// A fully resolved search plan, ready for execution
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub term: String,
    pub base: BaseFilter,
    pub text: Option<TextQuery>,
    pub sort: PlanSort,
}

impl QueryPlan {
    /// Smallest possible pattern plan: word alternation only, recency sort.
    /// Used by the executor when a full-text plan is refused.
    pub fn minimal_pattern(&self) -> QueryPlan {
        let words = self.term.split_whitespace().map(str::to_string).collect();
        QueryPlan {
            term: self.term.clone(),
            base: self.base.clone(),
            text: Some(TextQuery::Pattern {
                words,
                brand_ids: Vec::new(),
                category_ids: Vec::new(),
            }),
            sort: PlanSort::Newest,
        }
    }
}

/// True when every non-whitespace char is right-to-left script.
fn is_pure_rtl(term: &str) -> bool {
    let mut chars = term.chars().filter(|c| !c.is_whitespace()).peekable();
    chars.peek().is_some() && chars.all(|c| RTL_RANGE.contains(&c))
}

pub struct QueryBuilder<R: SearchRepository> {
    repository: Arc<R>,
    supports_text_search: bool,
}

impl<R: SearchRepository> QueryBuilder<R> {
    /// `supports_text_search` is resolved once at startup from the
    /// repository's index probe.
    pub fn new(repository: Arc<R>, supports_text_search: bool) -> Self {
        Self {
            repository,
            supports_text_search,
        }
    }

    pub async fn build(
        &self,
        term: &str,
        base: BaseFilter,
        sort: Option<SortOrder>,
    ) -> SearchResult<QueryPlan> {
        let term = term.trim();

        let (text, computed_sort) = if term.is_empty() {
            (None, PlanSort::Newest)
        } else if self.can_use_full_text(term) {
            (
                Some(TextQuery::FullText {
                    term: term.to_string(),
                }),
                PlanSort::Relevance,
            )
        } else {
            let words: Vec<String> = term.split_whitespace().map(str::to_string).collect();
            if words.is_empty() {
                (None, PlanSort::Newest)
            } else {
                let (brand_ids, category_ids) = tokio::join!(
                    self.repository.find_brand_ids(term),
                    self.repository.find_category_ids(term),
                );

                (
                    Some(TextQuery::Pattern {
                        words,
                        brand_ids: brand_ids?,
                        category_ids: category_ids?,
                    }),
                    PlanSort::Rated,
                )
            }
        };

        Ok(QueryPlan {
            term: term.to_string(),
            base,
            text,
            sort: sort.map(Into::into).unwrap_or(computed_sort),
        })
    }

    fn can_use_full_text(&self, term: &str) -> bool {
        self.supports_text_search && !is_pure_rtl(term) && term.chars().count() > 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockSearchRepository;

    fn builder(supports: bool) -> QueryBuilder<MockSearchRepository> {
        let mut repository = MockSearchRepository::new();
        repository
            .expect_find_brand_ids()
            .returning(|_| Ok(Vec::new()));
        repository
            .expect_find_category_ids()
            .returning(|_| Ok(Vec::new()));
        QueryBuilder::new(Arc::new(repository), supports)
    }

    #[tokio::test]
    async fn test_indexed_long_term_goes_native() {
        let plan = builder(true)
            .build("wireless keyboard", BaseFilter::default(), None)
            .await
            .unwrap();

        assert!(matches!(plan.text, Some(TextQuery::FullText { .. })));
        assert_eq!(plan.sort, PlanSort::Relevance);
    }

    #[tokio::test]
    async fn test_missing_index_forces_pattern() {
        let plan = builder(false)
            .build("wireless keyboard", BaseFilter::default(), None)
            .await
            .unwrap();

        assert!(matches!(plan.text, Some(TextQuery::Pattern { .. })));
        assert_eq!(plan.sort, PlanSort::Rated);
    }

    #[tokio::test]
    async fn test_rtl_term_forces_pattern_despite_index() {
        let plan = builder(true)
            .build("شنطة", BaseFilter::default(), None)
            .await
            .unwrap();

        assert!(matches!(plan.text, Some(TextQuery::Pattern { .. })));
    }

    #[tokio::test]
    async fn test_mixed_script_term_stays_native() {
        let plan = builder(true)
            .build("bag شنطة", BaseFilter::default(), None)
            .await
            .unwrap();

        assert!(matches!(plan.text, Some(TextQuery::FullText { .. })));
    }

    #[tokio::test]
    async fn test_two_char_term_forces_pattern() {
        let plan = builder(true)
            .build("ab", BaseFilter::default(), None)
            .await
            .unwrap();

        assert!(matches!(plan.text, Some(TextQuery::Pattern { .. })));
    }

    #[tokio::test]
    async fn test_blank_term_has_no_text_constraint() {
        let plan = builder(true)
            .build("   ", BaseFilter::default(), None)
            .await
            .unwrap();

        assert_eq!(plan.text, None);
        assert_eq!(plan.sort, PlanSort::Newest);
    }

    #[tokio::test]
    async fn test_explicit_sort_overrides_computed() {
        let plan = builder(true)
            .build(
                "wireless keyboard",
                BaseFilter::default(),
                Some(SortOrder::PriceAsc),
            )
            .await
            .unwrap();

        assert_eq!(plan.sort, PlanSort::PriceAsc);
    }

    #[tokio::test]
    async fn test_pattern_plan_collects_matching_brand_ids() {
        let brand = Uuid::now_v7();
        let mut repository = MockSearchRepository::new();
        repository
            .expect_find_brand_ids()
            .returning(move |_| Ok(vec![brand]));
        repository
            .expect_find_category_ids()
            .returning(|_| Ok(Vec::new()));

        let plan = QueryBuilder::new(Arc::new(repository), false)
            .build("acme", BaseFilter::default(), None)
            .await
            .unwrap();

        match plan.text {
            Some(TextQuery::Pattern { brand_ids, .. }) => assert_eq!(brand_ids, vec![brand]),
            other => panic!("expected pattern plan, got {:?}", other),
        }
    }

    #[test]
    fn test_minimal_pattern_drops_reference_widening() {
        let plan = QueryPlan {
            term: "usb hub".to_string(),
            base: BaseFilter::default(),
            text: Some(TextQuery::FullText {
                term: "usb hub".to_string(),
            }),
            sort: PlanSort::Relevance,
        };

        let minimal = plan.minimal_pattern();
        assert_eq!(minimal.sort, PlanSort::Newest);
        match minimal.text {
            Some(TextQuery::Pattern {
                words,
                brand_ids,
                category_ids,
            }) => {
                assert_eq!(words, vec!["usb", "hub"]);
                assert!(brand_ids.is_empty());
                assert!(category_ids.is_empty());
            }
            other => panic!("expected pattern plan, got {:?}", other),
        }
    }
}
