use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use regex::Regex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{SearchError, SearchResult};
use crate::models::ProductHit;
use crate::query::{PlanSort, QueryPlan, TextQuery};

/// Repository trait for search execution
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SearchRepository: Send + Sync {
    /// Probe whether the store has a full-text index. A probe failure is
    /// reported as `false`, never as an error.
    async fn has_text_index(&self) -> bool;

    /// Ids of active brands whose name contains the term (case-insensitive).
    async fn find_brand_ids(&self, term: &str) -> SearchResult<Vec<Uuid>>;

    /// Ids of active categories whose name contains the term.
    async fn find_category_ids(&self, term: &str) -> SearchResult<Vec<Uuid>>;

    /// Run a plan, returning one page of hits and the total match count.
    /// Only visible products are ever returned.
    async fn search(
        &self,
        plan: &QueryPlan,
        skip: u64,
        limit: u64,
    ) -> SearchResult<(Vec<ProductHit>, u64)>;
}

/// A product as held by the in-memory index
#[derive(Debug, Clone)]
pub struct IndexedProduct {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub discounted_price: Option<f64>,
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub brand_id: Option<Uuid>,
    pub brand_name: Option<String>,
    pub ratings_average: f64,
    pub ratings_quantity: i32,
    pub seller_verified: bool,
    pub visible: bool,
    pub created_at: DateTime<Utc>,
}

impl IndexedProduct {
    pub fn new(title: &str, description: &str, price: f64) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: title.to_string(),
            description: description.to_string(),
            price,
            discounted_price: None,
            category_id: None,
            category_name: None,
            brand_id: None,
            brand_name: None,
            ratings_average: 0.0,
            ratings_quantity: 0,
            seller_verified: false,
            visible: true,
            created_at: Utc::now(),
        }
    }

    fn hit(&self) -> ProductHit {
        ProductHit {
            id: self.id,
            title: self.title.clone(),
            price: self.price,
            discounted_price: self.discounted_price,
            images: Vec::new(),
            ratings_average: self.ratings_average,
            ratings_quantity: self.ratings_quantity,
            created_at: self.created_at,
            category_name: self.category_name.clone(),
            brand_name: self.brand_name.clone(),
            seller_verified: self.seller_verified,
        }
    }
}

#[derive(Debug, Clone)]
struct NamedRef {
    id: Uuid,
    name: String,
    active: bool,
}

/// In-memory implementation of SearchRepository (for development/testing).
/// Index presence and full-text refusal are switchable so executor fallback
/// paths can be exercised.
#[derive(Default)]
pub struct InMemorySearchRepository {
    products: Arc<RwLock<Vec<IndexedProduct>>>,
    brands: Arc<RwLock<Vec<NamedRef>>>,
    categories: Arc<RwLock<Vec<NamedRef>>>,
    text_index: AtomicBool,
    refuse_full_text: AtomicBool,
}

impl InMemorySearchRepository {
    pub fn new() -> Self {
        let repo = Self::default();
        repo.text_index.store(true, Ordering::Relaxed);
        repo
    }

    pub async fn add_product(&self, product: IndexedProduct) {
        self.products.write().await.push(product);
    }

    pub async fn add_brand(&self, id: Uuid, name: &str, active: bool) {
        self.brands.write().await.push(NamedRef {
            id,
            name: name.to_string(),
            active,
        });
    }

    pub async fn add_category(&self, id: Uuid, name: &str, active: bool) {
        self.categories.write().await.push(NamedRef {
            id,
            name: name.to_string(),
            active,
        });
    }

    pub fn set_text_index(&self, present: bool) {
        self.text_index.store(present, Ordering::Relaxed);
    }

    /// Make full-text plans fail, as a store without the index would.
    pub fn refuse_full_text(&self, refuse: bool) {
        self.refuse_full_text.store(refuse, Ordering::Relaxed);
    }

    fn base_matches(product: &IndexedProduct, plan: &QueryPlan) -> bool {
        let base = &plan.base;
        product.visible
            && base
                .category_id
                .is_none_or(|id| product.category_id == Some(id))
            && base.brand_id.is_none_or(|id| product.brand_id == Some(id))
            && base.min_price.is_none_or(|min| product.price >= min)
            && base.max_price.is_none_or(|max| product.price <= max)
    }

    fn word_regex(words: &[String]) -> Option<Regex> {
        if words.is_empty() {
            return None;
        }
        let alternation = words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!("(?i)({})", alternation)).ok()
    }

    fn text_matches(product: &IndexedProduct, text: &TextQuery) -> bool {
        match text {
            TextQuery::FullText { term } => {
                let haystack =
                    format!("{} {}", product.title, product.description).to_lowercase();
                term.split_whitespace()
                    .any(|w| haystack.contains(&w.to_lowercase()))
            }
            TextQuery::Pattern {
                words,
                brand_ids,
                category_ids,
            } => {
                if let [word] = words.as_slice() {
                    let title = product.title.to_lowercase();
                    let word = word.to_lowercase();
                    if title.starts_with(&word) || title.contains(&word) {
                        return true;
                    }
                } else if let Some(re) = Self::word_regex(words) {
                    if re.is_match(&product.title) {
                        return true;
                    }
                }

                if let Some(re) = Self::word_regex(words) {
                    if re.is_match(&product.description) {
                        return true;
                    }
                }

                product
                    .brand_id
                    .is_some_and(|id| brand_ids.contains(&id))
                    || product
                        .category_id
                        .is_some_and(|id| category_ids.contains(&id))
            }
        }
    }

    fn sort(items: &mut [IndexedProduct], plan: &QueryPlan) {
        match plan.sort {
            PlanSort::Relevance => {
                // Approximate relevance: number of term words present.
                let term = match &plan.text {
                    Some(TextQuery::FullText { term }) => term.to_lowercase(),
                    _ => String::new(),
                };
                items.sort_by(|a, b| {
                    let score = |p: &IndexedProduct| {
                        let haystack = format!("{} {}", p.title, p.description).to_lowercase();
                        term.split_whitespace()
                            .filter(|w| haystack.contains(*w))
                            .count()
                    };
                    score(b)
                        .cmp(&score(a))
                        .then(b.created_at.cmp(&a.created_at))
                });
            }
            PlanSort::Rated => items.sort_by(|a, b| {
                b.ratings_average
                    .total_cmp(&a.ratings_average)
                    .then(b.ratings_quantity.cmp(&a.ratings_quantity))
                    .then(b.created_at.cmp(&a.created_at))
            }),
            PlanSort::Newest => items.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            PlanSort::PriceAsc => items.sort_by(|a, b| {
                a.price
                    .total_cmp(&b.price)
                    .then(b.created_at.cmp(&a.created_at))
            }),
            PlanSort::PriceDesc => items.sort_by(|a, b| {
                b.price
                    .total_cmp(&a.price)
                    .then(b.created_at.cmp(&a.created_at))
            }),
        }
    }
}

#[async_trait]
impl SearchRepository for InMemorySearchRepository {
    async fn has_text_index(&self) -> bool {
        self.text_index.load(Ordering::Relaxed)
    }

    async fn find_brand_ids(&self, term: &str) -> SearchResult<Vec<Uuid>> {
        let needle = term.to_lowercase();
        Ok(self
            .brands
            .read()
            .await
            .iter()
            .filter(|b| b.active && b.name.to_lowercase().contains(&needle))
            .map(|b| b.id)
            .collect())
    }

    async fn find_category_ids(&self, term: &str) -> SearchResult<Vec<Uuid>> {
        let needle = term.to_lowercase();
        Ok(self
            .categories
            .read()
            .await
            .iter()
            .filter(|c| c.active && c.name.to_lowercase().contains(&needle))
            .map(|c| c.id)
            .collect())
    }

    async fn search(
        &self,
        plan: &QueryPlan,
        skip: u64,
        limit: u64,
    ) -> SearchResult<(Vec<ProductHit>, u64)> {
        if matches!(plan.text, Some(TextQuery::FullText { .. }))
            && self.refuse_full_text.load(Ordering::Relaxed)
        {
            return Err(SearchError::TextSearchUnsupported);
        }

        let products = self.products.read().await;
        let mut matched: Vec<IndexedProduct> = products
            .iter()
            .filter(|p| Self::base_matches(p, plan))
            .filter(|p| plan.text.as_ref().is_none_or(|t| Self::text_matches(p, t)))
            .cloned()
            .collect();

        Self::sort(&mut matched, plan);

        let total = matched.len() as u64;
        let page = matched
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .map(|p| p.hit())
            .collect();

        Ok((page, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BaseFilter;

    fn pattern_plan(term: &str) -> QueryPlan {
        QueryPlan {
            term: term.to_string(),
            base: BaseFilter::default(),
            text: Some(TextQuery::Pattern {
                words: term.split_whitespace().map(str::to_string).collect(),
                brand_ids: Vec::new(),
                category_ids: Vec::new(),
            }),
            sort: PlanSort::Rated,
        }
    }

    #[tokio::test]
    async fn test_hidden_products_never_surface() {
        let repo = InMemorySearchRepository::new();
        let mut hidden = IndexedProduct::new("Gaming laptop", "Fast", 999.0);
        hidden.visible = false;
        repo.add_product(hidden).await;
        repo.add_product(IndexedProduct::new("Office laptop", "Quiet", 499.0))
            .await;

        let (hits, total) = repo.search(&pattern_plan("laptop"), 0, 20).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(hits[0].title, "Office laptop");
    }

    #[tokio::test]
    async fn test_single_word_matches_anywhere_in_title() {
        let repo = InMemorySearchRepository::new();
        repo.add_product(IndexedProduct::new("Laptop stand", "Aluminium", 30.0))
            .await;
        repo.add_product(IndexedProduct::new("Ultrabook laptop", "Light", 900.0))
            .await;
        repo.add_product(IndexedProduct::new("Desk lamp", "Warm light", 15.0))
            .await;

        let (_, total) = repo.search(&pattern_plan("laptop"), 0, 20).await.unwrap();
        assert_eq!(total, 2);
    }

    #[tokio::test]
    async fn test_multi_word_any_alternation() {
        let repo = InMemorySearchRepository::new();
        repo.add_product(IndexedProduct::new("Mechanical keyboard", "Clicky", 80.0))
            .await;
        repo.add_product(IndexedProduct::new("Wireless mouse", "Silent", 25.0))
            .await;
        repo.add_product(IndexedProduct::new("Desk mat", "Large", 20.0))
            .await;

        let (_, total) = repo
            .search(&pattern_plan("keyboard mouse"), 0, 20)
            .await
            .unwrap();
        assert_eq!(total, 2);
    }

    #[tokio::test]
    async fn test_brand_reference_widens_pattern_match() {
        let repo = InMemorySearchRepository::new();
        let brand_id = Uuid::now_v7();
        repo.add_brand(brand_id, "Acme", true).await;

        let mut product = IndexedProduct::new("Steel flask", "Vacuum insulated", 35.0);
        product.brand_id = Some(brand_id);
        repo.add_product(product).await;

        let brand_ids = repo.find_brand_ids("acme").await.unwrap();
        assert_eq!(brand_ids, vec![brand_id]);

        let plan = QueryPlan {
            term: "acme".to_string(),
            base: BaseFilter::default(),
            text: Some(TextQuery::Pattern {
                words: vec!["acme".to_string()],
                brand_ids,
                category_ids: Vec::new(),
            }),
            sort: PlanSort::Rated,
        };

        let (hits, total) = repo.search(&plan, 0, 20).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(hits[0].title, "Steel flask");
    }

    #[tokio::test]
    async fn test_inactive_brands_excluded_from_lookup() {
        let repo = InMemorySearchRepository::new();
        repo.add_brand(Uuid::now_v7(), "Acme", false).await;

        assert!(repo.find_brand_ids("acme").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_price_sort_override() {
        let repo = InMemorySearchRepository::new();
        repo.add_product(IndexedProduct::new("Laptop A", "", 900.0))
            .await;
        repo.add_product(IndexedProduct::new("Laptop B", "", 300.0))
            .await;
        repo.add_product(IndexedProduct::new("Laptop C", "", 600.0))
            .await;

        let mut plan = pattern_plan("laptop");
        plan.sort = PlanSort::PriceAsc;

        let (hits, _) = repo.search(&plan, 0, 20).await.unwrap();
        let prices: Vec<f64> = hits.iter().map(|h| h.price).collect();
        assert_eq!(prices, vec![300.0, 600.0, 900.0]);
    }

    #[tokio::test]
    async fn test_price_range_filter() {
        let repo = InMemorySearchRepository::new();
        repo.add_product(IndexedProduct::new("Laptop A", "", 900.0))
            .await;
        repo.add_product(IndexedProduct::new("Laptop B", "", 300.0))
            .await;

        let mut plan = pattern_plan("laptop");
        plan.base.min_price = Some(500.0);

        let (hits, total) = repo.search(&plan, 0, 20).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(hits[0].price, 900.0);
    }

    #[tokio::test]
    async fn test_pagination_window() {
        let repo = InMemorySearchRepository::new();
        for i in 0..5 {
            repo.add_product(IndexedProduct::new(&format!("Laptop {}", i), "", 100.0))
                .await;
        }

        let (hits, total) = repo.search(&pattern_plan("laptop"), 2, 2).await.unwrap();
        assert_eq!(total, 5);
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn test_regex_metacharacters_are_literal() {
        let repo = InMemorySearchRepository::new();
        repo.add_product(IndexedProduct::new("Cable (USB-C)", "1m", 10.0))
            .await;
        repo.add_product(IndexedProduct::new("Cable micro", "1m", 8.0))
            .await;

        let (hits, total) = repo
            .search(&pattern_plan("(USB-C)"), 0, 20)
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(hits[0].title, "Cable (USB-C)");
    }
}
