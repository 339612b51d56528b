//! Postgres-backed search over the catalog tables.
//!
//! Native full-text search is `to_tsvector`/`plainto_tsquery` against the
//! `idx_products_fulltext` GIN index with `ts_rank` relevance; the pattern
//! path is ILIKE word alternation. Hits are left-joined with category name,
//! brand name and the seller's verification flag.

use async_trait::async_trait;
use domain_catalog::entity::{brands, categories};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait, FromQueryResult,
    QueryFilter, QuerySelect, Statement, Value,
};
use uuid::Uuid;

use crate::error::{SearchError, SearchResult};
use crate::models::ProductHit;
use crate::query::{PlanSort, QueryPlan, TextQuery};
use crate::repository::SearchRepository;

const FULLTEXT_INDEX: &str = "idx_products_fulltext";
const TSVECTOR: &str = "to_tsvector('english', p.title || ' ' || p.description)";

fn internal(e: sea_orm::DbErr) -> SearchError {
    SearchError::Internal(format!("Database error: {}", e))
}

/// True when a database error points at the text-search expression rather
/// than the connection or some other part of the query.
fn is_text_search_failure(e: &sea_orm::DbErr) -> bool {
    let message = e.to_string().to_lowercase();
    ["tsvector", "tsquery", "ts_rank", "text search"]
        .iter()
        .any(|marker| message.contains(marker))
}

/// Escape LIKE wildcards so user input matches literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Accumulates positional binds while SQL fragments are assembled.
#[derive(Default)]
struct SqlParams {
    values: Vec<Value>,
}

impl SqlParams {
    fn bind<V: Into<Value>>(&mut self, value: V) -> String {
        self.values.push(value.into());
        format!("${}", self.values.len())
    }
}

#[derive(Debug, FromQueryResult)]
struct HitRow {
    id: Uuid,
    title: String,
    price: f64,
    discounted_price: Option<f64>,
    images: serde_json::Value,
    ratings_average: f64,
    ratings_quantity: i32,
    created_at: DateTimeWithTimeZone,
    category_name: Option<String>,
    brand_name: Option<String>,
    seller_verified: bool,
}

impl From<HitRow> for ProductHit {
    fn from(row: HitRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            price: row.price,
            discounted_price: row.discounted_price,
            images: serde_json::from_value(row.images).unwrap_or_default(),
            ratings_average: row.ratings_average,
            ratings_quantity: row.ratings_quantity,
            created_at: row.created_at.into(),
            category_name: row.category_name,
            brand_name: row.brand_name,
            seller_verified: row.seller_verified,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct CountRow {
    total: i64,
}

pub struct PgSearchRepository {
    db: DatabaseConnection,
}

impl PgSearchRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// WHERE clause for a plan. Only visible products are searched.
    fn where_clause(plan: &QueryPlan, params: &mut SqlParams) -> String {
        let mut clauses = vec![
            "p.is_approved".to_string(),
            "p.is_active".to_string(),
            "p.status = 'available'".to_string(),
        ];

        if let Some(id) = plan.base.category_id {
            clauses.push(format!("p.category_id = {}", params.bind(id)));
        }
        if let Some(id) = plan.base.brand_id {
            clauses.push(format!("p.brand_id = {}", params.bind(id)));
        }
        if let Some(min) = plan.base.min_price {
            clauses.push(format!("p.price >= {}", params.bind(min)));
        }
        if let Some(max) = plan.base.max_price {
            clauses.push(format!("p.price <= {}", params.bind(max)));
        }

        match &plan.text {
            None => {}
            Some(TextQuery::FullText { term }) => {
                clauses.push(format!(
                    "{} @@ plainto_tsquery('english', {})",
                    TSVECTOR,
                    params.bind(term.clone())
                ));
            }
            Some(TextQuery::Pattern {
                words,
                brand_ids,
                category_ids,
            }) => {
                let mut alternatives = Vec::new();

                if let [word] = words.as_slice() {
                    let escaped = escape_like(word);
                    alternatives.push(format!(
                        "p.title ILIKE {}",
                        params.bind(format!("{}%", escaped))
                    ));
                    alternatives.push(format!(
                        "p.title ILIKE {}",
                        params.bind(format!("%{}%", escaped))
                    ));
                } else {
                    for word in words {
                        alternatives.push(format!(
                            "p.title ILIKE {}",
                            params.bind(format!("%{}%", escape_like(word)))
                        ));
                    }
                }

                for word in words {
                    alternatives.push(format!(
                        "p.description ILIKE {}",
                        params.bind(format!("%{}%", escape_like(word)))
                    ));
                }

                if !brand_ids.is_empty() {
                    let binds: Vec<String> =
                        brand_ids.iter().map(|id| params.bind(*id)).collect();
                    alternatives.push(format!("p.brand_id IN ({})", binds.join(", ")));
                }
                if !category_ids.is_empty() {
                    let binds: Vec<String> =
                        category_ids.iter().map(|id| params.bind(*id)).collect();
                    alternatives.push(format!("p.category_id IN ({})", binds.join(", ")));
                }

                if !alternatives.is_empty() {
                    clauses.push(format!("({})", alternatives.join(" OR ")));
                }
            }
        }

        clauses.join(" AND ")
    }

    fn order_clause(plan: &QueryPlan, params: &mut SqlParams) -> String {
        match plan.sort {
            PlanSort::Relevance => {
                let term = match &plan.text {
                    Some(TextQuery::FullText { term }) => term.clone(),
                    _ => plan.term.clone(),
                };
                format!(
                    "ts_rank({}, plainto_tsquery('english', {})) DESC, p.created_at DESC",
                    TSVECTOR,
                    params.bind(term)
                )
            }
            PlanSort::Rated => {
                "p.ratings_average DESC, p.ratings_quantity DESC, p.created_at DESC".to_string()
            }
            PlanSort::Newest => "p.created_at DESC".to_string(),
            PlanSort::PriceAsc => "p.price ASC, p.created_at DESC".to_string(),
            PlanSort::PriceDesc => "p.price DESC, p.created_at DESC".to_string(),
        }
    }

    /// A full-text plan failure that implicates the text-search expression
    /// itself is reported as unsupported so the executor can retry on the
    /// pattern path. Anything else (connection loss, timeouts) propagates
    /// unchanged.
    fn map_search_error(plan: &QueryPlan, e: sea_orm::DbErr) -> SearchError {
        if matches!(plan.text, Some(TextQuery::FullText { .. })) && is_text_search_failure(&e) {
            tracing::warn!(error = %e, "Full-text query refused, reporting as unsupported");
            SearchError::TextSearchUnsupported
        } else {
            internal(e)
        }
    }
}

#[async_trait]
impl SearchRepository for PgSearchRepository {
    async fn has_text_index(&self) -> bool {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT 1 AS one FROM pg_indexes WHERE schemaname = 'public' AND indexname = $1",
            [FULLTEXT_INDEX.into()],
        );

        match self.db.query_one(stmt).await {
            Ok(row) => row.is_some(),
            Err(e) => {
                tracing::warn!(error = %e, "Text index probe failed, assuming no index");
                false
            }
        }
    }

    async fn find_brand_ids(&self, term: &str) -> SearchResult<Vec<Uuid>> {
        brands::Entity::find()
            .select_only()
            .column(brands::Column::Id)
            .filter(brands::Column::Status.eq("active"))
            .filter(Expr::col(brands::Column::Name).ilike(format!("%{}%", escape_like(term))))
            .into_tuple::<Uuid>()
            .all(&self.db)
            .await
            .map_err(internal)
    }

    async fn find_category_ids(&self, term: &str) -> SearchResult<Vec<Uuid>> {
        categories::Entity::find()
            .select_only()
            .column(categories::Column::Id)
            .filter(categories::Column::Status.eq("active"))
            .filter(Expr::col(categories::Column::Name).ilike(format!("%{}%", escape_like(term))))
            .into_tuple::<Uuid>()
            .all(&self.db)
            .await
            .map_err(internal)
    }

    async fn search(
        &self,
        plan: &QueryPlan,
        skip: u64,
        limit: u64,
    ) -> SearchResult<(Vec<ProductHit>, u64)> {
        let mut count_params = SqlParams::default();
        let count_sql = format!(
            "SELECT COUNT(*) AS total FROM products p WHERE {}",
            Self::where_clause(plan, &mut count_params)
        );

        let total = CountRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            count_sql,
            count_params.values,
        ))
        .one(&self.db)
        .await
        .map_err(|e| Self::map_search_error(plan, e))?
        .map(|row| row.total.max(0) as u64)
        .unwrap_or(0);

        let mut params = SqlParams::default();
        let where_clause = Self::where_clause(plan, &mut params);
        let order_clause = Self::order_clause(plan, &mut params);
        let limit_bind = params.bind(i64::try_from(limit).unwrap_or(i64::MAX));
        let offset_bind = params.bind(i64::try_from(skip).unwrap_or(i64::MAX));

        let page_sql = format!(
            "SELECT p.id, p.title, p.price, p.discounted_price, p.images, \
             p.ratings_average, p.ratings_quantity, p.created_at, \
             c.name AS category_name, b.name AS brand_name, \
             COALESCE(u.seller_verified, FALSE) AS seller_verified \
             FROM products p \
             LEFT JOIN categories c ON c.id = p.category_id \
             LEFT JOIN brands b ON b.id = p.brand_id \
             LEFT JOIN users u ON u.id = p.seller_id \
             WHERE {} ORDER BY {} LIMIT {} OFFSET {}",
            where_clause, order_clause, limit_bind, offset_bind
        );

        let rows = HitRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            page_sql,
            params.values,
        ))
        .all(&self.db)
        .await
        .map_err(|e| Self::map_search_error(plan, e))?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BaseFilter;

    fn pattern_plan(words: &[&str]) -> QueryPlan {
        QueryPlan {
            term: words.join(" "),
            base: BaseFilter::default(),
            text: Some(TextQuery::Pattern {
                words: words.iter().map(|w| w.to_string()).collect(),
                brand_ids: Vec::new(),
                category_ids: Vec::new(),
            }),
            sort: PlanSort::Rated,
        }
    }

    #[test]
    fn test_like_wildcards_escaped() {
        assert_eq!(escape_like("100%_\\"), "100\\%\\_\\\\");
    }

    #[test]
    fn test_single_word_gets_starts_with_and_contains() {
        let mut params = SqlParams::default();
        let sql = PgSearchRepository::where_clause(&pattern_plan(&["mug"]), &mut params);

        assert!(sql.contains("p.title ILIKE $1"));
        assert!(sql.contains("p.title ILIKE $2"));
        assert_eq!(params.values.len(), 3);
    }

    #[test]
    fn test_full_text_clause_uses_tsquery() {
        let plan = QueryPlan {
            term: "coffee mug".to_string(),
            base: BaseFilter::default(),
            text: Some(TextQuery::FullText {
                term: "coffee mug".to_string(),
            }),
            sort: PlanSort::Relevance,
        };

        let mut params = SqlParams::default();
        let sql = PgSearchRepository::where_clause(&plan, &mut params);
        assert!(sql.contains("plainto_tsquery('english', $1)"));

        let order = PgSearchRepository::order_clause(&plan, &mut params);
        assert!(order.starts_with("ts_rank"));
    }

    #[test]
    fn test_base_filters_always_include_visibility() {
        let mut params = SqlParams::default();
        let mut plan = pattern_plan(&["mug"]);
        plan.base.min_price = Some(5.0);

        let sql = PgSearchRepository::where_clause(&plan, &mut params);
        assert!(sql.contains("p.is_approved"));
        assert!(sql.contains("p.is_active"));
        assert!(sql.contains("p.status = 'available'"));
        assert!(sql.contains("p.price >= $1"));
    }

    fn full_text_plan(term: &str) -> QueryPlan {
        QueryPlan {
            term: term.to_string(),
            base: BaseFilter::default(),
            text: Some(TextQuery::FullText {
                term: term.to_string(),
            }),
            sort: PlanSort::Relevance,
        }
    }

    #[test]
    fn test_tsquery_failure_reported_as_unsupported() {
        let e = sea_orm::DbErr::Custom(
            "function plainto_tsquery(unknown, unknown) does not exist".to_string(),
        );
        let mapped = PgSearchRepository::map_search_error(&full_text_plan("mug"), e);
        assert!(matches!(mapped, SearchError::TextSearchUnsupported));
    }

    #[test]
    fn test_unrelated_failure_on_full_text_plan_propagates() {
        let e = sea_orm::DbErr::Custom("connection reset by peer".to_string());
        let mapped = PgSearchRepository::map_search_error(&full_text_plan("mug"), e);
        assert!(matches!(mapped, SearchError::Internal(_)));
    }

    #[test]
    fn test_tsquery_failure_on_pattern_plan_propagates() {
        let e = sea_orm::DbErr::Custom("syntax error in tsquery".to_string());
        let mapped = PgSearchRepository::map_search_error(&pattern_plan(&["mug"]), e);
        assert!(matches!(mapped, SearchError::Internal(_)));
    }

    #[test]
    fn test_reference_ids_expand_to_in_lists() {
        let mut plan = pattern_plan(&["acme"]);
        if let Some(TextQuery::Pattern { brand_ids, .. }) = &mut plan.text {
            brand_ids.push(Uuid::now_v7());
            brand_ids.push(Uuid::now_v7());
        }

        // A single word consumes $1..$3 (starts-with, contains, description),
        // so the ids bind after them.
        let mut params = SqlParams::default();
        let sql = PgSearchRepository::where_clause(&plan, &mut params);
        assert!(sql.contains("p.brand_id IN ($4, $5)"));
        assert_eq!(params.values.len(), 5);
    }
}
