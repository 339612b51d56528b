//! Search Domain
//!
//! Product search with a two-tier result cache, a strategy-selecting query
//! builder and an executor with a single degradation step.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← GET /api/search
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐      ┌──────────────┐
//! │   Service   │─────►│ SearchCache  │  ← Redis (optional) + local FIFO
//! └──────┬──────┘      └──────────────┘
//!        │
//! ┌──────▼──────┐
//! │QueryBuilder │  ← full-text vs pattern strategy
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Executor   │  ← runs the plan, retries refused full-text once
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Postgres (tsvector / ILIKE) or in-memory
//! └─────────────┘
//! ```
//!
//! The client never learns which strategy served a request; cache failures
//! degrade silently to a miss.

pub mod cache;
pub mod error;
pub mod executor;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod query;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use cache::{CacheBackend, LocalBackend, RedisBackend, SearchCache, DEFAULT_TTL};
pub use error::{SearchError, SearchResult};
pub use executor::SearchExecutor;
pub use handlers::{search_router, ApiDoc};
pub use models::{
    BaseFilter, ProductHit, SearchCacheKey, SearchPage, SearchParams, SearchResponse, SortOrder,
};
pub use postgres::PgSearchRepository;
pub use query::{PlanSort, QueryBuilder, QueryPlan, TextQuery};
pub use repository::{IndexedProduct, InMemorySearchRepository, SearchRepository};
pub use service::SearchService;
