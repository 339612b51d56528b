//! Catalog Domain
//!
//! Products, brands and categories for the marketplace.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints + role guards
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, ownership checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, enums
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{
//!     handlers,
//!     repository::InMemoryProductRepository,
//!     service::ProductService,
//! };
//! # use axum_helpers::JwtVerifier;
//! # use core_config::jwt::JwtConfig;
//!
//! let repository = InMemoryProductRepository::new();
//! let service = ProductService::new(repository);
//! # let verifier = JwtVerifier::new(&JwtConfig { secret: "s".into(), issuer: "i".into() });
//! let router = handlers::products_router(service, verifier);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use handlers::{
    brands_router, categories_router, products_router, BrandsApiDoc, CategoriesApiDoc,
    ProductsApiDoc,
};
pub use models::{
    Brand, Category, CreateBrand, CreateCategory, CreateProduct, EntityStatus, Product,
    ProductFilter, ProductStatus, UpdateBrand, UpdateCategory, UpdateProduct,
};
pub use postgres::{PgBrandRepository, PgCategoryRepository, PgProductRepository};
pub use repository::{
    BrandRepository, CategoryRepository, InMemoryBrandRepository, InMemoryCategoryRepository,
    InMemoryProductRepository, ProductRepository,
};
pub use service::{BrandService, CategoryService, ProductService};
