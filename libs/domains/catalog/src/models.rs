use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Product stock status
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProductStatus {
    #[default]
    Available,
    OutOfStock,
    Discontinued,
}

/// Activation status shared by brands and categories
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EntityStatus {
    #[default]
    Active,
    Inactive,
}

/// Product listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub discounted_price: Option<f64>,
    /// Image URLs
    pub images: Vec<String>,
    pub category_id: Option<Uuid>,
    pub brand_id: Option<Uuid>,
    /// Seller who owns the listing
    pub seller_id: Uuid,
    pub ratings_average: f64,
    pub ratings_quantity: i32,
    /// Units sold
    pub sold: i32,
    /// Set by an admin before the product becomes publicly visible
    pub is_approved: bool,
    /// Seller-controlled visibility toggle
    pub is_active: bool,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether the product appears in public listings and search results.
    pub fn is_visible(&self) -> bool {
        self.is_approved && self.is_active && self.status == ProductStatus::Available
    }
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 5000))]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0.0))]
    pub discounted_price: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    pub category_id: Option<Uuid>,
    pub brand_id: Option<Uuid>,
}

/// DTO for updating an existing product
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 0.0))]
    pub discounted_price: Option<f64>,
    pub images: Option<Vec<String>>,
    pub category_id: Option<Uuid>,
    pub brand_id: Option<Uuid>,
    pub status: Option<ProductStatus>,
    pub is_active: Option<bool>,
}

/// Query filters for listing products
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    pub category: Option<Uuid>,
    pub brand: Option<Uuid>,
    pub seller: Option<Uuid>,
    pub status: Option<ProductStatus>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Restrict results to publicly visible products. Forced on for
    /// anonymous and non-admin callers.
    #[serde(skip)]
    #[param(ignore)]
    pub visible_only: bool,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    20
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category: None,
            brand: None,
            seller: None,
            status: None,
            min_price: None,
            max_price: None,
            page: default_page(),
            limit: default_limit(),
            visible_only: true,
        }
    }
}

impl ProductFilter {
    pub fn limit(&self) -> u64 {
        self.limit.clamp(1, 100)
    }

    pub fn skip(&self) -> u64 {
        (self.page.max(1) - 1) * self.limit()
    }
}

impl Product {
    pub fn new(input: CreateProduct, seller_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            description: input.description,
            price: input.price,
            discounted_price: input.discounted_price,
            images: input.images,
            category_id: input.category_id,
            brand_id: input.brand_id,
            seller_id,
            ratings_average: 0.0,
            ratings_quantity: 0,
            sold: 0,
            is_approved: false,
            is_active: true,
            status: ProductStatus::Available,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(discounted_price) = update.discounted_price {
            self.discounted_price = Some(discounted_price);
        }
        if let Some(images) = update.images {
            self.images = images;
        }
        if let Some(category_id) = update.category_id {
            self.category_id = Some(category_id);
        }
        if let Some(brand_id) = update.brand_id {
            self.brand_id = Some(brand_id);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        self.updated_at = Utc::now();
    }
}

/// Brand entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Brand {
    pub id: Uuid,
    pub name: String,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
}

/// DTO for creating a brand
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBrand {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// DTO for updating a brand
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBrand {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub status: Option<EntityStatus>,
}

impl Brand {
    pub fn new(input: CreateBrand) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            status: EntityStatus::Active,
            created_at: Utc::now(),
        }
    }
}

/// Category entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
}

/// DTO for creating a category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// DTO for updating a category
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub status: Option<EntityStatus>,
}

impl Category {
    pub fn new(input: CreateCategory) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            status: EntityStatus::Active,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product::new(
            CreateProduct {
                title: "Wireless headphones".to_string(),
                description: "Noise cancelling".to_string(),
                price: 99.0,
                discounted_price: None,
                images: vec![],
                category_id: None,
                brand_id: None,
            },
            Uuid::now_v7(),
        )
    }

    #[test]
    fn test_new_product_is_not_visible_until_approved() {
        let mut product = sample_product();
        assert!(!product.is_visible());

        product.is_approved = true;
        assert!(product.is_visible());
    }

    #[test]
    fn test_deactivated_product_is_hidden() {
        let mut product = sample_product();
        product.is_approved = true;
        product.is_active = false;
        assert!(!product.is_visible());
    }

    #[test]
    fn test_out_of_stock_product_is_hidden() {
        let mut product = sample_product();
        product.is_approved = true;
        product.status = ProductStatus::OutOfStock;
        assert!(!product.is_visible());
    }

    #[test]
    fn test_apply_update_touches_updated_at() {
        let mut product = sample_product();
        let before = product.updated_at;

        product.apply_update(UpdateProduct {
            price: Some(79.0),
            ..Default::default()
        });

        assert_eq!(product.price, 79.0);
        assert!(product.updated_at >= before);
    }

    #[test]
    fn test_filter_limit_clamped() {
        let filter = ProductFilter {
            limit: 1000,
            ..Default::default()
        };
        assert_eq!(filter.limit(), 100);
    }
}
