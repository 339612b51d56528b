use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Brand, Category, CreateBrand, CreateCategory, CreateProduct, EntityStatus, Product,
    ProductFilter, UpdateBrand, UpdateCategory, UpdateProduct,
};

/// Repository trait for product persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, input: CreateProduct, seller_id: Uuid) -> CatalogResult<Product>;

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>>;

    /// List products with filters, returning the page and the total match count.
    async fn list(&self, filter: ProductFilter) -> CatalogResult<(Vec<Product>, u64)>;

    async fn update(&self, id: Uuid, input: UpdateProduct) -> CatalogResult<Product>;

    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;

    /// Flip the admin approval flag.
    async fn set_approved(&self, id: Uuid, approved: bool) -> CatalogResult<Product>;
}

/// Repository trait for brand persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BrandRepository: Send + Sync {
    async fn create(&self, input: CreateBrand) -> CatalogResult<Brand>;

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Brand>>;

    /// List brands, optionally restricted to a status.
    async fn list(&self, status: Option<EntityStatus>) -> CatalogResult<Vec<Brand>>;

    async fn update(&self, id: Uuid, input: UpdateBrand) -> CatalogResult<Brand>;

    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;
}

/// Repository trait for category persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, input: CreateCategory) -> CatalogResult<Category>;

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>>;

    async fn list(&self, status: Option<EntityStatus>) -> CatalogResult<Vec<Category>>;

    async fn update(&self, id: Uuid, input: UpdateCategory) -> CatalogResult<Category>;

    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct, seller_id: Uuid) -> CatalogResult<Product> {
        let mut products = self.products.write().await;
        let product = Product::new(input, seller_id);
        products.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list(&self, filter: ProductFilter) -> CatalogResult<(Vec<Product>, u64)> {
        let products = self.products.read().await;

        let mut result: Vec<Product> = products
            .values()
            .filter(|p| {
                if filter.visible_only && !p.is_visible() {
                    return false;
                }
                if let Some(category) = filter.category {
                    if p.category_id != Some(category) {
                        return false;
                    }
                }
                if let Some(brand) = filter.brand {
                    if p.brand_id != Some(brand) {
                        return false;
                    }
                }
                if let Some(seller) = filter.seller {
                    if p.seller_id != seller {
                        return false;
                    }
                }
                if let Some(status) = filter.status {
                    if p.status != status {
                        return false;
                    }
                }
                if let Some(min) = filter.min_price {
                    if p.price < min {
                        return false;
                    }
                }
                if let Some(max) = filter.max_price {
                    if p.price > max {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();

        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = result.len() as u64;
        let page: Vec<Product> = result
            .into_iter()
            .skip(filter.skip() as usize)
            .take(filter.limit() as usize)
            .collect();

        Ok((page, total))
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> CatalogResult<Product> {
        let mut products = self.products.write().await;
        let product = products
            .get_mut(&id)
            .ok_or(CatalogError::ProductNotFound(id))?;

        product.apply_update(input);
        let updated = product.clone();

        tracing::info!(product_id = %id, "Updated product");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_some() {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn set_approved(&self, id: Uuid, approved: bool) -> CatalogResult<Product> {
        let mut products = self.products.write().await;
        let product = products
            .get_mut(&id)
            .ok_or(CatalogError::ProductNotFound(id))?;

        product.is_approved = approved;
        product.updated_at = chrono::Utc::now();

        Ok(product.clone())
    }
}

/// In-memory implementation of BrandRepository
#[derive(Debug, Default, Clone)]
pub struct InMemoryBrandRepository {
    brands: Arc<RwLock<HashMap<Uuid, Brand>>>,
}

impl InMemoryBrandRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BrandRepository for InMemoryBrandRepository {
    async fn create(&self, input: CreateBrand) -> CatalogResult<Brand> {
        let mut brands = self.brands.write().await;

        let name_exists = brands
            .values()
            .any(|b| b.name.to_lowercase() == input.name.to_lowercase());
        if name_exists {
            return Err(CatalogError::DuplicateName(input.name));
        }

        let brand = Brand::new(input);
        brands.insert(brand.id, brand.clone());
        Ok(brand)
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Brand>> {
        let brands = self.brands.read().await;
        Ok(brands.get(&id).cloned())
    }

    async fn list(&self, status: Option<EntityStatus>) -> CatalogResult<Vec<Brand>> {
        let brands = self.brands.read().await;

        let mut result: Vec<Brand> = brands
            .values()
            .filter(|b| status.is_none_or(|s| b.status == s))
            .cloned()
            .collect();
        result.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(result)
    }

    async fn update(&self, id: Uuid, input: UpdateBrand) -> CatalogResult<Brand> {
        let mut brands = self.brands.write().await;

        if let Some(ref new_name) = input.name {
            let name_exists = brands
                .values()
                .any(|b| b.id != id && b.name.to_lowercase() == new_name.to_lowercase());
            if name_exists {
                return Err(CatalogError::DuplicateName(new_name.clone()));
            }
        }

        let brand = brands.get_mut(&id).ok_or(CatalogError::BrandNotFound(id))?;
        if let Some(name) = input.name {
            brand.name = name;
        }
        if let Some(status) = input.status {
            brand.status = status;
        }

        Ok(brand.clone())
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let mut brands = self.brands.write().await;
        Ok(brands.remove(&id).is_some())
    }
}

/// In-memory implementation of CategoryRepository
#[derive(Debug, Default, Clone)]
pub struct InMemoryCategoryRepository {
    categories: Arc<RwLock<HashMap<Uuid, Category>>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, input: CreateCategory) -> CatalogResult<Category> {
        let mut categories = self.categories.write().await;

        let name_exists = categories
            .values()
            .any(|c| c.name.to_lowercase() == input.name.to_lowercase());
        if name_exists {
            return Err(CatalogError::DuplicateName(input.name));
        }

        let category = Category::new(input);
        categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.get(&id).cloned())
    }

    async fn list(&self, status: Option<EntityStatus>) -> CatalogResult<Vec<Category>> {
        let categories = self.categories.read().await;

        let mut result: Vec<Category> = categories
            .values()
            .filter(|c| status.is_none_or(|s| c.status == s))
            .cloned()
            .collect();
        result.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(result)
    }

    async fn update(&self, id: Uuid, input: UpdateCategory) -> CatalogResult<Category> {
        let mut categories = self.categories.write().await;

        if let Some(ref new_name) = input.name {
            let name_exists = categories
                .values()
                .any(|c| c.id != id && c.name.to_lowercase() == new_name.to_lowercase());
            if name_exists {
                return Err(CatalogError::DuplicateName(new_name.clone()));
            }
        }

        let category = categories
            .get_mut(&id)
            .ok_or(CatalogError::CategoryNotFound(id))?;
        if let Some(name) = input.name {
            category.name = name;
        }
        if let Some(status) = input.status {
            category.status = status;
        }

        Ok(category.clone())
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let mut categories = self.categories.write().await;
        Ok(categories.remove(&id).is_some())
    }
}
