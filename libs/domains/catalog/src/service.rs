use axum_helpers::AuthUser;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Brand, Category, CreateBrand, CreateCategory, CreateProduct, EntityStatus, Product,
    ProductFilter, UpdateBrand, UpdateCategory, UpdateProduct,
};
use crate::repository::{BrandRepository, CategoryRepository, ProductRepository};

/// Service layer for product business logic
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a listing owned by the calling seller.
    pub async fn create_product(
        &self,
        input: CreateProduct,
        caller: &AuthUser,
    ) -> CatalogResult<Product> {
        caller
            .require_seller()
            .map_err(|_| CatalogError::Validation("Seller role required".to_string()))?;

        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        if let Some(discounted) = input.discounted_price {
            if discounted >= input.price {
                return Err(CatalogError::Validation(
                    "Discounted price must be lower than the regular price".to_string(),
                ));
            }
        }

        self.repository.create(input, caller.id).await
    }

    /// List products. Non-admin callers only see publicly visible listings.
    pub async fn list_products(
        &self,
        mut filter: ProductFilter,
        caller: Option<&AuthUser>,
    ) -> CatalogResult<(Vec<Product>, u64)> {
        filter.visible_only = !caller.is_some_and(|u| u.is_admin());
        self.repository.list(filter).await
    }

    /// Get a product. Hidden listings are only revealed to the owning
    /// seller and admins; everyone else gets a 404.
    pub async fn get_product(
        &self,
        id: Uuid,
        caller: Option<&AuthUser>,
    ) -> CatalogResult<Product> {
        let product = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))?;

        let privileged =
            caller.is_some_and(|u| u.is_admin() || u.id == product.seller_id);
        if !product.is_visible() && !privileged {
            return Err(CatalogError::ProductNotFound(id));
        }

        Ok(product)
    }

    /// Update a product. Only the owning seller may edit a listing.
    pub async fn update_product(
        &self,
        id: Uuid,
        input: UpdateProduct,
        caller: &AuthUser,
    ) -> CatalogResult<Product> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        let product = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))?;

        if product.seller_id != caller.id {
            return Err(CatalogError::Forbidden(id));
        }

        self.repository.update(id, input).await
    }

    /// Delete a product as the owning seller or an admin.
    pub async fn delete_product(&self, id: Uuid, caller: &AuthUser) -> CatalogResult<()> {
        let product = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))?;

        if !caller.can_access(product.seller_id) {
            return Err(CatalogError::Forbidden(id));
        }

        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(CatalogError::ProductNotFound(id));
        }

        Ok(())
    }

    /// Approve or revoke a listing (admin only).
    pub async fn approve_product(
        &self,
        id: Uuid,
        approved: bool,
        caller: &AuthUser,
    ) -> CatalogResult<Product> {
        caller
            .require_admin()
            .map_err(|_| CatalogError::Forbidden(id))?;

        self.repository.set_approved(id, approved).await
    }
}

/// Service layer for brand management
#[derive(Clone)]
pub struct BrandService<R: BrandRepository> {
    repository: Arc<R>,
}

impl<R: BrandRepository> BrandService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn create_brand(&self, input: CreateBrand) -> CatalogResult<Brand> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;
        self.repository.create(input).await
    }

    /// Public listings only include active brands; admins see everything.
    pub async fn list_brands(&self, caller: Option<&AuthUser>) -> CatalogResult<Vec<Brand>> {
        let status = if caller.is_some_and(|u| u.is_admin()) {
            None
        } else {
            Some(EntityStatus::Active)
        };
        self.repository.list(status).await
    }

    pub async fn get_brand(&self, id: Uuid) -> CatalogResult<Brand> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::BrandNotFound(id))
    }

    pub async fn update_brand(&self, id: Uuid, input: UpdateBrand) -> CatalogResult<Brand> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;
        self.repository.update(id, input).await
    }

    pub async fn delete_brand(&self, id: Uuid) -> CatalogResult<()> {
        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(CatalogError::BrandNotFound(id));
        }
        Ok(())
    }
}

/// Service layer for category management
#[derive(Clone)]
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn create_category(&self, input: CreateCategory) -> CatalogResult<Category> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;
        self.repository.create(input).await
    }

    pub async fn list_categories(
        &self,
        caller: Option<&AuthUser>,
    ) -> CatalogResult<Vec<Category>> {
        let status = if caller.is_some_and(|u| u.is_admin()) {
            None
        } else {
            Some(EntityStatus::Active)
        };
        self.repository.list(status).await
    }

    pub async fn get_category(&self, id: Uuid) -> CatalogResult<Category> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))
    }

    pub async fn update_category(
        &self,
        id: Uuid,
        input: UpdateCategory,
    ) -> CatalogResult<Category> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;
        self.repository.update(id, input).await
    }

    pub async fn delete_category(&self, id: Uuid) -> CatalogResult<()> {
        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(CatalogError::CategoryNotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use axum_helpers::Role;

    fn seller(id: Uuid) -> AuthUser {
        AuthUser {
            id,
            role: Role::Seller,
        }
    }

    fn admin() -> AuthUser {
        AuthUser {
            id: Uuid::now_v7(),
            role: Role::Admin,
        }
    }

    fn plain_user() -> AuthUser {
        AuthUser {
            id: Uuid::now_v7(),
            role: Role::User,
        }
    }

    fn sample_create() -> CreateProduct {
        CreateProduct {
            title: "Desk lamp".to_string(),
            description: "Adjustable arm".to_string(),
            price: 40.0,
            discounted_price: None,
            images: vec![],
            category_id: None,
            brand_id: None,
        }
    }

    fn sample_product(seller_id: Uuid) -> Product {
        let mut product = Product::new(sample_create(), seller_id);
        product.is_approved = true;
        product
    }

    #[tokio::test]
    async fn test_plain_user_cannot_create_product() {
        let mock_repo = MockProductRepository::new();
        let service = ProductService::new(mock_repo);

        let result = service.create_product(sample_create(), &plain_user()).await;
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[tokio::test]
    async fn test_discounted_price_must_undercut_price() {
        let mock_repo = MockProductRepository::new();
        let service = ProductService::new(mock_repo);
        let caller = seller(Uuid::now_v7());

        let input = CreateProduct {
            discounted_price: Some(50.0),
            ..sample_create()
        };

        let result = service.create_product(input, &caller).await;
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_denied_for_other_seller() {
        let owner_id = Uuid::now_v7();
        let product = sample_product(owner_id);
        let product_id = product.id;

        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(product.clone())));

        let service = ProductService::new(mock_repo);
        let other = seller(Uuid::now_v7());

        let result = service
            .update_product(product_id, UpdateProduct::default(), &other)
            .await;
        assert!(matches!(result, Err(CatalogError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_admin_can_delete_any_product() {
        let owner_id = Uuid::now_v7();
        let product = sample_product(owner_id);
        let product_id = product.id;

        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(product.clone())));
        mock_repo.expect_delete().returning(|_| Ok(true));

        let service = ProductService::new(mock_repo);

        assert!(service.delete_product(product_id, &admin()).await.is_ok());
    }

    #[tokio::test]
    async fn test_hidden_product_is_404_for_strangers() {
        let owner_id = Uuid::now_v7();
        let mut product = sample_product(owner_id);
        product.is_approved = false;
        let product_id = product.id;

        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(product.clone())));

        let service = ProductService::new(mock_repo);

        let result = service.get_product(product_id, None).await;
        assert!(matches!(result, Err(CatalogError::ProductNotFound(_))));

        let owner = seller(owner_id);
        let result = service.get_product(product_id, Some(&owner)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_approve_requires_admin() {
        let mock_repo = MockProductRepository::new();
        let service = ProductService::new(mock_repo);
        let caller = seller(Uuid::now_v7());

        let result = service
            .approve_product(Uuid::now_v7(), true, &caller)
            .await;
        assert!(matches!(result, Err(CatalogError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_list_forces_visible_only_for_anonymous() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_list()
            .withf(|filter| filter.visible_only)
            .returning(|_| Ok((vec![], 0)));

        let service = ProductService::new(mock_repo);
        service
            .list_products(ProductFilter::default(), None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_list_keeps_hidden_for_admin() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_list()
            .withf(|filter| !filter.visible_only)
            .returning(|_| Ok((vec![], 0)));

        let service = ProductService::new(mock_repo);
        let caller = admin();
        service
            .list_products(ProductFilter::default(), Some(&caller))
            .await
            .unwrap();
    }
}
