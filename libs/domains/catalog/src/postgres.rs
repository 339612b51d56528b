use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::entity::{brands, categories, products};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Brand, Category, CreateBrand, CreateCategory, CreateProduct, EntityStatus, Product,
    ProductFilter, ProductStatus, UpdateBrand, UpdateCategory, UpdateProduct,
};
use crate::repository::{BrandRepository, CategoryRepository, ProductRepository};

fn internal(e: sea_orm::DbErr) -> CatalogError {
    CatalogError::Internal(format!("Database error: {}", e))
}

pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn filter_condition(filter: &ProductFilter) -> Condition {
        let mut condition = Condition::all();

        if filter.visible_only {
            condition = condition
                .add(products::Column::IsApproved.eq(true))
                .add(products::Column::IsActive.eq(true))
                .add(products::Column::Status.eq(ProductStatus::Available.to_string()));
        }
        if let Some(category) = filter.category {
            condition = condition.add(products::Column::CategoryId.eq(category));
        }
        if let Some(brand) = filter.brand {
            condition = condition.add(products::Column::BrandId.eq(brand));
        }
        if let Some(seller) = filter.seller {
            condition = condition.add(products::Column::SellerId.eq(seller));
        }
        if let Some(status) = filter.status {
            condition = condition.add(products::Column::Status.eq(status.to_string()));
        }
        if let Some(min) = filter.min_price {
            condition = condition.add(products::Column::Price.gte(min));
        }
        if let Some(max) = filter.max_price {
            condition = condition.add(products::Column::Price.lte(max));
        }

        condition
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: CreateProduct, seller_id: Uuid) -> CatalogResult<Product> {
        let active_model = products::ActiveModel::from_create(input, seller_id);

        let model = active_model.insert(&self.db).await.map_err(internal)?;

        tracing::info!(product_id = %model.id, seller_id = %seller_id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let model = products::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?;

        Ok(model.map(Into::into))
    }

    async fn list(&self, filter: ProductFilter) -> CatalogResult<(Vec<Product>, u64)> {
        let condition = Self::filter_condition(&filter);

        let total = products::Entity::find()
            .filter(condition.clone())
            .count(&self.db)
            .await
            .map_err(internal)?;

        let models = products::Entity::find()
            .filter(condition)
            .order_by_desc(products::Column::CreatedAt)
            .offset(filter.skip())
            .limit(filter.limit())
            .all(&self.db)
            .await
            .map_err(internal)?;

        Ok((models.into_iter().map(Into::into).collect(), total))
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> CatalogResult<Product> {
        let model = products::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?
            .ok_or(CatalogError::ProductNotFound(id))?;

        let mut product: Product = model.into();
        product.apply_update(input);

        let active_model: products::ActiveModel = (&product).into();
        let updated = active_model.update(&self.db).await.map_err(internal)?;

        tracing::info!(product_id = %id, "Updated product");
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let result = products::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(internal)?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn set_approved(&self, id: Uuid, approved: bool) -> CatalogResult<Product> {
        let model = products::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?
            .ok_or(CatalogError::ProductNotFound(id))?;

        let mut active_model: products::ActiveModel = model.into();
        active_model.is_approved = Set(approved);

        let updated = active_model.update(&self.db).await.map_err(internal)?;

        tracing::info!(product_id = %id, approved, "Set product approval");
        Ok(updated.into())
    }
}

pub struct PgBrandRepository {
    db: DatabaseConnection,
}

impl PgBrandRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BrandRepository for PgBrandRepository {
    async fn create(&self, input: CreateBrand) -> CatalogResult<Brand> {
        let exists = brands::Entity::find()
            .filter(brands::Column::Name.eq(&input.name))
            .one(&self.db)
            .await
            .map_err(internal)?
            .is_some();
        if exists {
            return Err(CatalogError::DuplicateName(input.name));
        }

        let brand = Brand::new(input);
        let active_model: brands::ActiveModel = (&brand).into();
        let model = active_model.insert(&self.db).await.map_err(internal)?;

        tracing::info!(brand_id = %model.id, "Created brand");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Brand>> {
        let model = brands::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?;

        Ok(model.map(Into::into))
    }

    async fn list(&self, status: Option<EntityStatus>) -> CatalogResult<Vec<Brand>> {
        let mut query = brands::Entity::find();
        if let Some(status) = status {
            query = query.filter(brands::Column::Status.eq(status.to_string()));
        }

        let models = query
            .order_by_asc(brands::Column::Name)
            .all(&self.db)
            .await
            .map_err(internal)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: Uuid, input: UpdateBrand) -> CatalogResult<Brand> {
        let model = brands::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?
            .ok_or(CatalogError::BrandNotFound(id))?;

        if let Some(ref new_name) = input.name {
            let name_taken = brands::Entity::find()
                .filter(brands::Column::Name.eq(new_name))
                .filter(brands::Column::Id.ne(id))
                .one(&self.db)
                .await
                .map_err(internal)?
                .is_some();
            if name_taken {
                return Err(CatalogError::DuplicateName(new_name.clone()));
            }
        }

        let mut active_model: brands::ActiveModel = model.into();
        if let Some(name) = input.name {
            active_model.name = Set(name);
        }
        if let Some(status) = input.status {
            active_model.status = Set(status.to_string());
        }

        let updated = active_model.update(&self.db).await.map_err(internal)?;
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let result = brands::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(internal)?;

        Ok(result.rows_affected > 0)
    }
}

pub struct PgCategoryRepository {
    db: DatabaseConnection,
}

impl PgCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(&self, input: CreateCategory) -> CatalogResult<Category> {
        let exists = categories::Entity::find()
            .filter(categories::Column::Name.eq(&input.name))
            .one(&self.db)
            .await
            .map_err(internal)?
            .is_some();
        if exists {
            return Err(CatalogError::DuplicateName(input.name));
        }

        let category = Category::new(input);
        let active_model: categories::ActiveModel = (&category).into();
        let model = active_model.insert(&self.db).await.map_err(internal)?;

        tracing::info!(category_id = %model.id, "Created category");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>> {
        let model = categories::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?;

        Ok(model.map(Into::into))
    }

    async fn list(&self, status: Option<EntityStatus>) -> CatalogResult<Vec<Category>> {
        let mut query = categories::Entity::find();
        if let Some(status) = status {
            query = query.filter(categories::Column::Status.eq(status.to_string()));
        }

        let models = query
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await
            .map_err(internal)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: Uuid, input: UpdateCategory) -> CatalogResult<Category> {
        let model = categories::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?
            .ok_or(CatalogError::CategoryNotFound(id))?;

        if let Some(ref new_name) = input.name {
            let name_taken = categories::Entity::find()
                .filter(categories::Column::Name.eq(new_name))
                .filter(categories::Column::Id.ne(id))
                .one(&self.db)
                .await
                .map_err(internal)?
                .is_some();
            if name_taken {
                return Err(CatalogError::DuplicateName(new_name.clone()));
            }
        }

        let mut active_model: categories::ActiveModel = model.into();
        if let Some(name) = input.name {
            active_model.name = Set(name);
        }
        if let Some(status) = input.status {
            active_model.status = Set(status.to_string());
        }

        let updated = active_model.update(&self.db).await.map_err(internal)?;
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let result = categories::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(internal)?;

        Ok(result.rows_affected > 0)
    }
}
