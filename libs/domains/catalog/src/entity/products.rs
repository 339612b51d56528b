use crate::models::{CreateProduct, Product, ProductStatus};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub price: f64,
    pub discounted_price: Option<f64>,
    pub images: Json,
    pub category_id: Option<Uuid>,
    pub brand_id: Option<Uuid>,
    pub seller_id: Uuid,
    pub ratings_average: f64,
    pub ratings_quantity: i32,
    pub sold: i32,
    pub is_approved: bool,
    pub is_active: bool,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::brands::Entity",
        from = "Column::BrandId",
        to = "super::brands::Column::Id"
    )]
    Brand,
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id"
    )]
    Category,
}

impl Related<super::brands::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Brand.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        let images: Vec<String> = serde_json::from_value(model.images.clone()).unwrap_or_default();

        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            price: model.price,
            discounted_price: model.discounted_price,
            images,
            category_id: model.category_id,
            brand_id: model.brand_id,
            seller_id: model.seller_id,
            ratings_average: model.ratings_average,
            ratings_quantity: model.ratings_quantity,
            sold: model.sold,
            is_approved: model.is_approved,
            is_active: model.is_active,
            status: ProductStatus::from_str(&model.status).unwrap_or_default(),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<&Product> for ActiveModel {
    fn from(product: &Product) -> Self {
        ActiveModel {
            id: Set(product.id),
            title: Set(product.title.clone()),
            description: Set(product.description.clone()),
            price: Set(product.price),
            discounted_price: Set(product.discounted_price),
            images: Set(serde_json::json!(product.images)),
            category_id: Set(product.category_id),
            brand_id: Set(product.brand_id),
            seller_id: Set(product.seller_id),
            ratings_average: Set(product.ratings_average),
            ratings_quantity: Set(product.ratings_quantity),
            sold: Set(product.sold),
            is_approved: Set(product.is_approved),
            is_active: Set(product.is_active),
            status: Set(product.status.to_string()),
            created_at: Set(product.created_at.into()),
            updated_at: Set(product.updated_at.into()),
        }
    }
}

impl ActiveModel {
    pub fn from_create(input: CreateProduct, seller_id: Uuid) -> Self {
        (&Product::new(input, seller_id)).into()
    }
}
