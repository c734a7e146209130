//! Product entity - Represents one catalog item of the shoe store.
//!
//! Each product carries a unique `article` code, display name, unit of
//! measure, base price, current discount percentage, and stock level.
//! Supplier, category, description, and `photo_path` are optional because
//! imported data frequently leaves them blank.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Vendor article code, the product's natural key
    #[sea_orm(unique)]
    pub article: String,
    /// Human-readable product name
    pub name: String,
    /// Unit of measure (e.g., "шт")
    pub unit: String,
    /// Base price before discount, non-negative
    pub price: f64,
    /// Supplier name, None when unknown
    pub supplier: Option<String>,
    /// Category name, None when unknown
    pub category: Option<String>,
    /// Current discount in percent, 0 to 100
    pub discount: f64,
    /// Units currently in stock, non-negative
    pub stock: i32,
    /// Free-form description
    pub description: Option<String>,
    /// Relative path of the product photo, None when no photo was uploaded
    pub photo_path: Option<String>,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product may appear on many order lines
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
