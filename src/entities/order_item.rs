//! Order line entity - One product position within an order.
//!
//! Lines are written by the importer and read back for order aggregates and
//! the referential check that blocks deleting a product still on order.
//! Deleting an order removes its lines; deleting a referenced product is
//! restricted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order line database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    /// Unique identifier for the order line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the order this line belongs to
    pub order_id: i64,
    /// ID of the ordered product
    pub product_id: i64,
    /// Ordered quantity
    pub quantity: i32,
    /// Line total, already priced at order time
    pub total_price: f64,
}

/// Defines relationships between `OrderItem` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one order and goes away with it
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id",
        on_delete = "Cascade"
    )]
    Order,
    /// Each line references one product and blocks its deletion
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "Restrict"
    )]
    Product,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
