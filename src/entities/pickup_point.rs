//! Pickup point entity - Reference data for order collection locations.
//!
//! Read-only from the application's perspective apart from the seed import,
//! which inserts new addresses and ignores duplicates.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Pickup point database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pickup_points")]
pub struct Model {
    /// Unique identifier for the pickup point
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Full postal address, unique across points
    #[sea_orm(unique)]
    pub full_address: String,
}

/// Defines relationships between `PickupPoint` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One pickup point serves many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
