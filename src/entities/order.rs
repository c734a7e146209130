//! Order entity - Represents one order header.
//!
//! An order belongs to the client who placed it and to the pickup point
//! where it is collected. Line items live in `order_items`; the header only
//! carries dates, the recipient details, and the status label.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the client who owns the order
    pub user_id: i64,
    /// ID of the pickup point where the order is collected
    pub pickup_point_id: i64,
    /// Date the order was placed
    pub created_at: Date,
    /// Planned or actual delivery date, never before `created_at`
    pub delivered_at: Date,
    /// Client name as shown on the order form
    pub client_name: String,
    /// Code the client presents when collecting the order
    pub recipient_code: String,
    /// Status label, one of the known status constants ("Новый", "Завершен")
    pub status: String,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order belongs to one client
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// Each order is collected at one pickup point
    #[sea_orm(
        belongs_to = "super::pickup_point::Entity",
        from = "Column::PickupPointId",
        to = "super::pickup_point::Column::Id"
    )]
    PickupPoint,
    /// One order has many order lines
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::pickup_point::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PickupPoint.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
