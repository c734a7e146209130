//! User entity - Represents a staff member or client account.
//!
//! Accounts are created by the seed import and read back at login time.
//! The `role` column stores the display label from the source data; it is
//! mapped to the [`crate::core::session::Role`] enum when a session starts.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login name, the account's natural key
    #[sea_orm(unique)]
    pub login: String,
    /// Cleartext password as imported (known gap, kept for source parity)
    pub password: String,
    /// Full display name
    pub full_name: String,
    /// Role label as stored in the source data (e.g., "Администратор")
    pub role: String,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user may own many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
