//! Entity module - SeaORM entity definitions for the store database.
//! Each entity maps one table: a Model struct for row data and an Entity
//! struct for query operations, with relations declared between them.

pub mod order;
pub mod order_item;
pub mod pickup_point;
pub mod product;
pub mod user;

// Re-export specific types to avoid conflicts
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use order_item::{Column as OrderItemColumn, Entity as OrderItem, Model as OrderItemModel};
pub use pickup_point::{
    Column as PickupPointColumn, Entity as PickupPoint, Model as PickupPointModel,
};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
