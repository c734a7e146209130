//! Order repository - typed operations over order headers and their lines.
//!
//! Provides the aggregate listing the orders screen shows (line count and
//! total per order, joined with the pickup address and the owning login),
//! whole-record writes, the transactional delete that takes an order's lines
//! with it, and the pickup point and status listings the order form needs.
//! Date-order validation lives in [`crate::core::workflow`].

use crate::{
    entities::{Order, OrderItem, PickupPoint, order, order_item, pickup_point, user},
    errors::{Error, Result},
};
use sea_orm::{
    FromQueryResult, JoinType, QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*,
};

/// Status label a freshly placed order carries.
pub const STATUS_NEW: &str = "Новый";
/// Status label of a completed order.
pub const STATUS_COMPLETED: &str = "Завершен";

/// Full field set for an order write.
///
/// Like products, orders are written whole: the form submits all seven
/// fields together and `update` overwrites all of them.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderFields {
    /// Owning client account
    pub user_id: i64,
    /// Pickup point where the order is collected
    pub pickup_point_id: i64,
    /// Date the order was placed
    pub created_at: Date,
    /// Delivery date, never before `created_at`
    pub delivered_at: Date,
    /// Client name shown on the form
    pub client_name: String,
    /// Code presented at pickup
    pub recipient_code: String,
    /// Status label
    pub status: String,
}

/// One row of the orders screen: the header joined with its aggregates.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct OrderSummary {
    /// Order id
    pub id: i64,
    /// Date the order was placed
    pub created_at: Date,
    /// Delivery date
    pub delivered_at: Date,
    /// Address of the pickup point
    pub pickup_address: String,
    /// Client name from the header
    pub client_name: String,
    /// Status label
    pub status: String,
    /// Code presented at pickup
    pub recipient_code: String,
    /// Login of the owning account
    pub user_login: String,
    /// Number of order lines
    pub items_count: i64,
    /// Sum of line totals; None when the order has no lines yet
    pub total_amount: Option<f64>,
}

/// Lists every order with its aggregates, newest first.
///
/// Orders without lines still appear (LEFT JOIN): their `items_count` is 0
/// and `total_amount` is None.
pub async fn list_with_totals(db: &DatabaseConnection) -> Result<Vec<OrderSummary>> {
    Order::find()
        .select_only()
        .column(order::Column::Id)
        .column(order::Column::CreatedAt)
        .column(order::Column::DeliveredAt)
        .column_as(pickup_point::Column::FullAddress, "pickup_address")
        .column(order::Column::ClientName)
        .column(order::Column::Status)
        .column(order::Column::RecipientCode)
        .column_as(user::Column::Login, "user_login")
        .column_as(order_item::Column::ProductId.count(), "items_count")
        .column_as(order_item::Column::TotalPrice.sum(), "total_amount")
        .join(JoinType::InnerJoin, order::Relation::PickupPoint.def())
        .join(JoinType::InnerJoin, order::Relation::User.def())
        .join(JoinType::LeftJoin, order::Relation::OrderItems.def())
        .group_by(order::Column::Id)
        .group_by(pickup_point::Column::FullAddress)
        .group_by(user::Column::Login)
        .order_by_desc(order::Column::CreatedAt)
        .into_model::<OrderSummary>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific order header by its unique ID.
pub async fn get_by_id(db: &DatabaseConnection, order_id: i64) -> Result<Option<order::Model>> {
    Order::find_by_id(order_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Inserts a new order header and returns the stored row with its id.
pub async fn add(db: &DatabaseConnection, fields: OrderFields) -> Result<order::Model> {
    let order = order::ActiveModel {
        user_id: Set(fields.user_id),
        pickup_point_id: Set(fields.pickup_point_id),
        created_at: Set(fields.created_at),
        delivered_at: Set(fields.delivered_at),
        client_name: Set(fields.client_name),
        recipient_code: Set(fields.recipient_code),
        status: Set(fields.status),
        ..Default::default()
    };

    order.insert(db).await.map_err(Into::into)
}

/// Overwrites every stored field of an existing order.
///
/// # Errors
/// Returns `Error::NotFound` when no order has the given id.
pub async fn update(
    db: &DatabaseConnection,
    order_id: i64,
    fields: OrderFields,
) -> Result<order::Model> {
    let existing = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "order",
            id: order_id,
        })?;

    let mut active: order::ActiveModel = existing.into();
    active.user_id = Set(fields.user_id);
    active.pickup_point_id = Set(fields.pickup_point_id);
    active.created_at = Set(fields.created_at);
    active.delivered_at = Set(fields.delivered_at);
    active.client_name = Set(fields.client_name);
    active.recipient_code = Set(fields.recipient_code);
    active.status = Set(fields.status);

    active.update(db).await.map_err(Into::into)
}

/// Deletes an order together with its lines.
///
/// There is no referential check here: lines belong to the order and go
/// with it. Both deletes run in one transaction so a failure rolls back the
/// whole thing.
pub async fn delete(db: &DatabaseConnection, order_id: i64) -> Result<()> {
    // Use a transaction to ensure atomicity
    let txn = db.begin().await?;

    let existing = Order::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or(Error::NotFound {
            entity: "order",
            id: order_id,
        })?;

    OrderItem::delete_many()
        .filter(order_item::Column::OrderId.eq(order_id))
        .exec(&txn)
        .await?;

    existing.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}

/// Lists all pickup points, ordered by address.
pub async fn list_pickup_points(db: &DatabaseConnection) -> Result<Vec<pickup_point::Model>> {
    PickupPoint::find()
        .order_by_asc(pickup_point::Column::FullAddress)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Distinct status labels currently in use, sorted ascending.
///
/// The order form offers these plus the two named constants, so a status
/// imported from historical data keeps showing up even if it is neither
/// "Новый" nor "Завершен".
pub async fn list_distinct_statuses(db: &DatabaseConnection) -> Result<Vec<String>> {
    Order::find()
        .select_only()
        .column(order::Column::Status)
        .distinct()
        .order_by_asc(order::Column::Status)
        .into_tuple::<String>()
        .all(db)
        .await
        .map_err(Into::into)
}
