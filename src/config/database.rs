//! Database connection and schema management.
//!
//! The connection is constructed here once, at the composition root, and
//! passed by reference into every repository function; nothing in the crate
//! reaches for a global handle. Table creation uses `SeaORM`'s
//! `Schema::create_table_from_entity` so the schema (unique keys, foreign
//! keys) always matches the entity definitions without hand-written SQL,
//! and every statement carries `IF NOT EXISTS` so a restart against an
//! existing store is a no-op. The underlying sqlx pool re-establishes a
//! closed connection by itself.

use crate::entities::{Order, OrderItem, PickupPoint, Product, User};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;

/// Establishes a connection to the store.
///
/// The URL comes from `AppConfig` (optionally overridden by `DATABASE_URL`);
/// tests pass `sqlite::memory:`. For a file-backed `SQLite` URL the parent
/// directory is created first: `mode=rwc` creates a missing database file
/// but not missing directories.
///
/// # Errors
/// Returns `Error::Io` when the database directory cannot be created and
/// `Error::Database` when the connection cannot be established.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(dir) = sqlite_parent_dir(database_url) {
        std::fs::create_dir_all(dir)?;
    }
    Database::connect(database_url).await.map_err(Into::into)
}

/// Parent directory of a file-backed `SQLite` URL, if the URL names one.
/// In-memory URLs and bare file names have no directory to prepare.
fn sqlite_parent_dir(database_url: &str) -> Option<&Path> {
    let rest = database_url.strip_prefix("sqlite://")?;
    let path = rest.split_once('?').map_or(rest, |(path, _)| path);
    if path.is_empty() || path.starts_with(':') {
        return None;
    }
    Path::new(path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
}

/// Creates any missing tables from the entity definitions.
///
/// Referenced tables are created before the tables that point at them so
/// every foreign key has a target: users and pickup points first, then
/// products, then order headers, then order lines. Tables that already
/// exist are left untouched, so the boot path can run this on every start.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut user_table = schema.create_table_from_entity(User);
    let mut pickup_point_table = schema.create_table_from_entity(PickupPoint);
    let mut product_table = schema.create_table_from_entity(Product);
    let mut order_table = schema.create_table_from_entity(Order);
    let mut order_item_table = schema.create_table_from_entity(OrderItem);

    db.execute(builder.build(user_table.if_not_exists())).await?;
    db.execute(builder.build(pickup_point_table.if_not_exists())).await?;
    db.execute(builder.build(product_table.if_not_exists())).await?;
    db.execute(builder.build(order_table.if_not_exists())).await?;
    db.execute(builder.build(order_item_table.if_not_exists())).await?;

    Ok(())
}
