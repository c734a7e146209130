//! Product repository - typed catalog operations over the products table.
//!
//! This module provides the read and write operations the rest of the crate
//! builds on: full listings, store-side search and supplier filtering,
//! lookups, whole-record writes, the referentially checked delete, and the
//! distinct-value listings that feed filter dropdowns. Input validation
//! lives in [`crate::core::workflow`]; these functions only talk to the
//! store. All functions are async and return Result types.

use crate::{
    entities::{OrderItem, Product, order_item, product},
    errors::{Error, Result},
};
use sea_orm::{
    Condition, PaginatorTrait, QueryOrder, QuerySelect, Set,
    prelude::*,
    sea_query::{Expr, Func, SimpleExpr},
};

/// Full field set for a product write.
///
/// `add` and `update` take the whole record at once; partial updates are not
/// supported, so the form collects every field and submits them together.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    /// Vendor article code, unique across products
    pub article: String,
    /// Display name
    pub name: String,
    /// Unit of measure
    pub unit: String,
    /// Base price before discount
    pub price: f64,
    /// Supplier name, None when unknown
    pub supplier: Option<String>,
    /// Category name, None when unknown
    pub category: Option<String>,
    /// Discount in percent
    pub discount: f64,
    /// Units in stock
    pub stock: i32,
    /// Free-form description
    pub description: Option<String>,
    /// Relative photo path
    pub photo_path: Option<String>,
}

/// Retrieves the whole catalog, ordered alphabetically by name.
///
/// This is the snapshot the in-memory query engine works from; the UI calls
/// it once per browsing session rather than per keystroke.
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Case-insensitive substring match over one text column.
///
/// Nullable columns are coalesced to the empty string first so NULL never
/// poisons the OR chain. Folding uses the backend's LOWER(), which under
/// SQLite only folds ASCII; the catalog engine does full Unicode folding in
/// memory for the interactive path.
fn column_contains(column: product::Column, pattern: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Func::coalesce([
        Expr::col(column).into(),
        Expr::val("").into(),
    ])))
    .like(pattern)
}

/// Searches products by a text fragment across name, article, description,
/// supplier, and category (a record matches when ANY field contains it).
///
/// An empty fragment matches everything, so callers may pass the search box
/// content through unchanged. Results keep the name-ascending order.
pub async fn search(db: &DatabaseConnection, text: &str) -> Result<Vec<product::Model>> {
    let pattern = format!("%{}%", text.to_lowercase());
    let any_field = Condition::any()
        .add(column_contains(product::Column::Name, &pattern))
        .add(column_contains(product::Column::Article, &pattern))
        .add(column_contains(product::Column::Description, &pattern))
        .add(column_contains(product::Column::Supplier, &pattern))
        .add(column_contains(product::Column::Category, &pattern));

    Product::find()
        .filter(any_field)
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists products of one supplier, matched by exact equality.
pub async fn filter_by_supplier(
    db: &DatabaseConnection,
    supplier: &str,
) -> Result<Vec<product::Model>> {
    Product::find()
        .filter(product::Column::Supplier.eq(supplier))
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific product by its unique ID.
pub async fn get_by_id(db: &DatabaseConnection, product_id: i64) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Inserts a new product and returns the stored row with its assigned id.
pub async fn add(db: &DatabaseConnection, fields: ProductFields) -> Result<product::Model> {
    let product = product::ActiveModel {
        article: Set(fields.article),
        name: Set(fields.name),
        unit: Set(fields.unit),
        price: Set(fields.price),
        supplier: Set(fields.supplier),
        category: Set(fields.category),
        discount: Set(fields.discount),
        stock: Set(fields.stock),
        description: Set(fields.description),
        photo_path: Set(fields.photo_path),
        ..Default::default()
    };

    product.insert(db).await.map_err(Into::into)
}

/// Overwrites every stored field of an existing product.
///
/// # Errors
/// Returns `Error::NotFound` when no product has the given id; the store is
/// then left untouched.
pub async fn update(
    db: &DatabaseConnection,
    product_id: i64,
    fields: ProductFields,
) -> Result<product::Model> {
    let existing = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "product",
            id: product_id,
        })?;

    let mut active: product::ActiveModel = existing.into();
    active.article = Set(fields.article);
    active.name = Set(fields.name);
    active.unit = Set(fields.unit);
    active.price = Set(fields.price);
    active.supplier = Set(fields.supplier);
    active.category = Set(fields.category);
    active.discount = Set(fields.discount);
    active.stock = Set(fields.stock);
    active.description = Set(fields.description);
    active.photo_path = Set(fields.photo_path);

    active.update(db).await.map_err(Into::into)
}

/// Deletes a product unless any order line still references it.
///
/// The reference count runs first; a positive count aborts with
/// `Error::ReferentialIntegrity` and nothing is deleted.
pub async fn delete(db: &DatabaseConnection, product_id: i64) -> Result<()> {
    let references = OrderItem::find()
        .filter(order_item::Column::ProductId.eq(product_id))
        .count(db)
        .await?;

    if references > 0 {
        return Err(Error::ReferentialIntegrity {
            message: format!(
                "product {product_id} is present in {references} order line(s) and cannot be deleted"
            ),
        });
    }

    let result = Product::delete_by_id(product_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "product",
            id: product_id,
        });
    }

    Ok(())
}

/// Distinct non-null values of one text column, sorted ascending.
async fn list_distinct(db: &DatabaseConnection, column: product::Column) -> Result<Vec<String>> {
    Product::find()
        .select_only()
        .column(column)
        .distinct()
        .filter(column.is_not_null())
        .order_by_asc(column)
        .into_tuple::<String>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Distinct supplier names for the supplier filter dropdown.
pub async fn list_suppliers(db: &DatabaseConnection) -> Result<Vec<String>> {
    list_distinct(db, product::Column::Supplier).await
}

/// Distinct category names.
pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<String>> {
    list_distinct(db, product::Column::Category).await
}

/// Distinct units of measure.
pub async fn list_units(db: &DatabaseConnection) -> Result<Vec<String>> {
    list_distinct(db, product::Column::Unit).await
}
