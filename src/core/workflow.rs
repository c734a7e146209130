//! Editing workflows for products and orders.
//!
//! Every mutation coming from a screen passes through here in the same
//! order: permission gate, field validation, then the repository call.
//! Validation failures are rejected before the store is touched at all.
//! Photo files are only ever cleaned up after the row change succeeded,
//! so a failed save can never strand a record pointing at a deleted file.

use crate::{
    core::{
        images::ImageStore,
        order as order_repo,
        order::OrderFields,
        product as product_repo,
        product::ProductFields,
        session::Session,
    },
    entities::{order, product},
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use std::cell::Cell;

/// Checks product fields against the catalog rules.
///
/// # Errors
/// Returns [`Error::Validation`] naming the first offending field.
pub fn validate_product_fields(fields: &ProductFields) -> Result<()> {
    if fields.article.trim().is_empty() {
        return Err(Error::Validation {
            message: "article must not be empty".to_string(),
        });
    }
    if fields.name.trim().is_empty() {
        return Err(Error::Validation {
            message: "name must not be empty".to_string(),
        });
    }
    if !fields.price.is_finite() || fields.price <= 0.0 {
        return Err(Error::Validation {
            message: format!("price must be positive, got {}", fields.price),
        });
    }
    if !(0.0..=100.0).contains(&fields.discount) {
        return Err(Error::Validation {
            message: format!("discount must be between 0 and 100, got {}", fields.discount),
        });
    }
    if fields.stock < 0 {
        return Err(Error::Validation {
            message: format!("stock must not be negative, got {}", fields.stock),
        });
    }
    Ok(())
}

/// Checks order fields before they reach the store.
///
/// # Errors
/// Returns [`Error::Validation`] when the recipient code is blank or the
/// delivery date precedes the order date.
pub fn validate_order_fields(fields: &OrderFields) -> Result<()> {
    if fields.recipient_code.trim().is_empty() {
        return Err(Error::Validation {
            message: "recipient code must not be empty".to_string(),
        });
    }
    if fields.delivered_at < fields.created_at {
        return Err(Error::Validation {
            message: format!(
                "delivery date {} is earlier than order date {}",
                fields.delivered_at, fields.created_at
            ),
        });
    }
    Ok(())
}

/// Creates or updates a product on behalf of a session.
///
/// Pass `existing` as `None` to create. On update, a photo that was
/// replaced by a different one is deleted from disk once the row change
/// went through.
///
/// # Errors
/// [`Error::Forbidden`] unless the session may edit products,
/// [`Error::Validation`] for bad fields, [`Error::NotFound`] when updating
/// a vanished product.
pub async fn save_product(
    db: &DatabaseConnection,
    images: &ImageStore,
    session: &Session,
    existing: Option<i64>,
    fields: ProductFields,
) -> Result<product::Model> {
    if !session.role().can_edit_products() {
        return Err(Error::Forbidden {
            action: "edit products",
        });
    }
    validate_product_fields(&fields)?;

    let Some(id) = existing else {
        return product_repo::add(db, fields).await;
    };

    let before = product_repo::get_by_id(db, id).await?.ok_or(Error::NotFound {
        entity: "product",
        id,
    })?;
    let updated = product_repo::update(db, id, fields).await?;

    if let (Some(old), Some(new)) = (before.photo_path.as_deref(), updated.photo_path.as_deref()) {
        if old != new {
            images.remove_quietly(old);
        }
    }
    Ok(updated)
}

/// Deletes a product and, once the row is gone, its photo file.
///
/// # Errors
/// [`Error::Forbidden`] unless the session may edit products,
/// [`Error::ReferentialIntegrity`] when order lines still reference the
/// product, [`Error::NotFound`] when it does not exist.
pub async fn delete_product(
    db: &DatabaseConnection,
    images: &ImageStore,
    session: &Session,
    id: i64,
) -> Result<()> {
    if !session.role().can_edit_products() {
        return Err(Error::Forbidden {
            action: "edit products",
        });
    }

    let product = product_repo::get_by_id(db, id).await?.ok_or(Error::NotFound {
        entity: "product",
        id,
    })?;
    product_repo::delete(db, id).await?;

    if let Some(photo) = product.photo_path.as_deref() {
        images.remove_quietly(photo);
    }
    Ok(())
}

/// Creates or updates an order on behalf of a session.
///
/// # Errors
/// [`Error::Forbidden`] unless the session may edit orders,
/// [`Error::Validation`] for bad fields, [`Error::NotFound`] when updating
/// a vanished order.
pub async fn save_order(
    db: &DatabaseConnection,
    session: &Session,
    existing: Option<i64>,
    fields: OrderFields,
) -> Result<order::Model> {
    if !session.role().can_edit_orders() {
        return Err(Error::Forbidden {
            action: "edit orders",
        });
    }
    validate_order_fields(&fields)?;

    match existing {
        None => order_repo::add(db, fields).await,
        Some(id) => order_repo::update(db, id, fields).await,
    }
}

/// Deletes an order together with its lines.
///
/// # Errors
/// [`Error::Forbidden`] unless the session may edit orders,
/// [`Error::NotFound`] when the order does not exist.
pub async fn delete_order(db: &DatabaseConnection, session: &Session, id: i64) -> Result<()> {
    if !session.role().can_edit_orders() {
        return Err(Error::Forbidden {
            action: "edit orders",
        });
    }
    order_repo::delete(db, id).await
}

/// Guard that keeps a single editor dialog open at a time.
///
/// The UI flow is single threaded, so a [`Cell`] is enough; this is a
/// reentrancy check, not a cross-thread lock.
#[derive(Debug, Default)]
pub struct EditorSlot {
    busy: Cell<bool>,
}

impl EditorSlot {
    /// A free slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the slot for one editing dialog.
    ///
    /// # Errors
    /// Returns [`Error::EditInProgress`] while a previous lease is alive.
    pub fn acquire(&self) -> Result<EditorLease<'_>> {
        if self.busy.replace(true) {
            return Err(Error::EditInProgress);
        }
        Ok(EditorLease { slot: self })
    }
}

/// Proof of holding the editor slot; releases it on drop.
#[derive(Debug)]
pub struct EditorLease<'a> {
    slot: &'a EditorSlot,
}

impl Drop for EditorLease<'_> {
    fn drop(&mut self) {
        self.slot.busy.set(false);
    }
}
