//! Seed data loading from a TOML seed file.
//!
//! The rows mirror the spreadsheet exports the store receives: pickup point
//! addresses, user accounts, the product assortment, and historical orders.
//! Spreadsheet parsing itself stays outside this crate; whatever produces
//! the seed file has already split it into the typed rows below.
//! `core::import` consumes them in dependency order.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// The entire seed file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedFile {
    /// Pickup point addresses, inserted first
    #[serde(default)]
    pub pickup_points: Vec<PickupPointRow>,
    /// User accounts, upserted on login
    #[serde(default)]
    pub users: Vec<UserRow>,
    /// Product assortment, upserted on article
    #[serde(default)]
    pub products: Vec<ProductRow>,
    /// Historical orders, appended row by row
    #[serde(default)]
    pub orders: Vec<OrderRow>,
}

/// One pickup point row
#[derive(Debug, Clone, Deserialize)]
pub struct PickupPointRow {
    /// Full postal address
    pub full_address: String,
}

/// One user account row
#[derive(Debug, Clone, Deserialize)]
pub struct UserRow {
    /// Role label (e.g., "Администратор", "Менеджер", "Клиент")
    pub role: String,
    /// Full display name
    pub full_name: String,
    /// Login, the natural key
    pub login: String,
    /// Cleartext password as exported
    pub password: String,
}

/// One product row
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRow {
    /// Article code, the natural key
    pub article: String,
    /// Product name
    pub name: String,
    /// Unit of measure, defaults to "шт" like the source sheets
    #[serde(default = "default_unit")]
    pub unit: String,
    /// Base price
    #[serde(default)]
    pub price: f64,
    /// Supplier name, absent when the sheet left it blank
    #[serde(default)]
    pub supplier: Option<String>,
    /// Category name
    #[serde(default)]
    pub category: Option<String>,
    /// Discount percent
    #[serde(default)]
    pub discount: f64,
    /// Units in stock
    #[serde(default)]
    pub stock: i32,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Photo file name or path; bare names get the products directory prefix
    #[serde(default)]
    pub photo: Option<String>,
}

/// One order row
///
/// Dates stay as strings here; the importer parses them and skips the row
/// with a reported reason when they do not parse.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRow {
    /// Order date, `%Y-%m-%d` or `%d.%m.%Y`
    pub created_at: String,
    /// Delivery date, same formats
    pub delivered_at: String,
    /// Pickup point id; a missing or dangling id falls back to the first point
    #[serde(default)]
    pub pickup_point_id: Option<i64>,
    /// Client name, also used to resolve the owning user account
    #[serde(default)]
    pub client_name: String,
    /// Code the client presents at pickup
    #[serde(default)]
    pub recipient_code: String,
    /// Status label, defaults to "Новый" when absent
    #[serde(default)]
    pub status: Option<String>,
}

fn default_unit() -> String {
    "шт".to_string()
}

/// Loads seed data from a TOML file
///
/// # Errors
/// Returns `Error::Config` when the file cannot be read or parsed.
pub fn load_seed<P: AsRef<Path>>(path: P) -> Result<SeedFile> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read seed file {}: {e}", path.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse seed file {}: {e}", path.display()),
    })
}
