//! Catalog query engine - in-memory search, filter, sort, and price display.
//!
//! The products screen fetches the catalog once into a [`CatalogSnapshot`]
//! and re-runs this pipeline on every control change instead of re-querying
//! the store per keystroke. Each run starts from the full snapshot, so
//! loosening the search text or switching suppliers never narrows an
//! already-filtered view irreversibly. The module also owns the two derived
//! display attributes: the discounted price and the stock/discount badge.

use crate::{core::product as product_repo, entities::product, errors::Result};
use sea_orm::DatabaseConnection;

/// Discount percentage above which a product is flagged for the shopper.
pub const HIGH_DISCOUNT_THRESHOLD: f64 = 15.0;

/// Final price after discount, rounded to 2 decimals.
///
/// `price_with_discount(1000.0, 20.0)` is 800.00. With discount in 0..=100
/// the result never exceeds the base price.
#[must_use]
pub fn price_with_discount(price: f64, discount: f64) -> f64 {
    let discounted = price * (1.0 - discount / 100.0);
    (discounted * 100.0).round() / 100.0
}

/// Display classification of one product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductBadge {
    /// Nothing in stock; wins over any discount
    OutOfStock,
    /// Discount strictly above [`HIGH_DISCOUNT_THRESHOLD`]
    HighDiscount,
    /// Everything else
    Normal,
}

/// Classifies a product for display.
///
/// Out-of-stock takes precedence regardless of discount; a discount of
/// exactly 15 percent is still Normal.
#[must_use]
pub fn classify(product: &product::Model) -> ProductBadge {
    if product.stock == 0 {
        ProductBadge::OutOfStock
    } else if product.discount > HIGH_DISCOUNT_THRESHOLD {
        ProductBadge::HighDiscount
    } else {
        ProductBadge::Normal
    }
}

/// Sort states of the stock column, mirroring the three-way UI control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StockSort {
    /// Keep snapshot order (name-ascending from the repository)
    #[default]
    Unsorted,
    /// Least stock first
    Ascending,
    /// Most stock first
    Descending,
}

/// Everything the filter bar can express.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    /// Free-text needle; empty or blank means no text filtering
    pub search: String,
    /// Exact supplier to keep; None means all suppliers
    pub supplier: Option<String>,
    /// Stock sort state
    pub sort: StockSort,
}

/// One product prepared for display.
#[derive(Debug, Clone)]
pub struct CatalogCard<'a> {
    /// The underlying product record
    pub product: &'a product::Model,
    /// Price after discount, rounded for display
    pub final_price: f64,
    /// Card classification
    pub badge: ProductBadge,
}

impl<'a> CatalogCard<'a> {
    fn new(product: &'a product::Model) -> Self {
        Self {
            product,
            final_price: price_with_discount(product.price, product.discount),
            badge: classify(product),
        }
    }
}

/// The product list fetched once per browsing session.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    products: Vec<product::Model>,
}

impl CatalogSnapshot {
    /// Wraps an already fetched product list.
    #[must_use]
    pub fn new(products: Vec<product::Model>) -> Self {
        Self { products }
    }

    /// Fetches the full catalog from the store.
    pub async fn load(db: &DatabaseConnection) -> Result<Self> {
        Ok(Self::new(product_repo::list_all(db).await?))
    }

    /// The unfiltered base set, in repository order.
    #[must_use]
    pub fn products(&self) -> &[product::Model] {
        &self.products
    }

    /// Number of products in the base set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// True when the base set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Runs the filter pipeline against the base set.
    ///
    /// Stages in order: free-text search (case-insensitive substring OR
    /// across name, article, description, supplier, and category), exact
    /// supplier filter, then a stable sort by stock. Every call starts from
    /// the full snapshot.
    #[must_use]
    pub fn apply(&self, filter: &CatalogFilter) -> Vec<&product::Model> {
        let mut view: Vec<&product::Model> = self.products.iter().collect();

        let needle = filter.search.trim().to_lowercase();
        if !needle.is_empty() {
            view.retain(|p| matches_search(p, &needle));
        }

        if let Some(supplier) = filter.supplier.as_deref() {
            view.retain(|p| p.supplier.as_deref() == Some(supplier));
        }

        match filter.sort {
            StockSort::Unsorted => {}
            // Vec::sort_by is stable, so equal stock keeps base-set order
            // in both directions
            StockSort::Ascending => view.sort_by(|a, b| a.stock.cmp(&b.stock)),
            StockSort::Descending => view.sort_by(|a, b| b.stock.cmp(&a.stock)),
        }

        view
    }

    /// Like [`apply`](Self::apply), but with the derived display attributes
    /// attached to each surviving product.
    #[must_use]
    pub fn cards(&self, filter: &CatalogFilter) -> Vec<CatalogCard<'_>> {
        self.apply(filter).into_iter().map(CatalogCard::new).collect()
    }
}

/// OR-match of the lowercased needle across the five text fields.
///
/// Unset optional fields participate as empty strings, never as NULL-ish
/// special cases.
fn matches_search(product: &product::Model, needle_lower: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(needle_lower);

    contains(&product.name)
        || contains(&product.article)
        || contains(product.description.as_deref().unwrap_or(""))
        || contains(product.supplier.as_deref().unwrap_or(""))
        || contains(product.category.as_deref().unwrap_or(""))
}
