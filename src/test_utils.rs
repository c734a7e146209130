//! Shared test utilities for the shoe store crate.
//!
//! Helpers for setting up test databases and creating users, products,
//! and orders with sensible defaults so tests only spell out what they
//! actually care about.

use crate::{
    core::{
        order,
        order::{OrderFields, STATUS_NEW},
        product,
        product::ProductFields,
        session::Session,
    },
    entities,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Product fields with sensible defaults.
///
/// # Defaults
/// * `unit`: "шт"
/// * `price`: 1000.0
/// * `discount`: 0.0
/// * `stock`: 10
/// * `supplier`, `category`, `description`, `photo_path`: None
#[must_use]
pub fn test_product_fields(article: &str, name: &str) -> ProductFields {
    ProductFields {
        article: article.to_string(),
        name: name.to_string(),
        unit: "шт".to_string(),
        price: 1000.0,
        supplier: None,
        category: None,
        discount: 0.0,
        stock: 10,
        description: None,
        photo_path: None,
    }
}

/// An in-memory product record for engine tests, tweaked by the closure.
///
/// Starts from the [`test_product_fields`] defaults; no database involved.
#[must_use]
pub fn test_product_model(
    id: i64,
    article: &str,
    name: &str,
    mutate: impl FnOnce(&mut entities::product::Model),
) -> entities::product::Model {
    let fields = test_product_fields(article, name);
    let mut model = entities::product::Model {
        id,
        article: fields.article,
        name: fields.name,
        unit: fields.unit,
        price: fields.price,
        supplier: fields.supplier,
        category: fields.category,
        discount: fields.discount,
        stock: fields.stock,
        description: fields.description,
        photo_path: fields.photo_path,
    };
    mutate(&mut model);
    model
}

/// Creates a test product with the [`test_product_fields`] defaults.
pub async fn create_test_product(
    db: &DatabaseConnection,
    article: &str,
    name: &str,
) -> Result<entities::product::Model> {
    product::add(db, test_product_fields(article, name)).await
}

/// Creates a test user with sensible defaults.
///
/// # Defaults
/// * `password`: "pass"
/// * `full_name`: derived from the login
pub async fn create_test_user(
    db: &DatabaseConnection,
    login: &str,
    role: &str,
) -> Result<entities::user::Model> {
    create_custom_user(db, login, "pass", &format!("Пользователь {login}"), role).await
}

/// Creates a test user with explicit credentials, name, and role.
pub async fn create_custom_user(
    db: &DatabaseConnection,
    login: &str,
    password: &str,
    full_name: &str,
    role: &str,
) -> Result<entities::user::Model> {
    entities::user::ActiveModel {
        login: Set(login.to_string()),
        password: Set(password.to_string()),
        full_name: Set(full_name.to_string()),
        role: Set(role.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates a pickup point with the given address.
pub async fn create_test_pickup_point(
    db: &DatabaseConnection,
    full_address: &str,
) -> Result<entities::pickup_point::Model> {
    entities::pickup_point::ActiveModel {
        full_address: Set(full_address.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Order fields with sensible defaults.
///
/// # Defaults
/// * `created_at`: 2024-01-10, `delivered_at`: 2024-01-15
/// * `client_name`: "Тестовый клиент"
/// * `recipient_code`: "101"
/// * `status`: [`STATUS_NEW`]
#[must_use]
pub fn test_order_fields(user_id: i64, pickup_point_id: i64) -> OrderFields {
    OrderFields {
        user_id,
        pickup_point_id,
        created_at: date(2024, 1, 10),
        delivered_at: date(2024, 1, 15),
        client_name: "Тестовый клиент".to_string(),
        recipient_code: "101".to_string(),
        status: STATUS_NEW.to_string(),
    }
}

/// Creates a test order with the [`test_order_fields`] defaults.
pub async fn create_test_order(
    db: &DatabaseConnection,
    user_id: i64,
    pickup_point_id: i64,
) -> Result<entities::order::Model> {
    order::add(db, test_order_fields(user_id, pickup_point_id)).await
}

/// Creates an order line with sensible defaults.
///
/// # Defaults
/// * `quantity`: 1
/// * `total_price`: 800.0
pub async fn create_test_order_item(
    db: &DatabaseConnection,
    order_id: i64,
    product_id: i64,
) -> Result<entities::order_item::Model> {
    create_custom_order_item(db, order_id, product_id, 1, 800.0).await
}

/// Creates an order line with explicit quantity and total.
pub async fn create_custom_order_item(
    db: &DatabaseConnection,
    order_id: i64,
    product_id: i64,
    quantity: i32,
    total_price: f64,
) -> Result<entities::order_item::Model> {
    entities::order_item::ActiveModel {
        order_id: Set(order_id),
        product_id: Set(product_id),
        quantity: Set(quantity),
        total_price: Set(total_price),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// A session holding administrator access, without touching a database.
#[must_use]
pub fn admin_session() -> Session {
    Session::for_user(entities::user::Model {
        id: 1,
        login: "admin1".to_string(),
        password: "pass123".to_string(),
        full_name: "Иванов Иван Иванович".to_string(),
        role: "Администратор".to_string(),
    })
}

/// A session holding manager access, without touching a database.
#[must_use]
pub fn manager_session() -> Session {
    Session::for_user(entities::user::Model {
        id: 2,
        login: "manager1".to_string(),
        password: "pass123".to_string(),
        full_name: "Петрова Анна Сергеевна".to_string(),
        role: "Менеджер".to_string(),
    })
}

/// Shorthand for building a calendar date in tests.
#[allow(clippy::expect_used)]
#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}
