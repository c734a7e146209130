//! Batch import of seed data into the store.
//!
//! Stages run in dependency order: pickup points, then users, then
//! products, then orders. Users and products are upserted on their natural
//! keys so re-running the import refreshes existing rows instead of
//! duplicating them. A row that cannot be used is reported with its
//! position and reason and the import moves on; only real store errors
//! abort the run.

use crate::{
    config::seed::{OrderRow, PickupPointRow, ProductRow, SeedFile, UserRow},
    core::order::STATUS_NEW,
    entities::{PickupPoint, Product, User, order, pickup_point, product, user},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{DbErr, QueryOrder, Set, prelude::*, sea_query::OnConflict};

/// One rejected input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    /// 1-based position of the row in its input list
    pub row: usize,
    /// Why the row was skipped
    pub reason: String,
}

/// Outcome of one import stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Rows written or refreshed
    pub succeeded: usize,
    /// Rows skipped, with reasons
    pub failed: Vec<RowFailure>,
}

impl ImportReport {
    fn fail(&mut self, row: usize, reason: impl Into<String>) {
        self.failed.push(RowFailure {
            row,
            reason: reason.into(),
        });
    }
}

/// Outcomes of all four stages of one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Pickup point stage
    pub pickup_points: ImportReport,
    /// User account stage
    pub users: ImportReport,
    /// Product stage
    pub products: ImportReport,
    /// Order stage
    pub orders: ImportReport,
}

/// Inserts pickup points, ignoring addresses that already exist.
pub async fn import_pickup_points(
    db: &DatabaseConnection,
    rows: &[PickupPointRow],
) -> Result<ImportReport> {
    let mut report = ImportReport::default();

    for (index, row) in rows.iter().enumerate() {
        let address = row.full_address.trim();
        if address.is_empty() {
            report.fail(index + 1, "empty address");
            continue;
        }

        let active = pickup_point::ActiveModel {
            full_address: Set(address.to_string()),
            ..Default::default()
        };
        let outcome = PickupPoint::insert(active)
            .on_conflict(
                OnConflict::column(pickup_point::Column::FullAddress)
                    .do_nothing()
                    .to_owned(),
            )
            .exec(db)
            .await;
        match outcome {
            // An address that is already present counts as imported
            Ok(_) | Err(DbErr::RecordNotInserted) => report.succeeded += 1,
            Err(error) => return Err(error.into()),
        }
    }

    Ok(report)
}

/// Upserts users on their login, refreshing name, role, and password.
pub async fn import_users(db: &DatabaseConnection, rows: &[UserRow]) -> Result<ImportReport> {
    let mut report = ImportReport::default();

    for (index, row) in rows.iter().enumerate() {
        let login = row.login.trim();
        let full_name = row.full_name.trim();
        if login.is_empty() {
            report.fail(index + 1, "empty login");
            continue;
        }
        if full_name.is_empty() {
            report.fail(index + 1, "empty full name");
            continue;
        }

        let active = user::ActiveModel {
            login: Set(login.to_string()),
            password: Set(row.password.clone()),
            full_name: Set(full_name.to_string()),
            role: Set(row.role.clone()),
            ..Default::default()
        };
        User::insert(active)
            .on_conflict(
                OnConflict::column(user::Column::Login)
                    .update_columns([
                        user::Column::FullName,
                        user::Column::Role,
                        user::Column::Password,
                    ])
                    .to_owned(),
            )
            .exec(db)
            .await?;
        report.succeeded += 1;
    }

    Ok(report)
}

/// Upserts products on their article, refreshing name, price, stock, and
/// discount. The photo reference is written on first insert only. Rows
/// whose numbers break the product field rules are skipped like blank
/// ones; an upsert would otherwise land them in the store.
pub async fn import_products(
    db: &DatabaseConnection,
    rows: &[ProductRow],
) -> Result<ImportReport> {
    let mut report = ImportReport::default();

    for (index, row) in rows.iter().enumerate() {
        let article = row.article.trim();
        if article.is_empty() {
            report.fail(index + 1, "empty article");
            continue;
        }
        if row.name.trim().is_empty() {
            report.fail(index + 1, "empty name");
            continue;
        }
        if !row.price.is_finite() || row.price <= 0.0 {
            report.fail(index + 1, "non-positive price");
            continue;
        }
        if !(0.0..=100.0).contains(&row.discount) {
            report.fail(index + 1, "discount out of range");
            continue;
        }
        if row.stock < 0 {
            report.fail(index + 1, "negative stock");
            continue;
        }

        let active = product::ActiveModel {
            article: Set(article.to_string()),
            name: Set(row.name.trim().to_string()),
            unit: Set(row.unit.clone()),
            price: Set(row.price),
            supplier: Set(row.supplier.clone()),
            category: Set(row.category.clone()),
            discount: Set(row.discount),
            stock: Set(row.stock),
            description: Set(row.description.clone()),
            photo_path: Set(normalize_photo(row.photo.as_deref())),
            ..Default::default()
        };
        Product::insert(active)
            .on_conflict(
                OnConflict::column(product::Column::Article)
                    .update_columns([
                        product::Column::Name,
                        product::Column::Price,
                        product::Column::Stock,
                        product::Column::Discount,
                    ])
                    .to_owned(),
            )
            .exec(db)
            .await?;
        report.succeeded += 1;
    }

    Ok(report)
}

/// Inserts orders, resolving each row's user and pickup point.
///
/// A row names its client; when no user carries that full name the order is
/// attached to the first user, and a missing pickup point likewise falls
/// back to the first one. Rows with unparseable dates are skipped, as are
/// rows when the store holds no users or points at all.
pub async fn import_orders(db: &DatabaseConnection, rows: &[OrderRow]) -> Result<ImportReport> {
    let mut report = ImportReport::default();

    for (index, row) in rows.iter().enumerate() {
        let row_number = index + 1;

        let Some(created_at) = parse_flexible_date(&row.created_at) else {
            report.fail(
                row_number,
                format!("unparseable order date '{}'", row.created_at),
            );
            continue;
        };
        let Some(delivered_at) = parse_flexible_date(&row.delivered_at) else {
            report.fail(
                row_number,
                format!("unparseable delivery date '{}'", row.delivered_at),
            );
            continue;
        };

        let Some(owner) = resolve_user(db, row.client_name.trim()).await? else {
            report.fail(row_number, "no users to attach the order to");
            continue;
        };
        let Some(point) = resolve_pickup_point(db, row.pickup_point_id).await? else {
            report.fail(row_number, "no pickup points to attach the order to");
            continue;
        };

        let status = match row.status.as_deref().map(str::trim) {
            Some(status) if !status.is_empty() => status.to_string(),
            _ => STATUS_NEW.to_string(),
        };

        let active = order::ActiveModel {
            user_id: Set(owner.id),
            pickup_point_id: Set(point.id),
            created_at: Set(created_at),
            delivered_at: Set(delivered_at),
            client_name: Set(row.client_name.trim().to_string()),
            recipient_code: Set(row.recipient_code.clone()),
            status: Set(status),
            ..Default::default()
        };
        active.insert(db).await?;
        report.succeeded += 1;
    }

    Ok(report)
}

/// Runs all four stages in dependency order.
pub async fn import_all(db: &DatabaseConnection, seed: &SeedFile) -> Result<ImportSummary> {
    let summary = ImportSummary {
        pickup_points: import_pickup_points(db, &seed.pickup_points).await?,
        users: import_users(db, &seed.users).await?,
        products: import_products(db, &seed.products).await?,
        orders: import_orders(db, &seed.orders).await?,
    };

    tracing::info!(
        pickup_points = summary.pickup_points.succeeded,
        users = summary.users.succeeded,
        products = summary.products.succeeded,
        orders = summary.orders.succeeded,
        skipped = summary.pickup_points.failed.len()
            + summary.users.failed.len()
            + summary.products.failed.len()
            + summary.orders.failed.len(),
        "seed import finished"
    );
    Ok(summary)
}

/// Accepts ISO dates first, then the day-first format exports use.
fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d.%m.%Y"))
        .ok()
}

/// Photo references come in as bare file names; prefix them into the photo
/// directory unless the row already carries a resource path.
fn normalize_photo(raw: Option<&str>) -> Option<String> {
    let name = raw?.trim();
    if name.is_empty() {
        return None;
    }
    if name.starts_with("resources/") {
        return Some(name.to_string());
    }
    Some(format!("resources/products/{name}"))
}

/// The user with the given full name, or the first user as fallback.
async fn resolve_user(db: &DatabaseConnection, client_name: &str) -> Result<Option<user::Model>> {
    if !client_name.is_empty() {
        let named = User::find()
            .filter(user::Column::FullName.eq(client_name))
            .one(db)
            .await?;
        if named.is_some() {
            return Ok(named);
        }
    }
    User::find()
        .order_by_asc(user::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// The pickup point with the given id, or the first point as fallback.
async fn resolve_pickup_point(
    db: &DatabaseConnection,
    id: Option<i64>,
) -> Result<Option<pickup_point::Model>> {
    if let Some(id) = id {
        let by_id = PickupPoint::find_by_id(id).one(db).await?;
        if by_id.is_some() {
            return Ok(by_id);
        }
    }
    PickupPoint::find()
        .order_by_asc(pickup_point::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{entities::Order, test_utils::*};
    use sea_orm::PaginatorTrait;

    fn seed_fixture() -> SeedFile {
        SeedFile {
            pickup_points: vec![
                PickupPointRow {
                    full_address: "г. Москва, ул. Ленина, 1".to_string(),
                },
                PickupPointRow {
                    full_address: "г. Тверь, пр. Мира, 15".to_string(),
                },
            ],
            users: vec![
                UserRow {
                    role: "Администратор".to_string(),
                    full_name: "Иванов Иван Иванович".to_string(),
                    login: "admin1".to_string(),
                    password: "pass123".to_string(),
                },
                UserRow {
                    role: "Клиент".to_string(),
                    full_name: "Петрова Анна Сергеевна".to_string(),
                    login: "client1".to_string(),
                    password: "qwerty".to_string(),
                },
            ],
            products: vec![
                ProductRow {
                    article: "A112T4".to_string(),
                    name: "Ботинки кожаные".to_string(),
                    unit: "шт".to_string(),
                    price: 4600.0,
                    supplier: Some("Ecco".to_string()),
                    category: Some("Ботинки".to_string()),
                    discount: 3.0,
                    stock: 6,
                    description: None,
                    photo: Some("A112T4.jpg".to_string()),
                },
                ProductRow {
                    article: "F635R4".to_string(),
                    name: "Кроссовки беговые".to_string(),
                    unit: "шт".to_string(),
                    price: 7200.0,
                    supplier: Some("Nike".to_string()),
                    category: Some("Кроссовки".to_string()),
                    discount: 18.0,
                    stock: 0,
                    description: Some("Водонепроницаемые".to_string()),
                    photo: None,
                },
            ],
            orders: vec![OrderRow {
                created_at: "2024-03-10".to_string(),
                delivered_at: "2024-03-15".to_string(),
                pickup_point_id: Some(2),
                client_name: "Петрова Анна Сергеевна".to_string(),
                recipient_code: "305".to_string(),
                status: None,
            }],
        }
    }

    #[tokio::test]
    async fn test_import_all_loads_every_stage() -> Result<()> {
        let db = setup_test_db().await?;

        let summary = import_all(&db, &seed_fixture()).await?;
        assert_eq!(summary.pickup_points.succeeded, 2);
        assert_eq!(summary.users.succeeded, 2);
        assert_eq!(summary.products.succeeded, 2);
        assert_eq!(summary.orders.succeeded, 1);
        assert!(summary.orders.failed.is_empty());

        // The order row resolved its named client and its pickup point
        let orders = Order::find().all(&db).await?;
        assert_eq!(orders.len(), 1);
        let owner = User::find_by_id(orders[0].user_id).one(&db).await?.unwrap();
        assert_eq!(owner.login, "client1");
        assert_eq!(orders[0].pickup_point_id, 2);
        assert_eq!(orders[0].status, STATUS_NEW);

        Ok(())
    }

    #[tokio::test]
    async fn test_reimport_refreshes_instead_of_duplicating() -> Result<()> {
        let db = setup_test_db().await?;
        let seed = seed_fixture();

        import_all(&db, &seed).await?;

        let mut again = seed.clone();
        again.products[0].price = 4990.0;
        again.products[0].name = "Ботинки кожаные утепленные".to_string();
        again.users[1].role = "Менеджер".to_string();
        let summary = import_all(&db, &again).await?;

        // Duplicate addresses still count as imported
        assert_eq!(summary.pickup_points.succeeded, 2);
        assert_eq!(PickupPoint::find().count(&db).await?, 2);

        let products = Product::find().all(&db).await?;
        assert_eq!(products.len(), 2);
        let boots = products.iter().find(|p| p.article == "A112T4").unwrap();
        assert_eq!(boots.price, 4990.0);
        assert_eq!(boots.name, "Ботинки кожаные утепленные");

        let users = User::find().all(&db).await?;
        assert_eq!(users.len(), 2);
        let client = users.iter().find(|u| u.login == "client1").unwrap();
        assert_eq!(client.role, "Менеджер");

        // The second run appends its order again; headers are not keyed
        assert_eq!(Order::find().count(&db).await?, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_bad_rows_are_reported_with_position() -> Result<()> {
        let db = setup_test_db().await?;

        let report = import_products(
            &db,
            &[
                ProductRow {
                    article: "  ".to_string(),
                    name: "Без артикула".to_string(),
                    unit: "шт".to_string(),
                    price: 100.0,
                    supplier: None,
                    category: None,
                    discount: 0.0,
                    stock: 1,
                    description: None,
                    photo: None,
                },
                ProductRow {
                    article: "G888".to_string(),
                    name: "Кеды".to_string(),
                    unit: "шт".to_string(),
                    price: 2100.0,
                    supplier: None,
                    category: None,
                    discount: 0.0,
                    stock: 4,
                    description: None,
                    photo: None,
                },
            ],
        )
        .await?;
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].row, 1);
        assert_eq!(report.failed[0].reason, "empty article");

        let report = import_users(
            &db,
            &[UserRow {
                role: "Клиент".to_string(),
                full_name: String::new(),
                login: "ghost".to_string(),
                password: "pw".to_string(),
            }],
        )
        .await?;
        assert_eq!(report.succeeded, 0);
        assert_eq!(report.failed[0].reason, "empty full name");

        Ok(())
    }

    #[tokio::test]
    async fn test_products_breaking_field_rules_are_skipped() -> Result<()> {
        let db = setup_test_db().await?;

        let row = |article: &str, price: f64, discount: f64, stock: i32| ProductRow {
            article: article.to_string(),
            name: "Кроссовки".to_string(),
            unit: "шт".to_string(),
            price,
            supplier: None,
            category: None,
            discount,
            stock,
            description: None,
            photo: None,
        };

        let report = import_products(
            &db,
            &[
                row("N100", 2990.0, 10.0, 5),
                row("N101", 2990.0, -10.0, 5),
                row("N102", 2990.0, 120.0, 5),
                row("N103", 0.0, 10.0, 5),
                row("N104", 2990.0, 10.0, -2),
            ],
        )
        .await?;
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed.len(), 4);
        assert_eq!(report.failed[0].row, 2);
        assert_eq!(report.failed[0].reason, "discount out of range");
        assert_eq!(report.failed[1].reason, "discount out of range");
        assert_eq!(report.failed[2].reason, "non-positive price");
        assert_eq!(report.failed[3].reason, "negative stock");

        // Nothing from the rejected rows reached the store
        let stored = Product::find().all(&db).await?;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].article, "N100");

        Ok(())
    }

    #[tokio::test]
    async fn test_order_dates_accept_both_formats() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_user(&db, "admin1", "Администратор").await?;
        create_test_pickup_point(&db, "г. Москва, ул. Ленина, 1").await?;

        let report = import_orders(
            &db,
            &[
                OrderRow {
                    created_at: "10.03.2024".to_string(),
                    delivered_at: "15.03.2024".to_string(),
                    pickup_point_id: None,
                    client_name: String::new(),
                    recipient_code: "101".to_string(),
                    status: Some("Завершен".to_string()),
                },
                OrderRow {
                    created_at: "not a date".to_string(),
                    delivered_at: "2024-03-15".to_string(),
                    pickup_point_id: None,
                    client_name: String::new(),
                    recipient_code: "102".to_string(),
                    status: None,
                },
            ],
        )
        .await?;
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].row, 2);
        assert!(report.failed[0].reason.contains("not a date"));

        let stored = Order::find().one(&db).await?.unwrap();
        assert_eq!(stored.created_at, date(2024, 3, 10));
        assert_eq!(stored.status, "Завершен");

        Ok(())
    }

    #[tokio::test]
    async fn test_order_rows_fall_back_to_first_user_and_point() -> Result<()> {
        let db = setup_test_db().await?;
        let first_user = create_test_user(&db, "admin1", "Администратор").await?;
        create_test_user(&db, "client1", "Клиент").await?;
        let first_point = create_test_pickup_point(&db, "г. Москва, ул. Ленина, 1").await?;

        let report = import_orders(
            &db,
            &[OrderRow {
                created_at: "2024-03-10".to_string(),
                delivered_at: "2024-03-15".to_string(),
                // Neither the client name nor the point id resolve
                pickup_point_id: Some(99),
                client_name: "Никому Не Известный".to_string(),
                recipient_code: "500".to_string(),
                status: None,
            }],
        )
        .await?;
        assert_eq!(report.succeeded, 1);

        let stored = Order::find().one(&db).await?.unwrap();
        assert_eq!(stored.user_id, first_user.id);
        assert_eq!(stored.pickup_point_id, first_point.id);
        // The form still shows the name the row carried
        assert_eq!(stored.client_name, "Никому Не Известный");

        Ok(())
    }

    #[tokio::test]
    async fn test_orders_without_any_users_are_skipped() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_pickup_point(&db, "г. Москва, ул. Ленина, 1").await?;

        let report = import_orders(
            &db,
            &[OrderRow {
                created_at: "2024-03-10".to_string(),
                delivered_at: "2024-03-15".to_string(),
                pickup_point_id: Some(1),
                client_name: "Петрова Анна".to_string(),
                recipient_code: "101".to_string(),
                status: None,
            }],
        )
        .await?;
        assert_eq!(report.succeeded, 0);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(Order::find().count(&db).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_photo_references_are_normalized() -> Result<()> {
        let db = setup_test_db().await?;

        let row = |article: &str, photo: Option<&str>| ProductRow {
            article: article.to_string(),
            name: "Обувь".to_string(),
            unit: "шт".to_string(),
            price: 1000.0,
            supplier: None,
            category: None,
            discount: 0.0,
            stock: 1,
            description: None,
            photo: photo.map(str::to_string),
        };
        import_products(
            &db,
            &[
                row("P1", Some("boots.png")),
                row("P2", Some("resources/custom/boots.png")),
                row("P3", Some("   ")),
                row("P4", None),
            ],
        )
        .await?;

        assert_eq!(
            photo_of(&db, "P1").await?.as_deref(),
            Some("resources/products/boots.png")
        );
        assert_eq!(
            photo_of(&db, "P2").await?.as_deref(),
            Some("resources/custom/boots.png")
        );
        assert_eq!(photo_of(&db, "P3").await?, None);
        assert_eq!(photo_of(&db, "P4").await?, None);

        Ok(())
    }

    async fn photo_of(db: &DatabaseConnection, article: &str) -> Result<Option<String>> {
        let product = Product::find()
            .filter(product::Column::Article.eq(article))
            .one(db)
            .await?
            .unwrap();
        Ok(product.photo_path)
    }
}
