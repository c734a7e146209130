//! User repository - account lookups for login and administration.
//!
//! Authentication is an exact-match query on login and password together.
//! A miss returns None without saying which half was wrong, so callers
//! cannot probe which logins exist. Passwords are compared in cleartext,
//! matching the imported data (known gap, kept for source parity).

use crate::{
    entities::{User, user},
    errors::Result,
};
use sea_orm::{QueryOrder, prelude::*};

/// Looks up the account matching the given credentials.
///
/// Returns None on any mismatch; unknown login and wrong password are
/// indistinguishable from the outside.
pub async fn authenticate(
    db: &DatabaseConnection,
    login: &str,
    password: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Login.eq(login))
        .filter(user::Column::Password.eq(password))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all accounts, ordered by full name.
///
/// The order form uses this to offer the client list.
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<user::Model>> {
    User::find()
        .order_by_asc(user::Column::FullName)
        .all(db)
        .await
        .map_err(Into::into)
}
