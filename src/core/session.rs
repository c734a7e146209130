//! Login sessions and role-based permissions.
//!
//! A [`Session`] is either an authenticated user or the anonymous guest.
//! Screens never compare role strings themselves; they ask the session's
//! [`Role`] through the `can_*` methods, so the permission matrix lives in
//! exactly one place.

use crate::{
    core::user as user_repo,
    entities::user,
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;

/// Access level derived from the stored role string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Role {
    /// Anonymous browsing; also the fallback for unrecognized role strings
    #[default]
    Guest,
    /// Sees orders but cannot change anything
    Manager,
    /// Full access
    Administrator,
}

impl Role {
    /// Maps a stored role string onto an access level.
    ///
    /// Unknown strings degrade to [`Role::Guest`] rather than failing, so a
    /// typo in seeded data can never grant extra access.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Администратор" => Self::Administrator,
            "Менеджер" => Self::Manager,
            _ => Self::Guest,
        }
    }

    /// The human-readable label shown in the window title.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Guest => "Гость",
            Self::Manager => "Менеджер",
            Self::Administrator => "Администратор",
        }
    }

    /// Everyone may browse the catalog.
    #[must_use]
    pub fn can_browse_catalog(self) -> bool {
        true
    }

    /// Managers and administrators may open the orders screen.
    #[must_use]
    pub fn can_view_orders(self) -> bool {
        !matches!(self, Self::Guest)
    }

    /// Only administrators may create, edit, or delete products.
    #[must_use]
    pub fn can_edit_products(self) -> bool {
        matches!(self, Self::Administrator)
    }

    /// Only administrators may create, edit, or delete orders.
    #[must_use]
    pub fn can_edit_orders(self) -> bool {
        matches!(self, Self::Administrator)
    }
}

/// Who is using the application right now.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<user::Model>,
    role: Role,
}

impl Session {
    /// An anonymous session with guest access.
    #[must_use]
    pub fn guest() -> Self {
        Self::default()
    }

    /// A session for an already loaded user record.
    #[must_use]
    pub fn for_user(user: user::Model) -> Self {
        let role = Role::parse(&user.role);
        Self {
            user: Some(user),
            role,
        }
    }

    /// Attempts to log in with the given credentials.
    ///
    /// Both fields are trimmed first; a blank field is rejected as a
    /// validation error without touching the store. A credential mismatch
    /// returns `Ok(None)`, deliberately not revealing whether the login or
    /// the password was wrong.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] on blank input, or a database error.
    pub async fn log_in(
        db: &DatabaseConnection,
        login: &str,
        password: &str,
    ) -> Result<Option<Self>> {
        let login = login.trim();
        let password = password.trim();
        if login.is_empty() || password.is_empty() {
            return Err(Error::Validation {
                message: "login and password must not be empty".to_string(),
            });
        }

        let user = user_repo::authenticate(db, login, password).await?;
        Ok(user.map(Self::for_user))
    }

    /// The access level of this session.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// The authenticated user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&user::Model> {
        self.user.as_ref()
    }

    /// True for the anonymous guest session.
    #[must_use]
    pub fn is_guest(&self) -> bool {
        self.user.is_none()
    }

    /// Name to greet the user with: the full name when logged in, the
    /// guest label otherwise.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.user
            .as_ref()
            .map_or_else(|| Role::Guest.label(), |u| u.full_name.as_str())
    }
}
