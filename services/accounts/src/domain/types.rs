use std::collections::BTreeSet;

use vitrine_domain::auth::Authenticatable;
use vitrine_domain::id::{AddressId, OrderId, ProductId, ReportId, UserId, VerificationId};
use vitrine_domain::role;

/// One authenticatable account and its relationship bookkeeping.
///
/// A fresh record has every scalar unset and every collection empty; the id
/// is assigned by storage (or by the [`AccountArena`](super::arena::AccountArena))
/// and never changes afterwards. The record itself performs no validation —
/// format, length, and uniqueness checks belong to the use-case layer, and
/// the username uniqueness constraint is enforced by storage.
#[derive(Debug, Clone, Default)]
pub struct User {
    pub id: Option<UserId>,
    pub username: Option<String>,
    pub roles: Vec<String>,
    /// Password hash. Hash selection and comparison live outside this record.
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Tri-state moderation flag: unset, explicitly cleared, or banned.
    pub is_banned: Option<bool>,
    pub verification: Option<VerificationId>,
    pub address: Option<AddressId>,
    pub products: BTreeSet<ProductId>,
    pub orders: BTreeSet<OrderId>,
    pub reports: BTreeSet<ReportId>,
    /// Set by storage on load; `None` on a fresh record.
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl User {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_banned(mut self, is_banned: Option<bool>) -> Self {
        self.is_banned = is_banned;
        self
    }
}

impl Authenticatable for User {
    fn identity(&self) -> &str {
        self.username.as_deref().unwrap_or("")
    }

    fn roles(&self) -> Vec<String> {
        role::effective(&self.roles)
    }
}

/// Product listing published by at most one user.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: Option<ProductId>,
    pub title: String,
    pub published_by: Option<UserId>,
}

impl Product {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            published_by: None,
        }
    }
}

/// Order placed by at most one user.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: Option<OrderId>,
    pub reference: String,
    pub by_user: Option<UserId>,
}

impl Order {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            id: None,
            reference: reference.into(),
            by_user: None,
        }
    }
}

/// Moderation flag raised by at most one user against a product.
#[derive(Debug, Clone)]
pub struct ProductReport {
    pub id: Option<ReportId>,
    pub product: ProductId,
    pub reason: String,
    pub by_user: Option<UserId>,
}

impl ProductReport {
    pub fn new(product: ProductId, reason: impl Into<String>) -> Self {
        Self {
            id: None,
            product,
            reason: reason.into(),
            by_user: None,
        }
    }
}

/// Postal address exclusively owned by one user.
#[derive(Debug, Clone)]
pub struct Address {
    pub id: Option<AddressId>,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

/// Verification record exclusively owned by one user.
#[derive(Debug, Clone)]
pub struct UserVerification {
    pub id: Option<VerificationId>,
    pub code: String,
    pub verified: bool,
}

/// Validate a username: non-empty, at most 180 characters.
///
/// Uniqueness is enforced by the storage layer, not here.
pub fn validate_username(username: &str) -> bool {
    !username.is_empty() && username.chars().count() <= 180
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_record_has_everything_unset() {
        let user = User::new();
        assert!(user.id.is_none());
        assert!(user.username.is_none());
        assert!(user.password.is_none());
        assert!(user.first_name.is_none());
        assert!(user.last_name.is_none());
        assert_eq!(user.is_banned, None);
        assert!(user.verification.is_none());
        assert!(user.address.is_none());
        assert!(user.products.is_empty());
        assert!(user.orders.is_empty());
        assert!(user.reports.is_empty());
        assert!(user.created_at.is_none());
        assert!(user.updated_at.is_none());
    }

    #[test]
    fn identity_is_empty_while_username_unset() {
        let user = User::new();
        assert_eq!(user.identity(), "");
    }

    #[test]
    fn identity_is_the_username_once_set() {
        let user = User::new().with_username("alice");
        assert_eq!(user.identity(), "alice");
    }

    #[test]
    fn roles_of_alice_with_no_stored_roles_is_exactly_baseline() {
        let user = User::new().with_username("alice");
        assert_eq!(user.roles(), vec![role::BASELINE.to_owned()]);
    }

    #[test]
    fn roles_appends_baseline_after_stored_and_stays_stable() {
        let user = User::new()
            .with_username("alice")
            .with_roles(vec!["MODERATOR".to_owned()]);
        assert_eq!(user.roles(), vec!["MODERATOR", role::BASELINE]);
        assert_eq!(user.roles(), user.roles());
    }

    #[test]
    fn erase_credentials_is_a_safe_no_op() {
        let mut user = User::new().with_password("$argon2id$...");
        user.erase_credentials();
        assert_eq!(user.password.as_deref(), Some("$argon2id$..."));
    }

    #[test]
    fn fluent_setters_chain() {
        let user = User::new()
            .with_username("bob")
            .with_first_name("Bob")
            .with_last_name("Martin")
            .with_banned(Some(false));
        assert_eq!(user.username.as_deref(), Some("bob"));
        assert_eq!(user.first_name.as_deref(), Some("Bob"));
        assert_eq!(user.last_name.as_deref(), Some("Martin"));
        assert_eq!(user.is_banned, Some(false));
    }

    #[test]
    fn should_accept_username_up_to_180_chars() {
        assert!(validate_username("alice"));
        assert!(validate_username(&"a".repeat(180)));
    }

    #[test]
    fn should_reject_empty_or_too_long_username() {
        assert!(!validate_username(""));
        assert!(!validate_username(&"a".repeat(181)));
    }
}
