#![allow(async_fn_in_trait)]

use vitrine_domain::id::{AddressId, OrderId, ProductId, ReportId, UserId, VerificationId};
use vitrine_domain::pagination::PageRequest;

use crate::domain::types::{Address, Order, Product, ProductReport, User, UserVerification};
use crate::error::AccountsServiceError;

/// Fields required to persist a new account. The password arrives already
/// hashed; hashing lives outside this service.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: Vec<String>,
}

/// Repository for user accounts.
///
/// The durable mirror of the in-memory association rules: username uniqueness
/// is a storage constraint, owned address/verification rows are deleted with
/// the account, and owner references on related entities are nulled out.
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &NewUser) -> Result<UserId, AccountsServiceError>;
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AccountsServiceError>;
    async fn find_by_username(&self, username: &str)
    -> Result<Option<User>, AccountsServiceError>;
    async fn update_profile(
        &self,
        id: UserId,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<(), AccountsServiceError>;
    async fn set_roles(&self, id: UserId, roles: &[String]) -> Result<(), AccountsServiceError>;
    async fn set_password(&self, id: UserId, password: &str) -> Result<(), AccountsServiceError>;
    async fn set_banned(
        &self,
        id: UserId,
        is_banned: Option<bool>,
    ) -> Result<(), AccountsServiceError>;

    /// Attach an address, deleting any previously owned row.
    async fn replace_address(
        &self,
        id: UserId,
        address: &Address,
    ) -> Result<AddressId, AccountsServiceError>;
    async fn clear_address(&self, id: UserId) -> Result<(), AccountsServiceError>;

    /// Attach a verification record, deleting any previously owned row.
    async fn replace_verification(
        &self,
        id: UserId,
        verification: &UserVerification,
    ) -> Result<VerificationId, AccountsServiceError>;
    async fn clear_verification(&self, id: UserId) -> Result<(), AccountsServiceError>;

    /// Delete the account and cascade per the ownership rules.
    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: UserId) -> Result<bool, AccountsServiceError>;
}

/// Repository for product listings.
pub trait ProductRepository: Send + Sync {
    async fn create(&self, title: &str) -> Result<ProductId, AccountsServiceError>;
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, AccountsServiceError>;

    /// Point the listing's owner at the user. Idempotent.
    async fn assign_owner(
        &self,
        product: ProductId,
        user: UserId,
    ) -> Result<(), AccountsServiceError>;

    /// Clear the owner only while it still points at `user`. Returns `true`
    /// if the owner was cleared; a stale release after reassignment is `false`.
    async fn release_owner(
        &self,
        product: ProductId,
        user: UserId,
    ) -> Result<bool, AccountsServiceError>;

    async fn list_by_user(
        &self,
        user: UserId,
        page: PageRequest,
    ) -> Result<Vec<Product>, AccountsServiceError>;
}

/// Repository for orders.
pub trait OrderRepository: Send + Sync {
    async fn place(&self, reference: &str, by_user: UserId)
    -> Result<OrderId, AccountsServiceError>;
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, AccountsServiceError>;

    /// Clear the owner only while it still points at `user`.
    async fn release_owner(
        &self,
        order: OrderId,
        user: UserId,
    ) -> Result<bool, AccountsServiceError>;

    async fn list_by_user(
        &self,
        user: UserId,
        page: PageRequest,
    ) -> Result<Vec<Order>, AccountsServiceError>;
}

/// Repository for product moderation reports.
pub trait ReportRepository: Send + Sync {
    async fn file(
        &self,
        product: ProductId,
        reason: &str,
        by_user: UserId,
    ) -> Result<ReportId, AccountsServiceError>;
    async fn find_by_id(&self, id: ReportId)
    -> Result<Option<ProductReport>, AccountsServiceError>;

    /// Clear the owner only while it still points at `user`.
    async fn release_owner(
        &self,
        report: ReportId,
        user: UserId,
    ) -> Result<bool, AccountsServiceError>;

    async fn list_by_user(
        &self,
        user: UserId,
        page: PageRequest,
    ) -> Result<Vec<ProductReport>, AccountsServiceError>;
}
