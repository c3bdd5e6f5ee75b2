use std::collections::BTreeSet;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, SqlErr, TransactionTrait, sea_query::Expr,
};

use vitrine_domain::id::{AddressId, OrderId, ProductId, ReportId, UserId, VerificationId};
use vitrine_domain::pagination::PageRequest;
use vitrine_accounts_schema::{addresses, orders, product_reports, products, user_verifications, users};

use crate::domain::repository::{
    NewUser, OrderRepository, ProductRepository, ReportRepository, UserRepository,
};
use crate::domain::types::{Address, Order, Product, ProductReport, User, UserVerification};
use crate::error::AccountsServiceError;

fn internal(e: DbErr, what: &'static str) -> AccountsServiceError {
    AccountsServiceError::Internal(anyhow::Error::new(e).context(what))
}

/// Updates on a missing primary key surface as `RecordNotUpdated`.
fn map_user_update_err(e: DbErr, what: &'static str) -> AccountsServiceError {
    match e {
        DbErr::RecordNotUpdated => AccountsServiceError::UserNotFound,
        e => internal(e, what),
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl DbUserRepository {
    /// Hydrate the domain record: scalar row plus the id sets of the three
    /// inverse-side collections.
    async fn hydrate(&self, model: users::Model) -> Result<User, AccountsServiceError> {
        let product_ids: BTreeSet<ProductId> = products::Entity::find()
            .filter(products::Column::PublishedBy.eq(model.id))
            .all(&self.db)
            .await
            .context("load user products")?
            .into_iter()
            .map(|p| ProductId(p.id))
            .collect();
        let order_ids: BTreeSet<OrderId> = orders::Entity::find()
            .filter(orders::Column::ByUser.eq(model.id))
            .all(&self.db)
            .await
            .context("load user orders")?
            .into_iter()
            .map(|o| OrderId(o.id))
            .collect();
        let report_ids: BTreeSet<ReportId> = product_reports::Entity::find()
            .filter(product_reports::Column::ByUser.eq(model.id))
            .all(&self.db)
            .await
            .context("load user reports")?
            .into_iter()
            .map(|r| ReportId(r.id))
            .collect();

        Ok(User {
            id: Some(UserId(model.id)),
            username: Some(model.username),
            roles: serde_json::from_value(model.roles).unwrap_or_default(),
            password: Some(model.password),
            first_name: Some(model.first_name),
            last_name: Some(model.last_name),
            is_banned: model.is_banned,
            verification: model.verification_id.map(VerificationId),
            address: model.address_id.map(AddressId),
            products: product_ids,
            orders: order_ids,
            reports: report_ids,
            created_at: Some(model.created_at),
            updated_at: Some(model.updated_at),
        })
    }
}

impl UserRepository for DbUserRepository {
    async fn create(&self, user: &NewUser) -> Result<UserId, AccountsServiceError> {
        let now = Utc::now();
        let result = users::ActiveModel {
            username: Set(user.username.clone()),
            roles: Set(serde_json::json!(user.roles)),
            password: Set(user.password.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(model) => Ok(UserId(model.id)),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(AccountsServiceError::UsernameTaken)
                }
                _ => Err(internal(e, "create user")),
            },
        }
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AccountsServiceError> {
        let model = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find user by id")?;
        match model {
            Some(model) => Ok(Some(self.hydrate(model).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, AccountsServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        match model {
            Some(model) => Ok(Some(self.hydrate(model).await?)),
            None => Ok(None),
        }
    }

    async fn update_profile(
        &self,
        id: UserId,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<(), AccountsServiceError> {
        let mut am = users::ActiveModel {
            id: Set(id.0),
            ..Default::default()
        };
        if let Some(first_name) = first_name {
            am.first_name = Set(first_name.to_owned());
        }
        if let Some(last_name) = last_name {
            am.last_name = Set(last_name.to_owned());
        }
        am.updated_at = Set(Utc::now());
        am.update(&self.db)
            .await
            .map_err(|e| map_user_update_err(e, "update user profile"))?;
        Ok(())
    }

    async fn set_roles(&self, id: UserId, roles: &[String]) -> Result<(), AccountsServiceError> {
        let am = users::ActiveModel {
            id: Set(id.0),
            roles: Set(serde_json::json!(roles)),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        am.update(&self.db)
            .await
            .map_err(|e| map_user_update_err(e, "set user roles"))?;
        Ok(())
    }

    async fn set_password(&self, id: UserId, password: &str) -> Result<(), AccountsServiceError> {
        let am = users::ActiveModel {
            id: Set(id.0),
            password: Set(password.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        am.update(&self.db)
            .await
            .map_err(|e| map_user_update_err(e, "set user password"))?;
        Ok(())
    }

    async fn set_banned(
        &self,
        id: UserId,
        is_banned: Option<bool>,
    ) -> Result<(), AccountsServiceError> {
        let am = users::ActiveModel {
            id: Set(id.0),
            is_banned: Set(is_banned),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        am.update(&self.db)
            .await
            .map_err(|e| map_user_update_err(e, "set user ban flag"))?;
        Ok(())
    }

    async fn replace_address(
        &self,
        id: UserId,
        address: &Address,
    ) -> Result<AddressId, AccountsServiceError> {
        let user = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find user for address replace")?
            .ok_or(AccountsServiceError::UserNotFound)?;
        let previous = user.address_id;
        let address = address.clone();

        let new_id = self
            .db
            .transaction::<_, i64, DbErr>(|txn| {
                Box::pin(async move {
                    let inserted = addresses::ActiveModel {
                        street: Set(address.street),
                        city: Set(address.city),
                        postal_code: Set(address.postal_code),
                        country: Set(address.country),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;

                    users::ActiveModel {
                        id: Set(user.id),
                        address_id: Set(Some(inserted.id)),
                        updated_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;

                    // Exclusive ownership: the replaced row must not linger.
                    if let Some(old) = previous {
                        addresses::Entity::delete_by_id(old).exec(txn).await?;
                    }
                    Ok(inserted.id)
                })
            })
            .await
            .context("replace user address")?;
        Ok(AddressId(new_id))
    }

    async fn clear_address(&self, id: UserId) -> Result<(), AccountsServiceError> {
        let user = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find user for address clear")?
            .ok_or(AccountsServiceError::UserNotFound)?;
        let Some(old) = user.address_id else {
            return Ok(());
        };
        self.db
            .transaction::<_, (), DbErr>(move |txn| {
                Box::pin(async move {
                    users::ActiveModel {
                        id: Set(user.id),
                        address_id: Set(None),
                        updated_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;
                    addresses::Entity::delete_by_id(old).exec(txn).await?;
                    Ok(())
                })
            })
            .await
            .context("clear user address")?;
        Ok(())
    }

    async fn replace_verification(
        &self,
        id: UserId,
        verification: &UserVerification,
    ) -> Result<VerificationId, AccountsServiceError> {
        let user = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find user for verification replace")?
            .ok_or(AccountsServiceError::UserNotFound)?;
        let previous = user.verification_id;
        let verification = verification.clone();

        let new_id = self
            .db
            .transaction::<_, i64, DbErr>(|txn| {
                Box::pin(async move {
                    let inserted = user_verifications::ActiveModel {
                        code: Set(verification.code),
                        verified: Set(verification.verified),
                        created_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;

                    users::ActiveModel {
                        id: Set(user.id),
                        verification_id: Set(Some(inserted.id)),
                        updated_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;

                    if let Some(old) = previous {
                        user_verifications::Entity::delete_by_id(old)
                            .exec(txn)
                            .await?;
                    }
                    Ok(inserted.id)
                })
            })
            .await
            .context("replace user verification")?;
        Ok(VerificationId(new_id))
    }

    async fn clear_verification(&self, id: UserId) -> Result<(), AccountsServiceError> {
        let user = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find user for verification clear")?
            .ok_or(AccountsServiceError::UserNotFound)?;
        let Some(old) = user.verification_id else {
            return Ok(());
        };
        self.db
            .transaction::<_, (), DbErr>(move |txn| {
                Box::pin(async move {
                    users::ActiveModel {
                        id: Set(user.id),
                        verification_id: Set(None),
                        updated_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;
                    user_verifications::Entity::delete_by_id(old)
                        .exec(txn)
                        .await?;
                    Ok(())
                })
            })
            .await
            .context("clear user verification")?;
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<bool, AccountsServiceError> {
        let user = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find user for delete")?;
        let Some(user) = user else {
            return Ok(false);
        };
        // Owner FKs on products/orders/product_reports are ON DELETE SET NULL,
        // so the database nulls out the inverse references. The exclusively
        // owned one-to-one rows must be deleted after the user row no longer
        // references them.
        self.db
            .transaction::<_, (), DbErr>(move |txn| {
                Box::pin(async move {
                    users::Entity::delete_by_id(user.id).exec(txn).await?;
                    if let Some(address) = user.address_id {
                        addresses::Entity::delete_by_id(address).exec(txn).await?;
                    }
                    if let Some(verification) = user.verification_id {
                        user_verifications::Entity::delete_by_id(verification)
                            .exec(txn)
                            .await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("delete user")?;
        Ok(true)
    }
}

// ── Product repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProductRepository {
    pub db: DatabaseConnection,
}

impl ProductRepository for DbProductRepository {
    async fn create(&self, title: &str) -> Result<ProductId, AccountsServiceError> {
        let model = products::ActiveModel {
            title: Set(title.to_owned()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create product")?;
        Ok(ProductId(model.id))
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, AccountsServiceError> {
        let model = products::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find product by id")?;
        Ok(model.map(product_from_model))
    }

    async fn assign_owner(
        &self,
        product: ProductId,
        user: UserId,
    ) -> Result<(), AccountsServiceError> {
        let result = products::Entity::update_many()
            .filter(products::Column::Id.eq(product.0))
            .col_expr(products::Column::PublishedBy, Expr::value(user.0))
            .exec(&self.db)
            .await
            .context("assign product owner")?;
        if result.rows_affected == 0 {
            return Err(AccountsServiceError::ProductNotFound);
        }
        Ok(())
    }

    async fn release_owner(
        &self,
        product: ProductId,
        user: UserId,
    ) -> Result<bool, AccountsServiceError> {
        // The owner filter is the stale-removal guard: after a reassignment
        // the row no longer matches and the new owner stays untouched.
        let result = products::Entity::update_many()
            .filter(products::Column::Id.eq(product.0))
            .filter(products::Column::PublishedBy.eq(user.0))
            .col_expr(products::Column::PublishedBy, Expr::value(None::<i64>))
            .exec(&self.db)
            .await
            .context("release product owner")?;
        Ok(result.rows_affected > 0)
    }

    async fn list_by_user(
        &self,
        user: UserId,
        page: PageRequest,
    ) -> Result<Vec<Product>, AccountsServiceError> {
        let PageRequest { per_page, page } = page.clamped();
        let models = products::Entity::find()
            .filter(products::Column::PublishedBy.eq(user.0))
            .order_by_asc(products::Column::Id)
            .offset(((page - 1) * per_page) as u64)
            .limit(per_page as u64)
            .all(&self.db)
            .await
            .context("list user products")?;
        Ok(models.into_iter().map(product_from_model).collect())
    }
}

fn product_from_model(model: products::Model) -> Product {
    Product {
        id: Some(ProductId(model.id)),
        title: model.title,
        published_by: model.published_by.map(UserId),
    }
}

// ── Order repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOrderRepository {
    pub db: DatabaseConnection,
}

impl OrderRepository for DbOrderRepository {
    async fn place(
        &self,
        reference: &str,
        by_user: UserId,
    ) -> Result<OrderId, AccountsServiceError> {
        let model = orders::ActiveModel {
            reference: Set(reference.to_owned()),
            by_user: Set(Some(by_user.0)),
            placed_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("place order")?;
        Ok(OrderId(model.id))
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, AccountsServiceError> {
        let model = orders::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find order by id")?;
        Ok(model.map(order_from_model))
    }

    async fn release_owner(
        &self,
        order: OrderId,
        user: UserId,
    ) -> Result<bool, AccountsServiceError> {
        let result = orders::Entity::update_many()
            .filter(orders::Column::Id.eq(order.0))
            .filter(orders::Column::ByUser.eq(user.0))
            .col_expr(orders::Column::ByUser, Expr::value(None::<i64>))
            .exec(&self.db)
            .await
            .context("release order owner")?;
        Ok(result.rows_affected > 0)
    }

    async fn list_by_user(
        &self,
        user: UserId,
        page: PageRequest,
    ) -> Result<Vec<Order>, AccountsServiceError> {
        let PageRequest { per_page, page } = page.clamped();
        let models = orders::Entity::find()
            .filter(orders::Column::ByUser.eq(user.0))
            .order_by_desc(orders::Column::PlacedAt)
            .offset(((page - 1) * per_page) as u64)
            .limit(per_page as u64)
            .all(&self.db)
            .await
            .context("list user orders")?;
        Ok(models.into_iter().map(order_from_model).collect())
    }
}

fn order_from_model(model: orders::Model) -> Order {
    Order {
        id: Some(OrderId(model.id)),
        reference: model.reference,
        by_user: model.by_user.map(UserId),
    }
}

// ── Report repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbReportRepository {
    pub db: DatabaseConnection,
}

impl ReportRepository for DbReportRepository {
    async fn file(
        &self,
        product: ProductId,
        reason: &str,
        by_user: UserId,
    ) -> Result<ReportId, AccountsServiceError> {
        let model = product_reports::ActiveModel {
            product_id: Set(product.0),
            reason: Set(reason.to_owned()),
            by_user: Set(Some(by_user.0)),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("file product report")?;
        Ok(ReportId(model.id))
    }

    async fn find_by_id(
        &self,
        id: ReportId,
    ) -> Result<Option<ProductReport>, AccountsServiceError> {
        let model = product_reports::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find report by id")?;
        Ok(model.map(report_from_model))
    }

    async fn release_owner(
        &self,
        report: ReportId,
        user: UserId,
    ) -> Result<bool, AccountsServiceError> {
        let result = product_reports::Entity::update_many()
            .filter(product_reports::Column::Id.eq(report.0))
            .filter(product_reports::Column::ByUser.eq(user.0))
            .col_expr(product_reports::Column::ByUser, Expr::value(None::<i64>))
            .exec(&self.db)
            .await
            .context("release report owner")?;
        Ok(result.rows_affected > 0)
    }

    async fn list_by_user(
        &self,
        user: UserId,
        page: PageRequest,
    ) -> Result<Vec<ProductReport>, AccountsServiceError> {
        let PageRequest { per_page, page } = page.clamped();
        let models = product_reports::Entity::find()
            .filter(product_reports::Column::ByUser.eq(user.0))
            .order_by_desc(product_reports::Column::CreatedAt)
            .offset(((page - 1) * per_page) as u64)
            .limit(per_page as u64)
            .all(&self.db)
            .await
            .context("list user reports")?;
        Ok(models.into_iter().map(report_from_model).collect())
    }
}

fn report_from_model(model: product_reports::Model) -> ProductReport {
    ProductReport {
        id: Some(ReportId(model.id)),
        product: ProductId(model.product_id),
        reason: model.reason,
        by_user: model.by_user.map(UserId),
    }
}
