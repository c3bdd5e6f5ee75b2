use uuid::Uuid;

use vitrine_domain::id::{OrderId, ProductId, ReportId, UserId};
use vitrine_domain::pagination::PageRequest;

use crate::domain::repository::{OrderRepository, ProductRepository, ReportRepository};
use crate::domain::types::{Order, ProductReport};
use crate::error::AccountsServiceError;

// ── PlaceOrder ───────────────────────────────────────────────────────────────

pub struct PlaceOrderUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> PlaceOrderUseCase<O> {
    pub async fn execute(&self, user: UserId) -> Result<(OrderId, String), AccountsServiceError> {
        let reference = format!("ORD-{}", Uuid::new_v4().simple());
        let id = self.orders.place(&reference, user).await?;
        Ok((id, reference))
    }
}

// ── CancelOrder ──────────────────────────────────────────────────────────────

pub struct CancelOrderUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> CancelOrderUseCase<O> {
    /// Detach an order from its user. Returns `false` without touching
    /// anything when the order no longer belongs to this user.
    pub async fn execute(&self, order: OrderId, user: UserId) -> Result<bool, AccountsServiceError> {
        if self.orders.find_by_id(order).await?.is_none() {
            return Err(AccountsServiceError::OrderNotFound);
        }
        self.orders.release_owner(order, user).await
    }
}

// ── ListUserOrders ───────────────────────────────────────────────────────────

pub struct ListUserOrdersUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> ListUserOrdersUseCase<O> {
    pub async fn execute(
        &self,
        user: UserId,
        page: PageRequest,
    ) -> Result<Vec<Order>, AccountsServiceError> {
        self.orders.list_by_user(user, page.clamped()).await
    }
}

// ── FileReport ───────────────────────────────────────────────────────────────

pub struct FileReportInput {
    pub product: ProductId,
    pub reason: String,
}

pub struct FileReportUseCase<R: ReportRepository, P: ProductRepository> {
    pub reports: R,
    pub products: P,
}

impl<R: ReportRepository, P: ProductRepository> FileReportUseCase<R, P> {
    pub async fn execute(
        &self,
        user: UserId,
        input: FileReportInput,
    ) -> Result<ReportId, AccountsServiceError> {
        if self.products.find_by_id(input.product).await?.is_none() {
            return Err(AccountsServiceError::ProductNotFound);
        }
        self.reports.file(input.product, &input.reason, user).await
    }
}

// ── WithdrawReport ───────────────────────────────────────────────────────────

pub struct WithdrawReportUseCase<R: ReportRepository> {
    pub reports: R,
}

impl<R: ReportRepository> WithdrawReportUseCase<R> {
    pub async fn execute(
        &self,
        report: ReportId,
        user: UserId,
    ) -> Result<bool, AccountsServiceError> {
        if self.reports.find_by_id(report).await?.is_none() {
            return Err(AccountsServiceError::ReportNotFound);
        }
        self.reports.release_owner(report, user).await
    }
}

// ── ListUserReports ──────────────────────────────────────────────────────────

pub struct ListUserReportsUseCase<R: ReportRepository> {
    pub reports: R,
}

impl<R: ReportRepository> ListUserReportsUseCase<R> {
    pub async fn execute(
        &self,
        user: UserId,
        page: PageRequest,
    ) -> Result<Vec<ProductReport>, AccountsServiceError> {
        self.reports.list_by_user(user, page.clamped()).await
    }
}
