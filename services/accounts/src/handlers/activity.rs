use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use vitrine_domain::id::{OrderId, ProductId, ReportId, UserId};

use crate::error::AccountsServiceError;
use crate::handlers::listing::ListQuery;
use crate::state::AppState;
use crate::usecase::activity::{
    CancelOrderUseCase, FileReportInput, FileReportUseCase, ListUserOrdersUseCase,
    ListUserReportsUseCase, PlaceOrderUseCase, WithdrawReportUseCase,
};

// ── POST /users/{id}/orders ──────────────────────────────────────────────────

#[derive(Serialize)]
pub struct OrderPlacedResponse {
    pub id: i64,
    pub reference: String,
}

pub async fn place_order(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<(StatusCode, Json<OrderPlacedResponse>), AccountsServiceError> {
    let usecase = PlaceOrderUseCase {
        orders: state.order_repo(),
    };
    let (id, reference) = usecase.execute(UserId(user_id)).await?;
    Ok((
        StatusCode::CREATED,
        Json(OrderPlacedResponse {
            id: id.0,
            reference,
        }),
    ))
}

// ── DELETE /users/{id}/orders/{order_id} ─────────────────────────────────────

pub async fn cancel_order(
    State(state): State<AppState>,
    Path((user_id, order_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AccountsServiceError> {
    let usecase = CancelOrderUseCase {
        orders: state.order_repo(),
    };
    // A stale cancel (order already reassigned) is a quiet no-op.
    usecase.execute(OrderId(order_id), UserId(user_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /users/{id}/orders ───────────────────────────────────────────────────

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: i64,
    pub reference: String,
    pub by_user: Option<i64>,
}

pub async fn get_user_orders(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<OrderResponse>>, AccountsServiceError> {
    let usecase = ListUserOrdersUseCase {
        orders: state.order_repo(),
    };
    let orders = usecase
        .execute(UserId(user_id), query.page_request())
        .await?;
    let items = orders
        .into_iter()
        .map(|order| OrderResponse {
            id: order.id.map(|id| id.0).unwrap_or_default(),
            reference: order.reference,
            by_user: order.by_user.map(|u| u.0),
        })
        .collect();
    Ok(Json(items))
}

// ── POST /users/{id}/reports ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct FileReportRequest {
    pub product_id: i64,
    pub reason: String,
}

#[derive(Serialize)]
pub struct ReportFiledResponse {
    pub id: i64,
}

pub async fn file_report(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(body): Json<FileReportRequest>,
) -> Result<(StatusCode, Json<ReportFiledResponse>), AccountsServiceError> {
    let usecase = FileReportUseCase {
        reports: state.report_repo(),
        products: state.product_repo(),
    };
    let id = usecase
        .execute(
            UserId(user_id),
            FileReportInput {
                product: ProductId(body.product_id),
                reason: body.reason,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ReportFiledResponse { id: id.0 })))
}

// ── DELETE /users/{id}/reports/{report_id} ───────────────────────────────────

pub async fn withdraw_report(
    State(state): State<AppState>,
    Path((user_id, report_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AccountsServiceError> {
    let usecase = WithdrawReportUseCase {
        reports: state.report_repo(),
    };
    usecase
        .execute(ReportId(report_id), UserId(user_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /users/{id}/reports ──────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ReportResponse {
    pub id: i64,
    pub product_id: i64,
    pub reason: String,
    pub by_user: Option<i64>,
}

pub async fn get_user_reports(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ReportResponse>>, AccountsServiceError> {
    let usecase = ListUserReportsUseCase {
        reports: state.report_repo(),
    };
    let reports = usecase
        .execute(UserId(user_id), query.page_request())
        .await?;
    let items = reports
        .into_iter()
        .map(|report| ReportResponse {
            id: report.id.map(|id| id.0).unwrap_or_default(),
            product_id: report.product.0,
            reason: report.reason,
            by_user: report.by_user.map(|u| u.0),
        })
        .collect();
    Ok(Json(items))
}
