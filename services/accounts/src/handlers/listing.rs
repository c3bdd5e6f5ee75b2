use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use vitrine_domain::id::{ProductId, UserId};
use vitrine_domain::pagination::PageRequest;

use crate::error::AccountsServiceError;
use crate::state::AppState;
use crate::usecase::listing::{
    ClaimProductUseCase, ListUserProductsUseCase, PublishProductInput, PublishProductUseCase,
    ReleaseProductUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub title: String,
    pub published_by: Option<i64>,
}

// ── POST /users/{id}/products ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct PublishProductRequest {
    pub title: String,
}

#[derive(Serialize)]
pub struct PublishedResponse {
    pub id: i64,
}

pub async fn publish_product(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(body): Json<PublishProductRequest>,
) -> Result<(StatusCode, Json<PublishedResponse>), AccountsServiceError> {
    let usecase = PublishProductUseCase {
        products: state.product_repo(),
    };
    let id = usecase
        .execute(PublishProductInput {
            title: body.title,
            publisher: UserId(user_id),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(PublishedResponse { id: id.0 })))
}

// ── PUT /users/{id}/products/{product_id} ────────────────────────────────────

pub async fn claim_product(
    State(state): State<AppState>,
    Path((user_id, product_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AccountsServiceError> {
    let usecase = ClaimProductUseCase {
        products: state.product_repo(),
    };
    usecase
        .execute(ProductId(product_id), UserId(user_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /users/{id}/products/{product_id} ─────────────────────────────────

pub async fn release_product(
    State(state): State<AppState>,
    Path((user_id, product_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AccountsServiceError> {
    let usecase = ReleaseProductUseCase {
        products: state.product_repo(),
    };
    // A stale release (listing already reassigned) is a quiet no-op.
    usecase
        .execute(ProductId(product_id), UserId(user_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /users/{id}/products ─────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

impl ListQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            per_page: self.per_page.unwrap_or(25),
            page: self.page.unwrap_or(1),
        }
    }
}

pub async fn get_user_products(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ProductResponse>>, AccountsServiceError> {
    let usecase = ListUserProductsUseCase {
        products: state.product_repo(),
    };
    let products = usecase
        .execute(UserId(user_id), query.page_request())
        .await?;
    let items = products
        .into_iter()
        .map(|product| ProductResponse {
            id: product.id.map(|id| id.0).unwrap_or_default(),
            title: product.title,
            published_by: product.published_by.map(|u| u.0),
        })
        .collect();
    Ok(Json(items))
}
