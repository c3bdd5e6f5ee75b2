use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use vitrine_domain::auth::Authenticatable as _;
use vitrine_domain::id::UserId;

use crate::error::AccountsServiceError;
use crate::state::AppState;
use crate::usecase::user::{
    ClearAddressUseCase, ClearVerificationUseCase, DeleteUserUseCase, GetUserUseCase,
    IssueVerificationUseCase, RegisterUserInput, RegisterUserUseCase, ReplaceAddressInput,
    ReplaceAddressUseCase, SetBanUseCase, SetRolesUseCase, UpdateProfileInput,
    UpdateProfileUseCase,
};

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Serialize)]
pub struct RegisteredResponse {
    pub id: i64,
}

pub async fn register_user(
    State(state): State<AppState>,
    Json(body): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<RegisteredResponse>), AccountsServiceError> {
    let usecase = RegisterUserUseCase {
        repo: state.user_repo(),
    };
    let id = usecase
        .execute(RegisterUserInput {
            username: body.username,
            password: body.password,
            first_name: body.first_name,
            last_name: body.last_name,
            roles: body.roles,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(RegisteredResponse { id: id.0 })))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: Option<String>,
    /// Effective roles: stored roles plus the baseline, deduplicated.
    pub roles: Vec<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_banned: Option<bool>,
    pub address_id: Option<i64>,
    pub verification_id: Option<i64>,
    pub product_ids: Vec<i64>,
    pub order_ids: Vec<i64>,
    pub report_ids: Vec<i64>,
    #[serde(serialize_with = "vitrine_core::serde::opt_to_rfc3339_ms")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(serialize_with = "vitrine_core::serde::opt_to_rfc3339_ms")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, AccountsServiceError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(UserId(id)).await?;
    // The password hash never leaves the service.
    Ok(Json(UserResponse {
        id,
        roles: user.roles(),
        username: user.username,
        first_name: user.first_name,
        last_name: user.last_name,
        is_banned: user.is_banned,
        address_id: user.address.map(|a| a.0),
        verification_id: user.verification.map(|v| v.0),
        product_ids: user.products.into_iter().map(|p| p.0).collect(),
        order_ids: user.orders.into_iter().map(|o| o.0).collect(),
        report_ids: user.reports.into_iter().map(|r| r.0).collect(),
        created_at: user.created_at,
        updated_at: user.updated_at,
    }))
}

// ── PATCH /users/{id} ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<StatusCode, AccountsServiceError> {
    let usecase = UpdateProfileUseCase {
        repo: state.user_repo(),
    };
    usecase
        .execute(
            UserId(id),
            UpdateProfileInput {
                first_name: body.first_name,
                last_name: body.last_name,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── PUT /users/{id}/roles ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SetRolesRequest {
    pub roles: Vec<String>,
}

pub async fn set_roles(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<SetRolesRequest>,
) -> Result<StatusCode, AccountsServiceError> {
    let usecase = SetRolesUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(UserId(id), body.roles).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── PUT /users/{id}/ban ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SetBanRequest {
    /// Omitted or null resets the flag to its unset state.
    pub is_banned: Option<bool>,
}

pub async fn set_ban(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<SetBanRequest>,
) -> Result<StatusCode, AccountsServiceError> {
    let usecase = SetBanUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(UserId(id), body.is_banned).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── PUT /users/{id}/address ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ReplaceAddressRequest {
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Serialize)]
pub struct AddressReplacedResponse {
    pub id: i64,
}

pub async fn replace_address(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<ReplaceAddressRequest>,
) -> Result<Json<AddressReplacedResponse>, AccountsServiceError> {
    let usecase = ReplaceAddressUseCase {
        repo: state.user_repo(),
    };
    let address_id = usecase
        .execute(
            UserId(id),
            ReplaceAddressInput {
                street: body.street,
                city: body.city,
                postal_code: body.postal_code,
                country: body.country,
            },
        )
        .await?;
    Ok(Json(AddressReplacedResponse { id: address_id.0 }))
}

// ── DELETE /users/{id}/address ───────────────────────────────────────────────

pub async fn clear_address(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AccountsServiceError> {
    let usecase = ClearAddressUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(UserId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /users/{id}/verification ────────────────────────────────────────────

#[derive(Serialize)]
pub struct VerificationIssuedResponse {
    pub id: i64,
    pub code: String,
}

pub async fn issue_verification(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<VerificationIssuedResponse>), AccountsServiceError> {
    let usecase = IssueVerificationUseCase {
        repo: state.user_repo(),
    };
    let (verification_id, code) = usecase.execute(UserId(id)).await?;
    Ok((
        StatusCode::CREATED,
        Json(VerificationIssuedResponse {
            id: verification_id.0,
            code,
        }),
    ))
}

// ── DELETE /users/{id}/verification ──────────────────────────────────────────

pub async fn clear_verification(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AccountsServiceError> {
    let usecase = ClearVerificationUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(UserId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /users/{id} ───────────────────────────────────────────────────────

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AccountsServiceError> {
    let usecase = DeleteUserUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(UserId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
