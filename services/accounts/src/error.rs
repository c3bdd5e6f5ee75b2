use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Accounts service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum AccountsServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("product not found")]
    ProductNotFound,
    #[error("order not found")]
    OrderNotFound,
    #[error("report not found")]
    ReportNotFound,
    #[error("username already taken")]
    UsernameTaken,
    #[error("invalid username")]
    InvalidUsername,
    #[error("missing data")]
    MissingData,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AccountsServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ProductNotFound => "PRODUCT_NOT_FOUND",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::ReportNotFound => "REPORT_NOT_FOUND",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::InvalidUsername => "INVALID_USERNAME",
            Self::MissingData => "MISSING_DATA",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AccountsServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound
            | Self::ProductNotFound
            | Self::OrderNotFound
            | Self::ReportNotFound => StatusCode::NOT_FOUND,
            Self::UsernameTaken => StatusCode::CONFLICT,
            Self::InvalidUsername | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::response::IntoResponse;

    async fn assert_error(
        error: AccountsServiceError,
        expected_status: StatusCode,
        expected_kind: &str,
        expected_message: &str,
    ) {
        let resp = error.into_response();
        assert_eq!(resp.status(), expected_status);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["kind"], expected_kind);
        assert_eq!(json["message"], expected_message);
    }

    #[tokio::test]
    async fn should_return_user_not_found() {
        assert_error(
            AccountsServiceError::UserNotFound,
            StatusCode::NOT_FOUND,
            "USER_NOT_FOUND",
            "user not found",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_product_not_found() {
        assert_error(
            AccountsServiceError::ProductNotFound,
            StatusCode::NOT_FOUND,
            "PRODUCT_NOT_FOUND",
            "product not found",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_username_taken() {
        assert_error(
            AccountsServiceError::UsernameTaken,
            StatusCode::CONFLICT,
            "USERNAME_TAKEN",
            "username already taken",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_invalid_username() {
        assert_error(
            AccountsServiceError::InvalidUsername,
            StatusCode::BAD_REQUEST,
            "INVALID_USERNAME",
            "invalid username",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_missing_data() {
        assert_error(
            AccountsServiceError::MissingData,
            StatusCode::BAD_REQUEST,
            "MISSING_DATA",
            "missing data",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_internal() {
        assert_error(
            AccountsServiceError::Internal(anyhow::anyhow!("db error")),
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL",
            "internal error",
        )
        .await;
    }
}
