use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};
use tower_http::trace::TraceLayer;

use vitrine_core::health::{healthz, readyz};
use vitrine_core::middleware::request_id_layer;

use crate::handlers::{
    activity::{
        cancel_order, file_report, get_user_orders, get_user_reports, place_order,
        withdraw_report,
    },
    listing::{claim_product, get_user_products, publish_product, release_product},
    user::{
        clear_address, clear_verification, delete_user, get_user, issue_verification,
        register_user, replace_address, set_ban, set_roles, update_profile,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users", post(register_user))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}", patch(update_profile))
        .route("/users/{id}", delete(delete_user))
        .route("/users/{id}/roles", put(set_roles))
        .route("/users/{id}/ban", put(set_ban))
        .route("/users/{id}/address", put(replace_address))
        .route("/users/{id}/address", delete(clear_address))
        .route("/users/{id}/verification", post(issue_verification))
        .route("/users/{id}/verification", delete(clear_verification))
        // Products
        .route("/users/{id}/products", post(publish_product))
        .route("/users/{id}/products", get(get_user_products))
        .route("/users/{id}/products/{product_id}", put(claim_product))
        .route("/users/{id}/products/{product_id}", delete(release_product))
        // Orders
        .route("/users/{id}/orders", post(place_order))
        .route("/users/{id}/orders", get(get_user_orders))
        .route("/users/{id}/orders/{order_id}", delete(cancel_order))
        // Reports
        .route("/users/{id}/reports", post(file_report))
        .route("/users/{id}/reports", get(get_user_reports))
        .route("/users/{id}/reports/{report_id}", delete(withdraw_report))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
