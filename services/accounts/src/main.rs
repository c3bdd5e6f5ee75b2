use sea_orm::Database;
use tracing::info;

use vitrine_accounts::config::AccountsConfig;
use vitrine_accounts::router::build_router;
use vitrine_accounts::state::AppState;
use vitrine_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = AccountsConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState { db };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.accounts_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("accounts service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
