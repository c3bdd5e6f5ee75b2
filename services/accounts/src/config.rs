/// Accounts service configuration loaded from environment variables.
#[derive(Debug)]
pub struct AccountsConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3117). Env var: `ACCOUNTS_PORT`.
    pub accounts_port: u16,
}

impl AccountsConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            accounts_port: std::env::var("ACCOUNTS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3117),
        }
    }
}
