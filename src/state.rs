use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::auth::tokens::TokenService;
use crate::config::AppConfig;

/// Shared per-process dependencies, handed to every handler through axum
/// `State`. The token service is built here once, so the signing secret is
/// read a single time at startup.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub tokens: TokenService,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        let tokens = TokenService::new(&config.jwt);
        Ok(Self { db, tokens })
    }
}
