use std::sync::Arc;

use gestaller_core::CatalogHandle;
use sqlx::PgPool;

use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::config::jwt::JwtConfig;
use crate::modules::permissions::service::load_catalog;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    /// Current permission catalog. Replaced whole on reload, never mutated.
    pub catalog: Arc<CatalogHandle>,
}

pub async fn init_app_state() -> AppState {
    let db = init_db_pool().await;
    let catalog = load_catalog(&db)
        .await
        .expect("Failed to load the permission catalog");

    AppState {
        db,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        catalog: Arc::new(CatalogHandle::new(catalog)),
    }
}
