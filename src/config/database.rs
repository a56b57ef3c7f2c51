//! PostgreSQL pool initialization.
//!
//! The pool's acquire timeout is the bound referenced by the evaluator's
//! failure semantics: a store that cannot hand out a connection within it
//! surfaces as an infrastructure error, never as a denial.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default 10)
//! - `DATABASE_ACQUIRE_TIMEOUT_SECS`: acquire bound in seconds (default 5)

use std::env;
use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    pool_options()
        .connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

pub fn pool_options() -> PgPoolOptions {
    let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);
    let acquire_timeout = env::var("DATABASE_ACQUIRE_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(5);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(acquire_timeout))
}
