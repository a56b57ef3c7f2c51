use dotenvy::dotenv;

use gestaller::logging::init_tracing;
use gestaller::router::init_router;
use gestaller::state::init_app_state;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    let state = init_app_state().await;
    let app = init_router(state);

    let addr = std::env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    tracing::info!("Gestaller API listening on {addr}");
    axum::serve(listener, app).await.expect("Server error");
}
