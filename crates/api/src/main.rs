use std::sync::Arc;

use stockroom_api::app;
use stockroom_api::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockroom_observability::init();

    let config = Config::from_env();

    let db = stockroom_store::connect(&config.mongodb_uri, &config.mongodb_db).await?;
    let services = Arc::new(app::services::AppServices::new(
        &db,
        config.duplicate_location_policy,
    ));
    services.ensure_indexes().await?;

    let router = app::build_app(config.jwt_secret.into_bytes(), services);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;
    Ok(())
}
