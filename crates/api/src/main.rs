use std::sync::Arc;

use fauna_store::{AnimalStore, InMemoryAnimalStore, PostgresAnimalStore};
use sqlx::PgPool;

#[tokio::main]
async fn main() {
    fauna_observability::init();

    let store: Arc<dyn AnimalStore> = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let pool = match PgPool::connect(&url).await {
                Ok(pool) => pool,
                Err(e) => {
                    tracing::error!(error = %e, "failed to connect to postgres");
                    std::process::exit(1);
                }
            };
            tracing::info!("connected to postgres");

            let store = PostgresAnimalStore::new(pool);
            store
                .ensure_schema()
                .await
                .expect("failed to prepare animals table");
            Arc::new(store)
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using in-memory animal store");
            Arc::new(InMemoryAnimalStore::new())
        }
    };

    let app = fauna_api::app::build_app(store);

    let port = std::env::var("PORT").unwrap_or_else(|_| {
        tracing::warn!("PORT not set; defaulting to 3000");
        "3000".to_string()
    });

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind listen address");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
