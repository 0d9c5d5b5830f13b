use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod application;
mod auth;
mod config;
mod error;
mod models;
mod routes;

use adapters::{ClerkIdentityProvider, HttpRevalidator, LogRevalidator, SupabaseConnector};
use application::{ClientFactory, CompanionService};
use config::AppConfig;
use converso::{CacheInvalidator, IdentityProvider, StoreConnector};

/// Application service over whichever store and cache adapters are configured
pub type AppCompanionService = CompanionService<dyn StoreConnector, dyn CacheInvalidator>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub companion_service: Arc<AppCompanionService>,
    pub identity: Arc<dyn IdentityProvider>,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Converso API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("Converso API initializing...");

    let config = AppConfig::from_secrets(&secrets).map_err(anyhow::Error::from)?;

    let identity: Arc<dyn IdentityProvider> = Arc::new(
        ClerkIdentityProvider::new(
            config.clerk_api_url.clone(),
            config.clerk_secret_key.clone(),
            &config.clerk_jwt_key,
        )
        .map_err(anyhow::Error::from)?,
    );
    tracing::info!("🔐 Clerk session verification enabled");

    let connector: Arc<dyn StoreConnector> = Arc::new(SupabaseConnector::new(
        &config.supabase_url,
        config.supabase_anon_key.clone(),
    ));
    tracing::info!("🗄️  Supabase store: {}", config.supabase_url);

    let invalidator: Arc<dyn CacheInvalidator> = match config.revalidate_url.clone() {
        Some(url) => {
            tracing::info!("🔔 Revalidation hook: {}", url);
            Arc::new(HttpRevalidator::new(url, config.revalidate_secret.clone()))
        }
        None => {
            tracing::warn!("⚠️  No REVALIDATE_URL set - revalidation is logged only");
            Arc::new(LogRevalidator)
        }
    };

    tracing::info!(
        "🔁 Auth retry: {} attempts on {:?}",
        config.retry.max_attempts,
        config.retry.token_error_patterns
    );

    let companion_service = Arc::new(CompanionService::new(
        ClientFactory::new(connector, config.token_template.clone()),
        invalidator,
        config.retry.clone(),
        config.quota.clone(),
    ));

    let state = AppState {
        companion_service,
        identity,
    };

    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Converso API ready");

    Ok(router.into())
}
