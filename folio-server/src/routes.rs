use axum::{
    Router,
    http::{HeaderValue, Method, StatusCode},
    routing::{any, get},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::handlers::{self, portfolio};
use crate::infra::{app_state::AppState, config::CorsConfig};

pub const PORTFOLIO_PATH: &str = "/api/portfolio";
pub const HEALTH_PATH: &str = "/api/health";

pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route(PORTFOLIO_PATH, get(portfolio::get_portfolio))
        .route(HEALTH_PATH, get(handlers::health))
        .route("/api", any(handlers::api_not_found))
        .route("/api/{*rest}", any(handlers::api_not_found))
}

/// Full application: API routes, static assets for everything else,
/// optional CORS and request tracing.
pub fn create_app(state: AppState) -> Router {
    let static_dir = state.config().server.static_dir.clone();
    let cors = cors_layer(&state.config().cors);

    let mut app = create_api_router().with_state(state);

    app = if static_dir.is_dir() {
        info!(dir = %static_dir.display(), "serving static assets");
        app.fallback_service(ServeDir::new(static_dir))
    } else {
        app.fallback(|| async { StatusCode::NOT_FOUND })
    };

    if let Some(cors) = cors {
        app = app.layer(cors);
    }

    app.layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &CorsConfig) -> Option<CorsLayer> {
    if config.allowed_origins.is_empty() {
        return None;
    }

    let allow_origin = if config.allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    Some(
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([Method::GET, Method::OPTIONS]),
    )
}
