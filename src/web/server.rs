use axum::{
    http::{header, Method},
    Router,
};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::web::api::{create_router, ApiLimits, AppState};

/// Configuration for the web server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub enable_cors: bool,
    pub max_sessions: usize,
    /// Upper bound on K for top-K queries
    pub max_k: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let limits = ApiLimits::default();
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3005,
            enable_cors: true,
            max_sessions: limits.max_sessions,
            max_k: limits.max_k,
        }
    }
}

impl ServerConfig {
    pub fn limits(&self) -> ApiLimits {
        ApiLimits {
            max_sessions: self.max_sessions,
            max_k: self.max_k,
        }
    }
}

/// Builds the application with its state and middleware
pub fn build_app(config: &ServerConfig) -> Router {
    let app_state = AppState::with_limits(config.limits());
    let app = Router::new().merge(create_router()).with_state(app_state);

    if !config.enable_cors {
        return app;
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    app.layer(ServiceBuilder::new().layer(cors).into_inner())
}

/// Start the web server with the given configuration
pub async fn start_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_app(&config);

    let addr = SocketAddr::new(config.host, config.port);
    log::info!("kpaths web server listening on http://{}", addr);
    log::info!(
        "limits: {} sessions, k <= {}, CORS {}",
        config.max_sessions,
        config.max_k,
        if config.enable_cors { "on" } else { "off" }
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
