//! HTTP server

use axum::{
    middleware,
    routing::get,
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::auth::{require_session, AuthService, TokenSigner};
use crate::config::Config;
use crate::db::{self, EmployeeStore, UserStore};
use crate::error::Result;
use crate::ui::{self, Templates};

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub employees: EmployeeStore,
    pub auth: AuthService,
    pub signer: Arc<TokenSigner>,
    pub templates: Templates,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Wire up stores and services over an already bootstrapped pool
    pub fn new(config: Config, pool: SqlitePool) -> Result<Self> {
        config.validate()?;
        let signer = Arc::new(TokenSigner::new(&config.session.secret));
        let auth = AuthService::new(
            UserStore::new(pool.clone()),
            Arc::clone(&signer),
            &config.session,
            &config.auth,
        )?;
        Ok(Self {
            employees: EmployeeStore::new(pool),
            auth,
            signer,
            templates: Templates::new()?,
            config,
        })
    }
}

/// Run the HTTP server until interrupted
pub async fn run_server(config: Config) -> Result<()> {
    config.validate()?;
    let pool = db::open(&config.database, &config.auth).await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config, pool.clone())?);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

/// Create the router with all routes
pub fn create_router(state: SharedState) -> Router {
    let protected = Router::new()
        .route("/dashboard", get(ui::dashboard))
        .route("/add", get(ui::add_page).post(ui::add_submit))
        .route("/edit/{id}", get(ui::edit_page).post(ui::edit_submit))
        .route("/delete/{id}", get(ui::delete))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .route("/", get(ui::index))
        .route("/login", get(ui::login_page).post(ui::login_submit))
        .route("/logout", get(ui::logout))
        .route("/health", get(ui::health))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
