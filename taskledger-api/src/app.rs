/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskledger_api::{app::{build_router, AppState}, config::Config};
/// use taskledger_shared::db::pool::{create_pool, PoolSettings};
/// use taskledger_shared::store::postgres::PgStore;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(PoolSettings {
///     url: config.database.url.clone(),
///     ..Default::default()
/// })
/// .await?;
/// let state = AppState::new(Arc::new(PgStore::new(pool)), config);
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{
    config::Config,
    middleware::security::{security_headers, HeaderPolicy},
};
use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use taskledger_shared::{services::ServiceContext, store::EntityStore};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Store plus identity policy, handed to every service call
    pub services: ServiceContext,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn EntityStore>, config: Config) -> Self {
        Self {
            services: ServiceContext::new(store, config.identity_policy),
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET  /                       # Welcome banner
/// ├── GET  /health
/// ├── POST /login
/// ├── /projects                    # Manager
/// │   ├── POST   /
/// │   ├── GET    /
/// │   └── GET|PUT|DELETE /:id
/// └── /tasks
///     ├── POST   /                 # Manager
///     ├── GET    /assigned         # Team Member
///     ├── GET|PUT|DELETE /:id      # Manager
///     ├── PUT    /:id/assign       # Manager
///     ├── PUT    /:id/status       # assignee
///     ├── POST   /:id/log-time     # assignee (Team Member)
///     └── GET    /:id/logs         # Manager
/// ```
///
/// The caller's identity travels in the `user_id` header.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let project_routes = Router::new()
        .route(
            "/",
            post(routes::projects::create_project).get(routes::projects::list_projects),
        )
        .route(
            "/:id",
            get(routes::projects::get_project)
                .put(routes::projects::update_project)
                .delete(routes::projects::delete_project),
        );

    let task_routes = Router::new()
        .route("/", post(routes::tasks::create_task))
        .route("/assigned", get(routes::tasks::list_assigned_tasks))
        .route(
            "/:id",
            get(routes::tasks::get_task)
                .put(routes::tasks::edit_task)
                .delete(routes::tasks::delete_task),
        )
        .route("/:id/assign", put(routes::tasks::assign_task))
        .route("/:id/status", put(routes::tasks::update_task_status))
        .route("/:id/log-time", post(routes::time_logs::log_time))
        .route("/:id/logs", get(routes::time_logs::list_task_logs));

    let cors = if state.config.api.cors_origins.iter().any(|origin| origin == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
            .allow_headers([
                header::CONTENT_TYPE,
                HeaderName::from_static(crate::extract::USER_ID_HEADER),
            ])
            .max_age(std::time::Duration::from_secs(3600))
    };

    let header_policy = HeaderPolicy {
        hsts: state.config.api.production,
    };

    Router::new()
        .route("/", get(routes::health::welcome))
        .route("/health", get(routes::health::health_check))
        .route("/login", post(routes::login::login))
        .nest("/projects", project_routes)
        .nest("/tasks", task_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(axum::middleware::from_fn_with_state(header_policy, security_headers))
        .with_state(state)
}
