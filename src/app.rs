use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::database::Store;
use crate::forms::{DepartmentForm, JobForm};
use crate::handlers::{protected, public};

/// Request-scoped dependencies, cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Anonymous access
        .merge(public_routes())
        // Session required
        .merge(protected_routes())
        // Global middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    crate::middleware::resolve_identity,
                )),
        );

    if let Some(cors) = cors_layer(&state.config) {
        router = router.layer(cors);
    }

    router.with_state(state)
}

fn public_routes() -> Router<AppState> {
    use public::{auth, listing};

    Router::new()
        .route("/", get(listing::index))
        .route("/departments", get(listing::departments))
        .route("/health", get(listing::health))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/register", get(auth::register_form).post(auth::register))
}

fn protected_routes() -> Router<AppState> {
    use protected::{auth, records};

    Router::new()
        .route("/logout", get(auth::logout))
        // Jobs
        .route(
            "/add_job",
            get(records::create_form::<JobForm>).post(records::create::<JobForm>),
        )
        .route(
            "/edit_job/:id",
            get(records::edit_form::<JobForm>).post(records::update::<JobForm>),
        )
        .route(
            "/job_delete/:id",
            get(records::delete::<JobForm>).post(records::delete::<JobForm>),
        )
        // Departments
        .route(
            "/add_department",
            get(records::create_form::<DepartmentForm>).post(records::create::<DepartmentForm>),
        )
        .route(
            "/edit_department/:id",
            get(records::edit_form::<DepartmentForm>).post(records::update::<DepartmentForm>),
        )
        .route(
            "/delete_department/:id",
            get(records::delete::<DepartmentForm>).post(records::delete::<DepartmentForm>),
        )
        .route_layer(middleware::from_fn(crate::middleware::require_login))
}

fn cors_layer(config: &AppConfig) -> Option<CorsLayer> {
    if !config.security.enable_cors {
        return None;
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST])
            .allow_credentials(true),
    )
}
