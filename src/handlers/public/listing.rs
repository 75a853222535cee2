// handlers/public/listing.rs - GET /, GET /departments, GET /health

use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use serde::Serialize;
use serde_json::json;

use crate::app::AppState;
use crate::auth::{CurrentUser, Identity};
use crate::database::models::{Department, Job, OwnedRecord, UserSummary};
use crate::database::{RecordStore, Store};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::RecordService;

/// Records of one kind plus the user directory to resolve ids against
#[derive(Debug, Serialize)]
pub struct Listing<R: OwnedRecord> {
    pub records: Vec<R>,
    pub users: Vec<UserSummary>,
    pub current_user: Option<CurrentUser>,
}

async fn listing<R>(state: &AppState, identity: &Identity) -> ApiResult<Listing<R>>
where
    R: OwnedRecord,
    dyn Store: RecordStore<R>,
{
    let records = RecordService::new(state.store.as_ref()).list::<R>().await?;
    let users = state
        .store
        .list_users()
        .await?
        .iter()
        .map(UserSummary::from)
        .collect();

    Ok(ApiResponse::success(Listing {
        records,
        users,
        current_user: identity.current_user().cloned(),
    }))
}

/// GET / - every job
pub async fn index(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Listing<Job>> {
    listing::<Job>(&state, &identity).await
}

/// GET /departments - every department
pub async fn departments(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Listing<Department>> {
    listing::<Department>(&state, &identity).await
}

/// GET /health - liveness plus a database ping
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
