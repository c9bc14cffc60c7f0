//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{
        State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::auth::{AuthError, Credentials, RegisterForm, Session, User, ValidationErrors};
use crate::domain::{AtcoCode, Coordinates, DomainError, Stop};
use crate::state::StoreError;
use crate::storage::StorageError;

use super::dto::*;
use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stops/nearby", get(nearby_stops))
        .route("/api/stops/search", get(search_stops))
        .route("/api/stops/:atcocode/departures", get(departures))
        .route("/api/favorites", get(favorites))
        .route("/api/favorites/toggle", post(toggle_favorite))
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/session", get(session))
        .route("/api/theme", get(theme))
        .route("/api/theme/toggle", post(toggle_theme))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn not_found() -> AppError {
    AppError::NotFound {
        message: "No such endpoint".to_string(),
    }
}

/// Stops near a point, from TransportAPI or the fallback set.
async fn nearby_stops(
    State(state): State<AppState>,
    ApiQuery(req): ApiQuery<NearbyStopsRequest>,
) -> Result<Json<StopsResponse>, AppError> {
    let at = Coordinates::new(req.lat, req.lon)?;
    let loaded = state.store.load_nearby_stops(at).await;

    Ok(Json(StopsResponse {
        stops: loaded.data,
        source: Some(loaded.source),
    }))
}

/// Filter the most recently loaded stops by name or code.
async fn search_stops(
    State(state): State<AppState>,
    ApiQuery(req): ApiQuery<StopSearchRequest>,
) -> Json<StopsResponse> {
    let stops = state.store.search_stops(&req.q).await;
    Json(StopsResponse {
        stops,
        source: None,
    })
}

/// Live departures for a stop. Also marks it as the selected stop.
async fn departures(
    State(state): State<AppState>,
    ApiPath(code): ApiPath<String>,
) -> Result<Json<DeparturesResponse>, AppError> {
    let atcocode = AtcoCode::parse_normalized(&code).map_err(|e| AppError::BadRequest {
        message: format!("Invalid stop code {code:?}: {e}"),
    })?;

    let board = state.store.load_departures(&atcocode).await;

    Ok(Json(DeparturesResponse {
        atcocode,
        departures: board.data,
        source: board.source,
    }))
}

async fn favorites(State(state): State<AppState>) -> Json<FavoritesResponse> {
    Json(FavoritesResponse {
        favorites: state.store.favorites().await,
    })
}

/// Add the stop if absent, remove it if present.
async fn toggle_favorite(
    State(state): State<AppState>,
    ApiJson(stop): ApiJson<Stop>,
) -> Result<Json<FavoritesResponse>, AppError> {
    let favorites = state.store.toggle_favorite(&stop).await?;
    Ok(Json(FavoritesResponse { favorites }))
}

async fn login(
    State(state): State<AppState>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> Result<Json<Session>, AppError> {
    Ok(Json(state.store.login(&credentials).await?))
}

async fn register(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<RegisterForm>,
) -> Result<Json<Session>, AppError> {
    Ok(Json(state.store.register(&form).await?))
}

async fn logout(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.store.logout().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The signed-in user, or `null`.
async fn session(State(state): State<AppState>) -> Json<Option<User>> {
    Json(state.store.session().await.map(|s| s.user))
}

async fn theme(State(state): State<AppState>) -> Json<ThemeResponse> {
    Json(ThemeResponse::for_mode(state.store.theme().await.mode))
}

async fn toggle_theme(State(state): State<AppState>) -> Result<Json<ThemeResponse>, AppError> {
    let mode = state.store.toggle_theme().await?;
    Ok(Json(ThemeResponse::for_mode(mode)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Validation(ValidationErrors),
    Unauthorized { message: String },
    NotFound { message: String },
    Upstream { message: String },
    Internal { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(e: PathRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Invalid(errors) => AppError::Validation(errors),
            AuthError::Rejected { status, message } if (400..500).contains(&status) => {
                AppError::Unauthorized { message }
            }
            other => AppError::Upstream {
                message: other.to_string(),
            },
        }
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Auth(e) => e.into(),
            StoreError::Storage(e) => e.into(),
        }
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let body = match self {
            AppError::Validation(errors) => ErrorResponse {
                error: errors.to_string(),
                fields: Some(errors.fields().to_vec()),
            },
            AppError::BadRequest { message }
            | AppError::Unauthorized { message }
            | AppError::NotFound { message }
            | AppError::Upstream { message }
            | AppError::Internal { message } => ErrorResponse {
                error: message,
                fields: None,
            },
        };

        if status.is_server_error() {
            error!(%status, message = %body.error, "request failed");
        } else {
            warn!(%status, message = %body.error, "request rejected");
        }

        (status, Json(body)).into_response()
    }
}
