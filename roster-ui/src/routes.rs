//! HTTP route handlers for the registry API.

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use roster::app::{Action, ActionOutcome, INVALID_CREDENTIALS};
use roster::core::route::RouteDecision;
use roster::core::types::FilterSpec;
use roster::forms::{LoginForm, RegisterForm};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::state::SharedState;

const DUPLICATE_EMAIL: &str = "Email already registered";

type ApiResult = Result<(StatusCode, Json<Value>), StatusCode>;

/// Build the API router.
pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route("/health", get(health))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(session))
        .route("/users", get(list_users))
        .route("/route", get(resolve))
}

async fn health() -> &'static str {
    "ok"
}

/// POST /api/register - validate the form, then append the user.
async fn register(State(state): State<SharedState>, Json(form): Json<RegisterForm>) -> ApiResult {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            debug!(%errors, "register form rejected");
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "errors": errors })),
            ));
        }
    };
    let outcome = state.app.lock().await.dispatch(Action::Register(input));
    match outcome {
        ActionOutcome::DuplicateEmail => Ok((
            StatusCode::CONFLICT,
            Json(json!({ "message": DUPLICATE_EMAIL })),
        )),
        outcome => Ok((StatusCode::CREATED, Json(to_json(outcome)?))),
    }
}

/// POST /api/login - validate the form, then attempt to authenticate.
async fn login(State(state): State<SharedState>, Json(form): Json<LoginForm>) -> ApiResult {
    let (email, password) = match form.validate() {
        Ok(credentials) => credentials,
        Err(errors) => {
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "errors": errors })),
            ));
        }
    };
    let outcome = state
        .app
        .lock()
        .await
        .dispatch(Action::LoginAttempt { email, password });
    match outcome {
        ActionOutcome::LoginFailed => Ok((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "outcome": "login_failed", "message": INVALID_CREDENTIALS })),
        )),
        outcome => Ok((StatusCode::OK, Json(to_json(outcome)?))),
    }
}

/// POST /api/logout - clear the session (idempotent).
async fn logout(State(state): State<SharedState>) -> ApiResult {
    let outcome = state.app.lock().await.dispatch(Action::Logout);
    Ok((StatusCode::OK, Json(to_json(outcome)?)))
}

/// GET /api/session - authentication flag, current user and greeting.
async fn session(State(state): State<SharedState>) -> Result<Json<Value>, StatusCode> {
    let app = state.app.lock().await;
    Ok(Json(to_json(app.session_view())?))
}

/// GET /api/users?date=&country=&gender= - filtered listing with badge count.
async fn list_users(
    State(state): State<SharedState>,
    Query(spec): Query<FilterSpec>,
) -> Result<Json<Value>, StatusCode> {
    let app = state.app.lock().await;
    Ok(Json(to_json(app.listing(&spec))?))
}

#[derive(Debug, Deserialize)]
struct RouteQuery {
    path: String,
}

/// GET /api/route?path= - where the UI should go for a requested path.
async fn resolve(
    State(state): State<SharedState>,
    Query(query): Query<RouteQuery>,
) -> Json<RouteDecision> {
    let app = state.app.lock().await;
    Json(app.route(&query.path))
}

fn to_json<T: Serialize>(value: T) -> Result<Value, StatusCode> {
    serde_json::to_value(value).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}
