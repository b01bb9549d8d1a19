use axum::{
	Json, Router,
	extract::{
		Path, Query, State,
		rejection::{JsonRejection, PathRejection, QueryRejection},
	},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use vintager_domain::{Facets, FilterCriteria};
use vintager_service::{
	Error, ListResponse, MutationReceipt, StateView, TagOption, WineDetail, WineDraft,
};

#[derive(Debug, Deserialize)]
pub struct TagOptionsQuery {
	#[serde(default)]
	pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
	pub admin: bool,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}

	fn invalid(message: impl Into<String>) -> Self {
		Self::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message)
	}
}

impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		let message = err.to_string();

		match err {
			Error::InvalidRequest { .. } => Self::invalid(message),
			Error::AdminRequired { .. } =>
				Self::new(StatusCode::FORBIDDEN, "ADMIN_REQUIRED", message),
			Error::NotFound { .. } => Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message),
			Error::NotReady =>
				Self::new(StatusCode::SERVICE_UNAVAILABLE, "CATALOG_NOT_READY", message),
			Error::LoadFailed { .. } =>
				Self::new(StatusCode::SERVICE_UNAVAILABLE, "CATALOG_LOAD_FAILED", message),
			Error::Store { .. } => {
				tracing::error!(error = %message, "Store request failed.");

				Self::new(StatusCode::BAD_GATEWAY, "STORE_ERROR", message)
			},
			Error::Session { .. } => {
				tracing::error!(error = %message, "Session store failed.");

				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "SESSION_ERROR", message)
			},
		}
	}
}

impl From<JsonRejection> for ApiError {
	fn from(rejection: JsonRejection) -> Self {
		Self::invalid(rejection.body_text())
	}
}

impl From<PathRejection> for ApiError {
	fn from(rejection: PathRejection) -> Self {
		Self::invalid(rejection.body_text())
	}
}

impl From<QueryRejection> for ApiError {
	fn from(rejection: QueryRejection) -> Self {
		Self::invalid(rejection.body_text())
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/catalog/state", get(catalog_state))
		.route("/v1/catalog/reload", post(catalog_reload))
		.route("/v1/wines", get(wines_list).post(wines_create))
		.route("/v1/wines/query", post(wines_query))
		.route("/v1/wines/facets", get(wines_facets))
		.route("/v1/wines/{id}", get(wines_detail).put(wines_update).delete(wines_delete))
		.route("/v1/tags/options", get(tag_options))
		.route("/v1/session", get(session_get))
		.route("/v1/session/login", post(session_login))
		.route("/v1/session/logout", post(session_logout))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn catalog_state(State(state): State<AppState>) -> Json<StateView> {
	Json(state.service.state_view())
}

async fn catalog_reload(State(state): State<AppState>) -> Json<StateView> {
	let outcome = state.service.load().await;
	tracing::debug!(?outcome, "Catalog reload finished.");

	Json(state.service.state_view())
}

async fn wines_list(State(state): State<AppState>) -> Result<Json<ListResponse>, ApiError> {
	Ok(Json(state.service.list(FilterCriteria::default())?))
}

async fn wines_query(
	State(state): State<AppState>,
	payload: Result<Json<FilterCriteria>, JsonRejection>,
) -> Result<Json<ListResponse>, ApiError> {
	let Json(criteria) = payload?;

	Ok(Json(state.service.list(criteria)?))
}

async fn wines_facets(State(state): State<AppState>) -> Result<Json<Facets>, ApiError> {
	Ok(Json(state.service.facets()?))
}

async fn wines_detail(
	State(state): State<AppState>,
	id: Result<Path<i64>, PathRejection>,
) -> Result<Json<WineDetail>, ApiError> {
	let Path(id) = id?;

	Ok(Json(state.service.detail(id).await?))
}

async fn wines_create(
	State(state): State<AppState>,
	payload: Result<Json<WineDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<MutationReceipt>), ApiError> {
	let Json(draft) = payload?;

	Ok((StatusCode::ACCEPTED, Json(state.service.create(draft)?)))
}

async fn wines_update(
	State(state): State<AppState>,
	id: Result<Path<i64>, PathRejection>,
	payload: Result<Json<WineDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<MutationReceipt>), ApiError> {
	let Path(id) = id?;
	let Json(draft) = payload?;

	Ok((StatusCode::ACCEPTED, Json(state.service.update(id, draft)?)))
}

async fn wines_delete(
	State(state): State<AppState>,
	id: Result<Path<i64>, PathRejection>,
) -> Result<(StatusCode, Json<MutationReceipt>), ApiError> {
	let Path(id) = id?;

	Ok((StatusCode::ACCEPTED, Json(state.service.delete(id)?)))
}

async fn tag_options(
	State(state): State<AppState>,
	query: Result<Query<TagOptionsQuery>, QueryRejection>,
) -> Result<Json<Vec<TagOption>>, ApiError> {
	let Query(query) = query?;

	Ok(Json(state.service.tag_options(&query.q)?))
}

async fn session_get(State(state): State<AppState>) -> Json<SessionView> {
	Json(SessionView { admin: state.service.session.is_admin() })
}

async fn session_login(State(state): State<AppState>) -> Result<Json<SessionView>, ApiError> {
	state.service.session.login()?;

	Ok(Json(SessionView { admin: true }))
}

async fn session_logout(State(state): State<AppState>) -> Result<Json<SessionView>, ApiError> {
	state.service.session.logout()?;

	Ok(Json(SessionView { admin: false }))
}
