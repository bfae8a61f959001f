use std::{convert::Infallible, net::SocketAddr, sync::Arc};

use axum::{
    extract::{
        multipart::MultipartError, rejection::JsonRejection, DefaultBodyLimit, Multipart, Path,
        Query, State,
    },
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use planner_api::{
    catalog::Catalog, conversation::PlaceholderResponder, transcript::IncomingTranscript,
    ApiContext,
};
use serde::Deserialize;
use shared::{
    domain::SessionId,
    error::{ApiError, ErrorCode},
    protocol::{
        FeedbackAck, FeedbackRequest, MajorsResponse, ProfileUpdate, SendMessageRequest,
        SessionView, SpecializationsResponse,
    },
};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod app_state;
mod config;

use app_state::AppState;
use config::{load_credentials, load_settings, Settings};

const TRANSCRIPT_FIELD: &str = "transcript";
// Room for multipart boundaries and headers around the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

#[derive(Debug, Deserialize)]
struct MajorsQuery {
    school: String,
}

#[derive(Debug, Deserialize)]
struct SpecializationsQuery {
    school: String,
    major: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings();
    let credentials = load_credentials(&settings.credentials_path).map_err(|error| {
        error!(
            path = %settings.credentials_path.display(),
            %error,
            "cannot start without the model credentials file"
        );
        error
    })?;
    // Exported before the runtime spawns any worker threads.
    credentials.export(&settings.credentials_env_var);

    let catalog = Catalog::ucr();
    catalog.validate()?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(serve(settings, catalog))
}

async fn serve(settings: Settings, catalog: Catalog) -> anyhow::Result<()> {
    info!(
        env_var = %settings.credentials_env_var,
        temperature = settings.model_temperature,
        "model client configured with placeholder responder"
    );
    let api = ApiContext::new(
        catalog,
        Arc::new(PlaceholderResponder),
        settings.max_transcript_bytes,
    );
    let app = build_router(Arc::new(AppState { api }));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let upload_limit = usize::try_from(state.api.max_transcript_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    let transcript_route = post(http_upload_transcript)
        .layer::<_, Infallible>(DefaultBodyLimit::disable())
        .layer::<_, Infallible>(RequestBodyLimitLayer::new(upload_limit));

    Router::new()
        .route("/healthz", get(healthz))
        .route("/catalog/schools", get(http_list_schools))
        .route("/catalog/majors", get(http_list_majors))
        .route("/catalog/specializations", get(http_list_specializations))
        .route("/sessions", post(http_create_session))
        .route(
            "/sessions/:session_id",
            get(http_get_session).delete(http_end_session),
        )
        .route("/sessions/:session_id/profile", patch(http_update_profile))
        .route("/sessions/:session_id/transcript", transcript_route)
        .route("/sessions/:session_id/messages", post(http_send_message))
        .route("/sessions/:session_id/feedback", post(http_submit_feedback))
        .with_state(state)
}

fn reject(err: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = match err.code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(err))
}

/// Turns body decoding failures into the usual error envelope instead of
/// axum's plain-text rejection.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|e| reject(ApiError::validation(e.body_text())))
}

fn multipart_error(err: MultipartError, context: &str) -> ApiError {
    let code = if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ErrorCode::PayloadTooLarge
    } else {
        ErrorCode::Validation
    };
    ApiError::new(code, format!("{context}: {}", err.body_text()))
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_list_schools(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(planner_api::list_schools(&state.api))
}

async fn http_list_majors(
    State(state): State<Arc<AppState>>,
    Query(q): Query<MajorsQuery>,
) -> ApiResult<Json<MajorsResponse>> {
    planner_api::list_majors(&state.api, &q.school)
        .map(Json)
        .map_err(reject)
}

async fn http_list_specializations(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SpecializationsQuery>,
) -> ApiResult<Json<SpecializationsResponse>> {
    planner_api::list_specializations(&state.api, &q.school, &q.major)
        .map(Json)
        .map_err(reject)
}

async fn http_create_session(
    State(state): State<Arc<AppState>>,
) -> ApiResult<(StatusCode, Json<SessionView>)> {
    let view = planner_api::create_session(&state.api)
        .await
        .map_err(reject)?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn http_get_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Json<SessionView>> {
    planner_api::get_session(&state.api, SessionId(session_id))
        .await
        .map(Json)
        .map_err(reject)
}

async fn http_end_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    planner_api::end_session(&state.api, SessionId(session_id))
        .await
        .map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn http_update_profile(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    payload: Result<Json<ProfileUpdate>, JsonRejection>,
) -> ApiResult<Json<SessionView>> {
    let update = json_body(payload)?;
    planner_api::update_profile(&state.api, SessionId(session_id), update)
        .await
        .map(Json)
        .map_err(reject)
}

async fn http_upload_transcript(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    mut multipart: Multipart,
) -> ApiResult<Json<SessionView>> {
    let max_bytes = state.api.max_transcript_bytes;
    let mut incoming = None;
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| reject(multipart_error(e, "invalid multipart body")))?
    {
        if field.name() != Some(TRANSCRIPT_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        // The bytes are counted and dropped; the transcript is never parsed.
        let mut size_bytes = 0u64;
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| reject(multipart_error(e, "failed to read transcript")))?
        {
            size_bytes += chunk.len() as u64;
            if size_bytes > max_bytes {
                return Err(reject(ApiError::new(
                    ErrorCode::PayloadTooLarge,
                    format!("transcript exceeds {max_bytes} bytes"),
                )));
            }
        }
        incoming = Some(IncomingTranscript {
            filename,
            content_type,
            size_bytes,
        });
        break;
    }

    let incoming = incoming.ok_or_else(|| {
        reject(ApiError::validation(format!(
            "multipart field '{TRANSCRIPT_FIELD}' is required"
        )))
    })?;
    planner_api::upload_transcript(&state.api, SessionId(session_id), incoming)
        .await
        .map(Json)
        .map_err(reject)
}

async fn http_send_message(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> ApiResult<Json<SessionView>> {
    let req = json_body(payload)?;
    planner_api::send_chat_message(&state.api, SessionId(session_id), &req.text)
        .await
        .map(Json)
        .map_err(reject)
}

async fn http_submit_feedback(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> ApiResult<Json<FeedbackAck>> {
    let req = json_body(payload)?;
    planner_api::submit_feedback(&state.api, SessionId(session_id), &req.text)
        .await
        .map(Json)
        .map_err(reject)
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
