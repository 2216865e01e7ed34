//! Axum route handlers: liveness, webhook sink, and the RPC API used by
//! transport peers and admins.

use crate::commands;
use crate::context::AppContext;
use crate::error::{MedimateError, STORAGE_APOLOGY};
use crate::ingest;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use medimate_types::*;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

pub struct AppState {
    pub ctx: Arc<AppContext>,
    pub start_time: Instant,
    pub last_ingest: Mutex<Option<(String, IngestReport)>>,
}

impl AppState {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self {
            ctx,
            start_time: Instant::now(),
            last_ingest: Mutex::new(None),
        }
    }

    pub async fn record_ingest(&self, report: IngestReport) {
        let now = chrono::Utc::now().to_rfc3339();
        *self.last_ingest.lock().await = Some((now, report));
    }
}

pub fn router(state: Arc<AppState>) -> axum::Router {
    axum::Router::new()
        .route("/", axum::routing::get(home))
        .route("/webhook", axum::routing::post(webhook))
        .route("/rpc/command", axum::routing::post(command))
        .route("/rpc/notes/add", axum::routing::post(add_note))
        .route("/rpc/notes/list", axum::routing::get(list_notes))
        .route("/rpc/ingest", axum::routing::post(ingest_now))
        .route("/rpc/status", axum::routing::get(status))
        .with_state(state)
        .layer(tower_http::cors::CorsLayer::permissive())
}

/// Error text for RPC callers. Store failures are logged, never echoed.
fn rpc_error(e: &MedimateError) -> String {
    match e {
        MedimateError::Storage(_) => STORAGE_APOLOGY.to_string(),
        other => other.to_string(),
    }
}

// GET /
pub async fn home() -> &'static str {
    "MediMateAI is running!"
}

// POST /webhook
pub async fn webhook(body: String) -> (StatusCode, &'static str) {
    log::info!("[HTTP] Webhook payload: {}", body);
    (StatusCode::OK, "OK")
}

// POST /rpc/command
pub async fn command(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CommandRequest>,
) -> (StatusCode, Json<RpcResponse<CommandReply>>) {
    let ctx = state.ctx.clone();
    match tokio::task::spawn_blocking(move || commands::handle(&ctx, &req.text)).await {
        Ok(reply) => (StatusCode::OK, Json(RpcResponse::ok(CommandReply { reply }))),
        Err(e) => {
            log::error!("[HTTP] Command task failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RpcResponse::err(STORAGE_APOLOGY)),
            )
        }
    }
}

// POST /rpc/notes/add
pub async fn add_note(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddNoteRequest>,
) -> (StatusCode, Json<RpcResponse<MedicalNote>>) {
    if req.topic.trim().is_empty() || req.content.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(RpcResponse::err("topic and content are required")),
        );
    }

    let ctx = state.ctx.clone();
    let result = tokio::task::spawn_blocking(move || {
        ctx.db.insert_note(req.topic.trim(), req.content.trim())
    })
    .await
    .unwrap_or_else(|e| Err(MedimateError::Storage(format!("Insert task failed: {}", e))));

    match result {
        Ok(note) => (StatusCode::OK, Json(RpcResponse::ok(note))),
        Err(e) => {
            log::error!("[HTTP] Failed to add note: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(RpcResponse::err(rpc_error(&e))))
        }
    }
}

// GET /rpc/notes/list
pub async fn list_notes(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RpcResponse<Vec<MedicalNote>>>) {
    let db = state.ctx.db.clone();
    let result = tokio::task::spawn_blocking(move || db.list_notes())
        .await
        .unwrap_or_else(|e| Err(MedimateError::Storage(format!("List task failed: {}", e))));

    match result {
        Ok(notes) => (StatusCode::OK, Json(RpcResponse::ok(notes))),
        Err(e) => {
            log::error!("[HTTP] Failed to list notes: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(RpcResponse::err(rpc_error(&e))))
        }
    }
}

// POST /rpc/ingest
pub async fn ingest_now(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RpcResponse<IngestReport>>) {
    if state.ctx.config.feed.url.is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(RpcResponse::err("No feed URL configured")),
        );
    }

    match ingest::run_feed_pass(state.ctx.clone()).await {
        Ok(report) => {
            state.record_ingest(report).await;
            (StatusCode::OK, Json(RpcResponse::ok(report)))
        }
        Err(e @ MedimateError::Storage(_)) => {
            log::error!("[INGEST] Pass failed writing to the store: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(RpcResponse::err(rpc_error(&e))))
        }
        Err(e) => {
            log::warn!("[INGEST] Pass failed: {}", e);
            (StatusCode::BAD_GATEWAY, Json(RpcResponse::err(rpc_error(&e))))
        }
    }
}

// GET /rpc/status
pub async fn status(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RpcResponse<ServiceStatus>>) {
    let db = state.ctx.db.clone();
    let counts = tokio::task::spawn_blocking(move || -> Result<(i64, i64), MedimateError> {
        Ok((db.medication_count()?, db.note_count()?))
    })
    .await
    .unwrap_or_else(|e| Err(MedimateError::Storage(format!("Status task failed: {}", e))));

    let (medication_count, note_count) = match counts {
        Ok(counts) => counts,
        Err(e) => {
            log::error!("[HTTP] Status check could not read the store: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RpcResponse::err(rpc_error(&e))),
            );
        }
    };
    let last = state.last_ingest.lock().await.clone();

    (
        StatusCode::OK,
        Json(RpcResponse::ok(ServiceStatus {
            running: true,
            uptime_secs: state.start_time.elapsed().as_secs(),
            medication_count,
            note_count,
            implicit_search_enabled: state.ctx.config.implicit_search_enabled,
            feed_configured: state.ctx.config.feed.url.is_some(),
            bot_token_configured: state.ctx.config.bot_token.is_some(),
            last_ingest_at: last.as_ref().map(|(at, _)| at.clone()),
            last_ingest: last.map(|(_, report)| report),
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::seed;

    async fn spawn_app(config: Config) -> (String, Arc<AppState>) {
        let ctx = Arc::new(AppContext::in_memory(config));
        seed::seed_if_empty(&ctx.db).unwrap();
        let state = Arc::new(AppState::new(ctx));
        let app = router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}", addr), state)
    }

    #[tokio::test]
    async fn test_liveness_and_webhook() {
        let (base, _) = spawn_app(Config::default()).await;
        let client = reqwest::Client::new();

        let home = client.get(&base).send().await.unwrap();
        assert_eq!(home.status(), reqwest::StatusCode::OK);
        assert_eq!(home.text().await.unwrap(), "MediMateAI is running!");

        let hook = client
            .post(format!("{}/webhook", base))
            .body("{\"update_id\": 1}")
            .send()
            .await
            .unwrap();
        assert_eq!(hook.status(), reqwest::StatusCode::OK);
        assert_eq!(hook.text().await.unwrap(), "OK");
    }

    #[tokio::test]
    async fn test_command_rpc() {
        let (base, _) = spawn_app(Config::default()).await;
        let resp: serde_json::Value = reqwest::Client::new()
            .post(format!("{}/rpc/command", base))
            .json(&CommandRequest {
                text: "/search Zzznotadrug".to_string(),
            })
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(resp["success"], true);
        assert_eq!(resp["data"]["reply"], "No information found for Zzznotadrug.");
    }

    #[tokio::test]
    async fn test_add_note_then_status() {
        let (base, _) = spawn_app(Config::default()).await;
        let client = reqwest::Client::new();

        let added = client
            .post(format!("{}/rpc/notes/add", base))
            .json(&AddNoteRequest {
                topic: "gout".to_string(),
                content: "Limit purine intake.".to_string(),
            })
            .send()
            .await
            .unwrap();
        assert_eq!(added.status(), reqwest::StatusCode::OK);

        let rejected = client
            .post(format!("{}/rpc/notes/add", base))
            .json(&AddNoteRequest {
                topic: " ".to_string(),
                content: "x".to_string(),
            })
            .send()
            .await
            .unwrap();
        assert_eq!(rejected.status(), reqwest::StatusCode::BAD_REQUEST);

        let status: serde_json::Value = client
            .get(format!("{}/rpc/status", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(status["data"]["medication_count"], 4);
        assert_eq!(status["data"]["note_count"], 4);
        assert_eq!(status["data"]["feed_configured"], false);
        assert_eq!(status["data"]["bot_token_configured"], false);
    }

    fn drop_tables(state: &AppState) {
        state
            .ctx
            .db
            .conn()
            .unwrap()
            .execute_batch("DROP TABLE medications; DROP TABLE medical_notes;")
            .unwrap();
    }

    #[tokio::test]
    async fn test_status_reports_broken_store() {
        let (base, state) = spawn_app(Config::default()).await;
        drop_tables(&state);

        let resp = reqwest::Client::new()
            .get(format!("{}/rpc/status", base))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], STORAGE_APOLOGY);
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn test_store_errors_are_not_echoed() {
        let (base, state) = spawn_app(Config::default()).await;
        drop_tables(&state);
        let client = reqwest::Client::new();

        let added = client
            .post(format!("{}/rpc/notes/add", base))
            .json(&AddNoteRequest {
                topic: "gout".to_string(),
                content: "Limit purine intake.".to_string(),
            })
            .send()
            .await
            .unwrap();
        assert_eq!(added.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = added.json().await.unwrap();
        assert_eq!(body["error"], STORAGE_APOLOGY);
        assert!(!body.to_string().contains("no such table"));

        let listed: serde_json::Value = client
            .get(format!("{}/rpc/notes/list", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(listed["error"], STORAGE_APOLOGY);
    }

    #[test]
    fn test_rpc_error_hides_storage_detail() {
        let storage = MedimateError::Storage("no such table: medications".to_string());
        assert_eq!(rpc_error(&storage), STORAGE_APOLOGY);

        let feed = MedimateError::Ingestion("Feed returned 503".to_string());
        assert_eq!(rpc_error(&feed), "Ingestion error: Feed returned 503");
    }

    #[tokio::test]
    async fn test_list_notes() {
        let (base, _) = spawn_app(Config::default()).await;
        let listed: serde_json::Value = reqwest::Client::new()
            .get(format!("{}/rpc/notes/list", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(listed["success"], true);
        assert_eq!(listed["data"].as_array().unwrap().len(), 3);
        assert_eq!(listed["data"][0]["topic"], "hypertension");
    }

    #[tokio::test]
    async fn test_ingest_without_feed() {
        let (base, state) = spawn_app(Config::default()).await;
        let resp = reqwest::Client::new()
            .post(format!("{}/rpc/ingest", base))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
        assert!(state.last_ingest.lock().await.is_none());
    }
}
