use axum::{Json, Router, extract::{Path, State}, http::{StatusCode, header}, response::{IntoResponse, Response}, routing::{get, post}};
use include_dir::{include_dir, Dir};
use parking_lot::RwLock;
use serde_json::json;
use std::{sync::Arc, time::Instant};
use tower_http::cors::{CorsLayer, Any};

use crate::{gemini::ContentGenerator, models::ProductDetails, render::Block, state::{submit, FormState, Outcome, SubmitRejected, GENERATION_FAILED_MESSAGE, VALIDATION_MESSAGE}};

static WEB: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/web");

#[derive(Clone)]
pub struct AppState {
    pub form: Arc<RwLock<FormState>>,
    pub generator: Arc<dyn ContentGenerator>,
}

impl AppState {
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        Self { form: Arc::default(), generator }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/assets/*path", get(asset))
        .route("/api/form", get(get_form))
        .route("/api/generate", post(generate))
        .route("/api/copy/:block", post(copy_block))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

fn content_type(path: &str) -> &'static str {
    match path.rsplit('.').next() {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

fn serve_embedded(path: &str) -> Response {
    match WEB.get_file(path) {
        Some(file) => ([(header::CONTENT_TYPE, content_type(path))], file.contents()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub async fn index() -> Response {
    serve_embedded("index.html")
}

pub async fn asset(Path(path): Path<String>) -> Response {
    serve_embedded(&path)
}

pub async fn get_form(State(state): State<AppState>) -> Response {
    let form = state.form.read();
    Json(form.view(Instant::now())).into_response()
}

pub async fn generate(State(state): State<AppState>, Json(body): Json<ProductDetails>) -> Response {
    match submit(Arc::clone(&state.form), Arc::clone(&state.generator), body).await {
        Ok(Outcome::Generated) => {
            let form = state.form.read();
            Json(form.view(Instant::now())).into_response()
        }
        Ok(Outcome::Failed) => json_error(StatusCode::BAD_GATEWAY, "generation_failed", GENERATION_FAILED_MESSAGE),
        Err(SubmitRejected::Invalid) => json_error(StatusCode::BAD_REQUEST, "validation_error", VALIDATION_MESSAGE),
        Err(SubmitRejected::Busy) => json_error(StatusCode::CONFLICT, "busy", SubmitRejected::Busy.to_string()),
    }
}

pub async fn copy_block(Path(key): Path<String>, State(state): State<AppState>) -> Response {
    let Some(block) = Block::from_key(&key) else {
        return json_error(StatusCode::NOT_FOUND, "unknown_block", format!("no block named {key}"));
    };
    let copied = state.form.write().mark_copied(block, Instant::now());
    match copied {
        Some(text) => {
            tracing::info!("📋 Copied block '{}' ({} chars)", block.key(), text.chars().count());
            Json(json!({ "block": block.key(), "text": text })).into_response()
        }
        None => json_error(StatusCode::NOT_FOUND, "no_content", "nothing to copy yet"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::GenerationFailed;
    use crate::models::MarketingContent;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    struct AlwaysFails;

    #[async_trait]
    impl ContentGenerator for AlwaysFails {
        async fn generate(&self, _details: &ProductDetails) -> Result<MarketingContent, GenerationFailed> {
            Err(GenerationFailed)
        }
    }

    async fn call(app: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null))
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn index_is_served() {
        let app = build_app(AppState::new(Arc::new(AlwaysFails)));
        let res = app.oneshot(Request::get("/").body(Body::empty()).unwrap()).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()[header::CONTENT_TYPE], "text/html; charset=utf-8");
    }

    #[tokio::test]
    async fn unknown_asset_is_not_found() {
        let app = build_app(AppState::new(Arc::new(AlwaysFails)));
        let res = app.oneshot(Request::get("/assets/missing.js").body(Body::empty()).unwrap()).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn generation_failure_is_generic() {
        let state = AppState::new(Arc::new(AlwaysFails));
        let app = build_app(state.clone());
        let (status, body) = call(app, post_json("/api/generate", json!({"productName": "ساعة", "category": "إلكترونيات"}))).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, json!({"error": "generation_failed", "message": GENERATION_FAILED_MESSAGE}));
        assert_eq!(state.form.read().content(), None);
    }

    #[tokio::test]
    async fn copy_requires_content_and_known_block() {
        let app = build_app(AppState::new(Arc::new(AlwaysFails)));
        let (status, body) = call(app.clone(), post_json("/api/copy/hashtags", json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "no_content");
        let (status, body) = call(app, post_json("/api/copy/price", json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "unknown_block");
    }
}
