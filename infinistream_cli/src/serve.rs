//! Webhook listener: `POST /shower-update` in, redraws out.
//!
//! Requests are served on a current-thread runtime and the ingress sits
//! behind a mutex, so validation, the state swap and the display
//! notification happen as one step per request.

use crate::error_fmt::CliError;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use eyre::WrapErr;
use infinistream_core::{
    Display, DisplaySink, DisplayTree, Ingress, Presenter, RenderCfg, StateReader, display_channel,
    new_state, render,
};
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex, PoisonError};

pub const UPDATE_PATH: &str = "/shower-update";
pub const STATE_PATH: &str = "/shower-state";

pub struct AppState<S: DisplaySink> {
    ingress: Arc<Mutex<Ingress<S>>>,
    reader: StateReader,
    render_cfg: Arc<RenderCfg>,
}

impl<S: DisplaySink> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            ingress: self.ingress.clone(),
            reader: self.reader.clone(),
            render_cfg: self.render_cfg.clone(),
        }
    }
}

impl<S: DisplaySink> AppState<S> {
    pub fn new(ingress: Ingress<S>, render_cfg: RenderCfg) -> Self {
        let reader = ingress.reader();
        Self {
            ingress: Arc::new(Mutex::new(ingress)),
            reader,
            render_cfg: Arc::new(render_cfg),
        }
    }
}

pub fn router<S: DisplaySink + Send + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route(UPDATE_PATH, post(update_handler::<S>))
        .route(STATE_PATH, get(state_handler::<S>))
        .with_state(state)
}

// Raw bytes rather than the Json extractor: every bad body must be a 400,
// including a missing content type.
async fn update_handler<S: DisplaySink + Send + 'static>(
    State(app): State<AppState<S>>,
    body: Bytes,
) -> StatusCode {
    tracing::debug!(body = %String::from_utf8_lossy(&body), "got shower update webhook");
    let mut ingress = app.ingress.lock().unwrap_or_else(PoisonError::into_inner);
    match ingress.receive_update(&body) {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::BAD_REQUEST,
    }
}

async fn state_handler<S: DisplaySink + Send + 'static>(
    State(app): State<AppState<S>>,
) -> Json<DisplayTree> {
    Json(render(&app.reader.snapshot(), &app.render_cfg))
}

pub struct ServeOpts {
    pub bind: String,
    pub port: u16,
}

/// Run until Ctrl-C. Announces the start-up state before accepting requests.
pub fn run_serve<P: Presenter + Send + 'static>(
    opts: ServeOpts,
    render_cfg: RenderCfg,
    presenter: P,
) -> eyre::Result<()> {
    let ip: IpAddr = opts
        .bind
        .parse()
        .map_err(|_| CliError::Config(format!("bind address {:?} is not an IP", opts.bind)))?;
    let addr = SocketAddr::new(ip, opts.port);

    let (sink, rx) = display_channel();
    let display = Display::spawn(rx, render_cfg.clone(), presenter);
    let (writer, _reader) = new_state();
    let ingress = Ingress::new(writer, sink);
    ingress.announce();
    let app = router(AppState::new(ingress, render_cfg));

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let shutdown_tx = Mutex::new(Some(shutdown_tx));
    ctrlc::set_handler(move || {
        let tx = shutdown_tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(tx) = tx {
            let _ = tx.send(());
        }
    })
    .wrap_err("install Ctrl-C handler")?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("start tokio runtime")?;

    runtime.block_on(async move {
        let listener =
            tokio::net::TcpListener::bind(addr)
                .await
                .map_err(|e| CliError::Bind {
                    addr,
                    reason: e.to_string(),
                })?;
        tracing::info!(%addr, path = UPDATE_PATH, "webhook listening");
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
                tracing::info!("shutdown requested");
            })
            .await
            .wrap_err("webhook server failed")?;
        Ok::<(), eyre::Report>(())
    })?;

    // The router (and with it the last sender) is gone; drain and join.
    let _ = display.finish();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, header};
    use infinistream_core::mocks::RecordingSink;
    use infinistream_core::{OperatingMode, ReportedMode, WidgetState};
    use tower::ServiceExt;

    fn app() -> (Router, RecordingSink, StateReader) {
        let (writer, reader) = new_state();
        let sink = RecordingSink::default();
        let ingress = Ingress::new(writer, sink.clone());
        (
            router(AppState::new(ingress, RenderCfg::default())),
            sink,
            reader,
        )
    }

    fn post_json(body: &'static str) -> Request<Body> {
        Request::post(UPDATE_PATH)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_bytes(res: axum::response::Response) -> Bytes {
        axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap()
    }

    #[tokio::test]
    async fn valid_update_is_200_with_empty_body() {
        let (app, sink, reader) = app();
        let res = app
            .oneshot(post_json(r#"{"mode":"SHOWER","turbidity":60}"#))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(body_bytes(res).await.is_empty());
        assert_eq!(
            reader.snapshot(),
            WidgetState::new(OperatingMode::Shower, 60.0)
        );
        assert_eq!(sink.notifications().len(), 1);
    }

    #[tokio::test]
    async fn missing_turbidity_is_400_and_state_unchanged() {
        let (app, sink, reader) = app();
        let res = app
            .oneshot(post_json(r#"{"mode":"SHOWER"}"#))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(body_bytes(res).await.is_empty());
        assert_eq!(reader.snapshot(), WidgetState::default());
        assert!(sink.notifications().is_empty());
    }

    #[tokio::test]
    async fn body_without_content_type_is_still_parsed() {
        let (app, _sink, reader) = app();
        let req = Request::post(UPDATE_PATH)
            .body(Body::from(r#"{"mode":"FLUSH","turbidity":2}"#))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(reader.snapshot().mode, ReportedMode::Known(OperatingMode::Flush));
    }

    #[tokio::test]
    async fn garbage_body_is_400() {
        let (app, _sink, _reader) = app();
        let res = app.oneshot(post_json("not json")).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_on_update_path_is_not_allowed() {
        let (app, _sink, _reader) = app();
        let req = Request::get(UPDATE_PATH).body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn state_endpoint_reflects_last_update() {
        let (app, _sink, _reader) = app();
        let res = app
            .clone()
            .oneshot(post_json(r#"{"mode":"SANITIZE","turbidity":100}"#))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let req = Request::get(STATE_PATH).body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let tree: serde_json::Value = serde_json::from_slice(&body_bytes(res).await).unwrap();
        assert_eq!(tree["mode"], "SANITIZE");
        assert_eq!(tree["turbidity_icon"], "smog");
        let visible: Vec<&str> = tree["visible"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert!(visible.contains(&"arrow-tank-uv"));
        assert!(visible.contains(&"arrow-uv-tank-up"));
        assert!(!visible.contains(&"arrow-tank-heater"));
    }
}
