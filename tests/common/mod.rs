#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use payrelay::prelude::*;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub fn amount(units: i64) -> Amount {
    Amount::from_units(units).unwrap()
}

pub fn request(id: &str, units: i64) -> PaymentRequest {
    PaymentRequest::new(id, amount(units)).unwrap()
}

/// In-memory gateway whose answers are scripted per processor
///
/// Each processor refuses its next `n` calls, then accepts. `u32::MAX`
/// means it refuses forever.
#[derive(Default)]
pub struct ScriptedGateway {
    default_refusals: AtomicU32,
    fallback_refusals: AtomicU32,
    calls: Mutex<Vec<(Processor, String)>>,
}

impl ScriptedGateway {
    pub fn accepting() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn refusing(default: u32, fallback: u32) -> Arc<Self> {
        let gateway = Self::default();
        gateway.default_refusals.store(default, Ordering::SeqCst);
        gateway.fallback_refusals.store(fallback, Ordering::SeqCst);
        Arc::new(gateway)
    }

    pub fn calls(&self) -> Vec<(Processor, String)> {
        self.calls.lock().unwrap().clone()
    }

    fn counter(&self, processor: Processor) -> &AtomicU32 {
        match processor {
            Processor::Default => &self.default_refusals,
            Processor::Fallback => &self.fallback_refusals,
        }
    }
}

#[async_trait]
impl ProcessorGateway for ScriptedGateway {
    async fn send(
        &self,
        processor: Processor,
        record: &DispatchRecord,
        _timeout: Duration,
    ) -> Result<(), GatewayError> {
        self.calls
            .lock()
            .unwrap()
            .push((processor, record.correlation_id().to_string()));

        let refused = self
            .counter(processor)
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| match left {
                0 => None,
                u32::MAX => Some(u32::MAX),
                n => Some(n - 1),
            })
            .is_ok();

        if refused {
            Err(GatewayError::Status {
                processor,
                status: 500,
            })
        } else {
            Ok(())
        }
    }
}

/// Gateway that never answers, holding its worker until aborted
pub struct HangingGateway;

#[async_trait]
impl ProcessorGateway for HangingGateway {
    async fn send(
        &self,
        _processor: Processor,
        _record: &DispatchRecord,
        _timeout: Duration,
    ) -> Result<(), GatewayError> {
        std::future::pending().await
    }
}

#[derive(Clone)]
struct StubState {
    status: Arc<AtomicU16>,
    received: Arc<Mutex<Vec<Value>>>,
}

async fn handle_payment(State(state): State<StubState>, Json(body): Json<Value>) -> StatusCode {
    state.received.lock().unwrap().push(body);
    StatusCode::from_u16(state.status.load(Ordering::SeqCst)).unwrap()
}

/// Payment processor stand-in serving `POST /payments` on 127.0.0.1
pub struct StubProcessor {
    pub base_url: String,
    status: Arc<AtomicU16>,
    received: Arc<Mutex<Vec<Value>>>,
    shutdown: Option<oneshot::Sender<()>>,
    join: Option<JoinHandle<()>>,
}

impl StubProcessor {
    pub async fn start(status: u16) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let state = StubState {
            status: Arc::new(AtomicU16::new(status)),
            received: Arc::new(Mutex::new(Vec::new())),
        };
        let app = Router::new()
            .route("/payments", post(handle_payment))
            .with_state(state.clone());

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let join = tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Self {
            base_url: format!("http://{addr}"),
            status: state.status,
            received: state.received,
            shutdown: Some(shutdown_tx),
            join: Some(join),
        }
    }

    pub fn set_status(&self, status: u16) {
        self.status.store(status, Ordering::SeqCst);
    }

    pub fn received(&self) -> Vec<Value> {
        self.received.lock().unwrap().clone()
    }

    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.await;
        }
    }
}

/// The full service listening on an ephemeral port
pub struct TestService {
    pub base_url: String,
    pub client: reqwest::Client,
    shutdown: Option<oneshot::Sender<()>>,
    join: JoinHandle<Result<StatsSnapshot, AppError>>,
}

impl TestService {
    pub fn config(default: &StubProcessor, fallback: &StubProcessor) -> AppConfig {
        AppConfig {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            default_url: default.base_url.clone(),
            fallback_url: fallback.base_url.clone(),
            queue_capacity: 1_000,
            worker_count: 4,
            processor_timeout: Duration::from_secs(2),
            shutdown_grace: Duration::from_millis(500),
            ..AppConfig::default()
        }
    }

    /// Serve with the reqwest gateway
    pub async fn start(config: AppConfig) -> Self {
        Self::spawn(config, |app, listener, signal| {
            tokio::spawn(app.serve(listener, signal))
        })
        .await
    }

    /// Serve with an in-memory gateway
    pub async fn start_with_gateway<G>(config: AppConfig, gateway: G) -> Self
    where
        G: ProcessorGateway + 'static,
    {
        Self::spawn(config, move |app, listener, signal| {
            tokio::spawn(app.serve_with_gateway(listener, gateway, signal))
        })
        .await
    }

    async fn spawn<F>(config: AppConfig, launch: F) -> Self
    where
        F: FnOnce(
            ServerApp,
            TcpListener,
            futures::future::BoxFuture<'static, ()>,
        ) -> JoinHandle<Result<StatsSnapshot, AppError>>,
    {
        let listener = TcpListener::bind(config.bind_addr).await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let signal: futures::future::BoxFuture<'static, ()> = Box::pin(async move {
            let _ = shutdown_rx.await;
        });

        let join = launch(ServerApp::new(config), listener, signal);

        Self {
            base_url: format!("http://{addr}"),
            client: reqwest::Client::new(),
            shutdown: Some(shutdown_tx),
            join,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn submit(&self, body: Value) -> reqwest::StatusCode {
        self.client
            .post(self.url("/payments"))
            .json(&body)
            .send()
            .await
            .unwrap()
            .status()
    }

    pub async fn summary(&self, query: &str) -> (reqwest::StatusCode, Value) {
        let resp = self
            .client
            .get(self.url(&format!("/payments-summary{query}")))
            .send()
            .await
            .unwrap();
        let status = resp.status();
        let text = resp.text().await.unwrap();
        (status, serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }

    /// Poll the open-window summary until `done` holds, for up to 5s
    pub async fn wait_for_summary<P>(&self, done: P) -> Value
    where
        P: Fn(&Value) -> bool,
    {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        loop {
            let (_, summary) = self.summary("").await;
            if done(&summary) {
                return summary;
            }
            assert!(
                tokio::time::Instant::now() < deadline,
                "summary never converged: {summary}"
            );
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }

    pub async fn stop(mut self) -> StatsSnapshot {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.join.await.unwrap().unwrap()
    }
}

pub fn requests(summary: &Value, processor: &str) -> u64 {
    summary[processor]["totalRequests"].as_u64().unwrap()
}

pub fn total(summary: &Value, processor: &str) -> f64 {
    summary[processor]["totalAmount"].as_f64().unwrap()
}
