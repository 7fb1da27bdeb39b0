#![allow(
    clippy::unwrap_used,
    clippy::panic,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    missing_debug_implementations,
    unreachable_pub,
    dead_code
)]
use async_trait::async_trait;
use portfolio_server::api::{self, MgmtState};
use portfolio_server::domain::submission::{ContactSubmission, NewSubmission, SubmissionReceipt};
use portfolio_server::services::notifier::{ContactNotifier, MailError};
use portfolio_server::services::store::{StoreError, SubmissionStore};
use portfolio_server::{App, AppBuilder};
use std::sync::{Arc, Mutex, Once};
use tokio::net::TcpListener;

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("portfolio_server=debug".parse().unwrap())
            .add_directive("sqlx=warn".parse().unwrap())
            .add_directive("tower=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).init();
    });
}

pub fn get_test_config() -> portfolio_server::config::Config {
    portfolio_server::config::Config::default()
}

pub fn valid_payload() -> serde_json::Value {
    serde_json::json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "message": "Hello, I would like to collaborate."
    })
}

#[derive(Debug)]
pub enum StoreBehavior {
    /// Echo the submission back with a fresh id per insert.
    Echo,
    /// Return these rows for every insert.
    Rows(Vec<ContactSubmission>),
    Fail(StoreError),
}

#[derive(Debug)]
pub struct RecordingStore {
    behavior: StoreBehavior,
    calls: Mutex<Vec<NewSubmission>>,
}

impl RecordingStore {
    pub fn new(behavior: StoreBehavior) -> Arc<Self> {
        Arc::new(Self { behavior, calls: Mutex::new(Vec::new()) })
    }

    pub fn calls(&self) -> Vec<NewSubmission> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionStore for RecordingStore {
    async fn insert(&self, submission: &NewSubmission) -> Result<SubmissionReceipt, StoreError> {
        self.calls.lock().unwrap().push(submission.clone());
        match &self.behavior {
            StoreBehavior::Echo => Ok(SubmissionReceipt::Stored(vec![ContactSubmission {
                id: uuid::Uuid::new_v4().to_string(),
                name: submission.name.clone(),
                email: submission.email.clone(),
                message: submission.message.clone(),
                created_at: submission.created_at,
            }])),
            StoreBehavior::Rows(rows) => Ok(SubmissionReceipt::Stored(rows.clone())),
            StoreBehavior::Fail(err) => Err(err.clone()),
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    fail: bool,
    calls: Mutex<Vec<NewSubmission>>,
}

impl RecordingNotifier {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { fail: true, ..Self::default() })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ContactNotifier for RecordingNotifier {
    async fn notify(&self, submission: &NewSubmission) -> Result<(), MailError> {
        self.calls.lock().unwrap().push(submission.clone());
        if self.fail {
            return Err(MailError::Rejected { status: 503, body: "mail provider unavailable".to_string() });
        }
        Ok(())
    }
}

pub struct TestApp {
    pub server_url: String,
    pub mgmt_url: String,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawns the app with recording collaborators.
    pub async fn spawn_with(store: &Arc<RecordingStore>, notifier: &Arc<RecordingNotifier>) -> Self {
        let builder = AppBuilder::new(get_test_config())
            .with_store(Arc::clone(store) as Arc<dyn SubmissionStore>)
            .with_notifier(Arc::clone(notifier) as Arc<dyn ContactNotifier>);
        Self::spawn_builder(builder).await
    }

    /// Spawns the app exactly as configuration alone would wire it.
    pub async fn spawn_builder(builder: AppBuilder) -> Self {
        setup_tracing();
        let App { contact_service, health_service } = builder.build().unwrap();

        let api_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mgmt_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let server_url = format!("http://{}", api_listener.local_addr().unwrap());
        let mgmt_url = format!("http://{}", mgmt_listener.local_addr().unwrap());

        let app_router = api::app_router(contact_service);
        let mgmt_app = api::mgmt_router(MgmtState { health_service });

        tokio::spawn(async move {
            axum::serve(api_listener, app_router).await.unwrap();
        });
        tokio::spawn(async move {
            axum::serve(mgmt_listener, mgmt_app).await.unwrap();
        });

        Self { server_url, mgmt_url, client: reqwest::Client::new() }
    }

    pub async fn post_contact(&self, payload: &serde_json::Value) -> reqwest::Response {
        self.client.post(format!("{}/api/contact", self.server_url)).json(payload).send().await.unwrap()
    }
}
