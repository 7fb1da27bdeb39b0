#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

pub mod adapters;
pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod telemetry;

use crate::adapters::database::DbPool;
use crate::adapters::database::contact_repo::PgSubmissionStore;
use crate::adapters::demo::DemoSubmissionStore;
use crate::adapters::email::{DisabledNotifier, ResendNotifier};
use crate::config::Config;
use crate::services::contact_service::ContactService;
use crate::services::health_service::HealthService;
use crate::services::notifier::ContactNotifier;
use crate::services::store::SubmissionStore;
use std::sync::Arc;
use tokio::sync::watch;

/// Fully wired services, ready to be mounted on routers.
#[derive(Debug)]
pub struct App {
    pub contact_service: ContactService,
    pub health_service: HealthService,
}

/// Chooses the persistence and notification strategies.
///
/// Without explicit overrides the configuration decides: a database pool selects the
/// Postgres store, no pool selects the demo store; email credentials select Resend,
/// none select the disabled notifier.
#[derive(Debug)]
pub struct AppBuilder {
    config: Config,
    pool: Option<DbPool>,
    store: Option<Arc<dyn SubmissionStore>>,
    notifier: Option<Arc<dyn ContactNotifier>>,
}

impl AppBuilder {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config, pool: None, store: None, notifier: None }
    }

    #[must_use]
    pub fn with_database(mut self, pool: DbPool) -> Self {
        self.pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn SubmissionStore>) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn ContactNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Wires the services.
    ///
    /// # Errors
    /// Returns an error if the HTTP client for the email API cannot be built.
    pub fn build(self) -> anyhow::Result<App> {
        let store: Arc<dyn SubmissionStore> = match (self.store, &self.pool) {
            (Some(store), _) => store,
            (None, Some(pool)) => Arc::new(PgSubmissionStore::new(pool.clone())),
            (None, None) => {
                tracing::warn!("No database configured, contact submissions will only be logged");
                Arc::new(DemoSubmissionStore)
            }
        };

        let notifier: Arc<dyn ContactNotifier> = match (self.notifier, self.config.mail.credentials()) {
            (Some(notifier), _) => notifier,
            (None, Some((api_key, to))) => {
                let client = reqwest::Client::builder().user_agent(concat!("portfolio-server/", env!("CARGO_PKG_VERSION"))).build()?;
                Arc::new(ResendNotifier::new(client, &self.config.mail.api_base, api_key, &self.config.mail.from, to))
            }
            (None, None) => {
                tracing::info!("Email credentials not configured, notifications disabled");
                Arc::new(DisabledNotifier)
            }
        };

        Ok(App {
            contact_service: ContactService::new(store, notifier),
            health_service: HealthService::new(self.pool, self.config.health),
        })
    }
}

/// Flips the shutdown channel on SIGINT or SIGTERM.
pub fn spawn_signal_handler(shutdown_tx: watch::Sender<bool>) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to listen for SIGTERM");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
            () = terminate => tracing::info!("Received SIGTERM, shutting down"),
        }

        let _ = shutdown_tx.send(true);
    });
}

/// Routes panics through `tracing` so they reach structured logs.
pub fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());
        let location = info.location().map(|l| format!("{}:{}", l.file(), l.line())).unwrap_or_default();

        tracing::error!(panic.payload = %payload, panic.location = %location, "Thread panicked");
    }));
}
