use actix_web::{
    dev::Server,
    web::{self, Data},
    App, HttpServer, Scope,
};
use common::{
    domain::metric::{ActivityMetric, FoodMetric, Metric, SleepMetric, WeightMetric},
    helper::error_chain_fmt,
    ports::document_store::DocumentStore,
    repositories::document_store_setup::set_up_document_store,
};
use sqlx::migrate::MigrateError;
use std::{net::TcpListener, sync::Arc};
use tracing::info;
use tracing_actix_web::TracingLogger;

use crate::{
    configuration::Settings,
    controllers::{get_document_by_date, get_documents_paged, health_check},
};

/// Holds the newly built server, and some useful properties
pub struct Application {
    server: Server,
    port: u16,
}

#[derive(thiserror::Error)]
pub enum ApplicationBuildError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error("Failed to migrate the document store: {0}")]
    MigrationError(#[from] MigrateError),
}

impl std::fmt::Debug for ApplicationBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl Application {
    /// # Parameters
    /// - nb_workers: number of actix-web workers
    ///   if `None`, the number of available physical CPUs is used as the worker count.
    #[tracing::instrument(name = "Building application")]
    pub async fn build(
        settings: Settings,
        nb_workers: Option<usize>,
    ) -> Result<Self, ApplicationBuildError> {
        let store = set_up_document_store(&settings.document_store, &settings.database).await?;

        Self::build_with_store(settings, nb_workers, store)
    }

    /// Builds the server on top of an already created document store
    pub fn build_with_store(
        settings: Settings,
        nb_workers: Option<usize>,
        store: Arc<dyn DocumentStore>,
    ) -> Result<Self, ApplicationBuildError> {
        let address = format!(
            "{}:{}",
            settings.application.host, settings.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();

        let server = run(listener, nb_workers, store)?;

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// This function only returns when the application is stopped
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        info!("Running server ...");
        self.server.await
    }
}

/// listener: the consumer binds their own port
///
/// TracingLogger middleware: helps collecting telemetry data.
/// It generates a unique identifier for each incoming request: `request_id`.
///
/// # Parameters
/// - nb_workers: number of actix-web workers
///   if `None`, the number of available physical CPUs is used as the worker count.
pub fn run(
    listener: TcpListener,
    nb_workers: Option<usize>,
    store: Arc<dyn DocumentStore>,
) -> Result<Server, std::io::Error> {
    // Shared among all workers, extracted in handlers as `web::Data<dyn DocumentStore>`
    let store: Data<dyn DocumentStore> = Data::from(store);

    let server = HttpServer::new(move || {
        info!("Starting actix-web worker");

        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .service(metric_scope::<ActivityMetric>())
            .service(metric_scope::<SleepMetric>())
            .service(metric_scope::<WeightMetric>())
            .service(metric_scope::<FoodMetric>())
            .app_data(store.clone())
    })
    .listen(listener)?;

    // If no workers were set, use the actix-web settings (number of workers = number of physical CPUs)
    if let Some(nb_workers) = nb_workers {
        return Ok(server.workers(nb_workers).run());
    }

    // No await
    Ok(server.run())
}

/// Read routes of one metric domain, mounted under `/{document type in lowercase}`
fn metric_scope<M: Metric>() -> Scope {
    let path = format!("/{}", M::DOCUMENT_TYPE.as_str().to_lowercase());

    web::scope(&path)
        .route("", web::get().to(get_documents_paged::<M>))
        .route("/{date}", web::get().to(get_document_by_date::<M>))
}
