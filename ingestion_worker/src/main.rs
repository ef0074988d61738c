use std::process::ExitCode;

use common::telemetry::{get_tracing_subscriber, init_tracing_subscriber};
use ingestion_worker::{configuration::get_configuration, startup::Application};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let tracing_subscriber = get_tracing_subscriber(
        "ingestion_worker".into(),
        "info".into(),
        std::io::stdout,
    );
    if let Err(error) = init_tracing_subscriber(tracing_subscriber) {
        eprintln!("{:?}", error);
        return ExitCode::FAILURE;
    }

    let configuration = match get_configuration() {
        Ok(configuration) => configuration,
        Err(error) => {
            error!(?error, "Failed to read configuration");
            return ExitCode::FAILURE;
        }
    };

    let application = match Application::build(configuration).await {
        Ok(application) => application,
        Err(error) => {
            error!(?error, "Failed to build application");
            return ExitCode::FAILURE;
        }
    };

    // Ctrl-C only asks the run to stop, the current step still finishes
    let cancel_token = CancellationToken::new();
    let signal_token = cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling the ingestion run");
            signal_token.cancel();
        }
    });

    let outcome = application.run(cancel_token).await;

    info!(
        state = %outcome.state(),
        persisted = outcome.persisted(),
        "👋 Bye!"
    );
    ExitCode::from(outcome.exit_code())
}
