use common::telemetry::{get_tracing_subscriber, init_tracing_subscriber};
use rest_gateway::{configuration::get_configuration, startup::Application};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let tracing_subscriber =
        get_tracing_subscriber("rest_gateway".into(), "info".into(), std::io::stdout);
    init_tracing_subscriber(tracing_subscriber)
        .map_err(|error| std::io::Error::new(std::io::ErrorKind::Other, error))?;

    let configuration = get_configuration()
        .map_err(|error| std::io::Error::new(std::io::ErrorKind::InvalidInput, error))?;

    let application = Application::build(configuration, None)
        .await
        .map_err(|error| std::io::Error::new(std::io::ErrorKind::Other, error))?;

    application.run_until_stopped().await?;
    Ok(())
}
