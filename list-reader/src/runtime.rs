use lambda_runtime::{run, service_fn, Error};
use tracing::info;

use crate::config::Config;
use crate::handler::{function_handler, ListEnd};
use crate::store::DynamoDbListStore;

/// Boot a list endpoint: logging, TLS provider, config and store client are
/// set up once per container, then the runtime loop serves invocations.
pub async fn serve(end: ListEnd) -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    // Install the default CryptoProvider before any client is built
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .map_err(|_| Error::from("Failed to install the rustls crypto provider"))?;

    let config = Config::from_env()?;
    let store = DynamoDbListStore::from_config(&config).await;
    info!(
        table = store.table_name(),
        operation = end.operation(),
        "List endpoint ready"
    );

    run(service_fn(|event| function_handler(&store, end, event))).await
}
