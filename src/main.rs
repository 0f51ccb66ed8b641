use anyhow::Result;
use storefront_admin::config::AdminConfig;
use storefront_admin::server::ServerBuilder;
use storefront_admin::telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => AdminConfig::from_yaml_file(&path)?,
        None => AdminConfig::default_config(),
    }
    .apply_env_overrides()?;

    telemetry::init_tracing(&config.logging.filter);

    tracing::info!(
        acl = config.acl.enabled,
        payments = config.seed.payments.len(),
        "starting storefront admin"
    );

    let addr = config.bind_address();
    ServerBuilder::from_config(&config)?.serve(&addr).await
}
