use ridealong_config::Config;
use tracing::info;

use crate::environment;

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Relay endpoint: {}", config.relay.endpoint);
    let server = environment::server(&config)?;

    info!("Starting http server on {}", config.http.address);
    server.serve().await
}
