//! Console backend entry-point.

mod server;

use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use gensys_console::inbound::http::session_config::{BuildMode, session_settings};
use gensys_console::settings::ConsoleSettings;
use server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ConsoleSettings::load()
        .map_err(|error| std::io::Error::other(format!("configuration failed: {error}")))?;
    let session = session_settings(&settings, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let config = ServerConfig::from_settings(&settings, session).map_err(std::io::Error::other)?;

    #[cfg(feature = "metrics")]
    let config = {
        let metrics = server::prometheus_metrics(config.backend().label())?;
        config.with_metrics(Some(metrics))
    };

    let bind_addr = config.bind_addr();
    let backend_label = config.backend().label();
    let server = create_server(config).await?;
    info!(%bind_addr, backend = backend_label, "console backend listening");
    server.await
}
