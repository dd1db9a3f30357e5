use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use typed_client::Config;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load_or_exit();

    let addr = mock_server::listen_addr(config.port);
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    mock_server::run(listener).await
}
