use backend::api::server;
use backend::config::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("backend=info".parse().unwrap()),
        )
        .init();

    let config = Config::load();
    server::start_server(config).await;
}
