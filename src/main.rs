use std::sync::Arc;

use tokio::net::TcpListener;

use arcadeserver::config::Config;
use arcadeserver::gateway::GatewayClient;
use arcadeserver::routes;
use arcadeserver::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arcadeserver=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::load();
    print_banner(&config);

    let gateway = config
        .gateway
        .as_ref()
        .map(|gw| Arc::new(GatewayClient::new(gw).expect("failed to build gateway HTTP client")));

    if gateway.is_none() {
        tracing::warn!("gateway url/token not configured, game endpoints will answer 503");
    }

    let state = AppState {
        gateway,
        static_dir: config.static_dir.clone(),
    };

    let app = routes::router(state);

    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .expect("failed to bind");

    let actual_port = listener
        .local_addr()
        .expect("failed to get local address")
        .port();
    eprintln!("  \x1b[32m→ listening on 0.0.0.0:{actual_port}\x1b[0m");
    eprintln!();

    axum::serve(listener, app).await.expect("server error");
}

fn print_banner(config: &Config) {
    let version = env!("CARGO_PKG_VERSION");
    let gateway = match config.gateway {
        Some(ref gw) => gw.base_url.as_str(),
        None => "not configured",
    };

    eprintln!();
    eprintln!("  \x1b[1;36marcade\x1b[0m \x1b[2mv{version}\x1b[0m");
    eprintln!();
    eprintln!("  \x1b[2mport\x1b[0m         {}", config.port);
    eprintln!("  \x1b[2mgateway\x1b[0m      {gateway}");
    eprintln!("  \x1b[2mfrontend\x1b[0m     {}", config.static_dir.display());
    eprintln!();
}
