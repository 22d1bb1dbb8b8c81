use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use stcp_server::arrivals::ArrivalsService;
use stcp_server::cache::CacheConfig;
use stcp_server::search::{SearchClient, SearchConfig};
use stcp_server::stcp::{StcpClient, StcpConfig};
use stcp_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Optional upstream override, mostly for pointing at a local fixture
    // server during development.
    let mut stcp_config = StcpConfig::new();
    let mut search_config = SearchConfig::new();
    if let Ok(base_url) = std::env::var("STCP_BASE_URL") {
        stcp_config = stcp_config.with_base_url(base_url.clone());
        search_config = search_config.with_base_url(base_url);
    }

    let client = StcpClient::new(stcp_config).expect("Failed to create STCP client");
    let search = SearchClient::new(search_config).expect("Failed to create search client");

    let arrivals = ArrivalsService::new(client, &CacheConfig::default());

    let state = AppState::new(arrivals, search);
    let app = create_router(state);

    let addr: SocketAddr = std::env::var("STCP_BIND")
        .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
        .parse()
        .expect("STCP_BIND must be a socket address");

    println!("STCP arrivals server listening on http://{addr}");
    println!();
    println!("Endpoints:");
    println!("  GET /<codigo da paragem>  - live arrivals for one stop");
    println!("  GET /pesquisa?q=<nome>    - stop-name search");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
