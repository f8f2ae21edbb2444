use std::net::SocketAddr;

use tokio::net::TcpListener;

use mock_feed::config::FeedConfig;
use mock_feed::router::create_router;
use mock_feed::state::AppState;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    tracing::info!("Starting mock market data feed");

    let config = FeedConfig::default();
    let addr = SocketAddr::from(([0, 0, 0, 0], config.listen_port));
    let state = AppState::new(config);

    let app = create_router(state);

    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
