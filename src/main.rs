use std::error::Error;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::info;

use negamax_chess::api::router::create_router;
use negamax_chess::api::state::AppState;
use negamax_chess::config::AppConfig;

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();

    // Probe mode for container health checks.
    if std::env::args().any(|a| a == "--health-check") {
        let code = match probe(config.port).await {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("Health check failed: {e}");
                1
            }
        };
        std::process::exit(code);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "negamax_chess=info,tower_http=info".into()),
        )
        .init();

    let state = AppState::new(&config).expect("Failed to start game worker");
    let app = create_router(state);

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind to address");

    info!(
        depth = config.search_depth,
        book = config.opening_book,
        "negamax-chess v{} listening on {bind_addr}",
        env!("CARGO_PKG_VERSION")
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    info!("shut down");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}

/// GET /health on the local port; succeeds only on a 200.
async fn probe(port: u16) -> Result<(), Box<dyn Error>> {
    let mut stream = TcpStream::connect(("127.0.0.1", port)).await?;
    let request =
        format!("GET /health HTTP/1.1\r\nHost: 127.0.0.1:{port}\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await?;

    let mut buf = [0u8; 512];
    let n = stream.read(&mut buf).await?;
    let status_line = String::from_utf8_lossy(&buf[..n])
        .lines()
        .next()
        .unwrap_or_default()
        .to_string();
    if status_line.starts_with("HTTP/1.1 200") {
        Ok(())
    } else {
        Err(format!("unexpected response: {status_line}").into())
    }
}
