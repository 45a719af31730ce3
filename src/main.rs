use student_roster::config::{Config, Invocation, usage};
use student_roster::dispatch::RosterService;
use student_roster::dispatch::handlers::router;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match Config::from_env()? {
        Invocation::Run(config) => config,
        Invocation::Help => {
            let program = std::env::args()
                .next()
                .unwrap_or_else(|| "student-roster".to_string());
            println!("{}", usage(&program));
            return Ok(());
        }
    };

    tracing::info!("Data directory: {}", config.data_dir.display());

    // 1. Record store:
    let service = RosterService::open(config.data_dir.clone())?;

    // 2. HTTP Router:
    let app = router(service);

    // 3. Start HTTP server:
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("HTTP server listening on {}", listener.local_addr()?);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
