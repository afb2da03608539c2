use dispatch_server::{print_banner, setup_environment, Config, Server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment first: .env may carry JWT_SECRET, API keys, PINs
    dotenv::dotenv().ok();

    // 2. Configuration + logging
    let config = Config::from_env();
    setup_environment(&config);

    print_banner();
    tracing::info!("dispatch server starting...");

    // 3. Run until ctrl-c
    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
