use store_server::{Config, Server, ServerState, print_banner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (dotenv, logging)
    dotenv::dotenv().ok();
    let config = Config::from_env();
    store_server::init_logger_with_file(None, config.log_dir.as_deref());

    print_banner();
    tracing::info!("GradeTree store server starting...");

    // 2. Initialize server state
    let state = ServerState::initialize(&config);

    // 3. Run the HTTP server
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
