use log::{error, info};
use service::{config::Config, logging::Logger, AppState};

#[tokio::main]
async fn main() {
    let config = Config::new();
    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to start logger: {e}");
        std::process::exit(1);
    }

    info!(
        "Starting meeting bridge [Zoom API: {}, OAuth: {}]...",
        config.zoom_api_base_url(),
        config.zoom_oauth_base_url()
    );

    let http_client = match domain::gateway::build_http_client(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build outbound HTTP client: {e}");
            std::process::exit(1);
        }
    };

    let app_state = AppState::new(config, http_client);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server terminated: {e}");
        std::process::exit(1);
    }
}
