use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[rocket::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚀 Starting pet election server");

    if let Err(e) = election_server::build().launch().await {
        error!("Server failed: {}", e);
        std::process::exit(1);
    }
}
