use std::sync::Arc;

use clinic_intake::{
    config::Config,
    db::{self, MySqlStore, SubmissionStore},
    handlers::AppState,
    server, services, Error,
};
use dotenvy::dotenv;
use envconfig::Envconfig;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load environment variables from a .env file if present
    dotenv().ok();

    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    log::info!("Starting the clinic intake server...");

    let config = Config::init_from_env()?;

    let pool = db::init_db(&config).await?;
    let store: Arc<dyn SubmissionStore> = Arc::new(MySqlStore::new(pool.clone()));

    let mut keepalive = services::schedule_keepalive(store.clone(), &config.keepalive_schedule).await?;

    let app = server::router(AppState::new(store));
    let served = server::serve(app, config.listen_addr()).await;

    if let Err(e) = keepalive.shutdown().await {
        log::warn!("Keepalive scheduler did not stop cleanly: {}", e);
    }
    pool.close().await;

    served?;
    log::info!("Shutting down gracefully");
    Ok(())
}
