use dotenvy::dotenv;
use pickup_board::{run, AppError, BoardConfig};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = BoardConfig::from_env()?;
    log::info!(
        "Starting pickup board for {} (capacity {}, statuses {:?})",
        config.stores.get(config.store).map(String::as_str).unwrap_or("-"),
        config.capacity,
        config.statuses
    );

    run(config).await
}
