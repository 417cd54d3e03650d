mod model;
mod server;

use dioxus_logger::tracing;
use tokio::net::TcpListener;

use crate::server::{
    bot,
    config::Config,
    error::AppError,
    router, startup,
    state::{AppState, JwtConfig},
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    dioxus_logger::init(config.log_level).map_err(|e| AppError::InternalError(e.to_string()))?;

    let db = startup::connect_to_database(&config).await?;
    let jwt = JwtConfig::new(&config.jwt_secret, config.token_ttl);
    let cors = startup::setup_cors(&config)?;

    tracing::info!("Starting server");

    let bot_client = bot::start::init_bot(&config, db.clone(), jwt.clone()).await?;

    // Start Discord bot in a separate task
    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    let app = router::router()
        .with_state(AppState::new(db, jwt))
        .layer(cors);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to bind {}: {}", config.bind_addr, e)))?;

    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    Ok(())
}
