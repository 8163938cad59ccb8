use clap::Parser;
use sixmax::config::ServerConfig;
use sixmax::engine::Room;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    sixmax::logging::init();
    let config = ServerConfig::parse();
    log::info!(
        "starting six-seat table on ports {}..{} (seed={}, stack={})",
        config.base_port,
        config.base_port + 5,
        config.seed,
        config.stack
    );
    let room = Room::bind(config.base_port, config.stack, config.seed).await?;
    room.run().await
}
