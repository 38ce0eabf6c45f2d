use std::sync::Arc;

use cautious_snake::{config::Config, server::routes, strategies::Cautious};
use color_eyre::Result;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();

    #[cfg(debug_assertions)]
    info!("running in debug mode");

    #[cfg(not(debug_assertions))]
    info!("running in release mode");

    let config = Config::from_env()?;

    let api = routes(Arc::new(Cautious::new()));

    info!("listening on {}", config.addr());
    warp::serve(api).run(config.addr()).await;

    Ok(())
}
