use std::sync::Arc;

use color_eyre::Result;
use log::info;
use rainbow_snake::{
    api::{api, models::Status, Services},
    board::GRID_SIZE,
    config::{Config, AUTHOR, NAME, VERSION},
};
use warp::{http::Method, Filter};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();

    #[cfg(debug_assertions)]
    info!("running in debug mode");

    #[cfg(not(debug_assertions))]
    info!("running in release mode");

    let config = Config::from_env()?;

    let cors = warp::cors()
        .allow_method(Method::GET)
        .allow_method(Method::POST)
        .allow_header("content-type")
        .allow_any_origin();

    let logging = warp::log(NAME);

    let status = Status {
        name:      NAME.to_owned(),
        version:   VERSION.to_owned(),
        author:    AUTHOR.to_owned(),
        grid_size: GRID_SIZE,
        tick_ms:   u64::try_from(config.tick.as_millis())?,
    };

    let routes = api(Arc::new(Services::in_memory()), status)
        .with(cors)
        .with(logging);

    info!("listening on {}", config.bind);
    warp::serve(routes).run(config.bind).await;

    Ok(())
}
