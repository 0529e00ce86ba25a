use cinema_console::{build_server, Config};
use dotenvy::dotenv;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().expect("Configuration must be valid");

    log::info!(
        "Starting server at http://{}:{} (store {})",
        config.host,
        config.port,
        config.store_url
    );

    build_server(&config)?.await
}
