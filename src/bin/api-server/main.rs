use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use menu_board::{config::Config, fetch::MockDishSource};

mod api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_ansi(true)
        .with_file(false)
        .pretty()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("fail to setup logging")?;

    // TODO: swap the mock for an HTTP source once the kitchen API is available
    let source = Arc::new(MockDishSource::new(config.fetch_delay));
    let state = web::Data::new(api::ApiState::new(source, config.fetch_timeout));

    // one-shot fetch, the menu stays in the loading state until it resolves
    tokio::spawn(api::refresh_menu(state.clone()));

    tracing::info!("listening on {}", config.bind_addr);
    let allowed_origin = config.allowed_origin.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                Cors::default()
                    .allowed_origin(&allowed_origin)
                    .allow_any_method()
                    .allow_any_header(),
            )
            .service(api::dishes)
            .service(api::menu)
            .service(api::refresh)
    })
    .bind(&config.bind_addr)
    .with_context(|| format!("fail to bind {}", config.bind_addr))?
    .run()
    .await?;
    Ok(())
}
