use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use log::info;

use chatboard::config::Settings;
use chatboard::{databases, routes};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let settings = Settings::from_env()?;
    let pool = databases::connect(&settings).await?;
    databases::init_schema(&pool).await;

    info!("listening on {}:{}", settings.app_host, settings.app_port);

    let bind = (settings.app_host.clone(), settings.app_port);
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .configure(routes::chats::init)
    })
    .bind(bind)?
    .run()
    .await?;

    Ok(())
}
