use std::sync::Arc;

use actix_web::{middleware::Logger, App, HttpServer};
use todoforge::{
    auth::PasswordHasher,
    config::Config,
    db::Database,
    startup::{self, startup_error},
    store::PgUserStore,
    IdentityService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    startup::init_logging();

    let config = Config::from_env().map_err(startup_error)?;
    if config.api_key.is_some() {
        log::debug!("API_KEY is set but no route uses it");
    }

    let db = Database::connect(&config.database)
        .await
        .map_err(startup_error)?;

    let service = IdentityService {
        users: Arc::new(PgUserStore::new(db.pool().clone())),
        hasher: PasswordHasher::new(config.bcrypt_cost).map_err(startup_error)?,
    };

    log::info!("Identity service running at {}", config.server.url());
    let server = HttpServer::new(move || {
        let service = service.clone();
        App::new()
            .wrap(startup::cors())
            .wrap(Logger::default())
            .configure(|cfg| service.configure(cfg))
    })
    .disable_signals()
    .bind((config.server.host.as_str(), config.server.port))?
    .run();

    startup::serve(server).await?;
    db.close().await;
    Ok(())
}
