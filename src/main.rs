use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::PgPool;

use crowdfund::auth::TokenService;
use crowdfund::config::Config;
use crowdfund::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    let tokens = TokenService::new(
        &config.secret_key,
        &config.algorithm,
        config.access_token_expire_minutes,
    )
    .expect("Invalid token configuration");

    log::info!(
        "Starting crowdfund server ({}) at {}",
        config.env,
        config.server_url()
    );

    let bind_addr = (config.server_host.clone(), config.server_port);
    let pool_data = web::Data::new(pool);
    let token_data = web::Data::new(tokens);

    HttpServer::new(move || {
        App::new()
            .app_data(pool_data.clone())
            .app_data(token_data.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(web::scope("/api/v1").configure(routes::config))
    })
    .bind(bind_addr)?
    .run()
    .await
}
