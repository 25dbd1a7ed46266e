use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use church_finance::{
    config::Config,
    database::{create_pool, run_migrations},
    error::set_expose_details,
    handlers,
    middlewares::{AuthMiddleware, create_cors},
    services::register_services,
    swagger::swagger_config,
    utils::JwtService,
};

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    log::error!("{context}: {err}");
    std::io::Error::other(format!("{context}: {err}"))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config =
        Config::from_toml().map_err(|e| startup_error("Failed to load configuration", e))?;
    set_expose_details(config.server.is_development());

    let pool = create_pool(&config.database)
        .await
        .map_err(|e| startup_error("Failed to connect to the database", e))?;

    run_migrations(&pool)
        .await
        .map_err(|e| startup_error("Failed to run database migrations", e))?;

    let jwt_service = JwtService::new(&config.jwt.secret, config.jwt.expires_in);

    log::info!(
        "Starting server on {}:{} ({})",
        config.server.host,
        config.server.port,
        config.server.environment
    );

    let cors_origin = config.server.cors_origin.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(AuthMiddleware::new(jwt_service.clone()))
            .wrap(create_cors(cors_origin.as_deref()))
            .wrap(Logger::default())
            .configure(register_services(pool.clone(), jwt_service.clone()))
            .configure(swagger_config)
            .configure(handlers::api_config)
            .default_service(web::to(handlers::not_found))
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
