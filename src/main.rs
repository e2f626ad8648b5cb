use actix_web::{web, App, HttpServer};
use tracing::info;

use guandan_server::config::ServerConfig;
use guandan_server::room::RoomRegistry;
use guandan_server::telemetry;
use guandan_server::ws::session;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env().unwrap_or_else(|err| {
        eprintln!("{err}");
        std::process::exit(1);
    });

    let registry = RoomRegistry::new();
    info!(port = config.port, "starting guandan server");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(registry.clone()))
            .route("/ws", web::get().to(session::upgrade))
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}
