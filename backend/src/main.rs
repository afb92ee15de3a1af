mod classify;
mod error;
mod routes;
mod uploads;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use classify::labels::verify_triage_table;
use classify::model::Classifier;
use routes::configure_routes;
use std::env;
use std::path::PathBuf;

/// Per-process configuration shared with the request handlers.
pub struct AppConfig {
    pub upload_dir: PathBuf,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    dotenv::dotenv().ok();

    // A triage table that misses a registry label would silently report
    // Unknown tiers for a trained class. Refuse to start instead.
    if let Err(e) = verify_triage_table() {
        log::error!("Label registry / triage table mismatch: {}", e);
        return Err(std::io::Error::new(std::io::ErrorKind::Other, e));
    }

    let model_path = env::var("MODEL_PATH")
        .unwrap_or_else(|_| "saved_model/image_classifier.pt".to_string());
    let classifier = Classifier::load(&model_path);
    if classifier.is_loaded() {
        log::info!("Starting with the classifier model loaded");
    } else {
        log::warn!(
            "Starting without a loaded model. The web interface will work, but predictions are disabled."
        );
    }
    let classifier = web::Data::new(classifier);

    let upload_dir = PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()));
    let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string());

    let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let bind_address = format!("0.0.0.0:{}", port);
    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .app_data(classifier.clone())
            .app_data(web::Data::new(AppConfig {
                upload_dir: upload_dir.clone(),
            }))
            .configure(|cfg| configure_routes(cfg, static_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
