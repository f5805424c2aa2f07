//! Recon scan server - main entry point.
//!
//! Starts the Actix-web server with configured routes and middleware.

use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::{App, HttpRequest, HttpServer, Result as ActixResult, http::header, web};
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use recon_scan_lib::api::{self, ApiDoc};
use recon_scan_lib::config::Config;
use recon_scan_lib::db::{DbPool, Repositories};
use recon_scan_lib::middleware::RequestLogger;
use recon_scan_lib::services::{EventBroadcaster, ProcessRunner, ScanController, WordlistStore};

/// SPA fallback handler - serves index.html for client-side routing.
async fn spa_fallback(req: HttpRequest) -> ActixResult<NamedFile> {
    let static_dir = req
        .app_data::<web::Data<PathBuf>>()
        .ok_or_else(|| actix_web::error::ErrorNotFound("static files not configured"))?;
    Ok(NamedFile::open(static_dir.join("index.html"))?)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - In production, DATABASE_URL must be set to a non-default value");
            error!("  - In production, RECON_WORDLIST_DIR must be an absolute path");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  Recon Scan Server");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
    }

    tokio::fs::create_dir_all(&config.wordlist_dir)
        .await
        .expect("Failed to create wordlist directory");

    let pool = DbPool::new(&config)
        .await
        .expect("Failed to connect to database");
    info!("Database connection established");

    pool.run_migrations()
        .await
        .expect("Failed to run migrations");
    info!("Database migrations complete");

    let repos = Repositories::from_store(Arc::new(pool));
    let broadcaster = EventBroadcaster::new();
    let controller = ScanController::new(
        repos.clone(),
        Arc::new(ProcessRunner::new()),
        config.tools.clone(),
        config.max_concurrent_scans,
        broadcaster.clone(),
    );
    let wordlists = WordlistStore::new(
        config.wordlist_dir.clone(),
        config.max_wordlist_size,
        repos.wordlists.clone(),
    );

    info!(
        "Scan limits: {} concurrent tool processes, {}MB max wordlist",
        config.max_concurrent_scans,
        config.max_wordlist_size / 1024 / 1024
    );
    info!(
        "Tools run via '{}' in containers '{}-<tool>-1'",
        config.tools.docker_bin, config.tools.container_prefix
    );

    let bind_address = config.bind_address();
    let static_dir = config.static_dir.clone();
    let is_development = config.is_development();
    let max_wordlist_size = config.max_wordlist_size;
    let openapi = ApiDoc::openapi();

    if static_dir.is_some() {
        info!("Static file serving enabled from {:?}", static_dir);
    }

    let worker_count = if is_development {
        info!(
            "Starting server at http://{} (4 workers - development mode)",
            bind_address
        );
        4
    } else {
        let cpus = num_cpus::get();
        info!("Starting server at http://{} ({} workers)", bind_address, cpus);
        cpus
    };

    let server = HttpServer::new(move || {
        let cors = if is_development {
            Cors::default()
                .allowed_origin("http://localhost:3000")
                .allowed_origin("http://127.0.0.1:3000")
                .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
                .max_age(3600)
        } else {
            // Same-origin only
            Cors::default()
                .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
                .max_age(3600)
        };

        let mut app = App::new()
            // CORS must wrap before other middleware
            .wrap(cors)
            .wrap(RequestLogger)
            .app_data(web::Data::new(repos.clone()))
            .app_data(web::Data::new(controller.clone()))
            .app_data(web::Data::new(wordlists.clone()))
            .app_data(web::Data::new(broadcaster.clone()))
            // Multipart framing overhead on top of the wordlist limit
            .app_data(web::PayloadConfig::new(max_wordlist_size + 64 * 1024))
            .service(web::scope("/api/v1").configure(api::configure))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            );

        if let Some(ref dir) = static_dir {
            app = app
                .app_data(web::Data::new(dir.clone()))
                .service(Files::new("/assets", dir.join("assets")).prefer_utf8(true))
                .default_service(web::route().to(spa_fallback));
        }

        app
    });

    server
        .workers(worker_count)
        .bind(&bind_address)?
        .run()
        .await
}
