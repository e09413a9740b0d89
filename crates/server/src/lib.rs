//! PitchMatch HTTP Server
//!
//! Actix-web REST API over the proposal store, the ranking engine and the
//! proposal writer, plus the static frontend under `/app`.

pub mod error;
pub mod routes;
pub mod state;
pub mod store;
pub mod types;
pub mod workflow;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use pitchmatch_common::{AppConfig, Result};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

pub use state::AppState;
pub use store::{default_proposals, ProposalStore};

/// Start the HTTP server and run until shutdown
pub async fn start_server(config: AppConfig) -> Result<()> {
    let bind_addr = config.server_bind_address();
    let frontend_dir = config.frontend_dir.clone();
    let state = Arc::new(AppState::new(config)?);

    info!(
        "Proposal store: {}, generation: {}",
        state.store.path().display(),
        if state.writer.is_configured() {
            state.writer.model()
        } else {
            "placeholder mode"
        }
    );

    let serve_frontend = frontend_dir.is_dir();
    if !serve_frontend {
        warn!(
            "Frontend directory {} not found, /app is disabled",
            frontend_dir.display()
        );
    }

    let server = HttpServer::new(move || {
        let app = App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure);

        if serve_frontend {
            app.service(actix_files::Files::new("/app", frontend_dir.clone()).index_file("index.html"))
        } else {
            app
        }
    })
    .bind(&bind_addr)?;

    info!("Server running on http://{}", bind_addr);
    server.run().await?;

    info!("Server stopped");
    Ok(())
}
