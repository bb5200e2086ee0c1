//! Serve command: run the HTTP API.

use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::Pipeline;
use crate::server::{self, AppState, ENDPOINTS};
use std::sync::Arc;

/// Run the HTTP API server.
pub async fn run_serve(host: Option<String>, port: Option<u16>, settings: Settings) -> anyhow::Result<()> {
    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);

    let pipeline = Pipeline::from_settings(&settings)?;
    let state = Arc::new(AppState { pipeline, settings });
    let app = server::router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("tubeseo API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    for (method, path, description) in ENDPOINTS {
        Output::kv(description, &format!("{:<5}{}", method, path));
    }
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}
