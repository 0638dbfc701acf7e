// File: services/device_service/src/main.rs
use devicehub_common::{logging, with_http_layers};
use devicehub_config::{ensure_dotenv_loaded, load_config_with_defaults, ServerConfig};
use std::error::Error;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

const DEFAULT_PORT: u16 = 8001;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    ensure_dotenv_loaded();
    logging::init();

    let config = Arc::new(load_config_with_defaults(&ServerConfig {
        host: "0.0.0.0".to_string(),
        port: DEFAULT_PORT,
    })?);

    #[allow(unused_mut)] // only mutated with the openapi feature
    let mut app = devicehub_registry::routes(config.clone()).await?;

    #[cfg(feature = "openapi")]
    {
        use devicehub_registry::doc::RegistryApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        info!("Adding Swagger UI at /docs");
        app = app.merge(SwaggerUi::new("/docs").url("/openapi.json", RegistryApiDoc::openapi()));
    }

    let app = with_http_layers(app, &config.cors);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Device service listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Device service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
