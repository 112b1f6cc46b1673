use std::env;
#[cfg(feature = "openapi")]
use std::fs;
use std::path::PathBuf;

use anyhow::anyhow;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use speechgate::{ServerConfig, create_app, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Handle CLI arguments
    let mut config_path: Option<PathBuf> = None;
    let mut args = env::args();
    let _ = args.next();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-c" | "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                config_path = Some(PathBuf::from(path));
            }
            #[cfg(feature = "openapi")]
            "openapi" => return export_openapi(args),
            other => {
                #[cfg(feature = "openapi")]
                {
                    anyhow::bail!(
                        "Unknown argument '{other}'. Usage: speechgate [--config <file.yaml>] | speechgate openapi [-f yaml|json] [-o <file>]"
                    );
                }
                #[cfg(not(feature = "openapi"))]
                {
                    anyhow::bail!("Unknown argument '{other}'. Usage: speechgate [--config <file.yaml>]");
                }
            }
        }
    }

    // Load configuration
    let config = match &config_path {
        Some(path) => ServerConfig::from_file(path),
        None => ServerConfig::from_env(),
    }
    .map_err(|e| anyhow!(e.to_string()))?;
    let address = config.address();

    // Create application state
    let app_state = AppState::new(config)?;
    let app = create_app(app_state);

    // Create listener
    let listener = TcpListener::bind(&address).await?;
    info!("Server listening on {address}");

    // Start server
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {e}");
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

#[cfg(feature = "openapi")]
fn export_openapi(mut args: env::Args) -> anyhow::Result<()> {
    let mut format = "yaml".to_string();
    let mut output: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-f" | "--format" => {
                format = args
                    .next()
                    .ok_or_else(|| anyhow!("--format requires a value (yaml or json)"))?;
            }
            "-o" | "--output" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow!("--output requires a file path"))?;
                output = Some(PathBuf::from(path));
            }
            other => {
                anyhow::bail!("Unknown option '{other}'. Use --format (yaml|json) or --output <file>");
            }
        }
    }

    let spec_content = match format.as_str() {
        "yaml" => speechgate::docs::openapi::spec_yaml()
            .map_err(|e| anyhow!("Failed to generate OpenAPI YAML: {e}"))?,
        "json" => speechgate::docs::openapi::spec_json()
            .map_err(|e| anyhow!("Failed to generate OpenAPI JSON: {e}"))?,
        other => anyhow::bail!("Invalid format '{other}'. Must be 'yaml' or 'json'"),
    };

    // Write to file or stdout
    if let Some(output_path) = output {
        fs::write(&output_path, &spec_content)
            .map_err(|e| anyhow!("Failed to write to {}: {e}", output_path.display()))?;
        println!("OpenAPI spec written to {}", output_path.display());
    } else {
        println!("{spec_content}");
    }

    Ok(())
}
