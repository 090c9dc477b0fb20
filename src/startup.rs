use std::future::Future;
use std::io;

use actix_cors::Cors;
use actix_web::dev::Server;

/// Initialises `env_logger`, defaulting to `info` when `RUST_LOG` is unset.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Permissive CORS: any origin, method and header.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

/// Wraps a startup failure so `main` can return `std::io::Result`.
pub fn startup_error<E>(error: E) -> io::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    log::error!("Startup failed: {}", error);
    io::Error::new(io::ErrorKind::Other, error)
}

/// Runs `server` until SIGINT or SIGTERM, then stops it gracefully.
///
/// The server must be built with `disable_signals()`; actix's own SIGINT handling
/// stops workers without waiting for in-flight requests.
pub async fn serve(server: Server) -> io::Result<()> {
    serve_until(server, shutdown_signal()).await
}

/// Runs `server` until `shutdown` resolves, then waits for in-flight requests to finish.
pub async fn serve_until<F>(server: Server, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()>,
{
    let handle = server.handle();
    let mut running = actix_web::rt::spawn(server);

    tokio::select! {
        result = &mut running => return result.map_err(startup_error)?,
        _ = shutdown => {}
    }

    log::info!("Shutting down gracefully...");
    handle.stop(true).await;
    running.await.map_err(startup_error)?
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
