use std::net::SocketAddr;

use tokio::time::{self, Duration as TokioDuration};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dauerschleife::backends;
use dauerschleife::config;
use dauerschleife::routes;
use dauerschleife::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging (stdout + tägliche Datei-Rotation unter ./logs)
    std::fs::create_dir_all("logs").ok();
    let (stdout_nb, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    let file_appender = tracing_appender::rolling::daily("logs", "dauerschleife.log");
    let (file_nb, file_guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(stdout_nb))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(file_nb))
        .init();
    // Guards am Leben halten (nicht fallen lassen), damit Non-Blocking Writer korrekt flushen
    let _log_guards = (stdout_guard, file_guard);

    // Load configuration (embedded defaults -> dauerschleife.toml/.yaml -> env/.env)
    let app_cfg = config::load()?;

    // Resolve backends: one implementation per capability for the process lifetime
    let storage = backends::resolve_storage(&app_cfg);
    let audio = backends::resolve_audio_source(&app_cfg, storage.clone());
    let analyser = backends::resolve_analyser(&app_cfg);
    info!(
        storage = storage.name(),
        audio = audio.name(),
        analyser = analyser.name(),
        "resolved backends"
    );

    let state = AppState::new(app_cfg.clone(), storage, audio, analyser);

    // Hourly reset of the windowed request counter, independent of request traffic.
    // The first tick fires immediately; a missed tick just delays to the next one.
    {
        let counters = state.counters.clone();
        tokio::spawn(async move {
            let mut ticker = time::interval(TokioDuration::from_secs(60 * 60));
            loop {
                ticker.tick().await;
                counters.reset_hourly();
            }
        });
    }

    // Router
    let app = routes::compose(state.clone());

    // CORS: in Debug permissiv (für lokale Entwicklung mit separater UI), in Release nicht nötig (same-origin)
    let app = if cfg!(debug_assertions) { app.layer(CorsLayer::permissive()) } else { app };

    // Server listen addr (from config)
    let port: u16 = app_cfg.server.port;
    let host: String = app_cfg.server.host.clone();
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid listen addr {}:{} - {}", host, port, e))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {} - {}", addr, e))?;

    info!("Dauerschleife listening on http://{}", listener.local_addr()?);

    // Startup self-check after the listener is bound: search the analyser and
    // feed the first hit into the audio source. Exploratory only - failures
    // are logged and never touch the serving path.
    {
        let analyser = state.analyser.clone();
        let audio = state.audio.clone();
        tokio::spawn(async move {
            match analyser.search("Never Gonna Give You Up").await {
                Ok(tracks) => match tracks.first() {
                    Some(track) => {
                        if let Err(e) = audio.provide(track).await {
                            warn!(error = %e, "startup self-check could not fetch audio");
                        }
                    }
                    None => warn!("startup self-check search returned no tracks"),
                },
                Err(e) => warn!(error = %e, "startup self-check search failed"),
            }
        });
    }

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut term = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received. Stopping server...");
}
