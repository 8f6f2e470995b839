use crate::config::Config;
use crate::impls::YtDlpMediaProvider;
use crate::services::{AlbumService, FfmpegEncoder};
use actix_rt::signal::unix;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use futures_lite::FutureExt;
use std::sync::Arc;
use tracing::{error, info};

mod config;
mod http;
mod impls;
mod services;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    let mut terminate = unix::signal(unix::SignalKind::terminate())?;
    let mut interrupt = unix::signal(unix::SignalKind::interrupt())?;

    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    info!(version = VERSION, "Starting application...");

    tokio::fs::create_dir_all(&config.download_directory).await?;

    let media_provider = YtDlpMediaProvider::create(&config.ytdlp_path);
    let media_encoder = FfmpegEncoder::create(&config.ffmpeg_path, &config.audio_bitrate);

    let album_service = Data::new(AlbumService::create(
        Arc::new(media_provider),
        Arc::new(media_encoder),
        &config,
    ));

    info!(
        download_directory = %config.download_directory,
        marker = %config.official_album_marker,
        max_parallel_downloads = config.max_parallel_downloads,
        "Album service ready"
    );

    let shutdown_timeout = config.shutdown_timeout;
    let bind_address = config.bind_address.clone();

    let server = HttpServer::new({
        move || {
            App::new()
                .app_data(Data::clone(&album_service))
                .configure(http::configure)
        }
    })
    .shutdown_timeout(shutdown_timeout)
    .bind(bind_address)?
    .run();

    let server_handle = server.handle();

    actix_rt::spawn({
        async move {
            if let Err(error) = server.await {
                error!(?error, "Error on http server");
            }
        }
    });

    info!("Application started");

    interrupt.recv().or(terminate.recv()).await;

    info!("Received shutdown signal. Shutting down gracefully...");

    server_handle.stop(true).await;

    Ok(())
}
