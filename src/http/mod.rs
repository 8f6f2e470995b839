mod albums;
mod downloads;
mod error;
mod health;
mod search;
mod types;


use actix_web::web;
use error::ApiError;

pub(crate) fn configure(config: &mut web::ServiceConfig) {
    config
        .app_data(
            web::JsonConfig::default()
                .error_handler(|error, _request| ApiError::BadRequest(error.to_string()).into()),
        )
        .service(web::resource("/").route(web::get().to(health::index)))
        .service(web::resource("/health").route(web::get().to(health::health)))
        .service(web::resource("/search").route(web::post().to(search::search)))
        .service(web::resource("/search_albums").route(web::post().to(search::search_albums)))
        .service(web::resource("/album_tracks").route(web::post().to(albums::album_tracks)))
        .service(web::resource("/download").route(web::post().to(downloads::download)))
        .service(
            web::resource("/download_album").route(web::post().to(albums::download_album)),
        )
        .service(
            web::resource("/download_file/{path:.*}")
                .route(web::get().to(downloads::download_file)),
        );
}
