use crate::http::error::ApiError;
use crate::http::types::{
    AlbumDownloadRequest, AlbumDownloadResponse, PlaylistRequest, TracksResponse,
};
use crate::services::AlbumService;
use actix_web::web::{Data, Json};
use actix_web::HttpResponse;

pub(crate) async fn album_tracks(
    album_service: Data<AlbumService>,
    request: Json<PlaylistRequest>,
) -> Result<HttpResponse, ApiError> {
    let playlist_id = request.into_inner().playlist_id()?;

    let tracks = album_service.album_tracks(&playlist_id).await?;

    Ok(HttpResponse::Ok().json(TracksResponse { tracks }))
}

pub(crate) async fn download_album(
    album_service: Data<AlbumService>,
    request: Json<AlbumDownloadRequest>,
) -> Result<HttpResponse, ApiError> {
    let (playlist_id, album_title) = request.into_inner().validate()?;

    let manifest = album_service
        .download_album(&playlist_id, &album_title)
        .await?;

    Ok(HttpResponse::Ok().json(AlbumDownloadResponse::from(manifest)))
}
