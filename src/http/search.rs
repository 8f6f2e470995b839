use crate::http::error::ApiError;
use crate::http::types::{QueryRequest, ResultsResponse};
use crate::services::AlbumService;
use actix_web::web::{Data, Json};
use actix_web::HttpResponse;
use tracing::info;

pub(crate) async fn search(
    album_service: Data<AlbumService>,
    request: Json<QueryRequest>,
) -> Result<HttpResponse, ApiError> {
    let query = request.into_inner().query()?;

    let results = album_service.search_tracks(&query).await?;

    info!(%query, results = results.len(), "Track search finished");

    Ok(HttpResponse::Ok().json(ResultsResponse { results }))
}

pub(crate) async fn search_albums(
    album_service: Data<AlbumService>,
    request: Json<QueryRequest>,
) -> Result<HttpResponse, ApiError> {
    let query = request.into_inner().query()?;

    let results = album_service.search_albums(&query).await;

    info!(%query, results = results.len(), "Album search finished");

    Ok(HttpResponse::Ok().json(ResultsResponse { results }))
}
