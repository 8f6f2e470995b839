use crate::http::error::ApiError;
use crate::http::types::{DownloadRequest, DownloadResponse};
use crate::services::AlbumService;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::web::{Data, Json, Path};
use actix_web::HttpResponse;
use std::io::ErrorKind;
use std::path::Component;
use tokio_util::io::ReaderStream;
use tracing::debug;

pub(crate) async fn download(
    album_service: Data<AlbumService>,
    request: Json<DownloadRequest>,
) -> Result<HttpResponse, ApiError> {
    let (video_id, title) = request.into_inner().validate()?;

    let acquired = album_service.download_track(&video_id, &title).await?;

    Ok(HttpResponse::Ok().json(DownloadResponse::from(acquired)))
}

/// Streams a previously downloaded file. Only plain relative paths under the
/// download root are served.
pub(crate) async fn download_file(
    album_service: Data<AlbumService>,
    path: Path<String>,
) -> Result<HttpResponse, ApiError> {
    let relative_path = std::path::PathBuf::from(path.into_inner());

    let is_plain = relative_path
        .components()
        .all(|component| matches!(component, Component::Normal(_)));
    if !is_plain {
        return Err(ApiError::BadRequest("Invalid file path".to_string()));
    }

    let full_path = album_service.download_root().join(&relative_path);

    let file = match tokio::fs::File::open(&full_path).await {
        Ok(file) => file,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            return Err(ApiError::NotFound("File not found".to_string()))
        }
        Err(error) => return Err(error.into()),
    };

    let metadata = file.metadata().await?;
    if !metadata.is_file() {
        return Err(ApiError::NotFound("File not found".to_string()));
    }

    let file_name = relative_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let content_type = mime_guess::from_path(&relative_path).first_or_octet_stream();

    debug!(path = %full_path.display(), size = metadata.len(), "Serving file");

    Ok(HttpResponse::Ok()
        .content_type(content_type.to_string())
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file_name)],
        })
        .no_chunking(metadata.len())
        .streaming(ReaderStream::new(file)))
}
