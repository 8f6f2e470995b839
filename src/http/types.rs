use crate::http::error::ApiError;
use album_processors::{AcquiredTrack, BatchManifest};
use serde::{Deserialize, Serialize};

const DEFAULT_TRACK_TITLE: &str = "audio";
const DEFAULT_ALBUM_TITLE: &str = "Album";

/// Missing, `null` and empty values are all treated as absent.
fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    value
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::required(field))
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[derive(Deserialize)]
pub(crate) struct QueryRequest {
    query: Option<String>,
}

impl QueryRequest {
    pub(crate) fn query(self) -> Result<String, ApiError> {
        required(self.query, "Query")
    }
}

#[derive(Deserialize)]
pub(crate) struct PlaylistRequest {
    playlist_id: Option<String>,
}

impl PlaylistRequest {
    pub(crate) fn playlist_id(self) -> Result<String, ApiError> {
        required(self.playlist_id, "Playlist ID")
    }
}

#[derive(Deserialize)]
pub(crate) struct DownloadRequest {
    video_id: Option<String>,
    title: Option<String>,
}

impl DownloadRequest {
    /// Returns `(video_id, title)`.
    pub(crate) fn validate(self) -> Result<(String, String), ApiError> {
        Ok((
            required(self.video_id, "Video ID")?,
            or_default(self.title, DEFAULT_TRACK_TITLE),
        ))
    }
}

#[derive(Deserialize)]
pub(crate) struct AlbumDownloadRequest {
    playlist_id: Option<String>,
    album_title: Option<String>,
}

impl AlbumDownloadRequest {
    /// Returns `(playlist_id, album_title)`.
    pub(crate) fn validate(self) -> Result<(String, String), ApiError> {
        Ok((
            required(self.playlist_id, "Playlist ID")?,
            or_default(self.album_title, DEFAULT_ALBUM_TITLE),
        ))
    }
}

#[derive(Serialize)]
pub(crate) struct ResultsResponse<T> {
    pub(crate) results: Vec<T>,
}

#[derive(Serialize)]
pub(crate) struct TracksResponse<T> {
    pub(crate) tracks: Vec<T>,
}

#[derive(Serialize)]
pub(crate) struct StatusResponse {
    pub(crate) status: &'static str,
    pub(crate) message: &'static str,
}

#[derive(Serialize)]
pub(crate) struct DownloadResponse {
    success: bool,
    file_path: String,
    file_size: u64,
}

impl From<AcquiredTrack> for DownloadResponse {
    fn from(track: AcquiredTrack) -> Self {
        Self {
            success: true,
            file_path: track.relative_path,
            file_size: track.file_size,
        }
    }
}

#[derive(Serialize)]
pub(crate) struct DownloadedFile {
    title: String,
    file_path: String,
    progress: String,
}

#[derive(Serialize)]
pub(crate) struct AlbumDownloadResponse {
    success: bool,
    album_folder: String,
    downloaded_files: Vec<DownloadedFile>,
    total_tracks: usize,
}

impl From<BatchManifest> for AlbumDownloadResponse {
    fn from(manifest: BatchManifest) -> Self {
        let downloaded_files = manifest
            .results
            .into_iter()
            .map(|result| DownloadedFile {
                progress: result.progress(),
                title: result.title,
                file_path: result.relative_path,
            })
            .collect();

        Self {
            success: true,
            album_folder: manifest.folder_name,
            downloaded_files,
            total_tracks: manifest.total_tracks,
        }
    }
}
