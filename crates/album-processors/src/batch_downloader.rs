use crate::playlist_expander::{ExpandError, PlaylistExpander};
use crate::sanitizer::sanitize;
use crate::track_acquirer::TrackAcquirer;
use crate::types::{BatchManifest, DownloadResult};
use futures::{future, stream, StreamExt};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum BatchDownloadError {
    #[error("Unable to create album folder {}: {source}", path.display())]
    CreateFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    ExpandError(#[from] ExpandError),
}

pub struct BatchDownloader {
    playlist_expander: Arc<PlaylistExpander>,
    track_acquirer: Arc<TrackAcquirer>,
    max_parallel_downloads: usize,
}

impl BatchDownloader {
    pub fn new(
        playlist_expander: Arc<PlaylistExpander>,
        track_acquirer: Arc<TrackAcquirer>,
    ) -> Self {
        Self {
            playlist_expander,
            track_acquirer,
            max_parallel_downloads: 1,
        }
    }

    /// Number of tracks acquired at the same time. `1` keeps the batch strictly sequential.
    pub fn with_max_parallel_downloads(mut self, max_parallel_downloads: usize) -> Self {
        self.max_parallel_downloads = max_parallel_downloads.max(1);
        self
    }

    /// Downloads every track of the playlist into a folder named after the album.
    ///
    /// A track that fails is logged and left out of the manifest; it never stops
    /// the remaining tracks. Results keep playlist order whatever the parallelism.
    pub async fn download_album(
        &self,
        playlist_id: &str,
        album_title: &str,
    ) -> Result<BatchManifest, BatchDownloadError> {
        let folder_name = sanitize(album_title);
        let folder_path = self.track_acquirer.download_root().join(&folder_name);

        tokio::fs::create_dir_all(&folder_path)
            .await
            .map_err(|source| BatchDownloadError::CreateFolder {
                path: folder_path.clone(),
                source,
            })?;

        let tracks = self.playlist_expander.tracks(playlist_id).await?;
        let total_tracks = tracks.len();

        info!(
            playlist_id,
            %folder_name,
            total_tracks,
            "Downloading album"
        );

        let folder = folder_name.as_str();
        let results: Vec<DownloadResult> = stream::iter(tracks.into_iter().enumerate())
            .map(|(index, mut track)| {
                let position = index + 1;

                if track.title.is_empty() {
                    track.title = format!("Track {}", position);
                }

                async move {
                    match self
                        .track_acquirer
                        .acquire(&track, folder, Some(album_title))
                        .await
                    {
                        Ok(acquired) => {
                            let progress = format!("{}/{}", position, total_tracks);
                            info!(
                                playlist_id,
                                %progress,
                                path = %acquired.relative_path,
                                "Album track downloaded"
                            );

                            Some(DownloadResult {
                                title: acquired.title,
                                relative_path: acquired.relative_path,
                                sequence_position: position,
                                total_in_batch: total_tracks,
                            })
                        }
                        Err(error) => {
                            warn!(
                                playlist_id,
                                position,
                                title = %track.title,
                                %error,
                                "Album track download failed, skipping"
                            );

                            None
                        }
                    }
                }
            })
            .buffered(self.max_parallel_downloads)
            .filter_map(future::ready)
            .collect()
            .await;

        info!(
            playlist_id,
            downloaded = results.len(),
            total_tracks,
            "Album download finished"
        );

        Ok(BatchManifest {
            folder_name,
            results,
            total_tracks,
        })
    }
}
