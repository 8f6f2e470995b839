use crate::config::Config;
use album_processors::{
    AcquireError, AcquiredTrack, AlbumDescriptor, BatchDownloadError, BatchDownloader,
    BatchManifest, ExpandError, MediaEncoder, MediaProvider, MediaProviderError,
    PlaylistExpander, QueryResolver, TrackAcquirer, TrackDescriptor,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(thiserror::Error, Debug)]
pub(crate) enum AlbumServiceError {
    #[error("Search failed: {0}")]
    MediaProviderError(#[from] MediaProviderError),
    #[error("Unable to load playlist: {0}")]
    ExpandError(#[from] ExpandError),
    #[error("Download failed: {0}")]
    AcquireError(#[from] AcquireError),
    #[error("Album download failed: {0}")]
    BatchDownloadError(#[from] BatchDownloadError),
}

pub(crate) type AlbumServiceResult<T> = Result<T, AlbumServiceError>;

/// Everything the HTTP layer needs, wired once at startup.
pub(crate) struct AlbumService {
    media_provider: Arc<dyn MediaProvider>,
    playlist_expander: Arc<PlaylistExpander>,
    query_resolver: QueryResolver,
    track_acquirer: Arc<TrackAcquirer>,
    batch_downloader: BatchDownloader,
    search_limit: usize,
}

impl AlbumService {
    pub(crate) fn create(
        media_provider: Arc<dyn MediaProvider>,
        media_encoder: Arc<dyn MediaEncoder>,
        config: &Config,
    ) -> Self {
        let playlist_expander = Arc::new(PlaylistExpander::new(Arc::clone(&media_provider)));
        let track_acquirer = Arc::new(TrackAcquirer::new(
            Arc::clone(&media_provider),
            media_encoder,
            &config.download_directory,
        ));
        let query_resolver = QueryResolver::new(
            Arc::clone(&media_provider),
            Arc::clone(&playlist_expander),
            config.resolver_options(),
        );
        let batch_downloader =
            BatchDownloader::new(Arc::clone(&playlist_expander), Arc::clone(&track_acquirer))
                .with_max_parallel_downloads(config.max_parallel_downloads);

        Self {
            media_provider,
            playlist_expander,
            query_resolver,
            track_acquirer,
            batch_downloader,
            search_limit: config.search_limit(),
        }
    }

    pub(crate) fn download_root(&self) -> &Path {
        self.track_acquirer.download_root()
    }

    pub(crate) async fn search_tracks(
        &self,
        query: &str,
    ) -> AlbumServiceResult<Vec<TrackDescriptor>> {
        let entries = self.media_provider.search(query, self.search_limit).await?;

        Ok(entries
            .iter()
            .filter_map(TrackDescriptor::from_entry)
            .map(|mut track| {
                if track.source_url.is_empty() {
                    track.source_url = self.media_provider.track_url(&track.id);
                }
                track
            })
            .collect())
    }

    pub(crate) async fn search_albums(&self, query: &str) -> Vec<AlbumDescriptor> {
        self.query_resolver.resolve_albums(query).await
    }

    pub(crate) async fn album_tracks(
        &self,
        playlist_id: &str,
    ) -> AlbumServiceResult<Vec<TrackDescriptor>> {
        Ok(self.playlist_expander.tracks(playlist_id).await?)
    }

    /// Downloads a single video into the download root under `title`.
    ///
    /// Artist and artwork come from the video's own metadata when the provider
    /// can resolve it; otherwise the file is written untagged apart from the title.
    pub(crate) async fn download_track(
        &self,
        video_id: &str,
        title: &str,
    ) -> AlbumServiceResult<AcquiredTrack> {
        let resolved = match self.playlist_expander.tracks(video_id).await {
            Ok(tracks) => tracks.into_iter().find(|track| track.id == video_id),
            Err(error) => {
                warn!(video_id, %error, "Unable to resolve video metadata");
                None
            }
        };

        let track = TrackDescriptor {
            title: title.to_string(),
            ..resolved.unwrap_or_else(|| TrackDescriptor {
                id: video_id.to_string(),
                title: String::new(),
                source_url: self.media_provider.track_url(video_id),
                thumbnail_url: String::new(),
                duration_seconds: 0,
                author: String::new(),
            })
        };

        let acquired = self.track_acquirer.acquire(&track, "", None).await?;

        info!(video_id, path = %acquired.relative_path, "Single track downloaded");

        Ok(acquired)
    }

    pub(crate) async fn download_album(
        &self,
        playlist_id: &str,
        album_title: &str,
    ) -> AlbumServiceResult<BatchManifest> {
        Ok(self
            .batch_downloader
            .download_album(playlist_id, album_title)
            .await?)
    }
}
