use crate::traits::{MediaProvider, MediaProviderError};
use crate::types::TrackDescriptor;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ExpandError {
    #[error(transparent)]
    MediaProviderError(#[from] MediaProviderError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExpandedPlaylist {
    pub id: String,
    pub title: String,
    pub author: String,
    pub thumbnail_url: String,
    pub tracks: Vec<TrackDescriptor>,
}

pub struct PlaylistExpander {
    media_provider: Arc<dyn MediaProvider>,
}

impl PlaylistExpander {
    pub fn new(media_provider: Arc<dyn MediaProvider>) -> Self {
        Self { media_provider }
    }

    /// Resolves the playlist and flattens its entries in source order.
    pub async fn expand(&self, playlist_id: &str) -> Result<ExpandedPlaylist, ExpandError> {
        let collection = self.media_provider.playlist(playlist_id).await?;

        let tracks: Vec<_> = collection
            .entries
            .iter()
            .flatten()
            .filter_map(TrackDescriptor::from_entry)
            .map(|mut track| {
                if track.source_url.is_empty() {
                    track.source_url = self.media_provider.track_url(&track.id);
                }
                track
            })
            .collect();

        debug!(
            playlist_id,
            entries = collection.entries.len(),
            tracks = tracks.len(),
            "Playlist expanded"
        );

        Ok(ExpandedPlaylist {
            id: playlist_id.to_string(),
            title: collection.title().to_string(),
            author: collection.author().to_string(),
            thumbnail_url: collection.thumbnail_url().to_string(),
            tracks,
        })
    }

    pub async fn tracks(&self, playlist_id: &str) -> Result<Vec<TrackDescriptor>, ExpandError> {
        Ok(self.expand(playlist_id).await?.tracks)
    }
}
