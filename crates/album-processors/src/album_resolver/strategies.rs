use super::{collect_album, AlbumAccumulator, AlbumIdMatcher, DiscoveryError, DiscoveryStrategy};
use crate::playlist_expander::PlaylistExpander;
use crate::traits::MediaProvider;
use crate::types::MediaEntry;
use crate::utils::{contains_ignore_case, playlist_id_from_url};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Finds the artist's channel through its best "official" search hit and
/// collects the official albums listed among the channel releases.
pub struct ChannelReleasesStrategy {
    media_provider: Arc<dyn MediaProvider>,
    playlist_expander: Arc<PlaylistExpander>,
    album_matcher: AlbumIdMatcher,
}

impl ChannelReleasesStrategy {
    pub fn new(
        media_provider: Arc<dyn MediaProvider>,
        playlist_expander: Arc<PlaylistExpander>,
        album_matcher: AlbumIdMatcher,
    ) -> Self {
        Self {
            media_provider,
            playlist_expander,
            album_matcher,
        }
    }
}

#[async_trait]
impl DiscoveryStrategy for ChannelReleasesStrategy {
    fn name(&self) -> &'static str {
        "channel_releases"
    }

    async fn discover(
        &self,
        query: &str,
        found: &mut AlbumAccumulator,
    ) -> Result<(), DiscoveryError> {
        let channel_query = format!("{} official", query);
        let best_match = self
            .media_provider
            .search(&channel_query, 1)
            .await?
            .into_iter()
            .next();

        let channel_id = match best_match
            .and_then(|entry| entry.channel_id)
            .filter(|channel_id| !channel_id.is_empty())
        {
            Some(channel_id) => channel_id,
            None => {
                debug!(%channel_query, "No channel found");
                return Ok(());
            }
        };

        debug!(%channel_id, "Listing channel releases");

        let releases = self.media_provider.channel_releases(&channel_id).await?;

        for release in releases {
            if found.is_full() {
                break;
            }

            if self.album_matcher.matches(release.id()) {
                collect_album(&self.playlist_expander, release.id(), found).await;
            }
        }

        Ok(())
    }
}

/// Searches the query combined with album keywords and keeps the results that
/// link to official album playlists. Runs only when nothing was found yet.
pub struct KeywordSearchStrategy {
    media_provider: Arc<dyn MediaProvider>,
    playlist_expander: Arc<PlaylistExpander>,
    album_matcher: AlbumIdMatcher,
    keywords: Vec<String>,
    search_limit: usize,
}

impl KeywordSearchStrategy {
    pub fn new(
        media_provider: Arc<dyn MediaProvider>,
        playlist_expander: Arc<PlaylistExpander>,
        album_matcher: AlbumIdMatcher,
        keywords: Vec<String>,
        search_limit: usize,
    ) -> Self {
        Self {
            media_provider,
            playlist_expander,
            album_matcher,
            keywords,
            search_limit,
        }
    }

    fn album_playlist_id<'a>(&self, entry: &'a MediaEntry) -> Option<&'a str> {
        let from_urls = [entry.url.as_deref(), entry.webpage_url.as_deref()]
            .into_iter()
            .flatten()
            .filter_map(playlist_id_from_url);

        std::iter::once(entry.id())
            .chain(from_urls)
            .find(|id| self.album_matcher.matches(id))
    }
}

#[async_trait]
impl DiscoveryStrategy for KeywordSearchStrategy {
    fn name(&self) -> &'static str {
        "keyword_search"
    }

    fn should_run(&self, found: &AlbumAccumulator) -> bool {
        found.is_empty()
    }

    async fn discover(
        &self,
        query: &str,
        found: &mut AlbumAccumulator,
    ) -> Result<(), DiscoveryError> {
        for keyword in &self.keywords {
            if found.is_full() {
                break;
            }

            let search_query = format!("{} {}", query, keyword);
            let results = match self
                .media_provider
                .search(&search_query, self.search_limit)
                .await
            {
                Ok(results) => results,
                Err(error) => {
                    warn!(%search_query, ?error, "Album keyword search failed");
                    continue;
                }
            };

            for entry in &results {
                if found.is_full() {
                    break;
                }

                if let Some(playlist_id) = self.album_playlist_id(entry) {
                    collect_album(&self.playlist_expander, playlist_id, found).await;
                }
            }
        }

        Ok(())
    }
}

/// Last resort: single videos whose title announces a full album upload.
/// Each one becomes an album of one track.
pub struct TitleHeuristicStrategy {
    media_provider: Arc<dyn MediaProvider>,
    playlist_expander: Arc<PlaylistExpander>,
    title_keywords: Vec<String>,
    search_limit: usize,
}

impl TitleHeuristicStrategy {
    pub fn new(
        media_provider: Arc<dyn MediaProvider>,
        playlist_expander: Arc<PlaylistExpander>,
        title_keywords: Vec<String>,
        search_limit: usize,
    ) -> Self {
        Self {
            media_provider,
            playlist_expander,
            title_keywords,
            search_limit,
        }
    }

    fn is_full_album_upload(&self, entry: &MediaEntry) -> bool {
        !entry.id().is_empty()
            && self
                .title_keywords
                .iter()
                .any(|keyword| contains_ignore_case(entry.title(), keyword))
    }
}

#[async_trait]
impl DiscoveryStrategy for TitleHeuristicStrategy {
    fn name(&self) -> &'static str {
        "title_heuristic"
    }

    fn should_run(&self, found: &AlbumAccumulator) -> bool {
        found.is_empty()
    }

    async fn discover(
        &self,
        query: &str,
        found: &mut AlbumAccumulator,
    ) -> Result<(), DiscoveryError> {
        let results = self
            .media_provider
            .search(query, self.search_limit)
            .await?;

        for entry in results.iter().filter(|entry| self.is_full_album_upload(entry)) {
            if found.is_full() {
                break;
            }

            collect_album(&self.playlist_expander, entry.id(), found).await;
        }

        Ok(())
    }
}
