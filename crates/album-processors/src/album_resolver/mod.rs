mod strategies;
pub use strategies::*;


use crate::playlist_expander::PlaylistExpander;
use crate::traits::{MediaProvider, MediaProviderError};
use crate::types::AlbumDescriptor;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

const DEFAULT_ALBUM_ID_MARKER: &str = "OLAK5uy_";

/// Decides whether a playlist id denotes an official album release.
///
/// The provider exposes no explicit flag for this, so the decision is made on a
/// substring of the id. An empty marker accepts every non-empty id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlbumIdMatcher {
    marker: String,
}

impl AlbumIdMatcher {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn matches(&self, playlist_id: &str) -> bool {
        !playlist_id.is_empty() && playlist_id.contains(&self.marker)
    }
}

impl Default for AlbumIdMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_ALBUM_ID_MARKER)
    }
}

#[derive(Clone, Debug)]
pub struct ResolverOptions {
    pub max_results: usize,
    pub search_limit: usize,
    pub album_matcher: AlbumIdMatcher,
    /// Suffixes appended to the query by the keyword search.
    pub album_keywords: Vec<String>,
    /// Title fragments marking a single video as a full album upload.
    pub full_album_title_keywords: Vec<String>,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            max_results: 10,
            search_limit: 10,
            album_matcher: AlbumIdMatcher::default(),
            album_keywords: vec!["official album".into(), "full album playlist".into()],
            full_album_title_keywords: [
                "full album",
                "full ep",
                "album completo",
                "álbum completo",
                "album complet",
                "album intégral",
                "komplettes album",
                "ganzes album",
                "полный альбом",
                "tam albüm",
                "フルアルバム",
                "完整专辑",
                "전곡",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// Albums found so far, deduplicated by id and capped.
#[derive(Debug)]
pub struct AlbumAccumulator {
    albums: Vec<AlbumDescriptor>,
    seen: HashSet<String>,
    capacity: usize,
}

impl AlbumAccumulator {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            albums: vec![],
            seen: HashSet::new(),
            capacity,
        }
    }

    /// Adds the album unless it is a duplicate, the accumulator is full, or the
    /// album has no title or no tracks. Returns whether it was added.
    pub fn push(&mut self, album: AlbumDescriptor) -> bool {
        if self.is_full()
            || album.title.is_empty()
            || album.track_count == 0
            || self.seen.contains(&album.id)
        {
            return false;
        }

        self.seen.insert(album.id.clone());
        self.albums.push(album);

        true
    }

    pub fn contains(&self, album_id: &str) -> bool {
        self.seen.contains(album_id)
    }

    pub fn is_full(&self) -> bool {
        self.albums.len() >= self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }

    pub fn len(&self) -> usize {
        self.albums.len()
    }

    pub fn into_albums(self) -> Vec<AlbumDescriptor> {
        self.albums
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error(transparent)]
    MediaProviderError(#[from] MediaProviderError),
}

#[async_trait]
pub trait DiscoveryStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn should_run(&self, found: &AlbumAccumulator) -> bool {
        !found.is_full()
    }

    async fn discover(
        &self,
        query: &str,
        found: &mut AlbumAccumulator,
    ) -> Result<(), DiscoveryError>;
}

/// Expands `playlist_id` and records it as an album if it is a valid one.
/// Failures are logged and swallowed. Returns whether the album was added.
pub(crate) async fn collect_album(
    playlist_expander: &PlaylistExpander,
    playlist_id: &str,
    found: &mut AlbumAccumulator,
) -> bool {
    if found.contains(playlist_id) || found.is_full() {
        return false;
    }

    let playlist = match playlist_expander.expand(playlist_id).await {
        Ok(playlist) => playlist,
        Err(error) => {
            warn!(playlist_id, ?error, "Unable to resolve album candidate");
            return false;
        }
    };

    let title = playlist.title.clone();
    let track_count = playlist.tracks.len();

    let added = found.push(AlbumDescriptor {
        id: playlist.id,
        title: playlist.title,
        thumbnail_url: playlist.thumbnail_url,
        author: playlist.author,
        track_count,
    });

    if added {
        info!(playlist_id, %title, tracks = track_count, "Found album");
    } else {
        debug!(playlist_id, %title, tracks = track_count, "Album candidate rejected");
    }

    added
}

pub struct QueryResolver {
    strategies: Vec<Box<dyn DiscoveryStrategy>>,
    max_results: usize,
}

impl QueryResolver {
    /// Resolver running channel releases, keyword search and title heuristic, in that order.
    pub fn new(
        media_provider: Arc<dyn MediaProvider>,
        playlist_expander: Arc<PlaylistExpander>,
        options: ResolverOptions,
    ) -> Self {
        let strategies: Vec<Box<dyn DiscoveryStrategy>> = vec![
            Box::new(ChannelReleasesStrategy::new(
                Arc::clone(&media_provider),
                Arc::clone(&playlist_expander),
                options.album_matcher.clone(),
            )),
            Box::new(KeywordSearchStrategy::new(
                Arc::clone(&media_provider),
                Arc::clone(&playlist_expander),
                options.album_matcher.clone(),
                options.album_keywords.clone(),
                options.search_limit,
            )),
            Box::new(TitleHeuristicStrategy::new(
                media_provider,
                playlist_expander,
                options.full_album_title_keywords.clone(),
                options.search_limit,
            )),
        ];

        Self::with_strategies(strategies, options.max_results)
    }

    pub fn with_strategies(
        strategies: Vec<Box<dyn DiscoveryStrategy>>,
        max_results: usize,
    ) -> Self {
        Self {
            strategies,
            max_results: max_results.max(1),
        }
    }

    /// Never fails: strategy errors are logged and whatever was found is returned.
    pub async fn resolve_albums(&self, query: &str) -> Vec<AlbumDescriptor> {
        let mut found = AlbumAccumulator::with_capacity(self.max_results);

        for strategy in &self.strategies {
            let strategy_name = strategy.name();

            if !strategy.should_run(&found) {
                debug!(query, strategy_name, "Skipping discovery strategy");
                continue;
            }

            let before = found.len();

            match strategy.discover(query, &mut found).await {
                Ok(()) => {
                    debug!(
                        query,
                        strategy_name,
                        added = found.len() - before,
                        "Discovery strategy finished"
                    );
                }
                Err(error) => {
                    warn!(query, strategy_name, ?error, "Discovery strategy failed");
                }
            }
        }

        info!(query, albums = found.len(), "Albums resolved");

        found.into_albums()
    }
}
