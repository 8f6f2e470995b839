use serde::Deserialize;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Thumbnail {
    pub url: Option<String>,
}

/// Info dictionary printed by `yt-dlp --dump-single-json`.
///
/// The same shape describes videos, playlists, channel tabs and search pages;
/// only the keys the extractor happened to fill are present.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct VideoInfo {
    #[serde(rename = "_type")]
    pub kind: Option<String>,
    pub id: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub webpage_url: Option<String>,
    pub thumbnail: Option<String>,
    pub thumbnails: Option<Vec<Thumbnail>>,
    pub duration: Option<f64>,
    pub uploader: Option<String>,
    pub channel: Option<String>,
    pub channel_id: Option<String>,
    pub entries: Option<Vec<Option<VideoInfo>>>,
}

impl VideoInfo {
    pub fn is_playlist(&self) -> bool {
        self.kind.as_deref() == Some("playlist") || self.entries.is_some()
    }

    /// Explicit thumbnail, otherwise the last one listed (the largest).
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail.as_deref().or_else(|| {
            self.thumbnails
                .as_ref()?
                .iter()
                .rev()
                .find_map(|thumbnail| thumbnail.url.as_deref())
        })
    }

    pub fn into_entries(self) -> Vec<Option<VideoInfo>> {
        self.entries.unwrap_or_default()
    }
}
