use serde::Serialize;
use std::path::PathBuf;

/// A single playable item as reported by the media provider.
///
/// Every field is optional because the provider omits keys freely depending on
/// how the item was discovered (flat search result, playlist entry, release tab).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MediaEntry {
    pub id: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub webpage_url: Option<String>,
    pub thumbnail: Option<String>,
    pub duration: Option<f64>,
    pub uploader: Option<String>,
    pub channel: Option<String>,
    pub channel_id: Option<String>,
}

impl MediaEntry {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Uploader name, falling back to the channel name.
    pub fn author(&self) -> &str {
        self.uploader
            .as_deref()
            .filter(|uploader| !uploader.is_empty())
            .or(self.channel.as_deref())
            .unwrap_or_default()
    }

    pub fn duration_seconds(&self) -> u64 {
        match self.duration {
            Some(duration) if duration.is_finite() && duration > 0.0 => duration.round() as u64,
            _ => 0,
        }
    }
}

/// A playlist, channel tab or search result page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MediaCollection {
    pub id: Option<String>,
    pub title: Option<String>,
    pub uploader: Option<String>,
    pub channel: Option<String>,
    pub thumbnail: Option<String>,
    pub thumbnails: Vec<String>,
    pub entries: Vec<Option<MediaEntry>>,
}

impl MediaCollection {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn author(&self) -> &str {
        self.uploader
            .as_deref()
            .filter(|uploader| !uploader.is_empty())
            .or(self.channel.as_deref())
            .unwrap_or_default()
    }

    /// Explicit thumbnail, otherwise the last (largest) one of the list.
    pub fn thumbnail_url(&self) -> &str {
        self.thumbnail
            .as_deref()
            .or_else(|| self.thumbnails.last().map(String::as_str))
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TrackDescriptor {
    pub id: String,
    pub title: String,
    #[serde(rename = "url")]
    pub source_url: String,
    #[serde(rename = "thumbnail")]
    pub thumbnail_url: String,
    #[serde(rename = "duration")]
    pub duration_seconds: u64,
    pub author: String,
}

impl TrackDescriptor {
    /// Builds a descriptor out of a raw entry. Returns `None` for entries without an id.
    pub fn from_entry(entry: &MediaEntry) -> Option<Self> {
        let id = entry.id();

        if id.is_empty() {
            return None;
        }

        let source_url = entry
            .url
            .as_deref()
            .filter(|url| !url.is_empty())
            .or(entry.webpage_url.as_deref())
            .unwrap_or_default();

        Some(Self {
            id: id.to_string(),
            title: entry.title().to_string(),
            source_url: source_url.to_string(),
            thumbnail_url: entry.thumbnail.clone().unwrap_or_default(),
            duration_seconds: entry.duration_seconds(),
            author: entry.author().to_string(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AlbumDescriptor {
    pub id: String,
    pub title: String,
    #[serde(rename = "thumbnail")]
    pub thumbnail_url: String,
    pub author: String,
    pub track_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AcquiredTrack {
    pub title: String,
    pub relative_path: String,
    pub file_size: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadResult {
    pub title: String,
    pub relative_path: String,
    pub sequence_position: usize,
    pub total_in_batch: usize,
}

impl DownloadResult {
    pub fn progress(&self) -> String {
        format!("{}/{}", self.sequence_position, self.total_in_batch)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchManifest {
    pub folder_name: String,
    pub results: Vec<DownloadResult>,
    pub total_tracks: usize,
}

/// Raw audio fetched by the provider, waiting to be encoded.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioStream {
    pub path: PathBuf,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EncodeRequest {
    pub output_path: PathBuf,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub artwork_url: Option<String>,
}
