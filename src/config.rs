use album_processors::{AlbumIdMatcher, ResolverOptions};
use serde::Deserialize;

fn default_bind_address() -> String {
    "0.0.0.0:5001".to_string()
}

fn default_shutdown_timeout() -> u64 {
    30u64
}

fn default_download_directory() -> String {
    "downloads".to_string()
}

fn default_ytdlp_path() -> String {
    "yt-dlp".to_string()
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_audio_bitrate() -> String {
    "320k".to_string()
}

fn default_official_album_marker() -> String {
    "OLAK5uy_".to_string()
}

fn default_max_album_results() -> usize {
    10
}

fn default_search_results_limit() -> usize {
    10
}

fn default_max_parallel_downloads() -> usize {
    1
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Config {
    #[serde(default = "default_bind_address")]
    pub(crate) bind_address: String,
    #[serde(default = "default_shutdown_timeout")]
    pub(crate) shutdown_timeout: u64,
    #[serde(default = "default_download_directory")]
    pub(crate) download_directory: String,
    #[serde(default = "default_ytdlp_path")]
    pub(crate) ytdlp_path: String,
    #[serde(default = "default_ffmpeg_path")]
    pub(crate) ffmpeg_path: String,
    #[serde(default = "default_audio_bitrate")]
    pub(crate) audio_bitrate: String,
    #[serde(default = "default_official_album_marker")]
    pub(crate) official_album_marker: String,
    #[serde(default = "default_max_album_results")]
    pub(crate) max_album_results: usize,
    #[serde(default = "default_search_results_limit")]
    pub(crate) search_results_limit: usize,
    #[serde(default = "default_max_parallel_downloads")]
    pub(crate) max_parallel_downloads: usize,
}

impl Config {
    pub(crate) fn from_env() -> Self {
        match envy::from_env::<Self>() {
            Ok(config) => config,
            Err(error) => panic!("Invalid environment variable: {:#?}", error),
        }
    }

    /// Zero would make every search return nothing, so it counts as one.
    pub(crate) fn search_limit(&self) -> usize {
        self.search_results_limit.max(1)
    }

    pub(crate) fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            max_results: self.max_album_results.max(1),
            search_limit: self.search_limit(),
            album_matcher: AlbumIdMatcher::new(self.official_album_marker.clone()),
            ..ResolverOptions::default()
        }
    }
}
