use crate::types::{AudioStream, EncodeRequest, MediaCollection, MediaEntry};
use async_trait::async_trait;
use std::fmt::Formatter;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub struct MediaProviderError(pub Box<dyn std::error::Error + Send + Sync>);

impl std::fmt::Display for MediaProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl MediaProviderError {
    pub fn new(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(error.into())
    }
}

#[async_trait]
pub trait MediaProvider: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<MediaEntry>, MediaProviderError>;

    async fn channel_releases(
        &self,
        channel_id: &str,
    ) -> Result<Vec<MediaEntry>, MediaProviderError>;

    /// Resolves a playlist id. A single video id resolves to a one-entry collection.
    async fn playlist(&self, playlist_id: &str) -> Result<MediaCollection, MediaProviderError>;

    /// Downloads the best available audio of `source_url` into `directory`
    /// under `file_stem` (the provider picks the extension).
    async fn fetch_audio(
        &self,
        source_url: &str,
        directory: &Path,
        file_stem: &str,
    ) -> Result<AudioStream, MediaProviderError>;

    fn track_url(&self, track_id: &str) -> String;
}

#[derive(Debug, thiserror::Error)]
pub struct MediaEncoderError(pub Box<dyn std::error::Error + Send + Sync>);

impl std::fmt::Display for MediaEncoderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl MediaEncoderError {
    pub fn new(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(error.into())
    }
}

#[async_trait]
pub trait MediaEncoder: Send + Sync {
    /// Extension of the files produced by this encoder, without the dot.
    fn extension(&self) -> &str;

    async fn encode(
        &self,
        stream: &AudioStream,
        request: &EncodeRequest,
    ) -> Result<(), MediaEncoderError>;
}
