use album_processors::{
    AudioStream, MediaCollection, MediaEntry, MediaProvider, MediaProviderError,
};
use async_trait::async_trait;
use media_providers::{VideoInfo, YtDlpClient};
use std::path::Path;

pub(crate) struct YtDlpMediaProvider(pub(crate) YtDlpClient);

impl YtDlpMediaProvider {
    pub(crate) fn create(executable: &str) -> Self {
        Self(YtDlpClient::create(executable))
    }
}

fn into_media_entry(info: VideoInfo) -> MediaEntry {
    let thumbnail = info.thumbnail_url().map(String::from);

    MediaEntry {
        id: info.id,
        title: info.title,
        url: info.url,
        webpage_url: info.webpage_url,
        thumbnail,
        duration: info.duration,
        uploader: info.uploader,
        channel: info.channel,
        channel_id: info.channel_id,
    }
}

fn into_media_collection(info: VideoInfo) -> MediaCollection {
    if !info.is_playlist() {
        // A fully extracted video carries a stream url; the page is what gets downloaded.
        let entry = MediaEntry {
            url: info.webpage_url.clone(),
            ..into_media_entry(info.clone())
        };

        return MediaCollection {
            id: info.id,
            title: info.title,
            uploader: info.uploader,
            channel: info.channel,
            thumbnail: entry.thumbnail.clone(),
            thumbnails: Vec::new(),
            entries: vec![Some(entry)],
        };
    }

    let thumbnails = info
        .thumbnails
        .iter()
        .flatten()
        .filter_map(|thumbnail| thumbnail.url.clone())
        .collect();

    MediaCollection {
        id: info.id,
        title: info.title,
        uploader: info.uploader,
        channel: info.channel,
        thumbnail: info.thumbnail,
        thumbnails,
        entries: info
            .entries
            .unwrap_or_default()
            .into_iter()
            .map(|entry| entry.map(into_media_entry))
            .collect(),
    }
}

#[async_trait]
impl MediaProvider for YtDlpMediaProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<MediaEntry>, MediaProviderError> {
        let results = self
            .0
            .search(query, limit)
            .await
            .map_err(MediaProviderError::new)?;

        Ok(results.into_iter().map(into_media_entry).collect())
    }

    async fn channel_releases(
        &self,
        channel_id: &str,
    ) -> Result<Vec<MediaEntry>, MediaProviderError> {
        let releases = self
            .0
            .channel_releases(channel_id)
            .await
            .map_err(MediaProviderError::new)?;

        Ok(releases.into_iter().map(into_media_entry).collect())
    }

    async fn playlist(&self, playlist_id: &str) -> Result<MediaCollection, MediaProviderError> {
        let info = self
            .0
            .playlist(playlist_id)
            .await
            .map_err(MediaProviderError::new)?;

        Ok(into_media_collection(info))
    }

    async fn fetch_audio(
        &self,
        source_url: &str,
        directory: &Path,
        file_stem: &str,
    ) -> Result<AudioStream, MediaProviderError> {
        let path = self
            .0
            .download_audio(source_url, directory, file_stem)
            .await
            .map_err(MediaProviderError::new)?;

        Ok(AudioStream { path })
    }

    fn track_url(&self, track_id: &str) -> String {
        YtDlpClient::video_url(track_id)
    }
}
