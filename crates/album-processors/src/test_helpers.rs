use crate::traits::{MediaEncoder, MediaEncoderError, MediaProvider, MediaProviderError};
use crate::types::{AudioStream, EncodeRequest, MediaCollection, MediaEntry};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::io::{Error, ErrorKind};
use std::path::Path;
use std::sync::Mutex;

pub(crate) fn entry(id: &str, title: &str) -> MediaEntry {
    MediaEntry {
        id: Some(id.into()),
        title: Some(title.into()),
        url: Some(format!("https://media.test/watch/{}", id)),
        uploader: Some("Uploader".into()),
        ..MediaEntry::default()
    }
}

pub(crate) fn playlist(title: &str, entries: Vec<MediaEntry>) -> MediaCollection {
    MediaCollection {
        title: Some(title.into()),
        uploader: Some("Artist".into()),
        thumbnail: Some(format!("https://media.test/art/{}.jpg", title)),
        entries: entries.into_iter().map(Some).collect(),
        ..MediaCollection::default()
    }
}

fn not_found(what: &str) -> MediaProviderError {
    MediaProviderError::new(Error::new(ErrorKind::NotFound, what.to_string()))
}

#[derive(Default)]
pub(crate) struct MediaProviderMock {
    searches: Mutex<HashMap<String, Result<Vec<MediaEntry>, String>>>,
    releases: Mutex<HashMap<String, Vec<MediaEntry>>>,
    playlists: Mutex<HashMap<String, Result<MediaCollection, String>>>,
    broken_streams: Mutex<HashSet<String>>,
    interrupted_streams: Mutex<HashSet<String>>,
    search_log: Mutex<Vec<String>>,
}

impl MediaProviderMock {
    pub(crate) fn add_search(&self, query: &str, results: Vec<MediaEntry>) {
        self.searches
            .lock()
            .unwrap()
            .insert(query.into(), Ok(results));
    }

    pub(crate) fn fail_search(&self, query: &str) {
        self.searches
            .lock()
            .unwrap()
            .insert(query.into(), Err("search is unavailable".into()));
    }

    pub(crate) fn add_releases(&self, channel_id: &str, releases: Vec<MediaEntry>) {
        self.releases
            .lock()
            .unwrap()
            .insert(channel_id.into(), releases);
    }

    pub(crate) fn add_playlist(&self, playlist_id: &str, collection: MediaCollection) {
        self.playlists
            .lock()
            .unwrap()
            .insert(playlist_id.into(), Ok(collection));
    }

    pub(crate) fn fail_playlist(&self, playlist_id: &str) {
        self.playlists
            .lock()
            .unwrap()
            .insert(playlist_id.into(), Err("malformed playlist".into()));
    }

    pub(crate) fn break_stream(&self, track_id: &str) {
        self.broken_streams
            .lock()
            .unwrap()
            .insert(self.track_url(track_id));
    }

    /// Fetching this track leaves a partial download behind and then fails.
    pub(crate) fn interrupt_stream(&self, track_id: &str) {
        self.interrupted_streams
            .lock()
            .unwrap()
            .insert(self.track_url(track_id));
    }

    pub(crate) fn searched_queries(&self) -> Vec<String> {
        self.search_log.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaProvider for MediaProviderMock {
    async fn search(&self, query: &str, _limit: usize) -> Result<Vec<MediaEntry>, MediaProviderError> {
        self.search_log.lock().unwrap().push(query.into());

        match self.searches.lock().unwrap().get(query) {
            Some(Ok(results)) => Ok(results.clone()),
            Some(Err(error)) => Err(MediaProviderError::new(error.clone())),
            None => Ok(vec![]),
        }
    }

    async fn channel_releases(
        &self,
        channel_id: &str,
    ) -> Result<Vec<MediaEntry>, MediaProviderError> {
        self.releases
            .lock()
            .unwrap()
            .get(channel_id)
            .cloned()
            .ok_or_else(|| not_found(channel_id))
    }

    async fn playlist(&self, playlist_id: &str) -> Result<MediaCollection, MediaProviderError> {
        match self.playlists.lock().unwrap().get(playlist_id) {
            Some(Ok(collection)) => Ok(collection.clone()),
            Some(Err(error)) => Err(MediaProviderError::new(error.clone())),
            None => Err(not_found(playlist_id)),
        }
    }

    async fn fetch_audio(
        &self,
        source_url: &str,
        directory: &Path,
        file_stem: &str,
    ) -> Result<AudioStream, MediaProviderError> {
        let broken = self.broken_streams.lock().unwrap().contains(source_url);
        if broken {
            return Err(MediaProviderError::new("stream is unavailable"));
        }

        let interrupted = self.interrupted_streams.lock().unwrap().contains(source_url);
        if interrupted {
            let partial = directory.join(format!("{}.webm.part", file_stem));
            tokio::fs::write(&partial, b"partial")
                .await
                .map_err(MediaProviderError::new)?;

            return Err(MediaProviderError::new("connection reset"));
        }

        let path = directory.join(format!("{}.webm", file_stem));
        tokio::fs::write(&path, source_url.as_bytes())
            .await
            .map_err(MediaProviderError::new)?;

        Ok(AudioStream { path })
    }

    fn track_url(&self, track_id: &str) -> String {
        format!("https://media.test/watch/{}", track_id)
    }
}

#[derive(Default)]
pub(crate) struct MediaEncoderMock {
    failing_titles: Mutex<HashSet<String>>,
    silent_titles: Mutex<HashSet<String>>,
    requests: Mutex<Vec<EncodeRequest>>,
}

impl MediaEncoderMock {
    /// Encoding of this title returns an error.
    pub(crate) fn fail_on(&self, title: &str) {
        self.failing_titles.lock().unwrap().insert(title.into());
    }

    /// Encoding of this title reports success without producing a file.
    pub(crate) fn produce_nothing_on(&self, title: &str) {
        self.silent_titles.lock().unwrap().insert(title.into());
    }

    pub(crate) fn requests(&self) -> Vec<EncodeRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaEncoder for MediaEncoderMock {
    fn extension(&self) -> &str {
        "mp3"
    }

    async fn encode(
        &self,
        stream: &AudioStream,
        request: &EncodeRequest,
    ) -> Result<(), MediaEncoderError> {
        self.requests.lock().unwrap().push(request.clone());

        if self.failing_titles.lock().unwrap().contains(&request.title) {
            return Err(MediaEncoderError::new("encoder crashed"));
        }

        if self.silent_titles.lock().unwrap().contains(&request.title) {
            return Ok(());
        }

        let raw = tokio::fs::read(&stream.path)
            .await
            .map_err(MediaEncoderError::new)?;
        tokio::fs::write(&request.output_path, raw)
            .await
            .map_err(MediaEncoderError::new)?;

        Ok(())
    }
}
