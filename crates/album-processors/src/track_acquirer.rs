use crate::sanitizer::sanitize;
use crate::traits::{MediaEncoder, MediaEncoderError, MediaProvider, MediaProviderError};
use crate::types::{AcquiredTrack, EncodeRequest, TrackDescriptor};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

const SCRATCH_FILE_STEM: &str = "source";

#[derive(Debug, thiserror::Error)]
pub enum AcquireError {
    #[error("Track title {0:?} does not produce a usable file name")]
    EmptyFileName(String),
    #[error(transparent)]
    MediaProviderError(#[from] MediaProviderError),
    #[error(transparent)]
    MediaEncoderError(#[from] MediaEncoderError),
    #[error("Unable to create scratch directory {}: {source}", path.display())]
    ScratchDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Encoder produced no output at {}", .0.display())]
    MissingOutput(PathBuf),
}

pub struct TrackAcquirer {
    media_provider: Arc<dyn MediaProvider>,
    media_encoder: Arc<dyn MediaEncoder>,
    download_root: PathBuf,
}

impl TrackAcquirer {
    pub fn new(
        media_provider: Arc<dyn MediaProvider>,
        media_encoder: Arc<dyn MediaEncoder>,
        download_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            media_provider,
            media_encoder,
            download_root: download_root.into(),
        }
    }

    pub fn download_root(&self) -> &Path {
        &self.download_root
    }

    /// Fetches and encodes one track into `<root>/<folder>/<sanitized title>.<ext>`.
    ///
    /// `folder` is relative to the download root and must already exist; pass an
    /// empty string to write into the root itself. The output file existing on
    /// disk afterwards is what counts as success, not the encoder's own verdict.
    pub async fn acquire(
        &self,
        track: &TrackDescriptor,
        folder: &str,
        album: Option<&str>,
    ) -> Result<AcquiredTrack, AcquireError> {
        let file_stem = sanitize(&track.title);

        if file_stem.is_empty() {
            return Err(AcquireError::EmptyFileName(track.title.clone()));
        }

        let directory = if folder.is_empty() {
            self.download_root.clone()
        } else {
            self.download_root.join(folder)
        };
        let file_name = format!("{}.{}", file_stem, self.media_encoder.extension());
        let output_path = directory.join(&file_name);
        let relative_path = if folder.is_empty() {
            file_name
        } else {
            format!("{}/{}", folder, file_name)
        };

        let source_url = if track.source_url.is_empty() {
            self.media_provider.track_url(&track.id)
        } else {
            track.source_url.clone()
        };

        let request = EncodeRequest {
            output_path: output_path.clone(),
            title: track.title.clone(),
            artist: track.author.clone(),
            album: album.map(String::from),
            artwork_url: Some(track.thumbnail_url.clone()).filter(|url| !url.is_empty()),
        };

        let scratch_directory = directory.join(format!(".{}", Uuid::new_v4()));
        tokio::fs::create_dir(&scratch_directory)
            .await
            .map_err(|source| AcquireError::ScratchDirectory {
                path: scratch_directory.clone(),
                source,
            })?;

        let encoded = self
            .fetch_and_encode(&track.id, &source_url, &scratch_directory, &request)
            .await;

        if let Err(error) = tokio::fs::remove_dir_all(&scratch_directory).await {
            if error.kind() != ErrorKind::NotFound {
                warn!(?error, path = %scratch_directory.display(), "Unable to remove scratch directory");
            }
        }

        encoded?;

        let file_size = match tokio::fs::metadata(&output_path).await {
            Ok(metadata) if metadata.is_file() => metadata.len(),
            _ => return Err(AcquireError::MissingOutput(output_path)),
        };

        info!(track_id = %track.id, %relative_path, file_size, "Track acquired");

        Ok(AcquiredTrack {
            title: track.title.clone(),
            relative_path,
            file_size,
        })
    }

    /// Everything the provider and encoder leave behind stays inside `scratch_directory`.
    async fn fetch_and_encode(
        &self,
        track_id: &str,
        source_url: &str,
        scratch_directory: &Path,
        request: &EncodeRequest,
    ) -> Result<(), AcquireError> {
        debug!(track_id, source_url, "Fetching audio stream");

        let stream = self
            .media_provider
            .fetch_audio(source_url, scratch_directory, SCRATCH_FILE_STEM)
            .await?;

        debug!(track_id, output_path = %request.output_path.display(), "Encoding audio stream");

        self.media_encoder.encode(&stream, request).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{MediaEncoderMock, MediaProviderMock};

    fn track(id: &str, title: &str) -> TrackDescriptor {
        TrackDescriptor {
            id: id.into(),
            title: title.into(),
            source_url: format!("https://media.test/watch/{}", id),
            thumbnail_url: format!("https://media.test/thumb/{}.jpg", id),
            duration_seconds: 200,
            author: "Robert Miles".into(),
        }
    }

    fn file_names(path: &Path) -> Vec<String> {
        let mut names: Vec<_> = std::fs::read_dir(path)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    struct Fixture {
        root: tempfile::TempDir,
        provider: Arc<MediaProviderMock>,
        encoder: Arc<MediaEncoderMock>,
        acquirer: TrackAcquirer,
    }

    fn fixture() -> Fixture {
        let root = tempfile::tempdir().unwrap();
        let provider = Arc::new(MediaProviderMock::default());
        let encoder = Arc::new(MediaEncoderMock::default());
        let acquirer = TrackAcquirer::new(
            Arc::clone(&provider) as Arc<dyn MediaProvider>,
            Arc::clone(&encoder) as Arc<dyn MediaEncoder>,
            root.path(),
        );

        Fixture {
            root,
            provider,
            encoder,
            acquirer,
        }
    }

    #[actix_rt::test]
    async fn should_write_sanitized_file_into_download_root() {
        let fixture = fixture();

        let acquired = fixture
            .acquirer
            .acquire(&track("v1", "Song: A!"), "", None)
            .await
            .unwrap();

        assert_eq!(
            acquired,
            AcquiredTrack {
                title: "Song: A!".into(),
                relative_path: "Song A.mp3".into(),
                file_size: "https://media.test/watch/v1".len() as u64,
            }
        );
        assert_eq!(file_names(fixture.root.path()), vec!["Song A.mp3"]);
    }

    #[actix_rt::test]
    async fn should_embed_track_metadata_and_artwork() {
        let fixture = fixture();
        std::fs::create_dir(fixture.root.path().join("Dreamland")).unwrap();

        let acquired = fixture
            .acquirer
            .acquire(&track("v1", "Children"), "Dreamland", Some("Dreamland"))
            .await
            .unwrap();

        assert_eq!(acquired.relative_path, "Dreamland/Children.mp3");
        assert_eq!(
            fixture.encoder.requests(),
            vec![EncodeRequest {
                output_path: fixture.root.path().join("Dreamland").join("Children.mp3"),
                title: "Children".into(),
                artist: "Robert Miles".into(),
                album: Some("Dreamland".into()),
                artwork_url: Some("https://media.test/thumb/v1.jpg".into()),
            }]
        );
    }

    #[actix_rt::test]
    async fn should_fall_back_to_provider_url_when_source_url_is_missing() {
        let fixture = fixture();
        let track = TrackDescriptor {
            source_url: String::new(),
            thumbnail_url: String::new(),
            ..track("v1", "Children")
        };

        let acquired = fixture.acquirer.acquire(&track, "", None).await.unwrap();

        assert_eq!(acquired.file_size, "https://media.test/watch/v1".len() as u64);
        assert_eq!(fixture.encoder.requests()[0].artwork_url, None);
    }

    #[actix_rt::test]
    async fn should_fail_when_title_sanitizes_to_nothing() {
        let fixture = fixture();

        let result = fixture.acquirer.acquire(&track("v1", "???"), "", None).await;

        assert!(matches!(result, Err(AcquireError::EmptyFileName(_))));
        assert!(fixture.encoder.requests().is_empty());
    }

    #[actix_rt::test]
    async fn should_fail_when_stream_is_unavailable() {
        let fixture = fixture();
        fixture.provider.break_stream("v1");

        let result = fixture.acquirer.acquire(&track("v1", "Children"), "", None).await;

        assert!(matches!(result, Err(AcquireError::MediaProviderError(_))));
        assert!(file_names(fixture.root.path()).is_empty());
    }

    #[actix_rt::test]
    async fn should_remove_partial_download_when_fetch_is_interrupted() {
        let fixture = fixture();
        fixture.provider.interrupt_stream("v1");

        for _ in 0..3 {
            let result = fixture.acquirer.acquire(&track("v1", "Children"), "", None).await;

            assert!(matches!(result, Err(AcquireError::MediaProviderError(_))));
        }

        assert!(file_names(fixture.root.path()).is_empty());
        assert!(fixture.encoder.requests().is_empty());
    }

    #[actix_rt::test]
    async fn should_fail_when_destination_folder_is_missing() {
        let fixture = fixture();

        let result = fixture
            .acquirer
            .acquire(&track("v1", "Children"), "Dreamland", Some("Dreamland"))
            .await;

        assert!(matches!(result, Err(AcquireError::ScratchDirectory { .. })));
    }

    #[actix_rt::test]
    async fn should_fail_and_clean_up_when_encoder_fails() {
        let fixture = fixture();
        fixture.encoder.fail_on("Children");

        let result = fixture.acquirer.acquire(&track("v1", "Children"), "", None).await;

        assert!(matches!(result, Err(AcquireError::MediaEncoderError(_))));
        assert!(file_names(fixture.root.path()).is_empty());
    }

    #[actix_rt::test]
    async fn should_fail_when_encoder_reports_success_without_output() {
        let fixture = fixture();
        fixture.encoder.produce_nothing_on("Children");

        let result = fixture.acquirer.acquire(&track("v1", "Children"), "", None).await;

        assert!(matches!(result, Err(AcquireError::MissingOutput(_))));
        assert!(file_names(fixture.root.path()).is_empty());
    }

    #[actix_rt::test]
    async fn should_overwrite_file_with_same_sanitized_name() {
        let fixture = fixture();

        fixture
            .acquirer
            .acquire(&track("v1", "Children?"), "", None)
            .await
            .unwrap();
        let acquired = fixture
            .acquirer
            .acquire(&track("v22", "Children!"), "", None)
            .await
            .unwrap();

        assert_eq!(acquired.file_size, "https://media.test/watch/v22".len() as u64);
        assert_eq!(file_names(fixture.root.path()), vec!["Children.mp3"]);
    }
}
