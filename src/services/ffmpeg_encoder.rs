use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error, warn};
use uuid::Uuid;

pub(crate) struct FfmpegEncoder {
    executable: String,
    bitrate: String,
    client: reqwest::Client,
}

#[derive(thiserror::Error, Debug)]
pub(crate) enum FfmpegEncoderError {
    #[error("Unable to run ffmpeg: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("ffmpeg exited with status {status:?}: {stderr}")]
    Failed { status: Option<i32>, stderr: String },
}

#[derive(thiserror::Error, Debug)]
pub(crate) enum ArtworkError {
    #[error("Unable to fetch artwork: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unable to save artwork: {0}")]
    Io(#[from] std::io::Error),
}

/// Tags written into the produced mp3.
pub(crate) struct Mp3Tags<'a> {
    pub(crate) title: &'a str,
    pub(crate) artist: &'a str,
    pub(crate) album: Option<&'a str>,
}

impl FfmpegEncoder {
    pub(crate) fn create(executable: &str, bitrate: &str) -> Self {
        Self {
            executable: executable.to_string(),
            bitrate: bitrate.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Transcodes `input` to mp3 at `output`, tagging it and embedding the artwork
    /// behind `artwork_url` when it can be fetched.
    pub(crate) async fn transcode(
        &self,
        input: &Path,
        output: &Path,
        tags: &Mp3Tags<'_>,
        artwork_url: Option<&str>,
    ) -> Result<(), FfmpegEncoderError> {
        let directory = output.parent().unwrap_or_else(|| Path::new("."));

        let artwork = match artwork_url {
            Some(url) => match self.fetch_artwork(url, directory).await {
                Ok(path) => Some(path),
                Err(error) => {
                    warn!(%error, url, "Artwork unavailable, encoding without it");
                    None
                }
            },
            None => None,
        };

        let args = build_args(input, artwork.as_deref(), output, tags, &self.bitrate);

        debug!(executable = %self.executable, ?args, "Running ffmpeg");

        let result = Command::new(&self.executable)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await;

        if let Some(path) = &artwork {
            if let Err(error) = tokio::fs::remove_file(path).await {
                warn!(?error, path = %path.display(), "Unable to remove artwork file");
            }
        }

        let output = result.map_err(FfmpegEncoderError::Spawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!(status = ?output.status.code(), %stderr, "ffmpeg failed");

            return Err(FfmpegEncoderError::Failed {
                status: output.status.code(),
                stderr,
            });
        }

        Ok(())
    }

    async fn fetch_artwork(&self, url: &str, directory: &Path) -> Result<PathBuf, ArtworkError> {
        let bytes = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let path = directory.join(format!(".{}.cover", Uuid::new_v4()));
        tokio::fs::write(&path, &bytes).await?;

        Ok(path)
    }
}

fn build_args(
    input: &Path,
    artwork: Option<&Path>,
    output: &Path,
    tags: &Mp3Tags<'_>,
    bitrate: &str,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-hide_banner".into(),
        "-loglevel".into(),
        "error".into(),
        "-y".into(),
        "-i".into(),
        input.into(),
    ];

    match artwork {
        Some(artwork) => {
            args.extend(
                [
                    "-i",
                    &*artwork.to_string_lossy(),
                    "-map",
                    "0:a:0",
                    "-map",
                    "1:v:0",
                    "-c:v",
                    "mjpeg",
                    "-disposition:v:0",
                    "attached_pic",
                    "-metadata:s:v",
                    "title=Album cover",
                    "-metadata:s:v",
                    "comment=Cover (front)",
                ]
                .into_iter()
                .map(OsString::from),
            );
        }
        None => {
            args.extend(["-map", "0:a:0"].into_iter().map(OsString::from));
        }
    }

    args.extend(
        ["-c:a", "libmp3lame", "-b:a", bitrate, "-id3v2_version", "3"]
            .into_iter()
            .map(OsString::from),
    );

    let mut metadata = vec![
        format!("title={}", tags.title),
        format!("artist={}", tags.artist),
    ];
    if let Some(album) = tags.album {
        metadata.push(format!("album={}", album));
    }
    for entry in metadata {
        args.push("-metadata".into());
        args.push(entry.into());
    }

    args.push(output.into());
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_build_args_without_artwork() {
        let tags = Mp3Tags {
            title: "Children",
            artist: "Robert Miles",
            album: None,
        };

        let args = build_args(
            Path::new("/music/.raw.webm"),
            None,
            Path::new("/music/Children.mp3"),
            &tags,
            "320k",
        );

        assert_eq!(
            strings(args),
            vec![
                "-hide_banner",
                "-loglevel",
                "error",
                "-y",
                "-i",
                "/music/.raw.webm",
                "-map",
                "0:a:0",
                "-c:a",
                "libmp3lame",
                "-b:a",
                "320k",
                "-id3v2_version",
                "3",
                "-metadata",
                "title=Children",
                "-metadata",
                "artist=Robert Miles",
                "/music/Children.mp3",
            ]
        );
    }

    #[test]
    fn test_build_args_with_artwork_and_album() {
        let tags = Mp3Tags {
            title: "Fable",
            artist: "Robert Miles",
            album: Some("Dreamland"),
        };

        let args = strings(build_args(
            Path::new("raw.webm"),
            Some(Path::new(".cover")),
            Path::new("Dreamland/Fable.mp3"),
            &tags,
            "192k",
        ));

        assert_eq!(&args[4..8], &["-i", "raw.webm", "-i", ".cover"]);
        assert!(args.contains(&"attached_pic".to_string()));
        assert!(args.contains(&"192k".to_string()));
        assert_eq!(
            &args[args.len() - 7..],
            &[
                "-metadata",
                "title=Fable",
                "-metadata",
                "artist=Robert Miles",
                "-metadata",
                "album=Dreamland",
                "Dreamland/Fable.mp3",
            ]
        );
    }

    #[actix_rt::test]
    async fn should_fail_when_ffmpeg_cannot_be_spawned() {
        let directory = tempfile::tempdir().unwrap();
        let encoder = FfmpegEncoder::create("/nonexistent/ffmpeg", "320k");
        let tags = Mp3Tags {
            title: "Children",
            artist: "Robert Miles",
            album: None,
        };

        let result = encoder
            .transcode(
                &directory.path().join("raw.webm"),
                &directory.path().join("Children.mp3"),
                &tags,
                None,
            )
            .await;

        assert!(matches!(result, Err(FfmpegEncoderError::Spawn(_))));
    }
}
