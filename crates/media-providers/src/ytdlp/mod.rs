mod parser;
mod types;


pub use types::*;

use parser::{parse_downloaded_path, parse_video_info};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error};

const YOUTUBE_HOST: &str = "https://www.youtube.com";
const DEFAULT_EXTRACTOR_ARGS: &str = "youtube:player_client=android,web";
const VIDEO_ID_LENGTH: usize = 11;

#[derive(Debug, thiserror::Error)]
pub enum YtDlpError {
    #[error("Unable to run yt-dlp: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("yt-dlp exited with status {status:?}: {stderr}")]
    Failed { status: Option<i32>, stderr: String },
    #[error("Unable to parse yt-dlp output: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("yt-dlp did not report the downloaded file")]
    MissingOutput,
}

pub type YtDlpResult<T> = Result<T, YtDlpError>;

pub struct YtDlpClient {
    executable: String,
    extractor_args: String,
}

impl YtDlpClient {
    pub fn create(executable: &str) -> Self {
        Self {
            executable: executable.to_string(),
            extractor_args: DEFAULT_EXTRACTOR_ARGS.to_string(),
        }
    }

    pub fn video_url(video_id: &str) -> String {
        format!("{}/watch?v={}", YOUTUBE_HOST, video_id)
    }

    /// Playlist page for playlist ids, watch page for bare video ids.
    pub fn playlist_url(id: &str) -> String {
        if is_video_id(id) {
            Self::video_url(id)
        } else {
            format!("{}/playlist?list={}", YOUTUBE_HOST, id)
        }
    }

    pub fn channel_releases_url(channel_id: &str) -> String {
        format!("{}/channel/{}/releases", YOUTUBE_HOST, channel_id)
    }

    pub async fn search(&self, query: &str, limit: usize) -> YtDlpResult<Vec<VideoInfo>> {
        let page = self
            .extract_flat(&format!("ytsearch{}:{}", limit, query))
            .await?;

        Ok(page.into_entries().into_iter().flatten().collect())
    }

    pub async fn channel_releases(&self, channel_id: &str) -> YtDlpResult<Vec<VideoInfo>> {
        let tab = self
            .extract_flat(&Self::channel_releases_url(channel_id))
            .await?;

        Ok(tab.into_entries().into_iter().flatten().collect())
    }

    /// Flat info of a playlist. For a video id this is the info of the video itself.
    pub async fn playlist(&self, id: &str) -> YtDlpResult<VideoInfo> {
        self.extract_flat(&Self::playlist_url(id)).await
    }

    /// Downloads the best audio-only format of `url` as `<directory>/<file_stem>.<ext>`
    /// and returns the final path.
    pub async fn download_audio(
        &self,
        url: &str,
        directory: &Path,
        file_stem: &str,
    ) -> YtDlpResult<PathBuf> {
        let output_template = directory.join(format!("{}.%(ext)s", file_stem));
        let output_template = output_template.to_string_lossy();

        let stdout = self
            .run(&[
                "--format",
                "bestaudio/best",
                "--no-playlist",
                "--no-warnings",
                "--extractor-args",
                self.extractor_args.as_str(),
                "--output",
                &*output_template,
                "--print",
                "after_move:filepath",
                url,
            ])
            .await?;

        parse_downloaded_path(&stdout)
            .map(PathBuf::from)
            .ok_or(YtDlpError::MissingOutput)
    }

    async fn extract_flat(&self, target: &str) -> YtDlpResult<VideoInfo> {
        let stdout = self
            .run(&[
                "--dump-single-json",
                "--flat-playlist",
                "--no-warnings",
                "--extractor-args",
                self.extractor_args.as_str(),
                target,
            ])
            .await?;

        parse_video_info(&stdout)
    }

    async fn run(&self, args: &[&str]) -> YtDlpResult<String> {
        debug!(executable = %self.executable, ?args, "Running yt-dlp");

        let output = Command::new(&self.executable)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(YtDlpError::Spawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!(status = ?output.status.code(), %stderr, "yt-dlp failed");

            return Err(YtDlpError::Failed {
                status: output.status.code(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn is_video_id(id: &str) -> bool {
    id.len() == VIDEO_ID_LENGTH
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
}
