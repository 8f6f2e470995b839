use super::types::VideoInfo;
use super::YtDlpError;

pub(crate) fn parse_video_info(raw: &str) -> Result<VideoInfo, YtDlpError> {
    Ok(serde_json::from_str(raw.trim())?)
}

/// `--print after_move:filepath` writes the final path as the last line.
pub(crate) fn parse_downloaded_path(raw: &str) -> Option<&str> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
}
