use crate::services::{FfmpegEncoder, Mp3Tags};
use album_processors::{AudioStream, EncodeRequest, MediaEncoder, MediaEncoderError};
use async_trait::async_trait;

#[async_trait]
impl MediaEncoder for FfmpegEncoder {
    fn extension(&self) -> &str {
        "mp3"
    }

    async fn encode(
        &self,
        stream: &AudioStream,
        request: &EncodeRequest,
    ) -> Result<(), MediaEncoderError> {
        let tags = Mp3Tags {
            title: &request.title,
            artist: &request.artist,
            album: request.album.as_deref(),
        };

        self.transcode(
            &stream.path,
            &request.output_path,
            &tags,
            request.artwork_url.as_deref(),
        )
        .await
        .map_err(MediaEncoderError::new)
    }
}
