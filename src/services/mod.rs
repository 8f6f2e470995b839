mod album_service;
pub(crate) use album_service::*;

mod ffmpeg_encoder;
pub(crate) use ffmpeg_encoder::*;
