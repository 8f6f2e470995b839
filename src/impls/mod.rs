mod media_encoder;

mod media_provider;
pub(crate) use media_provider::*;
