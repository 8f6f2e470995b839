mod album_resolver;
mod batch_downloader;
mod playlist_expander;
mod sanitizer;
mod track_acquirer;
mod traits;
mod types;
mod utils;

#[cfg(test)]
mod test_helpers;

pub use album_resolver::*;
pub use batch_downloader::*;
pub use playlist_expander::*;
pub use sanitizer::*;
pub use track_acquirer::*;
pub use traits::*;
pub use types::*;
