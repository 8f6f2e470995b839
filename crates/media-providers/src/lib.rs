mod ytdlp;

pub use ytdlp::*;
