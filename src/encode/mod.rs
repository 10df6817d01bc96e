pub(crate) mod batch;
pub(crate) mod ffmpeg;
pub(crate) mod profile;
pub(crate) mod sink;
pub(crate) mod still;
